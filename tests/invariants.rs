//! Property invariants for the layout engine.
//!
//! Random operation streams (create, delete, drop, drag, resize, tick) are
//! replayed against a fresh store. After every operation the widgets must be
//! at rest without overlapping, inside the canvas, and at their preset sizes.

use dashlay::layout::geometry::overlaps;
use dashlay::layout::grid::next_free_position;
use dashlay::layout::placement::is_free;
use dashlay::layout::{snap_to_preset, CanvasBounds};
use dashlay::model::Rect;
use dashlay::*;
use proptest::prelude::*;

use std::time::Duration;

const KINDS: [WidgetKind; 8] = [
    WidgetKind::Basic,
    WidgetKind::Metric,
    WidgetKind::Chart,
    WidgetKind::Funnel,
    WidgetKind::LiveMetric,
    WidgetKind::LiveChart,
    WidgetKind::LiveFunnel,
    WidgetKind::LiveTrend,
];

#[derive(Debug, Clone)]
enum Op {
    Create { kind: usize, preset: usize },
    Delete { pick: usize },
    Drop { pick: usize, x: f64, y: f64 },
    Drag { pick: usize, path: Vec<(f64, f64)> },
    Resize { pick: usize, width: f64, height: f64 },
    Tick { ms: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..KINDS.len(), 0..6usize).prop_map(|(kind, preset)| Op::Create { kind, preset }),
        1 => any::<usize>().prop_map(|pick| Op::Delete { pick }),
        2 => (any::<usize>(), -200.0..1500.0f64, -200.0..1500.0f64)
            .prop_map(|(pick, x, y)| Op::Drop { pick, x, y }),
        2 => (
            any::<usize>(),
            prop::collection::vec((-100.0..1400.0f64, -100.0..1400.0f64), 1..8)
        )
            .prop_map(|(pick, path)| Op::Drag { pick, path }),
        2 => (any::<usize>(), 0.0..700.0f64, 0.0..700.0f64)
            .prop_map(|(pick, width, height)| Op::Resize { pick, width, height }),
        1 => (0..1000u64).prop_map(|ms| Op::Tick { ms }),
    ]
}

fn pick(store: &LayoutStore, pick: usize) -> Option<WidgetId> {
    let widgets = store.widgets();
    if widgets.is_empty() {
        None
    } else {
        Some(widgets[pick % widgets.len()].id)
    }
}

fn apply(store: &mut LayoutStore, op: &Op) {
    match op {
        Op::Create { kind, preset } => {
            let kind = KINDS[*kind];
            let allowed = kind.allowed_presets();
            let preset = allowed[preset % allowed.len()];
            store.create_widget(kind, Some(preset), None).unwrap();
        }
        Op::Delete { pick: p } => {
            if let Some(id) = pick(store, *p) {
                store.delete_widget(id).unwrap();
            }
        }
        Op::Drop { pick: p, x, y } => {
            if let Some(id) = pick(store, *p) {
                store.move_widget(id, Point::new(*x, *y)).unwrap();
            }
        }
        Op::Drag { pick: p, path } => {
            if let Some(id) = pick(store, *p) {
                let origin = store.widget(id).unwrap().position;
                store.pointer_down(id, origin).unwrap();
                for &(x, y) in path {
                    store.pointer_move(Point::new(x, y));
                }
                store.pointer_up();
            }
        }
        Op::Resize { pick: p, width, height } => {
            if let Some(id) = pick(store, *p) {
                store.resize_widget(id, Size::new(*width, *height)).unwrap();
            }
        }
        Op::Tick { ms } => store.advance(Duration::from_millis(*ms)),
    }
}

fn check_at_rest(store: &LayoutStore) -> Result<(), TestCaseError> {
    let config = store.config();
    let bounds = store.bounds();
    let widgets = store.widgets();

    prop_assert!(store.interaction().is_idle());
    for (i, a) in widgets.iter().enumerate() {
        let r = a.rect();
        prop_assert!(r.x >= config.min_x() - 1e-6);
        prop_assert!(r.y >= config.min_y() - 1e-6);
        prop_assert!(r.right() <= bounds.width - config.padding + 1e-6);
        prop_assert!(r.bottom() <= bounds.height + 1e-6);
        prop_assert_eq!(a.size, a.preset.pixel_size(config.cell_size));
        prop_assert!(a.kind.allowed_presets().contains(&a.preset));
        prop_assert!(!a.is_dragging && !a.is_resizing);

        for b in &widgets[i + 1..] {
            prop_assert!(
                !overlaps(a.rect(), b.rect(), 0.0),
                "{} {:?} overlaps {} {:?}",
                a.id,
                a.rect(),
                b.id,
                b.rect()
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn random_sessions_keep_widgets_apart(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut store = LayoutStore::new(LayoutConfig::default(), Size::new(1280.0, 800.0));
        for op in &ops {
            apply(&mut store, op);
            check_at_rest(&store)?;
        }
    }

    #[test]
    fn replaying_the_same_ops_gives_the_same_layout(
        ops in prop::collection::vec(op_strategy(), 1..30)
    ) {
        let mut a = LayoutStore::default();
        let mut b = LayoutStore::default();
        for op in &ops {
            apply(&mut a, op);
            apply(&mut b, op);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn overlap_is_symmetric(
        ax in -500.0..500.0f64, ay in -500.0..500.0f64, aw in 0.0..300.0f64, ah in 0.0..300.0f64,
        bx in -500.0..500.0f64, by in -500.0..500.0f64, bw in 0.0..300.0f64, bh in 0.0..300.0f64,
        padding in 0.0..60.0f64,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        prop_assert_eq!(overlaps(a, b, padding), overlaps(b, a, padding));
    }

    #[test]
    fn allocator_is_deterministic_and_lands_on_free_cells(
        creates in prop::collection::vec((0..6usize, 0..2usize), 0..12),
        span in 0..6usize,
    ) {
        let mut store = LayoutStore::default();
        for (preset, kind) in &creates {
            let kind = [WidgetKind::Basic, WidgetKind::LiveTrend][*kind];
            store
                .create_widget(kind, Some(SizePreset::ALL[*preset]), None)
                .unwrap();
        }
        let config = store.config().clone();
        let width = store.bounds().width;
        let preset = SizePreset::ALL[span];
        let (cols, rows) = preset.span();

        let first = next_free_position(cols, rows, store.widgets(), width, &config);
        let second = next_free_position(cols, rows, store.widgets(), width, &config);
        prop_assert_eq!(first, second);

        let probe = Widget::new(
            WidgetId(u32::MAX),
            WidgetKind::Basic,
            preset,
            first,
            config.cell_size,
            WidgetPayload::sample(WidgetKind::Basic, 0),
        );
        prop_assert!(is_free(probe.rect(), &probe, store.widgets(), &config));
    }

    #[test]
    fn snapping_an_exact_preset_is_a_no_op(kind in 0..KINDS.len(), preset in 0..6usize) {
        let config = LayoutConfig::default();
        let kind = KINDS[kind];
        let allowed = kind.allowed_presets();
        let preset = allowed[preset % allowed.len()];
        let widget = Widget::new(
            WidgetId(1),
            kind,
            preset,
            Point::new(config.min_x(), config.min_y()),
            config.cell_size,
            WidgetPayload::sample(kind, 1),
        );
        let bounds = CanvasBounds { width: 1280.0, height: 800.0 };
        let size = preset.pixel_size(config.cell_size);
        prop_assert_eq!(snap_to_preset(&widget, size, None, bounds, &config), preset);
        prop_assert_eq!(
            snap_to_preset(&widget, size, Some(std::slice::from_ref(&widget)), bounds, &config),
            preset
        );
    }
}
