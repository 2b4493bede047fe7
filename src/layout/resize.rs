//! # Resize Validator
//!
//! Resizing uses a single bottom-right handle, so a widget only ever grows
//! right and down. While the handle moves, [`clamp_resize`] caps each axis on
//! its own: width against the canvas edge and against neighbours to the
//! right that share rows with the widget, height against neighbours below
//! that share columns. On release, [`snap_to_preset`] picks the closest size
//! from the preset catalog.
//!
//! Per-axis capping isn't a full 2D collision solve; a widget can grow
//! diagonally into a neighbour that sits right *and* below. The snap on
//! release filters out presets that would collide, which catches that case.

use crate::config::LayoutConfig;
use crate::layout::geometry::spans_overlap;
use crate::layout::placement::{is_free, EPSILON};
use crate::layout::CanvasBounds;
use crate::model::{Rect, Size, SizePreset, Widget};

/// Continuous size for `widget` while its handle is dragged to `desired`.
///
/// Never below one cell in either axis. If a neighbour leaves less room than
/// that, the widget simply can't grow toward it and may end up overlapping
/// at the minimum.
pub fn clamp_resize(
    widget: &Widget,
    desired: Size,
    others: &[Widget],
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> Size {
    let min = config.cell_size;
    let rect = widget.rect();

    let mut width = desired
        .width
        .max(min)
        .min(bounds.width - config.padding - rect.x);
    let mut height = desired.height.max(min).min(bounds.height - rect.y);

    for other in others.iter().filter(|o| o.id != widget.id) {
        let o = other.rect();
        if o.x > rect.x && spans_overlap(rect.y, rect.bottom(), o.y, o.bottom()) {
            width = width.min(o.x - config.padding - rect.x);
        }
        if o.y > rect.y && spans_overlap(rect.x, rect.right(), o.x, o.right()) {
            height = height.min(o.y - config.padding - rect.y);
        }
    }

    Size::new(width.max(min), height.max(min))
}

/// Manhattan distance between a size and a preset's pixel size.
fn preset_distance(size: Size, preset: SizePreset, cell_size: f64) -> f64 {
    let p = preset.pixel_size(cell_size);
    (size.width - p.width).abs() + (size.height - p.height).abs()
}

/// Preset closest to `current` among those the widget's kind allows.
///
/// With `others`, presets that would break the padding clearance to a
/// neighbour or run past the canvas edge are skipped, unless that rules out
/// every allowed preset. The closest preset of the whole catalog wins when
/// it is a candidate (ties to the earlier one in catalog order). Otherwise
/// the closest candidate wins and ties go to the later, larger preset, so a
/// metric dragged halfway between its two sizes becomes `2x1`.
/// A size that already equals an allowed preset maps to that preset.
pub fn snap_to_preset(
    widget: &Widget,
    current: Size,
    others: Option<&[Widget]>,
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> SizePreset {
    let allowed = widget.kind.allowed_presets();

    let mut candidates: Vec<SizePreset> = match others {
        Some(others) => allowed
            .iter()
            .copied()
            .filter(|preset| {
                let rect =
                    Rect::from_parts(widget.position, preset.pixel_size(config.cell_size));
                rect.right() <= bounds.width - config.padding + EPSILON
                    && is_free(rect, widget, others, config)
            })
            .collect(),
        None => allowed.to_vec(),
    };
    if candidates.is_empty() {
        tracing::debug!(
            target: "dashlay::resize",
            widget = %widget.id,
            "no preset fits next to the neighbours, snapping without them"
        );
        candidates = allowed.to_vec();
    }

    let closest = closest_preset(current, &SizePreset::ALL, config.cell_size, false);
    if candidates.contains(&closest) {
        return closest;
    }
    closest_preset(current, &candidates, config.cell_size, true)
}

/// Preset in `presets` nearest to `size`. `later_wins` decides ties.
fn closest_preset(
    size: Size,
    presets: &[SizePreset],
    cell_size: f64,
    later_wins: bool,
) -> SizePreset {
    let mut best = presets[0];
    let mut best_distance = preset_distance(size, best, cell_size);
    for &preset in &presets[1..] {
        let distance = preset_distance(size, preset, cell_size);
        if distance < best_distance || (later_wins && distance == best_distance) {
            best = preset;
            best_distance = distance;
        }
    }
    best
}
