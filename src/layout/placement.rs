//! # Placement Resolver
//!
//! Turns the point a widget is being dragged to into the nearest point it may
//! actually occupy.
//!
//! 1. Clamp the desired origin into the canvas.
//! 2. If that spot keeps `padding` clearance from every other widget, done.
//! 3. Otherwise every widget blocking the spot proposes eight candidates:
//!    flush left, right, above, below, and the four diagonal corners, each
//!    exactly `padding` away. Candidates are clamped, those that collide with
//!    *any* other widget are dropped, and the one closest to the desired
//!    point wins.
//! 4. If no blocker yields a free candidate, every other widget proposes.
//! 5. If even that fails the widget stays where it was, or (if that spot is
//!    taken too) goes to the clamped desired point and overlaps.
//!
//! Candidates are judged against the full widget set at once, so a widget
//! squeezed between two neighbours settles instead of bouncing between them.

use crate::config::LayoutConfig;
use crate::layout::geometry::overlaps;
use crate::layout::CanvasBounds;
use crate::model::{Point, Rect, Size, Widget};

/// Slack for float noise when a candidate sits exactly `padding` away.
pub(crate) const EPSILON: f64 = 1e-6;

/// Clamp an origin so a box of `size` stays inside the canvas, away from the
/// edges and below the title strip. When the box is bigger than the canvas
/// the minimum edge wins.
pub fn clamp_to_canvas(
    origin: Point,
    size: Size,
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> Point {
    let max_x = bounds.width - size.width - config.padding;
    let max_y = bounds.height - size.height;
    Point::new(
        origin.x.min(max_x).max(config.min_x()),
        origin.y.min(max_y).max(config.min_y()),
    )
}

/// True if `rect` keeps `padding` clearance from every widget in `others`
/// except `moving`.
pub fn is_free(rect: Rect, moving: &Widget, others: &[Widget], config: &LayoutConfig) -> bool {
    let margin = config.collision_margin() - EPSILON;
    others
        .iter()
        .filter(|o| o.id != moving.id)
        .all(|o| !overlaps(rect, o.rect(), margin))
}

/// Positions flush against `blocker` for a box of `size`, in tie-break order.
fn candidates_around(size: Size, anchor: Point, blocker: Rect, padding: f64) -> [Point; 8] {
    let left = blocker.x - padding - size.width;
    let right = blocker.right() + padding;
    let above = blocker.y - padding - size.height;
    let below = blocker.bottom() + padding;
    [
        Point::new(left, anchor.y),
        Point::new(right, anchor.y),
        Point::new(anchor.x, above),
        Point::new(anchor.x, below),
        Point::new(left, above),
        Point::new(right, above),
        Point::new(left, below),
        Point::new(right, below),
    ]
}

/// Best free candidate proposed by `proposers`, closest to `desired`.
fn nearest_free_candidate<'a>(
    moving: &Widget,
    desired: Point,
    anchor: Point,
    proposers: impl Iterator<Item = &'a Widget>,
    others: &[Widget],
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;

    for proposer in proposers {
        for candidate in candidates_around(moving.size, anchor, proposer.rect(), config.padding) {
            let candidate = clamp_to_canvas(candidate, moving.size, bounds, config);
            let rect = Rect::from_parts(candidate, moving.size);
            if !is_free(rect, moving, others, config) {
                continue;
            }
            let distance = candidate.distance(desired);
            // Strict: equal distances keep the earlier candidate.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }
    }

    best.map(|(p, _)| p)
}

/// Nearest valid origin for `moving` when the pointer asks for `desired`.
///
/// Always inside the canvas. Under extreme density the answer may still
/// overlap a neighbour; that is accepted.
pub fn resolve_drag_position(
    moving: &Widget,
    desired: Point,
    others: &[Widget],
    bounds: CanvasBounds,
    config: &LayoutConfig,
) -> Point {
    let clamped = clamp_to_canvas(desired, moving.size, bounds, config);
    let rect = Rect::from_parts(clamped, moving.size);
    if is_free(rect, moving, others, config) {
        return clamped;
    }

    let margin = config.collision_margin() - EPSILON;
    let blockers = others
        .iter()
        .filter(|o| o.id != moving.id && overlaps(rect, o.rect(), margin));
    if let Some(p) =
        nearest_free_candidate(moving, desired, clamped, blockers, others, bounds, config)
    {
        return p;
    }

    let everyone = others.iter().filter(|o| o.id != moving.id);
    if let Some(p) =
        nearest_free_candidate(moving, desired, clamped, everyone, others, bounds, config)
    {
        tracing::debug!(
            target: "dashlay::placement",
            widget = %moving.id,
            "blockers left no room, settled next to a farther widget"
        );
        return p;
    }

    let current = clamp_to_canvas(moving.position, moving.size, bounds, config);
    if is_free(moving.rect().moved_to(current), moving, others, config) {
        tracing::debug!(
            target: "dashlay::placement",
            widget = %moving.id,
            "no free spot near the pointer, widget stays put"
        );
        return current;
    }

    tracing::debug!(
        target: "dashlay::placement",
        widget = %moving.id,
        "canvas too dense, accepting overlap"
    );
    clamped
}
