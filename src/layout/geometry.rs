//! Axis-aligned box collision.

use crate::model::Rect;

/// True iff `a` and `b`, each inflated by `padding` on every side, intersect.
///
/// Touching edges don't count: all four separating-axis tests are strict.
/// Symmetric in `a` and `b`.
pub fn overlaps(a: Rect, b: Rect, padding: f64) -> bool {
    let a = a.inflate(padding);
    let b = b.inflate(padding);
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Whether two closed intervals share more than a point.
pub fn spans_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && a_end > b_start
}
