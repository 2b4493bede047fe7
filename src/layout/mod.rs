//! # Collision-Aware Layout
//!
//! The geometry half of the engine. Every function in this module is a pure
//! function of a snapshot of the widget list: nothing here mutates state, and
//! nothing here can fail.
//!
//! ## Pieces
//!
//! ```text
//!   [geometry]   : padded AABB overlap test
//!        ↓
//!   [grid]       : first free grid slot for a new widget
//!   [placement]  : nearest free position for a dragged widget
//!   [resize]     : neighbour-aware resize clamp + preset snapping
//! ```
//!
//! ## Padding
//!
//! Widgets keep a `padding` gap between each other and from the canvas edges.
//! Collision checks inflate *both* boxes, so they use half the padding
//! ([`LayoutConfig::collision_margin`]) to demand a full padding gap.
//!
//! ## Degenerate Cases
//!
//! A full canvas, a neighbour that leaves less room than one cell, a widget
//! wider than the viewport: each of these produces a best-effort answer that
//! may overlap. That is accepted. The user sees a slightly crowded layout
//! instead of an error.

pub mod geometry;
pub mod grid;
pub mod placement;
pub mod resize;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::model::{Size, Widget};

pub use geometry::overlaps;
pub use grid::next_free_position;
pub use placement::resolve_drag_position;
pub use resize::{clamp_resize, snap_to_preset};

/// The scrollable area widgets live in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    /// Width follows the viewport. Height is the viewport height, or the
    /// lowest widget's bottom edge plus the bottom margin if that is larger.
    /// The canvas grows with its content but never shrinks below the viewport.
    pub fn compute(widgets: &[Widget], viewport: Size, config: &LayoutConfig) -> Self {
        let lowest = widgets
            .iter()
            .map(|w| w.rect().bottom() + config.bottom_margin)
            .fold(viewport.height, f64::max);
        Self {
            width: viewport.width,
            height: lowest,
        }
    }
}
