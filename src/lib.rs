//! # Dashlay
//!
//! A collision-aware layout engine for free-form dashboard canvases.
//!
//! Users drop widgets from a palette, drag them anywhere, and stretch them by
//! a corner handle. Free-form canvases usually end in piles of overlapping
//! cards. Dashlay keeps the freedom of pixel positioning but never lets a
//! widget come to rest on top of another: new widgets go into the first free
//! slot of an implicit grid, dragged widgets slide to the nearest free spot,
//! and resized widgets stop at their neighbours and snap to a preset size.
//!
//! ## Architecture
//!
//! ```text
//! Palette / pointer events / clock
//!       ↓
//!   [store]     : the widget list and the active interaction
//!       ↓
//!   [layout]    : pure geometry (allocator, drag resolver, resize validator)
//!       ↓
//!   snapshot    : positions, sizes, flags and payloads for the view
//! ```
//!
//! Deferred work (entry animations, live data polling) is kept in
//! [`schedule`] and driven by an explicit clock, so the whole engine is
//! synchronous and deterministic.

pub mod config;
pub mod error;
pub mod feed;
pub mod layout;
pub mod model;
pub mod schedule;
pub mod session;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use model::{Point, Size, SizePreset, Widget, WidgetId, WidgetKind, WidgetPayload};
pub use store::{LayoutSnapshot, LayoutStore};

/// Replay a session script and return the final layout as pretty JSON.
pub fn render_session_json(json: &str) -> Result<String, LayoutError> {
    let store = session::replay_json(json)?;
    Ok(serde_json::to_string_pretty(&store.snapshot())?)
}
