//! # Session Scripts
//!
//! A recorded sequence of palette actions, pointer gestures and clock ticks,
//! replayed against a fresh [`LayoutStore`]. Scripts are how the CLI drives
//! the engine and how layouts are reproduced in tests.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "actions": [
//!     { "type": "create", "kind": "metric" },
//!     { "type": "drag", "id": 1, "grab": { "x": 60, "y": 140 },
//!       "path": [{ "x": 300, "y": 300 }] },
//!     { "type": "advance", "ms": 500 }
//!   ]
//! }
//! ```
//!
//! Widget ids in a script are the ids the store hands out, starting at 1.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::{default_viewport, LayoutConfig};
use crate::error::LayoutError;
use crate::feed::FeedError;
use crate::model::{Point, Size, SizePreset, WidgetId, WidgetKind, WidgetPayload};
use crate::store::LayoutStore;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub config: LayoutConfig,
    pub viewport: Option<Size>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One recorded step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Palette action.
    Create {
        kind: WidgetKind,
        preset: Option<SizePreset>,
        payload: Option<WidgetPayload>,
    },
    Delete {
        id: WidgetId,
    },
    /// Press on the widget body at `grab`, move through `path`, release.
    /// With `leave`, the pointer exits the canvas instead of releasing.
    Drag {
        id: WidgetId,
        grab: Point,
        path: Vec<Point>,
        #[serde(default)]
        leave: bool,
    },
    /// Same as `drag`, on the resize handle.
    Resize {
        id: WidgetId,
        grab: Point,
        path: Vec<Point>,
        #[serde(default)]
        leave: bool,
    },
    /// Drop a widget at `to` without an intermediate path.
    Move {
        id: WidgetId,
        to: Point,
    },
    SetViewport {
        width: f64,
        height: f64,
    },
    Advance {
        ms: u64,
    },
    /// Deliver a data feed result. `error` wins over `data`.
    Feed {
        id: WidgetId,
        #[serde(default)]
        data: Value,
        error: Option<String>,
    },
}

/// Parse a session script.
pub fn parse(json: &str) -> Result<Session, LayoutError> {
    Ok(serde_json::from_str(json)?)
}

/// Replay a script from an empty canvas and return the resulting store.
pub fn replay(session: &Session) -> Result<LayoutStore, LayoutError> {
    session.config.validate()?;
    let viewport = session.viewport.unwrap_or_else(default_viewport);
    let mut store = LayoutStore::new(session.config.clone(), viewport);

    for (step, action) in session.actions.iter().enumerate() {
        tracing::trace!(target: "dashlay::session", step, ?action, "replaying");
        apply(&mut store, action)?;
    }
    Ok(store)
}

/// Parse and replay in one go.
pub fn replay_json(json: &str) -> Result<LayoutStore, LayoutError> {
    replay(&parse(json)?)
}

/// Apply a single action to `store`.
pub fn apply(store: &mut LayoutStore, action: &Action) -> Result<(), LayoutError> {
    match action {
        Action::Create {
            kind,
            preset,
            payload,
        } => {
            store.create_widget(*kind, *preset, payload.clone())?;
        }
        Action::Delete { id } => {
            store.delete_widget(*id)?;
        }
        Action::Drag {
            id,
            grab,
            path,
            leave,
        } => {
            store.pointer_down(*id, *grab)?;
            finish_gesture(store, path, *leave);
        }
        Action::Resize {
            id,
            grab,
            path,
            leave,
        } => {
            if store.resize_start(*id, *grab)? {
                finish_gesture(store, path, *leave);
            }
        }
        Action::Move { id, to } => {
            store.move_widget(*id, *to)?;
        }
        Action::SetViewport { width, height } => {
            store.set_viewport(Size::new(*width, *height));
        }
        Action::Advance { ms } => {
            store.advance(Duration::from_millis(*ms));
        }
        Action::Feed { id, data, error } => {
            let result = match error {
                Some(e) => Err(FeedError::Unavailable(e.clone())),
                None => Ok(data.clone()),
            };
            store.apply_feed_result(*id, result);
        }
    }
    Ok(())
}

fn finish_gesture(store: &mut LayoutStore, path: &[Point], leave: bool) {
    for &p in path {
        store.pointer_move(p);
    }
    if leave {
        store.pointer_leave();
    } else {
        store.pointer_up();
    }
}
