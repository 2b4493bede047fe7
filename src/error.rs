//! Structured error types for the dashboard layout engine.
//!
//! Geometry itself never fails: the allocator, the placement resolver and the
//! resize validator always return an answer. Errors only come from commands
//! that name a widget, from interaction conflicts, from JSON input and from
//! layout constants the grid can't work with.

use thiserror::Error;

use crate::model::{SizePreset, WidgetId, WidgetKind};

/// The unified error type returned by store commands and session replay.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No widget with this id exists in the store.
    #[error("unknown widget #{0}")]
    UnknownWidget(WidgetId),

    /// The widget kind can't take this size preset.
    #[error("a `{kind}` widget can't be {preset}")]
    PresetNotAllowed { kind: WidgetKind, preset: SizePreset },

    /// A layout constant is out of range.
    #[error("invalid config: `{field}` {reason}, got {value}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
        value: f64,
    },

    /// Every widget id has been handed out.
    #[error("no widget ids left")]
    IdsExhausted,

    /// A widget with this id is already present.
    #[error("widget #{0} already exists")]
    DuplicateWidget(WidgetId),

    /// Another widget is already being dragged or resized.
    #[error("widget #{active} is already being dragged or resized")]
    InteractionBusy { active: WidgetId },

    /// The payload variant doesn't belong to the requested widget kind.
    #[error("payload for `{payload}` cannot be attached to a `{kind}` widget")]
    PayloadMismatch {
        kind: WidgetKind,
        payload: &'static str,
    },

    /// JSON input (config or session script) failed to parse.
    #[error("failed to parse input: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names, action types and size labels like \"2x1\".".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        LayoutError::Parse { source: e, hint }
    }
}
