//! Data feed for live widgets.
//!
//! Live widgets get their numbers from an external service. The engine does
//! not fetch anything itself: it tracks which widgets are due for a refresh
//! and writes back whatever a [`PayloadSource`] returns. A failed fetch is
//! recorded on the payload for the view to show; there is no retry here, the
//! next scheduled refresh simply tries again.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::payload::LiveData;
use crate::model::{WidgetId, WidgetKind, WidgetPayload};

/// Why a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// The service answered with a non-success status.
    #[error("API error: {0}")]
    Status(u16),
    /// The service couldn't be reached or returned garbage.
    #[error("{0}")]
    Unavailable(String),
}

/// A live widget waiting for fresh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshRequest {
    pub widget: WidgetId,
    pub kind: WidgetKind,
}

/// Something that can produce data for a live widget.
pub trait PayloadSource {
    fn fetch(&mut self, request: RefreshRequest, payload: &WidgetPayload)
        -> Result<Value, FeedError>;
}

impl<F> PayloadSource for F
where
    F: FnMut(RefreshRequest, &WidgetPayload) -> Result<Value, FeedError>,
{
    fn fetch(
        &mut self,
        request: RefreshRequest,
        payload: &WidgetPayload,
    ) -> Result<Value, FeedError> {
        self(request, payload)
    }
}

/// Write a fetch result into `payload`. Returns false for payloads that
/// aren't live, which are left untouched.
pub fn apply_result(payload: &mut WidgetPayload, result: Result<Value, FeedError>) -> bool {
    let Some(data) = payload.live_data_mut() else {
        return false;
    };
    let next = match result {
        Ok(value) => LiveData::Ready(value),
        Err(e) => {
            let last = match std::mem::take(data) {
                LiveData::Ready(value) => Some(value),
                LiveData::Failed { last, .. } => last,
                LiveData::Loading => None,
            };
            LiveData::Failed {
                error: e.to_string(),
                last,
            }
        }
    };
    *data = next;
    true
}
