//! # Widget Model
//!
//! The value types the layout engine works on. A dashboard is a flat list of
//! widgets, each with a pixel position, a pixel size, a grid footprint taken
//! from a small catalog of presets, and a kind that decides what it may do.
//!
//! Everything here is plain data. The geometry that moves widgets around
//! lives in [`crate::layout`]; the mutable collection lives in
//! [`crate::store`].

pub mod payload;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use payload::WidgetPayload;

/// A position in canvas pixels, top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow the box by `amount` on all four sides.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Same size, different origin.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::from_parts(origin, self.size())
    }
}

/// Identifier of a widget. Assigned by the store from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Size presets ────────────────────────────────────────────────

/// One of the discrete sizes a widget may have at rest.
///
/// Serialized as its `"CxR"` label (columns × rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizePreset {
    #[serde(rename = "1x1")]
    OneByOne,
    #[serde(rename = "2x1")]
    TwoByOne,
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "3x1")]
    ThreeByOne,
    #[serde(rename = "1x2")]
    OneByTwo,
    #[serde(rename = "3x3")]
    ThreeByThree,
}

impl SizePreset {
    /// The full catalog, in snapping tie-break order.
    pub const ALL: [SizePreset; 6] = [
        SizePreset::OneByOne,
        SizePreset::TwoByOne,
        SizePreset::TwoByTwo,
        SizePreset::ThreeByOne,
        SizePreset::OneByTwo,
        SizePreset::ThreeByThree,
    ];

    /// Grid footprint as (cols, rows).
    pub fn span(&self) -> (u32, u32) {
        match self {
            SizePreset::OneByOne => (1, 1),
            SizePreset::TwoByOne => (2, 1),
            SizePreset::TwoByTwo => (2, 2),
            SizePreset::ThreeByOne => (3, 1),
            SizePreset::OneByTwo => (1, 2),
            SizePreset::ThreeByThree => (3, 3),
        }
    }

    /// Exact pixel size for a given grid cell size.
    pub fn pixel_size(&self, cell_size: f64) -> Size {
        let (cols, rows) = self.span();
        Size::new(cols as f64 * cell_size, rows as f64 * cell_size)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizePreset::OneByOne => "1x1",
            SizePreset::TwoByOne => "2x1",
            SizePreset::TwoByTwo => "2x2",
            SizePreset::ThreeByOne => "3x1",
            SizePreset::OneByTwo => "1x2",
            SizePreset::ThreeByThree => "3x3",
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Widget kinds ────────────────────────────────────────────────

/// What a widget shows. The kind decides which rendering collaborator draws
/// it and what the layout engine allows it to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Basic,
    Metric,
    Chart,
    Funnel,
    LiveMetric,
    LiveChart,
    LiveFunnel,
    LiveTrend,
}

const METRIC_PRESETS: &[SizePreset] = &[SizePreset::OneByOne, SizePreset::TwoByOne];

impl WidgetKind {
    /// Chart and funnel widgets keep their palette size for good.
    pub fn is_resizable(&self) -> bool {
        !matches!(
            self,
            WidgetKind::Chart | WidgetKind::Funnel | WidgetKind::LiveChart | WidgetKind::LiveFunnel
        )
    }

    /// Presets a resize may snap to.
    pub fn allowed_presets(&self) -> &'static [SizePreset] {
        match self {
            WidgetKind::Metric => METRIC_PRESETS,
            _ => &SizePreset::ALL,
        }
    }

    /// Preset used by a palette action that doesn't ask for one.
    pub fn default_preset(&self) -> SizePreset {
        match self {
            WidgetKind::Chart
            | WidgetKind::Funnel
            | WidgetKind::LiveChart
            | WidgetKind::LiveFunnel => SizePreset::TwoByTwo,
            _ => SizePreset::OneByOne,
        }
    }

    /// Live kinds get their payload from the data feed.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            WidgetKind::LiveMetric
                | WidgetKind::LiveChart
                | WidgetKind::LiveFunnel
                | WidgetKind::LiveTrend
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetKind::Basic => "basic",
            WidgetKind::Metric => "metric",
            WidgetKind::Chart => "chart",
            WidgetKind::Funnel => "funnel",
            WidgetKind::LiveMetric => "live-metric",
            WidgetKind::LiveChart => "live-chart",
            WidgetKind::LiveFunnel => "live-funnel",
            WidgetKind::LiveTrend => "live-trend",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Widget ──────────────────────────────────────────────────────

/// A placed item on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    pub position: Point,
    /// Equal to `preset.pixel_size(..)` at rest; free-form mid-resize.
    pub size: Size,
    pub preset: SizePreset,
    pub kind: WidgetKind,
    pub payload: WidgetPayload,
    pub is_dragging: bool,
    pub is_resizing: bool,
    /// Drives the entry animation. Cleared by a timer after creation.
    pub is_new: bool,
}

impl Widget {
    pub fn new(
        id: WidgetId,
        kind: WidgetKind,
        preset: SizePreset,
        position: Point,
        cell_size: f64,
        payload: WidgetPayload,
    ) -> Self {
        Self {
            id,
            position,
            size: preset.pixel_size(cell_size),
            preset,
            kind,
            payload,
            is_dragging: false,
            is_resizing: false,
            is_new: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// A geometry update written back into the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Position(Point),
    Size(Size),
    Preset(SizePreset),
}

// ── Interaction state ───────────────────────────────────────────

/// The single pointer interaction in progress, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Interaction {
    #[default]
    Idle,
    /// `offset` is the pointer position minus the widget origin at grab time.
    Dragging { id: WidgetId, offset: Point },
    /// `anchor` is the pointer at grab time, `anchor_size` the widget size then.
    #[serde(rename_all = "camelCase")]
    Resizing {
        id: WidgetId,
        anchor: Point,
        anchor_size: Size,
    },
}

impl Interaction {
    /// The widget currently being dragged or resized.
    pub fn active_widget(&self) -> Option<WidgetId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { id, .. } | Interaction::Resizing { id, .. } => Some(*id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}
