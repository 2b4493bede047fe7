//! Layout constants.
//!
//! Every number the engine uses lives here so hosts can tune the grid without
//! touching the algorithms. All fields default, so `{}` is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::model::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Edge length of one grid cell in pixels. Also the minimum widget size.
    pub cell_size: f64,
    /// Minimum gap between two widgets, and between a widget and the canvas
    /// edges.
    pub padding: f64,
    /// Height reserved for the title strip at the top of the canvas.
    pub title_area_height: f64,
    /// Free space kept below the lowest widget.
    pub bottom_margin: f64,
    /// How many grid rows the allocator scans before giving up.
    pub max_scan_rows: u32,
    /// Delay before a new widget's entry animation flag is cleared.
    pub new_flag_delay_ms: u64,
    /// Polling interval for live widget payloads.
    pub refresh_interval_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 150.0,
            padding: 50.0,
            title_area_height: 80.0,
            bottom_margin: 50.0,
            max_scan_rows: 50,
            new_flag_delay_ms: 500,
            refresh_interval_ms: 5 * 60 * 1000,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the grid arithmetic can't work with: the cell size must
    /// be positive, the pixel offsets non-negative, all of them finite.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LayoutError::InvalidConfig {
                field: "cellSize",
                reason: "must be a positive number",
                value: self.cell_size,
            });
        }
        let offsets = [
            ("padding", self.padding),
            ("titleAreaHeight", self.title_area_height),
            ("bottomMargin", self.bottom_margin),
        ];
        for (field, value) in offsets {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidConfig {
                    field,
                    reason: "must be a non-negative number",
                    value,
                });
            }
        }
        Ok(())
    }

    /// Distance from one grid cell origin to the next.
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.padding
    }

    /// Smallest y a widget may sit at.
    pub fn min_y(&self) -> f64 {
        self.title_area_height + self.padding
    }

    /// Smallest x a widget may sit at.
    pub fn min_x(&self) -> f64 {
        self.padding
    }

    /// Amount each box is inflated by in collision checks. Both boxes grow,
    /// so half the padding on each side keeps a full `padding` gap.
    pub fn collision_margin(&self) -> f64 {
        self.padding / 2.0
    }

    pub fn new_flag_delay(&self) -> Duration {
        Duration::from_millis(self.new_flag_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Viewport used when the host doesn't report one.
pub fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}
