//! Kind-specific widget content.
//!
//! The layout engine never looks inside a payload; it only checks that the
//! payload variant matches the widget kind and hands it to the view. Static
//! kinds carry sample data chosen at creation, live kinds carry whatever the
//! data feed last delivered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WidgetKind;

const BASIC_COLORS: &[&str] = &[
    "#3b82f6", "#f97316", "#ef4444", "#10b981", "#8b5cf6", "#f59e0b", "#06b6d4", "#ec4899",
    "#84cc16", "#6366f1",
];

/// Content attached to a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetPayload {
    Basic {
        color: String,
    },
    Metric {
        card: MetricCard,
    },
    Chart {
        points: Vec<ChartPoint>,
    },
    Funnel {
        steps: Vec<FunnelStep>,
    },
    #[serde(rename_all = "camelCase")]
    LiveMetric {
        metric_type: String,
        #[serde(default)]
        data: LiveData,
    },
    #[serde(rename_all = "camelCase")]
    LiveChart {
        time_range: TimeRange,
        #[serde(default)]
        data: LiveData,
    },
    LiveFunnel {
        #[serde(default)]
        data: LiveData,
    },
    #[serde(rename_all = "camelCase")]
    LiveTrend {
        trend_type: String,
        #[serde(default)]
        data: LiveData,
    },
}

/// A single headline number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub subtitle: String,
    pub value: String,
    pub color: String,
}

/// One bar group of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub sales: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub id: String,
    pub value: f64,
    pub label: String,
}

/// Bucketing used by live charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

/// State of data delivered by the feed for a live widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum LiveData {
    #[default]
    Loading,
    Ready(Value),
    /// The last fetch failed. `last` keeps the previous good value, if any,
    /// so the view can show stale numbers next to the error.
    Failed { error: String, last: Option<Value> },
}

impl WidgetPayload {
    /// The widget kind this payload belongs to.
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetPayload::Basic { .. } => WidgetKind::Basic,
            WidgetPayload::Metric { .. } => WidgetKind::Metric,
            WidgetPayload::Chart { .. } => WidgetKind::Chart,
            WidgetPayload::Funnel { .. } => WidgetKind::Funnel,
            WidgetPayload::LiveMetric { .. } => WidgetKind::LiveMetric,
            WidgetPayload::LiveChart { .. } => WidgetKind::LiveChart,
            WidgetPayload::LiveFunnel { .. } => WidgetKind::LiveFunnel,
            WidgetPayload::LiveTrend { .. } => WidgetKind::LiveTrend,
        }
    }

    /// Default content for a palette action. `seed` picks among the samples
    /// so consecutive widgets don't all look the same.
    pub fn sample(kind: WidgetKind, seed: u32) -> Self {
        let seed = seed as usize;
        match kind {
            WidgetKind::Basic => WidgetPayload::Basic {
                color: BASIC_COLORS[seed % BASIC_COLORS.len()].to_string(),
            },
            WidgetKind::Metric => {
                let cards = sample_metrics();
                let card = cards[seed % cards.len()].clone();
                WidgetPayload::Metric { card }
            }
            WidgetKind::Chart => WidgetPayload::Chart {
                points: sample_chart(),
            },
            WidgetKind::Funnel => WidgetPayload::Funnel {
                steps: sample_funnel(),
            },
            WidgetKind::LiveMetric => WidgetPayload::LiveMetric {
                metric_type: "totalWaivers".to_string(),
                data: LiveData::Loading,
            },
            WidgetKind::LiveChart => WidgetPayload::LiveChart {
                time_range: TimeRange::Monthly,
                data: LiveData::Loading,
            },
            WidgetKind::LiveFunnel => WidgetPayload::LiveFunnel {
                data: LiveData::Loading,
            },
            WidgetKind::LiveTrend => WidgetPayload::LiveTrend {
                trend_type: "expiring7Days".to_string(),
                data: LiveData::Loading,
            },
        }
    }

    pub fn live_data(&self) -> Option<&LiveData> {
        match self {
            WidgetPayload::LiveMetric { data, .. }
            | WidgetPayload::LiveChart { data, .. }
            | WidgetPayload::LiveFunnel { data }
            | WidgetPayload::LiveTrend { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn live_data_mut(&mut self) -> Option<&mut LiveData> {
        match self {
            WidgetPayload::LiveMetric { data, .. }
            | WidgetPayload::LiveChart { data, .. }
            | WidgetPayload::LiveFunnel { data }
            | WidgetPayload::LiveTrend { data, .. } => Some(data),
            _ => None,
        }
    }
}

fn sample_metrics() -> Vec<MetricCard> {
    [
        ("This Month", "1 Jul - 30 Jul", "99", "#ef4444"),
        ("Total Users", "Active this week", "1.2K", "#3b82f6"),
        ("Revenue", "Current month", "$45K", "#10b981"),
        ("Conversion", "Last 30 days", "3.2%", "#f59e0b"),
        ("Sessions", "Today", "847", "#8b5cf6"),
    ]
    .iter()
    .map(|(title, subtitle, value, color)| MetricCard {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        value: value.to_string(),
        color: color.to_string(),
    })
    .collect()
}

fn sample_chart() -> Vec<ChartPoint> {
    [
        ("Jan", 120.0, 80.0),
        ("Feb", 190.0, 130.0),
        ("Mar", 300.0, 200.0),
        ("Apr", 280.0, 180.0),
        ("May", 420.0, 280.0),
        ("Jun", 380.0, 220.0),
    ]
    .iter()
    .map(|&(label, sales, expenses)| ChartPoint {
        label: label.to_string(),
        sales,
        expenses,
    })
    .collect()
}

fn sample_funnel() -> Vec<FunnelStep> {
    [
        (1000.0, "Website Visitors"),
        (800.0, "Product Views"),
        (600.0, "Add to Cart"),
        (400.0, "Checkout"),
        (200.0, "Purchase"),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(value, label))| FunnelStep {
        id: format!("step_{}", i + 1),
        value,
        label: label.to_string(),
    })
    .collect()
}
