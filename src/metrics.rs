//! Metric points and their normalization against fixed caps.

use crate::error::{RadarError, Result};
use serde::{Deserialize, Serialize};

/// A raw measurement with the ceiling it is scaled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub label: String,
    pub value: f64,
    pub cap: f64,
    #[serde(default)]
    pub unit: String,
}

impl MetricPoint {
    pub fn new(label: impl Into<String>, value: f64, cap: f64) -> Self {
        Self {
            label: label.into(),
            value,
            cap,
            unit: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// A metric point plus its value as a clamped 0-100 percentage of cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetric {
    pub label: String,
    pub value: f64,
    pub cap: f64,
    pub normalized: f64,
    #[serde(default)]
    pub unit: String,
}

impl NormalizedMetric {
    /// Copy of this metric pinned at a fixed percentage (used for grid rings)
    pub fn at_level(&self, level: f64) -> Self {
        Self {
            normalized: level,
            ..self.clone()
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.unit == "%" || self.label.to_lowercase().ends_with("rate")
    }
}

/// Normalize every point against its cap, preserving order and labels.
pub fn normalize_metric_points<'a, I>(points: I) -> Result<Vec<NormalizedMetric>>
where
    I: IntoIterator<Item = &'a MetricPoint>,
{
    points.into_iter().map(normalize_point).collect()
}

fn normalize_point(point: &MetricPoint) -> Result<NormalizedMetric> {
    if !(point.cap.is_finite() && point.cap > 0.0) {
        return Err(RadarError::InvalidInput(format!(
            "Cap must be positive for metric '{}'.",
            point.label
        )));
    }
    if !point.value.is_finite() {
        return Err(RadarError::InvalidInput(format!(
            "Value must be finite for metric '{}'.",
            point.label
        )));
    }

    let clamped_ratio = (point.value / point.cap).clamp(0.0, 1.0);

    Ok(NormalizedMetric {
        label: point.label.clone(),
        value: point.value,
        cap: point.cap,
        normalized: round_to_tenth(clamped_ratio * 100.0),
        unit: point.unit.clone(),
    })
}

/// Display string for the raw value: nearest integer, `%` suffix for percentage-like metrics.
pub fn format_metric_value(metric: &NormalizedMetric) -> String {
    // halves go to the even neighbour: 62.5 shows as 62
    let rounded = metric.value.round_ties_even() as i64;
    if metric.is_percentage() {
        format!("{}%", rounded)
    } else {
        rounded.to_string()
    }
}

/// Round on the exact stored value with ties to even, as `{:.1}` formatting does.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
