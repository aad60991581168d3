//! JSON snapshot of normalized metrics and the artifact writers.

use crate::error::Result;
use crate::metrics::NormalizedMetric;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub generated_at_utc: String,
    pub username: String,
    pub metrics: Vec<NormalizedMetric>,
}

impl MetricsSnapshot {
    pub fn new(generated_at: DateTime<Utc>, username: &str, metrics: Vec<NormalizedMetric>) -> Self {
        Self {
            generated_at_utc: generated_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            username: username.to_string(),
            metrics,
        }
    }

    /// Pretty JSON with 2-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Write `content` to `path`, creating parent directories first.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
