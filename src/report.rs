//! Fetch, normalize, render, write.

use crate::chart::build_radar_svg;
use crate::error::Result;
use crate::github::{ActivityWindow, GitHubClient, GraphQlTransport};
use crate::metrics::{normalize_metric_points, NormalizedMetric};
use crate::profile::ProfileMetrics;
use crate::snapshot::{write_text, MetricsSnapshot};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

/// Both output documents, fully rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub metrics: Vec<NormalizedMetric>,
    pub svg: String,
    pub snapshot_json: String,
}

impl RenderedReport {
    pub fn write(&self, svg_path: &Path, json_path: &Path) -> Result<()> {
        write_text(svg_path, &self.svg)?;
        info!("Wrote {}", svg_path.display());
        write_text(json_path, &self.snapshot_json)?;
        info!("Wrote {}", json_path.display());
        Ok(())
    }
}

/// Normalize `profile` and render the radar chart and snapshot.
pub fn render_report(
    username: &str,
    profile: &ProfileMetrics,
    generated_at: DateTime<Utc>,
) -> Result<RenderedReport> {
    let metrics = normalize_metric_points(&profile.metric_points())?;
    let svg = build_radar_svg(&metrics)?;
    let snapshot_json = MetricsSnapshot::new(generated_at, username, metrics.clone()).to_json()?;

    Ok(RenderedReport {
        metrics,
        svg,
        snapshot_json,
    })
}

/// Run the whole pipeline; nothing is written unless every stage succeeds.
pub async fn generate_report<T: GraphQlTransport>(
    client: &GitHubClient<T>,
    username: &str,
    window: &ActivityWindow,
    svg_path: &Path,
    json_path: &Path,
) -> Result<RenderedReport> {
    let profile = client.fetch_profile_metrics(username, window).await?;
    let report = render_report(username, &profile, window.now)?;
    report.write(svg_path, json_path)?;
    Ok(report)
}
