//! SVG assembly for the activity radar chart.

use crate::error::{RadarError, Result};
use crate::geometry::{axis_angle, radar_polygon, Point, RadarPolygon};
use crate::metrics::{format_metric_value, NormalizedMetric};
use std::fmt::{self, Write};

pub const CHART_TITLE: &str = "GitHub Activity Radar (Last 365 Days)";
const CHART_SUBTITLE: &str =
    "Normalized against profile-scale targets to show overall engineering activity balance.";
const CHART_FOOTER: &str = "Automated refresh via GitHub Actions.";
const FONT_FAMILY: &str = "Segoe UI, Helvetica, Arial, sans-serif";

/// Percentages at which concentric grid rings are drawn.
pub const GRID_LEVELS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];

/// Fixed layout of the chart canvas.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub center: Point,
    pub radius: f64,
    pub label_offset: f64,
    pub legend_x: f64,
    pub legend_y: f64,
    pub legend_row_spacing: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 920,
            height: 600,
            center: Point::new(285.0, 300.0),
            radius: 180.0,
            label_offset: 38.0,
            legend_x: 560.0,
            legend_y: 172.0,
            legend_row_spacing: 38.0,
        }
    }
}

/// Build the radar SVG with the default layout.
pub fn build_radar_svg(metrics: &[NormalizedMetric]) -> Result<String> {
    RadarChart::new(ChartLayout::default()).render(metrics)
}

pub struct RadarChart {
    layout: ChartLayout,
}

impl RadarChart {
    pub fn new(layout: ChartLayout) -> Self {
        Self { layout }
    }

    /// Render a self-contained SVG document for `metrics`.
    pub fn render(&self, metrics: &[NormalizedMetric]) -> Result<String> {
        // Fails on fewer than three metrics before any markup is built
        let data_polygon = radar_polygon(metrics, self.layout.center, self.layout.radius)?;
        let grid_polygons = self.grid_polygons(metrics)?;

        let mut svg = String::new();
        self.write_document(&mut svg, metrics, &data_polygon, &grid_polygons)
            .map_err(|e| RadarError::Render(format!("failed to assemble SVG: {}", e)))?;

        Ok(svg)
    }

    fn write_document(
        &self,
        svg: &mut String,
        metrics: &[NormalizedMetric],
        data_polygon: &RadarPolygon,
        grid_polygons: &[RadarPolygon],
    ) -> fmt::Result {
        let (width, height) = (self.layout.width, self.layout.height);

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="GitHub Activity Radar">"#,
            w = width,
            h = height
        )?;
        writeln!(
            svg,
            r##"  <rect x="0" y="0" width="{}" height="{}" fill="#f8fafc" />"##,
            width, height
        )?;
        writeln!(
            svg,
            r##"  <text x="40" y="58" font-family="{}" font-size="30" font-weight="700" fill="#0f172a">{}</text>"##,
            FONT_FAMILY,
            escape_xml(CHART_TITLE)
        )?;
        writeln!(
            svg,
            r##"  <text x="40" y="90" font-family="{}" font-size="16" fill="#475569">{}</text>"##,
            FONT_FAMILY,
            escape_xml(CHART_SUBTITLE)
        )?;
        svg.push('\n');

        for polygon in grid_polygons {
            writeln!(
                svg,
                r##"  <polygon points="{}" fill="none" stroke="#e4e8f0" stroke-width="1" />"##,
                polygon.to_points_attr()
            )?;
        }
        for line in self.axis_lines(metrics.len()) {
            writeln!(svg, "  {}", line)?;
        }
        svg.push('\n');

        writeln!(
            svg,
            r##"  <polygon points="{}" fill="#2563eb33" stroke="#1d4ed8" stroke-width="3" />"##,
            data_polygon.to_points_attr()
        )?;
        for label in self.axis_labels(metrics) {
            writeln!(svg, "  {}", label)?;
        }
        svg.push('\n');

        writeln!(
            svg,
            r##"  <rect x="530" y="130" width="340" height="240" rx="14" fill="#ffffff" stroke="#d7dce5" />"##
        )?;
        writeln!(
            svg,
            r##"  <text x="560" y="152" font-family="{}" font-size="18" font-weight="700" fill="#0f172a">Current Values</text>"##,
            FONT_FAMILY
        )?;
        for row in self.legend_rows(metrics) {
            writeln!(svg, "  {}", row)?;
        }
        svg.push('\n');

        writeln!(
            svg,
            r##"  <text x="40" y="560" font-family="{}" font-size="13" fill="#64748b">{}</text>"##,
            FONT_FAMILY,
            escape_xml(CHART_FOOTER)
        )?;
        svg.push_str("</svg>");

        Ok(())
    }

    /// One ring per grid level, sharing the data polygon's axis angles
    fn grid_polygons(&self, metrics: &[NormalizedMetric]) -> Result<Vec<RadarPolygon>> {
        GRID_LEVELS
            .iter()
            .map(|level| {
                let ring: Vec<NormalizedMetric> =
                    metrics.iter().map(|m| m.at_level(*level)).collect();
                radar_polygon(&ring, self.layout.center, self.layout.radius)
            })
            .collect()
    }

    fn axis_lines(&self, total: usize) -> Vec<String> {
        let center = self.layout.center;
        (0..total)
            .map(|idx| {
                let end = center.polar_offset(axis_angle(idx, total), self.layout.radius);
                format!(
                    r##"<line x1="{}" y1="{}" x2="{:.1}" y2="{:.1}" stroke="#d5d9e0" stroke-width="1" />"##,
                    center.x, center.y, end.x, end.y
                )
            })
            .collect()
    }

    fn axis_labels(&self, metrics: &[NormalizedMetric]) -> Vec<String> {
        let total = metrics.len();
        let distance = self.layout.radius + self.layout.label_offset;
        metrics
            .iter()
            .enumerate()
            .map(|(idx, metric)| {
                let anchor = self.layout.center.polar_offset(axis_angle(idx, total), distance);
                format!(
                    r##"<text x="{:.1}" y="{:.1}" font-size="14" fill="#3a404a" text-anchor="middle">{}</text>"##,
                    anchor.x,
                    anchor.y,
                    escape_xml(&metric.label)
                )
            })
            .collect()
    }

    fn legend_rows(&self, metrics: &[NormalizedMetric]) -> Vec<String> {
        metrics
            .iter()
            .enumerate()
            .map(|(idx, metric)| {
                let y = self.layout.legend_y + idx as f64 * self.layout.legend_row_spacing;
                format!(
                    r##"<text x="{}" y="{}" font-size="16" fill="#141a24">{}: {}</text>"##,
                    self.layout.legend_x,
                    y,
                    escape_xml(&metric.label),
                    format_metric_value(metric)
                )
            })
            .collect()
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
