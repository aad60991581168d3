//! Radar chart geometry: axis angles and polygon vertices.

use crate::error::{RadarError, Result};
use crate::metrics::NormalizedMetric;
use std::f64::consts::PI;
use std::fmt;

/// Fewest axes a radar polygon can have.
pub const MIN_RADAR_AXES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` along `angle` (screen coordinates, y grows downward)
    pub fn polar_offset(&self, angle: f64, distance: f64) -> Self {
        Self {
            x: self.x + angle.cos() * distance,
            y: self.y + angle.sin() * distance,
        }
    }
}

/// Coordinates rounded to one decimal, ties to even
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1},{:.1}", self.x, self.y)
    }
}

/// Angle in radians of axis `index` out of `total`.
///
/// Axis 0 points straight up and the rest follow clockwise, evenly spaced.
pub fn axis_angle(index: usize, total: usize) -> f64 {
    -PI / 2.0 + 2.0 * PI * index as f64 / total as f64
}

/// Closed radar polygon, one vertex per metric in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPolygon {
    pub vertices: Vec<Point>,
}

impl RadarPolygon {
    /// Value for an SVG `points` attribute; the closing edge is implicit.
    pub fn to_points_attr(&self) -> String {
        self.vertices
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compute the polygon for `metrics` around `center`.
///
/// Each vertex sits at `radius * normalized / 100` along its axis; `Display` emits it at one decimal.
pub fn radar_polygon(metrics: &[NormalizedMetric], center: Point, radius: f64) -> Result<RadarPolygon> {
    if metrics.len() < MIN_RADAR_AXES {
        return Err(RadarError::InvalidInput(format!(
            "Radar chart requires at least three metrics, got {}.",
            metrics.len()
        )));
    }

    let total = metrics.len();
    let vertices = metrics
        .iter()
        .enumerate()
        .map(|(idx, metric)| {
            let scaled_radius = radius * (metric.normalized / 100.0);
            center.polar_offset(axis_angle(idx, total), scaled_radius)
        })
        .collect();

    Ok(RadarPolygon { vertices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{normalize_metric_points, MetricPoint};

    fn metrics_at(levels: &[f64]) -> Vec<NormalizedMetric> {
        let points: Vec<MetricPoint> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| MetricPoint::new(format!("m{}", i), *level, 100.0))
            .collect();
        normalize_metric_points(&points).unwrap()
    }

    #[test]
    fn test_first_axis_points_up() {
        let angle = axis_angle(0, 5);
        assert!((angle + PI / 2.0).abs() < 1e-12);

        let tip = Point::new(100.0, 100.0).polar_offset(angle, 50.0);
        assert!((tip.x - 100.0).abs() < 1e-9);
        assert!((tip.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_axes_evenly_spaced() {
        for total in 3..9 {
            let step = 2.0 * PI / total as f64;
            for idx in 1..total {
                let delta = axis_angle(idx, total) - axis_angle(idx - 1, total);
                assert!((delta - step).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_polygon_rejects_fewer_than_three_metrics() {
        let metrics = metrics_at(&[50.0, 50.0]);
        let result = radar_polygon(&metrics, Point::new(0.0, 0.0), 10.0);
        assert!(matches!(result, Err(RadarError::InvalidInput(_))));
    }

    #[test]
    fn test_square_polygon_vertices() {
        let metrics = metrics_at(&[100.0, 50.0, 100.0, 0.0]);
        let polygon = radar_polygon(&metrics, Point::new(200.0, 200.0), 100.0).unwrap();

        // up, right (half), down, centre
        assert_eq!(
            polygon.to_points_attr(),
            "200.0,100.0 250.0,200.0 200.0,300.0 200.0,200.0"
        );
    }

    #[test]
    fn test_point_display_ties_to_even() {
        assert_eq!(Point::new(6.25, 0.125).to_string(), "6.2,0.1");
        assert_eq!(Point::new(6.75, 2.0).to_string(), "6.8,2.0");
    }

    #[test]
    fn test_vertices_rounded_to_one_decimal() {
        let metrics = metrics_at(&[100.0, 100.0, 100.0]);
        let polygon = radar_polygon(&metrics, Point::new(285.0, 300.0), 180.0).unwrap();

        assert_eq!(polygon.vertices.len(), 3);
        // 180 * cos(30deg) = 155.88...
        assert_eq!(polygon.to_points_attr(), "285.0,120.0 440.9,390.0 129.1,390.0");
    }
}
