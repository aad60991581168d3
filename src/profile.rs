use crate::metrics::MetricPoint;

pub const COMMITS_CAP: f64 = 1000.0;
pub const PRS_CAP: f64 = 100.0;
pub const MERGE_RATE_CAP: f64 = 100.0;
pub const ACTIVE_REPOS_CAP: f64 = 20.0;
pub const ACTIVE_DAYS_CAP: f64 = 365.0;

/// Activity counts reduced from one GitHub GraphQL response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileMetrics {
    pub commits: f64,
    pub prs: f64,
    pub merge_rate: f64,
    pub active_repos: f64,
    pub active_days: f64,
}

impl ProfileMetrics {
    /// Metric points in chart order: Commits, PRs, Merge Rate, Active Repos, Active Days
    pub fn metric_points(&self) -> Vec<MetricPoint> {
        vec![
            MetricPoint::new("Commits", self.commits, COMMITS_CAP),
            MetricPoint::new("PRs", self.prs, PRS_CAP),
            MetricPoint::new("Merge Rate", self.merge_rate, MERGE_RATE_CAP).with_unit("%"),
            MetricPoint::new("Active Repos", self.active_repos, ACTIVE_REPOS_CAP),
            MetricPoint::new("Active Days", self.active_days, ACTIVE_DAYS_CAP),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_points_fixed_order_and_caps() {
        let profile = ProfileMetrics {
            commits: 813.0,
            prs: 35.0,
            merge_rate: 97.0,
            active_repos: 7.0,
            active_days: 134.0,
        };
        let points = profile.metric_points();

        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Commits", "PRs", "Merge Rate", "Active Repos", "Active Days"]);

        let caps: Vec<f64> = points.iter().map(|p| p.cap).collect();
        assert_eq!(caps, vec![1000.0, 100.0, 100.0, 20.0, 365.0]);

        assert_eq!(points[2].unit, "%");
        assert!(points.iter().filter(|p| p.label != "Merge Rate").all(|p| p.unit.is_empty()));
        assert_eq!(points[4].value, 134.0);
    }
}
