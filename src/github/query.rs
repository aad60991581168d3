//! GraphQL document and variables for the profile metrics lookup.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

pub const LOOKBACK_DAYS: i64 = 365;
pub const ACTIVE_REPO_DAYS: i64 = 90;

pub const PROFILE_METRICS_QUERY: &str = r#"
query ProfileMetrics(
  $login: String!,
  $from: DateTime!,
  $to: DateTime!,
  $prsQuery: String!,
  $mergedQuery: String!
) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      contributionCalendar {
        weeks {
          contributionDays {
            contributionCount
          }
        }
      }
    }
    repositories(
      first: 100,
      ownerAffiliations: OWNER,
      privacy: PUBLIC,
      isFork: false
    ) {
      nodes {
        pushedAt
      }
    }
  }
  prs: search(type: ISSUE, query: $prsQuery) {
    issueCount
  }
  merged: search(type: ISSUE, query: $mergedQuery) {
    issueCount
  }
}
"#;

/// Time bounds for one run, all derived from a single captured `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityWindow {
    pub now: DateTime<Utc>,
    pub from: DateTime<Utc>,
    pub active_repo_cutoff: DateTime<Utc>,
}

impl ActivityWindow {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            from: now - Duration::days(LOOKBACK_DAYS),
            active_repo_cutoff: now - Duration::days(ACTIVE_REPO_DAYS),
        }
    }

    pub fn ending_now() -> Self {
        Self::ending_at(Utc::now())
    }

    /// Search qualifier `created:<from>..<to>` with calendar dates
    fn created_range(&self) -> String {
        format!(
            "created:{}..{}",
            self.from.date_naive().format("%Y-%m-%d"),
            self.now.date_naive().format("%Y-%m-%d")
        )
    }

    pub fn authored_prs_query(&self, login: &str) -> String {
        format!("author:{} is:pr {}", login, self.created_range())
    }

    pub fn merged_prs_query(&self, login: &str) -> String {
        format!("author:{} is:pr is:merged {}", login, self.created_range())
    }

    /// Variables for [`PROFILE_METRICS_QUERY`]
    pub fn variables(&self, login: &str) -> Value {
        json!({
            "login": login,
            "from": self.from.to_rfc3339(),
            "to": self.now.to_rfc3339(),
            "prsQuery": self.authored_prs_query(login),
            "mergedQuery": self.merged_prs_query(login),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> ActivityWindow {
        ActivityWindow::ending_at(Utc.with_ymd_and_hms(2025, 3, 10, 12, 30, 0).unwrap())
    }

    #[test]
    fn test_window_bounds_share_now() {
        let window = window();
        assert_eq!(window.now - window.from, Duration::days(365));
        assert_eq!(window.now - window.active_repo_cutoff, Duration::days(90));
    }

    #[test]
    fn test_search_expressions() {
        let window = window();
        assert_eq!(
            window.authored_prs_query("octocat"),
            "author:octocat is:pr created:2024-03-10..2025-03-10"
        );
        assert_eq!(
            window.merged_prs_query("octocat"),
            "author:octocat is:pr is:merged created:2024-03-10..2025-03-10"
        );
    }

    #[test]
    fn test_variables() {
        let vars = window().variables("octocat");
        assert_eq!(vars["login"], "octocat");
        assert_eq!(vars["from"], "2024-03-10T12:30:00+00:00");
        assert_eq!(vars["to"], "2025-03-10T12:30:00+00:00");
        assert!(vars["prsQuery"].as_str().unwrap().starts_with("author:octocat is:pr created:"));
        assert!(vars["mergedQuery"].as_str().unwrap().contains("is:merged"));
    }

    #[test]
    fn test_query_declares_all_variables() {
        for name in ["$login", "$from", "$to", "$prsQuery", "$mergedQuery"] {
            assert!(PROFILE_METRICS_QUERY.contains(name));
        }
        assert!(PROFILE_METRICS_QUERY.contains("prs: search"));
        assert!(PROFILE_METRICS_QUERY.contains("merged: search"));
    }
}
