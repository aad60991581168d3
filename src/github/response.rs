//! Typed GraphQL response payload and the reductions applied to it.

use crate::error::{RadarError, Result};
use crate::github::query::ActivityWindow;
use crate::profile::ProfileMetrics;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Top-level GraphQL envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub path: Vec<Value>,
}

impl GraphQlError {
    fn is_missing_user(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
            && self.path.first().and_then(Value::as_str) == Some("user")
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileMetricsData {
    pub user: Option<UserNode>,
    pub prs: SearchCount,
    pub merged: SearchCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub contributions_collection: ContributionsCollection,
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContributionCalendar {
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepositoryConnection {
    #[serde(default)]
    pub nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    /// Null for repositories that have never been pushed to
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCount {
    pub issue_count: u64,
}

/// Parse a raw response body and classify any failure it carries.
pub fn decode_profile_response(body: &str, login: &str) -> Result<ProfileMetricsData> {
    let envelope: GraphQlResponse = serde_json::from_str(body)
        .map_err(|e| RadarError::Format(format!("could not parse response body: {}", e)))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        if errors.iter().all(GraphQlError::is_missing_user) {
            return Err(RadarError::NotFound(login.to_string()));
        }
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        return Err(RadarError::Remote(messages.join("; ")));
    }

    let data = match envelope.data {
        Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
        _ => {
            return Err(RadarError::Remote(
                "GitHub GraphQL response missing data payload.".to_string(),
            ))
        }
    };

    serde_json::from_value(data)
        .map_err(|e| RadarError::Format(format!("unexpected data payload shape: {}", e)))
}

impl ProfileMetricsData {
    /// Reduce the payload to the five profile metrics.
    pub fn into_profile_metrics(self, login: &str, window: &ActivityWindow) -> Result<ProfileMetrics> {
        let user = self
            .user
            .ok_or_else(|| RadarError::NotFound(login.to_string()))?;

        let authored = self.prs.issue_count;
        let merged = self.merged.issue_count;

        Ok(ProfileMetrics {
            commits: user.contributions_collection.total_commit_contributions as f64,
            prs: authored as f64,
            merge_rate: merge_rate(authored, merged),
            active_repos: count_active_repos(&user.repositories, window.active_repo_cutoff) as f64,
            active_days: count_active_days(&user.contributions_collection.contribution_calendar)
                as f64,
        })
    }
}

/// Merged share of authored pull requests as a percentage; 0 when none were authored.
pub fn merge_rate(authored: u64, merged: u64) -> f64 {
    if authored == 0 {
        return 0.0;
    }
    merged as f64 / authored as f64 * 100.0
}

/// Days in the calendar with at least one contribution.
pub fn count_active_days(calendar: &ContributionCalendar) -> usize {
    calendar
        .weeks
        .iter()
        .flat_map(|week| &week.contribution_days)
        .filter(|day| day.contribution_count > 0)
        .count()
}

/// Repositories pushed to at or after `cutoff`.
pub fn count_active_repos(repositories: &RepositoryConnection, cutoff: DateTime<Utc>) -> usize {
    repositories
        .nodes
        .iter()
        .flatten()
        .filter(|repo| repo.pushed_at.map_or(false, |pushed| pushed >= cutoff))
        .count()
}
