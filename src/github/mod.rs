//! GitHub profile metrics fetcher.
//!
//! One GraphQL exchange per run: a user activity lookup bundled with two
//! pull request searches, reduced to [`ProfileMetrics`].

pub mod query;
pub mod response;
pub mod transport;

use crate::error::Result;
use crate::profile::ProfileMetrics;
use tracing::{debug, info};

pub use query::ActivityWindow;
pub use transport::{GhCliTransport, GraphQlTransport, HttpTransport, DEFAULT_GRAPHQL_URL};

pub struct GitHubClient<T: GraphQlTransport> {
    transport: T,
}

impl<T: GraphQlTransport> GitHubClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch and reduce the profile metrics of `login` over `window`.
    pub async fn fetch_profile_metrics(
        &self,
        login: &str,
        window: &ActivityWindow,
    ) -> Result<ProfileMetrics> {
        info!("Fetching GitHub activity for {}", login);
        debug!("Window {} .. {}, active repo cutoff {}", window.from, window.now, window.active_repo_cutoff);

        let variables = window.variables(login);
        let body = self
            .transport
            .execute(query::PROFILE_METRICS_QUERY, &variables)
            .await?;

        let metrics = response::decode_profile_response(&body, login)?
            .into_profile_metrics(login, window)?;

        info!(
            "Reduced metrics: commits={} prs={} merge_rate={:.1} active_repos={} active_days={}",
            metrics.commits, metrics.prs, metrics.merge_rate, metrics.active_repos, metrics.active_days
        );
        Ok(metrics)
    }
}
