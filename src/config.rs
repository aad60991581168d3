use crate::error::{RadarError, Result};
use crate::github::DEFAULT_GRAPHQL_URL;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_SVG: &str = "assets/activity-radar.svg";
pub const DEFAULT_OUTPUT_JSON: &str = "assets/activity-metrics.json";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// POST directly to the GraphQL endpoint
    Http,
    /// Shell out to `gh api graphql`
    Gh,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "activity-radar")]
#[command(about = "Generate GitHub profile activity radar chart assets.")]
pub struct RadarConfig {
    /// GitHub username to query
    #[arg(long)]
    pub user: String,

    /// Output SVG path
    #[arg(long, default_value = DEFAULT_OUTPUT_SVG)]
    pub output_svg: PathBuf,

    /// Output JSON summary path
    #[arg(long, default_value = DEFAULT_OUTPUT_JSON)]
    pub output_json: PathBuf,

    /// Environment variable name containing a GitHub token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// GraphQL endpoint used by the http transport
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub api_url: String,

    /// How the GraphQL request is delivered
    #[arg(long, value_enum, default_value_t = TransportKind::Http)]
    pub transport: TransportKind,
}

impl RadarConfig {
    /// Read the token from the process environment.
    pub fn resolve_token(&self) -> Result<String> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Read the token through `lookup`; a missing or blank value is a configuration error.
    pub fn resolve_token_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(&self.token_env) {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(RadarError::Config(format!(
                "Missing token in environment variable '{}'.",
                self.token_env
            ))),
        }
    }
}
