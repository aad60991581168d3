use activity_radar::config::{RadarConfig, TransportKind};
use activity_radar::github::{ActivityWindow, GhCliTransport, GitHubClient, GraphQlTransport, HttpTransport};
use activity_radar::report::generate_report;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = RadarConfig::parse();

    // No request is attempted without a token
    let token = config.resolve_token()?;

    match config.transport {
        TransportKind::Http => {
            let transport = HttpTransport::new(token, config.api_url.clone());
            run(&config, GitHubClient::new(transport)).await
        }
        TransportKind::Gh => run(&config, GitHubClient::new(GhCliTransport::new(token))).await,
    }
}

async fn run<T: GraphQlTransport>(config: &RadarConfig, client: GitHubClient<T>) -> Result<()> {
    let window = ActivityWindow::ending_now();
    info!("Generating activity radar for {}", config.user);

    generate_report(&client, &config.user, &window, &config.output_svg, &config.output_json)
        .await
        .with_context(|| format!("Failed to generate activity radar for '{}'", config.user))?;

    println!("Wrote {}", config.output_svg.display());
    println!("Wrote {}", config.output_json.display());
    Ok(())
}
