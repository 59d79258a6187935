use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use repo_watcher::config::Config;
use repo_watcher::github;
use repo_watcher::notify::Notifier;
use repo_watcher::window;

#[derive(Parser, Debug)]
#[command(name = "repo-watcher")]
#[command(about = "Watches GitHub repositories and forwards collaboration events to a Discord webhook", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Look-back window in hours (overrides LOOKBACK_HOURS)
    #[arg(long)]
    lookback_hours: Option<i64>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "repo_watcher=debug"
    } else {
        "repo_watcher=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // One failed run must not poison the next invocation: log the
    // failure and exit normally so the scheduler just tries again.
    if let Err(e) = check_repositories(cli).await {
        error!("Run failed: {:#}", e);
    }
}

async fn check_repositories(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(hours) = cli.lookback_hours {
        config.lookback_hours = hours;
    }

    // The boundary is computed exactly once; every detector in this run
    // compares against the same instant
    let boundary = window::lookback_boundary(config.lookback_hours);

    info!("Watching {} repositories for {}", config.repos.len(), config.username);
    info!("Checking for events since {}", boundary.to_rfc3339());

    let client = github::create_client(&config.github_token)?;
    let notifier = Notifier::new(config.webhook_url.clone());

    repo_watcher::run::run(&client, &notifier, &config, boundary).await;

    Ok(())
}
