use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::{error, info};

use crate::config::Config;
use crate::detectors::{scan_discussions, scan_issues, scan_review_requests, scan_reviews};
use crate::notify::Notifier;

/// Walk every configured repository through the four detectors.
///
/// A failed detector gives up its remaining work for that repository
/// and the scan moves on; one broken repository never blocks the rest.
pub async fn run(client: &Octocrab, notifier: &Notifier, config: &Config, boundary: DateTime<Utc>) {
    for repo in &config.repos {
        info!("Scanning {}", repo.full_name());

        if let Err(e) =
            scan_review_requests(client, notifier, repo, &config.username, boundary).await
        {
            error!("Review-request scan failed for {}: {:#}", repo.full_name(), e);
        }

        if let Err(e) = scan_reviews(client, notifier, repo, &config.username, boundary).await {
            error!("Review scan failed for {}: {:#}", repo.full_name(), e);
        }

        if let Err(e) = scan_issues(client, notifier, repo, &config.username, boundary).await {
            error!("Issue scan failed for {}: {:#}", repo.full_name(), e);
        }

        if let Err(e) = scan_discussions(client, notifier, repo, &config.username, boundary).await {
            error!("Discussion scan failed for {}: {:#}", repo.full_name(), e);
        }
    }

    info!("All checks complete");
}
