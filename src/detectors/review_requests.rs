use anyhow::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::config::RepoRef;
use crate::github::rest;
use crate::github::types::PullRequest;
use crate::notify::{Notification, Notifier};

use super::same_login;

/// Scan one repository for open pull requests awaiting the user's review.
///
/// The API does not record when a review was requested, so the PR's
/// update time stands in for it; a PR touched for unrelated reasons
/// while the request is pending will fire again.
pub async fn scan_review_requests(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let pulls = rest::list_open_pulls(client, repo, None).await?;
    debug!("{}: {} open pull requests", repo.full_name(), pulls.len());

    for pr in pulls {
        // The list endpoint omits the reviewer set; fetch the detail
        let reviewers = rest::requested_reviewers(client, repo, pr.number).await?;

        if qualifies(&pr, &reviewers, username, boundary) {
            info!("New review request: {} ({}#{})", pr.title, repo.full_name(), pr.number);
            notifier.send(&review_request_event(&pr, repo)).await;
        }
    }

    Ok(())
}

/// The user is a requested reviewer and the PR moved inside the window.
fn qualifies(
    pr: &PullRequest,
    reviewers: &[String],
    username: &str,
    boundary: DateTime<Utc>,
) -> bool {
    reviewers.iter().any(|reviewer| same_login(reviewer, username)) && pr.updated_at > boundary
}

fn review_request_event(pr: &PullRequest, repo: &RepoRef) -> Notification {
    Notification {
        title: "🔍 New pull request review requested".to_string(),
        description: format!("PR: {}", pr.title),
        url: pr.url.clone(),
        author: pr.author.clone(),
        repo: repo.full_name(),
    }
}
