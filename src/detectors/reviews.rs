use anyhow::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::config::RepoRef;
use crate::github::rest;
use crate::github::types::{PullRequest, Review};
use crate::notify::{Notification, Notifier};

/// Scan the user's own open pull requests for freshly submitted reviews.
///
/// No author filter on purpose: the user's own self-review fires too.
pub async fn scan_reviews(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let pulls = rest::list_open_pulls(client, repo, Some(username)).await?;
    debug!("{}: {} open pull requests by {}", repo.full_name(), pulls.len(), username);

    for pr in pulls {
        let reviews = rest::list_reviews(client, repo, pr.number).await?;
        let fresh = fresh_reviews(&reviews, boundary);
        debug!("{}#{}: {} new reviews", repo.full_name(), pr.number, fresh.len());

        for review in fresh {
            info!("New review on {}#{} by {}", repo.full_name(), pr.number, review.author);
            notifier.send(&review_event(&pr, review, repo)).await;
        }
    }

    Ok(())
}

/// Reviews submitted strictly inside the window.
fn fresh_reviews(reviews: &[Review], boundary: DateTime<Utc>) -> Vec<&Review> {
    reviews
        .iter()
        .filter(|review| review.submitted_at.is_some_and(|at| at > boundary))
        .collect()
}

fn review_event(pr: &PullRequest, review: &Review, repo: &RepoRef) -> Notification {
    Notification {
        title: "⚠️ New review on your pull request".to_string(),
        description: format!(
            "PR: {} - {} {}",
            pr.title,
            review.state.emoji(),
            review.state.label()
        ),
        url: review.url.clone(),
        author: review.author.clone(),
        repo: repo.full_name(),
    }
}
