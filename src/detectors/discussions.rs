use anyhow::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::debug;

use crate::config::RepoRef;
use crate::github::graphql;
use crate::github::types::{Discussion, DiscussionComment};
use crate::notify::{truncate_body, Notification, Notifier, BODY_PREVIEW_CHARS};

use super::same_login;

/// Scan the newest discussions page for new threads and new comments.
///
/// Participation is judged against the fetched page only: a comment of
/// the user's that fell off the 10-comment page is invisible here, and
/// that thread goes silent. Known limitation, kept as-is.
pub async fn scan_discussions(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let discussions = graphql::recent_discussions(client, repo).await?;
    debug!("{}: {} discussions", repo.full_name(), discussions.len());

    for event in detect_events(&discussions, username, boundary, &repo.full_name()) {
        notifier.send(&event).await;
    }

    Ok(())
}

/// Decide which discussion events warrant a notification.
///
/// Per discussion: a thread created inside the window by someone else is
/// a "new discussion". Per comment inside the window by someone else:
/// if the thread is the user's, it is a comment on their discussion;
/// otherwise it only counts when the user commented earlier in the same
/// fetched page. Everything the user authored is suppressed.
pub(crate) fn detect_events(
    discussions: &[Discussion],
    username: &str,
    boundary: DateTime<Utc>,
    repo_label: &str,
) -> Vec<Notification> {
    let mut events = Vec::new();

    for discussion in discussions {
        if discussion.created_at > boundary && !same_login(&discussion.author, username) {
            events.push(Notification {
                title: "📣 New discussion created".to_string(),
                description: format!("Discussion: {}", discussion.title),
                url: discussion.url.clone(),
                author: discussion.author.clone(),
                repo: repo_label.to_string(),
            });
        }

        for comment in &discussion.comments {
            if comment.created_at <= boundary || same_login(&comment.author, username) {
                continue;
            }

            if same_login(&discussion.author, username) {
                events.push(comment_event(
                    "💬 New comment on your discussion",
                    discussion,
                    comment,
                    repo_label,
                ));
            } else if participated_before(&discussion.comments, username, comment.created_at) {
                events.push(comment_event(
                    "💬 New comment on a discussion you participated in",
                    discussion,
                    comment,
                    repo_label,
                ));
            }
        }
    }

    events
}

/// Did the user author any comment strictly earlier than `before`,
/// within this fetched page?
fn participated_before(
    comments: &[DiscussionComment],
    username: &str,
    before: DateTime<Utc>,
) -> bool {
    comments
        .iter()
        .any(|comment| same_login(&comment.author, username) && comment.created_at < before)
}

fn comment_event(
    title: &str,
    discussion: &Discussion,
    comment: &DiscussionComment,
    repo_label: &str,
) -> Notification {
    Notification {
        title: title.to_string(),
        description: format!(
            "Discussion: {}\n{}",
            discussion.title,
            truncate_body(comment.body.as_deref(), BODY_PREVIEW_CHARS)
        ),
        url: comment.url.clone(),
        author: comment.author.clone(),
        repo: repo_label.to_string(),
    }
}
