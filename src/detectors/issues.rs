use anyhow::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::config::RepoRef;
use crate::github::rest::{self, IssueFilter};
use crate::github::types::{Issue, IssueComment};
use crate::notify::{truncate_body, Notification, Notifier, BODY_PREVIEW_CHARS};

use super::same_login;

/// Three issue scans per repository: newly assigned issues, comments on
/// the user's own issues, and issues where the user is mentioned.
pub async fn scan_issues(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    scan_assigned(client, notifier, repo, username, boundary).await?;
    scan_comments_on_authored(client, notifier, repo, username, boundary).await?;
    scan_mentions(client, notifier, repo, username, boundary).await?;
    Ok(())
}

/// Open issues newly assigned to the user.
async fn scan_assigned(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let filter = IssueFilter {
        open_only: true,
        assignee: Some(username),
        since: Some(boundary),
        ..Default::default()
    };
    let issues = issues_only(rest::list_issues(client, repo, &filter).await?);
    debug!("{}: {} newly assigned issues", repo.full_name(), issues.len());

    for issue in &issues {
        info!("Newly assigned issue: {} ({}#{})", issue.title, repo.full_name(), issue.number);
        notifier
            .send(&Notification {
                title: "📌 New issue assigned to you".to_string(),
                description: format!("Issue: {}", issue.title),
                url: issue.url.clone(),
                author: issue.author.clone(),
                repo: repo.full_name(),
            })
            .await;
    }

    Ok(())
}

/// New comments from other people on issues the user authored.
async fn scan_comments_on_authored(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let filter = IssueFilter {
        creator: Some(username),
        ..Default::default()
    };
    let issues = issues_only(rest::list_issues(client, repo, &filter).await?);
    debug!("{}: {} issues authored by {}", repo.full_name(), issues.len(), username);

    for issue in &issues {
        let comments = rest::list_issue_comments(client, repo, issue.number).await?;
        for comment in comments
            .iter()
            .filter(|comment| is_fresh_reply(comment, username, boundary))
        {
            info!("New comment on {}#{} by {}", repo.full_name(), issue.number, comment.author);
            notifier.send(&comment_event(issue, comment, repo)).await;
        }
    }

    Ok(())
}

/// Issues where the user was mentioned inside the window.
async fn scan_mentions(
    client: &Octocrab,
    notifier: &Notifier,
    repo: &RepoRef,
    username: &str,
    boundary: DateTime<Utc>,
) -> Result<()> {
    let filter = IssueFilter {
        mentioned: Some(username),
        since: Some(boundary),
        ..Default::default()
    };
    let issues = issues_only(rest::list_issues(client, repo, &filter).await?);
    debug!("{}: {} issues mentioning {}", repo.full_name(), issues.len(), username);

    for issue in &issues {
        info!("Mentioned in: {} ({}#{})", issue.title, repo.full_name(), issue.number);
        notifier
            .send(&Notification {
                title: "🔔 You were mentioned in an issue".to_string(),
                description: format!("Issue: {}", issue.title),
                url: issue.url.clone(),
                author: issue.author.clone(),
                repo: repo.full_name(),
            })
            .await;
    }

    Ok(())
}

/// Drop the pull requests the issues endpoint mixes in.
fn issues_only(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request)
        .collect()
}

/// A comment someone else left inside the window.
fn is_fresh_reply(comment: &IssueComment, username: &str, boundary: DateTime<Utc>) -> bool {
    comment.created_at > boundary && !same_login(&comment.author, username)
}

fn comment_event(issue: &Issue, comment: &IssueComment, repo: &RepoRef) -> Notification {
    Notification {
        title: "💬 New comment on your issue".to_string(),
        description: format!(
            "Issue: {}\n{}",
            issue.title,
            truncate_body(comment.body.as_deref(), BODY_PREVIEW_CHARS)
        ),
        url: comment.url.clone(),
        author: comment.author.clone(),
        repo: repo.full_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_issue(number: u64, is_pull_request: bool) -> Issue {
        Issue {
            number,
            title: format!("Issue #{}", number),
            author: "me".to_string(),
            url: format!("https://github.com/a/b/issues/{}", number),
            is_pull_request,
        }
    }

    fn create_test_comment(author: &str, created_at: DateTime<Utc>, body: Option<&str>) -> IssueComment {
        IssueComment {
            author: author.to_string(),
            body: body.map(String::from),
            created_at,
            url: "https://github.com/a/b/issues/1#issuecomment-1".to_string(),
        }
    }

    #[test]
    fn test_issues_only_drops_pull_requests() {
        let issues = vec![
            create_test_issue(1, false),
            create_test_issue(2, true),
            create_test_issue(3, false),
        ];

        let kept = issues_only(issues);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|issue| !issue.is_pull_request));
    }

    #[test]
    fn test_fresh_reply_from_other_user() {
        let boundary = Utc::now() - Duration::hours(2);
        let comment = create_test_comment("alice", boundary + Duration::minutes(5), Some("hi"));
        assert!(is_fresh_reply(&comment, "me", boundary));
    }

    #[test]
    fn test_own_comment_is_not_a_reply() {
        let boundary = Utc::now() - Duration::hours(2);
        let comment = create_test_comment("Me", boundary + Duration::minutes(5), Some("hi"));
        assert!(!is_fresh_reply(&comment, "me", boundary));
    }

    #[test]
    fn test_comment_at_boundary_is_not_fresh() {
        let boundary = Utc::now() - Duration::hours(2);
        let comment = create_test_comment("alice", boundary, Some("hi"));
        assert!(!is_fresh_reply(&comment, "me", boundary));
    }

    #[test]
    fn test_old_comment_is_not_fresh() {
        let boundary = Utc::now() - Duration::hours(2);
        let comment = create_test_comment("alice", boundary - Duration::minutes(5), Some("hi"));
        assert!(!is_fresh_reply(&comment, "me", boundary));
    }

    #[test]
    fn test_comment_event_truncates_long_body() {
        let issue = create_test_issue(1, false);
        let repo: RepoRef = "a/b".parse().unwrap();
        let long_body = "y".repeat(150);
        let comment = create_test_comment("alice", Utc::now(), Some(&long_body));

        let event = comment_event(&issue, &comment, &repo);
        let expected = format!("Issue: Issue #1\n{}...", "y".repeat(100));
        assert_eq!(event.description, expected);
    }

    #[test]
    fn test_comment_event_with_absent_body() {
        let issue = create_test_issue(1, false);
        let repo: RepoRef = "a/b".parse().unwrap();
        let comment = create_test_comment("alice", Utc::now(), None);

        let event = comment_event(&issue, &comment, &repo);
        assert_eq!(event.description, "Issue: Issue #1\n");
    }
}
