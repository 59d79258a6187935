use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use octocrab::{params, Octocrab};

use crate::config::RepoRef;
use crate::github::types::{Issue, IssueComment, PullRequest, Review, ReviewState};

/// Filter parameters for an issues list call.
#[derive(Debug, Default, Clone)]
pub struct IssueFilter<'a> {
    /// Restrict to open issues; `false` means any state.
    pub open_only: bool,
    pub assignee: Option<&'a str>,
    pub creator: Option<&'a str>,
    pub mentioned: Option<&'a str>,
    pub since: Option<DateTime<Utc>>,
}

/// List open pull requests, optionally narrowed to one author.
///
/// The pulls surface has no creator parameter, so the author filter is
/// applied to the fetched page.
pub async fn list_open_pulls(
    client: &Octocrab,
    repo: &RepoRef,
    creator: Option<&str>,
) -> Result<Vec<PullRequest>> {
    let page = client
        .pulls(&repo.owner, &repo.name)
        .list()
        .state(params::State::Open)
        .per_page(100)
        .send()
        .await
        .with_context(|| format!("Failed to list open pull requests for {}", repo.full_name()))?;

    let pulls = page
        .items
        .into_iter()
        .map(|pr| PullRequest {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            author: pr.user.map(|u| u.login).unwrap_or_default(),
            // A missing update timestamp can never qualify as new
            updated_at: pr.updated_at.unwrap_or(DateTime::<Utc>::MIN_UTC),
            url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
        })
        .filter(|pr| creator.is_none_or(|login| pr.author.eq_ignore_ascii_case(login)))
        .collect();

    Ok(pulls)
}

/// Fetch the requested-reviewer logins for a pull request.
///
/// Only the detail endpoint carries the reviewer set; the list endpoint
/// omits it.
pub async fn requested_reviewers(
    client: &Octocrab,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<String>> {
    let pr = client
        .pulls(&repo.owner, &repo.name)
        .get(number)
        .await
        .with_context(|| format!("Failed to fetch {}#{}", repo.full_name(), number))?;

    Ok(pr
        .requested_reviewers
        .unwrap_or_default()
        .into_iter()
        .map(|reviewer| reviewer.login)
        .collect())
}

/// List the submitted reviews for a pull request
pub async fn list_reviews(client: &Octocrab, repo: &RepoRef, number: u64) -> Result<Vec<Review>> {
    let page = client
        .pulls(&repo.owner, &repo.name)
        .list_reviews(number)
        .send()
        .await
        .with_context(|| format!("Failed to list reviews for {}#{}", repo.full_name(), number))?;

    Ok(page.items.into_iter().map(normalize_review).collect())
}

fn normalize_review(review: octocrab::models::pulls::Review) -> Review {
    Review {
        author: review.user.map(|u| u.login).unwrap_or_default(),
        state: match review.state {
            Some(octocrab::models::pulls::ReviewState::Approved) => ReviewState::Approved,
            Some(octocrab::models::pulls::ReviewState::ChangesRequested) => {
                ReviewState::ChangesRequested
            }
            Some(octocrab::models::pulls::ReviewState::Commented) => ReviewState::Commented,
            _ => ReviewState::Other,
        },
        submitted_at: review.submitted_at,
        url: review.html_url.to_string(),
    }
}

/// List issues matching the given filter
pub async fn list_issues(
    client: &Octocrab,
    repo: &RepoRef,
    filter: &IssueFilter<'_>,
) -> Result<Vec<Issue>> {
    let handler = client.issues(&repo.owner, &repo.name);
    let mut request = handler.list().per_page(100).state(if filter.open_only {
        params::State::Open
    } else {
        params::State::All
    });

    if let Some(assignee) = filter.assignee {
        request = request.assignee(assignee);
    }
    if let Some(creator) = filter.creator {
        request = request.creator(creator);
    }
    if let Some(mentioned) = filter.mentioned {
        request = request.mentioned(mentioned);
    }
    if let Some(since) = filter.since {
        request = request.since(since);
    }

    let page = request
        .send()
        .await
        .with_context(|| format!("Failed to list issues for {}", repo.full_name()))?;

    let issues = page
        .items
        .into_iter()
        .map(|issue| Issue {
            number: issue.number,
            title: issue.title,
            author: issue.user.login,
            url: issue.html_url.to_string(),
            is_pull_request: issue.pull_request.is_some(),
        })
        .collect();

    Ok(issues)
}

/// List the comments on an issue
pub async fn list_issue_comments(
    client: &Octocrab,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<IssueComment>> {
    let page = client
        .issues(&repo.owner, &repo.name)
        .list_comments(number)
        .send()
        .await
        .with_context(|| format!("Failed to list comments for {}#{}", repo.full_name(), number))?;

    let comments = page
        .items
        .into_iter()
        .map(|comment| IssueComment {
            author: comment.user.login,
            body: comment.body,
            created_at: comment.created_at,
            url: comment.html_url.to_string(),
        })
        .collect();

    Ok(comments)
}
