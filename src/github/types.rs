use chrono::{DateTime, Utc};

/// An open pull request, as returned by the list endpoint.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub updated_at: DateTime<Utc>,
    pub url: String,
}

/// A submitted pull request review.
#[derive(Debug, Clone)]
pub struct Review {
    pub author: String,
    pub state: ReviewState,
    pub submitted_at: Option<DateTime<Utc>>,
    pub url: String,
}

/// Review verdict, normalized from the REST enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Other,
}

impl ReviewState {
    pub fn emoji(&self) -> &'static str {
        match self {
            ReviewState::Approved => "✅",
            ReviewState::ChangesRequested => "❌",
            ReviewState::Commented => "💬",
            ReviewState::Other => "❓",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewState::Approved => "APPROVED",
            ReviewState::ChangesRequested => "CHANGES_REQUESTED",
            ReviewState::Commented => "COMMENTED",
            ReviewState::Other => "UNKNOWN",
        }
    }
}

/// An issue from the issues list endpoint.
///
/// GitHub serves pull requests from the same endpoint; `is_pull_request`
/// carries the marker so detectors can drop them.
#[derive(Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub is_pull_request: bool,
}

/// A comment on an issue.
#[derive(Debug, Clone)]
pub struct IssueComment {
    pub author: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

/// A discussion thread from the GraphQL query, with its newest comments.
///
/// Authors of deleted accounts come back null from GraphQL and are
/// normalized to an empty string.
#[derive(Debug, Clone)]
pub struct Discussion {
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub comments: Vec<DiscussionComment>,
}

/// A comment inside a discussion thread.
#[derive(Debug, Clone)]
pub struct DiscussionComment {
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_state_labels() {
        assert_eq!(ReviewState::Approved.label(), "APPROVED");
        assert_eq!(ReviewState::ChangesRequested.label(), "CHANGES_REQUESTED");
        assert_eq!(ReviewState::Commented.label(), "COMMENTED");
        assert_eq!(ReviewState::Other.label(), "UNKNOWN");
    }

    #[test]
    fn test_review_state_emojis() {
        assert_eq!(ReviewState::Approved.emoji(), "✅");
        assert_eq!(ReviewState::ChangesRequested.emoji(), "❌");
        assert_eq!(ReviewState::Commented.emoji(), "💬");
        assert_eq!(ReviewState::Other.emoji(), "❓");
    }
}
