mod discord;

pub use discord::Notifier;

/// Maximum characters of a comment body carried into a notification.
pub const BODY_PREVIEW_CHARS: usize = 100;

/// One detected event, headed for the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub url: String,
    pub author: String,
    pub repo: String,
}

/// Cut a body down to `max` characters, marking the cut with an ellipsis.
/// An absent body turns into an empty string.
pub fn truncate_body(text: Option<&str>, max: usize) -> String {
    match text {
        None => String::new(),
        Some(text) if text.chars().count() <= max => text.to_string(),
        Some(text) => {
            let cut: String = text.chars().take(max).collect();
            format!("{}...", cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_absent_body() {
        assert_eq!(truncate_body(None, 100), "");
    }

    #[test]
    fn test_truncate_empty_body() {
        assert_eq!(truncate_body(Some(""), 100), "");
    }

    #[test]
    fn test_truncate_short_body_unchanged() {
        assert_eq!(truncate_body(Some("hello"), 100), "hello");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let body = "x".repeat(100);
        assert_eq!(truncate_body(Some(&body), 100), body);
    }

    #[test]
    fn test_truncate_long_body_cut_with_ellipsis() {
        let body = "x".repeat(101);
        let truncated = truncate_body(Some(&body), 100);
        assert_eq!(truncated.len(), 103);
        assert_eq!(truncated, format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let body = "é".repeat(150);
        let truncated = truncate_body(Some(&body), 100);
        assert_eq!(truncated, format!("{}...", "é".repeat(100)));
    }
}
