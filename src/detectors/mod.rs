mod discussions;
mod issues;
mod review_requests;
mod reviews;

pub use discussions::scan_discussions;
pub use issues::scan_issues;
pub use review_requests::scan_review_requests;
pub use reviews::scan_reviews;

/// GitHub logins are ASCII; comparisons are case-insensitive everywhere.
pub(crate) fn same_login(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_login_ignores_case() {
        assert!(same_login("Octocat", "octocat"));
        assert!(same_login("OCTOCAT", "octocat"));
    }

    #[test]
    fn test_same_login_rejects_different_logins() {
        assert!(!same_login("octocat", "octodog"));
        assert!(!same_login("octocat", ""));
    }
}
