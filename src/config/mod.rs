use anyhow::{Context, Result};
use std::str::FromStr;

use crate::window::DEFAULT_LOOKBACK_HOURS;

/// One scan target in "owner/name" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Return the repository label in the format "owner/name"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, name) = s
            .split_once('/')
            .with_context(|| format!("Invalid repository '{}': expected owner/name", s))?;
        if owner.is_empty() || name.is_empty() {
            anyhow::bail!("Invalid repository '{}': expected owner/name", s);
        }
        Ok(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Run configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub webhook_url: String,
    pub username: String,
    pub repos: Vec<RepoRef>,
    pub lookback_hours: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required: `GITHUB_TOKEN`, `DISCORD_WEBHOOK_URL`, `GITHUB_USERNAME`.
    /// Optional: `REPOS_TO_MONITOR` (JSON array of "owner/name" strings,
    /// defaults to an empty list) and `LOOKBACK_HOURS` (defaults to 2).
    pub fn from_env() -> Result<Config> {
        let github_token = require_env("GITHUB_TOKEN")?;
        let webhook_url = require_env("DISCORD_WEBHOOK_URL")?;
        let username = require_env("GITHUB_USERNAME")?;

        let raw_repos =
            std::env::var("REPOS_TO_MONITOR").unwrap_or_else(|_| "[]".to_string());
        let repos = parse_repos(&raw_repos)?;

        let lookback_hours = match std::env::var("LOOKBACK_HOURS") {
            Ok(raw) => raw
                .parse()
                .context("LOOKBACK_HOURS must be a whole number of hours")?,
            Err(_) => DEFAULT_LOOKBACK_HOURS,
        };

        Ok(Config {
            github_token,
            webhook_url,
            username,
            repos,
            lookback_hours,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required environment variable {}", key))
}

/// Parse the repository list: a JSON array of "owner/name" strings
pub fn parse_repos(raw: &str) -> Result<Vec<RepoRef>> {
    let names: Vec<String> = serde_json::from_str(raw)
        .context("REPOS_TO_MONITOR must be a JSON array of \"owner/name\" strings")?;
    names.iter().map(|name| name.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parses_owner_and_name() {
        let repo: RepoRef = "rust-lang/cargo".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.full_name(), "rust-lang/cargo");
    }

    #[test]
    fn test_repo_ref_rejects_missing_slash() {
        assert!("cargo".parse::<RepoRef>().is_err());
    }

    #[test]
    fn test_repo_ref_rejects_empty_parts() {
        assert!("/cargo".parse::<RepoRef>().is_err());
        assert!("rust-lang/".parse::<RepoRef>().is_err());
    }

    #[test]
    fn test_parse_repos_list() {
        let repos = parse_repos(r#"["a/b", "c/d"]"#).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].full_name(), "a/b");
        assert_eq!(repos[1].full_name(), "c/d");
    }

    #[test]
    fn test_parse_repos_empty_array() {
        assert!(parse_repos("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_repos_rejects_invalid_json() {
        assert!(parse_repos("not json").is_err());
    }

    #[test]
    fn test_parse_repos_rejects_bad_entry() {
        assert!(parse_repos(r#"["a/b", "nope"]"#).is_err());
    }
}
