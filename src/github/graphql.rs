use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Deserialize;

use crate::config::RepoRef;
use crate::github::types::{Discussion, DiscussionComment};

/// Discussions are only exposed through the GraphQL surface.
///
/// One query fetches the 10 newest discussions with the 10 newest
/// comments each; the participation check downstream only ever sees
/// this page.
const DISCUSSIONS_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    discussions(first: 10, orderBy: {field: CREATED_AT, direction: DESC}) {
      nodes {
        title
        url
        author {
          login
        }
        createdAt
        comments(first: 10, orderBy: {field: CREATED_AT, direction: DESC}) {
          nodes {
            author {
              login
            }
            createdAt
            url
            bodyText
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscussionNode {
    title: String,
    url: String,
    author: Option<AuthorNode>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    comments: CommentConnection,
}

#[derive(Debug, Default, Deserialize)]
struct CommentConnection {
    #[serde(default)]
    nodes: Vec<CommentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    author: Option<AuthorNode>,
    created_at: DateTime<Utc>,
    url: String,
    body_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    login: String,
}

/// Fetch the 10 most recently created discussions, newest first, each
/// with its 10 most recently created comments.
pub async fn recent_discussions(client: &Octocrab, repo: &RepoRef) -> Result<Vec<Discussion>> {
    let payload = serde_json::json!({
        "query": DISCUSSIONS_QUERY,
        "variables": { "owner": repo.owner, "name": repo.name },
    });

    let response: serde_json::Value = client
        .graphql(&payload)
        .await
        .with_context(|| format!("Discussions query failed for {}", repo.full_name()))?;

    parse_discussions(&response)
        .with_context(|| format!("Unexpected discussions payload for {}", repo.full_name()))
}

/// Extract normalized discussions from the GraphQL response.
///
/// Repositories with the discussions feature disabled come back with a
/// null `repository.discussions`; that is an empty result, not an error.
fn parse_discussions(response: &serde_json::Value) -> Result<Vec<Discussion>> {
    let nodes = match response.pointer("/data/repository/discussions/nodes") {
        Some(nodes) if !nodes.is_null() => nodes.clone(),
        _ => return Ok(Vec::new()),
    };

    let nodes: Vec<DiscussionNode> =
        serde_json::from_value(nodes).context("Malformed discussion nodes")?;

    Ok(nodes
        .into_iter()
        .map(|node| Discussion {
            title: node.title,
            author: node.author.map(|a| a.login).unwrap_or_default(),
            created_at: node.created_at,
            url: node.url,
            comments: node
                .comments
                .nodes
                .into_iter()
                .map(|comment| DiscussionComment {
                    author: comment.author.map(|a| a.login).unwrap_or_default(),
                    created_at: comment.created_at,
                    url: comment.url,
                    body: comment.body_text,
                })
                .collect(),
        })
        .collect())
}
