use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use super::Notification;

/// Fixed embed accent color (blue).
const EMBED_COLOR: u32 = 3_447_003;

#[derive(Serialize)]
struct WebhookBody<'a> {
    embeds: [Embed<'a>; 1],
}

#[derive(Serialize)]
struct Embed<'a> {
    title: &'a str,
    description: &'a str,
    url: &'a str,
    color: u32,
    author: EmbedAuthor<'a>,
    footer: EmbedFooter,
    timestamp: String,
}

#[derive(Serialize)]
struct EmbedAuthor<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct EmbedFooter {
    text: String,
}

fn embed_for(notification: &Notification) -> Embed<'_> {
    Embed {
        title: &notification.title,
        description: &notification.description,
        url: &notification.url,
        color: EMBED_COLOR,
        author: EmbedAuthor {
            name: &notification.author,
        },
        footer: EmbedFooter {
            text: format!("Repository: {}", notification.repo),
        },
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Fire-and-forget Discord webhook sink.
///
/// Delivery failures are logged and swallowed so one bad send never
/// stops the rest of the scan.
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Deliver one notification, one webhook call per event
    pub async fn send(&self, notification: &Notification) {
        match self.deliver(notification).await {
            Ok(()) => debug!("Notification sent: {}", notification.title),
            Err(e) => warn!(
                "Failed to deliver notification '{}': {:#}",
                notification.title, e
            ),
        }
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let body = WebhookBody {
            embeds: [embed_for(notification)],
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .context("Webhook request failed")?;

        response
            .error_for_status()
            .context("Webhook rejected the notification")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_notification() -> Notification {
        Notification {
            title: "📣 New discussion created".to_string(),
            description: "Discussion: Roadmap".to_string(),
            url: "https://github.com/a/b/discussions/1".to_string(),
            author: "alice".to_string(),
            repo: "a/b".to_string(),
        }
    }

    #[test]
    fn test_embed_carries_notification_fields() {
        let notification = create_test_notification();
        let body = WebhookBody {
            embeds: [embed_for(&notification)],
        };

        let value = serde_json::to_value(&body).unwrap();
        let embed = &value["embeds"][0];
        assert_eq!(embed["title"], "📣 New discussion created");
        assert_eq!(embed["description"], "Discussion: Roadmap");
        assert_eq!(embed["url"], "https://github.com/a/b/discussions/1");
        assert_eq!(embed["color"], 3_447_003);
        assert_eq!(embed["author"]["name"], "alice");
        assert_eq!(embed["footer"]["text"], "Repository: a/b");
        assert!(embed["timestamp"].is_string());
    }

    #[test]
    fn test_body_is_a_single_embed() {
        let notification = create_test_notification();
        let body = WebhookBody {
            embeds: [embed_for(&notification)],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["embeds"].as_array().unwrap().len(), 1);
    }
}
