//! Chat webhook client
//!
//! Posts attachment-shaped alert payloads to a chat webhook. The wire
//! format is the webhook's: markdown-enabled text, optional title link,
//! optional severity color, optional `{value, short}` detail fields.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use armada_core::notify::{NotifyError, Result};

/// One detail field of a failure alert
#[derive(Debug, Clone, Serialize)]
pub struct AlertField {
    pub value: String,
    pub short: bool,
}

/// A single alert attachment
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    mrkdwn_in: Vec<String>,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title_link: Option<String>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<AlertField>>,
}

impl ChatMessage {
    /// Creates a markdown-enabled message with a title and body
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mrkdwn_in: vec!["text".to_string()],
            title: title.into(),
            title_link: None,
            text: text.into(),
            color: None,
            fields: None,
        }
    }

    /// Sets the deep link behind the title
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.title_link = Some(url.into());
        self
    }

    /// Sets the severity color ("good", "danger", ...)
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Attaches detail fields
    pub fn with_fields(mut self, fields: Vec<AlertField>) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Chat webhook endpoint
#[derive(Debug, Clone)]
pub struct ChatWebhook {
    url: String,
    client: reqwest::Client,
}

impl ChatWebhook {
    /// Creates a webhook client for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Creates a webhook client with a custom HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Posts one message to the webhook
    pub async fn post(&self, message: &ChatMessage) -> Result<()> {
        let payload = json!({ "attachments": [message] });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(NotifyError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::endpoint(status.as_u16(), body));
        }

        debug!("chat message \"{}\" delivered", message.title);
        Ok(())
    }
}
