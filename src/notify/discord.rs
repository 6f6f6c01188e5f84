// src/notify/discord.rs
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use super::{ChannelSender, SendError};

const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Minimal Discord REST client for the two calls the watcher needs:
/// resolving a channel by id and posting a text message into it.
pub struct DiscordApi {
    token: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl DiscordApi {
    pub fn new(token: String) -> Self {
        Self {
            token,
            base_url: DEFAULT_API_BASE.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Point at a different API root (tests, proxies).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// GET /channels/{id}. Confirms the channel exists and our token may see
    /// it before we try to post.
    pub async fn resolve_channel(&self, channel_id: &str) -> Result<(), SendError> {
        let url = format!("{}/channels/{}", self.base_url, channel_id);
        let rsp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SendError::Other(anyhow!(e).context("resolve channel")))?;
        classify_status(rsp.status())
    }

    /// POST /channels/{id}/messages with a plain content body.
    pub async fn create_message(&self, channel_id: &str, text: &str) -> Result<(), SendError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        let rsp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .timeout(self.timeout)
            .json(&CreateMessage { content: text })
            .send()
            .await
            .map_err(|e| SendError::Other(anyhow!(e).context("post message")))?;
        classify_status(rsp.status())
    }
}

fn classify_status(status: StatusCode) -> Result<(), SendError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(SendError::NotFound),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Err(SendError::Forbidden),
        s => Err(SendError::Other(anyhow!("discord returned {s}"))),
    }
}

#[async_trait]
impl ChannelSender for DiscordApi {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SendError> {
        self.resolve_channel(channel_id).await?;
        self.create_message(channel_id, text).await
    }
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}
