// src/notify/mod.rs
pub mod discord;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Counted failures a channel may accumulate before it is written off for
/// the rest of the process.
pub const MAX_RETRIES: u32 = 3;

/// Delivery failure categories the dispatcher reacts to.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("channel not found")]
    NotFound,
    #[error("missing permission for channel")]
    Forbidden,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Transport seam: anything that can push a text message into a channel.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SendError>;
}

#[async_trait]
impl<T: ChannelSender + ?Sized> ChannelSender for Arc<T> {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SendError> {
        (**self).send_text(channel_id, text).await
    }
}

/// Per-channel delivery state. Lives only in process memory and starts
/// clean on every run.
#[derive(Debug, Clone, Default)]
pub struct DestinationState {
    pub failures: u32,
    pub blacklisted: bool,
}

/// Fans a message out to the configured channels and owns their failure
/// bookkeeping. Blacklisting is terminal for the process lifetime.
pub struct Dispatcher<S> {
    sender: Arc<S>,
    post_send_delay: Duration,
    states: HashMap<String, DestinationState>,
}

impl<S: ChannelSender + 'static> Dispatcher<S> {
    pub fn new(sender: S, channel_ids: &[String], post_send_delay: Duration) -> Self {
        Self {
            sender: Arc::new(sender),
            post_send_delay,
            states: channel_ids
                .iter()
                .map(|id| (id.clone(), DestinationState::default()))
                .collect(),
        }
    }

    /// Send `message` to every non-blacklisted channel concurrently, wait for
    /// all sends, then fold the outcomes into the state table. A broken
    /// channel only affects its own eligibility; the caller sees no error.
    pub async fn dispatch(&mut self, message: &str) {
        let mut handles = Vec::with_capacity(self.states.len());
        for (id, state) in &self.states {
            if state.blacklisted {
                tracing::debug!(channel = %id, "skipping blacklisted channel");
                continue;
            }
            let sender = Arc::clone(&self.sender);
            let id = id.clone();
            let text = message.to_string();
            let delay = self.post_send_delay;
            handles.push(tokio::spawn(async move {
                let outcome = sender.send_text(&id, &text).await;
                // fixed pause after each send to stay under the transport rate limit
                tokio::time::sleep(delay).await;
                (id, outcome)
            }));
        }

        for handle in handles {
            match handle.await {
                Ok((id, outcome)) => self.record(&id, outcome),
                Err(e) => tracing::warn!(error = ?e, "send task panicked"),
            }
        }
    }

    fn record(&mut self, channel_id: &str, outcome: Result<(), SendError>) {
        let Some(state) = self.states.get_mut(channel_id) else {
            return;
        };
        match outcome {
            Ok(()) => {
                state.failures = 0;
                tracing::info!(channel = %channel_id, "message delivered");
            }
            Err(SendError::Forbidden) => {
                state.blacklisted = true;
                tracing::warn!(channel = %channel_id, "no permission, blacklisting channel");
            }
            Err(e) => {
                state.failures += 1;
                if state.failures >= MAX_RETRIES {
                    state.blacklisted = true;
                    tracing::warn!(
                        channel = %channel_id,
                        failures = state.failures,
                        error = %e,
                        "failure budget exhausted, blacklisting channel"
                    );
                } else {
                    tracing::warn!(
                        channel = %channel_id,
                        failures = state.failures,
                        error = %e,
                        "delivery failed"
                    );
                }
            }
        }
    }

    pub fn state(&self, channel_id: &str) -> Option<&DestinationState> {
        self.states.get(channel_id)
    }
}
