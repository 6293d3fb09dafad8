//! Hexagonal ports between the approval workflow and the outside world.
//!
//! Mistral implements `PostGenerator`; the Telegram adapter implements
//! `ChannelPublisher`. Workflow tests use in-memory fakes.

use async_trait::async_trait;

use crate::Result;

/// Text-generation backend (one bounded HTTP call per invocation).
#[async_trait]
pub trait PostGenerator: Send + Sync {
    /// Generate post text for a prompt. Returns the raw model output;
    /// markup escaping is the workflow's job.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Broadcast-channel publishing backend.
#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    /// Whether the bot account currently has posting rights on the channel.
    async fn can_post(&self) -> Result<bool>;

    /// Send MarkdownV2 text to the channel.
    async fn publish(&self, text: &str) -> Result<()>;
}
