//! Telegram adapter (teloxide).
//!
//! This crate implements the `glowbot-core` ChannelPublisher port over the
//! Telegram Bot API and hosts the polling router + update handlers.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{ParseMode, Recipient},
    ApiError, RequestError,
};

pub mod handlers;
pub mod router;

use glowbot_core::{errors::Error, ports::ChannelPublisher, Result};

/// Publishes MarkdownV2 posts to the configured broadcast channel.
#[derive(Clone)]
pub struct ChannelSender {
    bot: Bot,
    channel: Recipient,
}

impl ChannelSender {
    pub fn new(bot: Bot, channel_id: &str) -> Self {
        Self {
            bot,
            channel: parse_channel(channel_id),
        }
    }

    fn map_err(e: RequestError) -> Error {
        match e {
            RequestError::Api(ApiError::NotEnoughRightsToPostMessages) => {
                Error::PublishForbidden("not enough rights to post messages".to_string())
            }
            RequestError::Api(ApiError::BotKicked) => {
                Error::PublishForbidden("bot was kicked from the channel".to_string())
            }
            other => Error::External(format!("telegram error: {other}")),
        }
    }
}

/// `CHANNEL_ID` may be a numeric chat id or a public `@username`.
fn parse_channel(raw: &str) -> Recipient {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Recipient::Id(teloxide::types::ChatId(id));
    }
    let username = if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    };
    Recipient::ChannelUsername(username)
}

#[async_trait]
impl ChannelPublisher for ChannelSender {
    async fn can_post(&self) -> Result<bool> {
        let me = self.bot.get_me().await.map_err(Self::map_err)?;
        let member = self
            .bot
            .get_chat_member(self.channel.clone(), me.user.id)
            .await
            .map_err(Self::map_err)?;
        Ok(member.kind.can_post_messages())
    }

    async fn publish(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.channel.clone(), text.to_string())
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_channel_ids_parse_to_ids() {
        match parse_channel("-1001234567890") {
            Recipient::Id(id) => assert_eq!(id.0, -1001234567890),
            other => panic!("expected numeric id, got {other:?}"),
        }
    }

    #[test]
    fn usernames_gain_the_at_prefix() {
        for raw in ["@glowchannel", "glowchannel"] {
            match parse_channel(raw) {
                Recipient::ChannelUsername(name) => assert_eq!(name, "@glowchannel"),
                other => panic!("expected username, got {other:?}"),
            }
        }
    }
}
