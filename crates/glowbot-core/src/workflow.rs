//! Approval workflow: propose → publish / edit / cancel.
//!
//! Handlers stay thin; every transition of the draft state machine lives
//! here, behind the generator and channel ports, so the whole flow is
//! testable with fakes.

use std::sync::Arc;

use tracing::{error, info};

use crate::{
    domain::ChatId,
    errors::Error,
    formatting::escape_markdown,
    ports::{ChannelPublisher, PostGenerator},
    session::DraftSessions,
    topics::TopicStore,
    Result,
};

/// Decision action attached to a draft-ready message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Publish,
    Edit,
    Cancel,
}

impl Decision {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "publish" => Some(Self::Publish),
            "edit" => Some(Self::Edit),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }

    pub fn callback_data(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Edit => "edit",
            Self::Cancel => "cancel",
        }
    }
}

/// What a decision action did; the handler picks the user-visible reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// No draft is held for this chat.
    NoDraft,
    /// Draft sent to the channel; state cleared.
    Published,
    /// Pre-flight rights check failed; the draft stays stored but there is
    /// no retry path, so it is effectively abandoned.
    NoPostingRights,
    /// The channel refused the post; state cleared.
    PublishForbidden,
    /// Any other send failure; state is left as-is.
    PublishFailed(String),
    /// Chat moved to the editing phase.
    EditPrompted,
    /// Draft discarded; state cleared.
    Cancelled,
}

/// Outcome of an edit submission. The edit phase ends either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Published,
    Forbidden,
    Failed(String),
}

/// A freshly generated draft, for the preview message.
#[derive(Clone, Debug)]
pub struct Draft {
    pub subtopic: String,
    pub post: String,
}

/// Hard-coded diagnostic post for the end-to-end rights check.
const TEST_POST: &str = "Тестовый пост ✨\n#тест #бота";

pub struct PostWorkflow {
    topics: TopicStore,
    sessions: DraftSessions,
    generator: Arc<dyn PostGenerator>,
    channel: Arc<dyn ChannelPublisher>,
}

impl PostWorkflow {
    pub fn new(
        topics: TopicStore,
        generator: Arc<dyn PostGenerator>,
        channel: Arc<dyn ChannelPublisher>,
    ) -> Self {
        Self {
            topics,
            sessions: DraftSessions::new(),
            generator,
            channel,
        }
    }

    /// Whether the chat is waiting for replacement text.
    pub async fn is_editing(&self, chat_id: ChatId) -> bool {
        self.sessions.is_editing(chat_id).await
    }

    /// Pick a subtopic, generate a post and store it as the chat's draft.
    ///
    /// The subtopic is consumed even if generation fails afterwards; a
    /// failed generation leaves the draft state untouched.
    pub async fn create_draft(&self, chat_id: ChatId) -> Result<Draft> {
        let subtopic = self.topics.pick_unique()?;
        let prompt = build_prompt(&subtopic);

        let raw = self.generator.generate(&prompt).await?;
        let post = escape_markdown(&raw);

        self.sessions.set_draft(chat_id, post.clone()).await;
        info!("draft ready for chat {}: topic '{subtopic}'", chat_id.0);

        Ok(Draft { subtopic, post })
    }

    /// Apply a decision action to the chat's draft.
    pub async fn decide(&self, chat_id: ChatId, decision: Decision) -> DecisionOutcome {
        let Some(post) = self.sessions.draft(chat_id).await else {
            return DecisionOutcome::NoDraft;
        };

        match decision {
            Decision::Publish => self.publish_draft(chat_id, &post).await,
            Decision::Edit => {
                self.sessions.begin_edit(chat_id).await;
                DecisionOutcome::EditPrompted
            }
            Decision::Cancel => {
                self.sessions.clear(chat_id).await;
                DecisionOutcome::Cancelled
            }
        }
    }

    async fn publish_draft(&self, chat_id: ChatId, post: &str) -> DecisionOutcome {
        match self.channel.can_post().await {
            Ok(true) => {}
            Ok(false) => return DecisionOutcome::NoPostingRights,
            Err(e) => {
                error!("rights check failed: {e}");
                return DecisionOutcome::NoPostingRights;
            }
        }

        match self.channel.publish(post).await {
            Ok(()) => {
                self.sessions.clear(chat_id).await;
                info!("post published: {}...", preview(post));
                DecisionOutcome::Published
            }
            Err(Error::PublishForbidden(e)) => {
                error!("channel access denied: {e}");
                self.sessions.clear(chat_id).await;
                DecisionOutcome::PublishForbidden
            }
            Err(e) => {
                error!("publish failed: {e}");
                DecisionOutcome::PublishFailed(e.to_string())
            }
        }
    }

    /// Publish replacement text directly, bypassing re-approval.
    ///
    /// The editing phase terminates whether or not the send succeeds.
    pub async fn submit_edit(&self, chat_id: ChatId, text: &str) -> EditOutcome {
        let post = escape_markdown(text);

        let outcome = match self.channel.publish(&post).await {
            Ok(()) => EditOutcome::Published,
            Err(Error::PublishForbidden(e)) => {
                error!("channel access denied: {e}");
                EditOutcome::Forbidden
            }
            Err(e) => {
                error!("edited post failed: {e}");
                EditOutcome::Failed(e.to_string())
            }
        };

        self.sessions.clear(chat_id).await;
        outcome
    }

    /// Diagnostic publish, independent of any draft state.
    pub async fn publish_test_post(&self) -> Result<()> {
        self.channel.publish(&escape_markdown(TEST_POST)).await
    }

    /// Clear the used-subtopic history.
    pub fn reset_topics(&self) -> Result<()> {
        self.topics.reset()
    }
}

fn build_prompt(subtopic: &str) -> String {
    format!(
        "Создай пост для Telegram о косметике. Тема: {subtopic}\n\
         Требования:\n\
         - Используй MarkdownV2 разметку\n\
         - Хештеги в конце поста\n\
         - Максимум 3 эмодзи\n\
         - Не более 2000 символов"
    )
}

fn preview(post: &str) -> String {
    post.chars().take(100).collect()
}
