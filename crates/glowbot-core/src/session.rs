//! Per-chat draft state.
//!
//! At most one draft is in flight per admin conversation. State lives only
//! in memory; a restart silently drops any in-flight draft.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::ChatId;

/// Workflow phase for one conversation. Absence from the map means no draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftState {
    /// A generated (already escaped) post awaiting an admin decision.
    DraftReady { post: String },
    /// The admin was asked to submit replacement text.
    Editing,
}

/// In-memory map of conversation → draft state.
#[derive(Default)]
pub struct DraftSessions {
    inner: Mutex<HashMap<ChatId, DraftState>>,
}

impl DraftSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat_id: ChatId) -> Option<DraftState> {
        self.inner.lock().await.get(&chat_id).cloned()
    }

    /// Store a freshly generated draft, replacing whatever was there.
    pub async fn set_draft(&self, chat_id: ChatId, post: String) {
        self.inner
            .lock()
            .await
            .insert(chat_id, DraftState::DraftReady { post });
    }

    /// The stored draft text, if the chat is awaiting a decision.
    pub async fn draft(&self, chat_id: ChatId) -> Option<String> {
        match self.inner.lock().await.get(&chat_id) {
            Some(DraftState::DraftReady { post }) => Some(post.clone()),
            _ => None,
        }
    }

    /// Move the chat into the editing phase (the draft text is discarded).
    pub async fn begin_edit(&self, chat_id: ChatId) {
        self.inner.lock().await.insert(chat_id, DraftState::Editing);
    }

    pub async fn is_editing(&self, chat_id: ChatId) -> bool {
        matches!(
            self.inner.lock().await.get(&chat_id),
            Some(DraftState::Editing)
        )
    }

    /// Return the chat to the no-draft state.
    pub async fn clear(&self, chat_id: ChatId) {
        self.inner.lock().await.remove(&chat_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_clears_back_to_empty() {
        let sessions = DraftSessions::new();
        let chat = ChatId(1);

        assert_eq!(sessions.get(chat).await, None);

        sessions.set_draft(chat, "post".to_string()).await;
        assert_eq!(
            sessions.get(chat).await,
            Some(DraftState::DraftReady {
                post: "post".to_string()
            })
        );

        sessions.clear(chat).await;
        assert_eq!(sessions.get(chat).await, None);
    }

    #[tokio::test]
    async fn edit_replaces_draft_state() {
        let sessions = DraftSessions::new();
        let chat = ChatId(7);

        sessions.set_draft(chat, "post".to_string()).await;
        sessions.begin_edit(chat).await;

        assert!(sessions.is_editing(chat).await);
        assert_eq!(sessions.draft(chat).await, None);
    }

    #[tokio::test]
    async fn chats_are_independent() {
        let sessions = DraftSessions::new();

        sessions.set_draft(ChatId(1), "a".to_string()).await;
        sessions.begin_edit(ChatId(2)).await;

        assert_eq!(sessions.draft(ChatId(1)).await, Some("a".to_string()));
        assert!(sessions.is_editing(ChatId(2)).await);
        assert_eq!(sessions.get(ChatId(3)).await, None);
    }
}
