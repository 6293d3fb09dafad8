use std::sync::Arc;

use teloxide::prelude::*;

use glowbot_core::{domain::ChatId, workflow::EditOutcome};

use crate::router::AppState;

/// Replacement text submitted while the chat is in the editing phase. The
/// text is escaped and published directly, without re-approval; the edit
/// phase ends whatever the outcome.
pub async fn handle_edit(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let reply = match state.workflow.submit_edit(chat_id, text).await {
        EditOutcome::Published => "📢 Исправленный пост опубликован!".to_string(),
        EditOutcome::Forbidden => "❌ Нет доступа к каналу!".to_string(),
        EditOutcome::Failed(detail) => format!("❌ Ошибка: {detail}"),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
