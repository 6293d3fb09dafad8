//! Telegram update handlers.
//!
//! Dispatch order mirrors the workflow: commands first, then free text for
//! chats in the editing phase. Everything except `/id` goes through the
//! admin gate before any workflow logic runs.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use tracing::warn;

use glowbot_core::domain::UserId;
use glowbot_core::security::is_admin;

use crate::router::AppState;

mod callback;
mod commands;
mod edit;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        // Photos, stickers, voice: nothing for this bot to do.
        return Ok(());
    };

    if text.starts_with('/') {
        return commands::handle_command(bot, msg, state).await;
    }

    let chat_id = glowbot_core::domain::ChatId(msg.chat.id.0);
    if state.workflow.is_editing(chat_id).await {
        if !ensure_admin(&bot, &msg, &state).await {
            return Ok(());
        }
        return edit::handle_edit(bot, msg, state).await;
    }

    // Free text outside the editing phase is ignored.
    Ok(())
}

/// Admin gate for plain messages: replies with a visible forbidden notice
/// and logs the attempt; the caller must short-circuit on `false`. The
/// notice itself is best-effort.
pub(crate) async fn ensure_admin(bot: &Bot, msg: &Message, state: &AppState) -> bool {
    let user_id = msg.from().map(|u| UserId(u.id.0 as i64));
    if is_admin(user_id, &state.cfg.admin_ids) {
        return true;
    }

    let shown = user_id.map(|u| u.0.to_string()).unwrap_or_default();
    warn!("unauthorized access: {shown}");
    let _ = bot
        .send_message(msg.chat.id, format!("⛔ Доступ запрещен! Ваш ID: {shown}"))
        .await;
    false
}
