use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;

use tracing::warn;

use glowbot_core::{
    domain::{ChatId, UserId},
    security::{is_admin, is_stale},
    workflow::{Decision, DecisionOutcome},
};

use crate::router::AppState;

/// Decision-button handler. Guard order matters: staleness first, then the
/// admin check, and only then the workflow — a stale or unauthorized press
/// never reaches business logic.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let cb_id = q.id.clone();

    let Some(origin) = q.message.as_ref() else {
        bot.answer_callback_query(cb_id).await?;
        return Ok(());
    };
    let data = q.data.clone().unwrap_or_default();

    if is_stale(origin.date, Utc::now(), state.cfg.callback_timeout) {
        bot.answer_callback_query(cb_id)
            .text("⌛ Время ответа истекло!")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let user_id = UserId(q.from.id.0 as i64);
    if !is_admin(Some(user_id), &state.cfg.admin_ids) {
        warn!("unauthorized callback: {}", user_id.0);
        bot.answer_callback_query(cb_id)
            .text(format!("⛔ Доступ запрещен! Ваш ID: {}", user_id.0))
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let Some(decision) = Decision::parse(&data) else {
        bot.answer_callback_query(cb_id).await?;
        return Ok(());
    };

    let chat_id = ChatId(origin.chat.id.0);
    let outcome = state.workflow.decide(chat_id, decision).await;

    if outcome == DecisionOutcome::NoDraft {
        bot.answer_callback_query(cb_id)
            .text("❌ Ошибка: пост не сгенерирован!")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(cb_id).await?;

    let reply = match outcome {
        DecisionOutcome::Published => "✅ Пост успешно опубликован!".to_string(),
        DecisionOutcome::NoPostingRights => "❌ Бот не имеет прав на публикацию!".to_string(),
        DecisionOutcome::PublishForbidden => "❌ Нет прав для публикации в канале!".to_string(),
        DecisionOutcome::PublishFailed(detail) => format!("❌ Ошибка публикации: {detail}"),
        DecisionOutcome::EditPrompted => "✏️ Введите исправленный текст поста:".to_string(),
        DecisionOutcome::Cancelled => "🗑 Публикация отменена".to_string(),
        DecisionOutcome::NoDraft => unreachable!("handled above"),
    };

    // Replace the draft preview with the outcome (best-effort; the preview
    // may already have been edited).
    let _ = bot.edit_message_text(origin.chat.id, origin.id, reply).await;

    Ok(())
}
