use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};

use tracing::error;

use glowbot_core::{
    domain::ChatId,
    formatting::escape_html,
    workflow::{Decision, Draft},
};

use crate::handlers::ensure_admin;
use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

fn decision_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("✅ Опубликовать", Decision::Publish.callback_data()),
        InlineKeyboardButton::callback("✏️ Редактировать", Decision::Edit.callback_data()),
        InlineKeyboardButton::callback("❌ Отменить", Decision::Cancel.callback_data()),
    ]])
}

fn draft_preview(draft: &Draft) -> String {
    format!(
        "✅ <b>Новый пост готов!</b>\n\n\
         🏷 <i>Тема:</i> {}\n\
         📝 <i>Предпросмотр:</i>\n\
         ──────────────────\n\
         {}\n\
         ──────────────────\n\
         Выберите действие:",
        escape_html(&draft.subtopic),
        escape_html(&draft.post)
    )
}

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let (cmd, _args) = parse_command(msg.text().unwrap_or(""));

    // `/id` is the only unrestricted command.
    if cmd == "id" {
        let shown = msg
            .from()
            .map(|u| u.id.0.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        bot.send_message(msg.chat.id, format!("🆔 Ваш ID: {shown}"))
            .await?;
        return Ok(());
    }

    if !ensure_admin(&bot, &msg, &state).await {
        return Ok(());
    }

    match cmd.as_str() {
        "start" | "help" => {
            let body = "🌟 <b>Бот-генератор постов о косметике</b>\n\n\
                        Доступные команды:\n\
                        /post - Создать новый пост\n\
                        /reset_topics - Сбросить историю тем\n\
                        /id - Показать ваш ID\n\
                        /test - Тест публикации";
            bot.send_message(msg.chat.id, body)
                .parse_mode(ParseMode::Html)
                .await?;
            Ok(())
        }

        "post" => handle_post(bot, msg, state).await,

        "reset_topics" => {
            match state.workflow.reset_topics() {
                Ok(()) => {
                    bot.send_message(msg.chat.id, "🔄 История тем сброшена!")
                        .await?;
                }
                Err(e) => {
                    error!("topic reset failed: {e}");
                    bot.send_message(msg.chat.id, format!("❌ Ошибка: {e}"))
                        .await?;
                }
            }
            Ok(())
        }

        "test" => {
            match state.workflow.publish_test_post().await {
                Ok(()) => {
                    bot.send_message(msg.chat.id, "✅ Тестовый пост опубликован!")
                        .await?;
                }
                Err(e) => {
                    error!("test publish failed: {e}");
                    bot.send_message(msg.chat.id, format!("❌ Ошибка теста: {e}"))
                        .await?;
                }
            }
            Ok(())
        }

        // Unknown commands are ignored, same as an unrouted aiogram update.
        _ => Ok(()),
    }
}

async fn handle_post(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let chat_id = ChatId(msg.chat.id.0);

    let progress = bot
        .send_message(msg.chat.id, "⚙️ Генерация поста...")
        .await?;

    match state.workflow.create_draft(chat_id).await {
        Ok(draft) => {
            let _ = bot.delete_message(msg.chat.id, progress.id).await;
            bot.send_message(msg.chat.id, draft_preview(&draft))
                .parse_mode(ParseMode::Html)
                .reply_markup(decision_keyboard())
                .await?;
        }
        Err(e) => {
            error!("draft generation failed: {e}");
            let _ = bot.delete_message(msg.chat.id, progress.id).await;
            bot.send_message(msg.chat.id, "❌ Не удалось сгенерировать пост. Попробуйте ещё раз.")
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parsing_strips_bot_mention() {
        assert_eq!(
            parse_command("/post@glowbot"),
            ("post".to_string(), "".to_string())
        );
        assert_eq!(
            parse_command("/reset_topics now"),
            ("reset_topics".to_string(), "now".to_string())
        );
        assert_eq!(parse_command("/ID"), ("id".to_string(), "".to_string()));
    }

    #[test]
    fn preview_escapes_html_in_draft_body() {
        let draft = Draft {
            subtopic: "уход <зимой>".to_string(),
            post: "A & B".to_string(),
        };
        let preview = draft_preview(&draft);
        assert!(preview.contains("уход &lt;зимой&gt;"));
        assert!(preview.contains("A &amp; B"));
    }
}
