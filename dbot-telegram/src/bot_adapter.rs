//! Wraps teloxide::Bot and implements [`menux::Responder`]. Production code renders menus via Telegram;
//! tests can substitute another Responder impl.

use async_trait::async_trait;
use dbot_core::{DbotError, Message, Result};
use menux::{Markup, Responder};
use teloxide::{prelude::*, types::ChatId, types::MessageId, types::ReplyMarkup};
use tracing::{debug, warn};

use crate::keyboard::markup_to_teloxide;

/// Parses a core message id string into a Telegram message id. Used by edit_in_place.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id for edit: {}", s)))
}

/// Thin wrapper around teloxide::Bot that renders menus for the navigator.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    async fn send_with_markup(&self, chat_id: i64, text: &str, markup: ReplyMarkup) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .reply_markup(markup)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Responder for TelegramBotAdapter {
    async fn reply(&self, message: &Message, text: &str, markup: &Markup) -> Result<()> {
        let markup = markup_to_teloxide(markup)?;
        debug!(chat_id = message.chat.id, "sending menu");
        self.send_with_markup(message.chat.id, text, markup).await
    }

    /// Only inline keyboards can be attached by an edit; anything else, or an event without a message
    /// to edit, is sent as a new message.
    async fn edit_in_place(&self, message: &Message, text: &str, markup: &Markup) -> Result<()> {
        let markup = markup_to_teloxide(markup)?;
        let keyboard = match markup {
            ReplyMarkup::InlineKeyboard(keyboard) if !message.id.is_empty() => keyboard,
            other => {
                warn!(
                    chat_id = message.chat.id,
                    message_id = %message.id,
                    "menu cannot be shown by editing, sending a new message"
                );
                return self.send_with_markup(message.chat.id, text, other).await;
            }
        };
        let id = parse_message_id(&message.id)?;
        debug!(chat_id = message.chat.id, message_id = id, "editing menu in place");
        self.bot
            .edit_message_text(ChatId(message.chat.id), MessageId(id), text)
            .reply_markup(keyboard)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
