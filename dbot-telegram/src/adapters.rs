//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::types::{MESSAGE_TYPE_CALLBACK, MESSAGE_TYPE_TEXT};
use dbot_core::{Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to a core text event.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(unknown_user),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self.0.text().unwrap_or("").to_string(),
            message_type: MESSAGE_TYPE_TEXT.to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
            callback_data: None,
            callback_id: None,
        }
    }
}

/// Wraps a teloxide CallbackQuery (inline keyboard tap) for conversion to a core callback event.
///
/// The event's `id` and `chat` are those of the message carrying the tapped keyboard, so an in-place
/// edit targets it. Taps on keyboards of inline-mode messages have no such message: `id` is empty and
/// the chat falls back to the user's private chat.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Message {
        let query = self.0;
        let (id, chat) = match &query.message {
            Some(message) => (
                message.id().to_string(),
                Chat {
                    id: message.chat().id.0,
                    chat_type: format!("{:?}", message.chat().kind),
                },
            ),
            None => (
                String::new(),
                Chat {
                    id: query.from.id.0 as i64,
                    chat_type: "private".to_string(),
                },
            ),
        };
        Message {
            id,
            user: TelegramUserWrapper(&query.from).to_core(),
            chat,
            content: String::new(),
            message_type: MESSAGE_TYPE_CALLBACK.to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
            callback_data: query.data.clone(),
            callback_id: Some(query.id.to_string()),
        }
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}
