//! Core types: user, chat, inbound event, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `message_type` of a plain text message.
pub const MESSAGE_TYPE_TEXT: &str = "text";
/// `message_type` of an inline keyboard tap.
pub const MESSAGE_TYPE_CALLBACK: &str = "callback";

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound event: either a text message or a callback tap on an inline keyboard.
///
/// For callback events `id` is the id of the message the keyboard is attached to (the message an
/// in-place edit targets), `content` is empty and `callback_data` carries the button payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    /// Payload of the tapped inline button, if this event is a callback.
    pub callback_data: Option<String>,
    /// Transport id of the callback query, used to acknowledge the tap.
    pub callback_id: Option<String>,
}

impl Message {
    /// Callback payload, or `None` when absent or empty.
    pub fn callback_payload(&self) -> Option<&str> {
        self.callback_data.as_deref().filter(|data| !data.is_empty())
    }

    /// Plain text of the message, or `None` when empty.
    pub fn text(&self) -> Option<&str> {
        if self.content.is_empty() {
            None
        } else {
            Some(&self.content)
        }
    }

    /// True when this event is an inline keyboard tap.
    pub fn is_callback(&self) -> bool {
        self.message_type == MESSAGE_TYPE_CALLBACK
    }
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; the event was handled.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

impl HandlerResponse {
    /// True when some handler consumed the event (`Stop` or `Reply`).
    pub fn is_handled(&self) -> bool {
        matches!(self, HandlerResponse::Stop | HandlerResponse::Reply(_))
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
///
/// A handler that does not recognise an event returns `Continue`, which hands the event unchanged
/// to the next handler in the chain.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
