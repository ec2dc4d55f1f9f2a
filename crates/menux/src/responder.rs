//! Rendering capability used by the navigator.

use async_trait::async_trait;
use dbot_core::{Message, Result};

use crate::markup::Markup;

/// Sends menus back to the chat an event came from. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends a new message with `text` and `markup` to the event's chat.
    async fn reply(&self, message: &Message, text: &str, markup: &Markup) -> Result<()>;
    /// Replaces text and keyboard of the message the event refers to (the one carrying the tapped
    /// inline keyboard).
    async fn edit_in_place(&self, message: &Message, text: &str, markup: &Markup) -> Result<()>;
}
