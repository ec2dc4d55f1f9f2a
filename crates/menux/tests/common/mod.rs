//! Shared helpers for menux integration tests: event builders and a recording [`Responder`].

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Chat, DbotError, Message, MessageDirection, Result, User};
use menux::{Markup, Responder};

/// One recorded render call.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Reply { text: String, markup: Markup },
    Edit { message_id: String, text: String, markup: Markup },
}

/// Responder that records every call instead of talking to Telegram. With `failing`, every call is
/// recorded and then reported as a transport error.
#[derive(Default)]
pub struct RecordingResponder {
    calls: Mutex<Vec<Rendered>>,
    failing: bool,
}

impl RecordingResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing: true,
        })
    }

    pub fn calls(&self) -> Vec<Rendered> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Rendered) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            Err(DbotError::Bot("send failed".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(&self, _message: &Message, text: &str, markup: &Markup) -> Result<()> {
        self.record(Rendered::Reply {
            text: text.to_string(),
            markup: markup.clone(),
        })
    }

    async fn edit_in_place(&self, message: &Message, text: &str, markup: &Markup) -> Result<()> {
        self.record(Rendered::Edit {
            message_id: message.id.clone(),
            text: text.to_string(),
            markup: markup.clone(),
        })
    }
}

fn base_message(content: &str) -> Message {
    Message {
        id: "42".to_string(),
        user: User {
            id: 100,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 200,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        callback_data: None,
        callback_id: None,
    }
}

/// Plain text message.
pub fn text_message(content: &str) -> Message {
    base_message(content)
}

/// Inline keyboard tap with the given payload.
pub fn callback_event(data: &str) -> Message {
    let mut message = base_message("");
    message.message_type = "callback".to_string();
    message.callback_data = Some(data.to_string());
    message.callback_id = Some("cb-1".to_string());
    message
}
