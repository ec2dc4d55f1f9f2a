//! Keyboard wire format (the JSON sent as Telegram `reply_markup`).
//!
//! Reply keyboards: `{"keyboard": [[{"text", "request_location"?, "request_contact"?}]], ...properties}`.
//! Inline keyboards: `{"inline_keyboard": [[{"text", "callback_data"? | "url"? | "pay"?}]], ...properties}`.
//! Removal: `{"remove_keyboard": true, "selective": bool}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplyButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub keyboard: Vec<Vec<ReplyButton>>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveKeyboard {
    pub remove_keyboard: bool,
    pub selective: bool,
}

/// Serialized keyboard: what [`crate::Menu::build`] produces and what a responder sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Markup {
    Inline(InlineKeyboard),
    Reply(ReplyKeyboard),
    Remove(RemoveKeyboard),
}

impl Markup {
    /// Directive that hides the current reply keyboard.
    pub fn remove(selective: bool) -> Self {
        Markup::Remove(RemoveKeyboard {
            remove_keyboard: true,
            selective,
        })
    }

    /// Serialization properties (empty for the removal directive).
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        match self {
            Markup::Inline(k) => Some(&k.properties),
            Markup::Reply(k) => Some(&k.properties),
            Markup::Remove(_) => None,
        }
    }

    /// Boolean flag from the properties; accepts JSON booleans and the strings `"true"`/`"false"`.
    pub fn flag(&self, name: &str) -> bool {
        match self.properties().and_then(|p| p.get(name)) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn to_json(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
