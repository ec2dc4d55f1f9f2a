//! Button variants and their stateless constructors.
//!
//! The one stateful constructor, the menu link, lives on [`crate::MenuRegistry::menu_link`] because it
//! writes the registry's trigger table.

use crate::menu::KeyboardMode;
use crate::token::TransitionToken;

/// A single keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Plain button. On inline keyboards the payload is sent back as callback data; reply keyboards
    /// have no payload channel, so the payload is dropped there.
    Callback { text: String, payload: Option<String> },
    /// Reply keyboard button that shares the user's location.
    Location { text: String },
    /// Reply keyboard button that shares the user's phone number.
    Contact { text: String },
    /// Inline button that opens a URL.
    Url { text: String, url: String },
    /// Inline payment button.
    Pay { text: String },
    /// Inline button that navigates to another menu.
    MenuLink { text: String, token: TransitionToken },
}

impl Button {
    /// Callback button whose payload is its text.
    pub fn callback(text: impl Into<String>) -> Self {
        let text = text.into();
        Button::Callback {
            payload: Some(text.clone()),
            text,
        }
    }

    /// Callback button with an explicit payload.
    pub fn callback_with(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Button::Callback {
            text: text.into(),
            payload: Some(payload.into()),
        }
    }

    pub fn location(text: impl Into<String>) -> Self {
        Button::Location { text: text.into() }
    }

    pub fn contact(text: impl Into<String>) -> Self {
        Button::Contact { text: text.into() }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Url {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn pay(text: impl Into<String>) -> Self {
        Button::Pay { text: text.into() }
    }

    /// Label shown on the button.
    pub fn text(&self) -> &str {
        match self {
            Button::Callback { text, .. }
            | Button::Location { text }
            | Button::Contact { text }
            | Button::Url { text, .. }
            | Button::Pay { text }
            | Button::MenuLink { text, .. } => text,
        }
    }

    /// Adapts the button to the menu it is added to: reply keyboards lose callback payloads.
    pub fn normalize_for(self, mode: KeyboardMode) -> Self {
        match (self, mode) {
            (Button::Callback { text, .. }, KeyboardMode::ReplyKeyboard) => {
                Button::Callback { text, payload: None }
            }
            (button, _) => button,
        }
    }
}

/// Anything that can be placed in a row: a bare label or a fully built [`Button`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonSpec {
    Label(String),
    Button(Button),
}

impl ButtonSpec {
    /// Turns the spec into the button stored on a menu of the given mode. A bare label becomes a
    /// callback carrying the label as payload on inline menus and a payload-less callback on reply menus.
    pub fn into_button(self, mode: KeyboardMode) -> Button {
        match self {
            ButtonSpec::Label(text) => match mode {
                KeyboardMode::InlineKeyboard => Button::callback(text),
                KeyboardMode::ReplyKeyboard => Button::Callback { text, payload: None },
            },
            ButtonSpec::Button(button) => button.normalize_for(mode),
        }
    }
}

impl From<&str> for ButtonSpec {
    fn from(text: &str) -> Self {
        ButtonSpec::Label(text.to_string())
    }
}

impl From<String> for ButtonSpec {
    fn from(text: String) -> Self {
        ButtonSpec::Label(text)
    }
}

impl From<&String> for ButtonSpec {
    fn from(text: &String) -> Self {
        ButtonSpec::Label(text.clone())
    }
}

impl From<Button> for ButtonSpec {
    fn from(button: Button) -> Self {
        ButtonSpec::Button(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuId;

    #[test]
    fn test_callback_defaults_payload_to_text() {
        assert_eq!(
            Button::callback("Help"),
            Button::Callback {
                text: "Help".to_string(),
                payload: Some("Help".to_string())
            }
        );
        assert_eq!(
            Button::callback_with("Help", "help:1"),
            Button::Callback {
                text: "Help".to_string(),
                payload: Some("help:1".to_string())
            }
        );
    }

    #[test]
    fn test_text_of_every_variant() {
        let token = TransitionToken::new(MenuId(1), MenuId(0));
        let buttons = [
            Button::callback("a"),
            Button::location("b"),
            Button::contact("c"),
            Button::url("d", "https://example.com"),
            Button::pay("e"),
            Button::MenuLink {
                text: "f".to_string(),
                token,
            },
        ];
        let texts: Vec<&str> = buttons.iter().map(Button::text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_label_normalization() {
        assert_eq!(
            ButtonSpec::from("Go").into_button(KeyboardMode::InlineKeyboard),
            Button::callback("Go")
        );
        assert_eq!(
            ButtonSpec::from("Go").into_button(KeyboardMode::ReplyKeyboard),
            Button::Callback {
                text: "Go".to_string(),
                payload: None
            }
        );
    }

    #[test]
    fn test_reply_mode_strips_payload() {
        let spec = ButtonSpec::from(Button::callback_with("Go", "secret"));
        assert_eq!(
            spec.into_button(KeyboardMode::ReplyKeyboard),
            Button::Callback {
                text: "Go".to_string(),
                payload: None
            }
        );
        let url = Button::url("Site", "https://example.com");
        assert_eq!(url.clone().normalize_for(KeyboardMode::ReplyKeyboard), url);
    }
}
