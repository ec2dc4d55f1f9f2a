//! Conversion of menux wire markup to teloxide `ReplyMarkup`.

use dbot_core::{DbotError, Result};
use menux::{InlineButton, Markup, ReplyButton};
use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    KeyboardRemove, ReplyMarkup,
};

/// Builds the teloxide markup for `markup`. Reply keyboard flags (`resize_keyboard`,
/// `one_time_keyboard`, `selective`, `is_persistent`) are read from the menu properties.
pub fn markup_to_teloxide(markup: &Markup) -> Result<ReplyMarkup> {
    match markup {
        Markup::Reply(keyboard) => {
            let rows: Vec<Vec<KeyboardButton>> = keyboard
                .keyboard
                .iter()
                .map(|row| row.iter().map(reply_button).collect())
                .collect();
            let mut kb = KeyboardMarkup::new(rows);
            if markup.flag("resize_keyboard") {
                kb = kb.resize_keyboard();
            }
            if markup.flag("one_time_keyboard") {
                kb = kb.one_time_keyboard();
            }
            if markup.flag("selective") {
                kb = kb.selective();
            }
            if markup.flag("is_persistent") {
                kb = kb.persistent();
            }
            Ok(ReplyMarkup::Keyboard(kb))
        }
        Markup::Inline(keyboard) => {
            let rows = keyboard
                .inline_keyboard
                .iter()
                .map(|row| row.iter().map(inline_button).collect::<Result<Vec<_>>>())
                .collect::<Result<Vec<_>>>()?;
            Ok(ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows)))
        }
        Markup::Remove(remove) => {
            let mut kb = KeyboardRemove::new();
            if remove.selective {
                kb = kb.selective();
            }
            Ok(ReplyMarkup::KeyboardRemove(kb))
        }
    }
}

fn reply_button(button: &ReplyButton) -> KeyboardButton {
    let kb = KeyboardButton::new(button.text.clone());
    if button.request_location == Some(true) {
        kb.request(ButtonRequest::Location)
    } else if button.request_contact == Some(true) {
        kb.request(ButtonRequest::Contact)
    } else {
        kb
    }
}

fn inline_button(button: &InlineButton) -> Result<InlineKeyboardButton> {
    let text = button.text.clone();
    if let Some(url) = &button.url {
        let url = reqwest::Url::parse(url)
            .map_err(|e| DbotError::Bot(format!("Invalid button url {}: {}", url, e)))?;
        return Ok(InlineKeyboardButton::url(text, url));
    }
    if button.pay == Some(true) {
        return Ok(InlineKeyboardButton::pay(text));
    }
    let data = button.callback_data.clone().unwrap_or_else(|| text.clone());
    Ok(InlineKeyboardButton::callback(text, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use menux::{Button, KeyboardMode, MenuRegistry};

    #[test]
    fn test_inline_menu_converts() {
        let mut registry = MenuRegistry::new();
        registry.set_default_mode(KeyboardMode::InlineKeyboard);
        let main = registry.create("Main", None).unwrap();
        let next = registry.create("Next", None).unwrap();
        registry
            .menu_mut(main)
            .unwrap()
            .row(vec![Button::url("Site", "https://example.com"), Button::pay("Buy")]);
        registry.menu_mut(main).unwrap().row(["Plain"]);
        registry.link(main, "Next", next).unwrap();

        let markup = markup_to_teloxide(&registry.menu(main).unwrap().build()).unwrap();

        let ReplyMarkup::InlineKeyboard(kb) = markup else {
            panic!("expected inline keyboard");
        };
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(kb.inline_keyboard[0].len(), 2);
        assert_eq!(kb.inline_keyboard[1].len(), 2);
        assert_eq!(kb.inline_keyboard[1][1].text, "Next");
    }

    #[test]
    fn test_reply_menu_converts() {
        let mut registry = MenuRegistry::new();
        registry.set_default_properties([("resize_keyboard", true)]);
        let main = registry.create("Main", None).unwrap();
        registry
            .menu_mut(main)
            .unwrap()
            .row(["Hello"])
            .location_button("Where am I");

        let markup = markup_to_teloxide(&registry.menu(main).unwrap().build()).unwrap();

        let ReplyMarkup::Keyboard(kb) = markup else {
            panic!("expected reply keyboard");
        };
        assert_eq!(kb.keyboard.len(), 1);
        assert_eq!(kb.keyboard[0][0].text, "Hello");
        assert!(matches!(kb.keyboard[0][1].request, Some(ButtonRequest::Location)));
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let mut registry = MenuRegistry::new();
        registry.set_default_mode(KeyboardMode::InlineKeyboard);
        let main = registry.create("Main", None).unwrap();
        registry.menu_mut(main).unwrap().url_button("Broken", "not a url");

        assert!(markup_to_teloxide(&registry.menu(main).unwrap().build()).is_err());
    }

    #[test]
    fn test_remove_converts() {
        let markup = markup_to_teloxide(&Markup::remove(true)).unwrap();
        assert!(matches!(markup, ReplyMarkup::KeyboardRemove(_)));
    }
}
