//! Menu: a named grid of buttons with a keyboard mode and serialization properties.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::button::{Button, ButtonSpec};
use crate::error::{MenuError, Result};
use crate::markup::{InlineButton, InlineKeyboard, Markup, ReplyButton, ReplyKeyboard};

/// Registry-assigned menu id: 0, 1, 2, … in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuId(pub usize);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a menu is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardMode {
    /// Replaces the device keyboard; a tap sends the label as a text message.
    #[default]
    ReplyKeyboard,
    /// Attached under a message; a tap sends the button's payload.
    InlineKeyboard,
}

impl FromStr for KeyboardMode {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reply" | "keyboard" | "reply_keyboard" => Ok(KeyboardMode::ReplyKeyboard),
            "inline" | "inline_keyboard" => Ok(KeyboardMode::InlineKeyboard),
            other => Err(MenuError::InvalidValue(format!("unknown keyboard mode: {}", other))),
        }
    }
}

/// A menu owned by [`crate::MenuRegistry`].
///
/// Rows are filled through the builder methods. `row` opens a new row on every call except the first,
/// which fills row 0; the single-button methods (`button`, `location_button`, …) append to the row
/// currently open without advancing.
///
/// The mode is frozen once the menu is linked or serialized: buttons were normalized for the mode in
/// effect when they were added, so a later switch would change what they send.
#[derive(Debug)]
pub struct Menu {
    id: MenuId,
    name: String,
    mode: KeyboardMode,
    rows: Vec<Vec<Button>>,
    properties: Map<String, Value>,
    current_row: usize,
    row_opened: bool,
    linked: bool,
    // Set by `build`, which also runs on the shared registry while serving.
    serialized: AtomicBool,
}

impl Clone for Menu {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            mode: self.mode,
            rows: self.rows.clone(),
            properties: self.properties.clone(),
            current_row: self.current_row,
            row_opened: self.row_opened,
            linked: self.linked,
            serialized: AtomicBool::new(self.serialized.load(Ordering::Relaxed)),
        }
    }
}

impl Menu {
    pub(crate) fn new(
        id: MenuId,
        name: String,
        mode: KeyboardMode,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            name,
            mode,
            rows: Vec::new(),
            properties,
            current_row: 0,
            row_opened: false,
            linked: false,
            serialized: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Display name; also the message body when the menu is rendered by navigation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn is_inline(&self) -> bool {
        self.mode == KeyboardMode::InlineKeyboard
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// True once the menu is the origin or target of a menu link.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// True once the mode can no longer change: the menu is linked or has been serialized.
    pub fn is_frozen(&self) -> bool {
        self.linked || self.serialized.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_linked(&mut self) {
        self.linked = true;
    }

    /// Switches to inline mode. Call before adding menu links from this menu.
    pub fn as_inline(&mut self) -> Result<&mut Self> {
        self.set_mode(KeyboardMode::InlineKeyboard)
    }

    /// Changes the keyboard mode. Fails with [`MenuError::ModeFrozen`] once the menu is linked or has
    /// been serialized. Setting the current mode again always succeeds.
    pub fn set_mode(&mut self, mode: KeyboardMode) -> Result<&mut Self> {
        if mode != self.mode {
            if self.is_frozen() {
                return Err(MenuError::ModeFrozen(self.id));
            }
            self.mode = mode;
        }
        Ok(self)
    }

    /// Starts a new row (row 0 on the first call) and appends `buttons` to it.
    pub fn row<I, B>(&mut self, buttons: I) -> &mut Self
    where
        I: IntoIterator<Item = B>,
        B: Into<ButtonSpec>,
    {
        if self.row_opened {
            self.current_row += 1;
        } else {
            self.row_opened = true;
        }
        self.open_current_row();
        for button in buttons {
            self.push(button.into());
        }
        self
    }

    /// Same as [`Menu::row`] for an already collected list.
    pub fn array_row(&mut self, buttons: Vec<ButtonSpec>) -> &mut Self {
        self.row(buttons)
    }

    /// Splits `buttons` into consecutive rows of `per_row` (the last one may be shorter), keeping order.
    pub fn auto_rows<I, B>(&mut self, buttons: I, per_row: usize) -> Result<&mut Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<ButtonSpec>,
    {
        if per_row == 0 {
            return Err(MenuError::InvalidRowWidth);
        }
        let buttons: Vec<ButtonSpec> = buttons.into_iter().map(Into::into).collect();
        for chunk in buttons.chunks(per_row) {
            self.array_row(chunk.to_vec());
        }
        Ok(self)
    }

    /// Appends one button to the current row.
    pub fn button(&mut self, button: impl Into<ButtonSpec>) -> &mut Self {
        self.open_current_row();
        self.push(button.into());
        self
    }

    pub fn location_button(&mut self, text: impl Into<String>) -> &mut Self {
        self.button(Button::location(text))
    }

    pub fn contact_button(&mut self, text: impl Into<String>) -> &mut Self {
        self.button(Button::contact(text))
    }

    pub fn url_button(&mut self, text: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.button(Button::url(text, url))
    }

    pub fn pay_button(&mut self, text: impl Into<String>) -> &mut Self {
        self.button(Button::pay(text))
    }

    /// Sets a key merged next to the rows on serialization (e.g. `resize_keyboard`, `one_time_keyboard`).
    pub fn property(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Total number of buttons across rows.
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Serializes to the wire shape for the current mode and freezes the mode. Empty rows are skipped.
    pub fn build(&self) -> Markup {
        self.serialized.store(true, Ordering::Relaxed);
        let rows = self.rows.iter().filter(|row| !row.is_empty());
        match self.mode {
            KeyboardMode::ReplyKeyboard => Markup::Reply(ReplyKeyboard {
                keyboard: rows
                    .map(|row| row.iter().map(reply_button).collect())
                    .collect(),
                properties: self.properties.clone(),
            }),
            KeyboardMode::InlineKeyboard => Markup::Inline(InlineKeyboard {
                inline_keyboard: rows
                    .map(|row| row.iter().map(inline_button).collect())
                    .collect(),
                properties: self.properties.clone(),
            }),
        }
    }

    /// JSON string of [`Menu::build`].
    pub fn to_json(&self) -> String {
        self.build().to_string()
    }

    fn open_current_row(&mut self) {
        while self.rows.len() <= self.current_row {
            self.rows.push(Vec::new());
        }
    }

    fn push(&mut self, spec: ButtonSpec) {
        let button = spec.into_button(self.mode);
        self.rows[self.current_row].push(button);
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.build(), f)
    }
}

/// Reply keyboards carry only the label and the location/contact request flags.
fn reply_button(button: &Button) -> ReplyButton {
    let mut out = ReplyButton {
        text: button.text().to_string(),
        ..Default::default()
    };
    match button {
        Button::Location { .. } => out.request_location = Some(true),
        Button::Contact { .. } => out.request_contact = Some(true),
        _ => {}
    }
    out
}

/// Every inline button carries exactly one action; buttons without an inline action send their label.
fn inline_button(button: &Button) -> InlineButton {
    let text = button.text().to_string();
    match button {
        Button::Callback {
            payload: Some(payload),
            ..
        } => InlineButton {
            callback_data: Some(payload.clone()),
            text,
            ..Default::default()
        },
        Button::Url { url, .. } => InlineButton {
            url: Some(url.clone()),
            text,
            ..Default::default()
        },
        Button::Pay { .. } => InlineButton {
            pay: Some(true),
            text,
            ..Default::default()
        },
        Button::MenuLink { token, .. } => InlineButton {
            callback_data: Some(token.encode()),
            text,
            ..Default::default()
        },
        Button::Callback { payload: None, .. } | Button::Location { .. } | Button::Contact { .. } => {
            InlineButton {
                callback_data: Some(text.clone()),
                text,
                ..Default::default()
            }
        }
    }
}
