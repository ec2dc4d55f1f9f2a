//! Menu registry: owns every menu, the alias table and the reply keyboard trigger table.
//!
//! Filled during startup through `&mut` access; [`MenuRegistry::into_shared`] ends that phase and hands
//! out an `Arc` that is only ever read, so concurrent event handlers need no locking.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::button::Button;
use crate::error::{MenuError, Result};
use crate::menu::{KeyboardMode, Menu, MenuId};
use crate::token::TransitionToken;

/// Transition registered for a reply keyboard label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub to: MenuId,
    pub from: MenuId,
}

/// How message text is compared against trigger labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMatch {
    #[default]
    Exact,
    CaseInsensitive,
}

impl FromStr for TriggerMatch {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(TriggerMatch::Exact),
            "case_insensitive" | "insensitive" | "ignore_case" => Ok(TriggerMatch::CaseInsensitive),
            other => Err(MenuError::InvalidValue(format!("unknown trigger match: {}", other))),
        }
    }
}

#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: Vec<Menu>,
    aliases: HashMap<String, MenuId>,
    triggers: BTreeMap<String, Trigger>,
    default_mode: KeyboardMode,
    default_properties: Map<String, Value>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode given to menus created from now on. Existing menus keep theirs.
    pub fn set_default_mode(&mut self, mode: KeyboardMode) {
        self.default_mode = mode;
    }

    pub fn default_mode(&self) -> KeyboardMode {
        self.default_mode
    }

    /// Replaces the properties copied into menus created from now on. Existing menus keep theirs.
    pub fn set_default_properties<I, K, V>(&mut self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.default_properties = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    /// Creates a menu with the next id, optionally reachable through `key`.
    ///
    /// Fails with [`MenuError::AliasExists`] when `key` is already taken; no id is consumed then.
    pub fn create(&mut self, name: impl Into<String>, key: Option<&str>) -> Result<MenuId> {
        if let Some(key) = key {
            if self.aliases.contains_key(key) {
                return Err(MenuError::AliasExists(key.to_string()));
            }
        }
        let id = MenuId(self.menus.len());
        let name = name.into();
        debug!(menu_id = %id, name = %name, key = ?key, mode = ?self.default_mode, "menu created");
        self.menus.push(Menu::new(
            id,
            name,
            self.default_mode,
            self.default_properties.clone(),
        ));
        if let Some(key) = key {
            self.aliases.insert(key.to_string(), id);
        }
        Ok(id)
    }

    /// Id registered under `key`.
    pub fn get(&self, key: &str) -> Result<MenuId> {
        self.aliases
            .get(key)
            .copied()
            .ok_or_else(|| MenuError::AliasNotFound(key.to_string()))
    }

    /// Menu for `id`, or `None` for ids never handed out. Used on the event path, where an unknown id
    /// means "not ours" rather than an error.
    pub fn resolve_by_id(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id.0)
    }

    pub fn menu(&self, id: MenuId) -> Result<&Menu> {
        self.resolve_by_id(id).ok_or(MenuError::MenuNotFound(id))
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Result<&mut Menu> {
        self.menus.get_mut(id.0).ok_or(MenuError::MenuNotFound(id))
    }

    pub fn menu_by_key(&self, key: &str) -> Result<&Menu> {
        let id = self.get(key)?;
        self.menu(id)
    }

    pub fn menu_by_key_mut(&mut self, key: &str) -> Result<&mut Menu> {
        let id = self.get(key)?;
        self.menu_mut(id)
    }

    /// Builds a button that navigates from `from` to `to`.
    ///
    /// The encoding depends on `from`'s mode right now. A reply keyboard origin can only echo its
    /// label, so the label is registered as a trigger (last registration of a label wins) and a plain
    /// callback is returned; an inline origin gets a [`Button::MenuLink`] carrying `menux/<to>/<from>`.
    /// Both menus are marked linked, which freezes their modes.
    ///
    /// The returned button belongs in `from`; [`MenuRegistry::link`] places it there.
    pub fn menu_link(&mut self, text: impl Into<String>, from: MenuId, to: MenuId) -> Result<Button> {
        let text = text.into();
        let origin_mode = self.menu(from)?.mode();
        self.menu(to)?;
        self.menu_mut(from)?.mark_linked();
        self.menu_mut(to)?.mark_linked();

        match origin_mode {
            KeyboardMode::ReplyKeyboard => {
                let trigger = Trigger { to, from };
                if let Some(previous) = self.triggers.insert(text.clone(), trigger) {
                    if previous != trigger {
                        warn!(
                            text = %text,
                            previous_to = %previous.to,
                            previous_from = %previous.from,
                            to = %to,
                            from = %from,
                            "menu link label already registered, replacing trigger"
                        );
                    }
                }
                debug!(text = %text, to = %to, from = %from, "reply keyboard trigger registered");
                Ok(Button::callback(text))
            }
            KeyboardMode::InlineKeyboard => Ok(Button::MenuLink {
                text,
                token: TransitionToken::new(to, from),
            }),
        }
    }

    /// Adds a menu link button to the current row of `from` and returns `from` for further building.
    pub fn link(&mut self, from: MenuId, text: impl Into<String>, to: MenuId) -> Result<&mut Menu> {
        let button = self.menu_link(text, from, to)?;
        let menu = self.menu_mut(from)?;
        menu.button(button);
        Ok(menu)
    }

    /// Transition registered for exactly `text`.
    pub fn trigger(&self, text: &str) -> Option<Trigger> {
        self.triggers.get(text).copied()
    }

    /// Transition for `text` under the given comparison. Case-insensitive matching prefers an exact
    /// hit, then the first label (in sorted order) equal to `text` ignoring case.
    pub fn match_trigger(&self, text: &str, mode: TriggerMatch) -> Option<Trigger> {
        if let Some(trigger) = self.trigger(text) {
            return Some(trigger);
        }
        match mode {
            TriggerMatch::Exact => None,
            TriggerMatch::CaseInsensitive => {
                let wanted = text.to_lowercase();
                self.triggers
                    .iter()
                    .find(|(label, _)| label.to_lowercase() == wanted)
                    .map(|(_, trigger)| *trigger)
            }
        }
    }

    pub fn has_triggers(&self) -> bool {
        !self.triggers.is_empty()
    }

    pub fn triggers(&self) -> impl Iterator<Item = (&str, Trigger)> {
        self.triggers.iter().map(|(label, t)| (label.as_str(), *t))
    }

    /// Number of menus.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Menu> {
        self.menus.iter()
    }

    /// Ends the setup phase.
    pub fn into_shared(self) -> Arc<Self> {
        debug!(
            menus = self.menus.len(),
            aliases = self.aliases.len(),
            triggers = self.triggers.len(),
            "menu registry frozen"
        );
        Arc::new(self)
    }
}
