//! Menu settings loaded from the environment: `MENU_DEFAULT_MODE`, `MENU_TRIGGER_MATCH`.

use anyhow::Result;
use std::env;
use std::sync::Arc;

use crate::menu::KeyboardMode;
use crate::navigator::MenuNavigator;
use crate::registry::{MenuRegistry, TriggerMatch};
use crate::responder::Responder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuConfig {
    /// `MENU_DEFAULT_MODE`: `reply` (default) or `inline`.
    pub default_mode: KeyboardMode,
    /// `MENU_TRIGGER_MATCH`: `exact` (default) or `case_insensitive`.
    pub trigger_match: TriggerMatch,
}

impl MenuConfig {
    /// Loads from environment variables; unset variables keep their defaults, invalid values fail.
    pub fn from_env() -> Result<Self> {
        let default_mode = match env::var("MENU_DEFAULT_MODE") {
            Ok(value) => value.parse()?,
            Err(_) => KeyboardMode::default(),
        };
        let trigger_match = match env::var("MENU_TRIGGER_MATCH") {
            Ok(value) => value.parse()?,
            Err(_) => TriggerMatch::default(),
        };
        Ok(Self {
            default_mode,
            trigger_match,
        })
    }

    /// Installs the default mode on the registry. Call before creating the menus it should affect.
    /// `trigger_match` is a navigator setting; see [`MenuConfig::navigator`].
    pub fn apply(&self, registry: &mut MenuRegistry) {
        registry.set_default_mode(self.default_mode);
    }

    /// Creates a navigator over `registry` that matches trigger labels per `trigger_match`.
    pub fn navigator(&self, registry: Arc<MenuRegistry>, responder: Arc<dyn Responder>) -> MenuNavigator {
        MenuNavigator::new(registry, responder).with_trigger_match(self.trigger_match)
    }
}
