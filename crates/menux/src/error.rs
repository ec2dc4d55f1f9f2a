//! Menu configuration errors.
//!
//! Every variant is a setup-time mistake: returned synchronously while menus are being created and
//! wired, meant to abort startup. Resolving events never produces a [`MenuError`]; an unknown or
//! malformed transition is simply not handled.

use thiserror::Error;

use crate::menu::MenuId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Menu key \"{0}\" already exists")]
    AliasExists(String),

    #[error("Menu key \"{0}\" is undefined")]
    AliasNotFound(String),

    #[error("Menu {0} not found")]
    MenuNotFound(MenuId),

    /// The menu already takes part in a menu link; its links were encoded for the current mode.
    #[error("Menu {0} is linked to other menus; its keyboard mode can no longer change")]
    ModeFrozen(MenuId),

    #[error("Buttons per row must be at least 1")]
    InvalidRowWidth,

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;

impl From<MenuError> for dbot_core::DbotError {
    fn from(e: MenuError) -> Self {
        dbot_core::DbotError::Menu(e.to_string())
    }
}
