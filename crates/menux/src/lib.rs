//! # menux
//!
//! Menu graph builder and navigation resolver for Telegram keyboards.
//!
//! At startup an application creates named menus in a [`MenuRegistry`], fills their rows with
//! [`Button`]s and wires "go to menu" links between them ([`MenuRegistry::menu_link`]). The registry is
//! then frozen ([`MenuRegistry::into_shared`]) and handed to a [`MenuNavigator`], a [`dbot_core::Handler`]
//! that recognises transition taps (inline payload `menux/<to>/<from>`) and trigger texts (reply keyboard
//! labels) and renders the target menu through a [`Responder`]. Anything else is passed on unchanged.

pub mod button;
pub mod config;
pub mod error;
pub mod markup;
pub mod menu;
pub mod navigator;
pub mod registry;
pub mod responder;
pub mod token;

pub use button::{Button, ButtonSpec};
pub use config::MenuConfig;
pub use error::{MenuError, Result};
pub use markup::{InlineButton, InlineKeyboard, Markup, RemoveKeyboard, ReplyButton, ReplyKeyboard};
pub use menu::{KeyboardMode, Menu, MenuId};
pub use navigator::{render_action, MenuNavigator, Navigation, RenderAction};
pub use registry::{MenuRegistry, Trigger, TriggerMatch};
pub use responder::Responder;
pub use token::{TransitionToken, TRANSITION_PREFIX};
