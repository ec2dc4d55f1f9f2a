//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters from teloxide messages and callback queries to core events,
//! a [`menux::Responder`] backed by teloxide, minimal config, and a dispatcher runner.
//! Handles only Telegram connectivity and handler-chain execution; menu logic lives in menux.

mod adapters;
mod bot_adapter;
mod config;
mod keyboard;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{parse_message_id, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use keyboard::markup_to_teloxide;
pub use runner::run_dispatcher;
