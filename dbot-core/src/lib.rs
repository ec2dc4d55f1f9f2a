//! # dbot-core
//!
//! Core types and traits for the bot: [`Handler`], the inbound event [`Message`] (text message or
//! callback tap), [`HandlerResponse`], errors, and tracing initialization. Transport-agnostic; used by
//! handler-chain, menux and dbot-telegram.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
