//! Menu navigation handler.
//!
//! [`MenuNavigator`] sits in a [`dbot_core::Handler`] chain. For each event it checks, in order:
//! 1. a callback payload of the form `menux/<to>/<from>` whose ids both resolve;
//! 2. message text equal to a reply keyboard trigger label.
//!
//! A match renders the target menu (new message or in-place edit) and stops the chain; anything else,
//! including malformed payloads and unknown ids, is passed on unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, error, info, instrument};

use crate::menu::{KeyboardMode, Menu, MenuId};
use crate::registry::{MenuRegistry, TriggerMatch};
use crate::responder::Responder;
use crate::token::TransitionToken;

/// How the target menu is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Send a new message.
    Reply,
    /// Edit the message that carried the tapped keyboard.
    EditInPlace,
}

/// A recognised transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: MenuId,
    pub from: MenuId,
    pub action: RenderAction,
}

/// Render choice for a transition decoded from an inline payload.
///
/// A reply keyboard is not attached to any message, so it can only be shown by sending a new one; that
/// covers a reply keyboard target and (defensively) a reply keyboard origin. Inline to inline edits the
/// existing message.
pub fn render_action(origin: &Menu, target: &Menu) -> RenderAction {
    if origin.mode() == KeyboardMode::ReplyKeyboard || target.mode() == KeyboardMode::ReplyKeyboard {
        RenderAction::Reply
    } else {
        RenderAction::EditInPlace
    }
}

pub struct MenuNavigator {
    registry: Arc<MenuRegistry>,
    responder: Arc<dyn Responder>,
    trigger_match: TriggerMatch,
}

impl MenuNavigator {
    /// Creates a navigator over a frozen registry. Trigger labels match exactly by default.
    pub fn new(registry: Arc<MenuRegistry>, responder: Arc<dyn Responder>) -> Self {
        Self {
            registry,
            responder,
            trigger_match: TriggerMatch::Exact,
        }
    }

    pub fn with_trigger_match(mut self, trigger_match: TriggerMatch) -> Self {
        self.trigger_match = trigger_match;
        self
    }

    pub fn trigger_match(&self) -> TriggerMatch {
        self.trigger_match
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    /// Decides whether `message` is a menu transition, without side effects.
    pub fn resolve(&self, message: &Message) -> Option<Navigation> {
        if let Some(navigation) = message.callback_payload().and_then(|p| self.resolve_payload(p)) {
            return Some(navigation);
        }

        if !self.registry.has_triggers() {
            return None;
        }
        let text = message.text()?;
        let trigger = self.registry.match_trigger(text, self.trigger_match)?;
        self.registry.resolve_by_id(trigger.to)?;
        Some(Navigation {
            to: trigger.to,
            from: trigger.from,
            action: RenderAction::Reply,
        })
    }

    fn resolve_payload(&self, payload: &str) -> Option<Navigation> {
        let token = TransitionToken::parse(payload)?;
        let (Some(target), Some(origin)) = (
            self.registry.resolve_by_id(token.to),
            self.registry.resolve_by_id(token.from),
        ) else {
            debug!(payload = %payload, "transition token refers to unknown menu, passing on");
            return None;
        };
        Some(Navigation {
            to: token.to,
            from: token.from,
            action: render_action(origin, target),
        })
    }
}

#[async_trait]
impl Handler for MenuNavigator {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(navigation) = self.resolve(message) else {
            return Ok(HandlerResponse::Continue);
        };
        let Some(target) = self.registry.resolve_by_id(navigation.to) else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            from = %navigation.from,
            to = %navigation.to,
            action = ?navigation.action,
            "menu navigation"
        );

        let markup = target.build();
        let sent = match navigation.action {
            RenderAction::Reply => self.responder.reply(message, target.name(), &markup).await,
            RenderAction::EditInPlace => {
                self.responder
                    .edit_in_place(message, target.name(), &markup)
                    .await
            }
        };
        if let Err(e) = sent {
            error!(
                error = %e,
                user_id = message.user.id,
                chat_id = message.chat.id,
                to = %navigation.to,
                "Failed to render menu"
            );
        }

        Ok(HandlerResponse::Stop)
    }
}
