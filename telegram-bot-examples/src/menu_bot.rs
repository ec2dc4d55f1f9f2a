//! Menu demo bot: a reply-keyboard main menu linking to an inline shop menu and back.
//!
//! Env: BOT_TOKEN (required), TELEGRAM_API_URL, LOG_FILE, MENU_DEFAULT_MODE, MENU_TRIGGER_MATCH.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{init_tracing, Handler, HandlerResponse, Message, Result};
use dbot_telegram::{run_dispatcher, TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use menux::{Button, KeyboardMode, MenuConfig, MenuId, MenuRegistry, Responder};
use tracing::{error, info};

/// Sends the main menu on /start. Everything else passes on.
struct StartHandler {
    registry: Arc<MenuRegistry>,
    main: MenuId,
    responder: Arc<dyn Responder>,
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.text() != Some("/start") {
            return Ok(HandlerResponse::Continue);
        }
        let menu = self.registry.menu(self.main)?;
        if let Err(e) = self
            .responder
            .reply(message, menu.name(), &menu.build())
            .await
        {
            error!(error = %e, chat_id = message.chat.id, "Failed to send main menu");
        }
        Ok(HandlerResponse::Stop)
    }
}

fn build_menus(config: &MenuConfig) -> anyhow::Result<(MenuRegistry, MenuId)> {
    let mut registry = MenuRegistry::new();
    config.apply(&mut registry);
    registry.set_default_properties([("resize_keyboard", true)]);

    let main = registry.create("Main menu", Some("main"))?;
    let shop = registry.create("Shop", Some("shop"))?;
    let item = registry.create("Item details", Some("item"))?;
    let settings = registry.create("Settings", Some("settings"))?;

    registry.menu_mut(shop)?.set_mode(KeyboardMode::InlineKeyboard)?;
    registry.menu_mut(item)?.set_mode(KeyboardMode::InlineKeyboard)?;

    let to_shop = registry.menu_link("Shop", main, shop)?;
    let to_settings = registry.menu_link("Settings", main, settings)?;
    registry
        .menu_mut(main)?
        .row(vec![to_shop, to_settings])
        .row(vec![Button::location("Send location"), Button::contact("Send phone")]);

    registry
        .menu_mut(shop)?
        .auto_rows(["Apples", "Pears", "Plums", "Cherries", "Grapes"], 2)?
        .row(vec![Button::url("Website", "https://telegram.org")]);
    registry.link(shop, "Details", item)?;
    registry.link(shop, "Back", main)?;
    registry.link(item, "Back to shop", shop)?;

    let back = registry.menu_link("Back", settings, main)?;
    registry
        .menu_mut(settings)?
        .property("one_time_keyboard", true)
        .row(["Notifications", "Language"])
        .row(vec![back]);

    Ok((registry, main))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = TelegramConfig::from_env()?;
    if let Some(path) = &config.log_file {
        if let Some(dir) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(dir)?;
        }
    }
    init_tracing(config.log_file.as_deref())?;

    let menu_config = MenuConfig::from_env()?;
    let (registry, main) = build_menus(&menu_config)?;
    info!(
        menus = registry.len(),
        mode = ?menu_config.default_mode,
        trigger_match = ?menu_config.trigger_match,
        "Menus built"
    );
    let registry = registry.into_shared();

    let bot = config.build_bot()?;
    let responder: Arc<dyn Responder> = Arc::new(TelegramBotAdapter::new(bot.clone()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(StartHandler {
            registry: registry.clone(),
            main,
            responder: responder.clone(),
        }))
        .add_handler(Arc::new(menu_config.navigator(registry, responder)));

    info!("Menu bot started");
    run_dispatcher(bot, chain).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_menus_links() {
        let (registry, main) = build_menus(&MenuConfig::default()).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("main").unwrap(), main);

        let trigger = registry.trigger("Shop").unwrap();
        assert_eq!((trigger.to, trigger.from), (registry.get("shop").unwrap(), main));
        assert!(registry.menu_by_key("shop").unwrap().is_inline());
        assert!(registry.menu_by_key("item").unwrap().to_json().contains("menux/1/2"));
    }
}
