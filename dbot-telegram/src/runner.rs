//! Dispatcher loop: converts teloxide messages and callback queries to core events and hands them to
//! the HandlerChain. Each event is processed on its own task so a slow handler does not block polling.

use anyhow::Result;
use dbot_core::{Message, ToCoreMessage};
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Starts long polling with the given Bot and HandlerChain until Ctrl+C.
/// Calls get_me() first so an invalid token is reported before the loop starts.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Bot identity verified"),
        Err(e) => warn!(error = %e, "get_me failed, continuing with dispatcher"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!(handlers = handler_chain.len(), "Starting dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .default_handler(|upd: std::sync::Arc<Update>| async move {
            info!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    match msg.text() {
        Some(text) => info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_content = %text,
            "Received message"
        ),
        None => info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        ),
    }
    spawn_chain(chain, core_msg);
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    // Telegram shows a spinner on the button until the query is answered.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, callback_id = %q.id, "answer_callback_query failed");
    }
    let core_msg = TelegramCallbackWrapper(&q).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        callback_data = ?core_msg.callback_data,
        "Received callback query"
    );
    spawn_chain(chain, core_msg);
    Ok(())
}

fn spawn_chain(chain: HandlerChain, core_msg: Message) {
    tokio::spawn(async move {
        match chain.handle(&core_msg).await {
            Ok(response) => info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                handled = response.is_handled(),
                "Handler chain finished"
            ),
            Err(e) => error!(error = %e, user_id = core_msg.user.id, "Handler chain failed"),
        }
    });
}
