//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, before stopping the chain, a handler that does not recognise an event
//! passing it on to the next one, and a handled event not reaching later handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{Chat, Handler, HandlerResponse, Message, MessageDirection, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        callback_data: None,
        callback_id: None,
    }
}

/// Handles only messages whose text equals `word`; everything else is passed on.
struct KeywordHandler {
    word: &'static str,
    seen: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Handler for KeywordHandler {
    async fn handle(&self, message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        if message.content == self.word {
            Ok(HandlerResponse::Stop)
        } else {
            Ok(HandlerResponse::Continue)
        }
    }
}

/// **Test: An unrecognised event is forwarded to the next handler, whose result is returned.**
///
/// **Setup:** KeywordHandler("menu") then a handler replying "fallback".
/// **Action:** `chain.handle("hello")`.
/// **Expected:** Both handlers see the event; result is Reply("fallback").
#[tokio::test]
async fn test_unrecognised_event_reaches_next_handler() {
    struct Fallback;

    #[async_trait::async_trait]
    impl Handler for Fallback {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply("fallback".to_string()))
        }
    }

    let seen = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(KeywordHandler {
            word: "menu",
            seen: seen.clone(),
        }))
        .add_handler(Arc::new(Fallback));

    let result = chain.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(result, HandlerResponse::Reply("fallback".to_string()));
}

/// **Test: A handled event does not reach later handlers.**
///
/// **Setup:** KeywordHandler("menu") then a counting KeywordHandler.
/// **Action:** `chain.handle("menu")`.
/// **Expected:** Result is Stop; the second handler never runs.
#[tokio::test]
async fn test_handled_event_stops_chain() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(KeywordHandler {
            word: "menu",
            seen: first.clone(),
        }))
        .add_handler(Arc::new(KeywordHandler {
            word: "other",
            seen: second.clone(),
        }));

    let result = chain.handle(&create_test_message("menu")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(result.is_handled());
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

/// **Test: Nobody handles the event; chain returns Continue.**
#[tokio::test]
async fn test_unhandled_event_returns_continue() {
    let seen = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(KeywordHandler {
        word: "menu",
        seen: seen.clone(),
    }));

    let result = chain.handle(&create_test_message("nope")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert!(!result.is_handled());
    assert_eq!(chain.len(), 1);
}

/// **Test: Handler before returns false stops the chain; handle is not run.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let seen = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(KeywordHandler {
            word: "menu",
            seen: seen.clone(),
        }));

    let result = chain.handle(&create_test_message("menu")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

/// **Test: before runs first→last, after runs last→first and sees the final response.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderHandler {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
            self.order
                .lock()
                .unwrap()
                .push(format!("after_{}_{}", self.name, response.is_handled()));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&create_test_message("test")).await.unwrap();

    let executed = order.lock().unwrap();
    assert_eq!(
        *executed,
        vec![
            "before_first",
            "before_second",
            "after_second_false",
            "after_first_false"
        ]
    );
}
