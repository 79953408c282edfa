//! Integration tests for [`imagen_core::HandlerChain`]: phase ordering and stop semantics.

use async_trait::async_trait;
use chrono::Utc;
use imagen_core::{
    Chat, Handler, HandlerChain, HandlerResponse, Message, MessageDirection, Result, User,
};
use std::sync::{Arc, Mutex};

fn test_message(content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 100,
            chat_type: "Private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// Handler scripted to return a fixed response, recording every phase it runs.
struct ScriptedHandler {
    name: &'static str,
    response: HandlerResponse,
    before_ok: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedHandler {
    fn new(
        name: &'static str,
        response: HandlerResponse,
        calls: Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            response,
            before_ok: true,
            calls,
        })
    }

    fn with_before_false(
        name: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: HandlerResponse::Continue,
            before_ok: false,
            calls,
        })
    }

    fn record(&self, phase: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, phase));
    }
}

#[async_trait]
impl Handler for ScriptedHandler {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.record("before");
        Ok(self.before_ok)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.record("handle");
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        self.record("after");
        Ok(())
    }
}

#[tokio::test]
async fn chain_runs_before_handle_after_in_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ScriptedHandler::new("a", HandlerResponse::Continue, calls.clone()))
        .add_handler(ScriptedHandler::new("b", HandlerResponse::Continue, calls.clone()));

    let response = chain.handle(&test_message("hi")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            "a:before", "b:before", "a:handle", "b:handle", "b:after", "a:after"
        ]
    );
}

#[tokio::test]
async fn stop_ends_handle_phase_but_after_still_runs_for_all() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ScriptedHandler::new("first", HandlerResponse::Stop, calls.clone()))
        .add_handler(ScriptedHandler::new("second", HandlerResponse::Continue, calls.clone()));

    let response = chain.handle(&test_message("hi")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let calls = calls.lock().unwrap();
    // second's handle never ran, but both after phases did (reverse order)
    assert_eq!(
        *calls,
        vec![
            "first:before",
            "second:before",
            "first:handle",
            "second:after",
            "first:after"
        ]
    );
}

#[tokio::test]
async fn reply_carries_text_to_final_response() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(ScriptedHandler::new(
        "replier",
        HandlerResponse::Reply("done".to_string()),
        calls.clone(),
    ));

    let response = chain.handle(&test_message("hi")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply("done".to_string()));
}

#[tokio::test]
async fn before_false_stops_chain_without_handle() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ScriptedHandler::with_before_false("gate", calls.clone()))
        .add_handler(ScriptedHandler::new("next", HandlerResponse::Continue, calls.clone()));

    let response = chain.handle(&test_message("hi")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let calls = calls.lock().unwrap();
    assert_eq!(*calls, vec!["gate:before"]);
}

#[tokio::test]
async fn ignore_passes_to_next_handler() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(ScriptedHandler::new("ignored", HandlerResponse::Ignore, calls.clone()))
        .add_handler(ScriptedHandler::new("stopper", HandlerResponse::Stop, calls.clone()));

    let response = chain.handle(&test_message("hi")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let calls = calls.lock().unwrap();
    assert!(calls.contains(&"ignored:handle".to_string()));
    assert!(calls.contains(&"stopper:handle".to_string()));
}
