//! HandlerChain ordering: before (all, in order) → handle until Stop/Reply → after (reverse).

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::text;
use telegram_bot::{Handler, HandlerChain, HandlerResponse, Message, Result};

struct Recording {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    before: bool,
    response: HandlerResponse,
}

impl Recording {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>, response: HandlerResponse) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: log.clone(),
            before: true,
            response,
        })
    }
}

#[async_trait]
impl Handler for Recording {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.log.lock().unwrap().push(format!("before:{}", self.name));
        Ok(self.before)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle:{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("after:{}:{}", self.name, response.kind()));
        Ok(())
    }
}

/// **Test: Reply stops the handle phase; after runs in reverse with the final response.**
#[tokio::test]
async fn test_chain_order_and_stop() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Recording::new("a", &log, HandlerResponse::Ignore))
        .add_handler(Recording::new("b", &log, HandlerResponse::Reply("x".into())))
        .add_handler(Recording::new("c", &log, HandlerResponse::Reply("y".into())));

    let response = chain.handle(&text(1, "hi")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("x".to_string()));
    assert_eq!(
        log.lock().unwrap().clone(),
        vec![
            "before:a", "before:b", "before:c", "handle:a", "handle:b", "after:c:Reply",
            "after:b:Reply", "after:a:Reply",
        ]
    );
}

/// **Test: before returning false stops the chain with Stop and skips handle.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let gate = Arc::new(Recording {
        name: "gate",
        log: log.clone(),
        before: false,
        response: HandlerResponse::Ignore,
    });
    let chain = HandlerChain::new()
        .add_handler(gate)
        .add_handler(Recording::new("b", &log, HandlerResponse::Reply("x".into())));

    let response = chain.handle(&text(1, "hi")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(log.lock().unwrap().clone(), vec!["before:gate"]);
}

/// **Test: when every handler ignores, the result is Continue.**
#[tokio::test]
async fn test_all_ignore_yields_continue() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Recording::new("a", &log, HandlerResponse::Ignore));

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.handle(&text(1, "hi")).await.unwrap(), HandlerResponse::Continue);
}
