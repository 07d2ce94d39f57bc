//! /websearch single-command and two-step flows.

mod common;

use common::{search_result, text, Harness, MockBot, MockLlm, MockSearch, MockStore};
use telegram_bot::{HandlerResponse, SearchState};

fn harness_with(search: Option<MockSearch>) -> Harness {
    Harness::build(
        MockBot::new(),
        MockLlm::replying("Rust 1.80 shipped."),
        MockStore::new(),
        search,
        10,
    )
}

/// **Test: `/websearch q` searches, summarizes and logs.**
///
/// **Setup:** Search returns two results; model replies with a summary.
/// **Action:** `/websearch rust release`.
/// **Expected:** Progress reply, then header + summary + sources; query sent with top_k 3; search log recorded; no chat history.
#[tokio::test]
async fn test_single_command_search() {
    let h = harness_with(Some(MockSearch::with_results(vec![
        search_result("Rust blog", "https://blog.rust-lang.org"),
        search_result("Release notes", "https://github.com/rust-lang/rust"),
    ])));

    let response = h.chain.handle(&text(3, "/websearch rust release")).await.unwrap();

    let texts = h.bot.texts();
    assert_eq!(texts[0], "🔍 Searching the web for: rust release");
    assert!(texts[1].contains("Rust 1.80 shipped."));
    assert!(texts[1].contains("https://blog.rust-lang.org"));
    assert!(matches!(response, HandlerResponse::Reply(_)));

    let search = h.search.as_ref().unwrap();
    assert_eq!(search.queries(), vec![("rust release".to_string(), 3)]);
    assert!(h.llm.prompts()[0].contains("Title: Rust blog"));

    let searches = h.store.searches.lock().unwrap().clone();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query, "rust release");
    assert_eq!(searches[0].summary, "Rust 1.80 shipped.");
    assert!(searches[0].results.contains("Release notes"));
    assert!(h.components.conversation.history().get_or_create(3).await.is_empty());
}

/// **Test: bare `/websearch` prompts, and the next text is the query, not chat.**
#[tokio::test]
async fn test_two_step_search() {
    let h = harness_with(Some(MockSearch::with_results(vec![search_result(
        "Forecast",
        "https://weather.example",
    )])));

    h.chain.handle(&text(3, "/websearch")).await.unwrap();
    assert!(h.bot.last_text().unwrap().starts_with("Please send your search query"));
    assert_eq!(h.components.search_states.get(3).await, SearchState::AwaitingQuery);

    h.chain.handle(&text(3, "weather today")).await.unwrap();

    let search = h.search.as_ref().unwrap();
    assert_eq!(search.queries(), vec![("weather today".to_string(), 3)]);
    assert_eq!(h.components.search_states.get(3).await, SearchState::Idle);
    assert!(h.components.conversation.history().get_or_create(3).await.is_empty());

    // Back to chat after the search.
    h.chain.handle(&text(3, "thanks")).await.unwrap();
    assert_eq!(h.search.as_ref().unwrap().queries().len(), 1);
    assert_eq!(
        h.components.conversation.history().get_or_create(3).await.len(),
        2
    );
}

/// **Test: a pending query in one chat does not capture another chat's text.**
#[tokio::test]
async fn test_awaiting_query_is_per_chat() {
    let h = harness_with(Some(MockSearch::with_results(Vec::new())));

    h.chain.handle(&text(3, "/websearch")).await.unwrap();
    h.chain.handle(&text(4, "just chatting")).await.unwrap();

    assert!(h.search.as_ref().unwrap().queries().is_empty());
    assert_eq!(h.components.search_states.get(3).await, SearchState::AwaitingQuery);
}

/// **Test: empty results are a normal reply and the model is not called.**
#[tokio::test]
async fn test_no_results() {
    let h = harness_with(Some(MockSearch::with_results(Vec::new())));

    let response = h.chain.handle(&text(3, "/websearch nothing")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply("No search results found.".to_string())
    );
    assert!(h.llm.prompts().is_empty());
    assert!(h.store.searches.lock().unwrap().is_empty());
}

/// **Test: a search gateway error is reported to the user.**
#[tokio::test]
async fn test_search_failure_reported() {
    let h = harness_with(Some(MockSearch::failing("rate limited")));

    h.chain.handle(&text(3, "/websearch rust")).await.unwrap();

    let reply = h.bot.last_text().unwrap();
    assert!(reply.starts_with("An error occurred while processing your search"));
    assert!(reply.contains("rate limited"));
}

/// **Test: without a search key `/websearch` says so and plain text still chats.**
#[tokio::test]
async fn test_search_not_configured() {
    let h = harness_with(None);

    h.chain.handle(&text(3, "/websearch")).await.unwrap();
    assert_eq!(h.bot.last_text().as_deref(), Some("Web search is not configured."));
    assert_eq!(h.components.search_states.get(3).await, SearchState::Idle);

    h.chain.handle(&text(3, "hello")).await.unwrap();
    assert_eq!(h.bot.last_text().as_deref(), Some("Rust 1.80 shipped."));
}

/// **Test: the search log is written even when sending the final reply fails.**
///
/// **Setup:** Bot accepts the progress message, then fails every send.
/// **Expected:** Chain returns the send error; one search log recorded.
#[tokio::test]
async fn test_send_failure_keeps_search_log() {
    let h = Harness::build(
        MockBot::new().failing_sends_after(1),
        MockLlm::replying("Rust 1.80 shipped."),
        MockStore::new(),
        Some(MockSearch::with_results(vec![search_result(
            "Rust blog",
            "https://blog.rust-lang.org",
        )])),
        10,
    );

    assert!(h.chain.handle(&text(3, "/websearch rust")).await.is_err());

    assert_eq!(h.bot.texts().len(), 1);
    let searches = h.store.searches.lock().unwrap().clone();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query, "rust");
}
