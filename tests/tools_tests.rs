//! Tests for the tool catalog against a mock Solafon API

use mockito::{Matcher, Server, ServerGuard};
use secrecy::SecretString;
use serde_json::{json, Value};

use solafon_mcp_server::{
    config::Config,
    mcp::{
        envelope::{ContentBlock, ToolResult},
        tools::TOOL_REGISTRY,
    },
    solafon::{models::ToolError, services::developer::MISSING_APP_ID},
    AppState,
};

const TOKEN: &str = "test-bot-token";
const CONVERSATION: &str = "11111111-1111-1111-1111-111111111111";
const MESSAGE: &str = "22222222-2222-2222-2222-222222222222";
const USER: &str = "33333333-3333-3333-3333-333333333333";

fn state_for(server: &ServerGuard, token: Option<&str>) -> AppState {
    let config = Config {
        api_url: server.url(),
        bot_token: token.map(SecretString::from),
        ..Config::default()
    };
    AppState::new(config).unwrap()
}

/// Parse the single text block of a tool result back into JSON
fn payload(result: ToolResult) -> Value {
    assert_eq!(result.content.len(), 1);
    let ContentBlock::Text { text } = &result.content[0];
    serde_json::from_str(text).unwrap()
}

async fn call(state: &AppState, tool: &str, args: Value) -> Value {
    payload(TOOL_REGISTRY.call(&state.client, tool, args).await.unwrap())
}

#[tokio::test]
async fn test_wallet_balance_without_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/wallet/balance")
        .match_query(Matcher::Exact("address=7xKXt".to_string()))
        .match_header("x-bot-token", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"address":"7xKXt","sol":1.25,"tokens":[]}"#)
        .create_async()
        .await;

    let state = state_for(&server, None);
    let value = call(&state, "get_wallet_balance", json!({"address": "7xKXt"})).await;

    mock.assert_async().await;
    assert_eq!(value, json!({"address": "7xKXt", "sol": 1.25, "tokens": []}));
}

#[tokio::test]
async fn test_send_message_with_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bot/messages")
        .match_header("x-bot-token", TOKEN)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "conversationId": CONVERSATION,
            "content": {"type": "text", "text": "hi"}
        })))
        .with_status(201)
        .with_body(r#"{"id":"m1"}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(
        &state,
        "send_message",
        json!({"conversationId": CONVERSATION, "type": "text", "text": "hi"}),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(value, json!({"id": "m1"}));
}

#[tokio::test]
async fn test_send_message_defaults_type_and_keeps_buttons() {
    let mut server = Server::new_async().await;
    let buttons = json!([{"id": "b1", "text": "Yes", "action": "callback", "payload": "yes"}]);
    let mock = server
        .mock("POST", "/api/bot/messages")
        .match_body(Matcher::Json(json!({
            "conversationId": CONVERSATION,
            "content": {"type": "text", "text": "Continue?", "buttons": buttons}
        })))
        .with_body("{}")
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    call(
        &state,
        "send_message",
        json!({"conversationId": CONVERSATION, "text": "Continue?", "buttons": buttons}),
    )
    .await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_message() {
    let mut server = Server::new_async().await;
    let path = format!("/api/bot/messages/{}", MESSAGE);
    let mock = server
        .mock("PATCH", path.as_str())
        .match_body(Matcher::Json(json!({
            "content": {"type": "image", "imageUrl": "https://example.com/a.png"}
        })))
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(
        &state,
        "edit_message",
        json!({"messageId": MESSAGE, "type": "image", "imageUrl": "https://example.com/a.png"}),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn test_delete_message_with_empty_body() {
    let mut server = Server::new_async().await;
    let path = format!("/api/bot/messages/{}", MESSAGE);
    let mock = server
        .mock("DELETE", path.as_str())
        .with_status(204)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(&state, "delete_message", json!({"messageId": MESSAGE})).await;

    mock.assert_async().await;
    assert_eq!(value, json!({"status": 204, "body": ""}));
}

#[tokio::test]
async fn test_list_conversations_defaults() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/bot/conversations")
        .match_query(Matcher::Exact("limit=20&offset=0".to_string()))
        .with_body(r#"{"conversations":[]}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    call(&state, "list_conversations", json!({})).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_conversation_messages_before_is_optional() {
    let mut server = Server::new_async().await;
    let path = format!("/api/bot/conversations/{}/messages", CONVERSATION);
    let first_page = server
        .mock("GET", path.as_str())
        .match_query(Matcher::Exact("limit=50".to_string()))
        .with_body(r#"{"messages":[]}"#)
        .create_async()
        .await;
    let older = server
        .mock("GET", path.as_str())
        .match_query(Matcher::Exact(format!("limit=10&before={}", MESSAGE)))
        .with_body(r#"{"messages":[]}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    call(&state, "get_conversation_messages", json!({"conversationId": CONVERSATION})).await;
    call(
        &state,
        "get_conversation_messages",
        json!({"conversationId": CONVERSATION, "limit": 10, "before": MESSAGE}),
    )
    .await;

    first_page.assert_async().await;
    older.assert_async().await;
}

#[tokio::test]
async fn test_get_user() {
    let mut server = Server::new_async().await;
    let path = format!("/api/bot/users/{}", USER);
    let mock = server
        .mock("GET", path.as_str())
        .with_body(r#"{"id":"u","username":"alice"}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(&state, "get_user", json!({"userId": USER})).await;

    mock.assert_async().await;
    assert_eq!(value["username"], "alice");
}

#[tokio::test]
async fn test_set_webhook_resolves_app_id_first() {
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/bot/me")
        .with_body(r#"{"id":"bot-1","appId":"app-42","name":"Echo"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/developer/apps/app-42/webhook")
        .match_header("x-bot-token", TOKEN)
        .match_body(Matcher::Json(json!({
            "url": "https://bot.example.com/hook",
            "events": ["message", "callback"]
        })))
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(
        &state,
        "set_webhook",
        json!({"url": "https://bot.example.com/hook", "events": ["message", "callback"]}),
    )
    .await;

    me.assert_async().await;
    put.assert_async().await;
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn test_set_webhook_without_app_id_issues_no_put() {
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/bot/me")
        .with_status(401)
        .with_body(r#"{"error":"Unauthorized"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let state = state_for(&server, None);
    let value = call(&state, "set_webhook", json!({"url": "https://bot.example.com/hook"})).await;

    me.assert_async().await;
    put.assert_async().await;
    assert_eq!(value, json!({"error": MISSING_APP_ID}));
}

#[tokio::test]
async fn test_set_welcome_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bot/me")
        .with_body(r#"{"id":"bot-7"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/developer/apps/bot-7/welcome-message")
        .match_body(Matcher::Json(json!({"type": "text", "text": "Welcome!"})))
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    call(&state, "set_welcome_message", json!({"text": "Welcome!"})).await;

    put.assert_async().await;
}

#[tokio::test]
async fn test_set_welcome_message_without_app_id() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bot/me")
        .with_body(r#"{"name":"nameless"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(&state, "set_welcome_message", json!({"text": "Welcome!"})).await;

    put.assert_async().await;
    assert_eq!(value["error"], MISSING_APP_ID);
}

#[tokio::test]
async fn test_zero_app_id_issues_no_put() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bot/me")
        .with_body(r#"{"id":0,"name":"fresh"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(&state, "set_webhook", json!({"url": "https://bot.example.com/hook"})).await;

    put.assert_async().await;
    assert_eq!(value, json!({"error": MISSING_APP_ID}));
}

#[tokio::test]
async fn test_wallet_read_endpoints() {
    let mut server = Server::new_async().await;
    let tokens = server
        .mock("GET", "/api/wallet/tokens")
        .with_body(r#"{"tokens":[{"symbol":"USDC"}]}"#)
        .create_async()
        .await;
    let prices = server
        .mock("GET", "/api/wallet/prices")
        .match_query(Matcher::Exact("mints=all".to_string()))
        .with_body(r#"{"SOL":171.2}"#)
        .create_async()
        .await;
    let history = server
        .mock("GET", "/api/wallet/transactions")
        .match_query(Matcher::Exact("address=7xKXt&limit=50".to_string()))
        .with_body(r#"{"transactions":[]}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/api/wallet/status")
        .match_query(Matcher::Exact("signature=5sig".to_string()))
        .with_body(r#"{"status":"confirmed"}"#)
        .create_async()
        .await;
    let blockhash = server
        .mock("GET", "/api/wallet/blockhash")
        .with_body(r#"{"blockhash":"abc","lastValidBlockHeight":10}"#)
        .create_async()
        .await;

    let state = state_for(&server, None);
    call(&state, "get_token_list", json!({})).await;
    assert_eq!(call(&state, "get_token_prices", json!({})).await["SOL"], 171.2);
    call(&state, "get_transaction_history", json!({"address": "7xKXt"})).await;
    assert_eq!(
        call(&state, "get_transaction_status", json!({"signature": "5sig"})).await["status"],
        "confirmed"
    );
    assert_eq!(call(&state, "get_latest_blockhash", Value::Null).await["blockhash"], "abc");

    for mock in [tokens, prices, history, status, blockhash] {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_transaction_relay_bodies() {
    let mut server = Server::new_async().await;
    let send = server
        .mock("POST", "/api/wallet/send")
        .match_body(Matcher::Json(json!({"signedTransaction": "AQAB"})))
        .with_body(r#"{"signature":"5sig"}"#)
        .create_async()
        .await;
    let simulate = server
        .mock("POST", "/api/wallet/simulate")
        .match_body(Matcher::Json(json!({"transaction": "AQAC"})))
        .with_status(400)
        .with_body(r#"{"error":"Blockhash not found"}"#)
        .create_async()
        .await;

    let state = state_for(&server, None);
    let sent = call(&state, "send_transaction", json!({"signedTransaction": "AQAB"})).await;
    let simulated = call(&state, "simulate_transaction", json!({"transaction": "AQAC"})).await;

    send.assert_async().await;
    simulate.assert_async().await;
    assert_eq!(sent, json!({"signature": "5sig"}));
    // Downstream errors are data, not failures
    assert_eq!(simulated, json!({"error": "Blockhash not found"}));
}

#[tokio::test]
async fn test_non_json_response_is_wrapped() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bot/me")
        .with_status(503)
        .with_body("<html>Service Unavailable</html>")
        .create_async()
        .await;

    let state = state_for(&server, Some(TOKEN));
    let value = call(&state, "get_bot_info", json!({})).await;
    assert_eq!(
        value,
        json!({"status": 503, "body": "<html>Service Unavailable</html>"})
    );
}

#[tokio::test]
async fn test_validation_rejects_before_any_request() {
    // Nothing listens here: a request that got out would be a Gateway error
    let config = Config {
        api_url: "http://127.0.0.1:9".to_string(),
        bot_token: Some(SecretString::from(TOKEN)),
        ..Config::default()
    };
    let state = AppState::new(config).unwrap();
    let cases = [
        ("send_message", json!({"text": "no conversation"})),
        ("send_message", json!({"conversationId": "not-a-uuid"})),
        ("send_message", json!({"conversationId": CONVERSATION, "type": "video"})),
        ("edit_message", json!({"messageId": MESSAGE, "imageUrl": "nope"})),
        ("list_conversations", json!({"limit": 101})),
        ("list_conversations", json!({"limit": 0})),
        ("get_conversation_messages", json!({"conversationId": CONVERSATION, "limit": 101})),
        ("get_transaction_history", json!({"address": "7xKXt", "limit": 51})),
        ("set_webhook", json!({"url": "not a url"})),
        ("get_wallet_balance", json!({})),
        ("send_transaction", json!({"signedTransaction": ""})),
    ];
    for (tool, args) in cases {
        let err = TOOL_REGISTRY
            .call(&state.client, tool, args.clone())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ToolError::InvalidParams(_)),
            "{} {} should be rejected, got {:?}",
            tool,
            args,
            err
        );
    }
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let config = Config {
        api_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 2,
        ..Config::default()
    };
    let state = AppState::new(config).unwrap();
    let err = TOOL_REGISTRY
        .call(&state.client, "get_latest_blockhash", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Gateway(_)));
}
