//! End-to-end conversation flows: reducer + HTTP client against a mock service.

use paddock::core::action::{
    ANALYZE_TRANSPORT_ERROR, Action, CHAT_REQUEST_ERROR, Effect, update,
};
use paddock::core::message_log::{LogEntry, Role};
use paddock::core::state::{App, Phase, RaceTarget};
use paddock::service::{HttpServiceClient, perform};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn new_app() -> App {
    App::new(RaceTarget {
        event_id: "FEB-S-2024".to_string(),
        target_date: "2024-02-03".to_string(),
        name: "February Stakes".to_string(),
    })
}

/// Runs a spawn effect to completion and feeds the result back into `update`.
async fn drive(app: &mut App, effect: Effect, client: &HttpServiceClient) -> Effect {
    match effect {
        Effect::Spawn(request) => {
            assert!(app.log.is_typing(), "typing indicator shown before request");
            let action = perform(client, request).await;
            update(app, action)
        }
        other => other,
    }
}

fn bodies(app: &App) -> Vec<(Role, String)> {
    app.log
        .messages()
        .map(|m| (m.role, m.body.clone()))
        .collect()
}

async fn mount_analyze_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "abc123",
            "data": {
                "race_event_id": "FEB-S-2024",
                "ai_reasoning": "Thunder Bay fits.",
                "horse_results": [
                    { "predicted_rank": 1, "name": "Thunder Bay", "score": 87.5,
                      "matched_conditions": [
                        { "name": "Dirt 1600m", "median_rate": 0.42, "n_top3": 5, "n_all": 12 }
                      ] }
                ]
            }
        })))
        .mount(server)
        .await;
}

async fn analyzed_app(client: &HttpServiceClient) -> App {
    let mut app = new_app();
    let effect = update(&mut app, Action::AnalyzeRequested);
    drive(&mut app, effect, client).await;
    assert_eq!(app.phase(), Phase::Chatting);
    app
}

// ============================================================================
// Analyze
// ============================================================================

#[tokio::test]
async fn test_analyze_success_opens_chat() {
    let mock_server = MockServer::start().await;
    mount_analyze_success(&mock_server).await;
    let client = HttpServiceClient::new(format!("{}/api", mock_server.uri()));

    let app = analyzed_app(&client).await;

    assert_eq!(app.session_id.as_deref(), Some("abc123"));
    assert!(app.input_enabled);
    assert!(!app.analyze_enabled);
    assert!(!app.log.is_typing());

    let messages = bodies(&app);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].0, Role::User);
    assert_eq!(messages[1].0, Role::Ai);
    assert!(messages[1].1.contains("**#1 Thunder Bay** · Score: 87.5"));
    assert!(messages[1].1.contains("win rate 42% · record 5/12"));
}

#[tokio::test]
async fn test_analyze_failure_shows_detail_and_allows_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "no data" })))
        .mount(&mock_server)
        .await;
    let client = HttpServiceClient::new(format!("{}/api", mock_server.uri()));

    let mut app = new_app();
    let effect = update(&mut app, Action::AnalyzeRequested);
    drive(&mut app, effect, &client).await;

    assert_eq!(
        bodies(&app).last(),
        Some(&(Role::System, "⚠️ An error occurred: no data".to_string()))
    );
    assert!(app.analyze_enabled);
    assert!(!app.input_enabled);
    assert!(app.session_id.is_none());
    assert!(!app.log.entries().contains(&LogEntry::Typing));
}

#[tokio::test]
async fn test_analyze_unreachable_service() {
    let client = HttpServiceClient::new("http://127.0.0.1:1/api");

    let mut app = new_app();
    let effect = update(&mut app, Action::AnalyzeRequested);
    drive(&mut app, effect, &client).await;

    assert_eq!(
        bodies(&app).last(),
        Some(&(Role::System, ANALYZE_TRANSPORT_ERROR.to_string()))
    );
    assert!(app.analyze_enabled);
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_round_trip_sends_trimmed_message() {
    let mock_server = MockServer::start().await;
    mount_analyze_success(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "session_id": "abc123", "message": "Why Thunder Bay?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Strong dirt record.",
            "history": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = HttpServiceClient::new(format!("{}/api", mock_server.uri()));
    let mut app = analyzed_app(&client).await;

    update(&mut app, Action::DraftChanged("  Why Thunder Bay?  ".into()));
    assert!(app.send_enabled());
    let effect = update(&mut app, Action::ChatSubmitted("  Why Thunder Bay?  ".into()));
    assert!(!app.input_enabled);
    assert!(app.draft.is_empty());

    let effect = drive(&mut app, effect, &client).await;

    assert_eq!(effect, Effect::FocusInput);
    assert!(app.input_enabled);
    let messages = bodies(&app);
    let tail = &messages[messages.len() - 2..];
    assert_eq!(tail[0], (Role::User, "Why Thunder Bay?".to_string()));
    assert_eq!(tail[1], (Role::Ai, "Strong dirt record.".to_string()));
}

#[tokio::test]
async fn test_chat_failure_re_enables_input() {
    let mock_server = MockServer::start().await;
    mount_analyze_success(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let client = HttpServiceClient::new(format!("{}/api", mock_server.uri()));
    let mut app = analyzed_app(&client).await;

    let effect = update(&mut app, Action::ChatSubmitted("hello".into()));
    let effect = drive(&mut app, effect, &client).await;

    assert_eq!(effect, Effect::FocusInput);
    assert!(app.input_enabled);
    assert_eq!(
        bodies(&app).last(),
        Some(&(Role::System, CHAT_REQUEST_ERROR.to_string()))
    );
}

#[tokio::test]
async fn test_chat_without_session_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = new_app();
    let effect = update(&mut app, Action::ChatSubmitted("hello".into()));

    assert_eq!(effect, Effect::None);
    assert!(app.log.is_empty());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_whitespace_only_message_is_not_sent() {
    let mock_server = MockServer::start().await;
    mount_analyze_success(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = HttpServiceClient::new(format!("{}/api", mock_server.uri()));
    let mut app = analyzed_app(&client).await;
    let before = app.log.len();

    update(&mut app, Action::DraftChanged(" \n ".into()));
    assert!(!app.send_enabled());
    let effect = update(&mut app, Action::ChatSubmitted(" \n ".into()));

    assert_eq!(effect, Effect::None);
    assert_eq!(app.log.len(), before);
    assert!(app.input_enabled);
}
