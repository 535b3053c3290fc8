//! Integration tests for the game API console.
//!
//! These tests drive the reqwest transport against local httpmock servers,
//! so they need loopback networking but no running backend.

use std::time::Duration;

use game_api_console::console::{ConsoleController, ResponseView, StatusIndicator, TriggerState};
use game_api_console::export::export_last_response;
use game_api_console::health::{check_health, Connectivity, ConnectivityPoller, PollSettings};
use game_api_console::registry::EndpointRegistry;
use game_api_console::transport::{endpoint_url, HttpTransport};
use httpmock::prelude::*;
use serde_json::json;
use url::Url;

fn console_for(server: &MockServer) -> ConsoleController<'static, HttpTransport> {
    let base = Url::parse(&server.base_url()).unwrap();
    ConsoleController::new(
        EndpointRegistry::builtin(),
        base,
        HttpTransport::new().unwrap(),
    )
}

/// Search sends the title as a query parameter and renders the JSON.
#[tokio::test]
async fn test_search_renders_response() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/games/search")
                .query_param("title", "Minecraft");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "title": "Minecraft", "genres": ["Sandbox"] }));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "search").unwrap();
    state.set_param("title", "Minecraft").unwrap();

    console.send_request(&mut state).await.unwrap();

    search.assert_async().await;
    assert_eq!(state.status(), StatusIndicator::Http(200));
    assert_eq!(
        state.last_response(),
        Some(&json!({ "title": "Minecraft", "genres": ["Sandbox"] }))
    );
    assert!(state.elapsed_ms().is_some());
    assert_eq!(state.trigger(), TriggerState::Ready);
}

/// Write endpoints still carry their parameters in the query string.
#[tokio::test]
async fn test_wishlist_remove_uses_query_string() {
    let server = MockServer::start_async().await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/games/wishlist")
                .query_param("title", "Hollow Knight");
            then.status(200).json_body(json!({
                "message": "Removed from wishlist",
                "success": true
            }));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "wishlist-remove").unwrap();
    state.set_param("title", "Hollow Knight").unwrap();

    console.send_request(&mut state).await.unwrap();

    remove.assert_async().await;
    assert_eq!(state.status(), StatusIndicator::Http(200));
}

/// Body endpoints send compact JSON with the JSON content type.
#[tokio::test]
async fn test_game_create_sends_json_body() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/games")
                .header("content-type", "application/json")
                .json_body(json!({ "title": "Celeste", "price": "$20" }));
            then.status(201).json_body(json!({
                "message": "Game created successfully",
                "status": "success"
            }));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "game-create").unwrap();
    state
        .set_body("{\n  \"title\": \"Celeste\",\n  \"price\": \"$20\"\n}")
        .unwrap();

    console.send_request(&mut state).await.unwrap();

    create.assert_async().await;
    assert_eq!(state.status(), StatusIndicator::Http(201));
}

/// A 404 is rendered as an error with the status code.
#[tokio::test]
async fn test_not_found_is_rendered_as_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/games");
            then.status(404).json_body(json!({ "error": "Endpoint not found" }));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();

    console.send_request(&mut state).await.unwrap();

    match state.response() {
        ResponseView::Error { message } => assert!(message.contains("404"), "{message}"),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(state.status(), StatusIndicator::Error);
    assert_eq!(state.trigger(), TriggerState::Ready);
}

/// Non-JSON bodies are reported as decoding errors.
#[tokio::test]
async fn test_html_response_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/games/discounts");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "discounts").unwrap();

    console.send_request(&mut state).await.unwrap();

    match state.response() {
        ResponseView::Error { message } => {
            assert!(message.starts_with("Request failed: Invalid JSON response:"), "{message}")
        }
        other => panic!("expected error, got {other:?}"),
    }
}

/// Validation failures never reach the server.
#[tokio::test]
async fn test_missing_parameter_sends_nothing() {
    let server = MockServer::start_async().await;
    let genre = server
        .mock_async(|when, then| {
            when.path("/api/games/genre");
            then.status(200).json_body(json!([]));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "genre").unwrap();

    console.send_request(&mut state).await.unwrap();

    assert_eq!(genre.hits_async().await, 0);
    assert_eq!(
        state.response(),
        &ResponseView::Error {
            message: "Parameter \"genre\" is required".to_string()
        }
    );
}

/// Health checks classify success, error status and refusal.
#[tokio::test]
async fn test_health_check_outcomes() {
    let server = MockServer::start_async().await;
    let mut healthy = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let transport = HttpTransport::new().unwrap();
    let base = Url::parse(&server.base_url()).unwrap();
    let url = endpoint_url(&base, "/api/health");
    let timeout = Duration::from_secs(3);

    assert_eq!(check_health(&transport, &url, timeout).await, Connectivity::Online);

    healthy.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(500);
        })
        .await;
    assert_eq!(check_health(&transport, &url, timeout).await, Connectivity::ServerError);

    let refused = Url::parse("http://127.0.0.1:9/api/health").unwrap();
    assert_eq!(check_health(&transport, &refused, timeout).await, Connectivity::Offline);
}

/// The poller keeps checking on its interval.
#[tokio::test]
async fn test_poller_reschedules() {
    let server = MockServer::start_async().await;
    let health = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let base = Url::parse(&server.base_url()).unwrap();
    let poller = ConnectivityPoller::spawn(
        HttpTransport::new().unwrap(),
        endpoint_url(&base, "/api/health"),
        PollSettings {
            interval: Duration::from_millis(50),
            timeout: Duration::from_secs(1),
        },
    );
    let mut updates = poller.subscribe();

    let snapshot = tokio::time::timeout(
        Duration::from_secs(5),
        updates.wait_for(|s| s.checks_completed >= 2),
    )
    .await
    .expect("poller did not reschedule")
    .unwrap()
    .clone();

    assert_eq!(snapshot.connectivity, Connectivity::Online);
    assert!(health.hits_async().await >= 2);
    poller.shutdown();
}

/// Fetching the request log and exporting it writes pretty JSON.
#[tokio::test]
async fn test_export_logs() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/__logs");
            then.status(200).json_body(json!({
                "logs": [{ "method": "GET", "path": "/api/games", "status": 200, "latency_ms": 3 }],
                "count": 1
            }));
        })
        .await;

    let console = console_for(&server);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "logs").unwrap();
    console.send_request(&mut state).await.unwrap();

    let dir = std::env::temp_dir().join(format!("game_api_console_it_{}", std::process::id()));
    let path = export_last_response(&state, None, &dir).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("exported_logs_") && name.ends_with(".json"), "{name}");
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["count"], 1);

    std::fs::remove_dir_all(dir).unwrap();
}

/// A stalled backend fails the send once the request timeout elapses.
#[tokio::test]
async fn test_stalled_backend_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/games/wishlist");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!([]));
        })
        .await;

    let console = ConsoleController::new(
        EndpointRegistry::builtin(),
        Url::parse(&server.base_url()).unwrap(),
        HttpTransport::with_timeout(Duration::from_millis(200)).unwrap(),
    );
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, "wishlist").unwrap();

    console.send_request(&mut state).await.unwrap();

    assert_eq!(
        state.response(),
        &ResponseView::Error {
            message: "Request failed: request timed out after 200ms".to_string()
        }
    );
    assert_eq!(state.trigger(), TriggerState::Ready);
}
