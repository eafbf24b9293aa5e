use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<StoryRequest>>>>,
}

async fn handle_story(
    State(state): State<ServerState>,
    Json(payload): Json<StoryRequest>,
) -> Json<serde_json::Value> {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    Json(serde_json::json!({
        "story": "You see a cave.",
        "choices": ["Enter", "Leave", "Wait"],
    }))
}

async fn handle_rejected() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "No input provided" })),
    )
}

async fn handle_broken() -> &'static str {
    "Story: a scene without any json"
}

async fn spawn_story_server() -> anyhow::Result<(String, oneshot::Receiver<StoryRequest>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/story", post(handle_story))
        .route("/rejecting/story", post(handle_rejected))
        .route("/broken/story", post(handle_broken))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn request(choice: &str, addon: &str) -> StoryRequest {
    StoryRequest {
        choice: choice.to_string(),
        addon: addon.to_string(),
    }
}

#[test]
fn endpoint_joins_story_route() {
    assert_eq!(
        story_endpoint("http://localhost:5000").expect("url").as_str(),
        "http://localhost:5000/story"
    );
    assert_eq!(
        story_endpoint("http://localhost:5000/").expect("url").as_str(),
        "http://localhost:5000/story"
    );
}

#[test]
fn endpoint_keeps_path_prefix() {
    assert_eq!(
        story_endpoint("https://games.example/api").expect("url").as_str(),
        "https://games.example/api/story"
    );
}

#[test]
fn endpoint_rejects_garbage() {
    assert!(story_endpoint("not a url").is_err());
}

#[tokio::test]
async fn posts_choice_and_addon_as_json() {
    let (server_url, payload_rx) = spawn_story_server().await.expect("spawn server");
    let backend = HttpStoryBackend::new(&server_url).expect("backend");

    let response = backend
        .continue_story(&request("", "go north"))
        .await
        .expect("story");

    let payload = payload_rx.await.expect("payload");
    assert_eq!(payload, request("", "go north"));
    assert_eq!(response.story, "You see a cave.");
    assert_eq!(
        response.new_choices().expect("choices"),
        ["Enter", "Leave", "Wait"]
    );
}

#[tokio::test]
async fn non_success_status_surfaces_backend_message() {
    let (server_url, _payload_rx) = spawn_story_server().await.expect("spawn server");
    let backend =
        HttpStoryBackend::new(&format!("{server_url}/rejecting")).expect("backend");

    let err = backend
        .continue_story(&request("", ""))
        .await
        .expect_err("must fail");
    match err {
        SubmissionFailure::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(message, "No input provided");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unknown_route_reports_status() {
    let (server_url, _payload_rx) = spawn_story_server().await.expect("spawn server");
    let backend = HttpStoryBackend::new(&format!("{server_url}/missing")).expect("backend");

    let err = backend
        .continue_story(&request("Fight", ""))
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        SubmissionFailure::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            ..
        }
    ));
}

#[tokio::test]
async fn non_json_body_is_malformed_payload() {
    let (server_url, _payload_rx) = spawn_story_server().await.expect("spawn server");
    let backend = HttpStoryBackend::new(&format!("{server_url}/broken")).expect("backend");

    let err = backend
        .continue_story(&request("Fight", ""))
        .await
        .expect_err("must fail");
    assert!(matches!(err, SubmissionFailure::MalformedPayload(_)));
}

#[tokio::test]
async fn closed_port_is_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = HttpStoryBackend::new(&format!("http://{addr}")).expect("backend");
    let err = backend
        .continue_story(&request("Fight", ""))
        .await
        .expect_err("must fail");
    assert!(matches!(err, SubmissionFailure::Transport(_)));
}
