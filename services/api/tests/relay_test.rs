use api_lib::{
    config::Config,
    web::{self, state::AppState, LEGACY_GENERATE_PATH},
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use nosleep_client::{HttpStoryBridge, StoryRelayService};
use nosleep_core::{
    ports::{PortError, PortResult, StoryGenerationService},
    GenerationPrompt, GenerationRequest, Motif, ReadLength,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;

//=========================================================================================
// Test Doubles
//=========================================================================================

#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<GenerationPrompt>>,
    fail_with: Option<String>,
}

impl RecordingGenerator {
    fn failing(message: &str) -> Self {
        Self {
            prompts: Mutex::default(),
            fail_with: Some(message.to_string()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> GenerationPrompt {
        self.prompts.lock().unwrap().last().cloned().expect("no prompt recorded")
    }
}

#[async_trait]
impl StoryGenerationService for RecordingGenerator {
    async fn generate_story(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.fail_with {
            Some(message) => Err(PortError::Upstream(message.clone())),
            None => Ok("It was 3:14 AM when the knocking started.".to_string()),
        }
    }
}

fn config(vars: &[(&str, &str)]) -> Arc<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(Config::from_lookup(|name| vars.get(name).cloned()).unwrap())
}

fn app_with(generator: Arc<RecordingGenerator>) -> Router {
    let generator: Arc<dyn StoryGenerationService> = generator;
    let state = AppState::new(config(&[("ANTHROPIC_API_KEY", "test-key")]), Some(generator));
    web::router(Arc::new(state))
}

fn app_without_credential() -> Router {
    web::router(Arc::new(AppState::new(config(&[]), None)))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post(app: Router, body: &str) -> Response {
    send(app, Method::POST, "/generate", body).await
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn assert_relay_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

//=========================================================================================
// Method Handling
//=========================================================================================

#[tokio::test]
async fn preflight_is_no_content_with_cors_headers() {
    let generator = Arc::new(RecordingGenerator::default());
    let response = send(
        app_with(generator.clone()),
        Method::OPTIONS,
        "/generate",
        r#"{"motif":"Wendigos"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_relay_headers(&response);
    assert_eq!(body_text(response).await, "");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn preflight_succeeds_without_credential() {
    let response = send(app_without_credential(), Method::OPTIONS, "/generate", "").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(
            app_with(Arc::new(RecordingGenerator::default())),
            method.clone(),
            "/generate",
            "",
        )
        .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_relay_headers(&response);
        assert_eq!(body_json(response).await, json!({ "error": "Method not allowed" }));
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn rejected_method_is_logged() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let response = send(
        app_with(Arc::new(RecordingGenerator::default())),
        Method::GET,
        "/generate",
        "",
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let text = logs.text();
    assert!(text.contains("WARN"), "{text}");
    assert!(text.contains("Rejected generate request: Method not allowed"), "{text}");
}

//=========================================================================================
// Request Validation
//=========================================================================================

#[tokio::test]
async fn unparsable_body_is_bad_request() {
    let generator = Arc::new(RecordingGenerator::default());
    let response = post(app_with(generator.clone()), "{\"motif\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_relay_headers(&response);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid JSON in request body" })
    );
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn missing_parameters_are_bad_request() {
    for body in [
        r#"{"motif":"Wendigos"}"#,
        r#"{"readLength":"short"}"#,
        r#"{"motif":"","readLength":"short"}"#,
        "",
    ] {
        let generator = Arc::new(RecordingGenerator::default());
        let response = post(app_with(generator.clone()), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing required parameters" })
        );
        assert_eq!(generator.calls(), 0);
    }
}

#[tokio::test]
async fn missing_credential_is_internal_error_before_body_checks() {
    for body in [
        r#"{"motif":"Wendigos","readLength":"short"}"#,
        "not json",
    ] {
        let response = post(app_without_credential(), body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_relay_headers(&response);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "ANTHROPIC_API_KEY environment variable is not set" })
        );
    }
}

fn oversized_body() -> String {
    let motif = "a".repeat(70 * 1024);
    json!({ "motif": motif, "readLength": "short" }).to_string()
}

#[tokio::test]
async fn oversized_body_is_rejected_with_its_own_status() {
    let generator = Arc::new(RecordingGenerator::default());
    let response = post(app_with(generator.clone()), &oversized_body()).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_relay_headers(&response);
    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(body.get("details").is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn missing_credential_wins_over_oversized_body() {
    let response = post(app_without_credential(), &oversized_body()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_relay_headers(&response);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "ANTHROPIC_API_KEY environment variable is not set" })
    );
}

//=========================================================================================
// Generation
//=========================================================================================

#[tokio::test]
async fn short_request_generates_story() {
    let generator = Arc::new(RecordingGenerator::default());
    let response = post(
        app_with(generator.clone()),
        r#"{"motif":"Skinwalkers","readLength":"short"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_relay_headers(&response);
    assert_eq!(
        body_json(response).await,
        json!({ "story": "It was 3:14 AM when the knocking started." })
    );

    assert_eq!(generator.calls(), 1);
    let prompt = generator.last_prompt();
    assert!(prompt.user.contains("1. Theme/Motif: Skinwalkers"));
    assert!(prompt.user.contains("Word count: 1000-2000 words"));
    assert_eq!(prompt.max_tokens, 2500);
    assert_eq!(prompt.temperature, 0.8);
}

#[tokio::test]
async fn anything_but_short_uses_long_band() {
    for read_length in ["long", "epic", "Short"] {
        let generator = Arc::new(RecordingGenerator::default());
        let body = json!({ "motif": "Backrooms", "readLength": read_length }).to_string();
        let response = post(app_with(generator.clone()), &body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let prompt = generator.last_prompt();
        assert!(prompt.user.contains("Word count: 3000-5000 words"), "{read_length}");
        assert_eq!(prompt.max_tokens, 7000, "{read_length}");
    }
}

#[tokio::test]
async fn surprise_me_is_replaced_by_placeholder() {
    let generator = Arc::new(RecordingGenerator::default());
    post(
        app_with(generator.clone()),
        r#"{"motif":"Surprise Me","readLength":"long"}"#,
    )
    .await;

    let prompt = generator.last_prompt();
    assert!(prompt.user.contains("[random horror element]"));
    assert!(!prompt.user.contains("Surprise Me"));
}

#[tokio::test]
async fn provider_failure_is_internal_error_without_details() {
    let generator = Arc::new(RecordingGenerator::failing("Overloaded"));
    let response = post(
        app_with(generator.clone()),
        r#"{"motif":"Demons","readLength":"short"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_relay_headers(&response);
    assert_eq!(body_json(response).await, json!({ "error": "Overloaded" }));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn development_exposes_error_details() {
    let generator: Arc<dyn StoryGenerationService> =
        Arc::new(RecordingGenerator::failing("Overloaded"));
    let state = AppState::new(
        config(&[("ANTHROPIC_API_KEY", "test-key"), ("APP_ENV", "development")]),
        Some(generator),
    );
    let response = post(
        web::router(Arc::new(state)),
        r#"{"motif":"Demons","readLength":"short"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Overloaded");
    assert!(body["details"].as_str().unwrap().contains("Overloaded"));
}

#[tokio::test]
async fn legacy_path_behaves_like_generate() {
    let generator = Arc::new(RecordingGenerator::default());
    let response = send(
        app_with(generator.clone()),
        Method::POST,
        LEGACY_GENERATE_PATH,
        r#"{"motif":"Time Loops","readLength":"short"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.calls(), 1);

    let response = send(
        app_with(generator.clone()),
        Method::GET,
        LEGACY_GENERATE_PATH,
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn motifs_are_listed_random_first() {
    let response = send(
        app_with(Arc::new(RecordingGenerator::default())),
        Method::GET,
        "/motifs",
        "",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_relay_headers(&response);
    let body = body_json(response).await;
    assert_eq!(body["categories"][0]["name"], "Random");
    assert_eq!(body["categories"][0]["motifs"][0]["name"], "Surprise Me");
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
}

//=========================================================================================
// Client Bridge Against a Live Relay
//=========================================================================================

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}

#[tokio::test]
async fn bridge_returns_story_from_relay() {
    let generator = Arc::new(RecordingGenerator::default());
    let base_url = serve(app_with(generator.clone())).await;
    let bridge = HttpStoryBridge::for_base_url(&base_url);

    let story = bridge
        .request_story(&GenerationRequest::new(
            Motif::new("Found Footage"),
            ReadLength::Long,
        ))
        .await
        .unwrap();

    assert_eq!(story, "It was 3:14 AM when the knocking started.");
    assert_eq!(generator.last_prompt().max_tokens, 7000);
}

#[tokio::test]
async fn bridge_surfaces_relay_error_message() {
    let base_url = serve(app_without_credential()).await;
    let bridge = HttpStoryBridge::for_base_url(&base_url);

    let err = bridge
        .request_story(&GenerationRequest::new(
            Motif::new("Found Footage"),
            ReadLength::Short,
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "ANTHROPIC_API_KEY environment variable is not set"
    );
}
