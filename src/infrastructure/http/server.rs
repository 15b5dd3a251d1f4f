//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置。`/api` 之外的路径交给静态目录（页面与脚本）。

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限：只有 JSON 表单，1MB 足够
const BODY_LIMIT: usize = 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静态页面目录，None 表示只提供 API
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub(crate) fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        let mut router = create_routes();
        if let Some(dir) = &self.config.static_dir {
            info!(dir = %dir.display(), "Serving static files");
            router = router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
        }

        router
            .layer(DefaultBodyLimit::max(BODY_LIMIT))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GenerationError, SessionManagerPort, StorySession};
    use crate::domain::story::StoryText;
    use crate::infrastructure::memory::InMemorySessionManager;
    use crate::test_support::{FakeSpeechSynthesizer, FakeStoryGenerator};
    use axum::body::{to_bytes, Body};
    use http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
        sessions: Arc<InMemorySessionManager>,
        generator: Arc<FakeStoryGenerator>,
        synthesizer: Arc<FakeSpeechSynthesizer>,
    }

    impl TestApp {
        fn with(generator: FakeStoryGenerator, synthesizer: FakeSpeechSynthesizer) -> Self {
            let sessions = Arc::new(InMemorySessionManager::new());
            let generator = Arc::new(generator);
            let synthesizer = Arc::new(synthesizer);
            let state = AppState::new(sessions.clone(), generator.clone(), synthesizer.clone());
            let router = HttpServer::new(ServerConfig::default(), state).build_router();
            Self {
                router,
                sessions,
                generator,
                synthesizer,
            }
        }

        fn new() -> Self {
            Self::with(
                FakeStoryGenerator::replying("The little owl dreamed of stars."),
                FakeSpeechSynthesizer::silent(24000, 4800),
            )
        }

        fn session(&self) -> String {
            self.sessions.create(StorySession::new()).unwrap()
        }

        async fn post(&self, uri: &str, body: Value) -> http::Response<Body> {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn post_json(&self, uri: &str, body: Value) -> Value {
            let response = self.post(uri, body).await;
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    fn generate_body(session_id: &str) -> Value {
        json!({
            "session_id": session_id,
            "api_key": "test-key",
            "characters": "a sleepy bear, a gentle firefly",
            "genre": "fantasy",
            "age_group": "child",
            "tips": ""
        })
    }

    #[tokio::test]
    async fn test_ping() {
        let app = TestApp::new();
        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_create_get_close() {
        let app = TestApp::new();

        let created = app.post_json("/api/session/create", json!({})).await;
        assert_eq!(created["errno"], 0);
        let session_id = created["data"]["session_id"].as_str().unwrap().to_string();

        let fetched = app
            .post_json("/api/session/get", json!({ "session_id": session_id }))
            .await;
        assert_eq!(fetched["errno"], 0);
        assert!(fetched["data"]["story"].is_null());
        assert_eq!(fetched["data"]["has_voice_input"], false);

        let closed = app
            .post_json("/api/session/close", json!({ "session_id": session_id }))
            .await;
        assert_eq!(closed["errno"], 0);

        let missing = app
            .post_json("/api/session/get", json!({ "session_id": session_id }))
            .await;
        assert_eq!(missing["errno"], 404);
    }

    #[tokio::test]
    async fn test_generate_story_round_trip() {
        let app = TestApp::new();
        let session_id = app.session();

        let generated = app
            .post_json("/api/story/generate", generate_body(&session_id))
            .await;
        assert_eq!(generated["errno"], 0);
        assert_eq!(
            generated["data"]["story"],
            "The little owl dreamed of stars."
        );

        let prompts = app.generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Genre: Fantasy"));
        assert!(!prompts[0].contains("Additional Tips:"));

        let fetched = app
            .post_json("/api/session/get", json!({ "session_id": session_id }))
            .await;
        assert_eq!(fetched["data"]["story"], "The little owl dreamed of stars.");
    }

    #[tokio::test]
    async fn test_generate_preconditions_return_400() {
        let app = TestApp::new();
        let session_id = app.session();

        let mut no_key = generate_body(&session_id);
        no_key["api_key"] = json!("");
        let response = app.post_json("/api/story/generate", no_key).await;
        assert_eq!(response["errno"], 400);
        assert_eq!(response["error"], "Please enter your Gemini API key");

        let mut no_characters = generate_body(&session_id);
        no_characters["characters"] = json!("   ");
        let response = app.post_json("/api/story/generate", no_characters).await;
        assert_eq!(response["errno"], 400);

        let mut bad_genre = generate_body(&session_id);
        bad_genre["genre"] = json!("horror");
        let response = app.post_json("/api/story/generate", bad_genre).await;
        assert_eq!(response["errno"], 400);

        assert!(app.generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_generate_missing_choices_return_400() {
        let app = TestApp::new();
        let session_id = app.session();

        for field in ["genre", "age_group"] {
            let mut body = generate_body(&session_id);
            body.as_object_mut().unwrap().remove(field);
            let response = app.post_json("/api/story/generate", body).await;
            assert_eq!(response["errno"], 400, "missing {}", field);
        }

        assert!(app.generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_generate_transport_failure_returns_503() {
        let app = TestApp::with(
            FakeStoryGenerator::failing(|| GenerationError::Transport("HTTP 500".into())),
            FakeSpeechSynthesizer::silent(24000, 0),
        );
        let session_id = app.session();

        let response = app
            .post_json("/api/story/generate", generate_body(&session_id))
            .await;
        assert_eq!(response["errno"], 503);
        assert!(response["error"]
            .as_str()
            .unwrap()
            .starts_with("Error generating story"));
    }

    #[tokio::test]
    async fn test_speak_returns_wav() {
        let app = TestApp::new();
        let session_id = app.session();
        app.sessions
            .store_story(&session_id, StoryText::new("Goodnight.").unwrap())
            .unwrap();

        let response = app
            .post(
                "/api/story/speak",
                json!({ "session_id": session_id, "api_key": "test-key" }),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "audio/wav");
        assert_eq!(headers["x-audio-sample-rate"], "24000");
        assert_eq!(headers["x-audio-duration-ms"], "100");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.len(), 44 + 4800);
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_speak_without_story_is_precondition() {
        let app = TestApp::new();
        let session_id = app.session();

        let response = app
            .post_json(
                "/api/story/speak",
                json!({ "session_id": session_id, "api_key": "test-key" }),
            )
            .await;
        assert_eq!(response["errno"], 400);
        assert_eq!(app.synthesizer.calls(), 0);
    }

    #[tokio::test]
    async fn test_voice_submit_then_take_once() {
        let app = TestApp::new();
        let session_id = app.session();

        let submitted = app
            .post_json(
                "/api/voice/submit",
                json!({ "session_id": session_id, "transcript": " a dragon and a kitten " }),
            )
            .await;
        assert_eq!(submitted["errno"], 0);

        let taken = app
            .post_json("/api/voice/take", json!({ "session_id": session_id }))
            .await;
        assert_eq!(taken["data"]["transcript"], "a dragon and a kitten");

        let again = app
            .post_json("/api/voice/take", json!({ "session_id": session_id }))
            .await;
        assert!(again["data"]["transcript"].is_null());
        assert!(again["data"]["error"].is_null());
    }

    #[tokio::test]
    async fn test_voice_error_is_reported() {
        let app = TestApp::new();
        let session_id = app.session();

        app.post_json(
            "/api/voice/submit",
            json!({ "session_id": session_id, "error": "no-speech" }),
        )
        .await;
        let taken = app
            .post_json("/api/voice/take", json!({ "session_id": session_id }))
            .await;
        assert_eq!(taken["data"]["error"], "Speech recognition error: no-speech");

        let empty = app
            .post_json("/api/voice/submit", json!({ "session_id": session_id }))
            .await;
        assert_eq!(empty["errno"], 400);
    }

    #[tokio::test]
    async fn test_static_dir_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Story Weaver</h1>").unwrap();

        let sessions = Arc::new(InMemorySessionManager::new());
        let state = AppState::new(
            sessions,
            Arc::new(FakeStoryGenerator::replying("unused")),
            Arc::new(FakeSpeechSynthesizer::silent(24000, 0)),
        );
        let config = ServerConfig::default().with_static_dir(dir.path());
        let router = HttpServer::new(config, state).build_router();

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Story Weaver</h1>");
    }
}
