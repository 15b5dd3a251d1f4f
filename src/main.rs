//! Story Weaver - 睡前故事生成与朗读服务

use std::sync::Arc;
use std::time::Duration;

use story_weaver::application::SessionManagerPort;
use story_weaver::config::{load_config, print_config, SessionConfig};
use story_weaver::infrastructure::adapters::{
    GeminiClient, GeminiClientConfig, GeminiSpeechClient, GeminiStoryClient, WavTranscoder,
};
use story_weaver::infrastructure::http::{AppState, HttpServer, ServerConfig};
use story_weaver::infrastructure::memory::InMemorySessionManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},story_weaver={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Story Weaver - bedtime stories on demand");
    print_config(&config);

    // Gemini 客户端（文本与语音共用连接池）
    let gemini_config = GeminiClientConfig::new(&config.gemini.endpoint)
        .with_timeout(config.gemini.timeout_secs);
    let gemini = GeminiClient::new(gemini_config)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini client: {}", e))?;

    let story_generator = Arc::new(GeminiStoryClient::new(
        gemini.clone(),
        &config.gemini.text_model,
    ));
    let speech_synthesizer = Arc::new(GeminiSpeechClient::new(
        gemini,
        &config.gemini.tts_model,
        Arc::new(WavTranscoder::new()),
    ));

    // 内存会话管理器 + 空闲会话回收
    let session_manager = InMemorySessionManager::new().arc();
    tokio::spawn(sweep_idle_sessions(
        session_manager.clone(),
        config.session.clone(),
    ));

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if let Some(dir) = config.server.static_dir() {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Static directory does not exist");
        }
        server_config = server_config.with_static_dir(dir);
    }
    let state = AppState::new(session_manager, story_generator, speech_synthesizer);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 定期关闭空闲超时的会话
async fn sweep_idle_sessions(manager: Arc<InMemorySessionManager>, config: SessionConfig) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs));
    // 第一次 tick 立即返回，跳过
    interval.tick().await;

    loop {
        interval.tick().await;

        let expired = manager.get_expired_sessions(config.idle_timeout_secs);
        if expired.is_empty() {
            continue;
        }

        for session_id in &expired {
            if let Err(e) = manager.close(session_id) {
                tracing::debug!(session_id = %session_id, error = %e, "Session already gone");
            }
        }
        tracing::info!(count = expired.len(), "Idle sessions closed");
    }
}
