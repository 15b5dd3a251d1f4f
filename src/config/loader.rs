//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::adapters::{DEFAULT_ENDPOINT, DEFAULT_TEXT_MODEL, DEFAULT_TTS_MODEL};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "STORY_WEAVER";

/// 加载应用配置
///
/// # 环境变量示例
/// - `STORY_WEAVER_SERVER__PORT=9000`
/// - `STORY_WEAVER_GEMINI__TEXT_MODEL=gemini-2.5-flash`
/// - `STORY_WEAVER_SESSION__IDLE_TIMEOUT_SECS=600`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时在当前目录搜索 config.toml / config.local.toml
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "web")?
        .set_default("gemini.endpoint", DEFAULT_ENDPOINT)?
        .set_default("gemini.text_model", DEFAULT_TEXT_MODEL)?
        .set_default("gemini.tts_model", DEFAULT_TTS_MODEL)?
        .set_default("gemini.timeout_secs", 120)?
        .set_default("session.idle_timeout_secs", 3600)?
        .set_default("session.sweep_interval_secs", 300)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），层级分隔符为双下划线
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let gemini = &config.gemini;
    for (name, value) in [
        ("gemini.endpoint", &gemini.endpoint),
        ("gemini.text_model", &gemini.text_model),
        ("gemini.tts_model", &gemini.tts_model),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    if gemini.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Gemini timeout cannot be 0".to_string(),
        ));
    }

    if config.session.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session sweep interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    match config.server.static_dir() {
        Some(dir) => tracing::info!("Static Files: {}", dir.display()),
        None => tracing::info!("Static Files: disabled"),
    }
    tracing::info!("Gemini Endpoint: {}", config.gemini.endpoint);
    tracing::info!("Text Model: {}", config.gemini.text_model);
    tracing::info!("TTS Model: {}", config.gemini.tts_model);
    tracing::info!("Gemini Timeout: {}s", config.gemini.timeout_secs);
    tracing::info!("Session Idle Timeout: {}s", config.session.idle_timeout_secs);
    tracing::info!("Session Sweep Interval: {}s", config.session.sweep_interval_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
