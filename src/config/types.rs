//! Configuration Types
//!
//! 定义所有配置结构体。Gemini API Key 不属于配置：它由用户在每次请求中提供。

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::adapters::{DEFAULT_ENDPOINT, DEFAULT_TEXT_MODEL, DEFAULT_TTS_MODEL};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini 配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态页面服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态页面服务配置（根路径托管）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态页面
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 启用时返回静态目录
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.static_files
            .enabled
            .then(|| self.static_files.dir.clone())
    }
}

/// Gemini 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// 模型列表基础 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// 故事生成模型
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// 语音合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_tts_model() -> String {
    DEFAULT_TTS_MODEL.to_string()
}

fn default_gemini_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            text_model: default_text_model(),
            tts_model: default_tts_model(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 空闲多久后回收（秒）
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// 回收任务执行间隔（秒）
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_idle_timeout() -> u64 {
    3600 // 1 小时
}

fn default_sweep_interval() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
