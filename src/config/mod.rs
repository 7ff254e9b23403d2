use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::session::DEFAULT_SESSION_IDLE_MINUTES;

/// 默认配置文件名，位于当前工作目录
pub const DEFAULT_CONFIG_FILE: &str = "studysheet.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
///
/// API KEY 不属于配置的一部分，只能由用户在页面侧边栏中粘贴，并仅保存在会话内存中。
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 下载学习笔记时使用的文件名
    pub download_file_name: String,

    /// HTTP服务配置
    pub server: ServerConfig,

    /// LLM模型配置
    pub llm: LLMConfig,
}

/// HTTP服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,

    /// 监听端口
    pub port: u16,

    /// 会话空闲多少分钟后失效
    pub session_idle_minutes: u64,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API基地址，仅对OpenAI兼容的provider生效
    pub api_base_url: String,

    /// 生成学习笔记所用的模型
    pub model: String,

    /// 最大tokens，不设置时由服务端决定
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// 温度，部分推理模型不支持该参数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// 超时时间（秒），不设置时一直等待模型返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 解析监听地址
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .context(format!(
                "Invalid listen address: {}:{}",
                self.server.host, self.server.port
            ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_file_name: String::from("study_sheet.md"),
            server: ServerConfig::default(),
            llm: LLMConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8501,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("o3-mini"),
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
