use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// Studysheet Composer - 将博客或教程链接浓缩为一页学习笔记的网页工具
#[derive(Parser, Debug)]
#[command(name = "Studysheet Composer")]
#[command(
    about = "A small web tool that transforms blog or tutorial links into concise, one-page markdown study sheets with the help of a hosted LLM."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 监听地址
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 会话空闲过期时间（分钟）
    #[arg(long)]
    pub session_idle_minutes: Option<u64>,

    /// LLM Provider (openai, deepseek, openrouter, anthropic)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 生成学习笔记所用的模型
    #[arg(short, long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 调用模型的超时时间（秒）
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// 下载文件名
    #[arg(long)]
    pub download_file_name: Option<String>,

    /// 是否启用详细日志（debug级别）
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定了配置文件路径，读取失败直接报错
            Config::from_file(config_path)?
        } else {
            // 尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                Config::default()
            }
        };

        // 覆盖服务配置
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(session_idle_minutes) = self.session_idle_minutes {
            config.server.session_idle_minutes = session_idle_minutes;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                warn!(
                    "⚠️ 未知的provider: {}，使用 {}",
                    provider_str, config.llm.provider
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = Some(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = Some(temperature);
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.llm.timeout_seconds = Some(timeout_seconds);
        }

        // 其他配置
        if let Some(download_file_name) = self.download_file_name {
            config.download_file_name = download_file_name;
        }

        Ok(config)
    }
}
