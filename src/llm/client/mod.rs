//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Result, anyhow};
use std::time::Duration;
use tracing::debug;

use crate::config::LLMConfig;

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 提供统一的LLM服务接口
///
/// 客户端本身不持有API KEY：每次调用都使用调用方会话中的凭据临时创建provider客户端。
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Self {
        Self { config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// 单轮对话，不使用工具，失败时不重试
    pub async fn prompt(
        &self,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let client = ProviderClient::new(&self.config, api_key)?;
        let agent = client.create_agent(&self.config.model, system_prompt, &self.config);

        debug!(
            "📨 调用模型 {} ({})，system prompt {} 字节，user prompt {} 字节",
            self.config.model,
            self.config.provider,
            system_prompt.len(),
            user_prompt.len()
        );

        match self.config.timeout_seconds {
            Some(seconds) => {
                tokio::time::timeout(Duration::from_secs(seconds), agent.prompt(user_prompt))
                    .await
                    .map_err(|_| anyhow!("LLM request timed out after {}s", seconds))?
            }
            None => agent.prompt(user_prompt).await,
        }
    }
}
