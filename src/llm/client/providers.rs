//! LLM Provider支持模块

use anyhow::Result;
use rig::{agent::Agent, client::CompletionClient, completion::Prompt};

use crate::config::{LLMConfig, LLMProvider};

/// Anthropic接口要求显式的max_tokens
const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 8192;

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
}

impl ProviderClient {
    /// 根据配置与会话中的API KEY创建相应的provider客户端
    pub fn new(config: &LLMConfig, api_key: &str) -> Result<Self> {
        match config.provider {
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::DeepSeek => {
                let client = rig::providers::deepseek::Client::builder(api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::DeepSeek(client))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client = rig::providers::anthropic::ClientBuilder::new(api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
        }
    }

    /// 创建不带工具的Agent
    pub fn create_agent(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
    ) -> ProviderAgent {
        match self {
            ProviderClient::OpenAI(client) => {
                let mut builder = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt);
                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens.into());
                }
                if let Some(temperature) = config.temperature {
                    builder = builder.temperature(temperature);
                }
                ProviderAgent::OpenAI(builder.build())
            }
            ProviderClient::DeepSeek(client) => {
                let mut builder = client.agent(model).preamble(system_prompt);
                if let Some(max_tokens) = config.max_tokens {
                    builder = builder.max_tokens(max_tokens.into());
                }
                if let Some(temperature) = config.temperature {
                    builder = builder.temperature(temperature);
                }
                ProviderAgent::DeepSeek(builder.build())
            }
            ProviderClient::OpenRouter(client) => {
                let mut builder = client.agent(model).preamble(system_prompt);
                if let Some(temperature) = config.temperature {
                    builder = builder.temperature(temperature);
                }
                ProviderAgent::OpenRouter(builder.build())
            }
            ProviderClient::Anthropic(client) => {
                let max_tokens = config.max_tokens.unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS);
                let mut builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens.into());
                if let Some(temperature) = config.temperature {
                    builder = builder.temperature(temperature);
                }
                ProviderAgent::Anthropic(builder.build())
            }
        }
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }
}
