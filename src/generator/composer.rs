use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use tracing::info;

use crate::generator::prompt::{build_system_prompt, build_user_prompt};
use crate::generator::types::StudySheetPreferences;
use crate::llm::client::LLMClient;

/// 学习笔记生成器
///
/// 返回模型输出的原始文本，不做解析、校验、重试或清洗。
#[async_trait]
pub trait StudySheetComposer: Send + Sync {
    async fn compose(&self, api_key: &str, preferences: &StudySheetPreferences)
    -> Result<String>;
}

/// 基于LLM的学习笔记生成器，每次调用恰好发起一次模型请求
#[derive(Clone)]
pub struct LLMStudySheetComposer {
    llm_client: LLMClient,
}

impl LLMStudySheetComposer {
    pub fn new(llm_client: LLMClient) -> Self {
        Self { llm_client }
    }
}

#[async_trait]
impl StudySheetComposer for LLMStudySheetComposer {
    async fn compose(
        &self,
        api_key: &str,
        preferences: &StudySheetPreferences,
    ) -> Result<String> {
        let system_prompt = build_system_prompt(Local::now());
        let user_prompt = build_user_prompt(preferences);

        info!(
            "📝 正在生成学习笔记: {} (focus: {}, tone: {}, model: {})",
            preferences.blog_link,
            preferences.focus,
            preferences.tone,
            self.llm_client.model()
        );

        let study_sheet = self
            .llm_client
            .prompt(api_key, &system_prompt, &user_prompt)
            .await?;

        info!("✅ 学习笔记生成完成，共 {} 字节", study_sheet.len());
        Ok(study_sheet)
    }
}
