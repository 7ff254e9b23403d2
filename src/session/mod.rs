//! 会话状态 - 每个浏览器会话独立保存凭据、表单偏好与最近一次生成的学习笔记

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::generator::{Focus, StudySheetComposer, StudySheetPreferences, Tone};

/// 生成前的表单校验错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("Please provide your OpenAI API key in the sidebar.")]
    MissingApiKey,
    #[error("Please paste a blog or tutorial URL.")]
    MissingUrl,
}

/// 仅保存在内存中的API KEY，Debug输出时隐藏内容
#[derive(Clone, PartialEq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// 会话默认的空闲过期时间（分钟）
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 120;

/// 单个会话的状态
#[derive(Debug, Clone)]
pub struct Session {
    credential: Option<Credential>,
    /// 最近一次提交的表单偏好，用于回显
    pub preferences: StudySheetPreferences,
    /// 最近一次成功生成的学习笔记
    pub study_sheet: Option<String>,
    last_seen: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            credential: None,
            preferences: StudySheetPreferences::default(),
            study_sheet: None,
            last_seen: Utc::now(),
        }
    }
}

/// 通过校验、可以发起生成的请求
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub credential: Credential,
    pub preferences: StudySheetPreferences,
}

impl Session {
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    fn is_idle(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now.signed_duration_since(self.last_seen) > idle_timeout
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// 非空时更新API KEY，返回是否发生了更新
    pub fn update_credential(&mut self, api_key: &str) -> bool {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return false;
        }
        self.credential = Some(Credential(api_key.to_string()));
        true
    }

    /// 先检查凭据，再检查链接
    pub fn validate(&self) -> Result<PendingGeneration, FormError> {
        let credential = self.credential.clone().ok_or(FormError::MissingApiKey)?;
        if self.preferences.blog_link.is_empty() {
            return Err(FormError::MissingUrl);
        }
        Ok(PendingGeneration {
            credential,
            preferences: self.preferences.clone(),
        })
    }
}

/// 生成按钮提交的表单
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub blog_link: String,
    #[serde(default)]
    pub focus: Focus,
    #[serde(default)]
    pub tone: Tone,
}

impl GenerateRequest {
    pub fn preferences(&self) -> StudySheetPreferences {
        StudySheetPreferences {
            blog_link: self.blog_link.trim().to_string(),
            focus: self.focus,
            tone: self.tone,
        }
    }
}

/// 一次提交的结果
#[derive(Debug)]
pub struct SubmitOutcome {
    /// 本次提交是否更新了API KEY
    pub key_updated: bool,
    pub status: SubmitStatus,
}

#[derive(Debug)]
pub enum SubmitStatus {
    Generated,
    Rejected(FormError),
    /// 模型调用失败，错误原样交给页面展示
    Failed(anyhow::Error),
}

/// 进程内的会话存储
///
/// 只有提交生成表单才会创建会话。超过空闲时间未访问的会话在下一次创建会话时被清理。
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_minutes(DEFAULT_SESSION_IDLE_MINUTES)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_minutes(minutes: u64) -> Self {
        let idle_timeout = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or(Duration::MAX);
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// 返回仍然有效的会话ID，或创建新会话。第二个返回值表示是否新建
    pub async fn resolve(&self, id: Option<Uuid>) -> (Uuid, bool) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, now);

        if let Some(id) = id
            && let Some(session) = sessions.get_mut(&id)
        {
            session.last_seen = now;
            return (id, false);
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::default());
        (id, true)
    }

    /// 只读查找仍然有效的会话，不会创建新会话
    pub async fn find(&self, id: Option<Uuid>) -> Option<Session> {
        let id = id?;
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|session| !session.is_idle(Utc::now(), self.idle_timeout))
            .cloned()
    }

    /// 获取会话状态的副本，会话不存在时返回空会话
    pub async fn snapshot(&self, id: Uuid) -> Session {
        let sessions = self.sessions.read().await;
        sessions.get(&id).cloned().unwrap_or_default()
    }

    /// 在写锁内修改会话状态
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id).or_default();
        session.last_seen = Utc::now();
        f(session)
    }

    /// 清理在 `now` 时刻已经空闲超时的会话，返回清理数量
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, now)
    }

    fn evict_idle_locked(
        &self,
        sessions: &mut HashMap<Uuid, Session>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("🧹 清理了 {} 个空闲会话", evicted);
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// 处理一次生成提交
///
/// 校验失败时不会调用生成器；模型调用期间不持有会话锁。
/// 相同输入的重复提交每次都会重新调用生成器。
pub async fn submit(
    store: &SessionStore,
    id: Uuid,
    request: GenerateRequest,
    composer: &dyn StudySheetComposer,
) -> SubmitOutcome {
    let (key_updated, validation) = store
        .update(id, |session| {
            let key_updated = session.update_credential(&request.api_key);
            session.preferences = request.preferences();
            (key_updated, session.validate())
        })
        .await;

    let pending = match validation {
        Ok(pending) => pending,
        Err(err) => {
            info!("⚠️ 表单校验未通过: {}", err);
            return SubmitOutcome {
                key_updated,
                status: SubmitStatus::Rejected(err),
            };
        }
    };

    let status = match composer
        .compose(pending.credential.expose(), &pending.preferences)
        .await
    {
        Ok(study_sheet) => {
            store
                .update(id, |session| session.study_sheet = Some(study_sheet))
                .await;
            SubmitStatus::Generated
        }
        Err(err) => {
            error!("❌ 调用模型服务出错: {:#}", err);
            SubmitStatus::Failed(err)
        }
    };

    SubmitOutcome {
        key_updated,
        status,
    }
}
