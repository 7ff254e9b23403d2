//! HTTP服务 - 单页表单、生成提交与学习笔记下载

use anyhow::{Context, Result};
use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::generator::{LLMStudySheetComposer, StudySheetComposer};
use crate::llm::client::LLMClient;
use crate::session::{self, GenerateRequest, Session, SessionStore, SubmitStatus};

pub mod page;

use page::{Notice, PageRenderer};

/// 会话cookie名
pub const SESSION_COOKIE: &str = "studysheet_session";

/// 所有请求处理函数共享的状态
#[derive(Clone)]
pub struct AppState {
    sessions: SessionStore,
    composer: Arc<dyn StudySheetComposer>,
    renderer: Arc<PageRenderer>,
    download_file_name: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config, composer: Arc<dyn StudySheetComposer>) -> Result<Self> {
        let renderer = PageRenderer::new(&config.download_file_name)?;
        Ok(Self {
            sessions: SessionStore::with_idle_minutes(config.server.session_idle_minutes),
            composer,
            renderer: Arc::new(renderer),
            download_file_name: Arc::from(config.download_file_name.as_str()),
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn page_response(
        &self,
        status: StatusCode,
        session: &Session,
        notice: &Notice,
        new_session: Option<Uuid>,
    ) -> Response {
        let rendered = self.renderer.render(
            session.has_credential(),
            &session.preferences,
            session.study_sheet.as_deref(),
            notice,
        );

        let mut response = match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                error!("❌ 页面渲染失败: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err)).into_response()
            }
        };

        if let Some(id) = new_session {
            attach_session_cookie(&mut response, id);
        }
        response
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/download", get(download))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动Web服务，直到收到Ctrl+C
pub async fn launch(config: &Config) -> Result<()> {
    let llm_client = LLMClient::new(config.llm.clone());
    let composer: Arc<dyn StudySheetComposer> = Arc::new(LLMStudySheetComposer::new(llm_client));
    let state = AppState::new(config, composer)?;

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;

    info!("🚀 Studysheet Composer 已启动: http://{}", listener.local_addr()?);
    info!(
        "🔧 LLM provider: {}, model: {}",
        config.llm.provider, config.llm.model
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("❌ 无法监听Ctrl+C信号: {}", e);
        std::future::pending::<()>().await;
    }
}

/// 从Cookie请求头中读取会话ID
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn attach_session_cookie(response: &mut Response, id: Uuid) {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

/// 首页只读取已有会话，不会创建新会话
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state
        .sessions
        .find(session_id(&headers))
        .await
        .unwrap_or_default();

    state.page_response(StatusCode::OK, &session, &Notice::default(), None)
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<GenerateRequest>, FormRejection>,
) -> Response {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            warn!("⚠️ 无法解析表单: {}", rejection.body_text());
            let session = state
                .sessions
                .find(session_id(&headers))
                .await
                .unwrap_or_default();
            let notice = Notice {
                form_error: Some(format!(
                    "Invalid form submission: {}",
                    rejection.body_text()
                )),
                ..Default::default()
            };
            return state.page_response(rejection.status(), &session, &notice, None);
        }
    };

    let (id, created) = state.sessions.resolve(session_id(&headers)).await;
    let outcome = session::submit(&state.sessions, id, request, state.composer.as_ref()).await;

    let mut notice = Notice {
        key_updated: outcome.key_updated,
        ..Default::default()
    };
    let status = match outcome.status {
        SubmitStatus::Generated => StatusCode::OK,
        SubmitStatus::Rejected(err) => {
            notice.form_error = Some(err.to_string());
            StatusCode::OK
        }
        SubmitStatus::Failed(err) => {
            notice.failure = Some(format!("{:#}", err));
            StatusCode::BAD_GATEWAY
        }
    };

    let session = state.sessions.snapshot(id).await;
    state.page_response(status, &session, &notice, created.then_some(id))
}

/// 原样返回最近一次生成的学习笔记
async fn download(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let study_sheet = state
        .sessions
        .find(session_id(&headers))
        .await
        .and_then(|session| session.study_sheet);

    match study_sheet {
        Some(study_sheet) => (
            [
                (
                    header::CONTENT_TYPE,
                    "text/markdown; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", state.download_file_name),
                ),
            ],
            study_sheet,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            "No study sheet has been generated yet.",
        )
            .into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
