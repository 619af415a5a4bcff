//! 测试公共模块
//! 提供脚本化的内存传输层和测试辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use incident_client::config::ClientConfig;
use incident_client::error::Result;
use incident_client::events::{ClientEvent, EventBus};
use incident_client::http::{ApiRequest, ApiResponse, RequestPipeline, Transport};
use incident_client::session::CredentialStore;

pub const REFRESH_PATH: &str = "token/refresh/";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// 传输层看到的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub bearer: Option<String>,
}

struct ScriptState {
    valid_access: String,
    generation: u32,
    log: Vec<RecordedRequest>,
    responses: HashMap<String, (u16, String)>,
}

/// 模拟服务端认证行为的传输层
///
/// - 只接受当前有效的访问令牌，其余一律 401
/// - 刷新端点延迟后签发新令牌（可设置为失败）
/// - `always-401/` 无论令牌如何都返回 401，`boom/` 返回 500
pub struct ScriptedTransport {
    state: Mutex<ScriptState>,
    refresh_calls: AtomicUsize,
    fail_refresh: AtomicBool,
    refresh_delay: Duration,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::with_refresh_delay(Duration::from_millis(50))
    }

    pub fn with_refresh_delay(refresh_delay: Duration) -> Self {
        Self {
            state: Mutex::new(ScriptState {
                valid_access: "access-0".to_string(),
                generation: 0,
                log: Vec::new(),
                responses: HashMap::new(),
            }),
            refresh_calls: AtomicUsize::new(0),
            fail_refresh: AtomicBool::new(false),
            refresh_delay,
        }
    }

    /// 当前服务端认可的访问令牌
    pub fn valid_access(&self) -> String {
        self.state.lock().unwrap().valid_access.clone()
    }

    /// 让已签发的访问令牌全部失效
    pub fn expire_access(&self) {
        self.state.lock().unwrap().valid_access = "revoked".to_string();
    }

    pub fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// 为某个路径设置认证通过后的响应
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn login_body(access: &str) -> String {
        serde_json::json!({
            "access": access,
            "refresh": REFRESH_TOKEN,
            "user": {
                "id": 7,
                "username": "sarahk",
                "email": "sarah@example.com",
                "first_name": "Sarah",
                "last_name": "Khan",
                "verified_status": "unverified"
            }
        })
        .to_string()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let bearer = request.bearer().map(|t| t.expose_secret().clone());
        {
            let mut state = self.state.lock().unwrap();
            state.log.push(RecordedRequest {
                path: request.path.clone(),
                bearer: bearer.clone(),
            });
        }

        if request.path == REFRESH_PATH {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.refresh_delay).await;

            if self.fail_refresh.load(Ordering::SeqCst) {
                return Ok(ApiResponse::new(
                    401,
                    r#"{"detail": "Token is invalid or expired"}"#,
                ));
            }

            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.valid_access = format!("access-{}", state.generation);
            return Ok(ApiResponse::new(
                200,
                serde_json::json!({ "access": state.valid_access }).to_string(),
            ));
        }

        let state = self.state.lock().unwrap();
        if request.path == "auth/login/" {
            return Ok(ApiResponse::new(200, Self::login_body(&state.valid_access)));
        }
        if request.path == "always-401/" {
            return Ok(ApiResponse::new(401, r#"{"detail": "Forbidden resource"}"#));
        }
        if bearer.as_deref() != Some(state.valid_access.as_str()) {
            return Ok(ApiResponse::new(
                401,
                r#"{"detail": "Given token not valid for any token type"}"#,
            ));
        }
        if request.path == "boom/" {
            return Ok(ApiResponse::new(500, r#"{"message": "Internal server error"}"#));
        }

        let (status, body) = state
            .responses
            .get(&request.path)
            .cloned()
            .unwrap_or((200, format!(r#"{{"path": "{}"}}"#, request.path)));
        Ok(ApiResponse::new(status, body))
    }
}

/// 管道与其依赖
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<CredentialStore>,
    pub events: EventBus,
    pub pipeline: Arc<RequestPipeline>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(ScriptedTransport::new())
    }

    pub fn with_transport(transport: ScriptedTransport) -> Self {
        let transport = Arc::new(transport);
        let events = EventBus::new(64);
        let store = Arc::new(CredentialStore::in_memory(events.clone()));
        let pipeline = Arc::new(RequestPipeline::new(
            transport.clone(),
            store.clone(),
            events.clone(),
            REFRESH_PATH,
        ));
        Self {
            transport,
            store,
            events,
            pipeline,
        }
    }

    /// 以服务端当前有效的令牌登录
    pub fn sign_in(&self) {
        self.store
            .set_tokens(self.transport.valid_access(), REFRESH_TOKEN.to_string());
    }
}

/// 取出已经到达的全部事件
pub fn drain(rx: &mut tokio::sync::broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// 创建测试配置
pub fn create_test_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = "http://127.0.0.1:9".to_string();
    config.api.timeout_secs = 1;
    config.logging.level = "debug".to_string();
    config
}

/// 临时会话文件路径
pub fn temp_session_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("incident-session-{}.json", uuid::Uuid::new_v4()))
}
