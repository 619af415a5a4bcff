//! 统一错误模型
//! 定义客户端所有错误类型，以及从 API 错误响应中提取用户可读消息

use serde_json::Value;
use thiserror::Error;

/// 客户端错误类型
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// 本地没有任何凭证，请求从未携带身份
    #[error("Not authenticated")]
    Unauthenticated,

    /// 刷新失败或刷新令牌缺失，会话已失效
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// 与认证无关的 HTTP 失败，保留状态码与响应体
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16, body: String },

    /// 乐观更新未被服务端确认
    #[error("Mutation rejected for {key}: {reason}")]
    MutationRejected { key: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// 获取 HTTP 状态码（仅服务端返回的失败才有）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => Some(*status),
            ClientError::Unauthenticated | ClientError::SessionExpired(_) => Some(401),
            _ => None,
        }
    }

    /// 是否属于认证类失败（UI 层通常不再单独提示）
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthenticated | ClientError::SessionExpired(_)
        )
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthenticated => "Please log in to continue".to_string(),
            ClientError::SessionExpired(_) => {
                "Your session has expired, please log in again".to_string()
            }
            ClientError::RequestFailed { status, body } => extract_api_message(body)
                .unwrap_or_else(|| format!("Request failed ({})", status)),
            ClientError::MutationRejected { .. } => {
                "Your change could not be saved, please try again".to_string()
            }
            ClientError::Network(_) => "Network error, check your connection".to_string(),
            ClientError::Timeout(_) => "The server took too long to respond".to_string(),
            ClientError::Decode(_) => "Unexpected response from server".to_string(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Config(_) => "Configuration error".to_string(),
            ClientError::Storage(_) => "Could not access local storage".to_string(),
        }
    }

    // 便捷方法
    pub fn validation(msg: &str) -> Self {
        ClientError::Validation(msg.to_string())
    }

    pub fn network(msg: &str) -> Self {
        ClientError::Network(msg.to_string())
    }

    pub fn storage(msg: &str) -> Self {
        ClientError::Storage(msg.to_string())
    }
}

/// 从 API 错误响应体中提取消息
///
/// 依次尝试 `detail`、`message`，最后取第一个字段错误（`{"email": ["..."]}`）。
pub fn extract_api_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["detail", "message"] {
        if let Some(Value::String(msg)) = object.get(key) {
            return Some(msg.clone());
        }
    }

    object.values().find_map(|field| match field {
        Value::Array(items) => items.first().and_then(|v| v.as_str()).map(str::to_string),
        Value::String(msg) => Some(msg.clone()),
        _ => None,
    })
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ClientError>;

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Config(e.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(e: validator::ValidationErrors) -> Self {
        ClientError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
