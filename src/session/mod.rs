//! 会话管理
//! 凭证存储与持久化，供请求管道和 UI 层共享

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::CredentialStore;

use secrecy::Secret;

use crate::models::VerifiedStatus;

/// 当前会话（只由 CredentialStore 持有和修改）
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<Secret<String>>,
    pub refresh_token: Option<Secret<String>>,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub verified_status: VerifiedStatus,
}

impl Session {
    /// 是否持有任何凭证
    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some() || self.refresh_token.is_some()
    }
}

/// 会话的非敏感快照，供 UI 展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub verified_status: VerifiedStatus,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: session.access_token.is_some(),
            user_id: session.user_id.clone(),
            display_name: session.display_name.clone(),
            verified_status: session.verified_status,
        }
    }
}
