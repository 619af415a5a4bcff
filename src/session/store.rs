//! 凭证存储
//!
//! 会话的唯一数据源。所有写操作在同一把写锁内完成内存和持久化两步，
//! 并发读者看不到写了一半的状态。每次凭证变化都会推进 epoch，
//! 请求管道据此判断一次 401 之后是否已经有人刷新过令牌。

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::{ExposeSecret, Secret};
use tracing::{debug, info, warn};

use super::storage::{
    MemoryStorage, SessionStorage, ACCESS_TOKEN_KEY, DISPLAY_NAME_KEY, REFRESH_TOKEN_KEY,
    USER_ID_KEY, VERIFIED_STATUS_KEY,
};
use super::{Session, SessionInfo};
use crate::events::{ClientEvent, EventBus, LOGIN_ROUTE};
use crate::models::{AuthTokens, VerifiedStatus};

struct StoreState {
    session: Session,
    epoch: u64,
}

/// 凭证存储
pub struct CredentialStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn SessionStorage>,
    events: EventBus,
}

impl CredentialStore {
    /// 创建存储，并从持久化层恢复上一次的会话
    pub fn new(storage: Arc<dyn SessionStorage>, events: EventBus) -> Self {
        let session = Session {
            access_token: storage.get(ACCESS_TOKEN_KEY).map(Secret::new),
            refresh_token: storage.get(REFRESH_TOKEN_KEY).map(Secret::new),
            user_id: storage.get(USER_ID_KEY),
            display_name: storage.get(DISPLAY_NAME_KEY),
            verified_status: storage
                .get(VERIFIED_STATUS_KEY)
                .map(|s| VerifiedStatus::from(s.as_str()))
                .unwrap_or_default(),
        };

        if session.has_credentials() {
            debug!(user_id = ?session.user_id, "Restored persisted session");
        }

        Self {
            state: RwLock::new(StoreState { session, epoch: 0 }),
            storage,
            events,
        }
    }

    /// 仅内存的存储
    pub fn in_memory(events: EventBus) -> Self {
        Self::new(Arc::new(MemoryStorage::new()), events)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn access_token(&self) -> Option<Secret<String>> {
        self.read().session.access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<Secret<String>> {
        self.read().session.refresh_token.clone()
    }

    /// 同时读取访问令牌和当前 epoch
    pub fn access_snapshot(&self) -> (Option<Secret<String>>, u64) {
        let state = self.read();
        (state.session.access_token.clone(), state.epoch)
    }

    pub fn epoch(&self) -> u64 {
        self.read().epoch
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo::from(&self.read().session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().session.access_token.is_some()
    }

    /// 覆盖两个令牌（身份字段保持不变）
    pub fn set_tokens(&self, access: String, refresh: String) {
        let mut state = self.write();
        state.session.access_token = Some(Secret::new(access));
        state.session.refresh_token = Some(Secret::new(refresh));
        state.epoch += 1;
        self.persist_tokens(&state.session);
    }

    /// 登录/注册成功后建立会话
    pub fn establish(&self, tokens: &AuthTokens) {
        let user_id = Some(tokens.user.id.clone());
        {
            let mut state = self.write();
            state.session = Session {
                access_token: Some(Secret::new(tokens.access.clone())),
                refresh_token: Some(Secret::new(tokens.refresh.clone())),
                user_id: user_id.clone(),
                display_name: Some(tokens.user.display_name()),
                verified_status: tokens.user.verified_status,
            };
            state.epoch += 1;

            let session = &state.session;
            let entries = [
                (ACCESS_TOKEN_KEY, Some(tokens.access.clone())),
                (REFRESH_TOKEN_KEY, Some(tokens.refresh.clone())),
                (USER_ID_KEY, session.user_id.clone()),
                (DISPLAY_NAME_KEY, session.display_name.clone()),
                (
                    VERIFIED_STATUS_KEY,
                    Some(session.verified_status.as_str().to_string()),
                ),
            ];
            if let Err(e) = self.storage.write(&entries) {
                warn!(error = %e, "Failed to persist session");
            }
        }

        info!(user_id = ?user_id, "Session established");
        self.events.publish(ClientEvent::SessionEstablished { user_id });
    }

    /// 刷新成功后替换访问令牌（服务端轮换时同时替换刷新令牌）
    ///
    /// 会话在刷新途中被清空时返回 false，新令牌被丢弃。
    pub(crate) fn rotate_access(&self, access: String, refresh: Option<String>) -> bool {
        let mut state = self.write();
        if !state.session.has_credentials() {
            return false;
        }

        state.session.access_token = Some(Secret::new(access));
        if let Some(refresh) = refresh {
            state.session.refresh_token = Some(Secret::new(refresh));
        }
        state.epoch += 1;
        self.persist_tokens(&state.session);
        true
    }

    pub fn set_verified_status(&self, status: VerifiedStatus) {
        let mut state = self.write();
        state.session.verified_status = status;
        if let Err(e) = self
            .storage
            .write(&[(VERIFIED_STATUS_KEY, Some(status.as_str().to_string()))])
        {
            warn!(error = %e, "Failed to persist verified status");
        }
    }

    /// 用户主动退出：清空会话，不触发跳转
    pub fn clear(&self) {
        self.wipe();
        info!("Session cleared");
        self.events.publish(ClientEvent::LoggedOut);
    }

    /// 刷新失败路径：清空会话并通知 UI 跳转登录页
    ///
    /// 会话已经为空时不做任何事并返回 false，多个并发触发只会生效一次。
    pub fn expire(&self) -> bool {
        if !self.wipe() {
            return false;
        }
        warn!("Session expired, redirecting to login");
        self.events.publish(ClientEvent::SessionExpired {
            redirect_to: LOGIN_ROUTE.to_string(),
        });
        true
    }

    /// 清空内存和持久化层，返回之前是否持有凭证
    fn wipe(&self) -> bool {
        let mut state = self.write();
        let had_credentials = state.session.has_credentials();
        state.session = Session::default();
        state.epoch += 1;
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        had_credentials
    }

    fn persist_tokens(&self, session: &Session) {
        let entries = [
            (
                ACCESS_TOKEN_KEY,
                session
                    .access_token
                    .as_ref()
                    .map(|t| t.expose_secret().clone()),
            ),
            (
                REFRESH_TOKEN_KEY,
                session
                    .refresh_token
                    .as_ref()
                    .map(|t| t.expose_secret().clone()),
            ),
        ];
        if let Err(e) = self.storage.write(&entries) {
            warn!(error = %e, "Failed to persist tokens");
        }
    }
}
