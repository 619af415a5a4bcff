//! 请求管道
//!
//! 为请求附加访问令牌，拦截 401 并透明地刷新令牌后重试一次。
//! 刷新在同一时刻只会进行一次：所有并发失败的请求在刷新闸门上排队，
//! 拿到闸门后先比较 epoch，如果令牌已被别人刷新（或会话已失效）就直接复用结果。

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, info, warn};

use super::request::{ApiRequest, ApiResponse, RequestDescriptor};
use super::transport::Transport;
use crate::error::{ClientError, Result};
use crate::events::{ClientEvent, EventBus};
use crate::models::{RefreshRequest, RefreshResponse};
use crate::session::CredentialStore;

/// 请求管道
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    store: Arc<CredentialStore>,
    events: EventBus,
    refresh_path: String,
    /// 刷新闸门：持有期间只有一个请求在刷新
    refresh_gate: TokioMutex<()>,
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<CredentialStore>,
        events: EventBus,
        refresh_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            store,
            events,
            refresh_path: refresh_path.into(),
            refresh_gate: TokioMutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// 发送请求并返回 2xx 响应
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut descriptor = RequestDescriptor::new(request);

        // 1. 附加凭证
        let (token, epoch) = if descriptor.request().anonymous {
            (None, self.store.epoch())
        } else {
            self.store.access_snapshot()
        };
        let had_credential = token.is_some();
        descriptor.authorize(token);

        let response = self.dispatch(&descriptor).await?;
        if !response.is_unauthorized() || !descriptor.can_retry() {
            return response.error_for_status();
        }

        // 2. 401：标记重试，保证最多重试一次
        descriptor.mark_retried();

        if self.store.refresh_token().is_none() {
            return Err(if had_credential {
                ClientError::SessionExpired("no refresh token available".to_string())
            } else {
                ClientError::Unauthenticated
            });
        }

        // 3. 刷新（或复用并发请求的刷新结果）
        let token = self.refresh_after(epoch).await?;

        // 4. 用新令牌重发一次
        descriptor.authorize(Some(token));
        debug!(
            path = %descriptor.request().path,
            retries = descriptor.retries(),
            "Retrying request with refreshed credential"
        );
        self.dispatch(&descriptor).await?.error_for_status()
    }

    /// 发送请求并解析 JSON
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<ApiResponse> {
        let request = descriptor.request();
        let response = self.transport.execute(request).await?;

        metrics::counter!("client_requests_total", "status" => response.status.to_string())
            .increment(1);
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "Request completed"
        );
        Ok(response)
    }

    /// 获取一个比 `seen_epoch` 更新的访问令牌
    ///
    /// `seen_epoch` 是请求发出时的 epoch。闸门内 epoch 已变化说明
    /// 其他请求刷新过（或会话已被清空），此时不再调用刷新端点。
    async fn refresh_after(&self, seen_epoch: u64) -> Result<Secret<String>> {
        let _gate = self.refresh_gate.lock().await;

        if self.store.epoch() != seen_epoch {
            debug!("Credential changed since request was sent, reusing it");
            return self.store.access_token().ok_or_else(|| {
                ClientError::SessionExpired("session ended while waiting for refresh".to_string())
            });
        }

        let refresh_token = self.store.refresh_token().ok_or_else(|| {
            ClientError::SessionExpired("no refresh token available".to_string())
        })?;

        match self.call_refresh(&refresh_token).await {
            Ok(refreshed) => {
                let access = refreshed.access.clone();
                if !self.store.rotate_access(refreshed.access, refreshed.refresh) {
                    return Err(ClientError::SessionExpired(
                        "session cleared during refresh".to_string(),
                    ));
                }
                metrics::counter!("client_token_refresh_total", "outcome" => "success")
                    .increment(1);
                info!("Access token refreshed");
                self.events.publish(ClientEvent::TokenRefreshed);
                Ok(Secret::new(access))
            }
            Err(e) => {
                metrics::counter!("client_token_refresh_total", "outcome" => "failure")
                    .increment(1);
                warn!(error = %e, "Token refresh failed");
                self.store.expire();
                Err(ClientError::SessionExpired(e.to_string()))
            }
        }
    }

    /// 直接调用刷新端点，不经过拦截
    async fn call_refresh(&self, refresh_token: &Secret<String>) -> Result<RefreshResponse> {
        let request = ApiRequest::post(self.refresh_path.clone())
            .anonymous()
            .with_json(&RefreshRequest {
                refresh: refresh_token.expose_secret(),
            })?;

        self.transport
            .execute(&request)
            .await?
            .error_for_status()?
            .json()
    }
}
