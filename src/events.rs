//! 客户端事件总线
//! 会话变化和乐观更新结果通过广播通知 UI 层（跳转登录页、提示消息）

use tokio::sync::broadcast;
use tracing::debug;

/// 会话失效后 UI 应跳转的位置
pub const LOGIN_ROUTE: &str = "/login";

/// 客户端事件类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// 登录或注册成功
    SessionEstablished { user_id: Option<String> },
    /// 访问令牌已刷新
    TokenRefreshed,
    /// 用户主动退出（不跳转）
    LoggedOut,
    /// 刷新失败，会话被清空，UI 需要跳转登录页
    SessionExpired { redirect_to: String },
    /// 乐观更新已被服务端确认
    MutationConfirmed { key: String },
    /// 乐观更新已回滚，附带给用户看的提示
    MutationRolledBack { key: String, message: String },
}

impl ClientEvent {
    /// 获取事件类型名称
    pub fn event_type(&self) -> &str {
        match self {
            ClientEvent::SessionEstablished { .. } => "session_established",
            ClientEvent::TokenRefreshed => "token_refreshed",
            ClientEvent::LoggedOut => "logged_out",
            ClientEvent::SessionExpired { .. } => "session_expired",
            ClientEvent::MutationConfirmed { .. } => "mutation_confirmed",
            ClientEvent::MutationRolledBack { .. } => "mutation_rolled_back",
        }
    }
}

/// 事件总线
#[derive(Clone)]
pub struct EventBus {
    /// 广播发送器（用于向所有订阅者发送事件）
    sender: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 发布事件
    ///
    /// 没有订阅者时事件直接丢弃。
    pub fn publish(&self, event: ClientEvent) {
        let kind = event.event_type().to_string();
        if self.sender.send(event).is_err() {
            debug!(event = %kind, "No subscribers for client event");
        }
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(ClientEvent::TokenRefreshed);

        assert_eq!(rx.recv().await.unwrap(), ClientEvent::TokenRefreshed);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        bus.publish(ClientEvent::LoggedOut);
    }

    #[test]
    fn test_event_type_names() {
        let expired = ClientEvent::SessionExpired {
            redirect_to: LOGIN_ROUTE.to_string(),
        };
        assert_eq!(expired.event_type(), "session_expired");
        assert_eq!(ClientEvent::LoggedOut.event_type(), "logged_out");
    }
}
