//! 投票模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户对某个条目的投票方向
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    #[default]
    None,
    Up,
    Down,
}

impl VoteDirection {
    /// 该方向对票数的贡献
    pub fn weight(&self) -> i64 {
        match self {
            VoteDirection::None => 0,
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::None => "none",
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

/// 可投票的条目
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum VoteTarget {
    Post(String),
    Comment(String),
}

impl VoteTarget {
    pub fn post(id: impl Into<String>) -> Self {
        VoteTarget::Post(id.into())
    }

    pub fn comment(id: impl Into<String>) -> Self {
        VoteTarget::Comment(id.into())
    }

    /// 用于排序和事件的稳定键，例如 `post:12`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// 投票端点（相对 API 前缀）
    pub fn endpoint(&self) -> String {
        match self {
            VoteTarget::Post(id) => format!("posts/{}/vote/", id),
            VoteTarget::Comment(id) => format!("comments/{}/vote/", id),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteTarget::Post(id) => write!(f, "post:{}", id),
            VoteTarget::Comment(id) => write!(f, "comment:{}", id),
        }
    }
}

/// 投票请求体，服务端按“把我的投票设为”处理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

/// 投票回执，响应中的票数可能缺省
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteReceipt {
    #[serde(default)]
    pub direction: VoteDirection,
    #[serde(default)]
    pub upvotes: Option<i64>,
    #[serde(default)]
    pub downvotes: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_keys_and_endpoints() {
        let post = VoteTarget::post("7");
        let comment = VoteTarget::comment("c-1");
        assert_eq!(post.key(), "post:7");
        assert_eq!(post.endpoint(), "posts/7/vote/");
        assert_eq!(comment.endpoint(), "comments/c-1/vote/");
        assert_ne!(post.key(), VoteTarget::comment("7").key());
    }

    #[test]
    fn test_direction_serialization() {
        let body = serde_json::to_string(&VoteRequest {
            direction: VoteDirection::None,
        })
        .unwrap();
        assert_eq!(body, r#"{"direction":"none"}"#);
    }
}
