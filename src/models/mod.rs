//! 领域模型
//! 与远端 API 交换的数据结构（帖子、评论、投票、热力图、账户）

pub mod auth;
pub mod comment;
pub mod heatmap;
pub mod post;
pub mod vote;

pub use auth::{
    AuthTokens, LoginRequest, OtpType, RefreshRequest, RefreshResponse, RegisterRequest,
    SendOtpRequest, UpdateProfileRequest, UserProfile, VerifiedStatus, VerifyOtpRequest,
};
pub use comment::{Comment, CommentPage, CommentStats, NewComment, ReplyPage};
pub use heatmap::{CrimeCategory, HeatmapPoint, HeatmapQuery, TimeRange};
pub use post::{
    Author, FeedQuery, GeoPoint, IncidentReport, IncidentStatus, IncidentType, Media, MediaKind,
    MediaUpload, Post, PostPage, PostStats, Severity, SortOrder,
};
pub use vote::{VoteDirection, VoteReceipt, VoteRequest, VoteTarget};

use serde::{Deserialize, Deserializer};

/// 服务端 ID 可能是数字也可能是字符串，统一成字符串
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
