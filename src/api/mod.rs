//! API 接口
//! 远端实现与内存实现共享同一个 trait，可互相替换

pub mod mock;
pub mod remote;

pub use mock::MockApi;
pub use remote::RemoteApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AuthTokens, Comment, CommentPage, FeedQuery, HeatmapPoint, HeatmapQuery, IncidentReport,
    LoginRequest, NewComment, Post, PostPage, RegisterRequest, ReplyPage, SendOtpRequest,
    UpdateProfileRequest, UserProfile, VerifyOtpRequest, VoteDirection, VoteReceipt, VoteTarget,
};

/// 犯罪举报服务 API
#[async_trait]
pub trait IncidentApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthTokens>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens>;

    async fn profile(&self) -> Result<UserProfile>;

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile>;

    async fn send_otp(&self, request: &SendOtpRequest) -> Result<()>;

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<()>;

    async fn list_posts(&self, query: &FeedQuery) -> Result<PostPage>;

    async fn get_post(&self, id: &str) -> Result<Post>;

    async fn create_post(&self, report: &IncidentReport) -> Result<Post>;

    /// 将用户对条目的投票设为 `direction`
    async fn vote(&self, target: &VoteTarget, direction: VoteDirection) -> Result<VoteReceipt>;

    async fn list_comments(&self, post_id: &str, page: u32) -> Result<CommentPage>;

    async fn list_replies(&self, comment_id: &str, page: u32) -> Result<ReplyPage>;

    async fn create_comment(&self, post_id: &str, draft: &NewComment) -> Result<Comment>;

    async fn heatmap(&self, query: &HeatmapQuery) -> Result<Vec<HeatmapPoint>>;
}
