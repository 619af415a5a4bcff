//! 远端 API 客户端
//! 所有调用都经过请求管道（登录、注册为匿名请求）

use std::sync::Arc;

use async_trait::async_trait;

use super::IncidentApi;
use crate::error::Result;
use crate::http::{ApiRequest, RequestPipeline};
use crate::models::{
    AuthTokens, Comment, CommentPage, FeedQuery, HeatmapPoint, HeatmapQuery, IncidentReport,
    LoginRequest, NewComment, Post, PostPage, RegisterRequest, ReplyPage, SendOtpRequest,
    UpdateProfileRequest, UserProfile, VerifyOtpRequest, VoteDirection, VoteReceipt, VoteRequest,
    VoteTarget,
};

/// 远端 API 客户端
pub struct RemoteApi {
    pipeline: Arc<RequestPipeline>,
}

impl RemoteApi {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Arc<RequestPipeline> {
        &self.pipeline
    }
}

fn page_param(page: u32) -> Vec<(String, String)> {
    vec![("page".to_string(), page.max(1).to_string())]
}

#[async_trait]
impl IncidentApi for RemoteApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthTokens> {
        let request = ApiRequest::post("auth/login/").anonymous().with_json(request)?;
        self.pipeline.send_json(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens> {
        let request = ApiRequest::post("auth/register/")
            .anonymous()
            .with_json(request)?;
        self.pipeline.send_json(request).await
    }

    async fn profile(&self) -> Result<UserProfile> {
        self.pipeline.send_json(ApiRequest::get("auth/profile/")).await
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile> {
        let request = ApiRequest::patch("auth/profile/").with_json(request)?;
        self.pipeline.send_json(request).await
    }

    async fn send_otp(&self, request: &SendOtpRequest) -> Result<()> {
        let request = ApiRequest::post("auth/send-otp/").with_json(request)?;
        self.pipeline.send(request).await.map(|_| ())
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<()> {
        let request = ApiRequest::post("auth/verify-otp/").with_json(request)?;
        self.pipeline.send(request).await.map(|_| ())
    }

    async fn list_posts(&self, query: &FeedQuery) -> Result<PostPage> {
        let request = ApiRequest::get("posts/").with_query(query.to_params());
        self.pipeline.send_json(request).await
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        self.pipeline
            .send_json(ApiRequest::get(format!("posts/{}/", id)))
            .await
    }

    async fn create_post(&self, report: &IncidentReport) -> Result<Post> {
        let request = ApiRequest::post("posts/").with_json(report)?;
        self.pipeline.send_json(request).await
    }

    async fn vote(&self, target: &VoteTarget, direction: VoteDirection) -> Result<VoteReceipt> {
        let request = ApiRequest::post(target.endpoint()).with_json(&VoteRequest { direction })?;
        let response = self.pipeline.send(request).await?;
        // 部分服务端投票成功只返回 204
        if response.body.trim().is_empty() {
            return Ok(VoteReceipt {
                direction,
                ..Default::default()
            });
        }
        response.json()
    }

    async fn list_comments(&self, post_id: &str, page: u32) -> Result<CommentPage> {
        let request =
            ApiRequest::get(format!("posts/{}/comments/", post_id)).with_query(page_param(page));
        self.pipeline.send_json(request).await
    }

    async fn list_replies(&self, comment_id: &str, page: u32) -> Result<ReplyPage> {
        let request = ApiRequest::get(format!("comments/{}/replies/", comment_id))
            .with_query(page_param(page));
        self.pipeline.send_json(request).await
    }

    async fn create_comment(&self, post_id: &str, draft: &NewComment) -> Result<Comment> {
        let request = ApiRequest::post(format!("posts/{}/comments/", post_id)).with_json(draft)?;
        self.pipeline.send_json(request).await
    }

    async fn heatmap(&self, query: &HeatmapQuery) -> Result<Vec<HeatmapPoint>> {
        let request = ApiRequest::get("heatmap/").with_query(query.to_params());
        self.pipeline.send_json(request).await
    }
}
