//! 客户端门面
//!
//! 组合凭证存储、API 实现和乐观更新控制器，是嵌入方唯一需要持有的对象。

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use validator::Validate;

use crate::api::{IncidentApi, RemoteApi};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::events::{ClientEvent, EventBus};
use crate::http::{ReqwestTransport, RequestPipeline};
use crate::models::{
    FeedQuery, HeatmapPoint, HeatmapQuery, IncidentReport, LoginRequest, OtpType, Post, PostPage,
    RegisterRequest, SendOtpRequest, UpdateProfileRequest, UserProfile, VerifiedStatus,
    VerifyOtpRequest, VoteTarget,
};
use crate::optimistic::{CommentController, VoteController};
use crate::session::{CredentialStore, FileStorage, MemoryStorage, SessionInfo, SessionStorage};

/// 犯罪举报客户端
#[derive(Clone)]
pub struct IncidentClient {
    api: Arc<dyn IncidentApi>,
    store: Arc<CredentialStore>,
    events: EventBus,
    votes: VoteController,
    comments: CommentController,
}

impl IncidentClient {
    /// 按配置连接远端服务
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let events = EventBus::new(config.events.capacity);
        let storage: Arc<dyn SessionStorage> = match config.storage.backend.to_lowercase().as_str()
        {
            "file" => Arc::new(FileStorage::open(&config.storage.path)?),
            _ => Arc::new(MemoryStorage::new()),
        };
        let store = Arc::new(CredentialStore::new(storage, events.clone()));

        let transport = Arc::new(ReqwestTransport::new(config)?);
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            store.clone(),
            events.clone(),
            config.api.refresh_path.clone(),
        ));

        info!(
            base_url = %config.api.base_url,
            storage = %config.storage.backend,
            authenticated = store.is_authenticated(),
            "Incident client connected"
        );

        Ok(Self::new(Arc::new(RemoteApi::new(pipeline)), store, events))
    }

    /// 使用任意 API 实现（例如内存实现）
    pub fn new(api: Arc<dyn IncidentApi>, store: Arc<CredentialStore>, events: EventBus) -> Self {
        let votes = VoteController::new(api.clone(), events.clone());
        let comments = CommentController::new(
            api.clone(),
            store.clone(),
            events.clone(),
            votes.clone(),
        );
        Self {
            api,
            store,
            events,
            votes,
            comments,
        }
    }

    pub fn api(&self) -> &Arc<dyn IncidentApi> {
        &self.api
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// 当前会话（不含令牌）
    pub fn session(&self) -> SessionInfo {
        self.store.info()
    }

    /// 订阅客户端事件（会话失效跳转、乐观更新回滚提示）
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    // ==================== 账户 ====================

    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile> {
        request.validate()?;
        let tokens = self.api.login(request).await?;
        self.store.establish(&tokens);
        info!(user_id = %tokens.user.id, "User logged in");
        Ok(tokens.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        request.validate()?;
        let tokens = self.api.register(request).await?;
        self.store.establish(&tokens);
        info!(user_id = %tokens.user.id, "User registered");
        Ok(tokens.user)
    }

    /// 退出登录（只清理本地会话，不跳转）
    pub fn logout(&self) {
        self.store.clear();
        info!("User logged out");
    }

    /// 获取资料，并同步本地的认证状态
    pub async fn profile(&self) -> Result<UserProfile> {
        let profile = self.api.profile().await?;
        self.store.set_verified_status(profile.verified_status);
        Ok(profile)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile> {
        request.validate()?;
        let profile = self.api.update_profile(request).await?;
        self.store.set_verified_status(profile.verified_status);
        Ok(profile)
    }

    /// 发送验证码
    pub async fn request_verification(&self, otp_type: OtpType) -> Result<()> {
        self.api.send_otp(&SendOtpRequest { otp_type }).await?;
        if self.store.info().verified_status == VerifiedStatus::Unverified {
            self.store.set_verified_status(VerifiedStatus::Pending);
        }
        Ok(())
    }

    /// 提交验证码，成功后重新拉取资料
    pub async fn verify(&self, otp_type: OtpType, otp_code: &str) -> Result<UserProfile> {
        let request = VerifyOtpRequest {
            otp_code: otp_code.trim().to_string(),
            otp_type,
        };
        request.validate()?;
        self.api.verify_otp(&request).await?;
        self.profile().await
    }

    // ==================== 内容 ====================

    /// 信息流；帖子会登记到投票控制器
    pub async fn feed(&self, query: &FeedQuery) -> Result<PostPage> {
        query.validate()?;
        let page = self.api.list_posts(query).await?;
        for post in &page.posts {
            self.votes
                .observe(VoteTarget::post(post.id.clone()), post.stats.score());
        }
        Ok(page)
    }

    pub async fn post(&self, id: &str) -> Result<Post> {
        let post = self.api.get_post(id).await?;
        self.votes
            .observe(VoteTarget::post(post.id.clone()), post.stats.score());
        Ok(post)
    }

    /// 发布举报（本地校验通过后才发请求）
    pub async fn report(&self, report: &IncidentReport) -> Result<Post> {
        report.validate()?;
        let post = self.api.create_post(report).await?;
        info!(post_id = %post.id, "Incident reported");
        Ok(post)
    }

    pub async fn heatmap(&self, query: &HeatmapQuery) -> Result<Vec<HeatmapPoint>> {
        self.api.heatmap(query).await
    }

    pub fn votes(&self) -> &VoteController {
        &self.votes
    }

    pub fn comments(&self) -> &CommentController {
        &self.comments
    }
}
