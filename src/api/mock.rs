//! 内存 API 实现
//!
//! 一套固定的示例数据（帖子、评论、热力图），行为与远端接口一致：
//! 投票改变计数、评论写入回复树、信息流支持筛选和排序。
//! 可以注入投票/评论失败和网络延迟，用于离线演示和测试。

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use validator::Validate;

use super::IncidentApi;
use crate::error::{ClientError, Result};
use crate::models::{
    Author, AuthTokens, Comment, CommentPage, CommentStats, FeedQuery, HeatmapPoint,
    HeatmapQuery, IncidentReport, IncidentStatus, IncidentType, LoginRequest, Media, MediaKind,
    NewComment, Post, PostPage, PostStats, RegisterRequest, ReplyPage, SendOtpRequest, Severity,
    SortOrder, UpdateProfileRequest, UserProfile, VerifiedStatus, VerifyOtpRequest, VoteDirection,
    VoteReceipt, VoteTarget,
};

const FEED_PAGE_SIZE: usize = 10;
const COMMENT_PAGE_SIZE: usize = 10;
const REPLY_PAGE_SIZE: usize = 5;
const REPLY_PREVIEW: usize = 2;

/// 演示账户
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo-password";
/// 演示验证码
pub const DEMO_OTP: &str = "123456";

struct MockUser {
    profile: UserProfile,
    password: String,
}

struct StoredComment {
    comment: Comment,
    post_id: String,
    parent_id: Option<String>,
}

#[derive(Default)]
struct MockState {
    users: HashMap<String, MockUser>,
    current_user: Option<String>,
    posts: Vec<Post>,
    comments: Vec<StoredComment>,
    votes: HashMap<(String, VoteTarget), VoteDirection>,
    next_id: u64,
}

/// 内存 API
pub struct MockApi {
    state: RwLock<MockState>,
    fail_votes: AtomicBool,
    fail_comments: AtomicBool,
    /// 逐次指定的投票结果，true 表示成功；用完后按 `fail_votes` 处理
    scripted_votes: Mutex<VecDeque<bool>>,
    latency: RwLock<Option<Duration>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// 创建带示例数据的实例
    pub fn new() -> Self {
        let mut state = MockState {
            next_id: 100,
            ..Default::default()
        };
        state.users.insert(
            DEMO_EMAIL.to_string(),
            MockUser {
                profile: UserProfile {
                    id: "1".to_string(),
                    username: "demo".to_string(),
                    email: Some(DEMO_EMAIL.to_string()),
                    first_name: "Demo".to_string(),
                    last_name: "User".to_string(),
                    phone: None,
                    verified_status: VerifiedStatus::Unverified,
                },
                password: DEMO_PASSWORD.to_string(),
            },
        );
        state.posts = sample_posts();
        state.comments = sample_comments();

        Self {
            state: RwLock::new(state),
            fail_votes: AtomicBool::new(false),
            fail_comments: AtomicBool::new(false),
            scripted_votes: Mutex::new(VecDeque::new()),
            latency: RwLock::new(None),
        }
    }

    /// 之后的投票全部失败
    pub fn fail_votes(&self, fail: bool) {
        self.fail_votes.store(fail, Ordering::SeqCst);
    }

    /// 依次指定接下来几次投票的结果（true 成功，false 失败）
    pub fn script_votes(&self, outcomes: &[bool]) {
        self.scripted_votes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(outcomes.iter().copied());
    }

    /// 之后的评论提交全部失败
    pub fn fail_comments(&self, fail: bool) {
        self.fail_comments.store(fail, Ordering::SeqCst);
    }

    /// 每次调用前等待的时间
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write().unwrap_or_else(PoisonError::into_inner) = latency;
    }

    /// 服务端视角下当前用户对条目的投票
    pub fn recorded_vote(&self, target: &VoteTarget) -> VoteDirection {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let user = state.current_user.clone().unwrap_or_default();
        state
            .votes
            .get(&(user, target.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn state(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn issue_tokens(profile: &UserProfile) -> AuthTokens {
        AuthTokens {
            access: format!("mock-access-{}", uuid::Uuid::new_v4()),
            refresh: format!("mock-refresh-{}", uuid::Uuid::new_v4()),
            user: profile.clone(),
        }
    }
}

fn require_user(state: &MockState) -> Result<String> {
    state.current_user.clone().ok_or(ClientError::Unauthenticated)
}

fn not_found(what: &str) -> ClientError {
    ClientError::RequestFailed {
        status: 404,
        body: format!(r#"{{"detail": "{} not found."}}"#, what),
    }
}

fn author_for(state: &MockState, email: &str) -> Author {
    let profile = state.users.get(email).map(|u| &u.profile);
    Author {
        name: profile
            .map(|p| format!("{} {}", p.first_name, p.last_name).trim().to_string())
            .unwrap_or_else(|| "Anonymous".to_string()),
        image: None,
        is_verified: profile
            .map(|p| p.verified_status == VerifiedStatus::Verified)
            .unwrap_or(false),
    }
}

/// 组装评论及其回复预览
fn with_preview(state: &MockState, stored: &StoredComment) -> Comment {
    let children: Vec<&StoredComment> = state
        .comments
        .iter()
        .filter(|c| c.parent_id.as_deref() == Some(stored.comment.id.as_str()))
        .collect();

    let mut comment = stored.comment.clone();
    comment.replies = children
        .iter()
        .take(REPLY_PREVIEW)
        .map(|child| with_preview(state, child))
        .collect();
    comment.has_more_replies = children.len() > REPLY_PREVIEW;
    comment
}

fn hot_rank(post: &Post) -> f64 {
    let hours = post
        .created_at
        .map(|t| (Utc::now() - t).num_minutes().max(0) as f64 / 60.0)
        .unwrap_or(0.0);
    post.stats.score() as f64 / (hours + 2.0).powf(1.5)
}

fn controversy(post: &Post) -> f64 {
    let (up, down) = (post.stats.upvotes as f64, post.stats.downvotes as f64);
    if up == 0.0 || down == 0.0 {
        return 0.0;
    }
    (up + down) * up.min(down) / up.max(down)
}

#[async_trait]
impl IncidentApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthTokens> {
        self.simulate_latency().await;
        let mut state = self.state();
        let user = state
            .users
            .get(&request.email)
            .filter(|u| u.password == request.password)
            .ok_or_else(|| ClientError::RequestFailed {
                status: 401,
                body: r#"{"detail": "No active account found with the given credentials"}"#
                    .to_string(),
            })?;
        let tokens = Self::issue_tokens(&user.profile);
        state.current_user = Some(request.email.clone());
        Ok(tokens)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens> {
        self.simulate_latency().await;
        request.validate()?;

        let mut state = self.state();
        if state.users.contains_key(&request.email) {
            return Err(ClientError::RequestFailed {
                status: 400,
                body: r#"{"email": ["A user with this email already exists."]}"#.to_string(),
            });
        }

        state.next_id += 1;
        let profile = UserProfile {
            id: state.next_id.to_string(),
            username: request.username.clone(),
            email: Some(request.email.clone()),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone: Some(request.phone.clone()),
            verified_status: VerifiedStatus::Unverified,
        };
        let tokens = Self::issue_tokens(&profile);
        state.users.insert(
            request.email.clone(),
            MockUser {
                profile,
                password: request.password.clone(),
            },
        );
        state.current_user = Some(request.email.clone());
        Ok(tokens)
    }

    async fn profile(&self) -> Result<UserProfile> {
        self.simulate_latency().await;
        let state = self.state();
        let email = require_user(&state)?;
        state
            .users
            .get(&email)
            .map(|u| u.profile.clone())
            .ok_or_else(|| not_found("User"))
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile> {
        self.simulate_latency().await;
        request.validate()?;

        let mut state = self.state();
        let email = require_user(&state)?;
        let user = state.users.get_mut(&email).ok_or_else(|| not_found("User"))?;
        if let Some(first_name) = &request.first_name {
            user.profile.first_name = first_name.clone();
        }
        if let Some(last_name) = &request.last_name {
            user.profile.last_name = last_name.clone();
        }
        if let Some(username) = &request.username {
            user.profile.username = username.clone();
        }
        Ok(user.profile.clone())
    }

    async fn send_otp(&self, _request: &SendOtpRequest) -> Result<()> {
        self.simulate_latency().await;
        let mut state = self.state();
        let email = require_user(&state)?;
        if let Some(user) = state.users.get_mut(&email) {
            if user.profile.verified_status == VerifiedStatus::Unverified {
                user.profile.verified_status = VerifiedStatus::Pending;
            }
        }
        Ok(())
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<()> {
        self.simulate_latency().await;
        request.validate()?;

        let mut state = self.state();
        let email = require_user(&state)?;
        if request.otp_code != DEMO_OTP {
            return Err(ClientError::RequestFailed {
                status: 400,
                body: r#"{"message": "Invalid or expired OTP"}"#.to_string(),
            });
        }
        if let Some(user) = state.users.get_mut(&email) {
            user.profile.verified_status = VerifiedStatus::Verified;
        }
        Ok(())
    }

    async fn list_posts(&self, query: &FeedQuery) -> Result<PostPage> {
        self.simulate_latency().await;
        query.validate()?;

        let state = self.state();
        let mut posts: Vec<Post> = state
            .posts
            .iter()
            .filter(|p| match &query.division {
                Some(division) => p
                    .division
                    .as_deref()
                    .map(|d| d.eq_ignore_ascii_case(division))
                    .unwrap_or(false),
                None => true,
            })
            .filter(|p| match &query.district {
                Some(district) => p.location.to_lowercase().contains(&district.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Top => posts.sort_by(|a, b| b.stats.score().cmp(&a.stats.score())),
            SortOrder::New => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Controversial => {
                posts.sort_by(|a, b| controversy(b).total_cmp(&controversy(a)))
            }
            SortOrder::Hot => posts.sort_by(|a, b| hot_rank(b).total_cmp(&hot_rank(a))),
        }

        let total = posts.len();
        let start = (query.page.max(1) as usize - 1) * FEED_PAGE_SIZE;
        let page: Vec<Post> = posts.into_iter().skip(start).take(FEED_PAGE_SIZE).collect();

        Ok(PostPage {
            has_more: start + page.len() < total,
            posts: page,
            total: total as u64,
        })
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        self.simulate_latency().await;
        let state = self.state();
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("Post"))
    }

    async fn create_post(&self, report: &IncidentReport) -> Result<Post> {
        self.simulate_latency().await;
        report.validate()?;

        let mut state = self.state();
        let email = require_user(&state)?;
        state.next_id += 1;

        let media = report.media.first().map(|upload| Media {
            kind: upload.kind,
            url: format!("mock://media/{}/{}", state.next_id, upload.file_name),
            thumbnail: None,
            ai_description: None,
        });
        let post = Post {
            id: state.next_id.to_string(),
            title: report.title.clone(),
            content: report.description.clone(),
            user: author_for(&state, &email),
            time_ago: Some("just now".to_string()),
            created_at: Some(Utc::now()),
            location: report
                .address
                .clone()
                .unwrap_or_else(|| format!("{:.4}, {:.4}", report.location.lat, report.location.lng)),
            division: None,
            stats: PostStats::default(),
            media,
            is_editable: true,
            incident_type: report.incident_type,
            status: IncidentStatus::Unresolved,
            severity: Severity::Medium,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn vote(&self, target: &VoteTarget, direction: VoteDirection) -> Result<VoteReceipt> {
        self.simulate_latency().await;
        let succeed = self
            .scripted_votes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| !self.fail_votes.load(Ordering::SeqCst));
        if !succeed {
            return Err(ClientError::RequestFailed {
                status: 503,
                body: r#"{"detail": "Voting is temporarily unavailable."}"#.to_string(),
            });
        }

        let mut state = self.state();
        let user = require_user(&state)?;
        let exists = match target {
            VoteTarget::Post(id) => state.posts.iter().any(|p| &p.id == id),
            VoteTarget::Comment(id) => state.comments.iter().any(|c| &c.comment.id == id),
        };
        if !exists {
            return Err(not_found(match target {
                VoteTarget::Post(_) => "Post",
                VoteTarget::Comment(_) => "Comment",
            }));
        }

        let previous = state
            .votes
            .insert((user, target.clone()), direction)
            .unwrap_or_default();

        let apply = |up: &mut i64, down: &mut i64| {
            match previous {
                VoteDirection::Up => *up -= 1,
                VoteDirection::Down => *down -= 1,
                VoteDirection::None => {}
            }
            match direction {
                VoteDirection::Up => *up += 1,
                VoteDirection::Down => *down += 1,
                VoteDirection::None => {}
            }
        };

        let (upvotes, downvotes) = match target {
            VoteTarget::Post(id) => {
                let post = state
                    .posts
                    .iter_mut()
                    .find(|p| &p.id == id)
                    .ok_or_else(|| not_found("Post"))?;
                apply(&mut post.stats.upvotes, &mut post.stats.downvotes);
                (post.stats.upvotes, post.stats.downvotes)
            }
            VoteTarget::Comment(id) => {
                let stored = state
                    .comments
                    .iter_mut()
                    .find(|c| &c.comment.id == id)
                    .ok_or_else(|| not_found("Comment"))?;
                let stats = &mut stored.comment.stats;
                apply(&mut stats.upvotes, &mut stats.downvotes);
                (stats.upvotes, stats.downvotes)
            }
        };

        Ok(VoteReceipt {
            direction,
            upvotes: Some(upvotes),
            downvotes: Some(downvotes),
        })
    }

    async fn list_comments(&self, post_id: &str, page: u32) -> Result<CommentPage> {
        self.simulate_latency().await;
        let state = self.state();
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(not_found("Post"));
        }

        let top_level: Vec<&StoredComment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.parent_id.is_none())
            .collect();
        let total = top_level.len();
        let start = (page.max(1) as usize - 1) * COMMENT_PAGE_SIZE;
        let comments: Vec<Comment> = top_level
            .iter()
            .skip(start)
            .take(COMMENT_PAGE_SIZE)
            .map(|c| with_preview(&state, c))
            .collect();

        Ok(CommentPage {
            has_more: start + comments.len() < total,
            comments,
            total: total as u64,
        })
    }

    async fn list_replies(&self, comment_id: &str, page: u32) -> Result<ReplyPage> {
        self.simulate_latency().await;
        let state = self.state();
        let children: Vec<&StoredComment> = state
            .comments
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(comment_id))
            .collect();

        let start = (page.max(1) as usize - 1) * REPLY_PAGE_SIZE;
        let replies: Vec<Comment> = children
            .iter()
            .skip(start)
            .take(REPLY_PAGE_SIZE)
            .map(|c| with_preview(&state, c))
            .collect();

        Ok(ReplyPage {
            has_more: start + replies.len() < children.len(),
            replies,
        })
    }

    async fn create_comment(&self, post_id: &str, draft: &NewComment) -> Result<Comment> {
        self.simulate_latency().await;
        draft.validate()?;
        if self.fail_comments.load(Ordering::SeqCst) {
            return Err(ClientError::RequestFailed {
                status: 503,
                body: r#"{"detail": "Comments are temporarily unavailable."}"#.to_string(),
            });
        }

        let mut state = self.state();
        let email = require_user(&state)?;
        if let Some(parent) = &draft.parent_id {
            if !state.comments.iter().any(|c| &c.comment.id == parent) {
                return Err(not_found("Comment"));
            }
        }
        state.next_id += 1;

        let comment = Comment {
            id: format!("c{}", state.next_id),
            post_id: Some(post_id.to_string()),
            parent_id: draft.parent_id.clone(),
            user: author_for(&state, &email),
            content: draft.content.clone(),
            media: draft.media.as_ref().map(|upload| Media {
                kind: upload.kind,
                url: format!("mock://media/c{}/{}", state.next_id, upload.file_name),
                thumbnail: None,
                ai_description: None,
            }),
            created_at: Some(Utc::now()),
            stats: CommentStats::default(),
            replies: Vec::new(),
            has_more_replies: false,
            pending: false,
        };

        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| not_found("Post"))?;
        post.stats.comments += 1;

        // 新评论排在最前
        state.comments.insert(
            0,
            StoredComment {
                comment: comment.clone(),
                post_id: post_id.to_string(),
                parent_id: draft.parent_id.clone(),
            },
        );
        Ok(comment)
    }

    async fn heatmap(&self, query: &HeatmapQuery) -> Result<Vec<HeatmapPoint>> {
        self.simulate_latency().await;
        // 按时间范围缩放案件数，权重保持相对值
        let factor = query.range.days() as f64 / 365.0;
        Ok(HEATMAP_HOTSPOTS
            .iter()
            .map(|(name, lat, lng, weight, crimes)| HeatmapPoint {
                lat: *lat,
                lng: *lng,
                weight: *weight,
                name: name.to_string(),
                crimes: ((*crimes as f64) * factor).ceil() as u32,
            })
            .collect())
    }
}

/// (名称, 纬度, 经度, 权重, 年案件数)
const HEATMAP_HOTSPOTS: &[(&str, f64, f64, f64, u32)] = &[
    ("Dhaka", 23.8103, 90.4125, 100.0, 850),
    ("Gazipur", 24.0958, 90.4125, 75.0, 650),
    ("Narayanganj", 23.6238, 90.5000, 85.0, 720),
    ("Chittagong", 22.3569, 91.7832, 90.0, 780),
    ("Barisal", 22.7010, 90.3535, 60.0, 450),
    ("Khulna", 22.8456, 89.5403, 70.0, 580),
    ("Sylhet", 24.8949, 91.8687, 65.0, 520),
    ("Mymensingh", 24.7471, 90.4203, 55.0, 420),
    ("Rajshahi", 24.3745, 88.6042, 80.0, 680),
    ("Rangpur", 25.7439, 89.2752, 45.0, 380),
    ("Dhaka Central", 23.7104, 90.4074, 95.0, 820),
    ("Uttara", 23.7925, 90.4078, 88.0, 750),
    ("Mirpur", 23.7511, 90.3934, 92.0, 790),
    ("Mohammadpur", 23.7461, 90.3742, 87.0, 740),
    ("Gulshan", 23.7511, 90.4143, 86.0, 730),
];

fn sample_posts() -> Vec<Post> {
    let now = Utc::now();
    let author = |name: &str, verified: bool| Author {
        name: name.to_string(),
        image: None,
        is_verified: verified,
    };

    vec![
        Post {
            id: "1".to_string(),
            title: "Suspicious Activity in Gulshan-2".to_string(),
            content: "Multiple reports of suspicious individuals near residential areas. \
                      Please be vigilant and report any suspicious behavior to local authorities."
                .to_string(),
            user: author("John Doe", true),
            time_ago: Some("2 hours ago".to_string()),
            created_at: Some(now - ChronoDuration::hours(2)),
            location: "Gulshan-2".to_string(),
            division: Some("Dhaka".to_string()),
            stats: PostStats {
                upvotes: 150,
                downvotes: 10,
                comments: 5,
            },
            media: Some(Media {
                kind: MediaKind::Photo,
                url: "https://picsum.photos/800/600".to_string(),
                thumbnail: None,
                ai_description: Some(
                    "A well-lit residential street. Several individuals loiter near parked \
                     vehicles; security cameras are visible in the frame."
                        .to_string(),
                ),
            }),
            is_editable: true,
            incident_type: IncidentType::SuspiciousActivity,
            status: IncidentStatus::Unresolved,
            severity: Severity::High,
        },
        Post {
            id: "2".to_string(),
            title: "Car Theft Attempt at Banani".to_string(),
            content: "Today at around 3 PM, there was an attempted car theft in Banani Block A. \
                      The suspects were seen trying to break into a parked Toyota Corolla."
                .to_string(),
            user: author("Jane Smith", false),
            time_ago: Some("5 hours ago".to_string()),
            created_at: Some(now - ChronoDuration::hours(5)),
            location: "Banani".to_string(),
            division: Some("Dhaka".to_string()),
            stats: PostStats {
                upvotes: 89,
                downvotes: 3,
                comments: 0,
            },
            media: Some(Media {
                kind: MediaKind::Photo,
                url: "https://picsum.photos/800/601".to_string(),
                thumbnail: None,
                ai_description: Some(
                    "A silver sedan parked on a residential street with visible signs of forced \
                     entry on the driver's side door lock."
                        .to_string(),
                ),
            }),
            is_editable: false,
            incident_type: IncidentType::Theft,
            status: IncidentStatus::Unresolved,
            severity: Severity::Medium,
        },
        Post {
            id: "3".to_string(),
            title: "Missing Pet in Dhanmondi".to_string(),
            content: "Our golden retriever went missing from Road 27. He's wearing a blue collar \
                      with contact information. Please contact if found."
                .to_string(),
            user: author("Sarah Khan", true),
            time_ago: Some("1 day ago".to_string()),
            created_at: Some(now - ChronoDuration::days(1)),
            location: "Dhanmondi".to_string(),
            division: Some("Dhaka".to_string()),
            stats: PostStats {
                upvotes: 245,
                downvotes: 0,
                comments: 0,
            },
            media: Some(Media {
                kind: MediaKind::Photo,
                url: "https://picsum.photos/800/602".to_string(),
                thumbnail: None,
                ai_description: None,
            }),
            is_editable: false,
            incident_type: IncidentType::Missing,
            status: IncidentStatus::Unresolved,
            severity: Severity::Low,
        },
    ]
}

fn sample_comments() -> Vec<StoredComment> {
    let now = Utc::now();
    let make = |id: &str, parent: Option<&str>, name: &str, content: &str, minutes: i64| {
        StoredComment {
            comment: Comment {
                id: id.to_string(),
                post_id: Some("1".to_string()),
                parent_id: parent.map(str::to_string),
                user: Author {
                    name: name.to_string(),
                    image: None,
                    is_verified: false,
                },
                content: content.to_string(),
                media: None,
                created_at: Some(now - ChronoDuration::minutes(minutes)),
                stats: CommentStats {
                    upvotes: 4,
                    downvotes: 0,
                },
                replies: Vec::new(),
                has_more_replies: false,
                pending: false,
            },
            post_id: "1".to_string(),
            parent_id: parent.map(str::to_string),
        }
    };

    vec![
        make("c1", None, "Rahim Uddin", "I saw the same group near Road 90 last night.", 90),
        make("c2", Some("c1"), "Nusrat Jahan", "Same here, around 11 PM.", 80),
        make("c3", Some("c1"), "Karim Ahmed", "Did anyone call the police?", 70),
        make("c4", Some("c1"), "Rahim Uddin", "Yes, Gulshan police station was informed.", 60),
        make("c5", None, "Farhana Akter", "Thanks for the heads up, stay safe everyone.", 30),
    ]
}
