//! 评论线程与乐观评论
//!
//! 线程按帖子缓存：首页、后续分页、嵌套回复的分页。
//! 提交评论时先插入一条临时评论，服务端确认后替换，失败则移除并通知。
//! 同一帖子的评论提交按顺序发出。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use validator::Validate;

use super::sequencer::KeyedSequencer;
use super::vote::VoteController;
use crate::api::IncidentApi;
use crate::error::{ClientError, Result};
use crate::events::{ClientEvent, EventBus};
use crate::models::{
    Author, Comment, CommentStats, Media, NewComment, VerifiedStatus, VoteTarget,
};
use crate::session::CredentialStore;

/// 临时评论 ID 前缀
pub const PROVISIONAL_PREFIX: &str = "pending-";

/// 一个帖子已加载的评论
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentThread {
    pub post_id: String,
    pub comments: Vec<Comment>,
    pub total: u64,
    pub has_more: bool,
    /// 下一次 `load_more` 请求的页码
    pub next_page: u32,
    /// 评论 ID → 下一次请求的回复页码
    reply_pages: HashMap<String, u32>,
}

impl CommentThread {
    fn new(post_id: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            next_page: 1,
            ..Default::default()
        }
    }

    pub fn find(&self, id: &str) -> Option<&Comment> {
        fn walk<'a>(comments: &'a [Comment], id: &str) -> Option<&'a Comment> {
            comments.iter().find_map(|c| {
                if c.id == id {
                    Some(c)
                } else {
                    walk(&c.replies, id)
                }
            })
        }
        walk(&self.comments, id)
    }

    /// 已加载的评论数（含回复）
    pub fn loaded_len(&self) -> usize {
        self.comments.iter().map(Comment::thread_len).sum()
    }
}

/// 未加入列表的评论（按 ID 去重）
fn append_new(target: &mut Vec<Comment>, incoming: Vec<Comment>) {
    for comment in incoming {
        if !target.iter().any(|c| c.id == comment.id) {
            target.push(comment);
        }
    }
}

/// 取出所有临时评论（连同其下的回复），按树的先序排列
fn collect_pending(comments: Vec<Comment>, out: &mut Vec<Comment>) {
    for comment in comments {
        if comment.pending {
            out.push(comment);
        } else {
            collect_pending(comment.replies, out);
        }
    }
}

/// 登记服务端票数，供投票控制器作为基数
fn observe_votes(votes: &VoteController, comments: &[Comment]) {
    for comment in comments.iter().filter(|c| !c.pending) {
        votes.observe(VoteTarget::comment(comment.id.clone()), comment.stats.score());
        observe_votes(votes, &comment.replies);
    }
}

struct Inner {
    api: Arc<dyn IncidentApi>,
    store: Arc<CredentialStore>,
    events: EventBus,
    votes: VoteController,
    threads: Mutex<HashMap<String, CommentThread>>,
    sequencer: KeyedSequencer,
}

impl Inner {
    fn threads(&self) -> MutexGuard<'_, HashMap<String, CommentThread>> {
        self.threads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn confirm(&self, post_id: &str, provisional_id: &str, comment: Comment) {
        observe_votes(&self.votes, std::slice::from_ref(&comment));

        let mut threads = self.threads();
        let Some(thread) = threads.get_mut(post_id) else {
            return;
        };
        // 重新加载时服务端页已包含这条评论，临时评论不能再算一次
        if thread.find(&comment.id).is_some() {
            if Comment::remove(&mut thread.comments, provisional_id).is_some() {
                thread.total = thread.total.saturating_sub(1);
            }
            return;
        }
        match Comment::find_mut(&mut thread.comments, provisional_id) {
            Some(slot) => {
                // 保留临时评论期间到达的回复
                let replies = std::mem::take(&mut slot.replies);
                *slot = comment;
                if slot.replies.is_empty() {
                    slot.replies = replies;
                }
            }
            None => insert_comment(thread, comment),
        }
    }

    fn roll_back(&self, post_id: &str, provisional_id: &str) {
        let mut threads = self.threads();
        if let Some(thread) = threads.get_mut(post_id) {
            if Comment::remove(&mut thread.comments, provisional_id).is_some() {
                thread.total = thread.total.saturating_sub(1);
            }
        }
    }
}

/// 插入到父评论的回复最前，没有父评论（或父评论未加载）时插入顶层最前
fn insert_comment(thread: &mut CommentThread, comment: Comment) {
    let parent_id = comment.parent_id.clone();
    let parent = match parent_id.as_deref() {
        Some(id) => Comment::find_mut(&mut thread.comments, id),
        None => None,
    };
    match parent {
        Some(parent) => parent.replies.insert(0, comment),
        None => thread.comments.insert(0, comment),
    }
}

/// 评论控制器
#[derive(Clone)]
pub struct CommentController {
    inner: Arc<Inner>,
}

impl CommentController {
    pub fn new(
        api: Arc<dyn IncidentApi>,
        store: Arc<CredentialStore>,
        events: EventBus,
        votes: VoteController,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                store,
                events,
                votes,
                threads: Mutex::new(HashMap::new()),
                sequencer: KeyedSequencer::new(),
            }),
        }
    }

    /// 当前缓存的线程
    pub fn thread(&self, post_id: &str) -> Option<CommentThread> {
        self.inner.threads().get(post_id).cloned()
    }

    /// 加载首页评论（替换缓存，保留任意层级未确认的临时评论）
    pub async fn load(&self, post_id: &str) -> Result<CommentThread> {
        let page = self.inner.api.list_comments(post_id, 1).await?;
        observe_votes(&self.inner.votes, &page.comments);

        let mut threads = self.inner.threads();
        let previous = threads.remove(post_id);
        let mut thread = CommentThread::new(post_id);
        thread.comments = page.comments;
        thread.total = page.total;
        thread.has_more = page.has_more;
        thread.next_page = 2;

        if let Some(previous) = previous {
            let mut pending = Vec::new();
            collect_pending(previous.comments, &mut pending);
            // 倒序插到最前，保持原有顺序
            for comment in pending.into_iter().rev() {
                if thread.find(&comment.id).is_none() {
                    insert_comment(&mut thread, comment);
                    thread.total += 1;
                }
            }
        }

        debug!(
            post_id = %post_id,
            loaded = thread.comments.len(),
            total = thread.total,
            "Comments loaded"
        );
        threads.insert(post_id.to_string(), thread.clone());
        Ok(thread)
    }

    /// 加载下一页顶层评论
    pub async fn load_more(&self, post_id: &str) -> Result<CommentThread> {
        let page_number = match self.thread(post_id) {
            Some(thread) if !thread.has_more => return Ok(thread),
            Some(thread) => thread.next_page,
            None => return self.load(post_id).await,
        };

        let page = self.inner.api.list_comments(post_id, page_number).await?;
        observe_votes(&self.inner.votes, &page.comments);

        let mut threads = self.inner.threads();
        let thread = threads
            .entry(post_id.to_string())
            .or_insert_with(|| CommentThread::new(post_id));
        append_new(&mut thread.comments, page.comments);
        thread.has_more = page.has_more;
        thread.total = thread.total.max(page.total);
        thread.next_page = page_number + 1;
        Ok(thread.clone())
    }

    /// 加载某条评论（任意层级）的下一页回复
    pub async fn load_replies(&self, post_id: &str, comment_id: &str) -> Result<CommentThread> {
        let page_number = {
            let threads = self.inner.threads();
            let thread = threads.get(post_id).ok_or_else(|| {
                ClientError::validation("Comments for this post are not loaded")
            })?;
            if thread.find(comment_id).is_none() {
                return Err(ClientError::validation("Comment is not loaded"));
            }
            thread.reply_pages.get(comment_id).copied().unwrap_or(1)
        };

        let page = self.inner.api.list_replies(comment_id, page_number).await?;
        observe_votes(&self.inner.votes, &page.replies);

        let mut threads = self.inner.threads();
        let thread = threads
            .get_mut(post_id)
            .ok_or_else(|| ClientError::validation("Comments for this post are not loaded"))?;
        if let Some(comment) = Comment::find_mut(&mut thread.comments, comment_id) {
            append_new(&mut comment.replies, page.replies);
            comment.has_more_replies = page.has_more;
        }
        thread
            .reply_pages
            .insert(comment_id.to_string(), page_number + 1);
        Ok(thread.clone())
    }

    /// 提交评论
    ///
    /// 校验失败直接返回错误；否则临时评论已插入线程，请求在后台发出。
    /// 必须在 tokio 运行时中调用。
    pub fn submit(&self, post_id: &str, draft: NewComment) -> Result<PendingComment> {
        draft.validate()?;

        let info = self.inner.store.info();
        let provisional = Comment {
            id: format!("{}{}", PROVISIONAL_PREFIX, uuid::Uuid::new_v4()),
            post_id: Some(post_id.to_string()),
            parent_id: draft.parent_id.clone(),
            user: Author {
                name: info.display_name.unwrap_or_else(|| "You".to_string()),
                image: None,
                is_verified: info.verified_status == VerifiedStatus::Verified,
            },
            content: draft.content.clone(),
            media: draft.media.as_ref().map(|upload| Media {
                kind: upload.kind,
                url: String::new(),
                thumbnail: None,
                ai_description: None,
            }),
            created_at: Some(Utc::now()),
            stats: CommentStats::default(),
            replies: Vec::new(),
            has_more_replies: false,
            pending: true,
        };

        let key = format!("comments:{}", post_id);
        let mut turn = {
            let mut threads = self.inner.threads();
            let thread = threads
                .entry(post_id.to_string())
                .or_insert_with(|| CommentThread::new(post_id));
            insert_comment(thread, provisional.clone());
            thread.total += 1;
            self.inner.sequencer.enqueue(&key)
        };
        debug!(post_id = %post_id, provisional_id = %provisional.id, "Comment inserted locally");

        let inner = self.inner.clone();
        let post_id = post_id.to_string();
        let provisional_id = provisional.id.clone();
        let handle = tokio::spawn(async move {
            turn.wait().await;
            match inner.api.create_comment(&post_id, &draft).await {
                Ok(comment) => {
                    inner.confirm(&post_id, &provisional_id, comment.clone());
                    metrics::counter!("client_mutations_total", "outcome" => "confirmed")
                        .increment(1);
                    inner
                        .events
                        .publish(ClientEvent::MutationConfirmed { key: key.clone() });
                    debug!(post_id = %post_id, comment_id = %comment.id, "Comment confirmed");
                    Ok(comment)
                }
                Err(e) => {
                    inner.roll_back(&post_id, &provisional_id);
                    let message = e.user_message();
                    metrics::counter!("client_mutations_total", "outcome" => "rolled_back")
                        .increment(1);
                    warn!(post_id = %post_id, error = %e, "Comment rolled back");
                    inner.events.publish(ClientEvent::MutationRolledBack {
                        key: key.clone(),
                        message: message.clone(),
                    });
                    Err(ClientError::MutationRejected {
                        key,
                        reason: message,
                    })
                }
            }
        });

        Ok(PendingComment {
            provisional,
            handle,
        })
    }
}

/// 已插入的临时评论，等待服务端结果
#[must_use = "await `settle()` or call `detach()`"]
pub struct PendingComment {
    provisional: Comment,
    handle: JoinHandle<Result<Comment>>,
}

impl PendingComment {
    pub fn provisional(&self) -> &Comment {
        &self.provisional
    }

    /// 等待结果，成功时返回服务端评论
    pub async fn settle(self) -> Result<Comment> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ClientError::MutationRejected {
                key: format!(
                    "comments:{}",
                    self.provisional.post_id.unwrap_or_default()
                ),
                reason: e.to_string(),
            }),
        }
    }

    pub fn detach(self) {
        drop(self.handle);
    }
}
