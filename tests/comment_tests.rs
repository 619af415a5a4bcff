//! 评论线程与乐观评论集成测试（内存 API）

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::drain;
use incident_client::api::mock::{DEMO_EMAIL, DEMO_PASSWORD};
use incident_client::api::{IncidentApi, MockApi};
use incident_client::error::ClientError;
use incident_client::events::{ClientEvent, EventBus};
use incident_client::models::{AuthTokens, LoginRequest, NewComment};
use incident_client::optimistic::{CommentController, VoteController, PROVISIONAL_PREFIX};
use incident_client::session::CredentialStore;

async fn setup() -> (Arc<MockApi>, CommentController, EventBus) {
    let api = Arc::new(MockApi::new());
    let tokens: AuthTokens = api
        .login(&LoginRequest {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let events = EventBus::new(64);
    let store = Arc::new(CredentialStore::in_memory(events.clone()));
    store.establish(&tokens);
    let votes = VoteController::new(api.clone(), events.clone());
    let comments = CommentController::new(api.clone(), store, events.clone(), votes);
    (api, comments, events)
}

fn draft(content: &str, parent: Option<&str>) -> NewComment {
    NewComment {
        content: content.to_string(),
        parent_id: parent.map(str::to_string),
        media: None,
    }
}

#[tokio::test]
async fn test_load_first_page() {
    let (_api, comments, _events) = setup().await;

    let thread = comments.load("1").await.unwrap();

    assert_eq!(thread.total, 2);
    assert!(!thread.has_more);
    assert_eq!(thread.comments[0].id, "c1");
    assert!(thread.comments[0].has_more_replies);
    assert_eq!(thread.loaded_len(), 4);
}

#[tokio::test]
async fn test_load_replies_appends_without_duplicates() {
    let (_api, comments, _events) = setup().await;
    comments.load("1").await.unwrap();

    let thread = comments.load_replies("1", "c1").await.unwrap();

    let parent = thread.find("c1").unwrap();
    let ids: Vec<&str> = parent.replies.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c3", "c4"]);
    assert!(!parent.has_more_replies);
}

#[tokio::test]
async fn test_load_replies_requires_loaded_thread() {
    let (_api, comments, _events) = setup().await;

    let err = comments.load_replies("1", "c1").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_submit_inserts_then_replaces() {
    let (api, comments, events) = setup().await;
    api.set_latency(Some(Duration::from_millis(20)));
    comments.load("1").await.unwrap();
    let mut rx = events.subscribe();

    let pending = comments
        .submit("1", draft("Police patrol has been increased.", None))
        .unwrap();

    // 临时评论立即可见
    let thread = comments.thread("1").unwrap();
    assert_eq!(thread.total, 3);
    assert!(thread.comments[0].pending);
    assert!(thread.comments[0].id.starts_with(PROVISIONAL_PREFIX));
    assert_eq!(thread.comments[0].user.name, "Demo");
    assert_eq!(pending.provisional().id, thread.comments[0].id);

    let confirmed = pending.settle().await.unwrap();

    let thread = comments.thread("1").unwrap();
    assert_eq!(thread.total, 3);
    assert_eq!(thread.comments[0].id, confirmed.id);
    assert!(!thread.comments[0].pending);
    assert_eq!(
        drain(&mut rx),
        vec![ClientEvent::MutationConfirmed {
            key: "comments:1".to_string()
        }]
    );
}

#[tokio::test]
async fn test_failed_reply_is_removed() {
    let (api, comments, events) = setup().await;
    comments.load("1").await.unwrap();
    let mut rx = events.subscribe();
    api.fail_comments(true);

    let pending = comments
        .submit("1", draft("I can confirm this.", Some("c1")))
        .unwrap();
    let thread = comments.thread("1").unwrap();
    assert!(thread.find("c1").unwrap().replies[0].pending);

    let err = pending.settle().await.unwrap_err();
    assert!(matches!(err, ClientError::MutationRejected { .. }));

    let thread = comments.thread("1").unwrap();
    assert_eq!(thread.total, 2);
    assert!(thread
        .find("c1")
        .unwrap()
        .replies
        .iter()
        .all(|c| !c.pending));
    assert_eq!(
        drain(&mut rx),
        vec![ClientEvent::MutationRolledBack {
            key: "comments:1".to_string(),
            message: "Comments are temporarily unavailable.".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_empty_comment_is_rejected_locally() {
    let (_api, comments, _events) = setup().await;
    comments.load("1").await.unwrap();

    let result = comments.submit("1", draft("", None));

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(comments.thread("1").unwrap().total, 2);
}

#[tokio::test]
async fn test_submissions_on_one_post_keep_order() {
    let (api, comments, _events) = setup().await;
    api.set_latency(Some(Duration::from_millis(10)));
    comments.load("1").await.unwrap();

    let first = comments.submit("1", draft("first", None)).unwrap();
    let second = comments.submit("1", draft("second", None)).unwrap();
    first.settle().await.unwrap();
    second.settle().await.unwrap();

    // 服务端按提交顺序收到，最新的排在最前
    let reloaded = comments.load("1").await.unwrap();
    assert_eq!(reloaded.comments[0].content, "second");
    assert_eq!(reloaded.comments[1].content, "first");
    assert_eq!(reloaded.total, 4);
}

#[tokio::test]
async fn test_reload_keeps_pending_reply_under_parent() {
    let (api, comments, _events) = setup().await;
    comments.load("1").await.unwrap();
    api.set_latency(Some(Duration::from_millis(30)));

    let pending = comments
        .submit("1", draft("Officers arrived ten minutes later.", Some("c1")))
        .unwrap();
    let provisional_id = pending.provisional().id.clone();
    // 让提交任务先进入等待，再立即重新加载
    tokio::task::yield_now().await;
    api.set_latency(None);

    let reloaded = comments.load("1").await.unwrap();
    assert_eq!(reloaded.total, 3);
    let parent = reloaded.find("c1").unwrap();
    assert!(parent.replies[0].pending);
    assert_eq!(parent.replies[0].id, provisional_id);
    assert!(reloaded.comments.iter().all(|c| !c.pending));

    let confirmed = pending.settle().await.unwrap();
    let thread = comments.thread("1").unwrap();
    assert_eq!(thread.total, 3);
    assert!(thread.find(&provisional_id).is_none());
    assert_eq!(thread.find("c1").unwrap().replies[0].id, confirmed.id);
}
