//! 请求管道集成测试
//! 覆盖凭证附加、401 拦截、单飞刷新和重试一次

mod common;

use common::{drain, Harness, ScriptedTransport, REFRESH_PATH};
use futures::future::join_all;
use incident_client::error::ClientError;
use incident_client::events::{ClientEvent, LOGIN_ROUTE};
use incident_client::http::ApiRequest;

#[tokio::test]
async fn test_valid_token_is_attached() {
    let harness = Harness::new();
    harness.sign_in();

    let response = harness
        .pipeline
        .send(ApiRequest::get("posts/"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let sent = harness.transport.requests_to("posts/");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("access-0"));
    assert_eq!(harness.transport.refresh_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let harness = Harness::new();
    harness.sign_in();
    harness.transport.expire_access();
    let mut rx = harness.events.subscribe();

    let requests = (0..8).map(|i| {
        let pipeline = harness.pipeline.clone();
        async move { pipeline.send(ApiRequest::get(format!("items/{}/", i))).await }
    });
    let results = join_all(requests).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(harness.transport.refresh_calls(), 1);

    // 每个请求恰好重发一次，且都带着同一个新令牌
    for i in 0..8 {
        let sent = harness.transport.requests_to(&format!("items/{}/", i));
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].bearer.as_deref(), Some("access-0"));
        assert_eq!(sent[1].bearer.as_deref(), Some("access-1"));
    }

    let refreshed = drain(&mut rx)
        .into_iter()
        .filter(|e| *e == ClientEvent::TokenRefreshed)
        .count();
    assert_eq!(refreshed, 1);
    assert!(harness.store.is_authenticated());
}

#[tokio::test]
async fn test_concurrent_spawned_requests_share_one_refresh() {
    let harness = Harness::new();
    harness.sign_in();
    harness.transport.expire_access();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let pipeline = harness.pipeline.clone();
            tokio::spawn(async move { pipeline.send(ApiRequest::get(format!("feed/{}/", i))).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(harness.transport.refresh_calls(), 1);
}

#[tokio::test]
async fn test_refresh_failure_expires_session_once() {
    let harness = Harness::new();
    harness.sign_in();
    harness.transport.expire_access();
    harness.transport.fail_refresh(true);
    let mut rx = harness.events.subscribe();

    let requests = (0..5).map(|i| {
        let pipeline = harness.pipeline.clone();
        async move { pipeline.send(ApiRequest::get(format!("items/{}/", i))).await }
    });
    let results = join_all(requests).await;

    for result in &results {
        assert!(matches!(result, Err(ClientError::SessionExpired(_))));
    }
    assert_eq!(harness.transport.refresh_calls(), 1);
    assert!(!harness.store.is_authenticated());
    assert!(harness.store.refresh_token().is_none());

    let expired: Vec<ClientEvent> = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, ClientEvent::SessionExpired { .. }))
        .collect();
    assert_eq!(
        expired,
        vec![ClientEvent::SessionExpired {
            redirect_to: LOGIN_ROUTE.to_string()
        }]
    );

    // 重新登录之前不会再刷新
    let err = harness
        .pipeline
        .send(ApiRequest::get("items/9/"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
    assert_eq!(harness.transport.refresh_calls(), 1);
}

#[tokio::test]
async fn test_refresh_error_is_propagated_not_original() {
    let harness = Harness::new();
    harness.sign_in();
    harness.transport.expire_access();
    harness.transport.fail_refresh(true);

    let err = harness
        .pipeline
        .send(ApiRequest::get("items/1/"))
        .await
        .unwrap_err();

    match err {
        ClientError::SessionExpired(reason) => assert!(reason.contains("401")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_token_sends_no_header_and_no_refresh() {
    let harness = Harness::new();

    let err = harness
        .pipeline
        .send(ApiRequest::get("auth/profile/"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthenticated));
    let sent = harness.transport.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].bearer.is_none());
    assert_eq!(harness.transport.refresh_calls(), 0);
}

#[tokio::test]
async fn test_retry_happens_at_most_once() {
    let harness = Harness::new();
    harness.sign_in();

    let err = harness
        .pipeline
        .send(ApiRequest::get("always-401/"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(matches!(err, ClientError::RequestFailed { status: 401, .. }));
    assert_eq!(harness.transport.requests_to("always-401/").len(), 2);
    assert_eq!(harness.transport.refresh_calls(), 1);
}

#[tokio::test]
async fn test_non_auth_failure_keeps_status_and_body() {
    let harness = Harness::new();
    harness.sign_in();

    let err = harness
        .pipeline
        .send(ApiRequest::get("boom/"))
        .await
        .unwrap_err();

    match &err {
        ClientError::RequestFailed { status, body } => {
            assert_eq!(*status, 500);
            assert!(body.contains("Internal server error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_message(), "Internal server error");
    assert_eq!(harness.transport.refresh_calls(), 0);
}

#[tokio::test]
async fn test_anonymous_request_never_carries_credential() {
    let harness = Harness::new();
    harness.sign_in();

    harness
        .pipeline
        .send(ApiRequest::post("auth/login/").anonymous())
        .await
        .unwrap();

    let sent = harness.transport.requests_to("auth/login/");
    assert!(sent[0].bearer.is_none());
}

#[tokio::test]
async fn test_refresh_call_is_not_intercepted() {
    let harness = Harness::with_transport(ScriptedTransport::with_refresh_delay(
        std::time::Duration::from_millis(1),
    ));
    harness.sign_in();
    harness.transport.expire_access();
    harness.transport.fail_refresh(true);

    let _ = harness.pipeline.send(ApiRequest::get("items/1/")).await;

    // 刷新请求本身 401 不会再触发刷新
    let refreshes = harness.transport.requests_to(REFRESH_PATH);
    assert_eq!(refreshes.len(), 1);
    assert!(refreshes[0].bearer.is_none());
}

#[tokio::test]
async fn test_later_request_uses_refreshed_token_directly() {
    let harness = Harness::new();
    harness.sign_in();
    harness.transport.expire_access();

    harness
        .pipeline
        .send(ApiRequest::get("items/1/"))
        .await
        .unwrap();
    harness
        .pipeline
        .send(ApiRequest::get("items/2/"))
        .await
        .unwrap();

    let sent = harness.transport.requests_to("items/2/");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("access-1"));
    assert_eq!(harness.transport.refresh_calls(), 1);
}
