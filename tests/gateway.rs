//! Request gateway behavior against a mock server: header merging, status
//! mapping, and 401 session invalidation.

mod common;

use common::{unreachable_client, MockApi};
use datify_client::error::{FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use datify_client::{Error, FailureKind, RequestDescriptor};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn transport_failure_is_status_zero() {
    let client = unreachable_client();
    let err = client.users().me().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Network);
    assert_eq!(err.status(), Some(0));
    let env = err.envelope().unwrap();
    assert_eq!(env.status, 0);
    assert_eq!(env.message, NETWORK_ERROR_MESSAGE);
    assert!(env.data.is_none());
    // no response, so the session is untouched
    assert!(client.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn http_error_carries_status_message_and_body() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("POST", "/api/match/like/5")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Cannot like this user"}"#)
        .create_async()
        .await;

    let err = api.client.discovery().like(5, false).await.unwrap_err();
    match &err {
        Error::Http {
            status,
            message,
            data,
        } => {
            assert_eq!(*status, 403);
            assert_eq!(message, "Cannot like this user");
            assert_eq!(data, &Some(json!({"message": "Cannot like this user"})));
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert_eq!(api.token().await.as_deref(), Some("t"));
    assert!(api.redirect.is_empty());
}

#[tokio::test]
async fn http_error_without_message_uses_fallback() {
    let mut api = MockApi::new().await;
    let _m = api
        .server
        .mock("GET", "/api/matches")
        .with_status(500)
        .with_body(r#"{"error":"boom"}"#)
        .create_async()
        .await;

    let err = api.client.discovery().matches().await.unwrap_err();
    let env = err.envelope().unwrap();
    assert_eq!(env.status, 500);
    assert_eq!(env.message, FALLBACK_ERROR_MESSAGE);
    assert_eq!(env.data, Some(json!({"error": "boom"})));
}

#[tokio::test]
async fn non_json_error_body_keeps_status() {
    let mut api = MockApi::new().await;
    let _m = api
        .server
        .mock("GET", "/api/users/me")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = api.client.users().me().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Http);
    let env = err.envelope().unwrap();
    assert_eq!(env.status, 502);
    assert_eq!(env.message, FALLBACK_ERROR_MESSAGE);
    assert!(env.data.is_none());
}

#[tokio::test]
async fn unauthorized_clears_session_redirects_and_still_fails() {
    let mut api = MockApi::with_token("expired").await;
    let m = api
        .server
        .mock("GET", "/api/users/me")
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let err = api.client.users().me().await.unwrap_err();
    m.assert_async().await;

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "HTTP 401: Token expired");
    assert_eq!(api.token().await, None);
    assert_eq!(api.redirect.redirects(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn unauthorized_with_empty_body_still_invalidates() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("POST", "/api/matches/3/typing")
        .with_status(401)
        .create_async()
        .await;

    let err = api.client.chat().typing(3).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.envelope().unwrap().message, FALLBACK_ERROR_MESSAGE);
    assert_eq!(api.token().await, None);
    assert_eq!(api.redirect.len(), 1);
}

#[tokio::test]
async fn concurrent_unauthorized_calls_both_fail() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("GET", "/api/matches")
        .with_status(401)
        .with_body(r#"{"message":"Invalid token"}"#)
        .expect(2)
        .create_async()
        .await;

    let discovery = api.client.discovery();
    let (a, b) = futures::join!(discovery.matches(), discovery.matches());
    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    assert_eq!(api.token().await, None);
    assert_eq!(api.redirect.len(), 2);
}

#[tokio::test]
async fn bearer_header_only_when_session_exists() {
    let mut api = MockApi::new().await;
    let m = api
        .server
        .mock("GET", "/api/match/discover")
        .match_header("authorization", Matcher::Missing)
        .match_header("content-type", "application/json")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
        .with_status(200)
        .with_body(r#"{"users":[]}"#)
        .create_async()
        .await;

    let body = api.client.discovery().discover().await.unwrap();
    assert_eq!(body, json!({"users": []}));
    m.assert_async().await;
}

#[tokio::test]
async fn caller_headers_override_auth_and_defaults() {
    let mut api = MockApi::with_token("session-token").await;
    let m = api
        .server
        .mock("POST", "/api/auth/refresh-token")
        .match_header("authorization", "Bearer refresh-token")
        .match_header("content-type", "text/plain")
        .with_status(200)
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;

    let request = RequestDescriptor::post("/auth/refresh-token")
        .header("Authorization", "Bearer refresh-token")
        .header("Content-Type", "text/plain");
    api.client.send(request).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn caller_can_clear_default_content_type() {
    let mut api = MockApi::new().await;
    let m = api
        .server
        .mock("GET", "/api/subscriptions/plans")
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"plans":[]}"#)
        .create_async()
        .await;

    let request = RequestDescriptor::get("/subscriptions/plans").clear_header("content-type");
    api.client.send(request).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("DELETE", "/api/reels/9")
        .with_status(204)
        .create_async()
        .await;

    let body = api.client.reels().delete(9).await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    let mut api = MockApi::new().await;
    let _m = api
        .server
        .mock("GET", "/api/subscriptions/current")
        .with_status(200)
        .with_body("OK")
        .create_async()
        .await;

    let err = api.client.subscriptions().current().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn send_as_decodes_typed_body() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("GET", "/api/messages/unread")
        .with_status(200)
        .with_body(r#"{"unread_count": 4}"#)
        .create_async()
        .await;

    let unread = api.client.chat().unread_count().await.unwrap();
    assert_eq!(unread.unread_count, 4);
}

#[tokio::test]
async fn send_as_shape_mismatch_is_serialization_error() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("GET", "/api/messages/unread")
        .with_status(200)
        .with_body(r#"{"count": 4}"#)
        .create_async()
        .await;

    let err = api.client.chat().unread_count().await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert_eq!(err.kind(), FailureKind::Local);
}
