//! Session bookkeeping across auth calls and storage backends.

mod common;

use common::MockApi;
use datify_client::types::Registration;
use datify_client::{ClientConfig, Credentials, DatifyClient, FileSessionStore, SessionStore};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn login_stores_token_for_later_calls() {
    let mut api = MockApi::new().await;
    let login = api
        .server
        .mock("POST", "/api/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "username": "ada",
            "password": "Secret1!",
            "remember": true
        })))
        .with_status(200)
        .with_body(r#"{"message":"Login successful","token":"jwt-1","user":{"id":1}}"#)
        .create_async()
        .await;
    let me = api
        .server
        .mock("GET", "/api/users/me")
        .match_header("authorization", "Bearer jwt-1")
        .with_status(200)
        .with_body(r#"{"user":{"id":1},"preferences":null}"#)
        .create_async()
        .await;

    let creds = Credentials::new("ada", "Secret1!").remember(true);
    let resp = api.client.auth().login(&creds).await.unwrap();
    assert_eq!(resp.token.as_deref(), Some("jwt-1"));
    assert_eq!(resp.user, Some(json!({"id": 1})));
    assert!(api.client.is_authenticated().await.unwrap());

    api.client.users().me().await.unwrap();
    login.assert_async().await;
    me.assert_async().await;
}

#[tokio::test]
async fn failed_login_surfaces_server_message() {
    let mut api = MockApi::new().await;
    let _m = api
        .server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let err = api
        .client
        .auth()
        .login(&Credentials::new("ada", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.envelope().unwrap().message, "Invalid credentials");
    assert!(!api.client.is_authenticated().await.unwrap());
    assert_eq!(api.redirect.len(), 1);
}

#[tokio::test]
async fn refresh_with_empty_body_keeps_existing_token() {
    let mut api = MockApi::with_token("current").await;
    let _m = api
        .server
        .mock("POST", "/api/auth/refresh-token")
        .with_status(204)
        .create_async()
        .await;

    let resp = api.client.auth().refresh_token().await.unwrap();
    assert!(resp.token.is_none());
    assert!(resp.message.is_none());
    assert_eq!(api.token().await.as_deref(), Some("current"));
}

#[tokio::test]
async fn register_stores_token() {
    let mut api = MockApi::new().await;
    let _m = api
        .server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::PartialJson(json!({"email": "a@b.c", "username": "ada"})))
        .with_status(201)
        .with_body(r#"{"message":"User registered successfully","token":"jwt-new"}"#)
        .create_async()
        .await;

    let reg = Registration::new("a@b.c", "ada", "Secret1!").with_birthdate("1990-04-01");
    api.client.auth().register(&reg).await.unwrap();
    assert_eq!(api.token().await.as_deref(), Some("jwt-new"));
}

#[tokio::test]
async fn refresh_replaces_token() {
    let mut api = MockApi::with_token("old").await;
    let _m = api
        .server
        .mock("POST", "/api/auth/refresh-token")
        .match_header("authorization", "Bearer old")
        .with_status(200)
        .with_body(r#"{"message":"Token refreshed","token":"new"}"#)
        .create_async()
        .await;

    api.client.auth().refresh_token().await.unwrap();
    assert_eq!(api.token().await.as_deref(), Some("new"));
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let mut api = MockApi::with_token("t").await;
    let _m = api
        .server
        .mock("POST", "/api/auth/logout")
        .with_status(500)
        .with_body(r#"{"message":"db down"}"#)
        .create_async()
        .await;

    let err = api.client.auth().logout().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(api.token().await, None);
    // not a 401, so no redirect
    assert!(api.redirect.is_empty());
}

#[tokio::test]
async fn file_store_is_read_per_request_and_cleared_on_401() {
    let dir = std::env::temp_dir().join(format!("datify-flow-{}", uuid::Uuid::new_v4()));
    let store = Arc::new(FileSessionStore::in_dir(&dir, "datify_auth"));

    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/api/messages/unread")
        .match_header("authorization", "Bearer from-disk")
        .with_status(200)
        .with_body(r#"{"unread_count":0}"#)
        .create_async()
        .await;
    let denied = server
        .mock("GET", "/api/matches")
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let client = DatifyClient::builder()
        .config(ClientConfig::default())
        .base_url_override(format!("{}/api", server.url()))
        .session_store(store.clone())
        .build()
        .unwrap();

    // written after the client was built; picked up on the next call
    store
        .save(&datify_client::Session::new("from-disk"))
        .await
        .unwrap();
    client.chat().unread_count().await.unwrap();

    let err = client.discovery().matches().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!store.path().exists());

    ok.assert_async().await;
    denied.assert_async().await;
    let _ = std::fs::remove_dir_all(&dir);
}
