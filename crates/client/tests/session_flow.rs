//! Session store behavior against a mock gateway.

mod support;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waybill_client::{MemoryVault, SessionStore, SessionVault};
use waybill_core::Role;

use support::{gateway_for, principal_json};

#[tokio::test]
async fn login_installs_session_and_persists_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "mlopez", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let vault = Arc::new(MemoryVault::new());
    let mut store = SessionStore::new(gateway.clone(), vault.clone());

    assert!(store.login("mlopez", "pw").await);
    assert!(store.is_authenticated());
    assert_eq!(store.role(), Some(Role::Sales));
    assert!(store.last_error().is_none());
    assert!(gateway.has_token());

    let persisted = vault.load().expect("session persisted");
    assert_eq!(persisted.token, "tok-1");
    assert_eq!(persisted.principal.username, "mlopez");
}

#[tokio::test]
async fn failed_login_records_message_and_keeps_prior_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "mlopez", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "intruder", "password": "nope"})))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid credentials"})),
        )
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let mut store = SessionStore::new(gateway_for(&server), vault.clone());

    assert!(store.login("mlopez", "pw").await);
    assert!(!store.login("intruder", "nope").await);

    // The earlier session survives the failed attempt, durably too.
    assert_eq!(store.last_error(), Some("invalid credentials"));
    assert_eq!(store.principal().unwrap().username, "mlopez");
    assert_eq!(vault.load().unwrap().token, "tok-1");
}

#[tokio::test]
async fn restore_round_trips_without_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    {
        let mut store = SessionStore::new(gateway_for(&server), vault.clone());
        assert!(store.login("mlopez", "pw").await);
    }

    // A fresh process: new gateway, nothing mounted, zero requests allowed.
    let silent = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&silent)
        .await;

    let gateway = gateway_for(&silent);
    let mut restored = SessionStore::new(gateway.clone(), vault);
    restored.restore();

    assert!(restored.is_authenticated());
    assert_eq!(restored.session().unwrap().token, "tok-1");
    assert_eq!(restored.principal().unwrap().username, "mlopez");
    assert!(gateway.has_token());
}

#[tokio::test]
async fn restore_with_empty_vault_is_a_quiet_no_op() {
    let server = MockServer::start().await;
    let mut store = SessionStore::new(gateway_for(&server), Arc::new(MemoryVault::new()));
    store.restore();
    assert!(!store.is_authenticated());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn refresh_picks_up_server_side_role_change() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(principal_json(3, "mlopez", "Admin")))
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let mut store = SessionStore::new(gateway_for(&server), vault.clone());
    assert!(store.login("mlopez", "pw").await);

    store.refresh_principal().await;
    assert_eq!(store.role(), Some(Role::Admin));
    assert_eq!(vault.load().unwrap().principal.role, Role::Admin);
}

#[tokio::test]
async fn failed_refresh_tears_the_session_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid or expired token"})),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let vault = Arc::new(MemoryVault::new());
    let mut store = SessionStore::new(gateway.clone(), vault.clone());
    assert!(store.login("mlopez", "pw").await);

    store.refresh_principal().await;

    // Same effect as an explicit logout: session, vault, and token all gone.
    assert!(!store.is_authenticated());
    assert!(vault.load().is_none());
    assert!(!gateway.has_token());
}

#[tokio::test]
async fn logout_clears_session_vault_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": principal_json(3, "mlopez", "Sales"),
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let vault = Arc::new(MemoryVault::new());
    let mut store = SessionStore::new(gateway.clone(), vault.clone());
    assert!(store.login("mlopez", "pw").await);

    store.logout();
    assert!(!store.is_authenticated());
    assert!(vault.load().is_none());
    assert!(!gateway.has_token());
}
