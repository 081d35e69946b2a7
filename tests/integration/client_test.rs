//! End-to-end tests driving the session client against an in-process
//! server.

mod helpers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use authgate_api::state::AppState;
use authgate_client::{ApiClient, FileTokenStore, SessionClient, SessionPhase, TokenStore};
use authgate_database::MemoryCredentialStore;

/// Spawn the server on an ephemeral port and return its address.
async fn spawn_server() -> SocketAddr {
    let state = AppState::new(helpers::test_config(), Arc::new(MemoryCredentialStore::new()));
    let router = authgate_api::router::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("No local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

fn fresh_store_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "authgate-client-test-{}-{}",
        label,
        uuid::Uuid::new_v4()
    ))
}

fn client_for(addr: SocketAddr, dir: &PathBuf) -> SessionClient {
    SessionClient::new(
        ApiClient::new(format!("http://{}", addr)),
        Box::new(FileTokenStore::new(dir)),
    )
}

#[tokio::test]
async fn test_initialize_without_persisted_token() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("empty");
    let mut client = client_for(addr, &dir);

    assert_eq!(client.state().phase, SessionPhase::Initializing);
    client.initialize().await.expect("initialize");
    assert_eq!(client.state().phase, SessionPhase::Anonymous);
}

#[tokio::test]
async fn test_register_login_profile_logout() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("lifecycle");
    let mut client = client_for(addr, &dir);
    client.initialize().await.expect("initialize");

    client
        .register("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await
        .expect("register");

    assert_eq!(client.state().phase, SessionPhase::Authenticated);
    let user = client.state().user.as_ref().expect("No user in state");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.first_name, "Ana");

    let profile = client.profile().await.expect("profile");
    assert_eq!(profile.email, "a@x.com");

    client.logout().await.expect("logout");
    assert_eq!(client.state().phase, SessionPhase::Anonymous);
    assert!(client.state().token.is_none());

    // Persisted token is gone too.
    let store = FileTokenStore::new(&dir);
    assert_eq!(store.load().expect("load"), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_restore_persisted_session() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("restore");

    let mut first = client_for(addr, &dir);
    first.initialize().await.expect("initialize");
    first
        .register("b@x.com", "Bela", "Kun", "Abcdefg1")
        .await
        .expect("register");

    // A fresh client over the same storage picks the session back up.
    let mut second = client_for(addr, &dir);
    second.initialize().await.expect("initialize");

    assert_eq!(second.state().phase, SessionPhase::Authenticated);
    let user = second.state().user.as_ref().expect("No user in state");
    assert_eq!(user.email, "b@x.com");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_rejected_persisted_token_is_cleared() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("rejected");

    let store = FileTokenStore::new(&dir);
    store.save("not.a.token").expect("seed store");

    let mut client = client_for(addr, &dir);
    client.initialize().await.expect("initialize");

    // Startup never gets stuck on a dead token.
    assert_eq!(client.state().phase, SessionPhase::Anonymous);
    assert_eq!(store.load().expect("load"), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_login_failure_then_retry() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("retry");
    let mut client = client_for(addr, &dir);
    client.initialize().await.expect("initialize");

    client
        .register("c@x.com", "Cleo", "Park", "Abcdefg1")
        .await
        .expect("register");
    client.logout().await.expect("logout");

    let err = client.login("c@x.com", "Wrongpass1").await;
    assert!(err.is_err());
    assert_eq!(client.state().phase, SessionPhase::Error);
    assert!(client.state().error.is_some());

    // The error phase does not block a retry.
    client.login("c@x.com", "Abcdefg1").await.expect("login");
    assert_eq!(client.state().phase, SessionPhase::Authenticated);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_duplicate_registration_surfaces_conflict() {
    let addr = spawn_server().await;
    let dir = fresh_store_dir("conflict");
    let mut client = client_for(addr, &dir);
    client.initialize().await.expect("initialize");

    client
        .register("d@x.com", "Dara", "Wong", "Abcdefg1")
        .await
        .expect("register");
    client.logout().await.expect("logout");

    let err = client
        .register("d@x.com", "Dara", "Wong", "Abcdefg1")
        .await
        .expect_err("Duplicate registration should fail");

    match err {
        authgate_client::ClientError::Api { status, .. } => assert_eq!(status, 409),
        other => panic!("Unexpected error: {:?}", other),
    }
    assert_eq!(client.state().phase, SessionPhase::Error);

    let _ = std::fs::remove_dir_all(&dir);
}
