//! Integration tests for server shutdown.

mod common;

use common::TestServer;
use linechat::ServerPhase;
use std::time::Duration;
use tokio::net::TcpStream;

#[tokio::test]
async fn test_shutdown_closes_every_client() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();
    alice.recv_until(|l| l == "bob joined the chat!").await.unwrap();

    let state = server.state().clone();
    assert!(state.shutdown());
    assert!(!state.shutdown());

    // No leave notices: both streams just end.
    assert!(alice.recv_until_closed().await.unwrap().is_empty());
    assert!(bob.recv_until_closed().await.unwrap().is_empty());
    server.wait_for_clients(0).await.unwrap();
}

#[tokio::test]
async fn test_stopped_server_refuses_connections() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let addr = server.address();
    let state = server.state().clone();

    server.stop().await.unwrap();

    assert_eq!(state.phase(), ServerPhase::Stopped);
    let attempt = tokio::time::timeout(Duration::from_secs(2), TcpStream::connect(addr)).await;
    assert!(matches!(attempt, Ok(Err(_))));
}

#[tokio::test]
async fn test_shutdown_unblocks_unregistered_clients() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");

    let mut waiting = server.connect("waiting").await.unwrap();
    assert_eq!(waiting.recv().await.unwrap(), common::client::PROMPT);
    server.state().shutdown();

    // The handler was blocked reading a nickname; closing unblocks it.
    assert!(waiting.recv_until_closed().await.unwrap().is_empty());
    server.wait_for_clients(0).await.unwrap();
}
