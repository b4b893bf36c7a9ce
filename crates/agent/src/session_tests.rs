// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ftl_core::ModuleInvocation;
use ftl_wire::FrameCodec;
use tokio::io::DuplexStream;

fn transport_pair() -> (Box<dyn AgentTransport>, FrameCodec<DuplexStream>) {
    let (client, server) = tokio::io::duplex(8192);
    (Box::new(client), FrameCodec::new(server))
}

#[tokio::test]
async fn open_succeeds_on_hello_first_frame() {
    let (client, mut server) = transport_pair();
    let agent = tokio::spawn(async move {
        server.send(&Message::Hello { version: "1.0".into(), pid: 123 }).await.unwrap();
        server
    });

    let session = AgentSession::open(client).await.unwrap();
    assert_eq!(session.agent_version, "1.0");
    assert_eq!(session.agent_pid, 123);
    agent.await.unwrap();
}

#[tokio::test]
async fn open_fails_when_first_frame_is_not_hello() {
    let (client, mut server) = transport_pair();
    tokio::spawn(async move {
        server.send(&Message::Info).await.unwrap();
    });

    let err = AgentSession::open(client).await.unwrap_err();
    assert!(matches!(err, SessionError::HandshakeFailed(_)));
}

#[tokio::test]
async fn open_fails_when_stream_closes_before_hello() {
    let (client, server) = transport_pair();
    drop(server);
    let err = AgentSession::open(client).await.unwrap_err();
    assert!(matches!(err, SessionError::HandshakeFailed(_)));
}

async fn open_ready_session() -> (AgentSession, FrameCodec<DuplexStream>) {
    let (client, mut server) = transport_pair();
    server.send(&Message::Hello { version: "1.0".into(), pid: 1 }).await.unwrap();
    let session = AgentSession::open(client).await.unwrap();
    (session, server)
}

#[tokio::test]
async fn call_delivers_events_in_arrival_order_before_the_result() {
    let (session, mut server) = open_ready_session().await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = CancelSignal::new();

    let server_task = tokio::spawn(async move {
        let received = server.receive().await.unwrap();
        assert!(matches!(received, Message::Module { .. }));
        server
            .send(&Message::Event { event: "progress".into(), message: "25%".into() })
            .await
            .unwrap();
        server
            .send(&Message::Event { event: "progress".into(), message: "75%".into() })
            .await
            .unwrap();
        server
            .send(&Message::Outcome(WireResult {
                changed: true,
                failed: false,
                msg: Some("done".into()),
                data: None,
                warnings: Vec::new(),
                diff: None,
            }))
            .await
            .unwrap();
    });

    let result =
        session.call(&ModuleInvocation::new("ftl_command"), false, &tx, &cancel).await.unwrap();
    server_task.await.unwrap();

    assert!(result.changed);
    assert_eq!(result.msg.as_deref(), Some("done"));

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.message, "25%");
    assert_eq!(second.message, "75%");
}

#[tokio::test]
async fn unexpected_message_while_awaiting_result_poisons_the_session() {
    let (session, mut server) = open_ready_session().await;
    let (tx, _rx) = mpsc::unbounded_channel();
    let cancel = CancelSignal::new();

    tokio::spawn(async move {
        let _ = server.receive().await.unwrap();
        server.send(&Message::Hello { version: "1.0".into(), pid: 1 }).await.unwrap();
    });

    let err =
        session.call(&ModuleInvocation::new("ftl_command"), false, &tx, &cancel).await.unwrap_err();
    assert!(matches!(err, SessionError::Protocol(_)));
    assert!(session.is_poisoned().await);
}

#[tokio::test]
async fn poisoned_session_rejects_further_calls() {
    let (session, mut server) = open_ready_session().await;
    let (tx, _rx) = mpsc::unbounded_channel();
    let cancel = CancelSignal::new();

    tokio::spawn(async move {
        let _ = server.receive().await.unwrap();
        server.send(&Message::Shutdown).await.unwrap();
    });
    let first =
        session.call(&ModuleInvocation::new("ftl_command"), false, &tx, &cancel).await.unwrap_err();
    assert!(matches!(first, SessionError::Protocol(_)));

    let second =
        session.call(&ModuleInvocation::new("ftl_command"), false, &tx, &cancel).await.unwrap_err();
    assert!(matches!(second, SessionError::Poisoned));
}

#[tokio::test]
async fn cancellation_poisons_the_session_and_sends_shutdown() {
    let (session, mut server) = open_ready_session().await;
    let (tx, _rx) = mpsc::unbounded_channel();
    let cancel = CancelSignal::new();

    // Server reads the request but never replies, simulating a stuck agent.
    let server_task = tokio::spawn(async move {
        let _ = server.receive().await.unwrap();
        let shutdown = server.receive().await.unwrap();
        assert!(matches!(shutdown, Message::Shutdown));
    });

    let cancel_clone = cancel.clone();
    let call = tokio::spawn(async move {
        session.call(&ModuleInvocation::new("ftl_command"), false, &tx, &cancel_clone).await
    });

    // Give the call a moment to send its request before cancelling.
    tokio::task::yield_now().await;
    cancel.cancel(ftl_core::CancelCause::UserRequested);

    let result = call.await.unwrap();
    assert!(matches!(result, Err(SessionError::Cancelled)));
    server_task.await.unwrap();
}

#[tokio::test]
async fn close_is_idempotent_and_sends_shutdown_once() {
    let (session, mut server) = open_ready_session().await;
    let server_task = tokio::spawn(async move {
        let msg = server.receive().await.unwrap();
        assert!(matches!(msg, Message::Shutdown));
    });

    session.close().await;
    session.close().await; // second call must not send another shutdown frame
    server_task.await.unwrap();
}
