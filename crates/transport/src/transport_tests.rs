// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

#[tokio::test]
async fn child_transport_echoes_bytes_through_a_cat_process() {
    let child = Command::new("cat")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("failed to spawn cat");

    let mut transport = ChildTransport::new(child).expect("child has piped stdio");
    transport.write_all(b"ping\n").await.unwrap();
    transport.flush().await.unwrap();

    let mut buf = [0u8; 5];
    transport.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"ping\n");
}

#[tokio::test]
async fn close_reaps_the_child_after_stdin_drops() {
    let child = Command::new("cat")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("failed to spawn cat");

    let transport = ChildTransport::new(child).expect("child has piped stdio");
    let ChildTransport { io, mut child } = transport;
    drop(io);
    let status = child.wait().await.unwrap();
    assert!(status.success());
}
