// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fresh_signal_is_not_cancelled() {
    let signal = CancelSignal::new();
    assert!(!signal.is_cancelled());
    assert!(signal.cause().is_none());
}

#[test]
fn cancel_sets_cause_and_flag() {
    let signal = CancelSignal::new();
    signal.cancel(CancelCause::UserRequested);
    assert!(signal.is_cancelled());
    assert_eq!(signal.cause(), Some(CancelCause::UserRequested));
}

#[test]
fn second_cancel_does_not_overwrite_first_cause() {
    let signal = CancelSignal::new();
    signal.cancel(CancelCause::Timeout);
    signal.cancel(CancelCause::UserRequested);
    assert_eq!(signal.cause(), Some(CancelCause::Timeout));
}

#[test]
fn clone_observes_same_cancellation() {
    let signal = CancelSignal::new();
    let clone = signal.clone();
    signal.cancel(CancelCause::UserRequested);
    assert!(clone.is_cancelled());
    assert_eq!(clone.cause(), Some(CancelCause::UserRequested));
}

#[test]
fn cancelling_parent_cancels_child() {
    let parent = CancelSignal::new();
    let child = parent.child_token();
    parent.cancel(CancelCause::Timeout);
    assert!(child.is_cancelled());
}

#[test]
fn cancelling_child_does_not_cancel_parent() {
    let parent = CancelSignal::new();
    let child = parent.child_token();
    child.cancel(CancelCause::FailFast { host: "alpha".to_string() });
    assert!(child.is_cancelled());
    assert!(!parent.is_cancelled());
}

#[test]
fn sibling_children_are_isolated() {
    let parent = CancelSignal::new();
    let a = parent.child_token();
    let b = parent.child_token();
    a.cancel(CancelCause::FailFast { host: "alpha".to_string() });
    assert!(a.is_cancelled());
    assert!(!b.is_cancelled());
    assert!(!parent.is_cancelled());
}

#[tokio::test]
async fn cancelled_future_resolves_after_cancel() {
    let signal = CancelSignal::new();
    let waiter = signal.clone();
    let handle = tokio::spawn(async move {
        waiter.cancelled().await;
    });
    signal.cancel(CancelCause::UserRequested);
    handle.await.unwrap();
}
