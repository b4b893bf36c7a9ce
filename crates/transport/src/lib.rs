// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session factory abstraction plus a local-process reference implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod local_process;
mod transport;

pub use error::TransportError;
pub use local_process::LocalProcessSessionFactory;
pub use transport::{AgentTransport, ChildTransport, SessionFactory};
