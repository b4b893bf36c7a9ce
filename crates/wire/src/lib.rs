// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON wire protocol between the controller and its agents.
//!
//! Wire format: 8 ASCII hex digits (big-endian u32 body length), then a JSON
//! object body whose `type` field selects the message.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod frame;
mod message;

pub use error::{FrameError, ProtocolError};
pub use frame::{decode, encode, read_message, write_message, FrameCodec, MAX_FRAME};
pub use message::{Message, WireResult};
