// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted run state: a versioned document plus a `StateStore` interface
//! with a JSON-file reference implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod document;
mod error;
mod store;

pub use document::{StateDocument, StateMetadata, CURRENT_VERSION};
pub use error::StateError;
pub use store::{exists, JsonFileStateStore, StateStore};
