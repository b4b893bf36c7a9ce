// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ftl-core: shared data model for the ftl automation controller.

pub mod agent_handle;
pub mod cancel;
pub mod clock;
pub mod host;
pub mod id;
pub mod invocation;
pub mod module_kind;
pub mod result;
pub mod summary;

pub use agent_handle::AgentHandle;
pub use cancel::{CancelCause, CancelSignal};
pub use clock::{Clock, FakeClock, SystemClock};
pub use host::Host;
pub use id::RunId;
pub use invocation::{ArgMap, ModuleInvocation};
pub use module_kind::{ModuleKind, NativeHandle, NativeModule, NativeRegistry, ResolveError};
pub use result::{Diff, ModuleResult};
pub use summary::RunSummary;
