// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ftl modules list`: enumerates what the resolver could dispatch an
//! invocation to, without running anything.

use crate::config::ControllerConfig;
use crate::controller::Controller;

pub fn list(config: &ControllerConfig) {
    let controller = Controller::configure(config);
    let resolver = controller.resolver();

    let mut natives: Vec<&str> = resolver.native_names().collect();
    natives.sort_unstable();
    for name in natives {
        println!("native     {name}");
    }

    for name in resolver.discover_external() {
        println!("external   {name}");
    }
}
