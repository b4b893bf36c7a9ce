// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_has_no_args_and_is_not_dry_run() {
    let inv = ModuleInvocation::new("ftl_noop");
    assert_eq!(inv.name, "ftl_noop");
    assert!(inv.args.is_empty());
    assert!(!inv.dry_run);
}

#[test]
fn builders_set_args_and_dry_run() {
    let mut args = ArgMap::new();
    args.insert("path".to_string(), Value::String("/tmp".to_string()));
    let inv = ModuleInvocation::new("ftl_command").with_args(args.clone()).with_dry_run(true);
    assert_eq!(inv.args, args);
    assert!(inv.dry_run);
}

#[test]
fn serializes_dry_run_as_check_mode() {
    let inv = ModuleInvocation::new("ftl_noop").with_dry_run(true);
    let json = serde_json::to_value(&inv).unwrap();
    assert_eq!(json["check_mode"], Value::Bool(true));
}

#[test]
fn deserializes_missing_args_and_check_mode_as_defaults() {
    let inv: ModuleInvocation = serde_json::from_str(r#"{"name":"ftl_ping"}"#).unwrap();
    assert!(inv.args.is_empty());
    assert!(!inv.dry_run);
}
