// config-warden-core/tests/diff.rs
// ============================================================================
// Module: Structural Diff Tests
// Description: Tests for the recursive configuration diff.
// Purpose: Ensure drift detection reports every differing leaf with a dotted
//          path.
// Dependencies: config-warden-core, serde_json
// ============================================================================
//! ## Overview
//! Exercises the recursive key-by-key diff over nested JSON trees, including
//! keys present on only one side.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use config_warden_core::diff_values;
use serde_json::Value;
use serde_json::json;

/// Verifies identical trees produce no deltas.
#[test]
fn identical_trees_produce_no_deltas() {
    let tree = json!({"limits": {"max": 10, "min": 1}, "enabled": true});
    assert!(diff_values(&tree, &tree.clone()).is_empty());
}

/// Verifies nested differences are reported with dotted paths.
#[test]
fn nested_differences_use_dotted_paths() {
    let current = json!({"limits": {"max": 10, "min": 1}});
    let target = json!({"limits": {"max": 20, "min": 1}});
    let deltas = diff_values(&current, &target);
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].path, "limits.max");
    assert_eq!(deltas[0].old_value, json!(10));
    assert_eq!(deltas[0].new_value, json!(20));
}

/// Verifies a key absent on the current side reports a null old value.
#[test]
fn missing_current_key_reports_null_old_value() {
    let deltas = diff_values(&json!({}), &json!({"max": 5}));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].path, "max");
    assert_eq!(deltas[0].old_value, Value::Null);
    assert_eq!(deltas[0].new_value, json!(5));
}

/// Verifies a key absent on the target side reports a null new value.
#[test]
fn extra_current_key_reports_null_new_value() {
    let deltas = diff_values(&json!({"legacy": 1}), &json!({}));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].path, "legacy");
    assert_eq!(deltas[0].old_value, json!(1));
    assert_eq!(deltas[0].new_value, Value::Null);
}

/// Verifies a type change at an interior node is one leaf delta.
#[test]
fn shape_change_is_reported_at_its_path() {
    let deltas = diff_values(&json!({"limits": 3}), &json!({"limits": {"max": 3}}));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].path, "limits");
}

/// Verifies scalar roots diff at the empty path.
#[test]
fn scalar_roots_diff_at_empty_path() {
    let deltas = diff_values(&json!(1), &json!(2));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].path, "");
}

/// Verifies deltas come out in lexicographic path order.
#[test]
fn deltas_are_ordered_by_path() {
    let current = json!({"b": 1, "a": {"z": 1, "m": 1}});
    let target = json!({"b": 2, "a": {"z": 2, "m": 2}});
    let paths: Vec<String> =
        diff_values(&current, &target).into_iter().map(|delta| delta.path).collect();
    assert_eq!(paths, vec!["a.m".to_string(), "a.z".to_string(), "b".to_string()]);
}
