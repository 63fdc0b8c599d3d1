// config-warden-core/tests/proptest_validation.rs
// ============================================================================
// Module: Validation Property-Based Tests
// Description: Property tests for validator tolerance and normalization.
// Purpose: Detect panics and invariants across wide candidate ranges.
// ============================================================================

//! Property-based tests for validator invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use config_warden_core::validate;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

/// Strategy over arbitrary JSON values of bounded depth.
fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| { serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number) }),
        "[a-z]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,24}", inner, 0 .. 6).prop_map(|map| {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

proptest! {
    /// The validator never panics and keeps the validity invariant on
    /// arbitrary JSON.
    #[test]
    fn validate_tolerates_arbitrary_json(candidate in json_value_strategy(3)) {
        let verdict = validate(&candidate);
        prop_assert_eq!(verdict.is_valid, verdict.errors.is_empty());
        prop_assert_eq!(verdict.is_valid, verdict.normalized.is_some());
    }

    /// Normalization is idempotent: re-validating a normalized document
    /// reproduces it.
    #[test]
    fn normalization_is_idempotent_on_valid_inputs(
        max_conversations in 1_u64 .. 10_000,
        max_memory_mb in 1_u64 .. 100_000,
        max_blocks in 1_u64 .. 1_000_000,
    ) {
        let candidate = json!({
            "memory": {
                "max_conversations": max_conversations,
                "max_memory_mb": max_memory_mb,
                "max_blocks": max_blocks,
            },
        });
        let first = validate(&candidate);
        if let Some(normalized) = first.normalized {
            let roundtrip = serde_json::to_value(&normalized).map_err(|_| {
                TestCaseError::fail("normalized document must serialize")
            })?;
            let second = validate(&roundtrip);
            prop_assert!(second.is_valid);
            prop_assert_eq!(second.normalized, Some(normalized));
        }
    }
}
