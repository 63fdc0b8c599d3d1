// config-warden-core/src/diff.rs
// ============================================================================
// Module: Structural Configuration Diff
// Description: Recursive key-by-key comparison of JSON configuration trees.
// Purpose: Report property-level drift between reported and target
//          configuration with dotted paths.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The diff walks the union of keys on both sides. Nested objects are
//! recursed; every differing leaf becomes one delta with a dotted path.
//! Typed section slices are serialized to JSON values before diffing, so the
//! algorithm stays generic over the configuration schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Delta Model
// ============================================================================

/// One differing leaf between two configuration trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDelta {
    /// Dotted path to the differing leaf.
    pub path: String,
    /// Value on the current side, `null` when absent.
    pub old_value: Value,
    /// Value on the target side, `null` when absent.
    pub new_value: Value,
}

// ============================================================================
// SECTION: Diff Algorithm
// ============================================================================

/// Computes the structural diff between a current and a target tree.
///
/// Returns one delta per differing leaf, in lexicographic path order.
#[must_use]
pub fn diff_values(current: &Value, target: &Value) -> Vec<ValueDelta> {
    let mut deltas = Vec::new();
    diff_at_path("", current, target, &mut deltas);
    deltas
}

/// Recursive worker carrying the dotted path prefix.
fn diff_at_path(prefix: &str, current: &Value, target: &Value, deltas: &mut Vec<ValueDelta>) {
    match (current, target) {
        (Value::Object(current_map), Value::Object(target_map)) => {
            diff_objects(prefix, current_map, target_map, deltas);
        }
        _ => {
            if current != target {
                deltas.push(ValueDelta {
                    path: prefix.to_string(),
                    old_value: current.clone(),
                    new_value: target.clone(),
                });
            }
        }
    }
}

/// Diffs two JSON objects over the union of their keys.
fn diff_objects(
    prefix: &str,
    current: &Map<String, Value>,
    target: &Map<String, Value>,
    deltas: &mut Vec<ValueDelta>,
) {
    let keys: BTreeSet<&String> = current.keys().chain(target.keys()).collect();
    for key in keys {
        let path = join_path(prefix, key);
        let current_value = current.get(key.as_str()).unwrap_or(&Value::Null);
        let target_value = target.get(key.as_str()).unwrap_or(&Value::Null);
        diff_at_path(&path, current_value, target_value, deltas);
    }
}

/// Joins a path prefix and a key with a dot separator.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
