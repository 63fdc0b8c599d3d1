// config-warden-core/tests/validation.rs
// ============================================================================
// Module: Configuration Validation Tests
// Description: Tests for field checks, cross-field invariants, and
//              normalization.
// Purpose: Ensure candidate documents fail closed on malformed input while
//          reporting every finding in one pass.
// Dependencies: config-warden-core, serde_json
// ============================================================================
//! ## Overview
//! Exercises the validator's five stages: field range checks, intra-section
//! and inter-section consistency, the resource estimate, and security
//! posture. Candidates are untrusted JSON and must never panic the
//! validator.

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

use config_warden_core::ConfigurationDocument;
use config_warden_core::IssueSeverity;
use config_warden_core::validate;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes the default document into a candidate value.
fn default_candidate() -> Value {
    serde_json::to_value(ConfigurationDocument::default()).expect("default serializes")
}

/// Returns whether any error references the given path.
fn has_error_at(verdict: &config_warden_core::ValidationVerdict, path: &str) -> bool {
    verdict.errors.iter().any(|issue| issue.path == path)
}

// ============================================================================
// SECTION: Success Path
// ============================================================================

/// Verifies the default configuration validates with zero errors.
#[test]
fn default_configuration_is_valid() {
    let verdict = validate(&default_candidate());
    assert!(verdict.is_valid);
    assert!(verdict.errors.is_empty());
    assert!(verdict.warnings.is_empty());
    assert!(verdict.normalized.is_some());
}

/// Verifies an empty candidate normalizes entirely from defaults.
#[test]
fn empty_object_normalizes_from_defaults() {
    let verdict = validate(&json!({}));
    assert!(verdict.is_valid);
    let normalized = verdict.normalized.expect("normalized document");
    assert_eq!(normalized, ConfigurationDocument::default());
}

/// Verifies normalization is idempotent on valid inputs.
#[test]
fn normalization_is_idempotent() {
    let first = validate(&json!({"memory": {"max_conversations": 500}}));
    assert!(first.is_valid);
    let normalized = first.normalized.expect("normalized document");
    let candidate = serde_json::to_value(&normalized).expect("normalized serializes");
    let second = validate(&candidate);
    assert!(second.is_valid);
    assert_eq!(second.normalized, Some(normalized));
}

// ============================================================================
// SECTION: Structural Tolerance
// ============================================================================

/// Verifies a non-object candidate is rejected without panicking.
#[test]
fn non_object_candidate_is_rejected() {
    for candidate in [json!(null), json!(42), json!("config"), json!([1, 2])] {
        let verdict = validate(&candidate);
        assert!(!verdict.is_valid);
        assert!(verdict.normalized.is_none());
        assert_eq!(verdict.errors.len(), 1);
    }
}

/// Verifies a section of the wrong shape produces a path-level error.
#[test]
fn non_object_section_is_rejected() {
    let verdict = validate(&json!({"memory": "small"}));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "memory"));
}

/// Verifies null and mistyped leaves become field-level errors.
#[test]
fn mistyped_leaves_produce_field_errors() {
    let verdict = validate(&json!({
        "memory": {"max_conversations": null},
        "thinking": {"max_thinking_tokens": "lots"},
    }));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "memory.max_conversations"));
    assert!(has_error_at(&verdict, "thinking.max_thinking_tokens"));
}

/// Verifies unknown sections and fields are ignored with warnings.
#[test]
fn unknown_sections_and_fields_warn() {
    let verdict = validate(&json!({
        "plugins": {},
        "memory": {"max_conversatoins": 10},
    }));
    assert!(verdict.is_valid);
    assert!(verdict.warnings.iter().any(|issue| issue.path == "plugins"));
    assert!(verdict.warnings.iter().any(|issue| issue.path == "memory.max_conversatoins"));
}

// ============================================================================
// SECTION: Range Checks
// ============================================================================

/// Verifies a negative memory ceiling is rejected with the offending path.
#[test]
fn negative_memory_ceiling_is_rejected() {
    let verdict = validate(&json!({"memory": {"max_memory_mb": -1}}));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "memory.max_memory_mb"));
}

/// Verifies a zero conversation ceiling is rejected with the offending path.
#[test]
fn zero_conversation_ceiling_is_rejected() {
    let verdict = validate(&json!({"memory": {"max_conversations": 0}}));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "memory.max_conversations"));
}

/// Verifies ratio and percent fields enforce their ranges.
#[test]
fn out_of_range_ratios_are_rejected() {
    let verdict = validate(&json!({
        "thinking": {"budget_warning_ratio": 1.5},
        "resources": {"cpu_percent_limit": 0.0},
        "degradation": {"error_rate_limit": -0.1},
    }));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "thinking.budget_warning_ratio"));
    assert!(has_error_at(&verdict, "resources.cpu_percent_limit"));
    assert!(has_error_at(&verdict, "degradation.error_rate_limit"));
}

/// Verifies an unknown environment label is rejected.
#[test]
fn unknown_environment_is_rejected() {
    let verdict = validate(&json!({"server": {"environment": "qa"}}));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "server.environment"));
}

/// Verifies the validator accumulates every error in one pass.
#[test]
fn all_errors_accumulate_in_one_pass() {
    let verdict = validate(&json!({
        "memory": {"max_conversations": 0, "max_memory_mb": -5},
        "correlation": {"max_inflight_requests": false},
    }));
    assert!(!verdict.is_valid);
    assert!(verdict.errors.len() >= 3);
    assert!(has_error_at(&verdict, "memory.max_conversations"));
    assert!(has_error_at(&verdict, "memory.max_memory_mb"));
    assert!(has_error_at(&verdict, "correlation.max_inflight_requests"));
}

// ============================================================================
// SECTION: Cross-Field Invariants
// ============================================================================

/// Verifies the per-operation block ceiling exceeding the global ceiling
/// yields a warning naming both limits.
#[test]
fn block_ceiling_inversion_warns_with_both_limits() {
    let verdict = validate(&json!({
        "thinking": {"max_blocks_per_operation": 8192},
        "memory": {"max_blocks": 4096},
    }));
    assert!(verdict.is_valid);
    let warning = verdict
        .warnings
        .iter()
        .find(|issue| issue.path == "thinking.max_blocks_per_operation")
        .expect("cross-section warning");
    assert!(warning.message.contains("8192"));
    assert!(warning.message.contains("4096"));
}

/// Verifies a recovery interval shorter than the sampling window warns.
#[test]
fn short_recovery_interval_warns() {
    let verdict = validate(&json!({
        "degradation": {"recovery_interval_seconds": 60, "min_samples": 20},
        "resources": {"sample_interval_seconds": 30},
    }));
    assert!(verdict.is_valid);
    assert!(
        verdict
            .warnings
            .iter()
            .any(|issue| issue.path == "degradation.recovery_interval_seconds")
    );
}

/// Verifies an oversized average conversation is an intra-section error.
#[test]
fn single_conversation_exceeding_ceiling_is_rejected() {
    let verdict = validate(&json!({
        "memory": {"max_memory_mb": 1, "average_conversation_kb": 2048},
    }));
    assert!(!verdict.is_valid);
    assert!(has_error_at(&verdict, "memory.average_conversation_kb"));
}

/// Verifies the resource estimate beyond tolerance is a warning, not an
/// error.
#[test]
fn resource_estimate_violation_is_a_warning() {
    let verdict = validate(&json!({
        "memory": {
            "max_conversations": 100_000,
            "average_conversation_kb": 512,
            "max_memory_mb": 512,
        },
    }));
    assert!(verdict.is_valid);
    assert!(verdict.warnings.iter().any(|issue| issue.path == "memory.max_conversations"));
}

// ============================================================================
// SECTION: Security Posture
// ============================================================================

/// Verifies security-sensitive fields produce warnings, never errors.
#[test]
fn security_posture_findings_are_warnings() {
    let verdict = validate(&json!({
        "correlation": {
            "max_id_length": 4,
            "request_timeout_seconds": 3600,
            "max_inflight_requests": 50_000,
        },
    }));
    assert!(verdict.is_valid);
    for path in [
        "correlation.max_id_length",
        "correlation.request_timeout_seconds",
        "correlation.max_inflight_requests",
    ] {
        assert!(
            verdict
                .warnings
                .iter()
                .any(|issue| issue.path == path && issue.severity == IssueSeverity::Warning),
            "expected warning at {path}"
        );
    }
}
