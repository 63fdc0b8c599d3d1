// config-warden-core/tests/recommendations.rs
// ============================================================================
// Module: Recommendation Tests
// Description: Tests for advisory suggestions on valid configurations.
// Purpose: Ensure legal but sub-optimal settings are categorized correctly.
// Dependencies: config-warden-core
// ============================================================================
//! ## Overview
//! Exercises the advisory `recommend` pass over valid configurations.
//! Recommendations never appear for the default document.

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
use config_warden_core::RecommendationCategory;
use config_warden_core::recommend;

/// Verifies the default configuration draws no recommendations.
#[test]
fn default_configuration_has_no_recommendations() {
    assert!(recommend(&ConfigurationDocument::default()).is_empty());
}

/// Verifies an unusually high thinking budget is a performance suggestion.
#[test]
fn high_thinking_budget_is_performance() {
    let mut config = ConfigurationDocument::default();
    config.thinking.max_thinking_tokens = 500_000;
    let recommendations = recommend(&config);
    assert!(recommendations.iter().any(|rec| {
        rec.category == RecommendationCategory::Performance
            && rec.path == "thinking.max_thinking_tokens"
    }));
}

/// Verifies a week-plus conversation TTL is a memory suggestion.
#[test]
fn long_conversation_ttl_is_memory() {
    let mut config = ConfigurationDocument::default();
    config.memory.conversation_ttl_seconds = 30 * 86_400;
    let recommendations = recommend(&config);
    assert!(recommendations.iter().any(|rec| {
        rec.category == RecommendationCategory::Memory
            && rec.path == "memory.conversation_ttl_seconds"
    }));
}

/// Verifies a long request timeout is a security suggestion.
#[test]
fn long_request_timeout_is_security() {
    let mut config = ConfigurationDocument::default();
    config.correlation.request_timeout_seconds = 400;
    let recommendations = recommend(&config);
    assert!(recommendations.iter().any(|rec| {
        rec.category == RecommendationCategory::Security
            && rec.path == "correlation.request_timeout_seconds"
    }));
}

/// Verifies multiple findings are returned together.
#[test]
fn multiple_findings_accumulate() {
    let mut config = ConfigurationDocument::default();
    config.thinking.max_thinking_tokens = 200_000;
    config.memory.max_conversations = 50_000;
    config.correlation.max_id_length = 512;
    let recommendations = recommend(&config);
    assert!(recommendations.len() >= 3);
}
