// config-warden-control/tests/audit_sink.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for the JSON-lines file audit sink.
// Purpose: Ensure operations emit one structured line each, without
//          configuration payloads.
// Dependencies: config-warden-control, config-warden-core, tempfile, tokio
// ============================================================================
//! ## Overview
//! Writes audit events through a real manager into a temporary file and
//! inspects the emitted JSON lines.

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

use std::fs;
use std::sync::Arc;

use config_warden_control::ComplianceManager;
use config_warden_control::Enforcer;
use config_warden_control::EnforcerTuning;
use config_warden_control::FileAuditSink;
use config_warden_control::InMemoryComponent;
use config_warden_core::ComponentName;
use config_warden_core::CorrelationId;
use config_warden_core::ManagedComponent;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a manager writing audit events to the given file.
fn manager_with_audit(path: &std::path::Path) -> ComplianceManager {
    let components: Vec<Arc<dyn ManagedComponent>> = vec![
        Arc::new(InMemoryComponent::new(ComponentName::Memory)),
        Arc::new(InMemoryComponent::new(ComponentName::ResourceMonitor)),
        Arc::new(InMemoryComponent::new(ComponentName::Degradation)),
        Arc::new(InMemoryComponent::new(ComponentName::Correlation)),
    ];
    let enforcer = Enforcer::new(components, EnforcerTuning::default());
    let sink = FileAuditSink::new(path).expect("audit file opens");
    ComplianceManager::new(enforcer, Arc::new(sink))
}

/// Reads the audit file back as parsed JSON lines.
fn read_events(path: &std::path::Path) -> Vec<Value> {
    let contents = fs::read_to_string(path).expect("audit file reads");
    contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("audit line parses"))
        .collect()
}

// ============================================================================
// SECTION: Audit Emission
// ============================================================================

/// Verifies each operation emits exactly one well-formed JSON line.
#[tokio::test(flavor = "multi_thread")]
async fn each_operation_emits_one_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let manager = manager_with_audit(&path);

    let _init = manager.initialize(None, None).await;
    let _reject = manager.update(json!({"memory": {"max_conversations": -1}}), None).await;
    let _check = manager.validate_only(json!({}), None).await;
    manager.shutdown();

    let events = read_events(&path);
    assert_eq!(events.len(), 3);
    for event in &events {
        assert_eq!(event["event"], "config_operation");
        assert!(event["timestamp_ms"].is_number());
        assert!(event["correlation_id"].is_string());
    }
}

/// Verifies success, counts, and operation kind are captured per event.
#[tokio::test(flavor = "multi_thread")]
async fn events_capture_operation_outcomes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let manager = manager_with_audit(&path);

    let accepted = manager
        .update(json!({}), Some(CorrelationId::new("audit-accept")))
        .await;
    assert!(accepted.success);
    let rejected = manager
        .update(
            json!({"memory": {"max_conversations": -1}}),
            Some(CorrelationId::new("audit-reject")),
        )
        .await;
    assert!(!rejected.success);
    manager.shutdown();

    let events = read_events(&path);
    assert_eq!(events.len(), 2);

    assert_eq!(events[0]["correlation_id"], "audit-accept");
    assert_eq!(events[0]["operation"], "update");
    assert_eq!(events[0]["success"], true);
    assert!(events[0]["change_count"].as_u64().unwrap_or_default() > 0);

    assert_eq!(events[1]["correlation_id"], "audit-reject");
    assert_eq!(events[1]["success"], false);
    assert!(events[1]["error_count"].as_u64().unwrap_or_default() > 0);
    assert_eq!(events[1]["change_count"], 0);
}

/// Verifies audit events never carry configuration payloads.
#[tokio::test(flavor = "multi_thread")]
async fn events_exclude_configuration_payloads() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let manager = manager_with_audit(&path);

    let _accept = manager.update(json!({"memory": {"max_conversations": 123}}), None).await;
    manager.shutdown();

    let contents = fs::read_to_string(&path).expect("audit file reads");
    assert!(!contents.contains("max_conversations"));
    assert!(!contents.contains("memory"));
}
