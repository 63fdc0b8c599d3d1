// config-warden-core/src/core/state.rs
// ============================================================================
// Module: Enforcement Outcome and Compliance State
// Description: Per-call enforcement results and long-lived compliance state.
// Purpose: Record what enforcement changed and how components track the
//          target.
// Dependencies: crate::core::{document, identifiers}, serde
// ============================================================================

//! ## Overview
//! An enforcement outcome is created fresh per enforcement call. The runtime
//! compliance state is owned exclusively by the enforcer and exposed to
//! callers only as copies, never as live references.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::document::ConfigurationDocument;
use crate::core::identifiers::ComponentName;

// ============================================================================
// SECTION: Enforcement Outcome
// ============================================================================

/// Reason string attached to every enforcement-driven change.
pub const ENFORCEMENT_REASON: &str = "configuration enforcement";

/// One applied property-level difference on a managed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigChange {
    /// Component the change was applied to.
    pub component: ComponentName,
    /// Dotted property path within the component's configuration slice.
    pub property: String,
    /// Value reported by the component before the update.
    pub old_value: Value,
    /// Value pushed from the target configuration.
    pub new_value: Value,
    /// Why the change was applied.
    pub reason: String,
}

/// Result of one enforcement cycle over all managed components.
///
/// # Invariants
/// - `enforced` is `true` iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforcementOutcome {
    /// Whether every component was processed without error.
    pub enforced: bool,
    /// All applied property-level changes, in component order.
    pub changes: Vec<ConfigChange>,
    /// Soft-compliance warnings from live metric checks.
    pub warnings: Vec<String>,
    /// Per-component failures, each prefixed with the component name.
    pub errors: Vec<String>,
}

// ============================================================================
// SECTION: Runtime Compliance State
// ============================================================================

/// Synchronization state of one managed component after an enforcement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Component configuration matched the target.
    Synchronized,
    /// Component configuration had drifted and was corrected.
    Drift,
    /// Component could not be read or updated.
    Error,
}

/// Long-lived compliance state owned by the enforcer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeComplianceState {
    /// Last target configuration pushed to the components.
    pub active_config: ConfigurationDocument,
    /// Wall-clock time of the last enforcement cycle, unix milliseconds.
    pub last_enforced_at_ms: u128,
    /// Number of enforcement cycles performed so far.
    pub enforcement_count: u64,
    /// Per-component synchronization state from the last cycle.
    pub component_state: BTreeMap<ComponentName, SyncState>,
}

// ============================================================================
// SECTION: Compliance Check
// ============================================================================

/// Severity of a compliance violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// Component failure or overdue enforcement.
    High,
    /// Corrected drift.
    Medium,
}

/// One compliance violation with a remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    /// Component the violation concerns, or `enforcer` for loop-level issues.
    pub component: String,
    /// Violation severity.
    pub severity: ViolationSeverity,
    /// Human-readable description.
    pub message: String,
    /// Human-readable remediation hint.
    pub recommendation: String,
}

/// Point-in-time compliance verdict derived from the runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Whether the system currently tracks the target configuration.
    pub compliant: bool,
    /// Outstanding violations, empty when compliant.
    pub violations: Vec<ComplianceViolation>,
}
