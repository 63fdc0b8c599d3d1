// config-warden-control/src/manager.rs
// ============================================================================
// Module: Compliance Manager
// Description: Orchestration facade for validation, enforcement, and status.
// Purpose: Sequence the validator and enforcer, aggregate system status, and
//          retain a bounded operation history.
// Dependencies: config-warden-core, crate::{audit, enforcer, history}, tokio
// ============================================================================

//! ## Overview
//! The manager is an explicitly constructed, explicitly owned instance; there
//! is no global accessor. Configuration-mutating operations serialize on a
//! single manager-level lock, so at most one validate-and-enforce sequence is
//! in flight and the effective final state of concurrent updates is the one
//! scheduled last. Enforcement never runs against a configuration that failed
//! validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use config_warden_core::ComponentName;
use config_warden_core::ConfigurationDocument;
use config_warden_core::ConfigurationPatch;
use config_warden_core::CorrelationId;
use config_warden_core::EnforcementOutcome;
use config_warden_core::SyncState;
use config_warden_core::ValidationVerdict;
use config_warden_core::ViolationSeverity;
use config_warden_core::validate;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::audit::AuditSink;
use crate::audit::OperationAuditEvent;
use crate::clock::unix_millis;
use crate::enforcer::Enforcer;
use crate::history::OperationHistory;
use crate::history::OperationKind;
use crate::history::OperationRecord;

// ============================================================================
// SECTION: Result Types
// ============================================================================

/// Components probed for runtime health during status assembly.
const HEALTH_PROBES: [ComponentName; 3] =
    [ComponentName::Memory, ComponentName::ResourceMonitor, ComponentName::Degradation];

/// Result of a configuration-mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Whether validation and enforcement both succeeded.
    pub success: bool,
    /// Correlation identifier, supplied or generated.
    pub correlation_id: CorrelationId,
    /// Validation verdict, absent when validation never ran.
    pub verdict: Option<ValidationVerdict>,
    /// Enforcement outcome, absent when enforcement never ran.
    pub outcome: Option<EnforcementOutcome>,
    /// Failure description for rejected or partially applied operations.
    pub message: Option<String>,
}

/// One aggregated system-status issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIssue {
    /// Component the issue concerns; `system` for probe failures.
    pub component: String,
    /// Issue severity.
    pub severity: ViolationSeverity,
    /// Human-readable description.
    pub message: String,
    /// Human-readable remediation hint.
    pub recommendation: String,
}

/// Point-in-time system status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Whether the most recent validation accepted its candidate.
    pub is_valid: bool,
    /// Whether the last enforcement cycle completed without component errors.
    pub is_enforced: bool,
    /// Wall-clock time of the last validation, unix milliseconds.
    pub last_validated_ms: Option<u128>,
    /// Wall-clock time of the last enforcement cycle, unix milliseconds.
    pub last_enforced_ms: Option<u128>,
    /// Currently active configuration, if any update was accepted.
    pub active_config: Option<ConfigurationDocument>,
    /// Outstanding issues from compliance checks and health probes.
    pub issues: Vec<StatusIssue>,
    /// Per-component synchronization state from the last cycle.
    pub component_state: BTreeMap<ComponentName, SyncState>,
}

/// Overall health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallHealth {
    /// No outstanding issues.
    Healthy,
    /// Medium-severity issues or enforcement not current.
    Degraded,
    /// At least one high-severity issue.
    Critical,
}

/// Human-readable health report derived from system status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall verdict.
    pub overall: OverallHealth,
    /// Outstanding issues.
    pub issues: Vec<StatusIssue>,
    /// Deduplicated remediation hints.
    pub recommendations: Vec<String>,
}

// ============================================================================
// SECTION: Manager State
// ============================================================================

/// Mutable manager state guarded by the operation lock.
#[derive(Default)]
struct ManagerState {
    /// Last accepted configuration.
    active: Option<ConfigurationDocument>,
    /// Wall-clock time of the last validation.
    last_validated_ms: Option<u128>,
    /// Whether the most recent validation accepted its candidate.
    last_valid: bool,
    /// Bounded operation history.
    history: OperationHistory,
}

/// Shared manager internals.
struct ManagerInner {
    /// Enforcer driving the managed components.
    enforcer: Enforcer,
    /// Audit sink for operation events.
    audit: Arc<dyn AuditSink>,
    /// Serializes configuration-mutating operations.
    state: Mutex<ManagerState>,
}

/// Orchestration facade over the validator and enforcer.
#[derive(Clone)]
pub struct ComplianceManager {
    /// Shared internals.
    inner: Arc<ManagerInner>,
}

impl ComplianceManager {
    /// Creates a manager over the given enforcer and audit sink.
    #[must_use]
    pub fn new(enforcer: Enforcer, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                enforcer,
                audit,
                state: Mutex::new(ManagerState::default()),
            }),
        }
    }

    /// Returns the enforcer backing this manager.
    #[must_use]
    pub fn enforcer(&self) -> &Enforcer {
        &self.inner.enforcer
    }

    /// Merges a partial override onto the default configuration and applies
    /// the result.
    pub async fn initialize(
        &self,
        patch: Option<ConfigurationPatch>,
        correlation_id: Option<CorrelationId>,
    ) -> UpdateResult {
        let document =
            ConfigurationDocument::default().merged(&patch.unwrap_or_default());
        let candidate = serde_json::to_value(&document).unwrap_or(Value::Null);
        self.update(candidate, correlation_id).await
    }

    /// Validates a candidate and, when valid, enforces it and refreshes the
    /// reconciliation loop.
    ///
    /// Enforcement never runs against an invalid candidate. Exactly one
    /// history entry is appended per call.
    pub async fn update(
        &self,
        candidate: Value,
        correlation_id: Option<CorrelationId>,
    ) -> UpdateResult {
        let correlation_id = correlation_id.unwrap_or_else(CorrelationId::generate);
        let mut state = self.inner.state.lock().await;

        let verdict = validate(&candidate);
        state.last_validated_ms = Some(unix_millis());
        state.last_valid = verdict.is_valid;

        let Some(normalized) = verdict.normalized.clone() else {
            self.record_operation(
                &mut state,
                &correlation_id,
                OperationKind::Update,
                false,
                &verdict,
                None,
            );
            return UpdateResult {
                success: false,
                correlation_id,
                verdict: Some(verdict),
                outcome: None,
                message: Some("configuration rejected by validation".to_string()),
            };
        };

        let outcome = self.inner.enforcer.enforce(&normalized, &correlation_id).await;
        let success = outcome.enforced;
        state.active = Some(normalized.clone());
        if success {
            self.inner.enforcer.start_loop(normalized).await;
        }

        self.record_operation(
            &mut state,
            &correlation_id,
            OperationKind::Update,
            success,
            &verdict,
            Some(&outcome),
        );
        UpdateResult {
            success,
            correlation_id,
            verdict: Some(verdict),
            outcome: Some(outcome),
            message: (!success)
                .then(|| "one or more components failed enforcement".to_string()),
        }
    }

    /// Validates a candidate without enforcing it.
    ///
    /// Appends one validate entry to the operation history.
    pub async fn validate_only(
        &self,
        candidate: Value,
        correlation_id: Option<CorrelationId>,
    ) -> UpdateResult {
        let correlation_id = correlation_id.unwrap_or_else(CorrelationId::generate);
        let mut state = self.inner.state.lock().await;

        let verdict = validate(&candidate);
        state.last_validated_ms = Some(unix_millis());
        state.last_valid = verdict.is_valid;
        let success = verdict.is_valid;

        self.record_operation(
            &mut state,
            &correlation_id,
            OperationKind::Validate,
            success,
            &verdict,
            None,
        );
        UpdateResult {
            success,
            correlation_id,
            verdict: Some(verdict),
            outcome: None,
            message: (!success)
                .then(|| "configuration rejected by validation".to_string()),
        }
    }

    /// Re-enforces the active configuration without re-validating it.
    ///
    /// Appends one enforce entry to the operation history. Fails when no
    /// configuration is active yet.
    pub async fn enforce_now(&self, correlation_id: Option<CorrelationId>) -> UpdateResult {
        let correlation_id = correlation_id.unwrap_or_else(CorrelationId::generate);
        let mut state = self.inner.state.lock().await;

        let Some(active) = state.active.clone() else {
            return self.precondition_failure(
                &mut state,
                correlation_id,
                OperationKind::Enforce,
                "no active configuration to enforce",
            );
        };

        let outcome = self.inner.enforcer.enforce(&active, &correlation_id).await;
        let success = outcome.enforced;
        let record = OperationRecord {
            timestamp_ms: unix_millis(),
            correlation_id: correlation_id.clone(),
            operation: OperationKind::Enforce,
            success,
        };
        self.append_record(&mut state, record, 0, outcome.warnings.len(), outcome.changes.len());
        UpdateResult {
            success,
            correlation_id,
            verdict: None,
            outcome: Some(outcome),
            message: (!success)
                .then(|| "one or more components failed enforcement".to_string()),
        }
    }

    /// Re-runs `update` with the currently active configuration.
    ///
    /// Fails with a precondition error when no configuration is active yet.
    pub async fn revalidate(&self, correlation_id: Option<CorrelationId>) -> UpdateResult {
        let correlation_id = correlation_id.unwrap_or_else(CorrelationId::generate);
        let active = {
            let mut state = self.inner.state.lock().await;
            match state.active.clone() {
                Some(active) => active,
                None => {
                    return self.precondition_failure(
                        &mut state,
                        correlation_id,
                        OperationKind::Update,
                        "no active configuration to revalidate",
                    );
                }
            }
        };
        let candidate = serde_json::to_value(&active).unwrap_or(Value::Null);
        self.update(candidate, Some(correlation_id)).await
    }

    /// Assembles a point-in-time system status.
    ///
    /// Combines the enforcer's compliance check with independent runtime
    /// health probes. A probe failure becomes a single high-severity `system`
    /// issue; remaining probes still run.
    pub async fn status(&self) -> SystemStatus {
        let check = self.inner.enforcer.check_compliance().await;
        let runtime = self.inner.enforcer.state().await;

        let (active, last_validated_ms, last_valid) = {
            let state = self.inner.state.lock().await;
            (state.active.clone(), state.last_validated_ms, state.last_valid)
        };

        let mut issues: Vec<StatusIssue> = check
            .violations
            .into_iter()
            .map(|violation| StatusIssue {
                component: violation.component,
                severity: violation.severity,
                message: violation.message,
                recommendation: violation.recommendation,
            })
            .collect();

        let timeout = self.inner.enforcer.tuning().component_timeout;
        for name in HEALTH_PROBES {
            let Some(component) = self.inner.enforcer.component(name) else {
                continue;
            };
            let probe = tokio::time::timeout(timeout, component.metrics()).await;
            let failure = match probe {
                Ok(Ok(_)) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(_) => Some(format!("timed out after {}ms", timeout.as_millis())),
            };
            if let Some(reason) = failure {
                issues.push(StatusIssue {
                    component: "system".to_string(),
                    severity: ViolationSeverity::High,
                    message: format!("health probe for {name} failed: {reason}"),
                    recommendation: format!("check {name} availability"),
                });
            }
        }

        let is_enforced = runtime.as_ref().is_some_and(|state| {
            state.component_state.values().all(|sync| *sync != SyncState::Error)
        });
        SystemStatus {
            is_valid: last_valid,
            is_enforced,
            last_validated_ms,
            last_enforced_ms: runtime.as_ref().map(|state| state.last_enforced_at_ms),
            active_config: active,
            issues,
            component_state: runtime.map(|state| state.component_state).unwrap_or_default(),
        }
    }

    /// Derives a health report from the current system status.
    pub async fn health_report(&self) -> HealthReport {
        let status = self.status().await;
        let has_high =
            status.issues.iter().any(|issue| issue.severity == ViolationSeverity::High);
        let has_medium =
            status.issues.iter().any(|issue| issue.severity == ViolationSeverity::Medium);

        let overall = if has_high {
            OverallHealth::Critical
        } else if has_medium || !status.is_enforced || status.last_enforced_ms.is_none() {
            OverallHealth::Degraded
        } else {
            OverallHealth::Healthy
        };

        let mut recommendations: Vec<String> = Vec::new();
        for issue in &status.issues {
            if !recommendations.contains(&issue.recommendation) {
                recommendations.push(issue.recommendation.clone());
            }
        }

        HealthReport {
            overall,
            issues: status.issues,
            recommendations,
        }
    }

    /// Returns up to `limit` of the most recent operation records, newest
    /// first.
    pub async fn history(&self, limit: usize) -> Vec<OperationRecord> {
        self.inner.state.lock().await.history.recent(limit)
    }

    /// Stops the reconciliation loop. Part of the explicit teardown contract.
    pub fn shutdown(&self) {
        self.inner.enforcer.stop_loop();
    }

    /// Records a precondition failure as one history entry and builds the
    /// failed result.
    fn precondition_failure(
        &self,
        state: &mut ManagerState,
        correlation_id: CorrelationId,
        operation: OperationKind,
        message: &str,
    ) -> UpdateResult {
        let record = OperationRecord {
            timestamp_ms: unix_millis(),
            correlation_id: correlation_id.clone(),
            operation,
            success: false,
        };
        self.append_record(state, record, 0, 0, 0);
        UpdateResult {
            success: false,
            correlation_id,
            verdict: None,
            outcome: None,
            message: Some(message.to_string()),
        }
    }

    /// Records one operation in history and emits its audit event.
    fn record_operation(
        &self,
        state: &mut ManagerState,
        correlation_id: &CorrelationId,
        operation: OperationKind,
        success: bool,
        verdict: &ValidationVerdict,
        outcome: Option<&EnforcementOutcome>,
    ) {
        let record = OperationRecord {
            timestamp_ms: unix_millis(),
            correlation_id: correlation_id.clone(),
            operation,
            success,
        };
        let warning_count = verdict.warnings.len()
            + outcome.map_or(0, |outcome| outcome.warnings.len());
        let change_count = outcome.map_or(0, |outcome| outcome.changes.len());
        self.append_record(state, record, verdict.errors.len(), warning_count, change_count);
    }

    /// Appends a record to history and emits the matching audit event.
    fn append_record(
        &self,
        state: &mut ManagerState,
        record: OperationRecord,
        error_count: usize,
        warning_count: usize,
        change_count: usize,
    ) {
        self.inner.audit.record(&OperationAuditEvent {
            event: "config_operation",
            timestamp_ms: record.timestamp_ms,
            correlation_id: record.correlation_id.clone(),
            operation: record.operation,
            success: record.success,
            error_count,
            warning_count,
            change_count,
        });
        state.history.push(record);
    }
}
