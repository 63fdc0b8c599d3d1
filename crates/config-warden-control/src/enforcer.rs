// config-warden-control/src/enforcer.rs
// ============================================================================
// Module: Configuration Enforcer
// Description: Drift detection, enforcement, and periodic reconciliation.
// Purpose: Push the validated target configuration to managed components and
//          keep their live state converged.
// Dependencies: config-warden-core, tokio
// ============================================================================

//! ## Overview
//! The enforcer processes components in a fixed order: read the reported
//! configuration, diff it against the target slice, apply the slice on a
//! non-empty diff, then compare live metrics against target thresholds for
//! soft compliance. One component's failure never blocks the others; every
//! failure is converted to data in the outcome.
//!
//! A reconciliation loop re-applies the last accepted configuration on a
//! timer to catch drift introduced by the components themselves. At most one
//! enforcement cycle is in flight at a time; reconciliation ticks and
//! external calls serialize on the same lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use config_warden_core::ComplianceCheck;
use config_warden_core::ComplianceViolation;
use config_warden_core::ComponentError;
use config_warden_core::ComponentMetrics;
use config_warden_core::ComponentName;
use config_warden_core::ConfigChange;
use config_warden_core::ConfigurationDocument;
use config_warden_core::CorrelationId;
use config_warden_core::ENFORCEMENT_REASON;
use config_warden_core::EnforcementOutcome;
use config_warden_core::ManagedComponent;
use config_warden_core::RuntimeComplianceState;
use config_warden_core::SyncState;
use config_warden_core::ViolationSeverity;
use config_warden_core::diff_values;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::unix_millis;

// ============================================================================
// SECTION: Tuning
// ============================================================================

/// Tunable thresholds for the enforcement loop.
///
/// The defaults reproduce the observed behavior: a 60s reconciliation
/// interval, a 10% soft-compliance tolerance, and an overdue cutoff at twice
/// the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnforcerTuning {
    /// Reconciliation loop interval.
    pub loop_interval: Duration,
    /// Soft-compliance tolerance factor over target thresholds.
    pub soft_tolerance: f64,
    /// Enforcement is overdue past `overdue_factor x loop_interval`.
    pub overdue_factor: f64,
    /// Bound on each managed-component call.
    pub component_timeout: Duration,
}

impl Default for EnforcerTuning {
    fn default() -> Self {
        Self {
            loop_interval: Duration::from_secs(60),
            soft_tolerance: 1.10,
            overdue_factor: 2.0,
            component_timeout: Duration::from_secs(5),
        }
    }
}

// ============================================================================
// SECTION: Enforcer
// ============================================================================

/// Handle to a running reconciliation loop.
struct LoopHandle {
    /// Signals the loop to stop at the next tick boundary.
    shutdown: watch::Sender<bool>,
    /// Spawned loop task.
    task: JoinHandle<()>,
}

/// Shared enforcer internals.
struct EnforcerInner {
    /// Managed components in registration order.
    components: Vec<Arc<dyn ManagedComponent>>,
    /// Tunable thresholds.
    tuning: EnforcerTuning,
    /// Serializes enforcement cycles; ticks and external calls share it.
    cycle: Mutex<()>,
    /// Compliance state owned exclusively by the enforcer.
    state: Mutex<Option<RuntimeComplianceState>>,
    /// Active reconciliation loop, if any.
    loop_task: StdMutex<Option<LoopHandle>>,
}

/// Pushes validated configuration to managed components and reconciles drift.
#[derive(Clone)]
pub struct Enforcer {
    /// Shared internals.
    inner: Arc<EnforcerInner>,
}

/// Outcome of processing a single component within one enforcement cycle.
///
/// Failures are data, not control flow: the cycle aggregates one outcome per
/// component so partial failures stay independently inspectable.
enum ComponentOutcome {
    /// Read, diff, update, and metric check completed.
    Processed {
        /// Changes applied to the component.
        changes: Vec<ConfigChange>,
        /// Soft-compliance warnings from the metric check.
        warnings: Vec<String>,
    },
    /// The component failed mid-step; remaining components still run.
    Failed {
        /// Changes already applied before the failing step. Empty when the
        /// read or the update itself failed.
        changes: Vec<ConfigChange>,
        /// Failure description prefixed with the component name.
        message: String,
    },
}

impl Enforcer {
    /// Creates an enforcer over the given components.
    #[must_use]
    pub fn new(components: Vec<Arc<dyn ManagedComponent>>, tuning: EnforcerTuning) -> Self {
        Self {
            inner: Arc::new(EnforcerInner {
                components,
                tuning,
                cycle: Mutex::new(()),
                state: Mutex::new(None),
                loop_task: StdMutex::new(None),
            }),
        }
    }

    /// Returns the enforcer tuning.
    #[must_use]
    pub fn tuning(&self) -> EnforcerTuning {
        self.inner.tuning
    }

    /// Returns the managed component registered under `name`, if any.
    #[must_use]
    pub fn component(&self, name: ComponentName) -> Option<Arc<dyn ManagedComponent>> {
        self.inner.components.iter().find(|component| component.name() == name).cloned()
    }

    /// Runs one enforcement cycle against the target configuration.
    ///
    /// Components are processed in the fixed enforcement order; a failing
    /// component contributes one error entry and does not block the rest.
    /// The correlation identifier is carried for external log correlation
    /// only.
    pub async fn enforce(
        &self,
        config: &ConfigurationDocument,
        _correlation_id: &CorrelationId,
    ) -> EnforcementOutcome {
        let _cycle = self.inner.cycle.lock().await;

        let mut changes = Vec::new();
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        for name in ComponentName::ENFORCEMENT_ORDER {
            let Some(component) = self.component(name) else {
                continue;
            };
            match self.enforce_component(&component, name, config).await {
                ComponentOutcome::Processed {
                    changes: component_changes,
                    warnings: component_warnings,
                } => {
                    changes.extend(component_changes);
                    warnings.extend(component_warnings);
                }
                ComponentOutcome::Failed {
                    changes: component_changes,
                    message,
                } => {
                    changes.extend(component_changes);
                    errors.push(message);
                }
            }
        }

        let component_state = derive_component_state(&self.inner.components, &changes, &errors);
        let outcome = EnforcementOutcome {
            enforced: errors.is_empty(),
            changes,
            warnings,
            errors,
        };

        let mut state = self.inner.state.lock().await;
        let enforcement_count = state.as_ref().map_or(0, |prev| prev.enforcement_count) + 1;
        *state = Some(RuntimeComplianceState {
            active_config: config.clone(),
            last_enforced_at_ms: unix_millis(),
            enforcement_count,
            component_state,
        });

        outcome
    }

    /// Processes one component: read, diff, apply, then soft compliance.
    async fn enforce_component(
        &self,
        component: &Arc<dyn ManagedComponent>,
        name: ComponentName,
        config: &ConfigurationDocument,
    ) -> ComponentOutcome {
        let timeout = self.inner.tuning.component_timeout;
        let target = target_slice(name, config);

        let current = match bounded(timeout, name, "configuration read", component.configuration())
            .await
        {
            Ok(value) => value,
            Err(message) => {
                return ComponentOutcome::Failed {
                    changes: Vec::new(),
                    message,
                };
            }
        };

        let deltas = diff_values(&current, &target);
        let changes: Vec<ConfigChange> = deltas
            .into_iter()
            .map(|delta| ConfigChange {
                component: name,
                property: delta.path,
                old_value: delta.old_value,
                new_value: delta.new_value,
                reason: ENFORCEMENT_REASON.to_string(),
            })
            .collect();

        if !changes.is_empty()
            && let Err(message) = bounded(
                timeout,
                name,
                "configuration update",
                component.apply_configuration(target),
            )
            .await
        {
            // Nothing was applied, so no changes are reported.
            return ComponentOutcome::Failed {
                changes: Vec::new(),
                message,
            };
        }

        // Soft compliance runs independently of the configuration diff; a
        // metrics failure must not discard the changes already applied.
        match bounded(timeout, name, "metrics read", component.metrics()).await {
            Ok(metrics) => ComponentOutcome::Processed {
                changes,
                warnings: soft_compliance_warnings(
                    name,
                    config,
                    &metrics,
                    self.inner.tuning.soft_tolerance,
                ),
            },
            Err(message) => ComponentOutcome::Failed { changes, message },
        }
    }

    /// Starts the reconciliation loop with the given accepted configuration.
    ///
    /// Performs one immediate enforcement cycle, then re-enforces on every
    /// tick. Starting while a loop is already running replaces it.
    pub async fn start_loop(&self, config: ConfigurationDocument) {
        self.stop_loop();

        let correlation_id = CorrelationId::generate();
        let _initial = self.enforce(&config, &correlation_id).await;

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let enforcer = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(enforcer.inner.tuning.loop_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The interval's first tick completes immediately; the initial
            // enforcement above already covered it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let correlation_id = CorrelationId::generate();
                        let _tick = enforcer.enforce(&config, &correlation_id).await;
                    }
                }
            }
        });

        if let Ok(mut guard) = self.inner.loop_task.lock() {
            *guard = Some(LoopHandle { shutdown, task });
        }
    }

    /// Stops the reconciliation loop at the next tick boundary.
    ///
    /// An enforcement cycle already in flight completes; no cycle is
    /// cancelled mid-step.
    pub fn stop_loop(&self) {
        if let Ok(mut guard) = self.inner.loop_task.lock()
            && let Some(handle) = guard.take()
        {
            let _ = handle.shutdown.send(true);
            drop(handle.task);
        }
    }

    /// Returns whether a reconciliation loop is currently armed.
    #[must_use]
    pub fn loop_running(&self) -> bool {
        self.inner.loop_task.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Returns a copy of the runtime compliance state, if any cycle has run.
    pub async fn state(&self) -> Option<RuntimeComplianceState> {
        self.inner.state.lock().await.clone()
    }

    /// Derives a point-in-time compliance verdict from the runtime state.
    pub async fn check_compliance(&self) -> ComplianceCheck {
        let Some(state) = self.state().await else {
            return ComplianceCheck {
                compliant: false,
                violations: vec![ComplianceViolation {
                    component: "enforcer".to_string(),
                    severity: ViolationSeverity::High,
                    message: "no enforcement cycle has run".to_string(),
                    recommendation: "initialize the system with a valid configuration".to_string(),
                }],
            };
        };

        let mut violations = Vec::new();
        for (name, sync_state) in &state.component_state {
            match sync_state {
                SyncState::Synchronized => {}
                SyncState::Drift => violations.push(ComplianceViolation {
                    component: name.to_string(),
                    severity: ViolationSeverity::Medium,
                    message: format!("{name} drifted from the target configuration"),
                    recommendation: "wait for the next reconciliation tick or re-apply the \
                                     configuration"
                        .to_string(),
                }),
                SyncState::Error => violations.push(ComplianceViolation {
                    component: name.to_string(),
                    severity: ViolationSeverity::High,
                    message: format!("{name} failed during the last enforcement cycle"),
                    recommendation: "check component availability; the next reconciliation tick \
                                     retries automatically"
                        .to_string(),
                }),
            }
        }

        let age_ms = unix_millis().saturating_sub(state.last_enforced_at_ms) as f64;
        let overdue_ms =
            self.inner.tuning.loop_interval.as_millis() as f64 * self.inner.tuning.overdue_factor;
        if age_ms > overdue_ms {
            violations.push(ComplianceViolation {
                component: "enforcer".to_string(),
                severity: ViolationSeverity::High,
                message: "enforcement is overdue".to_string(),
                recommendation: "verify the reconciliation loop is running".to_string(),
            });
        }

        ComplianceCheck {
            compliant: violations.is_empty(),
            violations,
        }
    }
}

// ============================================================================
// SECTION: Cycle Helpers
// ============================================================================

/// Awaits a component call under the configured timeout, flattening failures
/// into a component-prefixed message.
async fn bounded<T>(
    timeout: Duration,
    name: ComponentName,
    label: &str,
    call: impl Future<Output = Result<T, ComponentError>>,
) -> Result<T, String> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(format!("{name}: {label} failed: {err}")),
        Err(_) => Err(format!("{name}: {label} timed out after {}ms", timeout.as_millis())),
    }
}

/// Returns the slice of the target configuration relevant to a component.
fn target_slice(name: ComponentName, config: &ConfigurationDocument) -> Value {
    let slice = match name {
        ComponentName::Memory => serde_json::to_value(&config.memory),
        ComponentName::ResourceMonitor => serde_json::to_value(&config.resources),
        ComponentName::Degradation => serde_json::to_value(&config.degradation),
        ComponentName::Correlation => serde_json::to_value(&config.correlation),
    };
    slice.unwrap_or(Value::Null)
}

/// Compares live metrics against target thresholds with a tolerance factor.
fn soft_compliance_warnings(
    name: ComponentName,
    config: &ConfigurationDocument,
    metrics: &ComponentMetrics,
    tolerance: f64,
) -> Vec<String> {
    let thresholds: Vec<(&str, f64)> = match name {
        ComponentName::Memory => vec![
            ("conversation_count", config.memory.max_conversations as f64),
            ("used_memory_mb", config.memory.max_memory_mb as f64),
        ],
        ComponentName::ResourceMonitor => vec![
            ("cpu_percent", config.resources.cpu_percent_limit),
            ("memory_percent", config.resources.memory_percent_limit),
            ("open_handles", config.resources.max_open_handles as f64),
        ],
        ComponentName::Degradation => vec![
            ("error_rate", config.degradation.error_rate_limit),
            ("latency_ms", config.degradation.latency_ms_limit as f64),
        ],
        ComponentName::Correlation => {
            vec![("inflight_requests", config.correlation.max_inflight_requests as f64)]
        }
    };

    let mut warnings = Vec::new();
    for (metric, limit) in thresholds {
        if let Some(value) = metrics.gauge(metric)
            && value > limit * tolerance
        {
            warnings.push(format!(
                "{name}: {metric} at {value:.1} exceeds the target limit {limit:.1} beyond \
                 tolerance"
            ));
        }
    }
    warnings
}

/// Derives per-component synchronization state from a cycle's findings.
///
/// Error wins over drift; a component with neither errors nor changes is
/// synchronized.
fn derive_component_state(
    components: &[Arc<dyn ManagedComponent>],
    changes: &[ConfigChange],
    errors: &[String],
) -> BTreeMap<ComponentName, SyncState> {
    let mut component_state = BTreeMap::new();
    for component in components {
        let name = component.name();
        let prefix = format!("{name}: ");
        let sync_state = if errors.iter().any(|error| error.starts_with(&prefix)) {
            SyncState::Error
        } else if changes.iter().any(|change| change.component == name) {
            SyncState::Drift
        } else {
            SyncState::Synchronized
        };
        component_state.insert(name, sync_state);
    }
    component_state
}
