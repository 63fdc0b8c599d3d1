// config-warden-control/src/components.rs
// ============================================================================
// Module: In-Memory Managed Components
// Description: Simple in-memory component implementations for tests and
//              demos.
// Purpose: Provide deterministic managed components without external deps.
// Dependencies: config-warden-core
// ============================================================================

//! ## Overview
//! This module provides an in-memory implementation of [`ManagedComponent`]
//! with controllable metrics and failure injection. It is intended for tests
//! and local demos, not production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use config_warden_core::ComponentError;
use config_warden_core::ComponentMetrics;
use config_warden_core::ComponentName;
use config_warden_core::ManagedComponent;
use serde_json::Value;

// ============================================================================
// SECTION: In-Memory Component
// ============================================================================

/// Mutable state behind an in-memory component.
#[derive(Debug, Default)]
struct ComponentState {
    /// Currently applied configuration slice.
    configuration: Value,
    /// Metrics reported to callers.
    metrics: ComponentMetrics,
}

/// In-memory managed component with failure injection for tests and demos.
#[derive(Clone)]
pub struct InMemoryComponent {
    /// Component name.
    name: ComponentName,
    /// Shared mutable state.
    state: Arc<Mutex<ComponentState>>,
    /// When set, configuration reads fail.
    fail_reads: Arc<AtomicBool>,
    /// When set, configuration updates fail.
    fail_updates: Arc<AtomicBool>,
    /// When set, metric reads fail.
    fail_metrics: Arc<AtomicBool>,
}

impl InMemoryComponent {
    /// Creates a component with an empty configuration and no metrics.
    #[must_use]
    pub fn new(name: ComponentName) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(ComponentState::default())),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_updates: Arc::new(AtomicBool::new(false)),
            fail_metrics: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Overwrites the reported configuration slice, simulating drift.
    pub fn set_configuration(&self, configuration: Value) {
        if let Ok(mut state) = self.state.lock() {
            state.configuration = configuration;
        }
    }

    /// Returns the currently applied configuration slice.
    #[must_use]
    pub fn configuration_snapshot(&self) -> Value {
        self.state.lock().map(|state| state.configuration.clone()).unwrap_or(Value::Null)
    }

    /// Sets a reported gauge value.
    pub fn set_gauge(&self, metric: &str, value: f64) {
        if let Ok(mut state) = self.state.lock() {
            state.metrics.gauges.insert(metric.to_string(), value);
        }
    }

    /// Toggles configuration-read failure injection.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Toggles configuration-update failure injection.
    pub fn fail_updates(&self, enabled: bool) {
        self.fail_updates.store(enabled, Ordering::SeqCst);
    }

    /// Toggles metric-read failure injection.
    pub fn fail_metrics(&self, enabled: bool) {
        self.fail_metrics.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl ManagedComponent for InMemoryComponent {
    fn name(&self) -> ComponentName {
        self.name
    }

    async fn configuration(&self) -> Result<Value, ComponentError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ComponentError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.configuration_snapshot())
    }

    async fn apply_configuration(&self, slice: Value) -> Result<(), ComponentError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ComponentError::Rejected("injected update failure".to_string()));
        }
        self.set_configuration(slice);
        Ok(())
    }

    async fn metrics(&self) -> Result<ComponentMetrics, ComponentError> {
        if self.fail_metrics.load(Ordering::SeqCst) {
            return Err(ComponentError::Unavailable("injected metrics failure".to_string()));
        }
        self.state
            .lock()
            .map(|state| state.metrics.clone())
            .map_err(|_| ComponentError::Io("component state poisoned".to_string()))
    }
}
