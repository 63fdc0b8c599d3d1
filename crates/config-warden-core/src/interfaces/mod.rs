// config-warden-core/src/interfaces/mod.rs
// ============================================================================
// Module: Managed Component Interfaces
// Description: Backend-agnostic interfaces for configuration-managed
//              components.
// Purpose: Define the contract surface the control loop uses to read, update,
//          and probe dependent components.
// Dependencies: crate::core, async-trait, serde
// ============================================================================

//! ## Overview
//! Managed components expose a narrow read/write contract: report the current
//! configuration slice, accept a replacement slice idempotently, and report
//! live operational metrics. Implementations live with the out-of-scope
//! collaborators; the control loop never depends on their internals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::ComponentName;

// ============================================================================
// SECTION: Component Metrics
// ============================================================================

/// Named gauge snapshot reported by a managed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentMetrics {
    /// Gauge values keyed by metric name.
    pub gauges: BTreeMap<String, f64>,
}

impl ComponentMetrics {
    /// Returns a gauge value by name when present.
    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).copied()
    }
}

// ============================================================================
// SECTION: Component Errors
// ============================================================================

/// Managed component call failures.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// Component could not be reached or did not respond.
    #[error("component unavailable: {0}")]
    Unavailable(String),
    /// Component rejected the configuration slice.
    #[error("configuration rejected: {0}")]
    Rejected(String),
    /// Component-side I/O failure.
    #[error("component io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Managed Component
// ============================================================================

/// Backend-agnostic contract for a configuration-managed component.
#[async_trait]
pub trait ManagedComponent: Send + Sync {
    /// Returns the component's name.
    fn name(&self) -> ComponentName;

    /// Returns the component's currently reported configuration slice.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] when the configuration cannot be read.
    async fn configuration(&self) -> Result<Value, ComponentError>;

    /// Replaces the component's configuration slice. Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] when the update is rejected or fails.
    async fn apply_configuration(&self, slice: Value) -> Result<(), ComponentError>;

    /// Returns the component's live operational metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] when metrics cannot be read.
    async fn metrics(&self) -> Result<ComponentMetrics, ComponentError>;
}
