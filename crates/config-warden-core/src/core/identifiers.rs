// config-warden-core/src/core/identifiers.rs
// ============================================================================
// Module: Config Warden Identifiers
// Description: Canonical identifiers for correlation and managed components.
// Purpose: Provide strongly typed, serializable identifiers with stable
//          string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifier types used throughout Config Warden.
//! Correlation identifiers are opaque and serialize as strings; they thread
//! through every operation for external log correlation but carry no
//! behavioral weight inside the control loop.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Correlation Identifier
// ============================================================================

/// Monotonic counter used to disambiguate generated correlation identifiers.
static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque correlation identifier threaded through control loop operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Creates a new correlation identifier from a caller-supplied value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh correlation identifier for callers that supply none.
    #[must_use]
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let seq = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("cw-{millis}-{seq}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Component Names
// ============================================================================

/// Names of the managed components the control loop enforces against.
///
/// # Invariants
/// - Enforcement always processes components in the declaration order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentName {
    /// Conversation memory subsystem.
    Memory,
    /// Resource usage monitor.
    ResourceMonitor,
    /// Degradation detector.
    Degradation,
    /// Request correlation tracker.
    Correlation,
}

impl ComponentName {
    /// Fixed enforcement order over all managed components.
    pub const ENFORCEMENT_ORDER: [Self; 4] =
        [Self::Memory, Self::ResourceMonitor, Self::Degradation, Self::Correlation];

    /// Returns the stable string form of the component name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::ResourceMonitor => "resource_monitor",
            Self::Degradation => "degradation",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
