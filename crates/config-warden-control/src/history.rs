// config-warden-control/src/history.rs
// ============================================================================
// Module: Operation History
// Description: Bounded append-only record of configuration operations.
// Purpose: Retain a capped audit trail without configuration payloads.
// Dependencies: config-warden-core, serde
// ============================================================================

//! ## Overview
//! The history is an append-only ring capped at 100 entries; the oldest entry
//! is evicted first. Configuration payloads are deliberately excluded so
//! sensitive settings are never retained indefinitely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;

use config_warden_core::CorrelationId;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 100;

/// Kind of configuration operation recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Validation of a candidate document.
    Validate,
    /// Enforcement of a validated document.
    Enforce,
    /// Combined validate-and-enforce update.
    Update,
}

/// One recorded configuration operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Wall-clock time of the operation, unix milliseconds.
    pub timestamp_ms: u128,
    /// Correlation identifier for external log correlation.
    pub correlation_id: CorrelationId,
    /// Operation kind.
    pub operation: OperationKind,
    /// Whether the operation succeeded.
    pub success: bool,
}

// ============================================================================
// SECTION: History Ring
// ============================================================================

/// Bounded append-only operation history.
#[derive(Debug, Default)]
pub struct OperationHistory {
    /// Retained records, oldest first.
    records: VecDeque<OperationRecord>,
}

impl OperationHistory {
    /// Appends a record, evicting the oldest entry at capacity.
    pub fn push(&mut self, record: OperationRecord) {
        if self.records.len() == HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Returns up to `limit` of the most recent records, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<OperationRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    /// Returns the number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
