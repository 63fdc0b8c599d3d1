// config-warden-control/src/audit.rs
// ============================================================================
// Module: Control Loop Audit Logging
// Description: Structured audit events for configuration operations.
// Purpose: Emit redacted operation logs without hard dependencies.
// Dependencies: config-warden-core, serde
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for configuration
//! operations. Events never carry configuration payloads; only the operation
//! kind, its outcome, and counters are recorded, so sensitive settings are
//! not retained in logs. Deployments route events to their preferred logging
//! pipeline through the sink trait.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use config_warden_core::CorrelationId;
use serde::Serialize;

use crate::history::OperationKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event emitted for every configuration operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Correlation identifier for external log correlation.
    pub correlation_id: CorrelationId,
    /// Operation kind.
    pub operation: OperationKind,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Number of validation errors found.
    pub error_count: usize,
    /// Number of validation or soft-compliance warnings found.
    pub warning_count: usize,
    /// Number of property-level changes applied, when enforcement ran.
    pub change_count: usize,
}

/// Sink for operation audit events.
pub trait AuditSink: Send + Sync {
    /// Records an operation audit event.
    fn record(&self, event: &OperationAuditEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &OperationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &OperationAuditEvent) {}
}
