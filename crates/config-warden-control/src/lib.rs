// config-warden-control/src/lib.rs
// ============================================================================
// Module: Config Warden Control Library
// Description: Enforcement, reconciliation, and orchestration for the
//              configuration compliance control loop.
// Purpose: Drive managed components toward the validated target
//          configuration.
// Dependencies: config-warden-core, tokio
// ============================================================================

//! ## Overview
//! `config-warden-control` hosts the runtime half of the control loop: the
//! enforcer that pushes validated configuration to managed components and
//! reconciles drift on a timer, the compliance manager that sequences
//! validation and enforcement and aggregates system status, the bounded
//! operation history, and audit sinks for operation events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
mod clock;
pub mod components;
pub mod enforcer;
pub mod history;
pub mod manager;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::OperationAuditEvent;
pub use components::InMemoryComponent;
pub use enforcer::Enforcer;
pub use enforcer::EnforcerTuning;
pub use history::HISTORY_CAPACITY;
pub use history::OperationKind;
pub use history::OperationRecord;
pub use manager::ComplianceManager;
pub use manager::HealthReport;
pub use manager::OverallHealth;
pub use manager::StatusIssue;
pub use manager::SystemStatus;
pub use manager::UpdateResult;
