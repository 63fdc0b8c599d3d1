// config-warden-core/src/core/mod.rs
// ============================================================================
// Module: Config Warden Core Model
// Description: Canonical data model for the configuration control loop.
// Purpose: Group document, identifier, verdict, and state types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core model groups the value types exchanged across the control loop:
//! the typed configuration document, identifiers, validation verdicts, and
//! enforcement state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod document;
pub mod identifiers;
pub mod state;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::ConfigurationDocument;
pub use document::ConfigurationPatch;
pub use document::CorrelationConfig;
pub use document::DegradationConfig;
pub use document::Environment;
pub use document::MemoryConfig;
pub use document::ResourceConfig;
pub use document::ServerConfig;
pub use document::ThinkingConfig;
pub use identifiers::ComponentName;
pub use identifiers::CorrelationId;
pub use state::ComplianceCheck;
pub use state::ComplianceViolation;
pub use state::ConfigChange;
pub use state::ENFORCEMENT_REASON;
pub use state::EnforcementOutcome;
pub use state::RuntimeComplianceState;
pub use state::SyncState;
pub use state::ViolationSeverity;
pub use verdict::FieldIssue;
pub use verdict::IssueSeverity;
pub use verdict::Recommendation;
pub use verdict::RecommendationCategory;
pub use verdict::ValidationVerdict;
