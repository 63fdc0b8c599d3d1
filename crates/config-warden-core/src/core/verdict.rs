// config-warden-core/src/core/verdict.rs
// ============================================================================
// Module: Validation Verdict Model
// Description: Immutable validation results and advisory recommendations.
// Purpose: Carry every field-level finding from a single validation pass.
// Dependencies: crate::core::document, serde
// ============================================================================

//! ## Overview
//! A verdict is created fresh on every validation call and never mutated
//! after return. Warnings never affect validity; `is_valid` holds exactly
//! when the error list is empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::document::ConfigurationDocument;

// ============================================================================
// SECTION: Field Issues
// ============================================================================

/// Severity attached to a field-level finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Hard violation; the document is rejected.
    Error,
    /// Advisory finding; validity is unaffected.
    Warning,
    /// Informational note.
    Info,
}

/// One field-level finding with a dotted path into the candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Dotted path to the offending field, e.g. `memory.max_conversations`.
    pub path: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// Finding severity.
    pub severity: IssueSeverity,
}

impl FieldIssue {
    /// Creates an error-severity finding.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }

    /// Creates a warning-severity finding.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        }
    }
}

// ============================================================================
// SECTION: Validation Verdict
// ============================================================================

/// Result of validating one candidate configuration document.
///
/// # Invariants
/// - `is_valid` is `true` iff `errors` is empty.
/// - `normalized` is present iff the document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// Whether the candidate passed all hard checks.
    pub is_valid: bool,
    /// Defaults-completed document, present only for valid candidates.
    pub normalized: Option<ConfigurationDocument>,
    /// Hard violations, one per offending field.
    pub errors: Vec<FieldIssue>,
    /// Advisory findings that never affect validity.
    pub warnings: Vec<FieldIssue>,
}

// ============================================================================
// SECTION: Recommendations
// ============================================================================

/// Category of an advisory recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// Settings that may degrade throughput or latency.
    Performance,
    /// Settings that may retain more memory than intended.
    Memory,
    /// Settings that weaken the security posture.
    Security,
}

/// One advisory suggestion for a legal but sub-optimal setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommendation category.
    pub category: RecommendationCategory,
    /// Dotted path to the setting the suggestion concerns.
    pub path: String,
    /// Human-readable suggestion.
    pub message: String,
}
