// config-warden-core/src/validator.rs
// ============================================================================
// Module: Configuration Validator
// Description: Schema, range, and cross-field validation for candidate
//              configuration documents.
// Purpose: Turn untrusted JSON into a normalized document or a complete list
//          of field-level findings.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Validation is a pure function over an untrusted JSON candidate. Missing
//! sections, wrong types, and nulls never panic; each becomes a field-level
//! finding with a dotted path. Normalization fills absent optional fields
//! from defaults before cross-field checks run, and the stages never
//! short-circuit, so a caller sees every problem in one pass.
//!
//! Stage order: per-field type/range checks, intra-section consistency,
//! inter-section consistency, resource estimate versus memory ceiling, and
//! security posture.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::document::ConfigurationDocument;
use crate::core::document::Environment;
use crate::core::verdict::FieldIssue;
use crate::core::verdict::Recommendation;
use crate::core::verdict::RecommendationCategory;
use crate::core::verdict::ValidationVerdict;

// ============================================================================
// SECTION: Validation Constants
// ============================================================================

/// Tolerance factor applied to the resource-estimate check.
pub const RESOURCE_ESTIMATE_TOLERANCE: f64 = 1.2;
/// Correlation identifier lengths below this threshold weaken collision
/// resistance.
pub const MIN_SAFE_ID_LENGTH: u64 = 8;
/// Request timeouts above this ceiling (seconds) hold connections too long.
pub const MAX_SAFE_TIMEOUT_SECONDS: u64 = 600;
/// In-flight request ceilings above this threshold risk resource exhaustion.
pub const MAX_SAFE_INFLIGHT_REQUESTS: u64 = 10_000;
/// Thinking-token budgets above this threshold slow operations noticeably.
const HIGH_THINKING_TOKENS: u64 = 100_000;
/// Sample intervals below this floor (seconds) add measurable overhead.
const LOW_SAMPLE_INTERVAL_SECONDS: u64 = 5;
/// Conversation TTLs above this ceiling (seconds) retain memory for a week+.
const LONG_CONVERSATION_TTL_SECONDS: u64 = 604_800;
/// Conversation-count ceilings above this threshold are unusually high.
const HIGH_MAX_CONVERSATIONS: u64 = 10_000;
/// Request timeouts above this threshold (seconds) widen the abuse window.
const LONG_REQUEST_TIMEOUT_SECONDS: u64 = 300;
/// Identifier length ceilings above this threshold invite oversized inputs.
const LARGE_ID_LENGTH: u64 = 256;

/// Known top-level section names.
const KNOWN_SECTIONS: [&str; 6] =
    ["thinking", "memory", "resources", "degradation", "correlation", "server"];

// ============================================================================
// SECTION: Finding Collector
// ============================================================================

/// Accumulates findings across all validation stages.
#[derive(Debug, Default)]
struct Collector {
    /// Hard violations.
    errors: Vec<FieldIssue>,
    /// Advisory findings.
    warnings: Vec<FieldIssue>,
}

impl Collector {
    /// Records a hard violation.
    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(FieldIssue::error(path, message));
    }

    /// Records an advisory finding.
    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(FieldIssue::warning(path, message));
    }
}

// ============================================================================
// SECTION: Validation Entry Point
// ============================================================================

/// Validates a candidate configuration document.
///
/// Tolerates any JSON shape; all structural problems become field-level
/// findings. The verdict's `normalized` document is present only when the
/// candidate is valid.
#[must_use]
pub fn validate(candidate: &Value) -> ValidationVerdict {
    let mut collector = Collector::default();
    let Some(root) = candidate.as_object() else {
        collector.error("", "configuration must be a JSON object");
        return ValidationVerdict {
            is_valid: false,
            normalized: None,
            errors: collector.errors,
            warnings: collector.warnings,
        };
    };

    // Stage 1: per-field type and range checks, normalizing from defaults.
    let normalized = normalize_document(root, &mut collector);
    warn_unknown_sections(root, &mut collector);

    // Stages 2-5 run unconditionally against the normalized document so a
    // caller sees every applicable finding in one pass.
    check_intra_section(&normalized, &mut collector);
    check_inter_section(&normalized, &mut collector);
    check_resource_estimate(&normalized, &mut collector);
    check_security_posture(&normalized, &mut collector);

    let is_valid = collector.errors.is_empty();
    ValidationVerdict {
        is_valid,
        normalized: is_valid.then_some(normalized),
        errors: collector.errors,
        warnings: collector.warnings,
    }
}

// ============================================================================
// SECTION: Stage 1 - Normalization and Field Checks
// ============================================================================

/// Builds a normalized document from the candidate, reporting field issues.
///
/// Fields that fail extraction keep their default so later stages can still
/// run against a complete document.
fn normalize_document(root: &Map<String, Value>, collector: &mut Collector) -> ConfigurationDocument {
    let mut doc = ConfigurationDocument::default();

    if let Some(section) = read_section(root, "thinking", collector) {
        warn_unknown_keys(
            section,
            "thinking",
            &["max_thinking_tokens", "max_blocks_per_operation", "budget_warning_ratio"],
            collector,
        );
        read_positive_u64(
            section,
            "thinking.max_thinking_tokens",
            &mut doc.thinking.max_thinking_tokens,
            collector,
        );
        read_positive_u64(
            section,
            "thinking.max_blocks_per_operation",
            &mut doc.thinking.max_blocks_per_operation,
            collector,
        );
        read_ratio(
            section,
            "thinking.budget_warning_ratio",
            &mut doc.thinking.budget_warning_ratio,
            collector,
        );
    }

    if let Some(section) = read_section(root, "memory", collector) {
        warn_unknown_keys(
            section,
            "memory",
            &[
                "max_conversations",
                "max_memory_mb",
                "average_conversation_kb",
                "max_blocks",
                "conversation_ttl_seconds",
            ],
            collector,
        );
        read_positive_u64(
            section,
            "memory.max_conversations",
            &mut doc.memory.max_conversations,
            collector,
        );
        read_positive_u64(section, "memory.max_memory_mb", &mut doc.memory.max_memory_mb, collector);
        read_positive_u64(
            section,
            "memory.average_conversation_kb",
            &mut doc.memory.average_conversation_kb,
            collector,
        );
        read_positive_u64(section, "memory.max_blocks", &mut doc.memory.max_blocks, collector);
        read_positive_u64(
            section,
            "memory.conversation_ttl_seconds",
            &mut doc.memory.conversation_ttl_seconds,
            collector,
        );
    }

    if let Some(section) = read_section(root, "resources", collector) {
        warn_unknown_keys(
            section,
            "resources",
            &[
                "cpu_percent_limit",
                "memory_percent_limit",
                "max_open_handles",
                "sample_interval_seconds",
            ],
            collector,
        );
        read_percent(
            section,
            "resources.cpu_percent_limit",
            &mut doc.resources.cpu_percent_limit,
            collector,
        );
        read_percent(
            section,
            "resources.memory_percent_limit",
            &mut doc.resources.memory_percent_limit,
            collector,
        );
        read_positive_u64(
            section,
            "resources.max_open_handles",
            &mut doc.resources.max_open_handles,
            collector,
        );
        read_positive_u64(
            section,
            "resources.sample_interval_seconds",
            &mut doc.resources.sample_interval_seconds,
            collector,
        );
    }

    if let Some(section) = read_section(root, "degradation", collector) {
        warn_unknown_keys(
            section,
            "degradation",
            &["error_rate_limit", "latency_ms_limit", "recovery_interval_seconds", "min_samples"],
            collector,
        );
        read_ratio(
            section,
            "degradation.error_rate_limit",
            &mut doc.degradation.error_rate_limit,
            collector,
        );
        read_positive_u64(
            section,
            "degradation.latency_ms_limit",
            &mut doc.degradation.latency_ms_limit,
            collector,
        );
        read_positive_u64(
            section,
            "degradation.recovery_interval_seconds",
            &mut doc.degradation.recovery_interval_seconds,
            collector,
        );
        read_count(section, "degradation.min_samples", &mut doc.degradation.min_samples, collector);
    }

    if let Some(section) = read_section(root, "correlation", collector) {
        warn_unknown_keys(
            section,
            "correlation",
            &["max_id_length", "max_inflight_requests", "request_timeout_seconds"],
            collector,
        );
        read_positive_u64(
            section,
            "correlation.max_id_length",
            &mut doc.correlation.max_id_length,
            collector,
        );
        read_positive_u64(
            section,
            "correlation.max_inflight_requests",
            &mut doc.correlation.max_inflight_requests,
            collector,
        );
        read_positive_u64(
            section,
            "correlation.request_timeout_seconds",
            &mut doc.correlation.request_timeout_seconds,
            collector,
        );
    }

    if let Some(section) = read_section(root, "server", collector) {
        warn_unknown_keys(
            section,
            "server",
            &["environment", "shutdown_timeout_seconds"],
            collector,
        );
        read_environment(section, "server.environment", &mut doc.server.environment, collector);
        read_positive_u64(
            section,
            "server.shutdown_timeout_seconds",
            &mut doc.server.shutdown_timeout_seconds,
            collector,
        );
    }

    doc
}

/// Reads a named top-level section as an object, reporting shape errors.
fn read_section<'a>(
    root: &'a Map<String, Value>,
    name: &str,
    collector: &mut Collector,
) -> Option<&'a Map<String, Value>> {
    match root.get(name) {
        None => None,
        Some(Value::Object(section)) => Some(section),
        Some(_) => {
            collector.error(name, "expected an object");
            None
        }
    }
}

/// Warns about unknown top-level sections.
fn warn_unknown_sections(root: &Map<String, Value>, collector: &mut Collector) {
    for key in root.keys() {
        if !KNOWN_SECTIONS.contains(&key.as_str()) {
            collector.warning(key, "unknown section is ignored");
        }
    }
}

/// Warns about unknown fields within a known section.
fn warn_unknown_keys(
    section: &Map<String, Value>,
    section_name: &str,
    known: &[&str],
    collector: &mut Collector,
) {
    for key in section.keys() {
        if !known.contains(&key.as_str()) {
            collector.warning(&format!("{section_name}.{key}"), "unknown field is ignored");
        }
    }
}

/// Extracts the last path segment, which is the field name within a section.
fn field_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Reads a strictly positive integer field, keeping the default on failure.
fn read_positive_u64(
    section: &Map<String, Value>,
    path: &str,
    target: &mut u64,
    collector: &mut Collector,
) {
    if let Some(value) = read_u64(section, path, collector) {
        if value == 0 {
            collector.error(path, "must be greater than zero");
        } else {
            *target = value;
        }
    }
}

/// Reads a non-negative integer count field, keeping the default on failure.
fn read_count(
    section: &Map<String, Value>,
    path: &str,
    target: &mut u64,
    collector: &mut Collector,
) {
    if let Some(value) = read_u64(section, path, collector) {
        *target = value;
    }
}

/// Reads a raw unsigned integer, reporting type and sign errors.
fn read_u64(section: &Map<String, Value>, path: &str, collector: &mut Collector) -> Option<u64> {
    match section.get(field_name(path)) {
        None => None,
        Some(Value::Number(number)) => number.as_u64().map_or_else(
            || {
                if number.as_i64().is_some_and(i64::is_negative) {
                    collector.error(path, "must not be negative");
                } else {
                    collector.error(path, "must be an integer");
                }
                None
            },
            Some,
        ),
        Some(_) => {
            collector.error(path, "expected an integer");
            None
        }
    }
}

/// Reads a ratio field in `(0, 1]`, keeping the default on failure.
fn read_ratio(
    section: &Map<String, Value>,
    path: &str,
    target: &mut f64,
    collector: &mut Collector,
) {
    if let Some(value) = read_f64(section, path, collector) {
        if value > 0.0 && value <= 1.0 {
            *target = value;
        } else {
            collector.error(path, "must be within (0, 1]");
        }
    }
}

/// Reads a percentage field in `(0, 100]`, keeping the default on failure.
fn read_percent(
    section: &Map<String, Value>,
    path: &str,
    target: &mut f64,
    collector: &mut Collector,
) {
    if let Some(value) = read_f64(section, path, collector) {
        if value > 0.0 && value <= 100.0 {
            *target = value;
        } else {
            collector.error(path, "must be within (0, 100]");
        }
    }
}

/// Reads a raw floating-point number, reporting type errors.
fn read_f64(section: &Map<String, Value>, path: &str, collector: &mut Collector) -> Option<f64> {
    match section.get(field_name(path)) {
        None => None,
        Some(Value::Number(number)) => number.as_f64().map_or_else(
            || {
                collector.error(path, "expected a number");
                None
            },
            Some,
        ),
        Some(_) => {
            collector.error(path, "expected a number");
            None
        }
    }
}

/// Reads a deployment environment field, keeping the default on failure.
fn read_environment(
    section: &Map<String, Value>,
    path: &str,
    target: &mut Environment,
    collector: &mut Collector,
) {
    match section.get(field_name(path)) {
        None => {}
        Some(Value::String(raw)) => match raw.as_str() {
            "development" => *target = Environment::Development,
            "staging" => *target = Environment::Staging,
            "production" => *target = Environment::Production,
            _ => collector.error(path, "must be one of development, staging, production"),
        },
        Some(_) => collector.error(path, "expected a string"),
    }
}

// ============================================================================
// SECTION: Stage 2 - Intra-Section Consistency
// ============================================================================

/// Checks consistency of fields within a single section.
fn check_intra_section(doc: &ConfigurationDocument, collector: &mut Collector) {
    let single_conversation_kb = doc.memory.average_conversation_kb;
    let ceiling_kb = doc.memory.max_memory_mb.saturating_mul(1024);
    if single_conversation_kb > ceiling_kb {
        collector.error(
            "memory.average_conversation_kb",
            format!(
                "average conversation size {single_conversation_kb} KB exceeds the memory \
                 ceiling of {ceiling_kb} KB"
            ),
        );
    }
}

// ============================================================================
// SECTION: Stage 3 - Inter-Section Consistency
// ============================================================================

/// Checks limits that nest across sections.
fn check_inter_section(doc: &ConfigurationDocument, collector: &mut Collector) {
    let per_operation = doc.thinking.max_blocks_per_operation;
    let global = doc.memory.max_blocks;
    if per_operation > global {
        collector.warning(
            "thinking.max_blocks_per_operation",
            format!(
                "per-operation block ceiling {per_operation} exceeds the global memory block \
                 ceiling {global}"
            ),
        );
    }
    if doc.degradation.min_samples > 0
        && doc.degradation.recovery_interval_seconds
            < doc.degradation.min_samples.saturating_mul(doc.resources.sample_interval_seconds)
    {
        collector.warning(
            "degradation.recovery_interval_seconds",
            "recovery interval is shorter than the time needed to gather the minimum sample count",
        );
    }
    let latency_seconds = doc.degradation.latency_ms_limit.div_ceil(1000);
    if latency_seconds > doc.correlation.request_timeout_seconds {
        collector.warning(
            "degradation.latency_ms_limit",
            format!(
                "latency limit of {latency_seconds}s exceeds the request timeout of {}s",
                doc.correlation.request_timeout_seconds
            ),
        );
    }
}

// ============================================================================
// SECTION: Stage 4 - Resource Estimate
// ============================================================================

/// Checks the derived memory estimate against the configured ceiling.
fn check_resource_estimate(doc: &ConfigurationDocument, collector: &mut Collector) {
    let estimate_kb = (doc.memory.max_conversations as f64) * (doc.memory.average_conversation_kb as f64);
    let ceiling_kb = (doc.memory.max_memory_mb as f64) * 1024.0;
    if estimate_kb > ceiling_kb * RESOURCE_ESTIMATE_TOLERANCE {
        collector.warning(
            "memory.max_conversations",
            format!(
                "estimated memory usage of {:.0} KB exceeds the {:.0} KB ceiling beyond the \
                 {RESOURCE_ESTIMATE_TOLERANCE}x tolerance",
                estimate_kb, ceiling_kb
            ),
        );
    }
}

// ============================================================================
// SECTION: Stage 5 - Security Posture
// ============================================================================

/// Checks security-sensitive fields against safe thresholds.
fn check_security_posture(doc: &ConfigurationDocument, collector: &mut Collector) {
    if doc.correlation.max_id_length < MIN_SAFE_ID_LENGTH {
        collector.warning(
            "correlation.max_id_length",
            format!("identifier length below {MIN_SAFE_ID_LENGTH} weakens collision resistance"),
        );
    }
    if doc.correlation.request_timeout_seconds > MAX_SAFE_TIMEOUT_SECONDS {
        collector.warning(
            "correlation.request_timeout_seconds",
            format!("request timeout above {MAX_SAFE_TIMEOUT_SECONDS}s holds connections open too long"),
        );
    }
    if doc.correlation.max_inflight_requests > MAX_SAFE_INFLIGHT_REQUESTS {
        collector.warning(
            "correlation.max_inflight_requests",
            format!(
                "in-flight request ceiling above {MAX_SAFE_INFLIGHT_REQUESTS} risks resource \
                 exhaustion"
            ),
        );
    }
}

// ============================================================================
// SECTION: Recommendations
// ============================================================================

/// Inspects a valid configuration for legal but sub-optimal settings.
///
/// Callers must pass a configuration that already passed validation; the
/// advisory checks assume all range invariants hold.
#[must_use]
pub fn recommend(config: &ConfigurationDocument) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    if config.thinking.max_thinking_tokens > HIGH_THINKING_TOKENS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Performance,
            path: "thinking.max_thinking_tokens".to_string(),
            message: "unusually high thinking budget slows individual operations".to_string(),
        });
    }
    if config.resources.sample_interval_seconds < LOW_SAMPLE_INTERVAL_SECONDS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Performance,
            path: "resources.sample_interval_seconds".to_string(),
            message: "sampling more often than every 5s adds measurable overhead".to_string(),
        });
    }
    if config.memory.conversation_ttl_seconds > LONG_CONVERSATION_TTL_SECONDS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Memory,
            path: "memory.conversation_ttl_seconds".to_string(),
            message: "conversation TTL above one week retains memory longer than most sessions need"
                .to_string(),
        });
    }
    if config.memory.max_conversations > HIGH_MAX_CONVERSATIONS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Memory,
            path: "memory.max_conversations".to_string(),
            message: "unusually high conversation ceiling inflates the worst-case memory estimate"
                .to_string(),
        });
    }
    if config.correlation.request_timeout_seconds > LONG_REQUEST_TIMEOUT_SECONDS {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Security,
            path: "correlation.request_timeout_seconds".to_string(),
            message: "long request timeouts widen the window for slow-request abuse".to_string(),
        });
    }
    if config.correlation.max_id_length > LARGE_ID_LENGTH {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Security,
            path: "correlation.max_id_length".to_string(),
            message: "very long correlation identifiers invite oversized inputs".to_string(),
        });
    }
    recommendations
}
