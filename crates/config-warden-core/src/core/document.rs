// config-warden-core/src/core/document.rs
// ============================================================================
// Module: Configuration Document Model
// Description: Typed configuration tree, defaults, and partial overlays.
// Purpose: Provide the canonical target-configuration shape for the control
//          loop.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The configuration document is a typed tree of named sections. Defaults are
//! complete and always valid; partial overlays are applied leaf-by-leaf with
//! the override winning. Candidate documents arriving from callers are
//! untyped JSON and pass through the validator before they reach this shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Default Constants
// ============================================================================

/// Default thinking-token budget per operation.
pub const DEFAULT_MAX_THINKING_TOKENS: u64 = 50_000;
/// Default thinking-block ceiling per operation.
pub const DEFAULT_MAX_BLOCKS_PER_OPERATION: u64 = 64;
/// Default ratio of the thinking budget at which a warning is emitted.
pub const DEFAULT_BUDGET_WARNING_RATIO: f64 = 0.8;
/// Default conversation-count ceiling.
pub const DEFAULT_MAX_CONVERSATIONS: u64 = 1_000;
/// Default memory ceiling in megabytes.
pub const DEFAULT_MAX_MEMORY_MB: u64 = 512;
/// Default average conversation size in kilobytes.
pub const DEFAULT_AVERAGE_CONVERSATION_KB: u64 = 256;
/// Default global thinking-block ceiling.
pub const DEFAULT_MAX_BLOCKS: u64 = 4_096;
/// Default conversation time-to-live in seconds.
pub const DEFAULT_CONVERSATION_TTL_SECONDS: u64 = 86_400;
/// Default CPU usage limit in percent.
pub const DEFAULT_CPU_PERCENT_LIMIT: f64 = 85.0;
/// Default memory usage limit in percent.
pub const DEFAULT_MEMORY_PERCENT_LIMIT: f64 = 80.0;
/// Default open-handle ceiling.
pub const DEFAULT_MAX_OPEN_HANDLES: u64 = 2_048;
/// Default resource sample interval in seconds.
pub const DEFAULT_SAMPLE_INTERVAL_SECONDS: u64 = 30;
/// Default error-rate limit for degradation detection.
pub const DEFAULT_ERROR_RATE_LIMIT: f64 = 0.05;
/// Default latency limit in milliseconds for degradation detection.
pub const DEFAULT_LATENCY_MS_LIMIT: u64 = 2_000;
/// Default degradation recovery interval in seconds. Covers the default
/// sampling window (`min_samples x sample_interval_seconds`).
pub const DEFAULT_RECOVERY_INTERVAL_SECONDS: u64 = 600;
/// Default minimum sample count before degradation verdicts.
pub const DEFAULT_MIN_SAMPLES: u64 = 20;
/// Default correlation identifier length ceiling.
pub const DEFAULT_MAX_ID_LENGTH: u64 = 64;
/// Default in-flight request ceiling.
pub const DEFAULT_MAX_INFLIGHT_REQUESTS: u64 = 256;
/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 120;
/// Default server shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;

// ============================================================================
// SECTION: Configuration Sections
// ============================================================================

/// Thinking-budget limits for prompt evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinkingConfig {
    /// Thinking-token budget per operation.
    pub max_thinking_tokens: u64,
    /// Thinking-block ceiling per operation.
    pub max_blocks_per_operation: u64,
    /// Ratio of the budget at which consumers warn, in `(0, 1]`.
    pub budget_warning_ratio: f64,
}

impl Default for ThinkingConfig {
    fn default() -> Self {
        Self {
            max_thinking_tokens: DEFAULT_MAX_THINKING_TOKENS,
            max_blocks_per_operation: DEFAULT_MAX_BLOCKS_PER_OPERATION,
            budget_warning_ratio: DEFAULT_BUDGET_WARNING_RATIO,
        }
    }
}

/// Conversation memory limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Conversation-count ceiling.
    pub max_conversations: u64,
    /// Memory ceiling in megabytes.
    pub max_memory_mb: u64,
    /// Average conversation size in kilobytes, used for resource estimates.
    pub average_conversation_kb: u64,
    /// Global thinking-block ceiling across all operations.
    pub max_blocks: u64,
    /// Conversation time-to-live in seconds.
    pub conversation_ttl_seconds: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            average_conversation_kb: DEFAULT_AVERAGE_CONVERSATION_KB,
            max_blocks: DEFAULT_MAX_BLOCKS,
            conversation_ttl_seconds: DEFAULT_CONVERSATION_TTL_SECONDS,
        }
    }
}

/// Resource-monitor thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// CPU usage limit in percent, in `(0, 100]`.
    pub cpu_percent_limit: f64,
    /// Memory usage limit in percent, in `(0, 100]`.
    pub memory_percent_limit: f64,
    /// Open-handle ceiling.
    pub max_open_handles: u64,
    /// Sample interval in seconds.
    pub sample_interval_seconds: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            cpu_percent_limit: DEFAULT_CPU_PERCENT_LIMIT,
            memory_percent_limit: DEFAULT_MEMORY_PERCENT_LIMIT,
            max_open_handles: DEFAULT_MAX_OPEN_HANDLES,
            sample_interval_seconds: DEFAULT_SAMPLE_INTERVAL_SECONDS,
        }
    }
}

/// Degradation-detector thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationConfig {
    /// Error-rate limit, in `(0, 1]`.
    pub error_rate_limit: f64,
    /// Latency limit in milliseconds.
    pub latency_ms_limit: u64,
    /// Recovery interval in seconds.
    pub recovery_interval_seconds: u64,
    /// Minimum sample count before verdicts are produced.
    pub min_samples: u64,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            error_rate_limit: DEFAULT_ERROR_RATE_LIMIT,
            latency_ms_limit: DEFAULT_LATENCY_MS_LIMIT,
            recovery_interval_seconds: DEFAULT_RECOVERY_INTERVAL_SECONDS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

/// Request-correlation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Correlation identifier length ceiling.
    pub max_id_length: u64,
    /// In-flight request ceiling.
    pub max_inflight_requests: u64,
    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            max_id_length: DEFAULT_MAX_ID_LENGTH,
            max_inflight_requests: DEFAULT_MAX_INFLIGHT_REQUESTS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

/// Deployment environment selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Pre-production staging.
    Staging,
    /// Production.
    Production,
}

impl Environment {
    /// Returns the stable string form of the environment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Server and environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Graceful shutdown timeout in seconds.
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        }
    }
}

// ============================================================================
// SECTION: Configuration Document
// ============================================================================

/// Complete, normalized system configuration.
///
/// # Invariants
/// - The default document always validates with zero errors.
/// - Instances produced by the validator satisfy all per-field range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigurationDocument {
    /// Thinking-budget limits.
    pub thinking: ThinkingConfig,
    /// Conversation memory limits.
    pub memory: MemoryConfig,
    /// Resource-monitor thresholds.
    pub resources: ResourceConfig,
    /// Degradation-detector thresholds.
    pub degradation: DegradationConfig,
    /// Request-correlation limits.
    pub correlation: CorrelationConfig,
    /// Server and environment settings.
    pub server: ServerConfig,
}

impl ConfigurationDocument {
    /// Returns a copy of this document with a partial overlay applied.
    ///
    /// Overlay leaves win field-by-field; absent leaves keep the base value.
    #[must_use]
    pub fn merged(&self, patch: &ConfigurationPatch) -> Self {
        let mut merged = self.clone();
        if let Some(thinking) = &patch.thinking {
            apply_leaf(&mut merged.thinking.max_thinking_tokens, thinking.max_thinking_tokens);
            apply_leaf(
                &mut merged.thinking.max_blocks_per_operation,
                thinking.max_blocks_per_operation,
            );
            apply_leaf(&mut merged.thinking.budget_warning_ratio, thinking.budget_warning_ratio);
        }
        if let Some(memory) = &patch.memory {
            apply_leaf(&mut merged.memory.max_conversations, memory.max_conversations);
            apply_leaf(&mut merged.memory.max_memory_mb, memory.max_memory_mb);
            apply_leaf(&mut merged.memory.average_conversation_kb, memory.average_conversation_kb);
            apply_leaf(&mut merged.memory.max_blocks, memory.max_blocks);
            apply_leaf(
                &mut merged.memory.conversation_ttl_seconds,
                memory.conversation_ttl_seconds,
            );
        }
        if let Some(resources) = &patch.resources {
            apply_leaf(&mut merged.resources.cpu_percent_limit, resources.cpu_percent_limit);
            apply_leaf(&mut merged.resources.memory_percent_limit, resources.memory_percent_limit);
            apply_leaf(&mut merged.resources.max_open_handles, resources.max_open_handles);
            apply_leaf(
                &mut merged.resources.sample_interval_seconds,
                resources.sample_interval_seconds,
            );
        }
        if let Some(degradation) = &patch.degradation {
            apply_leaf(&mut merged.degradation.error_rate_limit, degradation.error_rate_limit);
            apply_leaf(&mut merged.degradation.latency_ms_limit, degradation.latency_ms_limit);
            apply_leaf(
                &mut merged.degradation.recovery_interval_seconds,
                degradation.recovery_interval_seconds,
            );
            apply_leaf(&mut merged.degradation.min_samples, degradation.min_samples);
        }
        if let Some(correlation) = &patch.correlation {
            apply_leaf(&mut merged.correlation.max_id_length, correlation.max_id_length);
            apply_leaf(
                &mut merged.correlation.max_inflight_requests,
                correlation.max_inflight_requests,
            );
            apply_leaf(
                &mut merged.correlation.request_timeout_seconds,
                correlation.request_timeout_seconds,
            );
        }
        if let Some(server) = &patch.server {
            apply_leaf(&mut merged.server.environment, server.environment);
            apply_leaf(
                &mut merged.server.shutdown_timeout_seconds,
                server.shutdown_timeout_seconds,
            );
        }
        merged
    }
}

/// Applies a single overlay leaf when present.
fn apply_leaf<T: Clone>(target: &mut T, overlay: Option<T>) {
    if let Some(value) = overlay {
        *target = value;
    }
}

// ============================================================================
// SECTION: Configuration Patch
// ============================================================================

/// Partial overlay for [`ThinkingConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ThinkingPatch {
    /// Optional thinking-token budget override.
    pub max_thinking_tokens: Option<u64>,
    /// Optional per-operation block ceiling override.
    pub max_blocks_per_operation: Option<u64>,
    /// Optional budget warning ratio override.
    pub budget_warning_ratio: Option<f64>,
}

/// Partial overlay for [`MemoryConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MemoryPatch {
    /// Optional conversation-count ceiling override.
    pub max_conversations: Option<u64>,
    /// Optional memory ceiling override.
    pub max_memory_mb: Option<u64>,
    /// Optional average conversation size override.
    pub average_conversation_kb: Option<u64>,
    /// Optional global block ceiling override.
    pub max_blocks: Option<u64>,
    /// Optional conversation TTL override.
    pub conversation_ttl_seconds: Option<u64>,
}

/// Partial overlay for [`ResourceConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResourcePatch {
    /// Optional CPU limit override.
    pub cpu_percent_limit: Option<f64>,
    /// Optional memory limit override.
    pub memory_percent_limit: Option<f64>,
    /// Optional open-handle ceiling override.
    pub max_open_handles: Option<u64>,
    /// Optional sample interval override.
    pub sample_interval_seconds: Option<u64>,
}

/// Partial overlay for [`DegradationConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DegradationPatch {
    /// Optional error-rate limit override.
    pub error_rate_limit: Option<f64>,
    /// Optional latency limit override.
    pub latency_ms_limit: Option<u64>,
    /// Optional recovery interval override.
    pub recovery_interval_seconds: Option<u64>,
    /// Optional minimum sample count override.
    pub min_samples: Option<u64>,
}

/// Partial overlay for [`CorrelationConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CorrelationPatch {
    /// Optional identifier length ceiling override.
    pub max_id_length: Option<u64>,
    /// Optional in-flight request ceiling override.
    pub max_inflight_requests: Option<u64>,
    /// Optional request timeout override.
    pub request_timeout_seconds: Option<u64>,
}

/// Partial overlay for [`ServerConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServerPatch {
    /// Optional environment override.
    pub environment: Option<Environment>,
    /// Optional shutdown timeout override.
    pub shutdown_timeout_seconds: Option<u64>,
}

/// Partial overlay applied onto the default document by `initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigurationPatch {
    /// Optional thinking-section overlay.
    pub thinking: Option<ThinkingPatch>,
    /// Optional memory-section overlay.
    pub memory: Option<MemoryPatch>,
    /// Optional resources-section overlay.
    pub resources: Option<ResourcePatch>,
    /// Optional degradation-section overlay.
    pub degradation: Option<DegradationPatch>,
    /// Optional correlation-section overlay.
    pub correlation: Option<CorrelationPatch>,
    /// Optional server-section overlay.
    pub server: Option<ServerPatch>,
}
