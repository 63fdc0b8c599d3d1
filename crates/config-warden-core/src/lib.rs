// config-warden-core/src/lib.rs
// ============================================================================
// Module: Config Warden Core Library
// Description: Pure data model, validation, and diffing for the configuration
//              compliance control loop.
// Purpose: Single source of truth for configuration semantics shared by the
//          control crates.
// Dependencies: async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `config-warden-core` defines the typed configuration document, the
//! validator that turns untrusted JSON candidates into normalized documents,
//! the structural diff used for drift detection, and the managed-component
//! interfaces the control loop enforces against. Everything in this crate is
//! side-effect free; the control loop lives in `config-warden-control`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod diff;
pub mod interfaces;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;
pub use diff::ValueDelta;
pub use diff::diff_values;
pub use interfaces::ComponentError;
pub use interfaces::ComponentMetrics;
pub use interfaces::ManagedComponent;
pub use validator::MAX_SAFE_INFLIGHT_REQUESTS;
pub use validator::MAX_SAFE_TIMEOUT_SECONDS;
pub use validator::MIN_SAFE_ID_LENGTH;
pub use validator::RESOURCE_ESTIMATE_TOLERANCE;
pub use validator::recommend;
pub use validator::validate;
