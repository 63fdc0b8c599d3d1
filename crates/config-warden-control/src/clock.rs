// config-warden-control/src/clock.rs
// ============================================================================
// Module: Wall Clock Helpers
// Description: Unix timestamp reads for enforcement and audit records.
// Purpose: Keep wall-clock access in one place.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Enforcement state and audit events carry unix-millisecond timestamps read
//! at the point of the operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current wall-clock time in unix milliseconds.
#[must_use]
pub(crate) fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
