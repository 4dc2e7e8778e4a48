// ── Core error types ──
//
// The normalizer itself never fails: bad values are clamped or defaulted.
// These errors only come from the edges: reading a snapshot document,
// parsing an SNMP dump, or validating a card layout.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input documents ──────────────────────────────────────────────
    #[error("Snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("SNMP dump contains no interface descriptions")]
    NoInterfaces,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid card configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}
