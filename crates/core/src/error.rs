//! Error types shared across the bridge
//!
//! Every variant maps to one class of the error taxonomy: errors are local
//! to the subsystem that raised them and never crash the pairing or
//! classification flow.

use thiserror::Error;

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge-wide error type
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Speech or tracking capability absent in the runtime environment.
    /// Reported once; the caller falls back to manual selection.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// User declined microphone or camera access. The pairing flow stays
    /// in its current phase awaiting manual override.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A collaborator failed to become ready within its budget. Fatal for
    /// the current capture session only; retried by restarting capture.
    #[error("{what} failed to initialize within {budget_ms} ms")]
    InitTimeout { what: String, budget_ms: u64 },

    /// A speech-output request failed. Non-fatal; the textual result is
    /// still delivered.
    #[error("speech output failed: {0}")]
    SpeechOutput(String),

    /// Any other collaborator-reported failure.
    #[error("{0}")]
    Collaborator(String),
}

impl Error {
    /// Create a capability-unavailable error
    pub fn capability(what: impl Into<String>) -> Self {
        Self::CapabilityUnavailable(what.into())
    }

    /// Create a permission-denied error
    pub fn permission(what: impl Into<String>) -> Self {
        Self::PermissionDenied(what.into())
    }

    /// Create an initialization-timeout error
    pub fn init_timeout(what: impl Into<String>, budget_ms: u64) -> Self {
        Self::InitTimeout {
            what: what.into(),
            budget_ms,
        }
    }

    /// Whether the error ends the current capture session (as opposed to
    /// being surfaced and carried on from)
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::InitTimeout { .. })
    }
}
