//! Profile detection and modality negotiation
//!
//! Voice-driven pairing of two participants: a keyword detector classifies
//! each participant's spoken self-description, a static compatibility
//! matrix maps the pair to its available conversion modes, and a state
//! machine orchestrates the two detection phases and the mode selection.

pub mod detector;
pub mod matrix;
pub mod state_machine;

pub use detector::ProfileKeywordDetector;
pub use matrix::CompatibilityMatrix;
pub use state_machine::{
    PairingAction, PairingError, PairingSession, PairingState, PairingStateMachine,
};
