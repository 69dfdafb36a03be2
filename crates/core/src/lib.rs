//! Core traits and types for the communication bridge
//!
//! This crate provides foundational types used across all other crates:
//! - Participant profiles and conversion modes
//! - Hand-landmark frame types
//! - Transcript types
//! - Core traits for pluggable collaborators (speech recognition,
//!   speech synthesis, video frames, hand tracking)
//! - Error types

pub mod error;
pub mod landmark;
pub mod mode;
pub mod profile;
pub mod traits;
pub mod transcript;

pub use error::{Error, Result};
pub use landmark::{HandLandmark, Landmark, LandmarkFrame, LANDMARK_COUNT};
pub use mode::{Modality, ModeId};
pub use profile::ProfileId;
pub use transcript::TranscriptResult;

pub use traits::{
    FrameSource,
    HandStream,
    HandTracker,
    RecognizerEvent,
    RecognizerStream,
    SpeakOutcome,
    SpeechRecognizer,
    SpeechSynthesizer,
    TrackedHand,
    UtteranceConfig,
};
