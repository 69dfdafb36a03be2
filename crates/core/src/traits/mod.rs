//! Collaborator traits
//!
//! The bridge core never touches hardware or inference engines directly.
//! Speech recognition, speech synthesis, video frames, and hand tracking
//! are pluggable collaborators behind these traits; the core is invoked
//! once per completed external event and returns immediately.

pub mod speech;
pub mod tracking;

pub use speech::{
    RecognizerEvent, RecognizerStream, SpeakOutcome, SpeechRecognizer, SpeechSynthesizer,
    UtteranceConfig,
};
pub use tracking::{FrameSource, HandStream, HandTracker, TrackedHand};
