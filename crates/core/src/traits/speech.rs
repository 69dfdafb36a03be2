//! Speech collaborator traits

use crate::{Error, Result, TranscriptResult};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Events delivered by an active recognition session
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// Interim or final transcript update
    Transcript(TranscriptResult),
    /// Recognition error (permission denied, capability unavailable, ...)
    Error(Error),
    /// The session ended on its own (engine-side stop)
    Ended,
}

/// Stream of recognition events for one session
pub type RecognizerStream = Pin<Box<dyn Stream<Item = RecognizerEvent> + Send>>;

/// Speech-to-text session interface.
///
/// At most one recognition session may be active per recognizer; callers
/// starting a new session must request termination of the previous one
/// first (last-writer-wins, not queuing).
///
/// # Example
///
/// ```ignore
/// let mut events = recognizer.start().await?;
/// while let Some(event) = events.next().await {
///     if let RecognizerEvent::Transcript(t) = event {
///         if t.is_final {
///             handle_final_transcript(&t.text);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + 'static {
    /// Start a recognition session and return its event stream.
    ///
    /// Per utterance the stream yields zero or more interim transcripts
    /// followed by exactly one final transcript.
    ///
    /// # Errors
    /// `Error::CapabilityUnavailable` if the environment has no speech
    /// recognition, `Error::PermissionDenied` if microphone access was
    /// declined.
    async fn start(&self) -> Result<RecognizerStream>;

    /// Request termination of the active session, if any. Idempotent.
    async fn stop(&self);

    /// Whether a session is currently active
    fn is_active(&self) -> bool;

    /// BCP-47 language tag the recognizer listens in
    fn language(&self) -> &str;
}

/// Voice parameters for one utterance
#[derive(Debug, Clone)]
pub struct UtteranceConfig {
    /// BCP-47 language tag
    pub language: String,
    /// Speaking rate (1.0 = normal)
    pub rate: f32,
    /// Pitch adjustment (1.0 = normal)
    pub pitch: f32,
    /// Volume (0.0 to 1.0)
    pub volume: f32,
}

impl Default for UtteranceConfig {
    fn default() -> Self {
        Self {
            language: "vi-VN".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// How an utterance finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// The utterance played to the end
    Completed,
    /// The utterance was canceled mid-flight
    Canceled,
}

/// Text-to-speech interface.
///
/// Utterances are serialized by the collaborator: speaking while another
/// utterance is in flight requires canceling it first so audio never
/// overlaps.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Speak an utterance. Resolves when the engine reports completion or
    /// the utterance is canceled; callers await this completion event
    /// rather than guessing a duration.
    ///
    /// # Errors
    /// `Error::SpeechOutput` on engine failure (non-fatal to callers) or
    /// `Error::CapabilityUnavailable` if synthesis is absent.
    async fn speak(&self, text: &str, config: &UtteranceConfig) -> Result<SpeakOutcome>;

    /// Request cancellation of any in-flight utterance. Idempotent.
    fn cancel(&self);

    /// Whether an utterance is currently playing
    fn is_speaking(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_defaults() {
        let config = UtteranceConfig::default();
        assert_eq!(config.language, "vi-VN");
        assert!((config.rate - 1.0).abs() < f32::EPSILON);
    }
}
