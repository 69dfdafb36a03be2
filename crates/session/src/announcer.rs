//! Serialized speech output
//!
//! Utterances must never overlap: every announcement cancels whatever is
//! in flight before speaking. Completion is the synthesizer's event, not a
//! guessed duration; the configured fallback timeout only bounds a
//! collaborator that never reports back.

use std::sync::Arc;
use std::time::Duration;

use comm_bridge_core::{SpeakOutcome, SpeechSynthesizer, UtteranceConfig};

/// Serializing wrapper around the speech synthesizer
#[derive(Clone)]
pub struct Announcer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    utterance: UtteranceConfig,
    fallback: Duration,
}

impl Announcer {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        utterance: UtteranceConfig,
        fallback: Duration,
    ) -> Self {
        Self {
            synthesizer,
            utterance,
            fallback,
        }
    }

    /// Speak one utterance and wait for its completion event, bounded by
    /// the fallback timeout. A failed or timed-out utterance is logged
    /// and reported as canceled; callers carry on either way.
    pub async fn announce(&self, text: &str) -> SpeakOutcome {
        self.synthesizer.cancel();
        match tokio::time::timeout(self.fallback, self.synthesizer.speak(text, &self.utterance))
            .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "announcement failed");
                SpeakOutcome::Canceled
            }
            Err(_) => {
                tracing::warn!(
                    fallback_ms = self.fallback.as_millis() as u64,
                    "no completion event within fallback budget, canceling utterance"
                );
                self.synthesizer.cancel();
                SpeakOutcome::Canceled
            }
        }
    }

    /// Cancel any in-flight utterance
    pub fn cancel(&self) {
        self.synthesizer.cancel();
    }

    /// The synthesizer this announcer serializes
    pub fn synthesizer(&self) -> Arc<dyn SpeechSynthesizer> {
        Arc::clone(&self.synthesizer)
    }
}
