//! Conversion engine

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use comm_bridge_config::prompts;
use comm_bridge_core::{Modality, ModeId, SpeechSynthesizer, UtteranceConfig};

/// How the output text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Text output: input passed through unchanged
    PassThrough,
    /// Audio output: descriptor wrapping the spoken text
    AudioAnnouncement,
    /// Sign output: placeholder descriptor, no synthesis performed
    SignPlaceholder,
}

/// Result of one conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputResult {
    /// Mode the conversion ran under
    pub mode: ModeId,
    /// Textual result, always delivered
    pub text: String,
    /// Text handed to the speech output, when the output modality is audio
    pub spoken: Option<String>,
    /// Output representation that was selected
    pub kind: OutputKind,
}

/// Selects the output representation for a mode and requests speech output
/// when the mode calls for it.
///
/// Speech is fire-and-forget here: the request is handed to the
/// synthesizer (canceling any utterance in progress so audio never
/// overlaps) and the textual result returns immediately. A failed request
/// is logged and not retried.
pub struct ConversionEngine {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    utterance: UtteranceConfig,
}

impl ConversionEngine {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, utterance: UtteranceConfig) -> Self {
        Self {
            synthesizer,
            utterance,
        }
    }

    /// Convert input text under the given mode.
    ///
    /// At most one speech-output request is triggered per call, only when
    /// the mode's output modality is audio.
    pub fn convert(&self, mode: ModeId, input_text: &str) -> OutputResult {
        match mode.output() {
            Modality::Audio => {
                let spoken = if input_text.is_empty() && mode.input() == Modality::Sign {
                    prompts::SIGN_INPUT_PLACEHOLDER.to_string()
                } else {
                    input_text.to_string()
                };
                self.request_speech(&spoken);
                OutputResult {
                    mode,
                    text: prompts::audio_announcement(input_text),
                    spoken: Some(spoken),
                    kind: OutputKind::AudioAnnouncement,
                }
            }
            Modality::Sign => OutputResult {
                mode,
                text: prompts::sign_rendering(input_text),
                spoken: None,
                kind: OutputKind::SignPlaceholder,
            },
            Modality::Text => OutputResult {
                mode,
                text: input_text.to_string(),
                spoken: None,
                kind: OutputKind::PassThrough,
            },
        }
    }

    /// Hand one utterance to the synthesizer without waiting for it.
    fn request_speech(&self, text: &str) {
        self.synthesizer.cancel();
        let synthesizer = Arc::clone(&self.synthesizer);
        let utterance = self.utterance.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = synthesizer.speak(&text, &utterance).await {
                // Transient output failure: logged, never retried; the
                // textual result was already delivered.
                tracing::warn!(error = %e, "speech output failed");
            }
        });
    }
}
