//! Transcript types

use serde::{Deserialize, Serialize};

/// One speech-recognition result, interim or final.
///
/// A recognition session yields zero or more interim updates followed by
/// exactly one final transcript per utterance. Profile detection consumes
/// only final transcripts; interim text is display-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Recognized text
    pub text: String,
    /// Whether this is the utterance's final transcript
    pub is_final: bool,
    /// Recognizer confidence, 0.0 to 1.0
    pub confidence: f32,
}

impl TranscriptResult {
    /// Create a final transcript
    pub fn final_text(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            is_final: true,
            confidence,
        }
    }

    /// Create an interim update
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let t = TranscriptResult::final_text("tôi bị mù", 0.92);
        assert!(t.is_final);
        assert_eq!(t.text, "tôi bị mù");

        let i = TranscriptResult::interim("tôi");
        assert!(!i.is_final);
    }
}
