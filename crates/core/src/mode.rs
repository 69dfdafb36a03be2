//! Conversion modes
//!
//! A mode encodes an input modality and an output modality as a single
//! `input-output` token, e.g. `text-audio` reads typed text aloud.

use serde::{Deserialize, Serialize};

/// One of the three communication modalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Audio,
    Sign,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Sign => "sign",
        }
    }
}

/// A conversion mode selected for a paired session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeId {
    TextAudio,
    AudioText,
    TextText,
    AudioAudio,
    SignAudio,
    AudioSign,
    TextSign,
    SignText,
    SignSign,
}

impl ModeId {
    /// All modes in declaration order
    pub const ALL: [ModeId; 9] = [
        ModeId::TextAudio,
        ModeId::AudioText,
        ModeId::TextText,
        ModeId::AudioAudio,
        ModeId::SignAudio,
        ModeId::AudioSign,
        ModeId::TextSign,
        ModeId::SignText,
        ModeId::SignSign,
    ];

    /// Input modality (left component of the token)
    pub fn input(&self) -> Modality {
        match self {
            Self::TextAudio | Self::TextText | Self::TextSign => Modality::Text,
            Self::AudioText | Self::AudioAudio | Self::AudioSign => Modality::Audio,
            Self::SignAudio | Self::SignText | Self::SignSign => Modality::Sign,
        }
    }

    /// Output modality (right component of the token)
    pub fn output(&self) -> Modality {
        match self {
            Self::TextAudio | Self::AudioAudio | Self::SignAudio => Modality::Audio,
            Self::AudioText | Self::TextText | Self::SignText => Modality::Text,
            Self::AudioSign | Self::TextSign | Self::SignSign => Modality::Sign,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextAudio => "text-audio",
            Self::AudioText => "audio-text",
            Self::TextText => "text-text",
            Self::AudioAudio => "audio-audio",
            Self::SignAudio => "sign-audio",
            Self::AudioSign => "audio-sign",
            Self::TextSign => "text-sign",
            Self::SignText => "sign-text",
            Self::SignSign => "sign-sign",
        }
    }

    /// User-facing label for the mode
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::TextAudio => "Văn bản → Âm thanh",
            Self::AudioText => "Âm thanh → Văn bản",
            Self::TextText => "Văn bản → Văn bản",
            Self::AudioAudio => "Âm thanh → Âm thanh",
            Self::SignAudio => "Ngôn ngữ ký hiệu → Âm thanh",
            Self::AudioSign => "Âm thanh → Ngôn ngữ ký hiệu",
            Self::TextSign => "Văn bản → Ngôn ngữ ký hiệu",
            Self::SignText => "Ngôn ngữ ký hiệu → Văn bản",
            Self::SignSign => "Ngôn ngữ ký hiệu → Ngôn ngữ ký hiệu",
        }
    }

    /// Whether running this mode needs a microphone capture session.
    ///
    /// Audio-input modes need one; `sign-audio` is also treated as a
    /// microphone mode, matching the long-standing runtime behavior.
    pub fn requires_microphone(&self) -> bool {
        self.input() == Modality::Audio || *self == Self::SignAudio
    }

    /// Whether running this mode needs a camera capture session
    pub fn requires_camera(&self) -> bool {
        self.input() == Modality::Sign
    }
}

impl std::fmt::Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModeId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| crate::Error::Collaborator(format!("unknown mode id: {s}")))
    }
}
