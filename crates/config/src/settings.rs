//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Speech collaborator configuration
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Prompt sequencing and safety-bound timings
    #[serde(default)]
    pub timing: TimingSettings,

    /// Gesture classification configuration
    #[serde(default)]
    pub gesture: GestureSettings,

    /// Internal channel capacities
    #[serde(default)]
    pub channels: ChannelSettings,
}

/// Speech recognition/synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// BCP-47 language tag for recognition and synthesis
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "vi-VN".to_string()
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Timed waits used to sequence voice prompts and pauses.
///
/// All waits are cancelable; canceling prevents the scheduled action from
/// firing. The fallback timeout bounds how long the bridge waits for the
/// synthesizer's completion event before moving on anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Pause before the welcome prompt is spoken at session start (ms)
    #[serde(default = "default_pre_welcome_delay_ms")]
    pub pre_welcome_delay_ms: u64,

    /// Pause between a detection announcement finishing and listening
    /// resuming for the next phase (ms)
    #[serde(default = "default_resume_listening_delay_ms")]
    pub resume_listening_delay_ms: u64,

    /// Pause before the paired-mode announcement after the second profile
    /// is detected (ms)
    #[serde(default = "default_pairing_announce_delay_ms")]
    pub pairing_announce_delay_ms: u64,

    /// Safety bound on waiting for an utterance's completion event (ms)
    #[serde(default = "default_utterance_fallback_ms")]
    pub utterance_fallback_ms: u64,
}

fn default_pre_welcome_delay_ms() -> u64 {
    1_000
}

fn default_resume_listening_delay_ms() -> u64 {
    1_000
}

fn default_pairing_announce_delay_ms() -> u64 {
    2_000
}

fn default_utterance_fallback_ms() -> u64 {
    15_000
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            pre_welcome_delay_ms: default_pre_welcome_delay_ms(),
            resume_listening_delay_ms: default_resume_listening_delay_ms(),
            pairing_announce_delay_ms: default_pairing_announce_delay_ms(),
            utterance_fallback_ms: default_utterance_fallback_ms(),
        }
    }
}

/// Gesture capture and classification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSettings {
    /// Thumb-tip/index-tip distance below which the closed-ring gesture
    /// matches (normalized image units)
    #[serde(default = "default_ring_distance_threshold")]
    pub ring_distance_threshold: f32,

    /// Minimum tracking confidence for a frame to be classified
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Budget for the tracking engine's initialization phase (ms)
    #[serde(default = "default_tracker_init_timeout_ms")]
    pub tracker_init_timeout_ms: u64,
}

fn default_ring_distance_threshold() -> f32 {
    0.05
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_tracker_init_timeout_ms() -> u64 {
    10_000
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            ring_distance_threshold: default_ring_distance_threshold(),
            min_confidence: default_min_confidence(),
            tracker_init_timeout_ms: default_tracker_init_timeout_ms(),
        }
    }
}

/// Internal channel capacities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Session event broadcast capacity
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    100
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}

impl Settings {
    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gesture.ring_distance_threshold <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "gesture.ring_distance_threshold must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gesture.min_confidence) {
            return Err(ConfigError::InvalidValue(
                "gesture.min_confidence must be within 0.0..=1.0".to_string(),
            ));
        }
        if self.channels.event_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "channels.event_capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from an optional TOML file plus environment overrides.
///
/// Environment variables use the `COMM_BRIDGE_` prefix with `__` as the
/// section separator, e.g. `COMM_BRIDGE_SPEECH__LANGUAGE=vi-VN`.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(Environment::with_prefix("COMM_BRIDGE").separator("__"));

    let settings: Settings = builder
        .build()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    settings.validate()?;
    tracing::debug!(language = %settings.speech.language, "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.speech.language, "vi-VN");
        assert_eq!(settings.gesture.tracker_init_timeout_ms, 10_000);
        assert!((settings.gesture.ring_distance_threshold - 0.05).abs() < f32::EPSILON);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut settings = Settings::default();
        settings.gesture.ring_distance_threshold = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_settings(Some(Path::new("/nonexistent/bridge.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
