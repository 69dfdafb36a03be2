//! Configuration management for the communication bridge
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (COMM_BRIDGE_ prefix)
//!
//! Static domain data (profile definitions with their detection keywords,
//! spoken prompt text) also lives here so every crate reads one source.

pub mod profiles;
pub mod prompts;
pub mod settings;

pub use profiles::{definition, definitions, label, ProfileDefinition};
pub use settings::{
    load_settings, ChannelSettings, GestureSettings, Settings, SpeechSettings, TimingSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
