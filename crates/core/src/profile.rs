//! Participant communication profiles

use serde::{Deserialize, Serialize};

/// A participant's self-described communication capability.
///
/// Immutable once assigned to a participant within a session. Declaration
/// order matters: keyword detection scans profiles in this order and the
/// first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileId {
    /// No communication impairment
    Normal,
    /// Blind participant
    Blind,
    /// Mute participant
    Mute,
    /// Deaf participant
    Deaf,
    /// Combined mute and deaf
    MuteDeaf,
}

impl ProfileId {
    /// All profiles in declaration order
    pub const ALL: [ProfileId; 5] = [
        ProfileId::Normal,
        ProfileId::Blind,
        ProfileId::Mute,
        ProfileId::Deaf,
        ProfileId::MuteDeaf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Blind => "blind",
            Self::Mute => "mute",
            Self::Deaf => "deaf",
            Self::MuteDeaf => "mute-deaf",
        }
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "blind" => Ok(Self::Blind),
            "mute" => Ok(Self::Mute),
            "deaf" => Ok(Self::Deaf),
            "mute-deaf" => Ok(Self::MuteDeaf),
            other => Err(crate::Error::Collaborator(format!(
                "unknown profile id: {other}"
            ))),
        }
    }
}
