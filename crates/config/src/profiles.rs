//! Static profile definitions
//!
//! Each participant profile carries the keyword set used for spoken
//! self-description matching plus its display label. Definitions are
//! loaded once and never mutated; their declaration order is the
//! detector's tie-break order.

use comm_bridge_core::ProfileId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One profile with its detection keywords and display label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Profile identifier
    pub id: ProfileId,
    /// User-facing label
    pub label: String,
    /// Keywords matched case-insensitively as substrings of a transcript,
    /// in declaration order
    pub keywords: Vec<String>,
}

static PROFILE_DEFINITIONS: Lazy<Vec<ProfileDefinition>> = Lazy::new(|| {
    vec![
        ProfileDefinition {
            id: ProfileId::Normal,
            label: "Người bình thường".to_string(),
            keywords: vec![
                "bình thường".to_string(),
                "không có vấn đề".to_string(),
                "khỏe".to_string(),
            ],
        },
        ProfileDefinition {
            id: ProfileId::Blind,
            label: "Người mù".to_string(),
            keywords: vec![
                "mù".to_string(),
                "không nhìn thấy".to_string(),
                "khiếm thị".to_string(),
            ],
        },
        ProfileDefinition {
            id: ProfileId::Mute,
            label: "Người câm".to_string(),
            keywords: vec![
                "câm".to_string(),
                "không nói được".to_string(),
                "khiếm khẩu".to_string(),
            ],
        },
        ProfileDefinition {
            id: ProfileId::Deaf,
            label: "Người điếc".to_string(),
            keywords: vec![
                "điếc".to_string(),
                "không nghe được".to_string(),
                "khiếm thính".to_string(),
            ],
        },
        ProfileDefinition {
            id: ProfileId::MuteDeaf,
            label: "Người câm và điếc".to_string(),
            keywords: vec!["câm và điếc".to_string(), "câm điếc".to_string()],
        },
    ]
});

/// All profile definitions in declaration order
pub fn definitions() -> &'static [ProfileDefinition] {
    &PROFILE_DEFINITIONS
}

/// Look up one profile's definition
pub fn definition(id: ProfileId) -> &'static ProfileDefinition {
    definitions()
        .iter()
        .find(|d| d.id == id)
        .expect("every ProfileId has a definition")
}

/// Display label for a profile
pub fn label(id: ProfileId) -> &'static str {
    &definition(id).label
}
