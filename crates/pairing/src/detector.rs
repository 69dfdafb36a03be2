//! Profile keyword detection
//!
//! Maps a finalized speech transcript to a participant profile by scanning
//! the static profile definitions for a case-insensitive substring match.

use comm_bridge_config::profiles;
use comm_bridge_core::ProfileId;

/// Keyword-based profile detector.
///
/// Pure function of the transcript: profiles are scanned in declaration
/// order (normal, blind, mute, deaf, mute-deaf) and, within a profile,
/// keywords in declaration order; the first match wins. Matching is
/// substring-based, not tokenized, so a keyword occurring inside a longer
/// word also matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileKeywordDetector;

impl ProfileKeywordDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect a profile from a finalized transcript.
    ///
    /// Returns `None` when no keyword matches; not an error, just "no
    /// transition yet" for the caller.
    pub fn detect(&self, transcript: &str) -> Option<ProfileId> {
        let lowered = transcript.to_lowercase();
        for definition in profiles::definitions() {
            for keyword in &definition.keywords {
                if lowered.contains(keyword.as_str()) {
                    tracing::debug!(
                        profile = %definition.id,
                        keyword = %keyword,
                        "profile keyword matched"
                    );
                    return Some(definition.id);
                }
            }
        }
        None
    }
}
