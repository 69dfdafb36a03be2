//! Compatibility matrix
//!
//! Static table mapping an unordered pair of participant profiles to the
//! ordered list of conversion modes available to them. First element is
//! the default mode. Never modified at runtime.

use comm_bridge_core::ModeId::{self, *};
use comm_bridge_core::ProfileId::{self, *};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static COMPATIBILITY: Lazy<HashMap<(ProfileId, ProfileId), &'static [ModeId]>> = Lazy::new(|| {
    let mut map: HashMap<(ProfileId, ProfileId), &'static [ModeId]> = HashMap::new();
    map.insert((Normal, Blind), &[TextAudio, AudioAudio] as &[_]);
    map.insert((Normal, Mute), &[AudioText, AudioSign] as &[_]);
    map.insert((Normal, Deaf), &[AudioText, AudioSign] as &[_]);
    map.insert((Blind, Blind), &[AudioAudio] as &[_]);
    map.insert((Mute, Mute), &[TextText, SignSign, AudioAudio] as &[_]);
    map.insert((Mute, Deaf), &[TextText, TextSign, SignSign] as &[_]);
    map.insert((Deaf, Deaf), &[TextText, TextSign, SignText, SignSign] as &[_]);
    map.insert((Deaf, Blind), &[TextAudio, SignAudio] as &[_]);
    map.insert(
        (MuteDeaf, MuteDeaf),
        &[TextText, TextSign, SignText, SignSign] as &[_],
    );
    map
});

/// Read-only view over the compatibility table
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityMatrix;

impl CompatibilityMatrix {
    pub fn new() -> Self {
        Self
    }

    /// Look up the modes available to an unordered profile pair.
    ///
    /// Both orderings of the key are checked, so
    /// `lookup(a, b) == lookup(b, a)` for every pair. Pairs with no entry
    /// yield an empty slice.
    pub fn lookup(&self, a: ProfileId, b: ProfileId) -> &'static [ModeId] {
        COMPATIBILITY
            .get(&(a, b))
            .or_else(|| COMPATIBILITY.get(&(b, a)))
            .copied()
            .unwrap_or(&[])
    }

    /// Default mode for a pair: the first listed, if any
    pub fn default_mode(&self, a: ProfileId, b: ProfileId) -> Option<ModeId> {
        self.lookup(a, b).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric_for_all_pairs() {
        let matrix = CompatibilityMatrix::new();
        for a in ProfileId::ALL {
            for b in ProfileId::ALL {
                assert_eq!(
                    matrix.lookup(a, b),
                    matrix.lookup(b, a),
                    "asymmetry for ({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_normal_deaf_modes() {
        let matrix = CompatibilityMatrix::new();
        assert_eq!(
            matrix.lookup(Normal, Deaf),
            &[AudioText, AudioSign] as &[_]
        );
        assert_eq!(matrix.default_mode(Deaf, Normal), Some(AudioText));
    }

    #[test]
    fn test_mute_deaf_default_is_text_text() {
        let matrix = CompatibilityMatrix::new();
        assert_eq!(matrix.default_mode(Mute, Deaf), Some(TextText));
    }

    #[test]
    fn test_undefined_pair_is_empty() {
        let matrix = CompatibilityMatrix::new();
        assert!(matrix.lookup(Normal, Normal).is_empty());
        assert_eq!(matrix.default_mode(Normal, Normal), None);
    }

    #[test]
    fn test_deaf_blind_reversed_key_still_found() {
        let matrix = CompatibilityMatrix::new();
        // Table declares (Deaf, Blind); the reversed query must hit it.
        assert_eq!(
            matrix.lookup(Blind, Deaf),
            &[TextAudio, SignAudio] as &[_]
        );
    }
}
