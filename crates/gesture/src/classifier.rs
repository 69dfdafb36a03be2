//! Gesture classifier
//!
//! Applies the rule table to one landmark frame at a time. Pure function
//! of the frame: no history is retained, debouncing across frames is the
//! accumulator's job.

use comm_bridge_config::GestureSettings;
use comm_bridge_core::LandmarkFrame;

use crate::rules::{rule_set, RuleContext, Symbol};

/// First-match-wins classifier over the static rule table
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    context: RuleContext,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            context: RuleContext::default(),
        }
    }
}

impl GestureClassifier {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            context: RuleContext {
                ring_distance_threshold: settings.ring_distance_threshold,
            },
        }
    }

    /// Classify one frame.
    ///
    /// Rules are evaluated in table order and evaluation stops at the
    /// first match, so at most one symbol is returned per call even
    /// though the rules are not mutually exclusive.
    pub fn classify(&self, frame: &LandmarkFrame) -> Option<Symbol> {
        for rule in rule_set() {
            if rule.matches(frame, &self.context) {
                tracing::trace!(symbol = %rule.symbol, "gesture rule matched");
                return Some(rule.symbol);
            }
        }
        None
    }
}
