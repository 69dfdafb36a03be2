//! Hand-gesture symbol classification
//!
//! Converts a stream of tracked hand-landmark frames into discrete
//! symbolic tokens: an ordered rule set classifies each frame, and an
//! accumulator debounces the per-frame results into a text stream.

pub mod accumulator;
pub mod capture;
pub mod classifier;
pub mod rules;

pub use accumulator::SymbolStreamAccumulator;
pub use capture::{GestureCapture, GestureCaptureEvent};
pub use classifier::GestureClassifier;
pub use rules::{rule_set, GestureRule, RuleContext, Symbol};
