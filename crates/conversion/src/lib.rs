//! Modality conversion engine
//!
//! Given the pair's selected mode and the current input text, picks the
//! output representation: pass the text through, announce it as audio, or
//! emit a sign-rendering placeholder.

pub mod engine;

pub use engine::{ConversionEngine, OutputKind, OutputResult};
