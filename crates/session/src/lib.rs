//! Bridge session orchestration
//!
//! Wires the pairing state machine, the speech collaborators, and the
//! conversion engine into one event-driven session:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  Recognizer  │────▶│  PairingStateM.  │────▶│  Compatibility   │
//! │ (transcripts)│     │ (profile phases) │     │  lookup → mode   │
//! └──────────────┘     └──────────────────┘     └──────────────────┘
//!        ▲                      │ actions                │
//!        │                      ▼                        ▼
//!        └──────── resume ── Announcer ◀── ConversionEngine (audio out)
//! ```
//!
//! The core components stay synchronous; tokio tasks only move events
//! between them.

pub mod announcer;
pub mod bridge;

pub use announcer::Announcer;
pub use bridge::{BridgeEvent, BridgeSession, SessionError};
