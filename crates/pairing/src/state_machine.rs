//! Pairing state machine
//!
//! Orchestrates collection of both participants' profiles and, on
//! completion, queries the compatibility matrix to select a default
//! conversion mode. Transitions are driven by discrete external events
//! (a finalized transcript, a user action) and return the actions the
//! orchestration layer should execute; the machine itself never touches
//! hardware and never blocks.

use chrono::{DateTime, Utc};
use comm_bridge_config::prompts;
use comm_bridge_core::{ModeId, ProfileId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CompatibilityMatrix, ProfileKeywordDetector};

/// Pairing phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PairingState {
    /// Listening for the first participant's self-description
    #[default]
    AwaitingPerson1,
    /// Listening for the second participant's self-description
    AwaitingPerson2,
    /// Both profiles known and a mode selected
    Paired,
    /// User opted out of voice pairing; profiles assigned directly
    ManualOverride,
}

impl PairingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingPerson1 => "awaiting-person1",
            Self::AwaitingPerson2 => "awaiting-person2",
            Self::Paired => "paired",
            Self::ManualOverride => "manual-override",
        }
    }
}

/// Pairing session context.
///
/// Owns everything that was session-global state in earlier revisions
/// (participant profiles, the greeted flag): created at session start,
/// reset to empty on restart, discarded on session end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingSession {
    /// Session identifier for logging
    pub id: Uuid,
    /// When the session was created
    pub started_at: DateTime<Utc>,
    /// First participant's profile; set before participant2
    pub participant1: Option<ProfileId>,
    /// Second participant's profile; only ever set after participant1
    pub participant2: Option<ProfileId>,
    /// Modes available to the pair, default first
    pub available_modes: Vec<ModeId>,
    /// Selected mode; always a member of `available_modes`
    pub selected_mode: Option<ModeId>,
    /// Whether the welcome prompt has been spoken this session
    pub greeted: bool,
}

impl PairingSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            participant1: None,
            participant2: None,
            available_modes: Vec::new(),
            selected_mode: None,
            greeted: false,
        }
    }

    /// Clear profiles and mode selection, keeping the session id
    fn reset(&mut self) {
        self.participant1 = None;
        self.participant2 = None;
        self.available_modes.clear();
        self.selected_mode = None;
        self.greeted = false;
    }
}

/// Actions to execute after a transition.
///
/// The orchestration layer interprets these in order: speaking goes to the
/// serialized speech output, detection control to the recognition session
/// manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PairingAction {
    /// Speak the given text through the speech output
    Speak { text: String },
    /// Terminate the active speech-detection session, if any
    StopDetection,
    /// Start (or restart) speech detection for the current phase
    ResumeDetection,
    /// Cancelable pacing pause before the next announcement
    Pause,
    /// Surface the "no compatible mode" notice to the user
    NoticeNoCompatibleMode,
}

impl PairingAction {
    /// Create a speak action
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speak { text: text.into() }
    }
}

/// Pairing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("operation requires state {required}, current state is {current}")]
    WrongState {
        required: &'static str,
        current: &'static str,
    },

    #[error("both profiles must be assigned before confirming")]
    ProfilesIncomplete,

    #[error("mode {0} is not available for this pair")]
    ModeNotAvailable(ModeId),
}

/// The pairing & modality-negotiation state machine.
///
/// At most one active listening operation is associated with the machine
/// at any time; every transition that changes phase emits `StopDetection`
/// before any `ResumeDetection` so the previous detection is terminated
/// first (last-writer-wins, not queuing).
#[derive(Debug)]
pub struct PairingStateMachine {
    state: PairingState,
    session: PairingSession,
    detector: ProfileKeywordDetector,
    matrix: CompatibilityMatrix,
}

impl Default for PairingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PairingStateMachine {
    pub fn new() -> Self {
        Self {
            state: PairingState::AwaitingPerson1,
            session: PairingSession::new(),
            detector: ProfileKeywordDetector::new(),
            matrix: CompatibilityMatrix::new(),
        }
    }

    /// Current pairing phase
    pub fn state(&self) -> PairingState {
        self.state
    }

    /// Session context
    pub fn session(&self) -> &PairingSession {
        &self.session
    }

    /// Modes available to the pair (empty until both profiles are known)
    pub fn available_modes(&self) -> &[ModeId] {
        &self.session.available_modes
    }

    /// Currently selected mode
    pub fn selected_mode(&self) -> Option<ModeId> {
        self.session.selected_mode
    }

    /// Begin (or resume) the voice-detection flow.
    ///
    /// The welcome prompt is spoken exactly once per session; later calls
    /// just resume listening for whichever participant is still missing.
    pub fn start(&mut self) -> Vec<PairingAction> {
        match self.state {
            PairingState::AwaitingPerson1 | PairingState::AwaitingPerson2 => {
                let mut actions = Vec::new();
                if !self.session.greeted && self.session.participant1.is_none() {
                    self.session.greeted = true;
                    actions.push(PairingAction::speak(prompts::WELCOME));
                }
                actions.push(PairingAction::ResumeDetection);
                actions
            }
            _ => Vec::new(),
        }
    }

    /// Feed one finalized transcript into the machine.
    ///
    /// No keyword match is not an error: the machine stays in its phase
    /// awaiting further input and returns no actions.
    pub fn handle_transcript(&mut self, transcript: &str) -> Vec<PairingAction> {
        match self.state {
            PairingState::AwaitingPerson1 => {
                let Some(profile) = self.detector.detect(transcript) else {
                    return Vec::new();
                };
                self.session.participant1 = Some(profile);
                self.state = PairingState::AwaitingPerson2;
                tracing::info!(session = %self.session.id, %profile, "participant 1 detected");
                vec![
                    PairingAction::StopDetection,
                    PairingAction::speak(prompts::detected_person1(profile)),
                    PairingAction::ResumeDetection,
                ]
            }
            PairingState::AwaitingPerson2 => {
                // Both profiles set but unpaired (empty lookup): only a
                // restart or manual override recovers, not more speech.
                if self.session.participant2.is_some() {
                    return Vec::new();
                }
                let Some(profile) = self.detector.detect(transcript) else {
                    return Vec::new();
                };
                self.session.participant2 = Some(profile);
                tracing::info!(session = %self.session.id, %profile, "participant 2 detected");

                let mut actions = vec![
                    PairingAction::StopDetection,
                    PairingAction::speak(prompts::detected_person2(profile)),
                    PairingAction::Pause,
                ];
                actions.extend(self.negotiate());
                actions
            }
            // Transcripts arriving after pairing or during manual override
            // belong to the conversation, not to pairing.
            PairingState::Paired | PairingState::ManualOverride => Vec::new(),
        }
    }

    /// Run the matrix lookup for the two known profiles and either pair or
    /// surface the no-compatible-mode notice.
    fn negotiate(&mut self) -> Vec<PairingAction> {
        let (Some(p1), Some(p2)) = (self.session.participant1, self.session.participant2) else {
            return Vec::new();
        };

        let modes = self.matrix.lookup(p1, p2);
        if let Some(default) = modes.first().copied() {
            self.session.available_modes = modes.to_vec();
            self.session.selected_mode = Some(default);
            self.state = PairingState::Paired;
            tracing::info!(
                session = %self.session.id,
                mode = %default,
                available = modes.len(),
                "paired"
            );
            vec![PairingAction::speak(prompts::ready_with_mode(default))]
        } else {
            tracing::warn!(session = %self.session.id, %p1, %p2, "no compatible mode");
            vec![
                PairingAction::NoticeNoCompatibleMode,
                PairingAction::speak(prompts::NO_COMPATIBLE_MODE),
            ]
        }
    }

    /// Opt out of voice pairing and take direct profile assignment.
    pub fn request_manual(&mut self) -> Vec<PairingAction> {
        self.state = PairingState::ManualOverride;
        tracing::info!(session = %self.session.id, "manual override requested");
        vec![PairingAction::StopDetection]
    }

    /// Directly assign both participants' profiles (manual override only).
    pub fn set_manual_profiles(
        &mut self,
        participant1: ProfileId,
        participant2: ProfileId,
    ) -> Result<(), PairingError> {
        if self.state != PairingState::ManualOverride {
            return Err(PairingError::WrongState {
                required: PairingState::ManualOverride.as_str(),
                current: self.state.as_str(),
            });
        }
        self.session.participant1 = Some(participant1);
        self.session.participant2 = Some(participant2);
        Ok(())
    }

    /// Confirm the manual assignment: performs the same matrix lookup as
    /// the voice flow. On an empty lookup the machine stays in manual
    /// override with the notice surfaced.
    pub fn confirm_manual(&mut self) -> Result<Vec<PairingAction>, PairingError> {
        if self.state != PairingState::ManualOverride {
            return Err(PairingError::WrongState {
                required: PairingState::ManualOverride.as_str(),
                current: self.state.as_str(),
            });
        }
        let (Some(p1), Some(p2)) = (self.session.participant1, self.session.participant2) else {
            return Err(PairingError::ProfilesIncomplete);
        };
        let modes = self.matrix.lookup(p1, p2);
        if let Some(default) = modes.first().copied() {
            self.session.available_modes = modes.to_vec();
            self.session.selected_mode = Some(default);
            self.state = PairingState::Paired;
            tracing::info!(session = %self.session.id, mode = %default, "paired (manual)");
            Ok(Vec::new())
        } else {
            Ok(vec![PairingAction::NoticeNoCompatibleMode])
        }
    }

    /// Override the selected mode with another available one.
    pub fn select_mode(&mut self, mode: ModeId) -> Result<(), PairingError> {
        if self.state != PairingState::Paired {
            return Err(PairingError::WrongState {
                required: PairingState::Paired.as_str(),
                current: self.state.as_str(),
            });
        }
        if !self.session.available_modes.contains(&mode) {
            return Err(PairingError::ModeNotAvailable(mode));
        }
        self.session.selected_mode = Some(mode);
        tracing::info!(session = %self.session.id, %mode, "mode overridden");
        Ok(())
    }

    /// Restart: clear both profiles and the mode selection, return to the
    /// first detection phase. The welcome prompt will be spoken again.
    pub fn restart(&mut self) -> Vec<PairingAction> {
        self.session.reset();
        self.state = PairingState::AwaitingPerson1;
        tracing::info!(session = %self.session.id, "pairing restarted");
        vec![PairingAction::StopDetection]
    }
}
