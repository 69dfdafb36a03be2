//! Bridge session
//!
//! One `BridgeSession` covers one conversation between two participants:
//! the voice-driven pairing flow, manual override, mode selection, and
//! text conversion once paired. All state transitions happen in response
//! to discrete events and are processed to completion before the next
//! event is handled; the session never blocks inside core calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::StreamExt;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use comm_bridge_config::Settings;
use comm_bridge_conversion::{ConversionEngine, OutputResult};
use comm_bridge_core::{
    Error, ModeId, ProfileId, RecognizerEvent, SpeechRecognizer, SpeechSynthesizer,
    UtteranceConfig,
};
use comm_bridge_pairing::{PairingAction, PairingError, PairingState, PairingStateMachine};

use crate::Announcer;

/// Events emitted over the session's broadcast channel
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// Session started
    Started { session_id: String },
    /// A speech-detection session began
    ListeningStarted,
    /// The active speech-detection session ended
    ListeningStopped,
    /// Interim transcript update (display only)
    InterimTranscript { text: String },
    /// Finalized transcript (fed to profile detection)
    FinalTranscript { text: String },
    /// A participant's profile was detected or assigned
    ProfileDetected { participant: u8, profile: ProfileId },
    /// Both profiles known and a default mode selected
    Paired {
        available: Vec<ModeId>,
        selected: ModeId,
    },
    /// Both profiles known but the pair has no compatible mode
    NoCompatibleMode,
    /// The selected mode was overridden
    ModeChanged { mode: ModeId },
    /// An announcement is being spoken
    Speaking { text: String },
    /// A conversion completed
    Converted(OutputResult),
    /// Non-fatal error
    Error { message: String },
    /// Session ended
    Ended { reason: String },
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is not paired yet")]
    NotPaired,

    #[error(transparent)]
    Pairing(#[from] PairingError),

    #[error(transparent)]
    Core(#[from] Error),
}

struct Inner {
    settings: Settings,
    recognizer: Arc<dyn SpeechRecognizer>,
    announcer: Announcer,
    engine: ConversionEngine,
    machine: Mutex<PairingStateMachine>,
    /// Cancellation handle for the active detection task, if any.
    /// Last-writer-wins: starting a new detection takes and fires this.
    detection_cancel: Mutex<Option<broadcast::Sender<()>>>,
    event_tx: broadcast::Sender<BridgeEvent>,
    shutdown_tx: broadcast::Sender<()>,
    /// Set once by `end`; tasks that subscribe to the shutdown channel
    /// after the signal fired still observe it through this flag.
    closed: AtomicBool,
}

impl Inner {
    fn emit(&self, event: BridgeEvent) {
        let _ = self.event_tx.send(event);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Cancelable pause. Returns false when the session shut down before
    /// the wait elapsed, in which case the scheduled action must not fire.
    async fn wait(&self, ms: u64) -> bool {
        if self.is_closed() {
            return false;
        }
        if ms == 0 {
            return true;
        }
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(ms)) => true,
            _ = shutdown_rx.recv() => false,
        }
    }

    /// Execute transition actions in order.
    ///
    /// Boxed because the action loop re-enters `start_detection`, whose
    /// detection task feeds transcripts back into `run_actions`.
    fn run_actions(self: Arc<Self>, actions: Vec<PairingAction>) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            for action in actions {
                if self.is_closed() {
                    return;
                }
                match action {
                    PairingAction::Speak { text } => {
                        self.emit(BridgeEvent::Speaking { text: text.clone() });
                        let mut shutdown_rx = self.shutdown_tx.subscribe();
                        tokio::select! {
                            _ = self.announcer.announce(&text) => {}
                            _ = shutdown_rx.recv() => {
                                self.announcer.cancel();
                                return;
                            }
                        }
                    }
                    PairingAction::StopDetection => {
                        self.stop_detection().await;
                    }
                    PairingAction::ResumeDetection => {
                        if !self.wait(self.settings.timing.resume_listening_delay_ms).await {
                            return;
                        }
                        Arc::clone(&self).start_detection().await;
                    }
                    PairingAction::Pause => {
                        if !self.wait(self.settings.timing.pairing_announce_delay_ms).await {
                            return;
                        }
                    }
                    PairingAction::NoticeNoCompatibleMode => {
                        self.emit(BridgeEvent::NoCompatibleMode);
                    }
                }
            }
        })
    }

    /// Terminate the active detection task and recognition session.
    async fn stop_detection(&self) {
        if let Some(cancel) = self.detection_cancel.lock().take() {
            let _ = cancel.send(());
        }
        self.recognizer.stop().await;
    }

    /// Start a speech-detection session for the current pairing phase,
    /// terminating any detection already in progress first.
    async fn start_detection(self: Arc<Self>) {
        if self.is_closed() {
            return;
        }
        self.stop_detection().await;

        let stream = match self.recognizer.start().await {
            Ok(stream) => stream,
            Err(e) => {
                // Permission or capability failure: surfaced once, the
                // machine stays in its phase awaiting manual override.
                tracing::warn!(error = %e, "speech detection unavailable");
                self.emit(BridgeEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };

        let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
        *self.detection_cancel.lock() = Some(cancel_tx);
        self.emit(BridgeEvent::ListeningStarted);

        let inner = Arc::clone(&self);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            let mut stream = stream;
            loop {
                tokio::select! {
                    _ = cancel_rx.recv() => break,
                    _ = shutdown_rx.recv() => break,

                    event = stream.next() => {
                        let Some(event) = event else {
                            inner.emit(BridgeEvent::ListeningStopped);
                            break;
                        };
                        match event {
                            RecognizerEvent::Transcript(t) if !t.is_final => {
                                inner.emit(BridgeEvent::InterimTranscript { text: t.text });
                            }
                            RecognizerEvent::Transcript(t) => {
                                inner.emit(BridgeEvent::FinalTranscript {
                                    text: t.text.clone(),
                                });
                                if inner.handle_final_transcript(&t.text).await {
                                    break;
                                }
                            }
                            RecognizerEvent::Error(e) => {
                                tracing::warn!(error = %e, "recognition error");
                                inner.emit(BridgeEvent::Error {
                                    message: e.to_string(),
                                });
                            }
                            RecognizerEvent::Ended => {
                                inner.emit(BridgeEvent::ListeningStopped);
                                break;
                            }
                        }
                    }
                }
            }
        });
    }

    /// Feed one finalized transcript to the state machine and execute the
    /// resulting actions. Returns true when this detection phase is over.
    async fn handle_final_transcript(self: &Arc<Self>, text: &str) -> bool {
        let (actions, events) = {
            let mut machine = self.machine.lock();
            let before1 = machine.session().participant1;
            let before2 = machine.session().participant2;
            let actions = machine.handle_transcript(text);

            let mut events = Vec::new();
            if before1.is_none() {
                if let Some(profile) = machine.session().participant1 {
                    events.push(BridgeEvent::ProfileDetected {
                        participant: 1,
                        profile,
                    });
                }
            }
            if before2.is_none() {
                if let Some(profile) = machine.session().participant2 {
                    events.push(BridgeEvent::ProfileDetected {
                        participant: 2,
                        profile,
                    });
                }
            }
            if machine.state() == PairingState::Paired {
                if let Some(selected) = machine.selected_mode() {
                    events.push(BridgeEvent::Paired {
                        available: machine.available_modes().to_vec(),
                        selected,
                    });
                }
            }
            (actions, events)
        };

        for event in events {
            self.emit(event);
        }

        if actions.is_empty() {
            // No keyword match: stay in this phase, keep listening.
            return false;
        }
        Arc::clone(self).run_actions(actions).await;
        true
    }
}

/// One bridge session between two participants.
///
/// Created at session start; `restart` clears it back to the first
/// detection phase; `end` shuts every task down.
pub struct BridgeSession {
    inner: Arc<Inner>,
}

impl BridgeSession {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        settings: Settings,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(settings.channels.event_capacity);
        let (shutdown_tx, _) = broadcast::channel(1);

        let utterance = UtteranceConfig {
            language: settings.speech.language.clone(),
            ..UtteranceConfig::default()
        };
        let announcer = Announcer::new(
            Arc::clone(&synthesizer),
            utterance.clone(),
            Duration::from_millis(settings.timing.utterance_fallback_ms),
        );
        let engine = ConversionEngine::new(synthesizer, utterance);

        Self {
            inner: Arc::new(Inner {
                settings,
                recognizer,
                announcer,
                engine,
                machine: Mutex::new(PairingStateMachine::new()),
                detection_cancel: Mutex::new(None),
                event_tx,
                shutdown_tx,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Session identifier
    pub fn session_id(&self) -> String {
        self.inner.machine.lock().session().id.to_string()
    }

    /// Current pairing phase
    pub fn state(&self) -> PairingState {
        self.inner.machine.lock().state()
    }

    /// Currently selected mode
    pub fn selected_mode(&self) -> Option<ModeId> {
        self.inner.machine.lock().selected_mode()
    }

    /// Modes available to the pair
    pub fn available_modes(&self) -> Vec<ModeId> {
        self.inner.machine.lock().available_modes().to_vec()
    }

    /// Both participants' profiles, as far as they are known
    pub fn participants(&self) -> (Option<ProfileId>, Option<ProfileId>) {
        let machine = self.inner.machine.lock();
        (
            machine.session().participant1,
            machine.session().participant2,
        )
    }

    /// Start the session: the welcome prompt is spoken after a short
    /// pause, then detection begins for the first participant.
    pub async fn start(&self) {
        self.inner.emit(BridgeEvent::Started {
            session_id: self.session_id(),
        });

        let actions = self.inner.machine.lock().start();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if !inner.wait(inner.settings.timing.pre_welcome_delay_ms).await {
                return;
            }
            inner.run_actions(actions).await;
        });
    }

    /// Opt out of voice pairing: detection stops and profiles are
    /// assigned directly.
    pub async fn request_manual(&self) {
        let actions = self.inner.machine.lock().request_manual();
        self.inner.announcer.cancel();
        Arc::clone(&self.inner).run_actions(actions).await;
    }

    /// Directly assign both participants' profiles (manual override)
    pub fn set_manual_profiles(
        &self,
        participant1: ProfileId,
        participant2: ProfileId,
    ) -> Result<(), SessionError> {
        self.inner
            .machine
            .lock()
            .set_manual_profiles(participant1, participant2)?;
        self.inner.emit(BridgeEvent::ProfileDetected {
            participant: 1,
            profile: participant1,
        });
        self.inner.emit(BridgeEvent::ProfileDetected {
            participant: 2,
            profile: participant2,
        });
        Ok(())
    }

    /// Confirm the manual assignment and run the compatibility lookup
    pub async fn confirm_manual(&self) -> Result<(), SessionError> {
        let (actions, paired) = {
            let mut machine = self.inner.machine.lock();
            let actions = machine.confirm_manual()?;
            let paired = (machine.state() == PairingState::Paired)
                .then(|| {
                    machine.selected_mode().map(|selected| BridgeEvent::Paired {
                        available: machine.available_modes().to_vec(),
                        selected,
                    })
                })
                .flatten();
            (actions, paired)
        };
        if let Some(event) = paired {
            self.inner.emit(event);
        }
        Arc::clone(&self.inner).run_actions(actions).await;
        Ok(())
    }

    /// Override the selected mode with another available one
    pub fn select_mode(&self, mode: ModeId) -> Result<(), SessionError> {
        self.inner.machine.lock().select_mode(mode)?;
        self.inner.emit(BridgeEvent::ModeChanged { mode });
        Ok(())
    }

    /// Convert input text under the selected mode.
    ///
    /// # Errors
    /// `SessionError::NotPaired` until a mode has been selected.
    pub fn convert(&self, input_text: &str) -> Result<OutputResult, SessionError> {
        let mode = self
            .inner
            .machine
            .lock()
            .selected_mode()
            .ok_or(SessionError::NotPaired)?;
        let result = self.inner.engine.convert(mode, input_text);
        self.inner.emit(BridgeEvent::Converted(result.clone()));
        Ok(result)
    }

    /// Restart pairing: profiles and mode cleared, detection back to the
    /// first participant, welcome spoken again.
    pub async fn restart(&self) {
        self.inner.announcer.cancel();
        let actions = self.inner.machine.lock().restart();
        Arc::clone(&self.inner).run_actions(actions).await;

        let actions = self.inner.machine.lock().start();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if !inner.wait(inner.settings.timing.pre_welcome_delay_ms).await {
                return;
            }
            inner.run_actions(actions).await;
        });
    }

    /// End the session: all tasks wind down, pending waits are canceled
    /// so their scheduled actions never fire.
    pub async fn end(&self, reason: impl Into<String>) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let _ = self.inner.shutdown_tx.send(());
        self.inner.stop_detection().await;
        self.inner.announcer.cancel();
        self.inner.emit(BridgeEvent::Ended {
            reason: reason.into(),
        });
    }
}
