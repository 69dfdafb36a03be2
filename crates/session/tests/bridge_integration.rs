//! Integration tests for the bridge session (pairing -> mode -> conversion)
//!
//! These tests drive the full flow with scripted collaborators: a
//! recognizer that replays canned transcripts per detection session and a
//! synthesizer that records every utterance.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::timeout;

use comm_bridge_config::Settings;
use comm_bridge_conversion::OutputKind;
use comm_bridge_core::{
    ModeId, ProfileId, RecognizerEvent, RecognizerStream, Result, SpeakOutcome, SpeechRecognizer,
    SpeechSynthesizer, TranscriptResult, UtteranceConfig,
};
use comm_bridge_pairing::PairingState;
use comm_bridge_session::{BridgeEvent, BridgeSession};

/// Recognizer that replays one canned event script per detection session
struct ScriptedRecognizer {
    scripts: Mutex<VecDeque<Vec<RecognizerEvent>>>,
    active: AtomicBool,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl ScriptedRecognizer {
    fn new(scripts: Vec<Vec<RecognizerEvent>>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            active: AtomicBool::new(false),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        })
    }

    fn final_transcript(text: &str) -> RecognizerEvent {
        RecognizerEvent::Transcript(TranscriptResult::final_text(text, 0.9))
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn start(&self) -> Result<RecognizerStream> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
        let events = self.scripts.lock().pop_front().unwrap_or_default();
        Ok(Box::pin(futures::stream::iter(events)))
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn language(&self) -> &str {
        "vi-VN"
    }
}

/// Synthesizer that records utterances and completes immediately
#[derive(Default)]
struct RecordingSynthesizer {
    utterances: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn speak(&self, text: &str, _config: &UtteranceConfig) -> Result<SpeakOutcome> {
        self.utterances.lock().push(text.to_string());
        Ok(SpeakOutcome::Completed)
    }

    fn cancel(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Settings with test-speed timings
fn fast_settings() -> Settings {
    let mut settings = Settings::default();
    settings.timing.pre_welcome_delay_ms = 5;
    settings.timing.resume_listening_delay_ms = 5;
    settings.timing.pairing_announce_delay_ms = 5;
    settings.timing.utterance_fallback_ms = 500;
    settings
}

/// Receive events until one satisfies the predicate
async fn wait_for(
    rx: &mut tokio::sync::broadcast::Receiver<BridgeEvent>,
    mut pred: impl FnMut(&BridgeEvent) -> bool,
) -> BridgeEvent {
    loop {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed");
        if pred(&event) {
            return event;
        }
    }
}

#[tokio::test]
async fn test_voice_pairing_end_to_end() {
    init_tracing();
    let recognizer = ScriptedRecognizer::new(vec![
        vec![
            RecognizerEvent::Transcript(TranscriptResult::interim("tôi")),
            ScriptedRecognizer::final_transcript("tôi bình thường"),
        ],
        vec![ScriptedRecognizer::final_transcript("tôi bị điếc")],
    ]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer.clone(), synthesizer.clone(), fast_settings());

    let mut events = session.subscribe();
    session.start().await;

    let event = wait_for(&mut events, |e| matches!(e, BridgeEvent::Paired { .. })).await;
    match event {
        BridgeEvent::Paired {
            available,
            selected,
        } => {
            assert_eq!(available, vec![ModeId::AudioText, ModeId::AudioSign]);
            assert_eq!(selected, ModeId::AudioText);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(session.state(), PairingState::Paired);
    assert_eq!(
        session.participants(),
        (Some(ProfileId::Normal), Some(ProfileId::Deaf))
    );

    // Readiness announcement happens after pairing; wait for it so the
    // utterance list is complete.
    wait_for(&mut events, |e| {
        matches!(e, BridgeEvent::Speaking { text } if text.contains("Chế độ"))
    })
    .await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let utterances = synthesizer.utterances.lock().clone();
    assert!(utterances[0].contains("Chào mừng"), "welcome spoken first");
    assert!(utterances.iter().any(|u| u.contains("Người bình thường")));
    assert!(utterances.iter().any(|u| u.contains("Người điếc")));
    assert!(utterances.iter().any(|u| u.contains("Âm thanh → Văn bản")));

    session.end("test complete").await;
}

#[tokio::test]
async fn test_incompatible_pair_surfaces_notice_and_recovers_by_restart() {
    let recognizer = ScriptedRecognizer::new(vec![
        vec![ScriptedRecognizer::final_transcript("tôi khỏe")],
        vec![ScriptedRecognizer::final_transcript("tôi bình thường")],
    ]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer, synthesizer, fast_settings());

    let mut events = session.subscribe();
    session.start().await;

    wait_for(&mut events, |e| matches!(e, BridgeEvent::NoCompatibleMode)).await;
    assert_eq!(session.state(), PairingState::AwaitingPerson2);
    assert_eq!(
        session.participants(),
        (Some(ProfileId::Normal), Some(ProfileId::Normal))
    );
    assert!(session.selected_mode().is_none());

    // Restart is the recovery path: profiles cleared, first phase again.
    session.restart().await;
    assert_eq!(session.state(), PairingState::AwaitingPerson1);
    assert_eq!(session.participants(), (None, None));

    session.end("test complete").await;
}

#[tokio::test]
async fn test_manual_override_and_text_text_conversion() {
    let recognizer = ScriptedRecognizer::new(vec![]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer, synthesizer.clone(), fast_settings());

    let mut events = session.subscribe();
    session.request_manual().await;
    assert_eq!(session.state(), PairingState::ManualOverride);

    session
        .set_manual_profiles(ProfileId::Mute, ProfileId::Deaf)
        .unwrap();
    session.confirm_manual().await.unwrap();

    let event = wait_for(&mut events, |e| matches!(e, BridgeEvent::Paired { .. })).await;
    if let BridgeEvent::Paired { selected, .. } = event {
        assert_eq!(selected, ModeId::TextText);
    }

    // text-text: pass-through, no speech output at all.
    let result = session.convert("xin chào").unwrap();
    assert_eq!(result.text, "xin chào");
    assert_eq!(result.kind, OutputKind::PassThrough);

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(synthesizer.utterances.lock().is_empty());

    session.end("test complete").await;
}

#[tokio::test]
async fn test_convert_requires_pairing() {
    let recognizer = ScriptedRecognizer::new(vec![]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer, synthesizer, fast_settings());

    assert!(session.convert("hello").is_err());
}

#[tokio::test]
async fn test_mode_override_only_within_available() {
    let recognizer = ScriptedRecognizer::new(vec![]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer, synthesizer, fast_settings());

    session.request_manual().await;
    session
        .set_manual_profiles(ProfileId::Deaf, ProfileId::Deaf)
        .unwrap();
    session.confirm_manual().await.unwrap();
    assert_eq!(session.selected_mode(), Some(ModeId::TextText));

    assert!(session.select_mode(ModeId::AudioAudio).is_err());

    let mut events = session.subscribe();
    session.select_mode(ModeId::SignText).unwrap();
    assert_eq!(session.selected_mode(), Some(ModeId::SignText));
    let event = wait_for(&mut events, |e| matches!(e, BridgeEvent::ModeChanged { .. })).await;
    if let BridgeEvent::ModeChanged { mode } = event {
        assert_eq!(mode, ModeId::SignText);
    }

    session.end("test complete").await;
}

#[tokio::test]
async fn test_detection_sessions_are_serialized() {
    let recognizer = ScriptedRecognizer::new(vec![
        vec![ScriptedRecognizer::final_transcript("tôi câm")],
        vec![ScriptedRecognizer::final_transcript("anh ấy khiếm thính")],
    ]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer.clone(), synthesizer, fast_settings());

    let mut events = session.subscribe();
    session.start().await;
    wait_for(&mut events, |e| matches!(e, BridgeEvent::Paired { .. })).await;

    // Two detection sessions ran (one per participant), and every start
    // was preceded by a stop of whatever came before.
    assert_eq!(recognizer.starts.load(Ordering::SeqCst), 2);
    assert!(recognizer.stops.load(Ordering::SeqCst) >= 2);

    session.end("test complete").await;
}

#[tokio::test]
async fn test_audio_conversion_speaks_input() {
    let recognizer = ScriptedRecognizer::new(vec![]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = BridgeSession::new(recognizer, synthesizer.clone(), fast_settings());

    session.request_manual().await;
    session
        .set_manual_profiles(ProfileId::Normal, ProfileId::Blind)
        .unwrap();
    session.confirm_manual().await.unwrap();
    assert_eq!(session.selected_mode(), Some(ModeId::TextAudio));

    let result = session.convert("hello").unwrap();
    assert_eq!(result.kind, OutputKind::AudioAnnouncement);
    assert_eq!(result.spoken.as_deref(), Some("hello"));

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(
        synthesizer.utterances.lock().as_slice(),
        ["hello".to_string()]
    );

    session.end("test complete").await;
}

#[tokio::test]
async fn test_ending_cancels_pending_welcome() {
    let recognizer = ScriptedRecognizer::new(vec![]);
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let mut settings = fast_settings();
    settings.timing.pre_welcome_delay_ms = 2_000;

    let session = BridgeSession::new(recognizer, synthesizer.clone(), settings);
    let mut events = session.subscribe();

    session.start().await;
    session.end("early exit").await;

    wait_for(&mut events, |e| matches!(e, BridgeEvent::Ended { .. })).await;

    // The canceled wait must prevent the welcome from firing.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(synthesizer.utterances.lock().is_empty());
}
