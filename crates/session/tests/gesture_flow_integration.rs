//! Integration test for the sign-input path: landmark frames -> symbols
//! -> accumulated text -> conversion under a sign-input mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use comm_bridge_config::Settings;
use comm_bridge_conversion::OutputKind;
use comm_bridge_core::{
    FrameSource, HandStream, HandTracker, Landmark, LandmarkFrame, ModeId, ProfileId,
    RecognizerStream, Result, SpeakOutcome, SpeechRecognizer, SpeechSynthesizer, TrackedHand,
    UtteranceConfig, LANDMARK_COUNT,
};
use comm_bridge_gesture::{GestureCapture, GestureCaptureEvent};
use comm_bridge_session::BridgeSession;

struct IdleRecognizer;

#[async_trait]
impl SpeechRecognizer for IdleRecognizer {
    async fn start(&self) -> Result<RecognizerStream> {
        Ok(Box::pin(futures::stream::empty()))
    }

    async fn stop(&self) {}

    fn is_active(&self) -> bool {
        false
    }

    fn language(&self) -> &str {
        "vi-VN"
    }
}

struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, _text: &str, _config: &UtteranceConfig) -> Result<SpeakOutcome> {
        Ok(SpeakOutcome::Completed)
    }

    fn cancel(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

struct MockSource {
    ready: AtomicBool,
}

#[async_trait]
impl FrameSource for MockSource {
    async fn start(&self) -> Result<()> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {
        self.ready.store(false, Ordering::SeqCst);
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

struct MockTracker {
    hands: Vec<TrackedHand>,
}

#[async_trait]
impl HandTracker for MockTracker {
    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    fn track(&self) -> HandStream {
        Box::pin(futures::stream::iter(self.hands.clone()))
    }

    fn engine_name(&self) -> &str {
        "mock-tracker"
    }
}

/// Neutral curled hand with spread x coordinates
fn base_points() -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.0, 0.5, 0.0); LANDMARK_COUNT];
    for (i, p) in points.iter_mut().enumerate() {
        p.x = 0.05 * i as f32;
    }
    for (tip, joint) in [(4usize, 3usize), (8, 6), (12, 10), (16, 14), (20, 18)] {
        points[joint].y = 0.4;
        points[tip].y = 0.6;
    }
    points
}

fn hand(points: Vec<Landmark>) -> TrackedHand {
    TrackedHand {
        landmarks: LandmarkFrame::new(points).unwrap(),
        confidence: 0.9,
    }
}

/// Thumb up, other fingers curled: the `A` shape
fn letter_a_hand() -> TrackedHand {
    let mut points = base_points();
    points[3].y = 0.6;
    points[4].y = 0.3;
    hand(points)
}

/// Only the index extended: the `1` shape
fn digit_one_hand() -> TrackedHand {
    let mut points = base_points();
    points[6].y = 0.6;
    points[8].y = 0.3;
    hand(points)
}

#[tokio::test]
async fn test_sign_input_flows_into_conversion() {
    // Two deaf participants, sign-text selected: gestures become text.
    let session = BridgeSession::new(
        Arc::new(IdleRecognizer),
        Arc::new(SilentSynthesizer),
        Settings::default(),
    );
    session.request_manual().await;
    session
        .set_manual_profiles(ProfileId::Deaf, ProfileId::Deaf)
        .unwrap();
    session.confirm_manual().await.unwrap();
    session.select_mode(ModeId::SignText).unwrap();
    assert!(session.selected_mode().unwrap().requires_camera());

    // Held `A` debounces to one symbol; `1` follows.
    let capture = GestureCapture::new(
        Arc::new(MockSource {
            ready: AtomicBool::new(false),
        }),
        Arc::new(MockTracker {
            hands: vec![letter_a_hand(), letter_a_hand(), digit_one_hand()],
        }),
        Settings::default().gesture,
    );
    let mut events = capture.subscribe();
    capture.start().await.unwrap();

    // Wait until the stream has drained into the accumulator.
    loop {
        let event = timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("timed out waiting for capture event")
            .expect("capture channel closed");
        if matches!(event, GestureCaptureEvent::Stopped) {
            break;
        }
    }

    let text = capture.take_text();
    assert_eq!(text, "A1");

    let result = session.convert(&text).unwrap();
    assert_eq!(result.kind, OutputKind::PassThrough);
    assert_eq!(result.text, "A1");

    session.end("test complete").await;
}
