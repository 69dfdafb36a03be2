//! Gesture capture session
//!
//! Wires the frame source and tracking engine to the classifier and
//! accumulator: start the camera, await tracker readiness within its
//! budget, then classify every delivered landmark frame until stopped.
//! Classification is best-effort per frame; frames are never buffered
//! and frame loss is tolerated.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use comm_bridge_config::GestureSettings;
use comm_bridge_core::{Error, FrameSource, HandTracker, Result};

use crate::{GestureClassifier, Symbol, SymbolStreamAccumulator};

/// Events emitted by a gesture capture session
#[derive(Debug, Clone)]
pub enum GestureCaptureEvent {
    /// Tracking engine initialized and frames are flowing
    Ready,
    /// A new symbol was appended to the stream
    SymbolRecognized { symbol: Symbol, text: String },
    /// Capture stopped (user action or session end)
    Stopped,
}

/// One camera/tracking capture session.
///
/// Owns the accumulator for the session; the stream is cleared when
/// capture stops or the user discards it.
pub struct GestureCapture {
    source: Arc<dyn FrameSource>,
    tracker: Arc<dyn HandTracker>,
    classifier: GestureClassifier,
    accumulator: Arc<Mutex<SymbolStreamAccumulator>>,
    settings: GestureSettings,
    event_tx: broadcast::Sender<GestureCaptureEvent>,
    shutdown_tx: broadcast::Sender<()>,
}

impl GestureCapture {
    pub fn new(
        source: Arc<dyn FrameSource>,
        tracker: Arc<dyn HandTracker>,
        settings: GestureSettings,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            source,
            tracker,
            classifier: GestureClassifier::new(&settings),
            accumulator: Arc::new(Mutex::new(SymbolStreamAccumulator::new())),
            settings,
            event_tx,
            shutdown_tx,
        }
    }

    /// Subscribe to capture events
    pub fn subscribe(&self) -> broadcast::Receiver<GestureCaptureEvent> {
        self.event_tx.subscribe()
    }

    /// Start capturing: camera up, tracker readiness awaited within its
    /// budget, then the per-frame classification loop runs until `stop`.
    ///
    /// # Errors
    /// Propagates camera permission/capability errors from the source;
    /// returns `Error::InitTimeout` if the tracking engine misses its
    /// initialization budget (fatal for this capture session only; the
    /// caller may retry by starting a fresh capture).
    pub async fn start(&self) -> Result<()> {
        self.source.start().await?;

        let budget_ms = self.settings.tracker_init_timeout_ms;
        let readiness = tokio::time::timeout(
            Duration::from_millis(budget_ms),
            self.tracker.ready(),
        )
        .await;
        match readiness {
            Err(_) => {
                self.source.stop().await;
                return Err(Error::init_timeout("hand tracker", budget_ms));
            }
            Ok(Err(e)) => {
                self.source.stop().await;
                return Err(e);
            }
            Ok(Ok(())) => {}
        }

        tracing::info!(engine = self.tracker.engine_name(), "gesture capture started");
        let _ = self.event_tx.send(GestureCaptureEvent::Ready);

        let mut hands = self.tracker.track();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let classifier = self.classifier;
        let accumulator = Arc::clone(&self.accumulator);
        let event_tx = self.event_tx.clone();
        let min_confidence = self.settings.min_confidence;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,

                    hand = hands.next() => {
                        let Some(hand) = hand else {
                            // Tracker stream ended on its own.
                            let _ = event_tx.send(GestureCaptureEvent::Stopped);
                            break;
                        };
                        if hand.confidence < min_confidence {
                            continue;
                        }
                        let Some(symbol) = classifier.classify(&hand.landmarks) else {
                            continue;
                        };
                        let appended = {
                            let mut acc = accumulator.lock();
                            if acc.append(symbol) {
                                Some(acc.snapshot())
                            } else {
                                None
                            }
                        };
                        if let Some(text) = appended {
                            tracing::debug!(%symbol, %text, "symbol recognized");
                            let _ = event_tx.send(GestureCaptureEvent::SymbolRecognized {
                                symbol,
                                text,
                            });
                        }
                    }
                }
            }
        });

        Ok(())
    }

    /// Stop capturing and clear the symbol stream
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(());
        self.source.stop().await;
        self.accumulator.lock().clear();
        let _ = self.event_tx.send(GestureCaptureEvent::Stopped);
        tracing::info!("gesture capture stopped");
    }

    /// Current recognized text
    pub fn snapshot(&self) -> String {
        self.accumulator.lock().snapshot()
    }

    /// Take the recognized text for use as conversion input, clearing the
    /// stream
    pub fn take_text(&self) -> String {
        let mut acc = self.accumulator.lock();
        let text = acc.snapshot();
        acc.clear();
        text
    }

    /// Discard the recognized text without using it
    pub fn discard(&self) {
        self.accumulator.lock().clear();
    }
}
