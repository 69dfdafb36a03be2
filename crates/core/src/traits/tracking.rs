//! Video and hand-tracking collaborator traits

use crate::{LandmarkFrame, Result};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// One hand observed in one processed video frame.
///
/// Multi-hand results are truncated by the tracking engine to the first
/// hand before reaching the bridge.
#[derive(Debug, Clone)]
pub struct TrackedHand {
    /// 21-point landmark frame
    pub landmarks: LandmarkFrame,
    /// Tracking confidence, 0.0 to 1.0
    pub confidence: f32,
}

/// Stream of tracked hands, at most one item per processed frame
pub type HandStream = Pin<Box<dyn Stream<Item = TrackedHand> + Send>>;

/// Camera frame source.
///
/// Delivers frames to the tracking engine on a best-effort cadence; frame
/// loss is tolerated and only the latest frame matters. The bridge only
/// controls the source's lifecycle and observes readiness.
#[async_trait]
pub trait FrameSource: Send + Sync + 'static {
    /// Begin frame delivery.
    ///
    /// # Errors
    /// `Error::PermissionDenied` if camera access was declined,
    /// `Error::CapabilityUnavailable` if no camera exists.
    async fn start(&self) -> Result<()>;

    /// Stop frame delivery. Idempotent.
    async fn stop(&self);

    /// Whether frames are currently being delivered
    fn is_ready(&self) -> bool;
}

/// Hand-landmark tracking engine.
///
/// Landmark extraction itself happens in the engine; the bridge consumes
/// the landmark frames it emits.
#[async_trait]
pub trait HandTracker: Send + Sync + 'static {
    /// Resolves exactly once, when the engine has finished initializing.
    ///
    /// Callers race this against their own timeout budget; an engine that
    /// reports an initialization failure resolves with `Err`, which is
    /// distinct from "not yet ready" (the future still pending).
    async fn ready(&self) -> Result<()>;

    /// Stream of single-hand landmark observations
    fn track(&self) -> HandStream;

    /// Engine name for logging
    fn engine_name(&self) -> &str;
}
