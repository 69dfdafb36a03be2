//! Gesture rule set
//!
//! Each rule pairs a symbol token with a pure predicate over one landmark
//! frame. The table order is the tie-break policy: the classifier walks it
//! top to bottom and the first matching rule wins, so reordering entries
//! changes observable behavior.
//!
//! Predicates work in the image's top-left-origin convention: a digit is
//! "extended" when its tip y is less than its lower joint's y, "curled"
//! otherwise.

use comm_bridge_core::{HandLandmark::*, LandmarkFrame};
use serde::{Deserialize, Serialize};

/// A recognized gesture token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    A,
    B,
    C,
    One,
    Two,
    Three,
    Four,
    Five,
    Ok,
    ThumbsUp,
}

impl Symbol {
    /// Token text appended to the symbol stream
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Ok => "OK",
            Self::ThumbsUp => "THUMBS_UP",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable inputs to the predicates
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    /// Thumb-tip/index-tip distance below which the closed-ring gesture
    /// matches (normalized image units)
    pub ring_distance_threshold: f32,
}

impl Default for RuleContext {
    fn default() -> Self {
        Self {
            ring_distance_threshold: 0.05,
        }
    }
}

/// One symbol with its predicate
pub struct GestureRule {
    pub symbol: Symbol,
    predicate: fn(&LandmarkFrame, &RuleContext) -> bool,
}

impl GestureRule {
    /// Evaluate this rule against a frame
    pub fn matches(&self, frame: &LandmarkFrame, ctx: &RuleContext) -> bool {
        (self.predicate)(frame, ctx)
    }
}

fn thumb_extended(f: &LandmarkFrame) -> bool {
    f.point(ThumbTip).y < f.point(ThumbIp).y
}

fn index_extended(f: &LandmarkFrame) -> bool {
    f.point(IndexTip).y < f.point(IndexPip).y
}

fn middle_extended(f: &LandmarkFrame) -> bool {
    f.point(MiddleTip).y < f.point(MiddlePip).y
}

fn ring_extended(f: &LandmarkFrame) -> bool {
    f.point(RingTip).y < f.point(RingPip).y
}

fn pinky_extended(f: &LandmarkFrame) -> bool {
    f.point(PinkyTip).y < f.point(PinkyPip).y
}

fn all_extended(f: &LandmarkFrame) -> bool {
    thumb_extended(f)
        && index_extended(f)
        && middle_extended(f)
        && ring_extended(f)
        && pinky_extended(f)
}

fn fist_with_thumb(f: &LandmarkFrame) -> bool {
    thumb_extended(f)
        && !index_extended(f)
        && !middle_extended(f)
        && !ring_extended(f)
        && !pinky_extended(f)
}

// Rule table. `Five` duplicates `B` and `ThumbsUp` duplicates `A`; under
// first-match ordering both are unreachable. That mirrors the behavior of
// the system this one replaces and is kept as-is pending clarification.
// Do not "fix" the predicates.
static RULES: [GestureRule; 10] = [
    GestureRule {
        symbol: Symbol::A,
        predicate: |f, _| fist_with_thumb(f),
    },
    GestureRule {
        symbol: Symbol::B,
        predicate: |f, _| all_extended(f),
    },
    GestureRule {
        // Thumb tucked inward, index curled with its tip left of the
        // index base: approximates a curved hand shape.
        symbol: Symbol::C,
        predicate: |f, _| {
            let thumb_in = f.point(ThumbTip).x > f.point(ThumbIp).x;
            let index_curved = f.point(IndexTip).y > f.point(IndexPip).y
                && f.point(IndexTip).x < f.point(IndexMcp).x;
            thumb_in && index_curved
        },
    },
    GestureRule {
        symbol: Symbol::One,
        predicate: |f, _| {
            index_extended(f) && !middle_extended(f) && !ring_extended(f) && !pinky_extended(f)
        },
    },
    GestureRule {
        symbol: Symbol::Two,
        predicate: |f, _| {
            index_extended(f) && middle_extended(f) && !ring_extended(f) && !pinky_extended(f)
        },
    },
    GestureRule {
        symbol: Symbol::Three,
        predicate: |f, _| {
            index_extended(f) && middle_extended(f) && ring_extended(f) && !pinky_extended(f)
        },
    },
    GestureRule {
        symbol: Symbol::Four,
        predicate: |f, _| {
            index_extended(f) && middle_extended(f) && ring_extended(f) && pinky_extended(f)
        },
    },
    GestureRule {
        symbol: Symbol::Five,
        predicate: |f, _| all_extended(f),
    },
    GestureRule {
        symbol: Symbol::Ok,
        predicate: |f, ctx| {
            f.point(ThumbTip).planar_distance(&f.point(IndexTip)) < ctx.ring_distance_threshold
        },
    },
    GestureRule {
        symbol: Symbol::ThumbsUp,
        predicate: |f, _| fist_with_thumb(f),
    },
];

/// The statically ordered rule table
pub fn rule_set() -> &'static [GestureRule] {
    &RULES
}
