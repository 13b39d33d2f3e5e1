//! Session state and pointer input types
//!
//! Everything the state machine reads or produces lives here. The
//! transition function itself is in `transition.rs`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fit::CircleFit;
use super::prize::PrizeTier;
use super::stroke::Stroke;
use crate::Point;

/// Platform pointer identifier
pub type ContactId = i32;

/// Kind of pointing device behind a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Parse a DOM `pointerType`. Unknown types count as mouse.
    pub fn from_pointer_type(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }

    pub fn is_touch(&self) -> bool {
        *self == PointerKind::Touch
    }
}

/// One pointer event: contact, device kind, position and any coalesced
/// sub-frame samples that arrived with it
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSample {
    pub id: ContactId,
    pub kind: PointerKind,
    pub pos: Point,
    /// Sub-frame samples in arrival order (empty when unsupported)
    pub coalesced: Vec<Point>,
}

impl PointerSample {
    pub fn new(id: ContactId, kind: PointerKind, pos: Point) -> Self {
        Self {
            id,
            kind,
            pos,
            coalesced: Vec::new(),
        }
    }

    pub fn with_coalesced(mut self, coalesced: Vec<Point>) -> Self {
        self.coalesced = coalesced;
        self
    }

    /// Points to feed the filter: the coalesced batch if present, else `pos`
    pub fn samples(&self) -> &[Point] {
        if self.coalesced.is_empty() {
            std::slice::from_ref(&self.pos)
        } else {
            &self.coalesced
        }
    }
}

/// Input commands for the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    /// Contact went down
    Down(PointerSample),
    /// Contact moved
    Move(PointerSample),
    /// Contact released
    Up(PointerSample),
    /// Platform cancelled the contact
    Cancel(PointerSample),
    /// Contact left the canvas
    Leave(PointerSample),
    /// Canvas was resized
    Resize,
    /// Explicit "try again"
    Reset,
}

/// Why an in-progress stroke was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    /// A second touch contact landed mid-stroke
    MultiTouch,
    /// Canvas geometry changed under the stroke
    Resize,
}

/// Result of an evaluated stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won(PrizeTier),
    Lost,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won(_))
    }

    pub fn tier(&self) -> Option<PrizeTier> {
        match self {
            Outcome::Won(tier) => Some(*tier),
            Outcome::Lost => None,
        }
    }
}

/// Terminal result handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub score: u8,
    pub won: bool,
    pub tier: Option<PrizeTier>,
}

/// Session state machine
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Waiting for a stroke; no points, no score
    #[default]
    Idle,
    /// A single tracked contact is drawing
    Drawing { contact: ContactId, stroke: Stroke },
    /// Stroke released and scored
    Evaluated {
        stroke: Stroke,
        fit: CircleFit,
        outcome: Outcome,
    },
}

/// Coarse phase for hosts that only need to branch on state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    Drawing,
    Won,
    Lost,
}

/// Touch contacts currently down (multi-touch detection only)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    ids: BTreeSet<ContactId>,
}

impl ContactSet {
    pub fn insert(&mut self, id: ContactId) {
        self.ids.insert(id);
    }

    pub fn remove(&mut self, id: ContactId) {
        self.ids.remove(&id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// More than one touch contact is down
    pub fn is_multi(&self) -> bool {
        self.ids.len() > 1
    }
}

/// Complete session: state plus the contact bookkeeping that feeds it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub contacts: ContactSet,
    /// Set while two or more touch contacts are down
    pub multi_touch: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Drawing { .. } => SessionPhase::Drawing,
            SessionState::Evaluated { outcome, .. } => {
                if outcome.is_win() {
                    SessionPhase::Won
                } else {
                    SessionPhase::Lost
                }
            }
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing { .. })
    }

    /// Stroke being drawn or last evaluated
    pub fn stroke(&self) -> Option<&Stroke> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Drawing { stroke, .. } | SessionState::Evaluated { stroke, .. } => {
                Some(stroke)
            }
        }
    }

    /// Contact authoring the current stroke
    pub fn tracked_contact(&self) -> Option<ContactId> {
        match &self.state {
            SessionState::Drawing { contact, .. } => Some(*contact),
            _ => None,
        }
    }

    /// Terminal result, once evaluated
    pub fn verdict(&self) -> Option<Verdict> {
        match &self.state {
            SessionState::Evaluated { fit, outcome, .. } => Some(Verdict {
                score: fit.score,
                won: outcome.is_win(),
                tier: outcome.tier(),
            }),
            _ => None,
        }
    }
}

/// Observable consequences of one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Tracked contact started a fresh stroke
    StrokeStarted { contact: ContactId },
    /// Filter accepted this many new points
    PointsAccepted { count: usize },
    /// Multi-touch flag flipped
    MultiTouchChanged(bool),
    /// In-progress stroke dropped without a score
    StrokeDiscarded(DiscardReason),
    /// Stroke released and scored
    Evaluated(Verdict),
    /// Session returned to idle on request
    Reset,
}
