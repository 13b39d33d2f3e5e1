//! Deterministic stroke pipeline
//!
//! All scoring and session logic lives here. This module must stay pure:
//! - No clock reads (hosts pass time in where needed)
//! - No rendering or platform dependencies
//! - Points are processed strictly in arrival order

pub mod filter;
pub mod fit;
pub mod prize;
pub mod state;
pub mod stroke;
pub mod transition;

pub use filter::{accept, accept_batch};
pub use fit::{CircleFit, score};
pub use prize::PrizeTier;
pub use state::{
    ContactId, ContactSet, DiscardReason, Outcome, PointerKind, PointerSample, Session,
    SessionEvent, SessionInput, SessionPhase, SessionState, Verdict,
};
pub use stroke::{Stroke, smooth_path};
pub use transition::step;
