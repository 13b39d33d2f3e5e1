//! Session transition function
//!
//! `step` consumes the current session and one input and returns the next
//! session plus the events the host should react to. Nothing here touches
//! the platform or the clock.

use super::filter::accept_batch;
use super::fit;
use super::prize::PrizeTier;
use super::state::{
    DiscardReason, Outcome, PointerSample, Session, SessionEvent, SessionInput, SessionState,
};
use super::stroke::Stroke;

/// Advance the session by one input
pub fn step(mut session: Session, input: &SessionInput) -> (Session, Vec<SessionEvent>) {
    let mut events = Vec::new();

    match input {
        SessionInput::Down(p) => pointer_down(&mut session, p, &mut events),
        SessionInput::Move(p) => pointer_move(&mut session, p, &mut events),
        SessionInput::Up(p) | SessionInput::Cancel(p) | SessionInput::Leave(p) => {
            pointer_release(&mut session, p, &mut events)
        }
        SessionInput::Resize => {
            if session.is_drawing() {
                session.state = SessionState::Idle;
                events.push(SessionEvent::StrokeDiscarded(DiscardReason::Resize));
            }
        }
        SessionInput::Reset => {
            session.state = SessionState::Idle;
            session.contacts.clear();
            set_multi_touch(&mut session, false, &mut events);
            events.push(SessionEvent::Reset);
        }
    }

    (session, events)
}

fn set_multi_touch(session: &mut Session, value: bool, events: &mut Vec<SessionEvent>) {
    if session.multi_touch != value {
        session.multi_touch = value;
        events.push(SessionEvent::MultiTouchChanged(value));
    }
}

fn pointer_down(session: &mut Session, p: &PointerSample, events: &mut Vec<SessionEvent>) {
    if p.kind.is_touch() {
        session.contacts.insert(p.id);
        let multi = session.contacts.is_multi();
        set_multi_touch(session, multi, events);
        if multi {
            // Two fingers: whatever was being drawn is void
            if session.is_drawing() {
                session.state = SessionState::Idle;
                events.push(SessionEvent::StrokeDiscarded(DiscardReason::MultiTouch));
            }
            return;
        }
    } else {
        set_multi_touch(session, false, events);
    }

    // One stroke at a time; duplicate or extra starts are ignored
    if session.is_drawing() {
        return;
    }

    let mut stroke = Stroke::new();
    let accepted = accept_batch(p.samples(), &mut stroke);
    if accepted == 0 {
        return;
    }

    session.state = SessionState::Drawing {
        contact: p.id,
        stroke,
    };
    events.push(SessionEvent::StrokeStarted { contact: p.id });
    events.push(SessionEvent::PointsAccepted { count: accepted });
}

fn pointer_move(session: &mut Session, p: &PointerSample, events: &mut Vec<SessionEvent>) {
    if session.multi_touch {
        return;
    }
    if let SessionState::Drawing { contact, stroke } = &mut session.state {
        if *contact != p.id {
            return;
        }
        let accepted = accept_batch(p.samples(), stroke);
        if accepted > 0 {
            events.push(SessionEvent::PointsAccepted { count: accepted });
        }
    }
}

fn pointer_release(session: &mut Session, p: &PointerSample, events: &mut Vec<SessionEvent>) {
    if p.kind.is_touch() {
        session.contacts.remove(p.id);
        let multi = session.contacts.is_multi();
        set_multi_touch(session, multi, events);
    }

    if session.tracked_contact() != Some(p.id) {
        return;
    }

    let SessionState::Drawing { stroke, .. } = std::mem::take(&mut session.state) else {
        return;
    };

    // Authoritative score: raw stroke, never the display path
    let fit = fit::score(stroke.points());
    let outcome = match PrizeTier::for_score(fit.score) {
        Some(tier) => Outcome::Won(tier),
        None => Outcome::Lost,
    };
    session.state = SessionState::Evaluated {
        stroke,
        fit,
        outcome,
    };
    if let Some(verdict) = session.verdict() {
        events.push(SessionEvent::Evaluated(verdict));
    }
}
