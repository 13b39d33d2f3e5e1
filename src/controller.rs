//! Session controller
//!
//! Owns the single active `Session`, feeds it host input through
//! `sim::step`, and reacts to the resulting events: live score updates,
//! redraw scheduling, and the terminal verdict. The pending redraw is a
//! resource of the controller and is cancelled on resize, reset and drop.

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::consts::{DEGENERATE_RADIUS, LIVE_MIN_POINTS};
use crate::feedback::{LiveScore, RedrawSlot};
use crate::platform::FrameScheduler;
use crate::settings::Settings;
use crate::sim::{
    CircleFit, DiscardReason, Session, SessionEvent, SessionInput, SessionPhase, Verdict, fit,
    step,
};
use crate::ui::{ScoreColor, StatusView, status_line};

/// Result of feeding one input to the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub events: Vec<SessionEvent>,
    /// New value of the live score observable, if it changed
    pub live_score: Option<u8>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Smoothed display path (never scored)
    pub path: Vec<Point>,
    /// Fitted circle of the raw stroke, once there is enough of it
    pub guide: Option<CircleFit>,
    /// Latest live score while drawing (unthrottled), terminal score after release
    pub score: Option<u8>,
    pub color: ScoreColor,
    pub status: String,
    pub phase: SessionPhase,
    /// Live score published by this frame, if any
    pub live_update: Option<u8>,
}

/// Payload handed to the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimTicket {
    pub score: u8,
    pub won: bool,
    pub prize: Option<String>,
}

impl ClaimTicket {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub struct SessionController<S: FrameScheduler> {
    session: Session,
    live: LiveScore,
    redraw: RedrawSlot,
    scheduler: S,
    settings: Settings,
}

impl<S: FrameScheduler> SessionController<S> {
    pub fn new(settings: Settings, scheduler: S) -> Self {
        Self {
            session: Session::new(),
            live: LiveScore::new(),
            redraw: RedrawSlot::new(),
            scheduler,
            settings,
        }
    }

    /// Feed one host input; `now_ms` is host time used for throttling
    pub fn handle(&mut self, input: SessionInput, now_ms: f64) -> Update {
        let (session, events) = step(std::mem::take(&mut self.session), &input);
        self.session = session;

        let mut live_score = None;
        for event in &events {
            match event {
                SessionEvent::StrokeStarted { contact } => {
                    log::debug!("Stroke started (contact {})", contact);
                    self.live.clear();
                }
                SessionEvent::PointsAccepted { count } => {
                    if let Some(stroke) = self.session.stroke() {
                        if let Some(score) =
                            self.live.on_points_accepted(stroke.points(), *count, now_ms)
                        {
                            live_score = Some(score);
                        }
                    }
                    self.redraw.request(&mut self.scheduler);
                }
                SessionEvent::MultiTouchChanged(multi) => {
                    log::debug!("Multi-touch {}", if *multi { "on" } else { "off" });
                    self.redraw.request(&mut self.scheduler);
                }
                SessionEvent::StrokeDiscarded(reason) => {
                    log::debug!("Stroke discarded: {:?}", reason);
                    self.live.clear();
                    if *reason == DiscardReason::MultiTouch {
                        self.redraw.request(&mut self.scheduler);
                    }
                }
                SessionEvent::Evaluated(verdict) => {
                    log::info!(
                        "Stroke evaluated: score {} ({})",
                        verdict.score,
                        if verdict.won { "won" } else { "lost" }
                    );
                    self.live.settle(verdict.score);
                    live_score = Some(verdict.score);
                    self.redraw.request(&mut self.scheduler);
                }
                SessionEvent::Reset => {
                    self.live.clear();
                }
            }
        }

        if matches!(input, SessionInput::Resize | SessionInput::Reset)
            && self.redraw.cancel(&mut self.scheduler)
        {
            log::debug!("Cancelled pending redraw");
        }

        Update { events, live_score }
    }

    /// The pending frame is running. Builds the snapshot the renderer draws.
    pub fn on_frame(&mut self, now_ms: f64) -> FrameSnapshot {
        self.redraw.fire();

        let drawing = self.session.is_drawing();
        let live_update = if drawing { self.live.flush(now_ms) } else { None };
        // A throttled value is still waiting: come back next refresh
        if drawing && self.live.latest() != self.live.published() {
            self.redraw.request(&mut self.scheduler);
        }

        self.snapshot(live_update)
    }

    fn snapshot(&self, live_update: Option<u8>) -> FrameSnapshot {
        let stroke = self.session.stroke();
        let path = stroke.map(|s| s.smoothed()).unwrap_or_default();
        let guide = stroke
            .filter(|s| s.len() >= LIVE_MIN_POINTS)
            .map(|s| fit::score(s.points()))
            .filter(|f| f.radius > DEGENERATE_RADIUS);

        let terminal = self.session.verdict().map(|v| v.score);
        let score = self.live.latest().or(terminal);
        let status = status_line(StatusView {
            multi_touch: self.session.multi_touch,
            drawing: self.session.is_drawing(),
            active_score: score,
            terminal_score: terminal,
        });

        FrameSnapshot {
            path,
            guide,
            score,
            color: ScoreColor::for_score(score.unwrap_or(0)),
            status,
            phase: self.session.phase(),
            live_update,
        }
    }

    /// Ask for a redraw outside of input handling (first paint, after resize)
    pub fn request_redraw(&mut self) -> bool {
        self.redraw.request(&mut self.scheduler)
    }

    pub fn resize(&mut self, now_ms: f64) -> Update {
        self.handle(SessionInput::Resize, now_ms)
    }

    pub fn reset(&mut self, now_ms: f64) -> Update {
        self.handle(SessionInput::Reset, now_ms)
    }

    /// Release the pending frame; the controller stays usable
    pub fn teardown(&mut self) {
        if self.redraw.cancel(&mut self.scheduler) {
            log::debug!("Cancelled pending redraw on teardown");
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.session.verdict()
    }

    /// Registration payload for the last evaluated stroke
    pub fn claim_ticket(&self) -> Option<ClaimTicket> {
        self.verdict().map(|v| ClaimTicket {
            score: v.score,
            won: v.won,
            prize: v.tier.map(|t| self.settings.prize_label(t).to_string()),
        })
    }

    /// Ticket for the prize dialog; only a winning stroke gets one
    pub fn prize_claim(&self) -> Option<ClaimTicket> {
        self.claim_ticket().filter(|t| t.won)
    }

    /// Score currently visible to the host
    pub fn live_score(&self) -> Option<u8> {
        self.live.published()
    }

    pub fn multi_touch(&self) -> bool {
        self.session.multi_touch
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}

impl<S: FrameScheduler> Drop for SessionController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
