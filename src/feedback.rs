//! Live feedback loop
//!
//! While a stroke is in progress the scorer reruns after every accepted
//! point. The resulting score is published to the host at most once per
//! `LIVE_THROTTLE_MS`; the computation itself is never skipped.
//!
//! Redraws are coalesced: one pending frame at a time, and that frame
//! reads whatever the stroke looks like when it runs.

use crate::Point;
use crate::consts::{LIVE_MIN_POINTS, LIVE_THROTTLE_MS};
use crate::platform::{FrameHandle, FrameScheduler};
use crate::sim::fit;

/// Throttled live score observable
#[derive(Debug, Clone)]
pub struct LiveScore {
    /// Most recent computed score (unthrottled)
    latest: Option<u8>,
    /// Last value handed to the host
    published: Option<u8>,
    /// Host time of the last publish (ms)
    last_publish_ms: Option<f64>,
    throttle_ms: f64,
}

impl Default for LiveScore {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveScore {
    pub fn new() -> Self {
        Self::with_throttle(LIVE_THROTTLE_MS)
    }

    pub fn with_throttle(throttle_ms: f64) -> Self {
        Self {
            latest: None,
            published: None,
            last_publish_ms: None,
            throttle_ms,
        }
    }

    /// Rescore the stroke at each of the last `accepted` points, then try
    /// to publish. Returns the score if the observable updated.
    pub fn on_points_accepted(
        &mut self,
        stroke: &[Point],
        accepted: usize,
        now_ms: f64,
    ) -> Option<u8> {
        let first = stroke.len().saturating_sub(accepted) + 1;
        for end in first.max(LIVE_MIN_POINTS)..=stroke.len() {
            self.latest = Some(fit::score(&stroke[..end]).score);
        }
        self.publish(now_ms)
    }

    /// Publish a computed-but-unpublished score once the window allows it
    pub fn flush(&mut self, now_ms: f64) -> Option<u8> {
        if self.latest == self.published {
            return None;
        }
        self.publish(now_ms)
    }

    fn publish(&mut self, now_ms: f64) -> Option<u8> {
        let latest = self.latest?;
        if let Some(last) = self.last_publish_ms {
            if now_ms - last <= self.throttle_ms {
                return None;
            }
        }
        self.last_publish_ms = Some(now_ms);
        self.published = Some(latest);
        Some(latest)
    }

    /// Pin both values to the terminal score after release
    pub fn settle(&mut self, terminal: u8) {
        self.latest = Some(terminal);
        self.published = Some(terminal);
    }

    /// Forget the current stroke's scores (throttle window is kept)
    pub fn clear(&mut self) {
        self.latest = None;
        self.published = None;
    }

    /// Latest computed score, ignoring the throttle
    pub fn latest(&self) -> Option<u8> {
        self.latest
    }

    /// Score currently visible to the host
    pub fn published(&self) -> Option<u8> {
        self.published
    }
}

/// At most one pending redraw per display refresh
#[derive(Debug, Default)]
pub struct RedrawSlot {
    pending: Option<FrameHandle>,
}

impl RedrawSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a redraw unless one is already pending.
    /// Returns true if a new frame was requested.
    pub fn request<S: FrameScheduler>(&mut self, scheduler: &mut S) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// The pending frame is running; free the slot
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Synchronously cancel the pending frame, if any
    pub fn cancel<S: FrameScheduler>(&mut self, scheduler: &mut S) -> bool {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
