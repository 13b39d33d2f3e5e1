//! Platform abstraction layer
//!
//! The core never talks to the display directly. It asks a
//! `FrameScheduler` for the next refresh and cancels that request when a
//! session is reset, resized or torn down.
//!
//! - `ManualFrames`: caller-driven scheduler (native builds, tests)
//! - `web::RafScheduler`: `requestAnimationFrame` on wasm

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Opaque id of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host display-refresh scheduling primitive
pub trait FrameScheduler {
    /// Schedule one callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a callback that has not run yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler whose frames only "run" when the caller says so
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: i32,
    queued: Vec<FrameHandle>,
    /// Total frames requested
    pub requested: u32,
    /// Total frames cancelled before running
    pub cancelled: u32,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames scheduled but not yet run or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.queued
    }

    /// Pop all due frames (caller then drives the frame callback)
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queued)
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queued.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queued.len();
        self.queued.retain(|&h| h != handle);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}
