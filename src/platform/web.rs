//! `requestAnimationFrame` scheduler for the browser

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHandle, FrameScheduler};

/// Schedules frames with `window.requestAnimationFrame`.
///
/// The callback receives the rAF timestamp (ms). It must not hold a strong
/// reference back to whatever owns this scheduler.
///
/// Closures stay owned here so a cancelled frame frees its callback. The
/// previous frame's closure is parked in `spent` rather than dropped, since
/// a frame usually requests its successor while it is still running.
pub struct RafScheduler {
    on_frame: Rc<dyn Fn(f64)>,
    pending: Option<(FrameHandle, Closure<dyn FnMut(f64)>)>,
    spent: Option<Closure<dyn FnMut(f64)>>,
}

impl RafScheduler {
    pub fn new(on_frame: Rc<dyn Fn(f64)>) -> Self {
        Self {
            on_frame,
            pending: None,
            spent: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let on_frame = self.on_frame.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| on_frame(time));

        let id = web_sys::window()
            .and_then(|w| {
                w.request_animation_frame(callback.as_ref().unchecked_ref())
                    .map_err(|e| log::warn!("requestAnimationFrame failed: {:?}", e))
                    .ok()
            })
            .unwrap_or(0);
        let handle = FrameHandle(id);

        if let Some((_, previous)) = self.pending.replace((handle, callback)) {
            self.spent = Some(previous);
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
        if self.pending.as_ref().is_some_and(|(h, _)| *h == handle) {
            // Never ran, so nothing is executing it
            self.pending = None;
        }
    }
}
