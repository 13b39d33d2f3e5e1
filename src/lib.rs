//! Circle Lab - A draw-a-perfect-circle skill game
//!
//! Core modules:
//! - `sim`: Deterministic stroke pipeline (filter, circle fit, prize tiers, session state)
//! - `feedback`: Live score throttling and coalesced redraw scheduling
//! - `controller`: Session controller owning the stroke and scoped frame resources
//! - `platform`: Display-refresh scheduling abstraction
//! - `settings`: Player-facing preferences
//! - `ui`: Score palette and status text for renderers
//! - `effects`: Cosmetic celebration particles
//! - `audio`: Outcome sound cues

pub mod audio;
pub mod controller;
pub mod effects;
pub mod feedback;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use controller::{ClaimTicket, FrameSnapshot, SessionController, Update};
pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Canvas-local point in CSS pixels
pub type Point = DVec2;

/// Game configuration constants
pub mod consts {
    /// Minimum distance between consecutive accepted stroke points
    pub const MIN_POINT_SPACING: f64 = 1.4;

    /// Points required before a stroke can be judged at all
    pub const MIN_SCORING_POINTS: usize = 12;
    /// Points required before the live estimate starts running
    pub const LIVE_MIN_POINTS: usize = 8;
    /// Radius at or below which a stroke is treated as a single dot
    pub const DEGENERATE_RADIUS: f64 = 1e-3;

    /// Minimum wall-clock spacing between live score updates (ms)
    pub const LIVE_THROTTLE_MS: f64 = 50.0;

    /// Terminal score needed to win a prize
    pub const WIN_THRESHOLD: u8 = 92;
    /// Highest possible score
    pub const MAX_SCORE: u8 = 100;
}

/// Evenly spaced points on a circle, starting at `phase` radians
pub fn circle_points(center: Point, radius: f64, count: usize, phase: f64) -> Vec<Point> {
    use std::f64::consts::TAU;
    (0..count)
        .map(|i| {
            let theta = phase + TAU * i as f64 / count as f64;
            center + polar_to_cartesian(radius, theta)
        })
        .collect()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> Point {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
