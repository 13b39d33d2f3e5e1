//! Celebration confetti
//!
//! Purely cosmetic. The host spawns a burst when a stroke is judged a win;
//! nothing in `sim` reads these particles. Seeded so a given burst can be
//! replayed, but no test of scoring depends on it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Particles per burst
pub const CONFETTI_COUNT: usize = 150;
/// Downward acceleration, px per frame² at 60 Hz
pub const CONFETTI_GRAVITY: f32 = 0.1;
/// Confetti colors (gold, white, black, yellow, sky)
pub const CONFETTI_COLORS: [&str; 5] = ["#D4AF37", "#ffffff", "#000000", "#facc15", "#38bdf8"];

/// Reference frame rate the per-frame constants are tuned for
const REFERENCE_FPS: f32 = 60.0;

/// A single confetti square
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub pos: Vec2,
    /// Velocity in px per reference frame
    pub vel: Vec2,
    /// Index into `CONFETTI_COLORS`
    pub color: usize,
    pub size: f32,
}

impl ConfettiParticle {
    pub fn color_hex(&self) -> &'static str {
        CONFETTI_COLORS[self.color % CONFETTI_COLORS.len()]
    }
}

/// A confetti burst bounded by the viewport
#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<ConfettiParticle>,
    bounds: Vec2,
}

impl Confetti {
    /// Spawn a burst at `origin` with an upward bias
    pub fn burst(seed: u64, origin: Vec2, bounds: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..CONFETTI_COUNT)
            .map(|_| ConfettiParticle {
                pos: origin,
                vel: Vec2::new(
                    rng.random_range(-5.0..5.0),
                    rng.random_range(-5.0..5.0) - 5.0,
                ),
                color: rng.random_range(0..CONFETTI_COLORS.len()),
                size: rng.random_range(2.0..7.0),
            })
            .collect();

        Self { particles, bounds }
    }

    /// Advance by `dt` seconds; drops particles that fell out of view
    pub fn step(&mut self, dt: f32) {
        let frames = dt * REFERENCE_FPS;
        for p in &mut self.particles {
            p.pos += p.vel * frames;
            p.vel.y += CONFETTI_GRAVITY * frames;
        }

        let bounds = self.bounds;
        self.particles.retain(|p| {
            p.pos.y - p.size <= bounds.y && p.pos.x + p.size >= 0.0 && p.pos.x - p.size <= bounds.x
        });
    }

    /// Viewport changed
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    /// Every particle has left the viewport
    pub fn is_done(&self) -> bool {
        self.particles.is_empty()
    }
}
