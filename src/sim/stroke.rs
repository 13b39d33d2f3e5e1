//! Stroke buffer and display smoothing
//!
//! A stroke is the ordered point sequence captured during one drawing
//! session. It only grows while drawing; nothing outside the session
//! mutates it.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Ordered, append-only point sequence for one stroke
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a stroke from raw points without filtering (tests, replays)
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Append a point. Only the point filter calls this.
    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Raw accepted points in arrival order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last accepted point
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Display path for rendering. Never score this.
    pub fn smoothed(&self) -> Vec<Point> {
        smooth_path(&self.points)
    }
}

/// 3-point moving average; endpoints stay put, short paths pass through
pub fn smooth_path(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity(points.len());
    smoothed.push(points[0]);
    smoothed.extend(
        points
            .windows(3)
            .map(|w| (w[0] + w[1] + w[2]) / 3.0),
    );
    smoothed.push(points[points.len() - 1]);
    smoothed
}
