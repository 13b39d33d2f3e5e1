//! Circle fit scoring
//!
//! Centroid + mean radius fit, O(n). The error term is the mean absolute
//! radial deviation divided by the radius, so the score is scale-invariant.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::consts::{DEGENERATE_RADIUS, MAX_SCORE, MIN_SCORING_POINTS};

/// Result of fitting a circle to a stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    /// Roundness score in [0, 100]
    pub score: u8,
    /// Estimated center (centroid)
    pub center: Point,
    /// Mean distance from center
    pub radius: f64,
    /// Mean absolute radial deviation / radius
    pub error: f64,
}

impl CircleFit {
    /// Result for strokes that can't be judged
    fn unscored(center: Point, radius: f64) -> Self {
        Self {
            score: 0,
            center,
            radius,
            error: 1.0,
        }
    }
}

/// Score how circular a point sequence is.
///
/// Pure: safe to call on any prefix of a live stroke.
pub fn score(points: &[Point]) -> CircleFit {
    if points.len() < MIN_SCORING_POINTS {
        return CircleFit::unscored(DVec2::ZERO, 0.0);
    }

    let n = points.len() as f64;
    let center = points.iter().copied().sum::<DVec2>() / n;

    let radius = points.iter().map(|p| p.distance(center)).sum::<f64>() / n;
    if !radius.is_finite() || radius <= DEGENERATE_RADIUS {
        return CircleFit::unscored(center, radius.max(0.0));
    }

    let deviation = points
        .iter()
        .map(|p| (p.distance(center) - radius).abs())
        .sum::<f64>()
        / n;
    let error = deviation / radius;

    CircleFit {
        score: score_from_error(error),
        center,
        radius,
        error,
    }
}

/// Map a normalized error to an integer score, clamping anything odd to 0
fn score_from_error(error: f64) -> u8 {
    let raw = 100.0 * (1.0 - error);
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(0.0, MAX_SCORE as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circle_points, polar_to_cartesian};
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    /// 40 points around (100,100) r=50, alternating ±amp radially
    fn wobbly_circle(amp: f64) -> Vec<DVec2> {
        let center = DVec2::new(100.0, 100.0);
        (0..40)
            .map(|i| {
                let r = if i % 2 == 0 { 50.0 - amp } else { 50.0 + amp };
                center + polar_to_cartesian(r, TAU * i as f64 / 40.0)
            })
            .collect()
    }

    #[test]
    fn test_too_few_points_scores_zero() {
        let pts = circle_points(DVec2::new(0.0, 0.0), 50.0, 11, 0.0);
        let fit = score(&pts);
        assert_eq!(fit.score, 0);
        assert_eq!(fit.center, DVec2::ZERO);
        assert_eq!(fit.radius, 0.0);
        assert_eq!(fit.error, 1.0);
    }

    #[test]
    fn test_perfect_sixteen_point_circle() {
        let pts = circle_points(DVec2::new(100.0, 100.0), 50.0, 16, 0.0);
        let fit = score(&pts);
        assert_eq!(fit.score, 100);
        assert!((fit.center - DVec2::new(100.0, 100.0)).length() < 1e-9);
        assert!((fit.radius - 50.0).abs() < 1e-9);
        assert!(fit.error < 1e-9);
    }

    #[test]
    fn test_one_point_pushed_out_moves_centroid() {
        let mut pts = circle_points(DVec2::new(100.0, 100.0), 50.0, 16, 0.0);
        pts[0] = DVec2::new(190.0, 100.0); // 40 units past the rim
        let fit = score(&pts);
        // Centroid shifts 2.5 units toward the outlier
        assert!((fit.center - DVec2::new(102.5, 100.0)).length() < 1e-9);
        assert!((fit.error - 0.0832).abs() < 1e-3);
        assert_eq!(fit.score, 92);
    }

    #[test]
    fn test_wobble_amplitude_sets_score() {
        assert_eq!(score(&wobbly_circle(1.0)).score, 98);
        assert_eq!(score(&wobbly_circle(2.0)).score, 96);
        assert_eq!(score(&wobbly_circle(3.0)).score, 94);
        assert_eq!(score(&wobbly_circle(4.0)).score, 92);
        assert_eq!(score(&wobbly_circle(5.0)).score, 90);
    }

    #[test]
    fn test_collapsed_stroke_is_degenerate() {
        let pts = vec![DVec2::new(42.0, 17.0); 20];
        let fit = score(&pts);
        assert_eq!(fit.score, 0);
        assert_eq!(fit.error, 1.0);
        assert_eq!(fit.radius, 0.0);
        assert_eq!(fit.center, DVec2::new(42.0, 17.0));
    }

    #[test]
    fn test_non_finite_points_score_zero() {
        let mut pts = circle_points(DVec2::new(0.0, 0.0), 50.0, 16, 0.0);
        pts[3] = DVec2::new(f64::INFINITY, 0.0);
        let fit = score(&pts);
        assert_eq!(fit.score, 0);
        assert!(fit.radius >= 0.0);
    }

    #[test]
    fn test_straight_line_scores_low() {
        let pts: Vec<DVec2> = (0..30).map(|i| DVec2::new(i as f64 * 5.0, 0.0)).collect();
        assert!(score(&pts).score < 60);
    }

    #[test]
    fn test_pushing_a_point_further_never_helps() {
        let base = circle_points(DVec2::new(100.0, 100.0), 50.0, 16, 0.0);
        let theta = TAU * 3.0 / 16.0;
        let mut last = u8::MAX;
        for extra in [0.0, 5.0, 10.0, 20.0, 30.0, 40.0, 60.0, 80.0, 120.0] {
            let mut pts = base.clone();
            pts[3] = DVec2::new(100.0, 100.0) + polar_to_cartesian(50.0 + extra, theta);
            let s = score(&pts).score;
            assert!(s <= last, "score rose from {last} to {s} at +{extra}");
            last = s;
        }
    }

    #[test]
    fn test_scoring_does_not_mutate_input() {
        let pts = circle_points(DVec2::new(10.0, 10.0), 30.0, 24, 0.3);
        let copy = pts.clone();
        let a = score(&pts);
        let b = score(&pts);
        assert_eq!(pts, copy);
        assert_eq!(a, b);
    }

    fn noisy_ring() -> impl Strategy<Value = Vec<DVec2>> {
        prop::collection::vec(20.0f64..200.0, 12..64).prop_map(|radii| {
            let n = radii.len();
            radii
                .iter()
                .enumerate()
                .map(|(i, &r)| polar_to_cartesian(r, TAU * i as f64 / n as f64))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_short_strokes_score_zero(
            raw in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..12)
        ) {
            let pts: Vec<DVec2> = raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
            prop_assert_eq!(score(&pts).score, 0);
        }

        #[test]
        fn prop_translation_invariant(pts in noisy_ring(), dx in -1e3f64..1e3, dy in -1e3f64..1e3) {
            let offset = DVec2::new(dx, dy);
            let moved: Vec<DVec2> = pts.iter().map(|&p| p + offset).collect();
            let (a, b) = (score(&pts), score(&moved));
            prop_assert!((a.error - b.error).abs() < 1e-9);
            prop_assert_eq!(a.score, b.score);
        }

        #[test]
        fn prop_rotation_invariant(pts in noisy_ring(), angle in 0.0f64..TAU) {
            let rot = DVec2::from_angle(angle);
            let turned: Vec<DVec2> = pts.iter().map(|&p| rot.rotate(p)).collect();
            let (a, b) = (score(&pts), score(&turned));
            prop_assert!((a.error - b.error).abs() < 1e-9);
            prop_assert_eq!(a.score, b.score);
        }

        #[test]
        fn prop_scale_invariant(pts in noisy_ring(), k in 0.1f64..10.0) {
            let scaled: Vec<DVec2> = pts.iter().map(|&p| p * k).collect();
            let (a, b) = (score(&pts), score(&scaled));
            prop_assert!((a.error - b.error).abs() < 1e-9);
            prop_assert_eq!(a.score, b.score);
        }

        #[test]
        fn prop_exact_circles_score_100(
            n in 12usize..200,
            r in 1.0f64..2000.0,
            phase in 0.0f64..TAU,
        ) {
            let pts = circle_points(DVec2::new(300.0, -40.0), r, n, phase);
            prop_assert_eq!(score(&pts).score, 100);
        }

        #[test]
        fn prop_pushing_any_subset_out_never_helps(
            pushed in prop::collection::vec(any::<bool>(), 12..64),
            step in 0.5f64..5.0,
        ) {
            let n = pushed.len();
            let ring = |push: f64| -> Vec<DVec2> {
                pushed
                    .iter()
                    .enumerate()
                    .map(|(i, &out)| {
                        let r = if out { 50.0 + push } else { 50.0 };
                        DVec2::new(100.0, 100.0) + polar_to_cartesian(r, TAU * i as f64 / n as f64)
                    })
                    .collect()
            };

            let mut prev = score(&ring(0.0)).score;
            for k in 1..=10 {
                let next = score(&ring(step * k as f64)).score;
                prop_assert!(next <= prev, "push {}: {} > {}", step * k as f64, next, prev);
                prev = next;
            }
        }

        #[test]
        fn prop_score_in_range(
            raw in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 0..100)
        ) {
            let pts: Vec<DVec2> = raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
            let fit = score(&pts);
            prop_assert!(fit.score <= 100);
            prop_assert!(fit.radius >= 0.0);
            prop_assert!(fit.error >= 0.0);
        }
    }
}
