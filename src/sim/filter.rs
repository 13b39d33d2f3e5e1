//! Point filter
//!
//! Drops samples that land too close to the previous accepted point so
//! high-frequency pointer hardware doesn't bloat the stroke.

use super::stroke::Stroke;
use crate::Point;
use crate::consts::MIN_POINT_SPACING;

/// Append `candidate` if it is far enough from the last accepted point.
/// Returns true when the point was accepted.
pub fn accept(candidate: Point, stroke: &mut Stroke) -> bool {
    if !candidate.is_finite() {
        return false;
    }
    if let Some(last) = stroke.last() {
        if last.distance(candidate) < MIN_POINT_SPACING {
            return false;
        }
    }
    stroke.push(candidate);
    true
}

/// Run a batch of coalesced samples through the filter in arrival order.
/// Returns how many were accepted.
pub fn accept_batch(samples: &[Point], stroke: &mut Stroke) -> usize {
    samples
        .iter()
        .filter(|&&p| accept(p, stroke))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use proptest::prelude::*;

    #[test]
    fn test_first_point_always_accepted() {
        let mut stroke = Stroke::new();
        assert!(accept(DVec2::new(10.0, 10.0), &mut stroke));
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_close_point_rejected() {
        let mut stroke = Stroke::new();
        accept(DVec2::new(0.0, 0.0), &mut stroke);
        assert!(!accept(DVec2::new(1.0, 0.0), &mut stroke));
        assert!(!accept(DVec2::new(0.0, 0.0), &mut stroke));
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_spacing_boundary_is_inclusive() {
        let mut stroke = Stroke::new();
        accept(DVec2::new(0.0, 0.0), &mut stroke);
        assert!(accept(DVec2::new(MIN_POINT_SPACING, 0.0), &mut stroke));
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut stroke = Stroke::new();
        assert!(!accept(DVec2::new(f64::NAN, 0.0), &mut stroke));
        assert!(!accept(DVec2::new(0.0, f64::INFINITY), &mut stroke));
        assert!(stroke.is_empty());
    }

    #[test]
    fn test_batch_preserves_order_and_filters() {
        let mut stroke = Stroke::new();
        let samples = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.0), // too close
            DVec2::new(2.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.1, 0.1), // too close
            DVec2::new(6.0, 0.0),
        ];
        assert_eq!(accept_batch(&samples, &mut stroke), 4);
        let xs: Vec<f64> = stroke.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0]);
    }

    proptest! {
        #[test]
        fn prop_accepted_points_respect_spacing(
            raw in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..200)
        ) {
            let samples: Vec<DVec2> = raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
            let mut stroke = Stroke::new();
            accept_batch(&samples, &mut stroke);
            for w in stroke.points().windows(2) {
                prop_assert!(w[0].distance(w[1]) >= MIN_POINT_SPACING);
            }
            prop_assert!(stroke.len() <= samples.len());
        }
    }
}
