//! Prize tiers
//!
//! Step function over the terminal score, checked from the top down so a
//! boundary score lands in the higher tier.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCORE, WIN_THRESHOLD};

/// Reward level for a winning stroke (ordered, Tier4 is best)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrizeTier {
    /// 92..96
    Tier1,
    /// 96..98
    Tier2,
    /// 98..100
    Tier3,
    /// Perfect 100
    Tier4,
}

impl PrizeTier {
    /// All tiers, lowest first
    pub const ALL: [PrizeTier; 4] = [
        PrizeTier::Tier1,
        PrizeTier::Tier2,
        PrizeTier::Tier3,
        PrizeTier::Tier4,
    ];

    /// Resolve the tier for a terminal score. `None` below the win threshold.
    pub fn for_score(score: u8) -> Option<Self> {
        if score >= MAX_SCORE {
            Some(PrizeTier::Tier4)
        } else if score >= 98 {
            Some(PrizeTier::Tier3)
        } else if score >= 96 {
            Some(PrizeTier::Tier2)
        } else if score >= WIN_THRESHOLD {
            Some(PrizeTier::Tier1)
        } else {
            None
        }
    }

    /// 1-based tier number
    pub fn level(&self) -> u8 {
        match self {
            PrizeTier::Tier1 => 1,
            PrizeTier::Tier2 => 2,
            PrizeTier::Tier3 => 3,
            PrizeTier::Tier4 => 4,
        }
    }

    /// Index into a four-entry label table
    pub fn index(&self) -> usize {
        self.level() as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_resolve_to_higher_tier() {
        assert_eq!(PrizeTier::for_score(100), Some(PrizeTier::Tier4));
        assert_eq!(PrizeTier::for_score(99), Some(PrizeTier::Tier3));
        assert_eq!(PrizeTier::for_score(98), Some(PrizeTier::Tier3));
        assert_eq!(PrizeTier::for_score(97), Some(PrizeTier::Tier2));
        assert_eq!(PrizeTier::for_score(96), Some(PrizeTier::Tier2));
        assert_eq!(PrizeTier::for_score(95), Some(PrizeTier::Tier1));
        assert_eq!(PrizeTier::for_score(92), Some(PrizeTier::Tier1));
        assert_eq!(PrizeTier::for_score(91), None);
        assert_eq!(PrizeTier::for_score(0), None);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(PrizeTier::Tier4 > PrizeTier::Tier3);
        assert!(PrizeTier::Tier1 < PrizeTier::Tier2);
        let levels: Vec<u8> = PrizeTier::ALL.iter().map(PrizeTier::level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_tier_never_drops_as_score_rises() {
        let mut prev = None;
        for score in 0..=100u8 {
            let tier = PrizeTier::for_score(score);
            assert!(tier >= prev);
            prev = tier;
        }
    }
}
