//! Score-driven stroke colors

/// Core stroke color while drawing
pub const STROKE_COLOR: &str = "#06b6d4";
/// Core stroke color once the stroke has won
pub const WIN_STROKE_COLOR: &str = "#22c55e";

/// Glow color band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreColor {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

/// (minimum score, color), highest band first
const BANDS: [(u8, ScoreColor); 4] = [
    (
        90,
        ScoreColor {
            hex: "#D4AF37",
            rgb: (212, 175, 55),
        },
    ), // gold
    (
        75,
        ScoreColor {
            hex: "#38bdf8",
            rgb: (56, 189, 248),
        },
    ), // sky
    (
        55,
        ScoreColor {
            hex: "#f87171",
            rgb: (248, 113, 113),
        },
    ), // soft red
    (
        0,
        ScoreColor {
            hex: "#1d4ed8",
            rgb: (29, 78, 216),
        },
    ), // deep blue
];

impl ScoreColor {
    pub fn for_score(score: u8) -> Self {
        BANDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, color)| *color)
            .unwrap_or(BANDS[BANDS.len() - 1].1)
    }

    /// CSS `rgba(...)` string with the given alpha
    pub fn rgba(&self, alpha: f32) -> String {
        let (r, g, b) = self.rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(ScoreColor::for_score(100).hex, "#D4AF37");
        assert_eq!(ScoreColor::for_score(90).hex, "#D4AF37");
        assert_eq!(ScoreColor::for_score(89).hex, "#38bdf8");
        assert_eq!(ScoreColor::for_score(75).hex, "#38bdf8");
        assert_eq!(ScoreColor::for_score(60).hex, "#f87171");
        assert_eq!(ScoreColor::for_score(0).hex, "#1d4ed8");
    }

    #[test]
    fn test_rgba_format() {
        assert_eq!(
            ScoreColor::for_score(95).rgba(0.8),
            "rgba(212, 175, 55, 0.8)"
        );
    }
}
