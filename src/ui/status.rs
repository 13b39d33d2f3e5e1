//! One-line status text under the canvas

use crate::consts::WIN_THRESHOLD;

/// What the status line needs to know
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusView {
    pub multi_touch: bool,
    pub drawing: bool,
    /// Live score if one is showing, else the terminal score
    pub active_score: Option<u8>,
    /// Terminal score of the last evaluated stroke
    pub terminal_score: Option<u8>,
}

pub fn status_line(view: StatusView) -> String {
    if view.multi_touch {
        return "Two-finger touch detected. Use one finger to draw.".to_string();
    }
    let Some(active) = view.active_score else {
        return "Draw a circle in one smooth stroke.".to_string();
    };
    if !view.drawing {
        if let Some(score) = view.terminal_score.filter(|&s| s < WIN_THRESHOLD) {
            return format!("Try failed - {}%. Aim for {}%+.", score, WIN_THRESHOLD);
        }
    }
    if active >= WIN_THRESHOLD {
        return format!("Prize tier unlocked: {}%", active);
    }
    if view.drawing {
        format!("Your circle score: {}%. Keep going...", active)
    } else {
        format!("Your circle score: {}%. Aim for {}%+", active, WIN_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_touch_wins_over_everything() {
        let view = StatusView {
            multi_touch: true,
            drawing: true,
            active_score: Some(99),
            terminal_score: None,
        };
        assert!(status_line(view).starts_with("Two-finger"));
    }

    #[test]
    fn test_idle_prompt() {
        assert_eq!(
            status_line(StatusView::default()),
            "Draw a circle in one smooth stroke."
        );
    }

    #[test]
    fn test_live_and_terminal_messages() {
        let drawing = StatusView {
            drawing: true,
            active_score: Some(80),
            ..Default::default()
        };
        assert_eq!(status_line(drawing), "Your circle score: 80%. Keep going...");

        let lost = StatusView {
            active_score: Some(85),
            terminal_score: Some(85),
            ..Default::default()
        };
        assert_eq!(status_line(lost), "Try failed - 85%. Aim for 92%+.");

        let won = StatusView {
            active_score: Some(97),
            terminal_score: Some(97),
            ..Default::default()
        };
        assert_eq!(status_line(won), "Prize tier unlocked: 97%");
    }
}
