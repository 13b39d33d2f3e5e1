//! Presentation helpers shared by renderers
//!
//! Nothing here feeds back into scoring.

pub mod palette;
pub mod status;

pub use palette::{STROKE_COLOR, ScoreColor, WIN_STROKE_COLOR};
pub use status::{StatusView, status_line};
