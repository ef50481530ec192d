//! Overlay color theme
//!
//! Committed measurements and the in-progress draft are drawn in distinct
//! colors so a half-finished gesture is never mistaken for saved data.

use crate::scene::Color;

/// Colors and stroke widths for the measurement overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayTheme {
    /// Stroke for persisted measurements
    pub committed_stroke: Color,

    /// Fill for persisted area shapes
    pub committed_fill: Color,

    /// Stroke for the in-progress gesture
    pub draft_stroke: Color,

    /// Fill for the in-progress area shape
    pub draft_fill: Color,

    /// Stroke width in surface pixels
    pub stroke_width: f32,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        let committed = Color::rgb(0.0, 0.0, 1.0);
        let draft = Color::rgb(1.0, 0.0, 0.0);
        Self {
            committed_stroke: committed,
            committed_fill: committed.with_alpha(0.1),
            draft_stroke: draft,
            draft_fill: draft.with_alpha(0.1),
            stroke_width: 1.0,
        }
    }
}
