//! Measurement overlay projector
//!
//! Maps persisted measurements and the in-progress gesture into drawable
//! primitives at the current view scale. Stored geometry is in plan pixels
//! at zoom 1; the projector assumes the target surface is pixel-compatible
//! and sized to the page at the active scale.

use crate::scene::{OverlayScene, Primitive};
use crate::theme::OverlayTheme;
use takeoff_core::geometry::{centroid, PlanPoint, Scale};
use takeoff_core::interaction::Tool;
use takeoff_core::measurement::{Measurement, MeasurementKind};

/// In-progress gesture to project alongside persisted measurements
#[derive(Debug, Clone, Copy)]
pub struct DraftOverlay<'a> {
    /// Tool the gesture was drawn with
    pub tool: Tool,
    /// Points placed so far, in plan pixels
    pub points: &'a [PlanPoint],
}

/// Project measurements and the optional draft into an overlay scene
///
/// The scene is rebuilt in full on every call (clear-and-redraw).
/// Persisted measurements are drawn in committed colors with
/// `label: value` text at the centroid; the draft is drawn in its own
/// colors with a live engine-computed value once two points exist.
pub fn project(
    measurements: &[Measurement],
    draft: Option<DraftOverlay<'_>>,
    view_scale: f32,
    scale: Scale,
    theme: &OverlayTheme,
) -> OverlayScene {
    let mut scene = OverlayScene::new();

    for measurement in measurements {
        let closed = measurement.kind() == MeasurementKind::Area;
        scene.primitives.push(Primitive::Polyline {
            points: to_surface(measurement.points(), view_scale),
            closed,
            stroke_color: theme.committed_stroke,
            stroke_width: theme.stroke_width,
            fill_color: closed.then_some(theme.committed_fill),
        });

        let anchor = centroid(measurement.points());
        scene.primitives.push(Primitive::Label {
            position: [anchor.x * view_scale, anchor.y * view_scale],
            text: format!("{}: {}", measurement.label(), measurement.formatted_value()),
            color: theme.committed_stroke,
        });
    }

    if let Some(draft) = draft {
        project_draft(&mut scene, draft, view_scale, scale, theme);
    }

    scene
}

fn project_draft(
    scene: &mut OverlayScene,
    draft: DraftOverlay<'_>,
    view_scale: f32,
    scale: Scale,
    theme: &OverlayTheme,
) {
    let Some(kind) = draft.tool.kind() else {
        return;
    };
    if draft.points.is_empty() {
        return;
    }

    let closed = kind == MeasurementKind::Area && draft.points.len() >= 3;
    scene.primitives.push(Primitive::Polyline {
        points: to_surface(draft.points, view_scale),
        closed,
        stroke_color: theme.draft_stroke,
        stroke_width: theme.stroke_width,
        fill_color: closed.then_some(theme.draft_fill),
    });

    // Live value once the gesture has enough geometry to measure
    if draft.points.len() >= 2 {
        let value = kind.measure(draft.points, scale);
        let anchor = centroid(draft.points);
        scene.primitives.push(Primitive::Label {
            position: [anchor.x * view_scale, anchor.y * view_scale],
            text: format!("{:.2}{}", value, kind.unit()),
            color: theme.draft_stroke,
        });
    }
}

fn to_surface(points: &[PlanPoint], view_scale: f32) -> Vec<[f32; 2]> {
    points.iter().map(|p| [p.x * view_scale, p.y * view_scale]).collect()
}
