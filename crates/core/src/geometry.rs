//! Pure takeoff geometry
//!
//! Converts point sequences drawn over a plan into real-world lengths and
//! areas. All inputs are plan-local pixel coordinates at zoom scale 1;
//! outputs are meters (or square meters) after applying a calibration scale.

use serde::{Deserialize, Serialize};

/// Plan-local coordinate in pixels at zoom scale 1
///
/// Uses the plan image coordinate system:
/// - Origin (0, 0) at top-left of the page
/// - X increases to the right
/// - Y increases downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f32,
    pub y: f32,
}

impl PlanPoint {
    /// Create a new plan point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance_to(&self, other: &PlanPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Default calibration: one plan pixel represents 0.0254 meters.
pub const DEFAULT_METERS_PER_PIXEL: f32 = 0.0254;

/// Pixels-to-meters calibration ratio
///
/// One global ratio applies to every plan regardless of its resolution or
/// printed scale. True per-sheet accuracy would need a two-point calibration
/// reference on each plan; this ratio is a workspace-wide configuration
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Real-world meters represented by one plan pixel
    meters_per_pixel: f32,
}

impl Scale {
    /// Create a scale from a meters-per-pixel ratio
    pub fn new(meters_per_pixel: f32) -> Self {
        Self { meters_per_pixel }
    }

    /// Get the meters-per-pixel ratio
    pub fn meters_per_pixel(&self) -> f32 {
        self.meters_per_pixel
    }

    /// Convert a pixel distance to meters
    pub fn to_meters(&self, pixels: f32) -> f32 {
        pixels * self.meters_per_pixel
    }

    /// Convert a square-pixel area to square meters
    pub fn to_square_meters(&self, square_pixels: f32) -> f32 {
        square_pixels * self.meters_per_pixel * self.meters_per_pixel
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { meters_per_pixel: DEFAULT_METERS_PER_PIXEL }
    }
}

/// Real-world length of a two-point segment
///
/// Returns 0.0 when fewer than two points are supplied. Points beyond the
/// first two are ignored; length measurements are straight segments.
pub fn length(points: &[PlanPoint], scale: Scale) -> f32 {
    match points {
        [start, end, ..] => scale.to_meters(start.distance_to(end)),
        _ => 0.0,
    }
}

/// Real-world area of a closed polygon
///
/// Shoelace formula: vertices wrap around from last to first, the signed
/// sum is halved and its absolute value taken. Correct for convex and
/// simple concave polygons; a self-intersecting outline yields the signed
/// cancellation value, which is well defined but not always what the eye
/// expects. Returns 0.0 for fewer than three points.
pub fn area(points: &[PlanPoint], scale: Scale) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    scale.to_square_meters((area / 2.0).abs())
}

/// Arithmetic mean of a point sequence
///
/// Used as the label anchor for rendered measurements.
pub fn centroid(points: &[PlanPoint]) -> PlanPoint {
    if points.is_empty() {
        return PlanPoint::new(0.0, 0.0);
    }
    let sum_x: f32 = points.iter().map(|p| p.x).sum();
    let sum_y: f32 = points.iter().map(|p| p.y).sum();
    let n = points.len() as f32;
    PlanPoint::new(sum_x / n, sum_y / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_scale() -> Scale {
        Scale::new(1.0)
    }

    #[test]
    fn test_length_symmetry() {
        let p0 = PlanPoint::new(3.0, 7.0);
        let p1 = PlanPoint::new(-2.0, 11.5);
        let scale = Scale::default();

        assert_eq!(length(&[p0, p1], scale), length(&[p1, p0], scale));
    }

    #[test]
    fn test_length_three_four_five() {
        let points = [PlanPoint::new(0.0, 0.0), PlanPoint::new(3.0, 4.0)];
        let value = length(&points, Scale::default());

        assert!((value - 5.0 * DEFAULT_METERS_PER_PIXEL).abs() < 1e-6);
    }

    #[test]
    fn test_length_requires_two_points() {
        assert_eq!(length(&[], Scale::default()), 0.0);
        assert_eq!(length(&[PlanPoint::new(1.0, 1.0)], Scale::default()), 0.0);
    }

    #[test]
    fn test_area_square_at_default_scale() {
        let square = [
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(10.0, 0.0),
            PlanPoint::new(10.0, 10.0),
            PlanPoint::new(0.0, 10.0),
        ];
        let value = area(&square, Scale::default());

        // 10px sides at 0.0254 m/px: (10 * 0.0254)^2 = 0.064516 m²
        assert!((value - 0.064516).abs() < 1e-6);
    }

    #[test]
    fn test_area_triangle() {
        let triangle = [
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(10.0, 0.0),
            PlanPoint::new(5.0, 10.0),
        ];

        assert!((area(&triangle, unit_scale()) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_area_degenerate_polygon_is_zero() {
        let p = PlanPoint::new(4.0, 4.0);
        assert_eq!(area(&[p, p, p, p], unit_scale()), 0.0);
    }

    #[test]
    fn test_area_requires_three_points() {
        let points = [PlanPoint::new(0.0, 0.0), PlanPoint::new(10.0, 0.0)];
        assert_eq!(area(&points, unit_scale()), 0.0);
    }

    #[test]
    fn test_area_invariant_under_rotation_and_winding() {
        let square = vec![
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(10.0, 0.0),
            PlanPoint::new(10.0, 10.0),
            PlanPoint::new(0.0, 10.0),
        ];
        let expected = area(&square, unit_scale());

        let mut rotated = square.clone();
        rotated.rotate_left(2);
        assert!((area(&rotated, unit_scale()) - expected).abs() < 1e-4);

        let mut reversed = square;
        reversed.reverse();
        let value = area(&reversed, unit_scale());
        assert!(value > 0.0);
        assert!((value - expected).abs() < 1e-4);
    }

    #[test]
    fn test_centroid_of_square() {
        let square = [
            PlanPoint::new(0.0, 0.0),
            PlanPoint::new(60.0, 0.0),
            PlanPoint::new(60.0, 60.0),
            PlanPoint::new(0.0, 60.0),
        ];
        let center = centroid(&square);

        assert_eq!(center.x, 30.0);
        assert_eq!(center.y, 30.0);
    }

    #[test]
    fn test_scale_conversions() {
        let scale = Scale::new(0.5);

        assert_eq!(scale.to_meters(10.0), 5.0);
        assert_eq!(scale.to_square_meters(10.0), 2.5);
    }
}
