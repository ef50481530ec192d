//! Measurement data model
//!
//! Structured takeoff measurements scoped by plan. Geometry is immutable
//! once committed: a measurement is created from a labelled draft and never
//! updated in place.

use crate::geometry::{self, PlanPoint, Scale};
use serde::{Deserialize, Serialize};

/// Unique identifier for measurements
pub type MeasurementId = uuid::Uuid;

/// Unique identifier for plans
pub type PlanId = uuid::Uuid;

/// Kind of quantity captured by a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    /// Straight-line distance between two points
    Length,
    /// Enclosed polygon area
    Area,
}

impl MeasurementKind {
    /// Display unit, derived from the kind and never settable on its own
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementKind::Length => "m",
            MeasurementKind::Area => "m²",
        }
    }

    /// Check whether a point count satisfies this kind's cardinality rule
    ///
    /// Length measurements are exactly two points; areas are any polygon
    /// with at least three vertices.
    pub fn accepts_point_count(&self, count: usize) -> bool {
        match self {
            MeasurementKind::Length => count == 2,
            MeasurementKind::Area => count >= 3,
        }
    }

    /// Compute the real-world value of a point sequence for this kind
    pub fn measure(&self, points: &[PlanPoint], scale: Scale) -> f32 {
        match self {
            MeasurementKind::Length => geometry::length(points, scale),
            MeasurementKind::Area => geometry::area(points, scale),
        }
    }
}

/// An uncommitted measurement handed to a store for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDraft {
    /// Owning plan, never null
    pub plan_id: PlanId,
    /// Kind of quantity measured
    pub kind: MeasurementKind,
    /// User-supplied label, required before commit
    pub label: String,
    /// Computed real-world magnitude
    pub value: f32,
    /// Ordered point sequence in plan pixels
    pub points: Vec<PlanPoint>,
}

impl MeasurementDraft {
    /// Build a draft by measuring a point sequence at the given scale
    pub fn measured(
        plan_id: PlanId,
        kind: MeasurementKind,
        label: impl Into<String>,
        points: Vec<PlanPoint>,
        scale: Scale,
    ) -> Self {
        let value = kind.measure(&points, scale);
        Self { plan_id, kind, label: label.into(), value, points }
    }
}

/// A committed measurement
///
/// Created only through a store's `append`, which assigns the id. Fields
/// are read-only afterwards; there is no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    id: MeasurementId,
    plan_id: PlanId,
    kind: MeasurementKind,
    label: String,
    value: f32,
    points: Vec<PlanPoint>,
}

impl Measurement {
    /// Build a stored record from a draft, assigning a fresh id
    ///
    /// Store implementations call this after validating the draft.
    pub fn from_draft(draft: MeasurementDraft) -> Self {
        Self {
            id: MeasurementId::new_v4(),
            plan_id: draft.plan_id,
            kind: draft.kind,
            label: draft.label,
            value: draft.value,
            points: draft.points,
        }
    }

    /// Get the measurement ID
    pub fn id(&self) -> MeasurementId {
        self.id
    }

    /// Get the owning plan ID
    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    /// Get the measurement kind
    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    /// Get the user-supplied label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the real-world value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Get the display unit derived from the kind
    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }

    /// Get the ordered point sequence
    pub fn points(&self) -> &[PlanPoint] {
        &self.points
    }

    /// Value formatted for display, e.g. `12.34m` or `3.05m²`
    pub fn formatted_value(&self) -> String {
        format!("{:.2}{}", self.value, self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_derived_from_kind() {
        assert_eq!(MeasurementKind::Length.unit(), "m");
        assert_eq!(MeasurementKind::Area.unit(), "m²");
    }

    #[test]
    fn test_point_cardinality_rules() {
        assert!(!MeasurementKind::Length.accepts_point_count(1));
        assert!(MeasurementKind::Length.accepts_point_count(2));
        assert!(!MeasurementKind::Length.accepts_point_count(3));

        assert!(!MeasurementKind::Area.accepts_point_count(2));
        assert!(MeasurementKind::Area.accepts_point_count(3));
        assert!(MeasurementKind::Area.accepts_point_count(7));
    }

    #[test]
    fn test_measured_draft_computes_length() {
        let plan_id = PlanId::new_v4();
        let points = vec![PlanPoint::new(0.0, 0.0), PlanPoint::new(3.0, 4.0)];
        let draft = MeasurementDraft::measured(
            plan_id,
            MeasurementKind::Length,
            "North wall",
            points,
            Scale::new(1.0),
        );

        assert_eq!(draft.plan_id, plan_id);
        assert!((draft.value - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_formatted_value() {
        let draft = MeasurementDraft::measured(
            PlanId::new_v4(),
            MeasurementKind::Length,
            "Corridor",
            vec![PlanPoint::new(0.0, 0.0), PlanPoint::new(10.0, 0.0)],
            Scale::new(1.0),
        );
        let measurement = Measurement::from_draft(draft);

        assert_eq!(measurement.formatted_value(), "10.00m");
    }

    #[test]
    fn test_measurement_json_round_trip() {
        let draft = MeasurementDraft::measured(
            PlanId::new_v4(),
            MeasurementKind::Area,
            "Slab",
            vec![
                PlanPoint::new(0.0, 0.0),
                PlanPoint::new(10.0, 0.0),
                PlanPoint::new(10.0, 10.0),
            ],
            Scale::default(),
        );
        let measurement = Measurement::from_draft(draft);

        let json = serde_json::to_string(&measurement).unwrap();
        let restored: Measurement = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, measurement);
    }
}
