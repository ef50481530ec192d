//! Measurement store abstraction
//!
//! Replaces ad-hoc global collections with an explicit append/list
//! interface so the persistence mechanism (in-memory, sidecar file, remote
//! call) can be swapped without touching geometry or interaction logic.

use crate::measurement::{Measurement, MeasurementDraft, MeasurementId, MeasurementKind, PlanId};
use std::collections::HashMap;

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("measurement label must not be empty")]
    EmptyLabel,

    #[error("{kind:?} measurements require {expected} points, got {got}")]
    PointCount {
        kind: MeasurementKind,
        expected: &'static str,
        got: usize,
    },

    #[error("measurement value must not be negative: {0}")]
    NegativeValue(f32),

    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Validate a draft before it is assigned an id and stored
///
/// The interaction machine enforces cardinality before a draft ever reaches
/// a store, but stores must not trust the caller: this check is
/// authoritative.
pub fn validate_draft(draft: &MeasurementDraft) -> StoreResult<()> {
    if draft.label.trim().is_empty() {
        return Err(StoreError::EmptyLabel);
    }
    if !draft.kind.accepts_point_count(draft.points.len()) {
        let expected = match draft.kind {
            MeasurementKind::Length => "exactly 2",
            MeasurementKind::Area => "at least 3",
        };
        return Err(StoreError::PointCount {
            kind: draft.kind,
            expected,
            got: draft.points.len(),
        });
    }
    if draft.value < 0.0 {
        return Err(StoreError::NegativeValue(draft.value));
    }
    Ok(())
}

/// Append/list interface over persisted measurements
///
/// Lookups are always scoped by plan; there is no update or delete
/// operation.
pub trait MeasurementStore {
    /// All measurements for a plan, in insertion order
    fn list_by_plan(&self, plan_id: PlanId) -> StoreResult<Vec<Measurement>>;

    /// Validate a draft, assign an id, store and return the full record
    fn append(&mut self, draft: MeasurementDraft) -> StoreResult<Measurement>;
}

/// In-memory measurement store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// All measurements indexed by ID
    measurements: HashMap<MeasurementId, Measurement>,
    /// Measurement ids grouped by plan, in insertion order
    by_plan: HashMap<PlanId, Vec<MeasurementId>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-committed record, e.g. when seeding from a backend
    pub fn insert(&mut self, measurement: Measurement) {
        let id = measurement.id();
        let plan_id = measurement.plan_id();
        self.measurements.insert(id, measurement);
        self.by_plan.entry(plan_id).or_default().push(id);
    }

    /// Get a measurement by ID
    pub fn get(&self, id: MeasurementId) -> Option<&Measurement> {
        self.measurements.get(&id)
    }

    /// Get total count of measurements
    pub fn count(&self) -> usize {
        self.measurements.len()
    }

    /// Get count of measurements for a plan
    pub fn count_for_plan(&self, plan_id: PlanId) -> usize {
        self.by_plan.get(&plan_id).map(|ids| ids.len()).unwrap_or(0)
    }
}

impl MeasurementStore for MemoryStore {
    fn list_by_plan(&self, plan_id: PlanId) -> StoreResult<Vec<Measurement>> {
        Ok(self
            .by_plan
            .get(&plan_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.measurements.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn append(&mut self, draft: MeasurementDraft) -> StoreResult<Measurement> {
        validate_draft(&draft)?;
        let measurement = Measurement::from_draft(draft);
        self.insert(measurement.clone());
        Ok(measurement)
    }
}
