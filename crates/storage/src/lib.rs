//! Measurement sidecar persistence
//!
//! Stores each plan's measurements as a versioned JSON sidecar file under a
//! data directory and implements the core store abstraction, so sessions
//! persist to disk without knowing about files. This is the persistence
//! collaborator behind a session's commit and seed steps.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use takeoff_core::measurement::{Measurement, MeasurementDraft, PlanId};
use takeoff_core::store::{validate_draft, MeasurementStore, StoreError, StoreResult};

const SIDECAR_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON-file measurement store, one sidecar per plan
#[derive(Debug, Clone)]
pub struct SidecarStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SidecarEnvelope {
    version: u32,
    measurements: Vec<Measurement>,
}

impl SidecarEnvelope {
    fn empty() -> Self {
        Self { version: SIDECAR_SCHEMA_VERSION, measurements: Vec::new() }
    }
}

impl SidecarStore {
    /// Store rooted at the OS-local data directory
    pub fn from_default_project() -> Result<Self, StorageError> {
        let dirs =
            ProjectDirs::from("dev", "Takeoff", "Takeoff").ok_or(StorageError::NoDataDirectory)?;

        Ok(Self { root: dirs.data_local_dir().to_path_buf() })
    }

    /// Store rooted at an explicit directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sidecar path for a plan's measurements
    pub fn sidecar_path(&self, plan_id: PlanId) -> PathBuf {
        self.root.join(format!("{plan_id}.takeoff.json"))
    }

    fn read_envelope(&self, plan_id: PlanId) -> Result<SidecarEnvelope, StorageError> {
        let path = self.sidecar_path(plan_id);
        if !path.exists() {
            return Ok(SidecarEnvelope::empty());
        }

        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_envelope(
        &self,
        plan_id: PlanId,
        envelope: &SidecarEnvelope,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;

        let path = self.sidecar_path(plan_id);
        let bytes = serde_json::to_vec_pretty(envelope)?;

        // Write atomically via a temporary file so a crash mid-write never
        // truncates an existing sidecar
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl MeasurementStore for SidecarStore {
    fn list_by_plan(&self, plan_id: PlanId) -> StoreResult<Vec<Measurement>> {
        let envelope = self
            .read_envelope(plan_id)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        Ok(envelope.measurements)
    }

    fn append(&mut self, draft: MeasurementDraft) -> StoreResult<Measurement> {
        validate_draft(&draft)?;

        let plan_id = draft.plan_id;
        let mut envelope = self
            .read_envelope(plan_id)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        let measurement = Measurement::from_draft(draft);
        envelope.measurements.push(measurement.clone());

        self.write_envelope(plan_id, &envelope)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        Ok(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_core::geometry::{PlanPoint, Scale};
    use takeoff_core::measurement::MeasurementKind;

    fn length_draft(plan_id: PlanId, label: &str) -> MeasurementDraft {
        MeasurementDraft::measured(
            plan_id,
            MeasurementKind::Length,
            label,
            vec![PlanPoint::new(0.0, 0.0), PlanPoint::new(3.0, 4.0)],
            Scale::new(1.0),
        )
    }

    #[test]
    fn test_append_then_list_round_trips() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let mut store = SidecarStore::with_root(temp.path());
        let plan_id = PlanId::new_v4();

        let stored = store.append(length_draft(plan_id, "Wall A")).expect("append should succeed");
        assert!(store.sidecar_path(plan_id).exists());

        let listed = store.list_by_plan(plan_id).expect("list should succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], stored);
    }

    #[test]
    fn test_list_is_empty_when_sidecar_absent() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SidecarStore::with_root(temp.path());

        let listed = store.list_by_plan(PlanId::new_v4()).expect("list should succeed");
        assert!(listed.is_empty());
    }

    #[test]
    fn test_appends_preserve_insertion_order_across_reopens() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let plan_id = PlanId::new_v4();

        {
            let mut store = SidecarStore::with_root(temp.path());
            store.append(length_draft(plan_id, "first")).unwrap();
            store.append(length_draft(plan_id, "second")).unwrap();
        }

        // A fresh store over the same root sees the same records
        let mut store = SidecarStore::with_root(temp.path());
        store.append(length_draft(plan_id, "third")).unwrap();

        let labels: Vec<_> = store
            .list_by_plan(plan_id)
            .unwrap()
            .iter()
            .map(|m| m.label().to_string())
            .collect();
        assert_eq!(labels, ["first", "second", "third"]);
    }

    #[test]
    fn test_plans_get_separate_sidecars() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let mut store = SidecarStore::with_root(temp.path());
        let plan_a = PlanId::new_v4();
        let plan_b = PlanId::new_v4();

        store.append(length_draft(plan_a, "A")).unwrap();
        store.append(length_draft(plan_b, "B")).unwrap();

        assert_ne!(store.sidecar_path(plan_a), store.sidecar_path(plan_b));
        assert_eq!(store.list_by_plan(plan_a).unwrap().len(), 1);
        assert_eq!(store.list_by_plan(plan_b).unwrap().len(), 1);
    }

    #[test]
    fn test_append_validates_before_touching_disk() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let mut store = SidecarStore::with_root(temp.path());
        let plan_id = PlanId::new_v4();

        let result = store.append(length_draft(plan_id, "  "));
        assert!(matches!(result, Err(StoreError::EmptyLabel)));
        assert!(!store.sidecar_path(plan_id).exists());
    }

    #[test]
    fn test_corrupt_sidecar_surfaces_persistence_error() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SidecarStore::with_root(temp.path());
        let plan_id = PlanId::new_v4();

        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.sidecar_path(plan_id), b"not json").unwrap();

        let result = store.list_by_plan(plan_id);
        assert!(matches!(result, Err(StoreError::Persistence(_))));
    }
}
