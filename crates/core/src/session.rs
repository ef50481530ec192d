//! Takeoff session
//!
//! Composition root for measuring against one plan: wires the interaction
//! machine, the geometry engine and a backing measurement store together,
//! and maintains the in-memory view the overlay is projected from.

use crate::geometry::{PlanPoint, Scale};
use crate::interaction::{Phase, TakeoffInteraction, Tool};
use crate::measurement::{Measurement, MeasurementDraft};
use crate::plan::Plan;
use crate::store::{MeasurementStore, StoreError};

/// Error types for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no plan selected")]
    NoPlan,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// A measuring session over one plan
pub struct TakeoffSession<S: MeasurementStore> {
    store: S,
    scale: Scale,
    interaction: TakeoffInteraction,
    plan: Option<Plan>,
    /// In-memory view of the open plan's measurements, insertion order
    measurements: Vec<Measurement>,
}

impl<S: MeasurementStore> TakeoffSession<S> {
    /// Create a session over a backing store with a calibration scale
    pub fn new(store: S, scale: Scale) -> Self {
        Self {
            store,
            scale,
            interaction: TakeoffInteraction::new(),
            plan: None,
            measurements: Vec::new(),
        }
    }

    /// Open a plan and seed the view from the backing store
    ///
    /// Any in-progress gesture on a previously open plan is discarded.
    pub fn open_plan(&mut self, plan: Plan) -> SessionResult<()> {
        self.measurements = self.store.list_by_plan(plan.id)?;
        self.plan = Some(plan);
        self.interaction = TakeoffInteraction::new();
        Ok(())
    }

    /// Get the open plan
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Get the calibration scale
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Get the active tool
    pub fn tool(&self) -> Tool {
        self.interaction.tool()
    }

    /// Get the current drawing phase
    pub fn phase(&self) -> Phase {
        self.interaction.phase()
    }

    /// Committed measurements for the open plan, insertion order
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// In-progress point sequence
    pub fn draft_points(&self) -> &[PlanPoint] {
        self.interaction.points()
    }

    /// Live value of the in-progress gesture, available from two points on
    pub fn live_value(&self) -> Option<f32> {
        let kind = self.interaction.tool().kind()?;
        let points = self.interaction.points();
        if points.len() < 2 {
            return None;
        }
        Some(kind.measure(points, self.scale))
    }

    /// Whether pointer events are captured rather than passed through
    pub fn captures_pointer(&self) -> bool {
        self.interaction.captures_pointer()
    }

    pub fn handle_tool_change(&mut self, tool: Tool) {
        self.interaction.handle_tool_change(tool);
    }

    pub fn handle_pointer_down(&mut self, point: PlanPoint) {
        self.interaction.handle_pointer_down(point);
    }

    pub fn handle_pointer_move(&mut self, point: PlanPoint) {
        self.interaction.handle_pointer_move(point);
    }

    pub fn handle_click(&mut self, point: PlanPoint) {
        self.interaction.handle_click(point);
    }

    pub fn handle_pointer_up(&mut self) {
        self.interaction.handle_pointer_up();
    }

    /// Label and commit the completed gesture
    ///
    /// The draft is cleared optimistically on submit: if the store fails,
    /// the gesture is not restored and the user redraws. Returns `Ok(None)`
    /// when there is nothing to commit (no completed shape, or an empty
    /// label left the machine re-prompting).
    pub fn submit_label(&mut self, label: &str) -> SessionResult<Option<&Measurement>> {
        let plan_id = self.plan.as_ref().ok_or(SessionError::NoPlan)?.id;
        let Some(draw) = self.interaction.handle_label_submit(label) else {
            return Ok(None);
        };

        let draft =
            MeasurementDraft::measured(plan_id, draw.kind, draw.label, draw.points, self.scale);
        let stored = self.store.append(draft)?;
        self.measurements.push(stored);
        Ok(self.measurements.last())
    }
}
