//! Takeoff interaction state machine
//!
//! Converts raw pointer events into completed measurement shapes. The
//! machine is independent of any UI framework: the caller feeds it
//! pointer-down/move/up events, clicks, tool changes and label submissions,
//! and reads back the phase and in-progress points for overlay projection.
//!
//! All transitions are synchronous and exactly one gesture is in flight at
//! a time.

use crate::geometry::PlanPoint;
use crate::measurement::MeasurementKind;

/// Active measuring tool
///
/// `Pan` is a pass-through mode: pointer events reach the underlying view
/// (scroll/zoom) instead of being captured for point placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pan,
    Length,
    Area,
}

impl Tool {
    /// Measurement kind produced by this tool, if any
    pub fn kind(&self) -> Option<MeasurementKind> {
        match self {
            Tool::Pan => None,
            Tool::Length => Some(MeasurementKind::Length),
            Tool::Area => Some(MeasurementKind::Area),
        }
    }
}

/// Drawing phase of the interaction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No gesture in progress
    #[default]
    Idle,
    /// Points are being placed; the trailing point tracks the cursor
    Drawing,
    /// Shape complete, waiting for a mandatory label
    AwaitingLabel,
}

/// A finished draw gesture with its label
///
/// Produced by `handle_label_submit`; the session turns it into a
/// measurement draft by computing the value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDraw {
    pub kind: MeasurementKind,
    pub label: String,
    pub points: Vec<PlanPoint>,
}

/// State machine turning pointer events into measurement shapes
#[derive(Debug, Default)]
pub struct TakeoffInteraction {
    tool: Tool,
    phase: Phase,
    points: Vec<PlanPoint>,
}

impl TakeoffInteraction {
    /// Create a new machine, idle with the pan tool selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the active tool
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// In-progress point sequence (empty outside a gesture)
    pub fn points(&self) -> &[PlanPoint] {
        &self.points
    }

    /// Whether pointer events are captured rather than passed through
    pub fn captures_pointer(&self) -> bool {
        self.tool != Tool::Pan
    }

    /// Switch tools, discarding any in-progress gesture
    pub fn handle_tool_change(&mut self, tool: Tool) {
        self.tool = tool;
        self.phase = Phase::Idle;
        self.points.clear();
    }

    /// Start a gesture by recording the first point
    ///
    /// Ignored for the pan tool and outside `Idle`: a shape awaiting its
    /// label must be submitted or abandoned via a tool change first.
    pub fn handle_pointer_down(&mut self, point: PlanPoint) {
        if self.tool == Tool::Pan || self.phase != Phase::Idle {
            return;
        }
        self.points.push(point);
        self.phase = Phase::Drawing;
    }

    /// Track the cursor with the trailing point
    pub fn handle_pointer_move(&mut self, point: PlanPoint) {
        if self.phase != Phase::Drawing {
            return;
        }
        match self.tool {
            Tool::Length => {
                // Segment end follows the cursor
                self.points.truncate(1);
                self.points.push(point);
            }
            Tool::Area => {
                // Only the most recently placed vertex moves; committed
                // vertices before it stay fixed
                if let Some(last) = self.points.last_mut() {
                    *last = point;
                }
            }
            Tool::Pan => {}
        }
    }

    /// Place an additional polygon vertex at the click location
    pub fn handle_click(&mut self, point: PlanPoint) {
        if self.phase == Phase::Drawing && self.tool == Tool::Area {
            self.points.push(point);
        }
    }

    /// Finish the gesture if enough points were placed, discard otherwise
    pub fn handle_pointer_up(&mut self) {
        if self.phase != Phase::Drawing {
            return;
        }
        let complete = self
            .tool
            .kind()
            .is_some_and(|kind| kind.accepts_point_count(self.points.len()));
        if complete {
            self.phase = Phase::AwaitingLabel;
        } else {
            self.points.clear();
            self.phase = Phase::Idle;
        }
    }

    /// Attach the mandatory label and emit the completed shape
    ///
    /// An empty or whitespace label is rejected locally: the machine stays
    /// in `AwaitingLabel` with the points intact and the caller re-prompts.
    /// On success the draft sequence is cleared and the machine returns to
    /// `Idle`.
    pub fn handle_label_submit(&mut self, label: &str) -> Option<CompletedDraw> {
        if self.phase != Phase::AwaitingLabel {
            return None;
        }
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let kind = self.tool.kind()?;
        let points = std::mem::take(&mut self.points);
        self.phase = Phase::Idle;
        Some(CompletedDraw { kind, label: label.to_string(), points })
    }
}
