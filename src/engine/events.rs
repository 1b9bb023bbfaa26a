use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// An engine-initiated request for the interactors intersecting a spatial
/// region. Bounds are in absolute screen coordinates; the reported window
/// ids tell which window the engine believes it is querying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub window_ids: Vec<String>,
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixationPhase {
    Begin,
    Data,
    End,
}

/// One behavior-specific payload inside an engine event. Coordinates are in
/// device/screen space; timestamps are monotonic milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    GazePoint {
        x: f32,
        y: f32,
        timestamp: f64,
    },
    Fixation {
        phase: FixationPhase,
        x: f32,
        y: f32,
        timestamp: f64,
    },
    ActivationFocusChanged {
        has_tentative_focus: bool,
        has_activation_focus: bool,
    },
    Activated,
    GazeAware {
        has_gaze: bool,
    },
}

/// An asynchronous event from the engine, addressed to one interactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub interactor_id: String,
    pub payloads: Vec<EventPayload>,
}

impl EngineEvent {
    pub fn new(interactor_id: impl Into<String>, payloads: Vec<EventPayload>) -> Self {
        Self {
            interactor_id: interactor_id.into(),
            payloads,
        }
    }
}
