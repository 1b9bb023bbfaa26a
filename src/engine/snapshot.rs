use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::interactor::mask::Mask;

use super::events::Query;

/// Parent id for interactors without a parent.
pub const ROOT_INTERACTOR_ID: &str = "_root";

/// Window id used for global interactors, which are not tied to any window.
pub const GLOBAL_INTERACTOR_WINDOW_ID: &str = "_global";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GazePointDataMode {
    Unfiltered,
    LightlyFiltered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixationDataMode {
    Slow,
    Sensitive,
}

/// A behavior descriptor in the engine's own vocabulary. One entry is added
/// per set behavior flag, plus whatever a custom behavior callback attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeBehavior {
    Activatable { tentative_focus: bool },
    GazeAware,
    GazeAwareDelayed { delay_ms: u64 },
    GazePointData { mode: GazePointDataMode },
    FixationData { mode: FixationDataMode },
}

/// One interactor as transmitted to the engine. Bounds are in absolute
/// screen coordinates; `None` means boundless (global interactors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractorDescriptor {
    pub id: String,
    pub parent_id: String,
    pub window_id: String,
    pub bounds: Option<Rect>,
    pub z: f32,
    pub mask: Option<Mask>,
    pub behaviors: Vec<NativeBehavior>,
    pub is_deleted: bool,
}

/// An ephemeral transmission unit: the interactors sent to the engine in one
/// commit. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub window_ids: Vec<String>,
    pub bounds: Option<Rect>,
    pub interactors: Vec<InteractorDescriptor>,
}

impl Snapshot {
    /// A snapshot carrying global interactors only: boundless, with the
    /// reserved global window id.
    pub fn for_global_interactors() -> Self {
        Self {
            window_ids: vec![GLOBAL_INTERACTOR_WINDOW_ID.to_string()],
            bounds: None,
            interactors: Vec::new(),
        }
    }

    /// A snapshot answering a spatial query: bounds echo the query's bounds.
    pub fn for_query(query: &Query, window_id: &str) -> Self {
        Self {
            window_ids: vec![window_id.to_string()],
            bounds: Some(query.bounds),
            interactors: Vec::new(),
        }
    }

    pub fn push(&mut self, descriptor: InteractorDescriptor) {
        self.interactors.push(descriptor);
    }
}
