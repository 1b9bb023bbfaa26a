pub mod mask;

pub use mask::{build_mask, Mask, MaskType, ScenePicker};

use std::sync::Arc;

use bitflags::bitflags;

use crate::engine::{
    EngineEvent, InteractorDescriptor, NativeBehavior, GLOBAL_INTERACTOR_WINDOW_ID,
    ROOT_INTERACTOR_ID,
};
use crate::geometry::{Point, ProjectedRect, Rect};

bitflags! {
    /// Interaction capabilities of an interactor. Flags are independent and
    /// OR-combinable: `ACTIVATABLE | GAZE_AWARE` is a valid combination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Behaviors: u8 {
        const ACTIVATABLE = 0x01;
        const ACTIVATABLE_TENTATIVE_FOCUS = 0x02;
        const GAZE_AWARE = 0x04;
        const GAZE_AWARE_INERTIA = 0x08;
    }
}

/// Attaches extra behavior descriptors to an interactor at snapshot-build
/// time. Arguments are the interactor id and the descriptor under
/// construction.
pub type BehaviorCallback = Arc<dyn Fn(&str, &mut InteractorDescriptor) + Send + Sync>;

/// Consumes events routed to an interactor. Runs on the engine's worker
/// threads: it must not touch scene objects, only write into handoff state
/// that the owning thread reads on its own schedule.
pub type EventHandler = Arc<dyn Fn(&str, &EngineEvent) + Send + Sync>;

/// An interactive region tied to a scene object. The owning thread registers
/// one while its object is active and re-registers it every tick with a
/// fresh location and mask; handlers are shared so registry copies are cheap.
#[derive(Clone)]
pub struct Interactor {
    id: String,
    parent_id: String,
    behaviors: Behaviors,
    pub location: ProjectedRect,
    pub mask: Option<Mask>,
    behavior_callback: Option<BehaviorCallback>,
    event_handler: EventHandler,
}

impl Interactor {
    pub fn new(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        behaviors: Behaviors,
        event_handler: EventHandler,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            behaviors,
            location: ProjectedRect::invalid(),
            mask: None,
            behavior_callback: None,
            event_handler,
        }
    }

    pub fn with_behavior_callback(mut self, callback: BehaviorCallback) -> Self {
        self.behavior_callback = Some(callback);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn behaviors(&self) -> Behaviors {
        self.behaviors
    }

    /// Tells whether the interactor intersects a rectangle in GUI
    /// coordinates. An invalid location never matches.
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.location.is_valid && self.location.rect.overlaps(rect)
    }

    pub fn handle_event(&self, event: &EngineEvent) {
        (self.event_handler)(&self.id, event);
    }

    /// Builds the engine-side descriptor: the GUI rectangle translated back
    /// into absolute screen coordinates, the mask when one is set, and one
    /// native behavior per set flag.
    pub fn descriptor(
        &self,
        window_id: &str,
        window_position: Point,
        gaze_aware_delay_ms: u64,
    ) -> InteractorDescriptor {
        let bounds = self
            .location
            .rect
            .translated(window_position.x, window_position.y);

        let mask = self
            .mask
            .clone()
            .filter(|mask| mask.mask_type() != MaskType::None);

        let mut behaviors = Vec::new();
        if self.behaviors.contains(Behaviors::ACTIVATABLE) {
            behaviors.push(NativeBehavior::Activatable {
                tentative_focus: false,
            });
        }
        if self.behaviors.contains(Behaviors::ACTIVATABLE_TENTATIVE_FOCUS) {
            behaviors.push(NativeBehavior::Activatable {
                tentative_focus: true,
            });
        }
        if self.behaviors.contains(Behaviors::GAZE_AWARE) {
            behaviors.push(NativeBehavior::GazeAware);
        }
        if self.behaviors.contains(Behaviors::GAZE_AWARE_INERTIA) {
            behaviors.push(NativeBehavior::GazeAwareDelayed {
                delay_ms: gaze_aware_delay_ms,
            });
        }

        let mut descriptor = InteractorDescriptor {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            window_id: window_id.to_string(),
            bounds: Some(bounds),
            z: self.location.relative_z,
            mask,
            behaviors,
            is_deleted: false,
        };

        if let Some(callback) = &self.behavior_callback {
            callback(&self.id, &mut descriptor);
        }

        descriptor
    }
}

/// An interactor not tied to any scene object: it represents a continuous
/// data stream (gaze or fixation samples) and is pushed to the engine
/// whenever it is registered or the connection is (re)established.
#[derive(Clone)]
pub struct GlobalInteractor {
    id: String,
    behavior_callback: Option<BehaviorCallback>,
    event_handler: EventHandler,
    pub marked_for_deletion: bool,
}

impl GlobalInteractor {
    pub fn new(
        id: impl Into<String>,
        behavior_callback: Option<BehaviorCallback>,
        event_handler: EventHandler,
    ) -> Self {
        Self {
            id: id.into(),
            behavior_callback,
            event_handler,
            marked_for_deletion: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle_event(&self, event: &EngineEvent) {
        (self.event_handler)(&self.id, event);
    }

    /// Builds the engine-side descriptor: boundless, parented to the root,
    /// under the reserved global window id.
    pub fn descriptor(&self) -> InteractorDescriptor {
        let mut descriptor = InteractorDescriptor {
            id: self.id.clone(),
            parent_id: ROOT_INTERACTOR_ID.to_string(),
            window_id: GLOBAL_INTERACTOR_WINDOW_ID.to_string(),
            bounds: None,
            z: 0.0,
            mask: None,
            behaviors: Vec::new(),
            is_deleted: self.marked_for_deletion,
        };

        if let Some(callback) = &self.behavior_callback {
            callback(&self.id, &mut descriptor);
        }

        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler() -> EventHandler {
        Arc::new(|_, _| {})
    }

    #[test]
    fn invalid_location_never_intersects() {
        let interactor = Interactor::new("a", ROOT_INTERACTOR_ID, Behaviors::GAZE_AWARE, noop_handler());
        let everything = Rect::new(-1e6, -1e6, 2e6, 2e6);
        assert!(!interactor.intersects(&everything));
    }

    #[test]
    fn descriptor_translates_bounds_to_absolute_coordinates() {
        let mut interactor =
            Interactor::new("a", ROOT_INTERACTOR_ID, Behaviors::GAZE_AWARE, noop_handler());
        interactor.location = ProjectedRect::valid(Rect::new(40.0, 25.0, 30.0, 30.0), 2.0);

        let descriptor = interactor.descriptor("0x12", Point::new(100.0, 50.0), 500);
        assert_eq!(descriptor.bounds, Some(Rect::new(140.0, 75.0, 30.0, 30.0)));
        assert_eq!(descriptor.z, 2.0);
        assert_eq!(descriptor.window_id, "0x12");
    }

    #[test]
    fn one_native_behavior_per_set_flag() {
        let mut interactor = Interactor::new(
            "a",
            ROOT_INTERACTOR_ID,
            Behaviors::ACTIVATABLE | Behaviors::GAZE_AWARE_INERTIA,
            noop_handler(),
        );
        interactor.location = ProjectedRect::valid(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);

        let descriptor = interactor.descriptor("w", Point::new(0.0, 0.0), 500);
        assert_eq!(
            descriptor.behaviors,
            vec![
                NativeBehavior::Activatable {
                    tentative_focus: false
                },
                NativeBehavior::GazeAwareDelayed { delay_ms: 500 },
            ]
        );
    }

    #[test]
    fn none_type_mask_is_never_attached() {
        let mut interactor =
            Interactor::new("a", ROOT_INTERACTOR_ID, Behaviors::GAZE_AWARE, noop_handler());
        interactor.location = ProjectedRect::valid(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        interactor.mask = Some(Mask::new(MaskType::None));

        let descriptor = interactor.descriptor("w", Point::new(0.0, 0.0), 500);
        assert!(descriptor.mask.is_none());
    }

    #[test]
    fn behavior_callback_extends_the_descriptor() {
        let mut interactor =
            Interactor::new("a", ROOT_INTERACTOR_ID, Behaviors::empty(), noop_handler())
                .with_behavior_callback(Arc::new(|_, descriptor| {
                    descriptor.behaviors.push(NativeBehavior::GazeAware);
                }));
        interactor.location = ProjectedRect::valid(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);

        let descriptor = interactor.descriptor("w", Point::new(0.0, 0.0), 500);
        assert_eq!(descriptor.behaviors, vec![NativeBehavior::GazeAware]);
    }

    #[test]
    fn global_descriptor_is_boundless_and_carries_the_deletion_flag() {
        let mut global = GlobalInteractor::new("stream", None, noop_handler());
        assert!(!global.descriptor().is_deleted);

        global.marked_for_deletion = true;
        let descriptor = global.descriptor();
        assert!(descriptor.is_deleted);
        assert!(descriptor.bounds.is_none());
        assert_eq!(descriptor.window_id, GLOBAL_INTERACTOR_WINDOW_ID);
        assert_eq!(descriptor.parent_id, ROOT_INTERACTOR_ID);
    }
}
