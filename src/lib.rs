//! Bridges an application's interactive on-screen regions with an external
//! gaze-tracking engine process.
//!
//! The engine runs on its own worker threads: it asynchronously queries
//! spatial regions for interactors, and delivers interaction events back.
//! The owning thread registers, moves and removes interactors every frame.
//! [`host::GazeHost`] holds the thread-safe interactor repositories and
//! answers queries from them; [`streams::GazePointProvider`] manages shared
//! subscriptions to continuous gaze/fixation data streams.

pub mod engine;
pub mod geometry;
pub mod host;
pub mod interactor;
pub mod settings;
pub mod streams;

pub use engine::{
    CommitResult, ConnectionState, EngineEvent, EngineTransport, EventPayload, FixationPhase,
    Query, Snapshot, ROOT_INTERACTOR_ID,
};
pub use geometry::{Point, ProjectedRect, Rect};
pub use host::{GazeHost, WindowMetrics};
pub use interactor::{Behaviors, GlobalInteractor, Interactor, Mask, MaskType};
pub use settings::{HostSettings, SettingsStore};
pub use streams::{GazePoint, GazePointProvider, GazePointType};
