pub mod events;
pub mod snapshot;
pub mod transport;

pub use events::{EngineEvent, EventPayload, FixationPhase, Query};
pub use snapshot::{
    FixationDataMode, GazePointDataMode, InteractorDescriptor, NativeBehavior, Snapshot,
    GLOBAL_INTERACTOR_WINDOW_ID, ROOT_INTERACTOR_ID,
};
pub use transport::{CommitCallback, CommitResult, ConnectionState, EngineTransport};
