use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;

/// Connectivity of the engine as reported through its notification channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Outcome of an asynchronous snapshot commit, delivered through the
/// completion callback on an unspecified thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    Ok,
    /// The engine rejected the snapshot as malformed.
    InvalidSnapshot { message: Option<String> },
    /// Any other non-ok result.
    Failed { message: Option<String> },
}

/// Single-shot completion notification for a commit. The core never blocks
/// waiting for it; no cancellation is needed.
pub type CommitCallback = Box<dyn FnOnce(CommitResult) + Send + 'static>;

/// The gaze engine's connection library, treated as a black box. Queries,
/// events and connection-state notifications flow the other way: the
/// embedding invokes the corresponding `GazeHost` entry points from the
/// engine's worker threads.
pub trait EngineTransport: Send + Sync {
    /// Initializes the engine connection. Connectivity itself arrives later
    /// via a `ConnectionState` notification.
    fn connect(&self) -> Result<()>;

    /// Releases engine resources. Best-effort and synchronous; no timeout is
    /// imposed here.
    fn shutdown(&self) -> Result<()>;

    /// Sends a snapshot to the engine. Returns as soon as the transmission
    /// is queued; the outcome arrives through `on_complete`, if given.
    fn commit_snapshot(&self, snapshot: Snapshot, on_complete: Option<CommitCallback>)
        -> Result<()>;
}
