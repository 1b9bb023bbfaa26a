use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::engine::{
    CommitResult, ConnectionState, EngineEvent, EngineTransport, Query, Snapshot,
};
use crate::interactor::{GlobalInteractor, Interactor};
use crate::settings::HostSettings;

use super::window::{WindowMetrics, WindowTracker};

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    pub state: ConnectionState,
    pub changed_at: DateTime<Utc>,
}

struct Registries {
    interactors: HashMap<String, Interactor>,
    globals: HashMap<String, GlobalInteractor>,
}

/// The main point of contact with the gaze engine. Holds the interactor
/// repositories and answers engine queries from them.
///
/// Threading: the owning thread drives `tick` and the registry mutations;
/// `handle_query`, `handle_event` and `connection_state_changed` are invoked
/// by the embedding from the engine's worker threads, concurrently with the
/// owning thread and with each other. One mutex guards both registries and
/// is never held across filtering, handler invocation, or a commit.
pub struct GazeHost {
    transport: Arc<dyn EngineTransport>,
    window: WindowTracker,
    settings: HostSettings,
    registries: Mutex<Registries>,
    connected: AtomicBool,
    connection: Mutex<ConnectionInfo>,
}

impl GazeHost {
    pub fn new(
        transport: Arc<dyn EngineTransport>,
        window_metrics: Arc<dyn WindowMetrics>,
        window_id: impl Into<String>,
        settings: HostSettings,
    ) -> Self {
        Self {
            transport,
            window: WindowTracker::new(window_metrics, window_id),
            settings,
            registries: Mutex::new(Registries {
                interactors: HashMap::new(),
                globals: HashMap::new(),
            }),
            connected: AtomicBool::new(false),
            connection: Mutex::new(ConnectionInfo {
                state: ConnectionState::Disconnected,
                changed_at: Utc::now(),
            }),
        }
    }

    /// Initializes the engine connection. A failure here leaves the
    /// application running with gaze input disabled; the caller decides
    /// whether that is acceptable.
    pub fn init(&self) -> Result<()> {
        self.transport
            .connect()
            .context("gaze engine initialization failed")?;
        info!("gaze engine initialization succeeded");
        Ok(())
    }

    /// Releases engine resources, best-effort and synchronous.
    pub fn shutdown(&self) -> Result<()> {
        self.transport
            .shutdown()
            .context("gaze engine shutdown failed")?;
        info!("gaze engine shutdown finished");
        Ok(())
    }

    /// Refreshes the cached window position, in case the window has been
    /// moved or resized. Call once per owning-thread loop iteration; query
    /// answers are only valid for the interval between ticks.
    pub fn tick(&self) {
        self.window.refresh();
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn connection_info(&self) -> ConnectionInfo {
        self.connection.lock().unwrap().clone()
    }

    /// Registers an interactor, replacing any previous registration under
    /// the same id. No commit happens here: per-object interactors are only
    /// transmitted in response to queries.
    pub fn register_interactor(&self, interactor: Interactor) {
        let mut registries = self.registries.lock().unwrap();
        registries
            .interactors
            .insert(interactor.id().to_string(), interactor);
    }

    pub fn interactor(&self, interactor_id: &str) -> Option<Interactor> {
        let registries = self.registries.lock().unwrap();
        registries.interactors.get(interactor_id).cloned()
    }

    pub fn unregister_interactor(&self, interactor_id: &str) {
        let mut registries = self.registries.lock().unwrap();
        registries.interactors.remove(interactor_id);
    }

    /// Registers a global interactor. If the engine is connected it is
    /// pushed immediately; otherwise it rides along in the bulk commit on
    /// the next Connected transition.
    pub fn register_global_interactor(&self, interactor: GlobalInteractor) {
        {
            let mut registries = self.registries.lock().unwrap();
            registries
                .globals
                .insert(interactor.id().to_string(), interactor.clone());
        }

        if self.is_connected() {
            self.commit_global_interactors(vec![interactor]);
        }
    }

    pub fn global_interactor(&self, interactor_id: &str) -> Option<GlobalInteractor> {
        let registries = self.registries.lock().unwrap();
        registries.globals.get(interactor_id).cloned()
    }

    /// Removes a global interactor and, when connected, commits a snapshot
    /// signaling its deletion to the engine.
    pub fn unregister_global_interactor(&self, interactor_id: &str) {
        let removed = {
            let mut registries = self.registries.lock().unwrap();
            registries.globals.remove(interactor_id)
        };

        if let Some(mut interactor) = removed {
            if self.is_connected() {
                interactor.marked_for_deletion = true;
                self.commit_global_interactors(vec![interactor]);
            }
        }
    }

    /// Engine connectivity notification. On (re)connection, all currently
    /// registered global interactors are committed in a single snapshot;
    /// per-object interactors are never pushed proactively, the engine
    /// queries for them once connected. On disconnection the registries are
    /// left intact so a later reconnect can re-establish the streams.
    pub fn connection_state_changed(&self, state: ConnectionState) {
        info!("gaze engine connection state is now {state:?}");

        {
            let mut connection = self.connection.lock().unwrap();
            *connection = ConnectionInfo {
                state,
                changed_at: Utc::now(),
            };
        }

        if state == ConnectionState::Connected {
            // Flag first, then copy: incremental commits racing with this
            // transition can only observe the flag after the copy baseline.
            self.connected.store(true, Ordering::Release);

            let globals: Vec<GlobalInteractor> = {
                let registries = self.registries.lock().unwrap();
                registries.globals.values().cloned().collect()
            };

            if !globals.is_empty() {
                self.commit_global_interactors(globals);
            }
        } else {
            self.connected.store(false, Ordering::Release);
        }
    }

    /// Answers an engine spatial query. Runs on a worker thread and must not
    /// touch any scene state; everything it needs is in the registries and
    /// the window cache.
    pub fn handle_query(&self, query: &Query) {
        if let Some(reported) = query.window_ids.first() {
            self.window.adopt_window_id(reported);
        }

        let Some(window_position) = self.window.position() else {
            // No valid window position yet; leave the query unanswered. The
            // next tick repopulates the cache.
            return;
        };

        let query_rect = query
            .bounds
            .translated(-window_position.x, -window_position.y);

        let interactors: Vec<Interactor> = {
            let registries = self.registries.lock().unwrap();
            registries.interactors.values().cloned().collect()
        };

        let window_id = self.window.window_id();
        let delay_ms = self.settings.gaze_aware_delay_ms;

        let mut snapshot = Snapshot::for_query(query, &window_id);
        for interactor in &interactors {
            if interactor.intersects(&query_rect) {
                snapshot.push(interactor.descriptor(&window_id, window_position, delay_ms));
            }
        }

        if let Err(err) = self
            .transport
            .commit_snapshot(snapshot, Some(Box::new(log_commit_result)))
        {
            warn!("query response commit failed: {err:#}");
        }
    }

    /// Routes an engine event to the interactor it addresses, trying the
    /// per-object registry first, then the globals. Events for unknown ids
    /// are dropped. The handler is invoked with the registry lock released.
    pub fn handle_event(&self, event: &EngineEvent) {
        enum Target {
            Interactor(Interactor),
            Global(GlobalInteractor),
        }

        let target = {
            let registries = self.registries.lock().unwrap();
            registries
                .interactors
                .get(&event.interactor_id)
                .cloned()
                .map(Target::Interactor)
                .or_else(|| {
                    registries
                        .globals
                        .get(&event.interactor_id)
                        .cloned()
                        .map(Target::Global)
                })
        };

        match target {
            Some(Target::Interactor(interactor)) => interactor.handle_event(event),
            Some(Target::Global(global)) => global.handle_event(event),
            None => {}
        }
    }

    /// Builds one snapshot containing the given global interactors and
    /// commits it. Failures are logged, never propagated: a later commit
    /// (next stream start/stop or reconnect) refreshes engine-side state.
    fn commit_global_interactors(&self, globals: Vec<GlobalInteractor>) {
        let mut snapshot = Snapshot::for_global_interactors();
        for global in &globals {
            snapshot.push(global.descriptor());
        }

        if let Err(err) = self
            .transport
            .commit_snapshot(snapshot, Some(Box::new(log_commit_result)))
        {
            warn!("global interactor commit failed: {err:#}");
        }
    }
}

fn log_commit_result(result: CommitResult) {
    match result {
        CommitResult::Ok => {}
        CommitResult::InvalidSnapshot { message } => warn!(
            "snapshot validation failed: {}",
            message.as_deref().unwrap_or("unspecified error")
        ),
        CommitResult::Failed { message } => warn!(
            "could not commit snapshot: {}",
            message.as_deref().unwrap_or("unspecified error")
        ),
    }
}
