use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::engine::{
    EngineEvent, EventPayload, FixationDataMode, FixationPhase, GazePointDataMode, NativeBehavior,
};
use crate::host::GazeHost;
use crate::interactor::{BehaviorCallback, EventHandler, GlobalInteractor};

use super::sample::GazePoint;

/// The gaze and fixation data streams the engine can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GazePointType {
    GazeUnfiltered,
    GazeLightlyFiltered,
    FixationSlow,
    FixationSensitive,
}

impl fmt::Display for GazePointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GazePointType::GazeUnfiltered => "GazeUnfiltered",
            GazePointType::GazeLightlyFiltered => "GazeLightlyFiltered",
            GazePointType::FixationSlow => "FixationSlow",
            GazePointType::FixationSensitive => "FixationSensitive",
        };
        f.write_str(name)
    }
}

impl GazePointType {
    /// Deterministic interactor id for this stream kind. At most one global
    /// interactor per kind exists at any time, so the id doubles as the
    /// registry key.
    pub fn interactor_id(self) -> String {
        format!("gaze-stream.{self}")
    }

    fn native_behavior(self) -> NativeBehavior {
        match self {
            GazePointType::GazeUnfiltered => NativeBehavior::GazePointData {
                mode: GazePointDataMode::Unfiltered,
            },
            GazePointType::GazeLightlyFiltered => NativeBehavior::GazePointData {
                mode: GazePointDataMode::LightlyFiltered,
            },
            GazePointType::FixationSlow => NativeBehavior::FixationData {
                mode: FixationDataMode::Slow,
            },
            GazePointType::FixationSensitive => NativeBehavior::FixationData {
                mode: FixationDataMode::Sensitive,
            },
        }
    }
}

/// Worker-thread-written handoff state for one stream. The owning thread
/// only reads: the sample is last-write-wins ("most recent observed", not a
/// strict sequence) and the fixation counter is a plain atomic.
struct StreamState {
    last: Mutex<GazePoint>,
    fixation_count: AtomicU32,
}

struct GazeDataStream {
    usage_count: u32,
    state: Arc<StreamState>,
}

/// Manages shared, reference-counted subscriptions to gaze and fixation data
/// streams and caches the most recent sample per stream.
///
/// Recommended usage: call `last_gaze_point` from the owning thread on its
/// own cadence; the engine's worker threads keep the cache fresh.
pub struct GazePointProvider {
    host: Arc<GazeHost>,
    streams: Mutex<HashMap<GazePointType, GazeDataStream>>,
}

impl GazePointProvider {
    pub fn new(host: Arc<GazeHost>) -> Self {
        Self {
            host,
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Starts streaming data of the given kind, or joins the existing
    /// subscription. The first subscriber registers a global interactor with
    /// the host; the engine starts delivering once connected.
    pub fn start_streaming(&self, kind: GazePointType) {
        let mut streams = self.streams.lock().unwrap();

        if let Some(stream) = streams.get_mut(&kind) {
            stream.usage_count += 1;
            return;
        }

        let state = Arc::new(StreamState {
            last: Mutex::new(GazePoint::INVALID),
            fixation_count: AtomicU32::new(0),
        });

        let behavior = kind.native_behavior();
        let behavior_callback: BehaviorCallback = Arc::new(move |_, descriptor| {
            descriptor.behaviors.push(behavior.clone());
        });

        let handler_state = Arc::clone(&state);
        let event_handler: EventHandler = Arc::new(move |_, event| {
            handle_stream_event(&handler_state, event);
        });

        let interactor =
            GlobalInteractor::new(kind.interactor_id(), Some(behavior_callback), event_handler);
        self.host.register_global_interactor(interactor);

        streams.insert(
            kind,
            GazeDataStream {
                usage_count: 1,
                state,
            },
        );
    }

    /// Drops one subscription to the given kind. The last subscriber
    /// unregisters the global interactor, which signals the deletion to the
    /// engine when connected. Unknown kinds are a no-op.
    pub fn stop_streaming(&self, kind: GazePointType) {
        let mut streams = self.streams.lock().unwrap();

        let Some(stream) = streams.get_mut(&kind) else {
            return;
        };

        if stream.usage_count > 1 {
            stream.usage_count -= 1;
        } else {
            streams.remove(&kind);
            self.host.unregister_global_interactor(&kind.interactor_id());
        }
    }

    /// The most recent sample observed on the stream, or the invalid
    /// sentinel when the kind is not currently streaming.
    pub fn last_gaze_point(&self, kind: GazePointType) -> GazePoint {
        let streams = self.streams.lock().unwrap();
        match streams.get(&kind) {
            Some(stream) => *stream.state.last.lock().unwrap(),
            None => GazePoint::INVALID,
        }
    }

    /// The number of fixations begun since the stream started, or `None`
    /// when the kind is not currently streaming.
    pub fn fixation_count(&self, kind: GazePointType) -> Option<u32> {
        let streams = self.streams.lock().unwrap();
        streams
            .get(&kind)
            .map(|stream| stream.state.fixation_count.load(Ordering::Acquire))
    }

    /// Current subscriber count for a kind. Zero when not streaming.
    pub fn usage_count(&self, kind: GazePointType) -> u32 {
        let streams = self.streams.lock().unwrap();
        streams.get(&kind).map_or(0, |stream| stream.usage_count)
    }
}

/// Runs on the engine's worker thread: stores the data in handoff state that
/// the owning thread reads on its own schedule, and nothing else.
fn handle_stream_event(state: &StreamState, event: &EngineEvent) {
    for payload in &event.payloads {
        match payload {
            EventPayload::GazePoint { x, y, timestamp } => {
                *state.last.lock().unwrap() = GazePoint::new(*x, *y, *timestamp);
            }
            EventPayload::Fixation {
                phase: FixationPhase::Begin,
                ..
            } => {
                state.fixation_count.fetch_add(1, Ordering::AcqRel);
            }
            EventPayload::Fixation {
                phase: FixationPhase::Data,
                x,
                y,
                timestamp,
            } => {
                *state.last.lock().unwrap() = GazePoint::new(*x, *y, *timestamp);
            }
            EventPayload::Fixation {
                phase: FixationPhase::End,
                ..
            } => {
                // Observed but not recorded.
            }
            _ => {}
        }
    }
}
