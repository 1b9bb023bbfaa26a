mod controller;
mod window;

pub use controller::{ConnectionInfo, GazeHost};
pub use window::{WindowMetrics, WindowTracker};
