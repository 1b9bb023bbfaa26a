mod provider;
mod sample;

pub use provider::{GazePointProvider, GazePointType};
pub use sample::GazePoint;
