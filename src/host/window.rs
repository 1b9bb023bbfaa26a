use std::sync::{Arc, Mutex};

use log::info;

use crate::geometry::Point;

/// Platform access to window geometry. The window id is an opaque platform
/// handle represented as a string.
pub trait WindowMetrics: Send + Sync {
    /// Screen-space position of the window's client-area origin, or `None`
    /// when it cannot be determined right now.
    fn window_position(&self, window_id: &str) -> Option<Point>;
}

struct WindowCache {
    window_id: String,
    position: Option<Point>,
}

/// Caches the application window's id and screen position. The owning thread
/// refreshes the position once per tick; the query handler reads it and may
/// adopt a different window id reported by the engine, which invalidates the
/// position until the next refresh.
pub struct WindowTracker {
    metrics: Arc<dyn WindowMetrics>,
    cache: Mutex<WindowCache>,
}

impl WindowTracker {
    /// The position starts out unknown; queries cannot be answered until the
    /// first `refresh`.
    pub fn new(metrics: Arc<dyn WindowMetrics>, window_id: impl Into<String>) -> Self {
        Self {
            metrics,
            cache: Mutex::new(WindowCache {
                window_id: window_id.into(),
                position: None,
            }),
        }
    }

    /// Re-reads the window position, in case the window has been moved or
    /// resized. Called once per owning-thread tick.
    pub fn refresh(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.position = self.metrics.window_position(&cache.window_id);
    }

    pub fn window_id(&self) -> String {
        self.cache.lock().unwrap().window_id.clone()
    }

    pub fn position(&self) -> Option<Point> {
        self.cache.lock().unwrap().position
    }

    /// Switches to the window id the engine reports when it differs from the
    /// cached one, invalidating the cached position. Returns whether a
    /// switch happened. The initial id is taken from whichever window was in
    /// the foreground at startup, which is usually right but not always.
    pub fn adopt_window_id(&self, window_id: &str) -> bool {
        let mut cache = self.cache.lock().unwrap();
        if cache.window_id == window_id {
            return false;
        }

        info!(
            "window id mismatch: queried for {}, expected {}; adjusting",
            window_id, cache.window_id
        );
        cache.window_id = window_id.to_string();
        cache.position = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedMetrics(HashMap<String, Point>);

    impl WindowMetrics for FixedMetrics {
        fn window_position(&self, window_id: &str) -> Option<Point> {
            self.0.get(window_id).copied()
        }
    }

    fn metrics() -> Arc<FixedMetrics> {
        let mut positions = HashMap::new();
        positions.insert("0x12".to_string(), Point::new(100.0, 50.0));
        positions.insert("0xAB".to_string(), Point::new(10.0, 20.0));
        Arc::new(FixedMetrics(positions))
    }

    #[test]
    fn position_is_unknown_until_first_refresh() {
        let tracker = WindowTracker::new(metrics(), "0x12");
        assert!(tracker.position().is_none());

        tracker.refresh();
        assert_eq!(tracker.position(), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn adopting_a_new_window_id_invalidates_the_position() {
        let tracker = WindowTracker::new(metrics(), "0x12");
        tracker.refresh();

        assert!(tracker.adopt_window_id("0xAB"));
        assert_eq!(tracker.window_id(), "0xAB");
        assert!(tracker.position().is_none());

        // The next tick restores normal operation under the new id.
        tracker.refresh();
        assert_eq!(tracker.position(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn adopting_the_same_id_is_a_no_op() {
        let tracker = WindowTracker::new(metrics(), "0x12");
        tracker.refresh();

        assert!(!tracker.adopt_window_id("0x12"));
        assert_eq!(tracker.position(), Some(Point::new(100.0, 50.0)));
    }
}
