//! Zoom-end detection.
//!
//! The map widget zooms continuously; overlays react to whole zoom levels
//! once the gesture has settled.

/// Whole zoom level for a continuous zoom value.
pub fn zoom_level(zoom: f64) -> u8 {
    zoom.round().clamp(0.0, u8::MAX as f64) as u8
}

/// Emits a zoom level once the zoom has stopped changing and landed on a
/// level different from the last one emitted.
#[derive(Debug, Clone, Default)]
pub struct ZoomWatcher {
    last_zoom: Option<f64>,
    settled_level: Option<u8>,
}

impl ZoomWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the zoom value of the current frame.
    ///
    /// Returns the new level on the frame a zoom change settles.
    pub fn observe(&mut self, zoom: f64) -> Option<u8> {
        let unchanged = self.last_zoom == Some(zoom);
        self.last_zoom = Some(zoom);
        if !unchanged {
            return None;
        }

        let level = zoom_level(zoom);
        if self.settled_level == Some(level) {
            return None;
        }
        self.settled_level = Some(level);
        Some(level)
    }

    /// True while the latest zoom has not produced a settled level yet; the
    /// caller must keep repainting so the settle frame happens.
    pub fn is_settling(&self) -> bool {
        self.last_zoom.map(zoom_level) != self.settled_level
    }

    /// Last settled level, if any zoom has settled yet.
    pub fn settled_level(&self) -> Option<u8> {
        self.settled_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_level_rounds() {
        assert_eq!(zoom_level(5.4), 5);
        assert_eq!(zoom_level(5.5), 6);
        assert_eq!(zoom_level(-1.0), 0);
    }

    #[test]
    fn test_fires_once_after_settling() {
        let mut watcher = ZoomWatcher::new();
        // First frame only establishes the baseline
        assert_eq!(watcher.observe(3.0), None);
        assert_eq!(watcher.observe(3.0), Some(3));
        assert_eq!(watcher.observe(3.0), None);
        assert_eq!(watcher.settled_level(), Some(3));
    }

    #[test]
    fn test_waits_for_gesture_to_end() {
        let mut watcher = ZoomWatcher::new();
        watcher.observe(3.0);
        watcher.observe(3.0);

        assert_eq!(watcher.observe(3.4), None);
        assert_eq!(watcher.observe(4.2), None);
        assert_eq!(watcher.observe(5.7), None);
        assert!(watcher.is_settling());
        assert_eq!(watcher.observe(5.7), Some(6));
        assert!(!watcher.is_settling());
    }

    #[test]
    fn test_same_level_does_not_refire() {
        let mut watcher = ZoomWatcher::new();
        watcher.observe(6.0);
        watcher.observe(6.0);

        watcher.observe(6.3);
        assert_eq!(watcher.observe(6.3), None);
        assert_eq!(watcher.settled_level(), Some(6));
    }
}
