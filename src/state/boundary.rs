//! Zoom-dependent visibility of the country boundary overlay.
//!
//! Boundaries are hidden at continental zoom levels and shown once the
//! user zooms in past [`BOUNDARY_ZOOM_THRESHOLD`]. The rule is evaluated
//! on every settled zoom change; between evaluations the layer switcher
//! may override it.

use super::layer::ActiveOverlaySet;

/// Boundaries are hidden at this zoom level and below, shown above it.
pub const BOUNDARY_ZOOM_THRESHOLD: u8 = 5;

/// What a zoom change does to the boundary overlay's membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipDecision {
    /// Ensure the overlay is active
    Show,
    /// Ensure the overlay is not active
    Hide,
    /// Leave membership as it is (boundary data not loaded)
    Unchanged,
}

/// Transition function for a settled zoom level.
pub fn on_zoom_change(zoom: u8, boundary_loaded: bool) -> MembershipDecision {
    if !boundary_loaded {
        MembershipDecision::Unchanged
    } else if zoom > BOUNDARY_ZOOM_THRESHOLD {
        MembershipDecision::Show
    } else {
        MembershipDecision::Hide
    }
}

/// Holds the single piece of controller state: whether boundary data is in.
#[derive(Debug, Clone, Default)]
pub struct BoundaryController {
    loaded: bool,
}

impl BoundaryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Marks the boundary data as available. Never reset: the layer is
    /// immutable once loaded.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Evaluates the rule for a settled zoom level and updates `overlays`.
    pub fn handle_zoom(&self, zoom: u8, overlays: &mut ActiveOverlaySet) -> MembershipDecision {
        let decision = on_zoom_change(zoom, self.loaded);
        overlays.apply(decision);
        if decision != MembershipDecision::Unchanged {
            log::debug!("Zoom {}: boundaries {:?}", zoom, decision);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::layer::OverlayKind;

    #[test]
    fn test_threshold_is_inclusive_on_hide_side() {
        assert_eq!(on_zoom_change(5, true), MembershipDecision::Hide);
        assert_eq!(on_zoom_change(6, true), MembershipDecision::Show);
        assert_eq!(on_zoom_change(0, true), MembershipDecision::Hide);
        assert_eq!(on_zoom_change(20, true), MembershipDecision::Show);
    }

    #[test]
    fn test_not_loaded_is_a_no_op() {
        for zoom in 0..=20 {
            assert_eq!(on_zoom_change(zoom, false), MembershipDecision::Unchanged);
        }

        let controller = BoundaryController::new();
        let mut overlays = ActiveOverlaySet::new();
        controller.handle_zoom(10, &mut overlays);
        assert!(!overlays.contains(OverlayKind::Boundaries));
    }

    #[test]
    fn test_membership_iff_above_threshold_and_loaded() {
        let mut controller = BoundaryController::new();
        controller.mark_loaded();

        for zoom in 0..=20u8 {
            let mut overlays = ActiveOverlaySet::new();
            controller.handle_zoom(zoom, &mut overlays);
            assert_eq!(overlays.contains(OverlayKind::Boundaries), zoom > 5);
        }
    }

    #[test]
    fn test_repeated_toggling_depends_only_on_latest_zoom() {
        let mut controller = BoundaryController::new();
        controller.mark_loaded();
        let mut overlays = ActiveOverlaySet::new();
        overlays.add(OverlayKind::Stations);

        for zoom in [6, 6, 7, 5, 5, 4, 9, 9, 3, 8] {
            controller.handle_zoom(zoom, &mut overlays);
        }
        assert!(overlays.contains(OverlayKind::Boundaries));
        assert!(overlays.contains(OverlayKind::Stations));

        for zoom in [8, 2, 2] {
            controller.handle_zoom(zoom, &mut overlays);
        }
        assert!(!overlays.contains(OverlayKind::Boundaries));
        assert!(overlays.contains(OverlayKind::Stations));
    }

    #[test]
    fn test_zoom_in_and_back_out() {
        let mut controller = BoundaryController::new();
        controller.mark_loaded();
        let mut overlays = ActiveOverlaySet::new();

        controller.handle_zoom(3, &mut overlays);
        assert!(!overlays.contains(OverlayKind::Boundaries));

        controller.handle_zoom(6, &mut overlays);
        assert!(overlays.contains(OverlayKind::Boundaries));

        controller.handle_zoom(4, &mut overlays);
        assert!(!overlays.contains(OverlayKind::Boundaries));
    }
}
