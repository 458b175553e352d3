//! Layer visibility state.

use super::boundary::MembershipDecision;
use crate::geo::BaseLayer;
use std::collections::BTreeSet;

/// Toggleable overlays drawn on top of the base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayKind {
    /// Station markers plus user-drawn shapes
    Stations,
    /// Country boundary outlines
    Boundaries,
}

impl OverlayKind {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayKind::Stations => "Weather Stations",
            OverlayKind::Boundaries => "Country Boundaries",
        }
    }
}

/// Overlays currently rendered.
///
/// Adding a present overlay or removing an absent one is a no-op, so
/// callers never have to check membership first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOverlaySet {
    members: BTreeSet<OverlayKind>,
}

impl ActiveOverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: OverlayKind) -> bool {
        self.members.contains(&kind)
    }

    /// Returns true if the overlay was not active before.
    pub fn add(&mut self, kind: OverlayKind) -> bool {
        self.members.insert(kind)
    }

    /// Returns true if the overlay was active before.
    pub fn remove(&mut self, kind: OverlayKind) -> bool {
        self.members.remove(&kind)
    }

    pub fn set(&mut self, kind: OverlayKind, active: bool) {
        if active {
            self.add(kind);
        } else {
            self.remove(kind);
        }
    }

    /// Applies a boundary visibility decision.
    pub fn apply(&mut self, decision: MembershipDecision) {
        match decision {
            MembershipDecision::Show => self.set(OverlayKind::Boundaries, true),
            MembershipDecision::Hide => self.set(OverlayKind::Boundaries, false),
            MembershipDecision::Unchanged => {}
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.members.len()
    }
}

/// State for the layer switcher.
#[derive(Debug, Clone)]
pub struct LayerState {
    /// Selected background layer
    pub base: BaseLayer,
    /// Overlays currently shown
    pub active: ActiveOverlaySet,
}

impl Default for LayerState {
    fn default() -> Self {
        // Stations are on from the start; boundaries wait for the zoom rule
        let mut active = ActiveOverlaySet::new();
        active.add(OverlayKind::Stations);
        Self {
            base: BaseLayer::default(),
            active,
        }
    }
}
