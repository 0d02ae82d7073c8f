// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close lifecycle of a selector surface.

use kurbo::{Point, Rect, Size};

use crate::{PlacementConfig, PlacementDecision, resolve};

/// A selector surface (dropdown panel, popover) anchored to a trigger.
///
/// The placement is computed once on every closed → open transition and
/// discarded on close; it does not track the trigger while open.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_placement::{Surface, Vertical};
///
/// let viewport = Size::new(1200.0, 800.0);
/// let trigger = Rect::new(500.0, 700.0, 620.0, 750.0);
/// let mut surface = Surface::default();
///
/// let decision = surface.open(trigger, viewport);
/// assert_eq!(decision.vertical, Vertical::Above);
///
/// // A press outside both the trigger and the panel dismisses it.
/// let panel = Rect::new(500.0, 400.0, 800.0, 700.0);
/// assert!(surface.on_pointer_down(Point::new(10.0, 10.0), trigger, panel));
/// assert!(!surface.is_open());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Surface {
    config: PlacementConfig,
    open: Option<PlacementDecision>,
}

impl Surface {
    /// Create a closed surface.
    #[must_use]
    pub const fn new(config: PlacementConfig) -> Self {
        Self { config, open: None }
    }

    /// Placement configuration.
    #[must_use]
    pub const fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Whether the surface is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Decision of the current open cycle.
    #[must_use]
    pub const fn decision(&self) -> Option<PlacementDecision> {
        self.open
    }

    /// Open the surface and return its placement.
    ///
    /// Opening an already open surface keeps the current decision.
    pub fn open(&mut self, trigger: Rect, viewport: Size) -> PlacementDecision {
        if let Some(decision) = self.open {
            return decision;
        }
        let decision = resolve(trigger, viewport, &self.config);
        tracing::debug!(
            vertical = ?decision.vertical,
            horizontal = ?decision.horizontal,
            "placement decided"
        );
        self.open = Some(decision);
        decision
    }

    /// Close the surface. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Flip between open and closed. Returns the new decision when opening.
    pub fn toggle(&mut self, trigger: Rect, viewport: Size) -> Option<PlacementDecision> {
        if self.close() {
            None
        } else {
            Some(self.open(trigger, viewport))
        }
    }

    /// Dismiss on a press outside the trigger and the panel.
    ///
    /// Returns `true` if the surface was open and is now closed. Presses on
    /// the trigger are left to the trigger's own toggle handling.
    pub fn on_pointer_down(&mut self, point: Point, trigger: Rect, panel: Rect) -> bool {
        if !self.is_open() || trigger.contains(point) || panel.contains(point) {
            return false;
        }
        tracing::trace!(x = point.x, y = point.y, "outside press dismissed surface");
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::Surface;
    use crate::{Horizontal, PlacementConfig, Vertical};

    const VIEWPORT: Size = Size::new(1200.0, 800.0);

    #[test]
    fn decision_is_fresh_per_open_cycle() {
        let mut surface = Surface::default();
        let low = Rect::new(500.0, 700.0, 620.0, 750.0);
        let high = Rect::new(500.0, 40.0, 620.0, 80.0);

        assert_eq!(surface.open(low, VIEWPORT).vertical, Vertical::Above);
        // Still open: the trigger moved but nothing is recomputed.
        assert_eq!(surface.open(high, VIEWPORT).vertical, Vertical::Above);

        assert!(surface.close());
        assert_eq!(surface.decision(), None);
        assert_eq!(surface.open(high, VIEWPORT).vertical, Vertical::Below);
    }

    #[test]
    fn toggle_alternates() {
        let mut surface = Surface::new(
            PlacementConfig::default().with_default_horizontal(Horizontal::Center),
        );
        let trigger = Rect::new(500.0, 40.0, 620.0, 80.0);
        let opened = surface.toggle(trigger, VIEWPORT).unwrap();
        assert_eq!(opened.horizontal, Horizontal::Center);
        assert!(surface.toggle(trigger, VIEWPORT).is_none());
        assert!(!surface.is_open());
        assert!(!surface.close());
    }

    #[test]
    fn presses_inside_do_not_dismiss() {
        let mut surface = Surface::default();
        let trigger = Rect::new(500.0, 40.0, 620.0, 80.0);
        let panel = Rect::new(500.0, 80.0, 800.0, 380.0);

        assert!(!surface.on_pointer_down(Point::new(0.0, 0.0), trigger, panel));

        surface.open(trigger, VIEWPORT);
        assert!(!surface.on_pointer_down(Point::new(510.0, 50.0), trigger, panel));
        assert!(!surface.on_pointer_down(Point::new(700.0, 200.0), trigger, panel));
        assert!(surface.is_open());
        assert!(surface.on_pointer_down(Point::new(900.0, 200.0), trigger, panel));
        assert!(!surface.is_open());
    }
}
