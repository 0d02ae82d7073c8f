// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement rule.

use kurbo::{Rect, Size};

/// Vertical side of the trigger the surface opens on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Vertical {
    /// The surface's bottom edge meets the trigger's top edge.
    Above,
    /// The surface's top edge meets the trigger's bottom edge.
    Below,
}

/// Horizontal alignment of the surface against the trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Horizontal {
    /// Left edges aligned; the surface extends rightwards.
    #[default]
    Left,
    /// Right edges aligned; the surface extends leftwards.
    Right,
    /// Centers aligned.
    Center,
}

/// Where a selector surface renders for one open cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacementDecision {
    /// Side of the trigger.
    pub vertical: Vertical,
    /// Alignment against the trigger.
    pub horizontal: Horizontal,
}

/// Placement tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Minimum room, in viewport units, the surface wants on its side of the
    /// trigger, and the distance from a viewport edge at which the surface
    /// aligns to that edge.
    pub edge_threshold: f64,
    /// Alignment used when neither horizontal edge is close.
    pub default_horizontal: Horizontal,
}

impl PlacementConfig {
    /// Default edge threshold.
    pub const DEFAULT_EDGE_THRESHOLD: f64 = 200.0;

    /// Replace the edge threshold.
    #[must_use]
    pub const fn with_edge_threshold(mut self, edge_threshold: f64) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }

    /// Replace the fallback alignment.
    #[must_use]
    pub const fn with_default_horizontal(mut self, horizontal: Horizontal) -> Self {
        self.default_horizontal = horizontal;
        self
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            edge_threshold: Self::DEFAULT_EDGE_THRESHOLD,
            default_horizontal: Horizontal::Left,
        }
    }
}

/// Decide where a surface opened from `trigger` renders.
///
/// `trigger` is in viewport coordinates (origin at the viewport's top-left
/// corner) and `viewport` is the visible size.
///
/// - Vertical: [`Vertical::Below`] unless the room below the trigger is under
///   the threshold *and* the room above is larger.
/// - Horizontal: [`Horizontal::Left`] if the trigger's left edge is closer than
///   the threshold to the viewport's left edge, else [`Horizontal::Right`] if
///   its right edge is that close to the viewport's right edge, else the
///   configured default. The left check wins when both hold.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{PlacementConfig, Vertical, resolve};
///
/// let viewport = Size::new(1200.0, 800.0);
/// // 50 units of room below, 700 above.
/// let trigger = Rect::new(500.0, 700.0, 620.0, 750.0);
/// let decision = resolve(trigger, viewport, &PlacementConfig::default());
/// assert_eq!(decision.vertical, Vertical::Above);
/// ```
#[must_use]
pub fn resolve(trigger: Rect, viewport: Size, config: &PlacementConfig) -> PlacementDecision {
    let threshold = config.edge_threshold;

    let below = viewport.height - trigger.y1;
    let above = trigger.y0;
    let vertical = if below < threshold && above > below {
        Vertical::Above
    } else {
        Vertical::Below
    };

    let horizontal = if trigger.x0 < threshold {
        Horizontal::Left
    } else if viewport.width - trigger.x1 < threshold {
        Horizontal::Right
    } else {
        config.default_horizontal
    };

    PlacementDecision {
        vertical,
        horizontal,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{Horizontal, PlacementConfig, PlacementDecision, Vertical, resolve};

    const VIEWPORT: Size = Size::new(1200.0, 800.0);

    fn place(trigger: Rect) -> PlacementDecision {
        resolve(trigger, VIEWPORT, &PlacementConfig::default())
    }

    #[test]
    fn opens_above_near_the_bottom() {
        let decision = place(Rect::new(500.0, 700.0, 620.0, 750.0));
        assert_eq!(decision.vertical, Vertical::Above);
    }

    #[test]
    fn stays_below_when_above_is_no_better() {
        // A tall trigger in a short viewport: 20 below, 10 above.
        let short = Size::new(1200.0, 100.0);
        let decision = resolve(
            Rect::new(500.0, 10.0, 620.0, 80.0),
            short,
            &PlacementConfig::default(),
        );
        assert_eq!(decision.vertical, Vertical::Below);
        // Plenty of room below.
        assert_eq!(place(Rect::new(500.0, 40.0, 620.0, 80.0)).vertical, Vertical::Below);
        // Exactly the threshold below is enough.
        assert_eq!(place(Rect::new(500.0, 560.0, 620.0, 600.0)).vertical, Vertical::Below);
    }

    #[test]
    fn aligns_to_a_close_viewport_edge() {
        assert_eq!(place(Rect::new(40.0, 0.0, 160.0, 40.0)).horizontal, Horizontal::Left);
        assert_eq!(place(Rect::new(1050.0, 0.0, 1150.0, 40.0)).horizontal, Horizontal::Right);
    }

    #[test]
    fn keeps_the_default_away_from_edges() {
        let config = PlacementConfig::default().with_default_horizontal(Horizontal::Center);
        let decision = resolve(Rect::new(500.0, 0.0, 620.0, 40.0), VIEWPORT, &config);
        assert_eq!(decision.horizontal, Horizontal::Center);
        assert_eq!(place(Rect::new(500.0, 0.0, 620.0, 40.0)).horizontal, Horizontal::Left);
    }

    #[test]
    fn left_wins_when_both_edges_are_close() {
        let narrow = Size::new(300.0, 800.0);
        let config = PlacementConfig::default().with_default_horizontal(Horizontal::Right);
        let decision = resolve(Rect::new(100.0, 0.0, 200.0, 40.0), narrow, &config);
        assert_eq!(decision.horizontal, Horizontal::Left);
    }

    #[test]
    fn threshold_is_configurable() {
        let config = PlacementConfig::default().with_edge_threshold(20.0);
        let decision = resolve(Rect::new(40.0, 700.0, 160.0, 750.0), VIEWPORT, &config);
        assert_eq!(
            decision,
            PlacementDecision {
                vertical: Vertical::Below,
                horizontal: Horizontal::Left,
            }
        );
    }
}
