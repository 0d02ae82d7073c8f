// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: where a selector surface opens relative to its trigger.
//!
//! A dropdown or popover panel is anchored to the element that opened it. This crate decides,
//! from the trigger's bounds and the viewport size at the moment of opening, which side of the
//! trigger the panel goes on and how it aligns, so that it stays on screen:
//!
//! - [`resolve`]: the stateless rule, producing a [`PlacementDecision`] of a [`Vertical`] side and
//!   a [`Horizontal`] alignment, tuned by a [`PlacementConfig`].
//! - [`Surface`]: the open/close lifecycle around it. The decision is computed on each open
//!   transition and discarded on close; a press outside the trigger and the panel dismisses.
//!
//! Geometry uses [`kurbo`] types in viewport coordinates (origin top-left, y down). The crate
//! does not track scrolling or resizing while a surface is open.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{Horizontal, PlacementConfig, Vertical, resolve};
//!
//! let viewport = Size::new(1200.0, 800.0);
//! let config = PlacementConfig::default();
//!
//! // Near the top-right corner: open below, aligned to the right edge.
//! let decision = resolve(Rect::new(1080.0, 20.0, 1180.0, 60.0), viewport, &config);
//! assert_eq!(decision.vertical, Vertical::Below);
//! assert_eq!(decision.horizontal, Horizontal::Right);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `kurbo/std`.
//! - `libm`: enables `kurbo/libm` for `no_std` targets.
//!
//! This crate is `no_std`.

#![no_std]

mod rule;
mod surface;

pub use rule::{Horizontal, PlacementConfig, PlacementDecision, Vertical, resolve};
pub use surface::Surface;
