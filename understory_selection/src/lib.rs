// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: facet sections and their selection state.
//!
//! This crate models the selection side of a faceted filter UI:
//!
//! - [`Section`]: one selectable group (a dropdown, a chip row, a sort menu) with an [`Id`],
//!   a cardinality [`Mode`], and an ordered list of [`Item`]s.
//! - [`SelectionState`]: the owner of the authoritative section list. It applies
//!   [`toggle_item`](SelectionState::toggle_item), [`clear_section`](SelectionState::clear_section)
//!   and [`clear_all`](SelectionState::clear_all) transitions and hands out immutable
//!   [`SelectionSet`] snapshots.
//! - [`filter_visible`] / [`ItemSearch`]: narrowing the *displayed* candidates of a section by a
//!   live search fragment, independent of selection.
//!
//! ## Modes
//!
//! | Mode | Toggle intent on an item |
//! | --- | --- |
//! | [`Mode::Toggle`] | flips that item only |
//! | [`Mode::Exclusive`] | selects that item, deselects its siblings; re-selecting is a no-op |
//!
//! For exclusive sections at most one item is selected after every transition.
//!
//! ## Change detection
//!
//! Transitions never edit a section in place. A section whose flags change is replaced by a new
//! allocation while untouched sections are shared with the previous snapshot, so downstream
//! consumers can compare by reference ([`SelectionSet::same_section`]). Every mutating call
//! returns `Some(SelectionSet)` exactly when something changed; that return value is the
//! selection-change notification.
//!
//! ## Lookup misses
//!
//! Operations naming an unknown section or item are silent no-ops (logged at `trace` level via
//! `tracing`). A stale id racing a refreshed item list is expected and harmless.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::{Id, Item, ItemSearch, Section, SelectionState};
//!
//! let mut state = SelectionState::new([Section::toggle(
//!     "versions",
//!     [Item::new(0, "1.8.9"), Item::new(1, "1.21.10")],
//! )]);
//! let versions = Id::from("versions");
//!
//! state.toggle_item(&versions, &Id::from(1));
//! assert_eq!(state.selected_labels(&versions), ["1.21.10"]);
//!
//! // Narrowing the visible candidates leaves the selection alone.
//! let mut search = ItemSearch::new();
//! search.set_fragment(versions.clone(), "1.8");
//! let section = state.section(&versions).unwrap();
//! assert_eq!(search.visible(section).len(), 1);
//! assert_eq!(state.selected_labels(&versions), ["1.21.10"]);
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Id`], [`Item`], [`Mode`] and [`Section`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod id;
mod search;
mod section;
mod state;

pub use id::Id;
pub use search::{ItemSearch, Tokens, filter_visible, tokenize};
pub use section::{Item, Mode, SEARCH_FIELD_MIN_ITEMS, Section};
pub use state::{SelectionSet, SelectionState};
