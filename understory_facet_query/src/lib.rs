// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_facet_query --heading-base-level=0

//! Understory Facet Query: from facet selections to a filtered, ordered result set.
//!
//! This crate sits between the selection state of a faceted filter UI and whatever resolves
//! records:
//!
//! - [`Aggregator`]: collects the latest value of every facet source (free text, any number of
//!   [`SelectionSet`](understory_selection::SelectionSet)s, one sort selection) and composes one
//!   immutable [`Query`] per quiescence window. Timers are abstracted behind [`Scheduler`];
//!   [`ManualScheduler`] drives them from caller-supplied time.
//! - [`evaluate`] / [`resolve`]: the predicate rules a data layer applies to a [`Query`] over
//!   anything implementing [`Record`], plus stable sort ordering ([`apply_sort`]).
//! - [`ResultGate`]: drops results that arrive for an older query than the one on screen.
//! - [`TextInput`] and [`suggest_tags`] / [`accept_tag`]: the search field feeding the text
//!   facet, with its [`SubmitMode`]s and tag completion.
//!
//! ## Combination rules
//!
//! A record must satisfy every non-empty facet. Within a facet:
//!
//! | Facet | Rule |
//! | --- | --- |
//! | text | every whitespace token matches name, address or description as a substring, or equals the port |
//! | `platforms` | all-of |
//! | `versions` | any-of |
//! | `tags` | all-of |
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_facet_query::{Aggregator, AggregatorConfig, Listing, ManualScheduler, resolve};
//! use understory_selection::{Id, Item, Section, SelectionState};
//!
//! let records = vec![
//!     Listing {
//!         name: "Hypixel".into(),
//!         platforms: vec!["Java Edition".into()],
//!         players: Some(40_000),
//!         ..Listing::default()
//!     },
//!     Listing {
//!         name: "CubeCraft".into(),
//!         platforms: vec!["Java Edition".into(), "Bedrock Edition".into()],
//!         players: Some(12_000),
//!         ..Listing::default()
//!     },
//! ];
//!
//! let mut agg = Aggregator::new(AggregatorConfig::default(), ManualScheduler::new());
//! let initial = agg.start().unwrap();
//! assert_eq!(resolve(&records, &initial).len(), 2);
//!
//! let mut filters = SelectionState::new([Section::toggle(
//!     "platforms",
//!     [Item::new(0, "Java Edition"), Item::new(1, "Bedrock Edition")],
//! )]);
//! let set = filters.toggle_item(&Id::from("platforms"), &Id::from(1)).unwrap();
//! agg.set_selection("filters", set);
//!
//! let query = agg.advance_to(300).unwrap();
//! let hits = resolve(&records, &query);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "CubeCraft");
//! ```
//!
//! ## Malformed values
//!
//! Nothing in the pipeline fails. Empty labels, ambiguous sort groups, unknown sort options and
//! control characters in the text are normalized away and reported as [`FacetValueError`]s at
//! `warn` level through `tracing`. Composed queries are logged at `debug`.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Query`], [`FacetChanges`], [`Listing`],
//!   [`AggregatorConfig`], [`InitialEmission`] and [`SubmitMode`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod aggregate;
mod error;
mod evaluate;
mod gate;
mod normalize;
mod query;
mod record;
mod schedule;
mod sort;
mod suggest;
mod text_input;

pub use aggregate::{Aggregator, AggregatorConfig, InitialEmission};
pub use error::FacetValueError;
pub use evaluate::{evaluate, matches, matches_facet};
pub use gate::ResultGate;
pub use query::{FacetChanges, Query, QueryBuilder};
pub use record::{FacetField, FacetRule, Listing, Record, SortField};
pub use schedule::{ManualScheduler, Scheduler, Ticket};
pub use sort::{SortOrder, SortSpec, apply_sort, resolve, sort_specs};
pub use suggest::{accept_tag, suggest_tags};
pub use text_input::{SubmitMode, TextInput};
