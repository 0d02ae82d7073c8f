// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced composition of facet sources into one [`Query`].
//!
//! The [`Aggregator`] holds the latest value of every facet source: one text
//! value, any number of categorical [`SelectionSet`]s keyed by source id, and
//! one sort [`SelectionSet`]. Any change (re)starts a quiescence window of
//! [`AggregatorConfig::quiescence`] ticks. When the window elapses without
//! another change, the host hands the fired [`Ticket`] back through
//! [`Aggregator::fire`] and receives a single composed [`Query`] built from
//! *all* current values.
//!
//! ## Usage
//!
//! ```
//! use understory_facet_query::{Aggregator, AggregatorConfig, FacetChanges, ManualScheduler};
//! use understory_selection::{Id, Item, Section, SelectionState};
//!
//! let mut agg = Aggregator::new(AggregatorConfig::default(), ManualScheduler::new());
//!
//! // The first composition is immediate, with every facet at its default.
//! let initial = agg.start().unwrap();
//! assert!(initial.is_unconstrained());
//!
//! let mut tags = SelectionState::new([Section::toggle(
//!     "tags",
//!     [Item::new(0, "pvp"), Item::new(1, "skyblock")],
//! )]);
//!
//! // A burst of changes across two sources...
//! agg.set_text("hyp");
//! let set = tags.toggle_item(&Id::from("tags"), &Id::from(0)).unwrap();
//! agg.set_selection("filters", set);
//! agg.set_text("hypixel");
//!
//! // ...yields nothing until the window elapses.
//! assert!(agg.advance_to(299).is_none());
//! let query = agg.advance_to(300).unwrap();
//! assert_eq!(query.text(), "hypixel");
//! assert_eq!(query.facet("tags"), ["pvp"]);
//! assert_eq!(query.changes(), FacetChanges::TEXT | FacetChanges::FACETS);
//! ```
//!
//! ## Guarantees
//!
//! - At most one emission is pending at any time. Restarting the window
//!   cancels the previous ticket, and a ticket that is no longer pending is
//!   ignored if it fires anyway.
//! - Every emitted query reflects the latest value of every source.
//! - Revisions strictly increase across emissions.
//! - Setting a source to a value equal to the one held is not a change.

use alloc::collections::BTreeMap;
use alloc::string::String;

use understory_selection::{Id, SelectionSet};

use crate::normalize;
use crate::{FacetChanges, ManualScheduler, Query, Scheduler, Ticket};

/// When the first query is composed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialEmission {
    /// [`Aggregator::start`] returns the default query right away.
    #[default]
    Immediate,
    /// [`Aggregator::start`] opens a quiescence window; the default query is
    /// emitted when it elapses.
    OnQuiescence,
}

/// Aggregator tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatorConfig {
    /// Quiet period, in scheduler ticks, required before a composition.
    pub quiescence: u64,
    /// Behavior of the first composition.
    pub initial: InitialEmission,
}

impl AggregatorConfig {
    /// Default quiet period.
    pub const DEFAULT_QUIESCENCE: u64 = 300;

    /// Replace the quiet period.
    #[must_use]
    pub const fn with_quiescence(mut self, quiescence: u64) -> Self {
        self.quiescence = quiescence;
        self
    }

    /// Replace the initial emission behavior.
    #[must_use]
    pub const fn with_initial(mut self, initial: InitialEmission) -> Self {
        self.initial = initial;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            quiescence: Self::DEFAULT_QUIESCENCE,
            initial: InitialEmission::Immediate,
        }
    }
}

/// Latest-value store for every facet source plus the debounce state.
///
/// Generic over the [`Scheduler`] that owns the actual timers.
#[derive(Clone, Debug)]
pub struct Aggregator<S> {
    config: AggregatorConfig,
    scheduler: S,
    text: String,
    selections: BTreeMap<Id, SelectionSet>,
    sort: SelectionSet,
    pending: Option<Ticket>,
    next_ticket: u64,
    revision: u64,
    dirty: FacetChanges,
    started: bool,
}

impl<S: Scheduler> Aggregator<S> {
    /// Create an aggregator with every source at its empty default.
    pub fn new(config: AggregatorConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            text: String::new(),
            selections: BTreeMap::new(),
            sort: SelectionSet::default(),
            pending: None,
            next_ticket: 0,
            revision: 0,
            dirty: FacetChanges::empty(),
            started: false,
        }
    }

    /// Perform the initial composition.
    ///
    /// With [`InitialEmission::Immediate`] the query is returned now (and any
    /// pending window is folded into it). With [`InitialEmission::OnQuiescence`]
    /// a window is opened and `None` returned. The initial query reports every
    /// source as changed. Calling `start` again does nothing.
    pub fn start(&mut self) -> Option<Query> {
        if self.started {
            return None;
        }
        self.started = true;
        self.dirty = FacetChanges::all();
        match self.config.initial {
            InitialEmission::Immediate => {
                if let Some(ticket) = self.pending.take() {
                    self.scheduler.cancel(ticket);
                }
                Some(self.compose())
            }
            InitialEmission::OnQuiescence => {
                self.restart();
                None
            }
        }
    }

    /// Record a new free-text value.
    ///
    /// The value is whitespace-normalized first; a value that normalizes to
    /// the current one is not a change.
    pub fn set_text(&mut self, raw: &str) {
        let text = normalize::text(raw);
        if text == self.text {
            return;
        }
        self.text = text;
        self.touch(FacetChanges::TEXT);
    }

    /// Record the latest snapshot of the categorical source `source`.
    ///
    /// Sources are independent: each dropdown or chip row registers under its
    /// own id. Their sections merge by section id at composition time.
    pub fn set_selection(&mut self, source: impl Into<Id>, set: SelectionSet) {
        let source = source.into();
        if self.selections.get(&source) == Some(&set) {
            return;
        }
        self.selections.insert(source, set);
        self.touch(FacetChanges::FACETS);
    }

    /// Forget a categorical source.
    pub fn remove_selection(&mut self, source: &Id) {
        if self.selections.remove(source).is_some() {
            self.touch(FacetChanges::FACETS);
        } else {
            tracing::trace!(%source, "no such selection source");
        }
    }

    /// Record the latest sort snapshot.
    pub fn set_sort(&mut self, set: SelectionSet) {
        if self.sort == set {
            return;
        }
        self.sort = set;
        self.touch(FacetChanges::SORT);
    }

    /// Hand back a ticket fired by the scheduler.
    ///
    /// Returns the composed query if `ticket` is the pending one. Any other
    /// ticket is stale and ignored.
    pub fn fire(&mut self, ticket: Ticket) -> Option<Query> {
        if self.pending != Some(ticket) {
            tracing::trace!(ticket = ticket.0, "stale ticket ignored");
            return None;
        }
        self.pending = None;
        Some(self.compose())
    }

    /// Compose immediately if a window is open, cancelling it.
    pub fn flush(&mut self) -> Option<Query> {
        let ticket = self.pending.take()?;
        self.scheduler.cancel(ticket);
        Some(self.compose())
    }

    /// The ticket of the pending emission, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Revision of the most recent emission (`0` before the first).
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Current normalized text value.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// The scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn touch(&mut self, changed: FacetChanges) {
        self.dirty |= changed;
        self.restart();
    }

    fn restart(&mut self) {
        if let Some(old) = self.pending.take() {
            self.scheduler.cancel(old);
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.scheduler.schedule(ticket, self.config.quiescence);
        self.pending = Some(ticket);
    }

    fn compose(&mut self) -> Query {
        self.revision += 1;
        let mut facets = BTreeMap::new();
        for set in self.selections.values() {
            normalize::merge_facets(set, &mut facets);
        }
        let sort = normalize::sort_choices(&self.sort);
        let changes = core::mem::take(&mut self.dirty);
        tracing::debug!(
            revision = self.revision,
            text = %self.text,
            facets = facets.len(),
            sort = sort.len(),
            ?changes,
            "query composed"
        );
        Query::composed(self.revision, self.text.clone(), facets, sort, changes)
    }
}

impl Aggregator<ManualScheduler> {
    /// Advance the manual clock to `now` and fire whatever came due.
    pub fn advance_to(&mut self, now: u64) -> Option<Query> {
        let due = self.scheduler.advance_to(now);
        let mut out = None;
        for ticket in due {
            if let Some(query) = self.fire(ticket) {
                out = Some(query);
            }
        }
        out
    }
}
