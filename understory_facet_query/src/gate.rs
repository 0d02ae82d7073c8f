// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering guard for asynchronously resolved results.

/// Accepts results only in query-revision order.
///
/// A data layer may answer composed queries out of order. Tag each result
/// with the [`revision`](crate::Query::revision) of the query that produced
/// it and let the gate decide whether it may replace what is on screen.
///
/// ```
/// use understory_facet_query::ResultGate;
///
/// let mut gate = ResultGate::new();
/// assert!(gate.accept(2));
/// // The answer to revision 1 arrives late and is dropped.
/// assert!(!gate.accept(1));
/// assert!(gate.accept(3));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultGate {
    newest: Option<u64>,
}

impl ResultGate {
    /// Create a gate that has accepted nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { newest: None }
    }

    /// Whether a result for `revision` may be shown. Accepting records it.
    ///
    /// A repeated revision is accepted again (a refetch of the same query).
    pub fn accept(&mut self, revision: u64) -> bool {
        match self.newest {
            Some(newest) if revision < newest => {
                tracing::debug!(revision, newest, "out-of-order result dropped");
                false
            }
            _ => {
                self.newest = Some(revision);
                true
            }
        }
    }

    /// Newest accepted revision.
    #[must_use]
    pub const fn newest(&self) -> Option<u64> {
        self.newest
    }
}
