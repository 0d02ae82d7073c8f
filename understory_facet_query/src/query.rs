// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed query: an immutable snapshot of every facet.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

bitflags::bitflags! {
    /// Facet sources that changed since the previous emission.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FacetChanges: u8 {
        /// The free-text value changed.
        const TEXT   = 0b0000_0001;
        /// At least one categorical selection changed.
        const FACETS = 0b0000_0010;
        /// The sort choice changed.
        const SORT   = 0b0000_0100;
    }
}

/// Immutable, fully consistent snapshot of all facets.
///
/// A `Query` reflects the latest value of every facet source at the moment it
/// was composed. It has no mutators; the [`Aggregator`](crate::Aggregator)
/// builds a new one for every emission.
///
/// - `text`: whitespace-normalized free text (empty means "no text facet").
/// - `facets`: facet name → selected labels. Facets with no selection are absent.
/// - `sort`: sort group id → chosen option id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    revision: u64,
    text: String,
    facets: BTreeMap<String, Vec<String>>,
    sort: BTreeMap<String, String>,
    changes: FacetChanges,
}

impl Query {
    /// Assemble an already normalized query.
    pub(crate) fn composed(
        revision: u64,
        text: String,
        facets: BTreeMap<String, Vec<String>>,
        sort: BTreeMap<String, String>,
        changes: FacetChanges,
    ) -> Self {
        Self {
            revision,
            text,
            facets,
            sort,
            changes,
        }
    }

    /// Start building a query by hand (tests, server-side replays).
    #[must_use]
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Monotonic emission number assigned by the aggregator.
    ///
    /// Later emissions always carry a larger revision. Hand-built queries
    /// default to `0`.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Normalized free text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selected labels of `facet`; empty when the facet has no selection.
    #[must_use]
    pub fn facet(&self, facet: &str) -> &[String] {
        self.facets.get(facet).map_or(&[], Vec::as_slice)
    }

    /// All non-empty facets, ordered by name.
    pub fn facets(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.facets
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Chosen option id of a sort group.
    #[must_use]
    pub fn sort_choice(&self, group: &str) -> Option<&str> {
        self.sort.get(group).map(String::as_str)
    }

    /// All sort choices, ordered by group id.
    pub fn sort(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.sort.iter().map(|(g, o)| (g.as_str(), o.as_str()))
    }

    /// Sources that changed since the previous emission.
    #[must_use]
    pub const fn changes(&self) -> FacetChanges {
        self.changes
    }

    /// Returns `true` if no facet constrains or orders the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.text.is_empty() && self.facets.is_empty() && self.sort.is_empty()
    }
}

/// Builder for [`Query`].
///
/// Applies the same normalization the aggregator does: whitespace in the
/// text is collapsed, and facets without values are dropped.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Set the free text.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.query.text = crate::normalize::text(text);
        self
    }

    /// Add values to a facet.
    #[must_use]
    pub fn facet<I, V>(mut self, facet: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut values = values.into_iter().map(Into::into).peekable();
        if values.peek().is_some() {
            let entry = self.query.facets.entry(facet.into()).or_default();
            for value in values {
                if !entry.contains(&value) {
                    entry.push(value);
                }
            }
        }
        self
    }

    /// Choose an option for a sort group.
    #[must_use]
    pub fn sort(mut self, group: &str, option: &str) -> Self {
        self.query.sort.insert(group.into(), option.into());
        self
    }

    /// Set the revision.
    #[must_use]
    pub fn revision(mut self, revision: u64) -> Self {
        self.query.revision = revision;
        self
    }

    /// Set the change flags.
    #[must_use]
    pub fn changes(mut self, changes: FacetChanges) -> Self {
        self.query.changes = changes;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::{FacetChanges, Query};

    #[test]
    fn builder_normalizes_and_dedupes() {
        let query = Query::builder()
            .text("  hypixel   pvp ")
            .facet("tags", ["pvp", "skyblock", "pvp"])
            .facet("versions", core::iter::empty::<&str>())
            .sort("order", "players-desc")
            .build();
        assert_eq!(query.text(), "hypixel pvp");
        assert_eq!(query.facet("tags"), ["pvp", "skyblock"]);
        assert!(query.facet("versions").is_empty());
        assert_eq!(query.facets().count(), 1);
        assert_eq!(query.sort_choice("order"), Some("players-desc"));
        assert_eq!(query.changes(), FacetChanges::empty());
    }

    #[test]
    fn default_query_is_unconstrained() {
        assert!(Query::default().is_unconstrained());
        assert!(!Query::builder().text("x").build().is_unconstrained());
    }
}
