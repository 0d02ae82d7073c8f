// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facet value errors.

use alloc::string::String;

/// A facet source produced a value the engine cannot use as-is.
///
/// These never abort composition or evaluation: the offending value is
/// replaced by the facet's empty default and the error is logged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FacetValueError {
    /// A selected item carries an empty (or whitespace-only) label.
    #[error("facet `{facet}` has a selected item with an empty label")]
    EmptyLabel {
        /// Facet the item belongs to.
        facet: String,
    },
    /// A sort group has more than one option selected.
    #[error("sort group `{group}` has {count} options selected")]
    AmbiguousSort {
        /// Sort group id.
        group: String,
        /// Number of selected options.
        count: usize,
    },
    /// The sort option names a field records cannot be ordered by.
    #[error("unknown sort field `{0}`")]
    UnknownSortField(String),
    /// The sort option has a direction suffix other than `asc` or `desc`.
    #[error("unknown sort direction `{0}`")]
    UnknownSortDirection(String),
    /// Search text contained control characters, which were dropped.
    #[error("search text contained {0} control characters")]
    ControlCharacters(usize),
}
