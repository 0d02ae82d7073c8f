// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalization of raw facet values before composition.
//!
//! Malformed values are replaced by the facet's empty default and logged;
//! one bad facet never blocks the others.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_selection::{Section, SelectionSet};

use crate::FacetValueError;

/// Collapse whitespace runs, trim, and drop control characters.
pub(crate) fn text(raw: &str) -> String {
    let dropped = raw
        .chars()
        .filter(|c| c.is_control() && !c.is_whitespace())
        .count();
    if dropped > 0 {
        let err = FacetValueError::ControlCharacters(dropped);
        tracing::warn!(%err, "search text normalized");
    }
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        let word: String = word.chars().filter(|c| !c.is_control()).collect();
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word);
    }
    out
}

/// Selected labels of one section, trimmed, with empty labels dropped.
fn labels(section: &Section) -> Vec<String> {
    let mut out = Vec::new();
    for label in section.selected_labels() {
        let label = label.trim();
        if label.is_empty() {
            let err = FacetValueError::EmptyLabel {
                facet: section.id().to_string(),
            };
            tracing::warn!(%err, "selected item ignored");
            continue;
        }
        out.push(label.into());
    }
    out
}

/// Merge the selections of `set` into `facets`, keyed by section id.
///
/// Facets that end up without values are not inserted. Labels already
/// present under the same facet name are not repeated.
pub(crate) fn merge_facets(set: &SelectionSet, facets: &mut BTreeMap<String, Vec<String>>) {
    for section in set.iter() {
        let values = labels(section);
        if values.is_empty() {
            continue;
        }
        let entry = facets.entry(section.id().to_string()).or_default();
        for value in values {
            if !entry.contains(&value) {
                entry.push(value);
            }
        }
    }
}

/// Sort group id → chosen option id.
///
/// A group with no choice is absent. A group with several choices is
/// ambiguous and dropped.
pub(crate) fn sort_choices(set: &SelectionSet) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for section in set.iter() {
        let mut selected = section.selected();
        let Some(first) = selected.next() else {
            continue;
        };
        let extra = selected.count();
        if extra > 0 {
            let err = FacetValueError::AmbiguousSort {
                group: section.id().to_string(),
                count: extra + 1,
            };
            tracing::warn!(%err, "sort group ignored");
            continue;
        }
        out.insert(section.id().to_string(), first.id.to_string());
    }
    out
}
