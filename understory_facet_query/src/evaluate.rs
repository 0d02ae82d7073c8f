// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Predicate evaluation: which records a [`Query`] matches.
//!
//! A record must satisfy every non-empty facet:
//!
//! | Facet | Passes when |
//! | --- | --- |
//! | text | every token is a case-insensitive substring of name, address or description, or equals the decimal port |
//! | `platforms` | the record carries **all** selected platforms |
//! | `versions` | the record supports **any** selected version |
//! | `tags` | the record carries **all** selected tags |
//!
//! Facets with an unknown name do not filter. Sort choices never exclude
//! records; see [`apply_sort`](crate::apply_sort).

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use understory_selection::tokenize;

use crate::{FacetField, FacetRule, Query, Record};

/// Records matching `query`, in input order.
///
/// Pure and deterministic; the input is never reordered or mutated.
///
/// ```
/// use understory_facet_query::{Listing, Query, evaluate};
///
/// let records = vec![
///     Listing { name: "Hypixel".into(), port: 25565, ..Listing::default() },
///     Listing { name: "CubeCraft".into(), port: 19132, ..Listing::default() },
/// ];
/// let query = Query::builder().text("25565").build();
/// let hits = evaluate(&records, &query);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Hypixel");
/// ```
#[must_use]
pub fn evaluate<'a, R: Record>(records: &'a [R], query: &Query) -> Vec<&'a R> {
    let tokens = tokenize(query.text());
    let facets = known_facets(query);
    records
        .iter()
        .filter(|record| {
            matches_tokens(*record, &tokens)
                && facets
                    .iter()
                    .all(|(field, values)| matches_facet(*record, *field, values))
        })
        .collect()
}

/// Whether a single record matches `query`.
#[must_use]
pub fn matches<R: Record + ?Sized>(record: &R, query: &Query) -> bool {
    let tokens = tokenize(query.text());
    matches_tokens(record, &tokens)
        && known_facets(query)
            .iter()
            .all(|(field, values)| matches_facet(record, *field, values))
}

fn known_facets(query: &Query) -> Vec<(FacetField, &[String])> {
    query
        .facets()
        .filter_map(|(name, values)| {
            let field = FacetField::from_name(name);
            if field.is_none() {
                tracing::trace!(facet = name, "facet has no rule; not filtering");
            }
            field.map(|f| (f, values))
        })
        .collect()
}

fn matches_tokens<R: Record + ?Sized>(record: &R, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let contains = |field: Option<&str>, token: &str| {
        field.is_some_and(|value| value.to_lowercase().contains(token))
    };
    let port = record.port().map(|p| p.to_string());
    tokens.iter().all(|token| {
        contains(record.name(), token)
            || contains(record.address(), token)
            || contains(record.description(), token)
            || port.as_deref() == Some(token.as_str())
    })
}

/// Whether `record` passes one categorical facet.
///
/// An empty selection passes everything. A record missing the field fails a
/// non-empty selection.
#[must_use]
pub fn matches_facet<R: Record + ?Sized>(record: &R, field: FacetField, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let Some(values) = record.values(field) else {
        return false;
    };
    match field.rule() {
        FacetRule::AllOf => selected.iter().all(|s| values.contains(s)),
        FacetRule::AnyOf => selected.iter().any(|s| values.contains(s)),
    }
}
