// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-filter ordering from sort choices.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::str::FromStr;

use crate::{FacetValueError, Query, Record, SortField, evaluate};

/// Direction of a sort.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// A parsed sort option: a field and a direction.
///
/// Option ids read `<field>`, `<field>-asc` or `<field>-desc`, with fields
/// `name`, `players` and `rating`. A bare numeric field sorts descending; a
/// bare `name` sorts ascending.
///
/// ```
/// use understory_facet_query::{SortField, SortOrder, SortSpec};
///
/// let spec: SortSpec = "rating-asc".parse().unwrap();
/// assert_eq!(spec, SortSpec { field: SortField::Rating, order: SortOrder::Ascending });
/// assert!("colour".parse::<SortSpec>().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Field to order by.
    pub field: SortField,
    /// Direction.
    pub order: SortOrder,
}

impl FromStr for SortSpec {
    type Err = FacetValueError;

    fn from_str(option: &str) -> Result<Self, Self::Err> {
        let (field, order) = match option.rsplit_once('-') {
            Some((field, suffix)) => {
                let order = match suffix {
                    "asc" => SortOrder::Ascending,
                    "desc" => SortOrder::Descending,
                    other => return Err(FacetValueError::UnknownSortDirection(other.into())),
                };
                (field, Some(order))
            }
            None => (option, None),
        };
        let field = match field {
            "name" => SortField::Name,
            "players" => SortField::Players,
            "rating" => SortField::Rating,
            other => return Err(FacetValueError::UnknownSortField(other.into())),
        };
        let order = order.unwrap_or(match field {
            SortField::Name => SortOrder::Ascending,
            SortField::Players | SortField::Rating => SortOrder::Descending,
        });
        Ok(Self { field, order })
    }
}

impl SortSpec {
    fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let directed = |ord: Ordering| match self.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        };
        match self.field {
            SortField::Name => match (a.name(), b.name()) {
                (Some(x), Some(y)) => directed(x.to_lowercase().cmp(&y.to_lowercase())),
                (x, y) => missing_last(x.is_some(), y.is_some()),
            },
            SortField::Players | SortField::Rating => {
                match (a.sort_number(self.field), b.sort_number(self.field)) {
                    (Some(x), Some(y)) => directed(x.total_cmp(&y)),
                    (x, y) => missing_last(x.is_some(), y.is_some()),
                }
            }
        }
    }
}

/// Records missing the field go after the ones that have it, in either direction.
fn missing_last(a_present: bool, b_present: bool) -> Ordering {
    b_present.cmp(&a_present)
}

/// Parsed sort specs of `query`, in group-id order. Unparseable choices are skipped.
#[must_use]
pub fn sort_specs(query: &Query) -> Vec<SortSpec> {
    query
        .sort()
        .filter_map(|(group, option)| match option.parse::<SortSpec>() {
            Ok(spec) => Some(spec),
            Err(err) => {
                tracing::warn!(group, %err, "sort choice ignored");
                None
            }
        })
        .collect()
}

/// Order `records` by the sort choices of `query`.
///
/// Groups apply in group-id order, the first being the primary key. The sort
/// is stable, so records that compare equal keep their relative order, and
/// records are never dropped.
pub fn apply_sort<R: Record + ?Sized>(records: &mut [&R], query: &Query) {
    let specs = sort_specs(query);
    if specs.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        specs
            .iter()
            .map(|spec| spec.compare(*a, *b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Filter with [`evaluate`], then order with [`apply_sort`].
///
/// This is the resolution a data layer is expected to perform for a composed
/// query.
#[must_use]
pub fn resolve<'a, R: Record>(records: &'a [R], query: &Query) -> Vec<&'a R> {
    let mut hits = evaluate(records, query);
    apply_sort(&mut hits, query);
    hits
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{SortOrder, SortSpec, apply_sort, resolve};
    use crate::{FacetValueError, Listing, Query, SortField};

    fn listing(name: &str, players: Option<u32>, rating: Option<f32>) -> Listing {
        Listing {
            name: name.into(),
            players,
            rating,
            ..Listing::default()
        }
    }

    fn names(hits: &[&Listing]) -> Vec<String> {
        hits.iter().map(|l| l.name.clone()).collect()
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("cubecraft", Some(12_000), Some(4.1)),
            listing("Localhost", None, None),
            listing("Hypixel", Some(40_000), Some(4.1)),
            listing("PVP Legacy", Some(900), Some(4.7)),
        ]
    }

    #[test]
    fn parses_option_ids() {
        assert_eq!(
            "players".parse::<SortSpec>(),
            Ok(SortSpec {
                field: SortField::Players,
                order: SortOrder::Descending
            })
        );
        assert_eq!(
            "name".parse::<SortSpec>().map(|s| s.order),
            Ok(SortOrder::Ascending)
        );
        assert_eq!(
            "name-desc".parse::<SortSpec>().map(|s| s.order),
            Ok(SortOrder::Descending)
        );
        assert_eq!(
            "players-up".parse::<SortSpec>(),
            Err(FacetValueError::UnknownSortDirection("up".into()))
        );
        assert_eq!(
            "ping-asc".parse::<SortSpec>(),
            Err(FacetValueError::UnknownSortField("ping".into()))
        );
    }

    #[test]
    fn numeric_sort_puts_missing_last() {
        let records = sample();
        let query = Query::builder().sort("order", "players-desc").build();
        assert_eq!(
            names(&resolve(&records, &query)),
            vec!["Hypixel", "cubecraft", "PVP Legacy", "Localhost"]
        );
        let query = Query::builder().sort("order", "players-asc").build();
        assert_eq!(
            names(&resolve(&records, &query)),
            vec!["PVP Legacy", "cubecraft", "Hypixel", "Localhost"]
        );
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let records = sample();
        let query = Query::builder().sort("order", "name").build();
        assert_eq!(
            names(&resolve(&records, &query)),
            vec!["cubecraft", "Hypixel", "Localhost", "PVP Legacy"]
        );
    }

    #[test]
    fn groups_apply_in_id_order_and_ties_are_stable() {
        let records = sample();
        // "a-primary" sorts before "b-secondary": rating first, then name.
        let query = Query::builder()
            .sort("b-secondary", "name-desc")
            .sort("a-primary", "rating")
            .build();
        assert_eq!(
            names(&resolve(&records, &query)),
            vec!["PVP Legacy", "Hypixel", "cubecraft", "Localhost"]
        );

        let rating_only = Query::builder().sort("order", "rating").build();
        assert_eq!(
            names(&resolve(&records, &rating_only)),
            vec!["PVP Legacy", "cubecraft", "Hypixel", "Localhost"]
        );
    }

    #[test]
    fn sort_never_excludes() {
        let records = sample();
        let mut hits: Vec<&Listing> = records.iter().collect();
        let query = Query::builder().sort("order", "bogus").build();
        apply_sort(&mut hits, &query);
        assert_eq!(names(&hits), names(&records.iter().collect::<Vec<_>>()));
    }
}
