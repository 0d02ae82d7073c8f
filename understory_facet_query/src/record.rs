// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The matchable surface of a record.

use alloc::string::String;
use alloc::vec::Vec;

/// A categorical field a facet filters on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FacetField {
    /// Platforms the record runs on. All-of.
    Platforms,
    /// Versions the record supports. Any-of.
    Versions,
    /// Descriptive tags. All-of.
    Tags,
}

/// How the selected values of one facet combine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FacetRule {
    /// The record must carry every selected value.
    AllOf,
    /// The record must carry at least one selected value.
    AnyOf,
}

impl FacetField {
    /// Every facet field, in evaluation order.
    pub const ALL: [Self; 3] = [Self::Platforms, Self::Versions, Self::Tags];

    /// Facet name used as the key in a [`Query`](crate::Query).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Platforms => "platforms",
            Self::Versions => "versions",
            Self::Tags => "tags",
        }
    }

    /// Resolve a facet name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Combination rule for this facet.
    ///
    /// The asymmetry is intentional: a listing must run on *every* selected
    /// platform and carry *every* selected tag, but supporting *any* selected
    /// version is enough.
    #[must_use]
    pub const fn rule(self) -> FacetRule {
        match self {
            Self::Platforms | Self::Tags => FacetRule::AllOf,
            Self::Versions => FacetRule::AnyOf,
        }
    }
}

/// Fields a result set can be ordered by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Record name, case-insensitive.
    Name,
    /// Current player count.
    Players,
    /// Rating score.
    Rating,
}

/// Read-only view of a record for matching and ordering.
///
/// Every accessor may return `None` for a missing field; a missing field only
/// fails the sub-condition that needed it.
pub trait Record {
    /// Display name.
    fn name(&self) -> Option<&str>;
    /// Network address.
    fn address(&self) -> Option<&str>;
    /// Network port.
    fn port(&self) -> Option<u16>;
    /// Free-text description.
    fn description(&self) -> Option<&str>;
    /// Values of a categorical facet field.
    fn values(&self, field: FacetField) -> Option<&[String]>;
    /// Numeric value of a sort field. [`SortField::Name`] is ordered via
    /// [`Record::name`] and need not be answered here.
    fn sort_number(&self, field: SortField) -> Option<f64>;
}

/// A directory listing: one game server entry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Listing {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Host name or IP address.
    pub address: String,
    /// Port.
    pub port: u16,
    /// Tags, when the listing has been tagged at all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Option<Vec<String>>,
    /// Supported game versions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub versions: Vec<String>,
    /// Supported platforms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub platforms: Vec<String>,
    /// Current player count, if reported.
    #[cfg_attr(feature = "serde", serde(default))]
    pub players: Option<u32>,
    /// Rating score, if rated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f32>,
}

impl Record for Listing {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    fn address(&self) -> Option<&str> {
        Some(self.address.as_str())
    }

    fn port(&self) -> Option<u16> {
        Some(self.port)
    }

    fn description(&self) -> Option<&str> {
        Some(self.description.as_str())
    }

    fn values(&self, field: FacetField) -> Option<&[String]> {
        match field {
            FacetField::Platforms => Some(self.platforms.as_slice()),
            FacetField::Versions => Some(self.versions.as_slice()),
            FacetField::Tags => self.tags.as_deref(),
        }
    }

    fn sort_number(&self, field: SortField) -> Option<f64> {
        match field {
            SortField::Name => None,
            SortField::Players => self.players.map(f64::from),
            SortField::Rating => self.rating.map(f64::from),
        }
    }
}
