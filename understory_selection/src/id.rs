// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for sections and items.

use alloc::string::String;
use core::fmt;

/// Identifier of a [`Section`](crate::Section) or an [`Item`](crate::Item).
///
/// Hosts key their facets either by position (`Num`) or by a stable name
/// (`Str`); both forms compare, hash and order independently, so `Num(0)` and
/// `Str("0")` are distinct ids.
///
/// Item ids only need to be unique within their owning section.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Id {
    /// Numeric identifier.
    Num(i64),
    /// Textual identifier.
    Str(String),
}

impl Id {
    /// Returns the textual form if this is a `Str` id.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Num(_) => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Self::Num(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self::Num(value.into())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Id;

    #[test]
    fn numeric_and_textual_ids_are_distinct() {
        assert_ne!(Id::from(0), Id::from("0"));
        assert_eq!(Id::from(0).to_string(), Id::from("0").to_string());
    }

    #[test]
    fn display_uses_raw_text() {
        assert_eq!(Id::from("platforms").to_string(), "platforms");
        assert_eq!(Id::from(-3_i64).to_string(), "-3");
        assert_eq!(Id::from("tags").as_str(), Some("tags"));
        assert_eq!(Id::from(7_u32).as_str(), None);
    }
}
