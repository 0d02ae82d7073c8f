// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrowing the displayed candidates of a section by a search fragment.
//!
//! Narrowing is presentational only: it never touches selection flags and is
//! always derived from the canonical [`Section`], never from an earlier
//! filtered list. Running it twice with the same fragment yields the same
//! items in the same order.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{Id, Item, Section};

/// Lower-cased whitespace tokens of a fragment.
pub type Tokens = SmallVec<[String; 4]>;

/// Split `fragment` on whitespace and lower-case each token.
///
/// This is the tokenization shared by candidate narrowing and free-text
/// record matching.
#[must_use]
pub fn tokenize(fragment: &str) -> Tokens {
    fragment.split_whitespace().map(str::to_lowercase).collect()
}

/// Items of `section` whose label contains every token of `fragment`.
///
/// Matching is case-insensitive substring matching. An empty (or
/// whitespace-only) fragment returns every item in canonical order.
///
/// ```
/// use understory_selection::{Item, Section, filter_visible};
///
/// let section = Section::toggle("versions", [
///     Item::new(0, "1.8.9"),
///     Item::new(1, "1.21.10"),
///     Item::new(2, "1.21.8"),
/// ]);
/// let labels: Vec<_> = filter_visible(&section, "21")
///     .into_iter()
///     .map(|item| item.label.as_str())
///     .collect();
/// assert_eq!(labels, ["1.21.10", "1.21.8"]);
/// ```
#[must_use]
pub fn filter_visible<'a>(section: &'a Section, fragment: &str) -> Vec<&'a Item> {
    let tokens = tokenize(fragment);
    if tokens.is_empty() {
        return section.items().iter().collect();
    }
    section
        .items()
        .iter()
        .filter(|item| {
            let label = item.label.to_lowercase();
            tokens.iter().all(|token| label.contains(token.as_str()))
        })
        .collect()
}

/// Live search fragments, one per section.
///
/// Hosts update the fragment as the user types inside a selector surface and
/// call [`ItemSearch::reset_all`] when the surface closes.
#[derive(Clone, Debug, Default)]
pub struct ItemSearch {
    fragments: HashMap<Id, String>,
}

impl ItemSearch {
    /// Create an empty search state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fragment for `section`.
    pub fn set_fragment(&mut self, section: Id, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if fragment.is_empty() {
            self.fragments.remove(&section);
        } else {
            self.fragments.insert(section, fragment);
        }
    }

    /// Current fragment for `section` (empty when none was set).
    #[must_use]
    pub fn fragment(&self, section: &Id) -> &str {
        self.fragments.get(section).map_or("", String::as_str)
    }

    /// Clear the fragment of `section`, restoring the full item list.
    pub fn clear_fragment(&mut self, section: &Id) {
        self.fragments.remove(section);
    }

    /// Clear every fragment.
    pub fn reset_all(&mut self) {
        self.fragments.clear();
    }

    /// Candidates of `section` to display under its current fragment.
    #[must_use]
    pub fn visible<'a>(&self, section: &'a Section) -> Vec<&'a Item> {
        filter_visible(section, self.fragment(section.id()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{ItemSearch, filter_visible};
    use crate::{Id, Item, Section, SelectionState};

    fn versions() -> Section {
        Section::toggle(
            "versions",
            vec![
                Item::new(0, "1.8.9"),
                Item::new(1, "1.16.5"),
                Item::new(2, "1.21.8"),
                Item::new(3, "1.21.10"),
                Item::new(4, "Snapshot 24w14a"),
            ],
        )
    }

    fn labels(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn empty_fragment_is_identity_and_idempotent() {
        let section = versions();
        let once = filter_visible(&section, "");
        let twice = filter_visible(&section, "");
        let all: Vec<&Item> = section.items().iter().collect();
        assert_eq!(once, all);
        assert_eq!(twice, all);
        assert_eq!(filter_visible(&section, "   \t"), all);
    }

    #[test]
    fn substring_not_prefix() {
        let section = versions();
        assert_eq!(labels(&filter_visible(&section, "16")), vec!["1.16.5"]);
    }

    #[test]
    fn every_token_must_match_case_insensitively() {
        let section = versions();
        assert_eq!(labels(&filter_visible(&section, "SNAP 24w")), vec!["Snapshot 24w14a"]);
        assert!(filter_visible(&section, "snap 1.21").is_empty());
    }

    #[test]
    fn filtering_never_touches_selection() {
        let mut state = SelectionState::new(vec![versions()]);
        let id = Id::from("versions");
        state.toggle_item(&id, &Id::from(3));
        let section = state.section(&id).unwrap();
        let visible = filter_visible(section, "8.9");
        assert_eq!(labels(&visible), vec!["1.8.9"]);
        assert_eq!(state.selected_labels(&id), vec!["1.21.10"]);
    }

    #[test]
    fn clearing_fragment_restores_order() {
        let section = versions();
        let mut search = ItemSearch::new();
        search.set_fragment(section.id().clone(), "1.21");
        assert_eq!(search.visible(&section).len(), 2);
        search.clear_fragment(section.id());
        assert_eq!(labels(&search.visible(&section)), labels(&filter_visible(&section, "")));

        search.set_fragment(section.id().clone(), "snap");
        assert_eq!(search.fragment(section.id()), "snap");
        search.reset_all();
        assert_eq!(search.fragment(section.id()), "");
    }
}
