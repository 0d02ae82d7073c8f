// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section model: one selectable group of items and its cardinality mode.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Id;

/// Sections holding more items than this show a search field even when the
/// host did not ask for one.
pub const SEARCH_FIELD_MIN_ITEMS: usize = 10;

/// Selection cardinality of a [`Section`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Any subset of items may be selected at once ("multiple").
    Toggle,
    /// At most one item is selected; selecting an item deselects its siblings ("select").
    Exclusive,
}

/// A selectable candidate inside a [`Section`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Identifier, unique within the owning section.
    pub id: Id,
    /// Display label. Also the value that flows into a composed query.
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    selected: bool,
}

impl Item {
    /// Create an unselected item.
    pub fn new(id: impl Into<Id>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Seed the initial selection flag.
    ///
    /// Once the item is handed to a [`SelectionState`](crate::SelectionState)
    /// only the state machine changes the flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Whether the item is currently selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Immutable description of one selectable group.
///
/// Sections are never edited in place. Every transition that changes at least
/// one `selected` flag produces a new `Section`; transitions that change
/// nothing return `None` so callers can keep the existing value (and its
/// identity).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    id: Id,
    mode: Mode,
    items: Vec<Item>,
}

impl Section {
    /// Create a section.
    ///
    /// For [`Mode::Exclusive`] sections only the first item seeded as
    /// selected keeps its flag.
    pub fn new(id: impl Into<Id>, mode: Mode, items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        if mode == Mode::Exclusive {
            let mut seen = false;
            for item in &mut items {
                if item.selected {
                    item.selected = !seen;
                    seen = true;
                }
            }
        }
        Self {
            id: id.into(),
            mode,
            items,
        }
    }

    /// Convenience constructor for a [`Mode::Toggle`] section.
    pub fn toggle(id: impl Into<Id>, items: impl IntoIterator<Item = Item>) -> Self {
        Self::new(id, Mode::Toggle, items)
    }

    /// Convenience constructor for a [`Mode::Exclusive`] section.
    pub fn exclusive(id: impl Into<Id>, items: impl IntoIterator<Item = Item>) -> Self {
        Self::new(id, Mode::Exclusive, items)
    }

    /// Section identifier.
    #[must_use]
    pub const fn id(&self) -> &Id {
        &self.id
    }

    /// Cardinality mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Items in their canonical order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id (first match wins).
    #[must_use]
    pub fn item(&self, id: &Id) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Iterate over the selected items in canonical order.
    pub fn selected(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|item| item.selected)
    }

    /// Labels of the selected items in canonical order.
    pub fn selected_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected().map(|item| item.label.as_str())
    }

    /// Number of selected items.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// Whether a selector surface for this section should show a search field.
    #[must_use]
    pub fn wants_search_field(&self, explicit: bool) -> bool {
        explicit || self.items.len() > SEARCH_FIELD_MIN_ITEMS
    }

    /// Apply a toggle/select intent to `item`.
    ///
    /// Returns `None` when `item` is unknown or when nothing would change.
    pub(crate) fn toggled(&self, item: &Id) -> Option<Self> {
        let target = self.items.iter().position(|i| i.id == *item)?;
        match self.mode {
            Mode::Toggle => {
                let mut next = self.clone();
                next.items[target].selected = !next.items[target].selected;
                Some(next)
            }
            Mode::Exclusive => {
                let already = self
                    .items
                    .iter()
                    .enumerate()
                    .all(|(i, it)| it.selected == (i == target));
                if already {
                    return None;
                }
                let mut next = self.clone();
                for (i, it) in next.items.iter_mut().enumerate() {
                    it.selected = i == target;
                }
                Some(next)
            }
        }
    }

    /// Deselect every item. Returns `None` if nothing was selected.
    pub(crate) fn cleared(&self) -> Option<Self> {
        if self.items.iter().all(|item| !item.selected) {
            return None;
        }
        let mut next = self.clone();
        for item in &mut next.items {
            item.selected = false;
        }
        Some(next)
    }

    /// Rebuild the item list, carrying over flags for ids that survive.
    pub(crate) fn with_items(&self, items: impl IntoIterator<Item = Item>) -> Self {
        let carried = items.into_iter().map(|mut item| {
            item.selected = self.item(&item.id).is_some_and(Item::is_selected);
            item
        });
        Self::new(self.id.clone(), self.mode, carried)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Item, Mode, SEARCH_FIELD_MIN_ITEMS, Section};
    use crate::Id;

    fn versions() -> Section {
        Section::exclusive(
            "sort",
            vec![
                Item::new("players", "Most players"),
                Item::new("rating", "Best rated"),
                Item::new("name", "Name"),
            ],
        )
    }

    #[test]
    fn exclusive_constructor_keeps_first_seeded_selection() {
        let section = Section::exclusive(
            "sort",
            vec![
                Item::new(0, "a").with_selected(true),
                Item::new(1, "b").with_selected(true),
            ],
        );
        let selected: Vec<_> = section.selected().map(|i| i.id.clone()).collect();
        assert_eq!(selected, vec![Id::from(0)]);
    }

    #[test]
    fn exclusive_reselect_is_not_a_change() {
        let section = versions();
        let once = section.toggled(&Id::from("rating")).unwrap();
        assert!(once.toggled(&Id::from("rating")).is_none());
        assert_eq!(once.selected_count(), 1);
    }

    #[test]
    fn toggle_flips_only_target() {
        let section = Section::toggle("tags", vec![Item::new(0, "pvp"), Item::new(1, "skyblock")]);
        let next = section.toggled(&Id::from(1)).unwrap();
        assert!(!next.items()[0].is_selected());
        assert!(next.items()[1].is_selected());
        let back = next.toggled(&Id::from(1)).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn unknown_item_is_a_no_op() {
        assert!(versions().toggled(&Id::from("missing")).is_none());
    }

    #[test]
    fn clearing_an_empty_section_changes_nothing() {
        assert!(versions().cleared().is_none());
    }

    #[test]
    fn rebuilt_items_keep_surviving_flags() {
        let section = Section::toggle("v", vec![Item::new(0, "1.20"), Item::new(1, "1.21")]);
        let section = section.toggled(&Id::from(1)).unwrap();
        let rebuilt = section.with_items(vec![Item::new(1, "1.21"), Item::new(2, "1.22")]);
        assert_eq!(rebuilt.mode(), Mode::Toggle);
        assert!(rebuilt.items()[0].is_selected());
        assert!(!rebuilt.items()[1].is_selected());
    }

    #[test]
    fn search_field_threshold() {
        let small = versions();
        assert!(!small.wants_search_field(false));
        assert!(small.wants_search_field(true));
        let big = Section::toggle(
            "versions",
            (0..=SEARCH_FIELD_MIN_ITEMS as i64).map(|i| Item::new(i, "v")),
        );
        assert!(big.wants_search_field(false));
    }
}
