// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state machine and its immutable snapshots.

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::{Id, Item, Section};

/// Immutable projection of the current selection across sections.
///
/// A `SelectionSet` shares its sections with the [`SelectionState`] that
/// produced it. Sections untouched by a transition keep their allocation, so
/// [`SelectionSet::same_section`] can detect changes by reference without a
/// deep comparison.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    sections: Vec<Arc<Section>>,
}

impl SelectionSet {
    /// Build a snapshot from standalone sections (for example a sort group
    /// assembled by the host).
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            sections: sections.into_iter().map(Arc::new).collect(),
        }
    }

    /// Look up a section snapshot by id.
    #[must_use]
    pub fn section(&self, id: &Id) -> Option<&Arc<Section>> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Iterate over the sections in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter().map(|s| &**s)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the snapshot holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Whether `id` refers to the very same section allocation in both snapshots.
    ///
    /// Returns `false` when either snapshot lacks the section.
    #[must_use]
    pub fn same_section(&self, other: &Self, id: &Id) -> bool {
        match (self.section(id), other.section(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns `true` if no section has a selected item.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.iter().all(|s| s.selected_count() == 0)
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .zip(&other.sections)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl Eq for SelectionSet {}

/// Owner of the authoritative section list.
///
/// The state is constructed once by the composing caller and passed to
/// whatever needs to read or mutate it. Every mutating operation returns the
/// new [`SelectionSet`] when at least one flag changed, or `None` otherwise.
/// Unknown section or item ids are treated as a no-op: a stale id racing a
/// refreshed item list is expected, not an error.
///
/// ```
/// use understory_selection::{Id, Item, Section, SelectionState};
///
/// let mut state = SelectionState::new([
///     Section::toggle("platforms", [Item::new(0, "Java Edition"), Item::new(1, "Bedrock Edition")]),
///     Section::exclusive("sort", [Item::new("players", "Players"), Item::new("rating", "Rating")]),
/// ]);
///
/// let set = state.toggle_item(&Id::from("platforms"), &Id::from(1)).unwrap();
/// let labels: Vec<_> = set.section(&Id::from("platforms")).unwrap().selected_labels().collect();
/// assert_eq!(labels, ["Bedrock Edition"]);
///
/// // Unknown ids never fail.
/// assert!(state.toggle_item(&Id::from("missing"), &Id::from(0)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    sections: Vec<Arc<Section>>,
    index: HashMap<Id, usize>,
}

impl SelectionState {
    /// Create a state machine over `sections`.
    ///
    /// Sections whose id repeats an earlier one are dropped.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut state = Self::default();
        for section in sections {
            if state.index.contains_key(section.id()) {
                tracing::warn!(section = %section.id(), "duplicate section id dropped");
                continue;
            }
            state
                .index
                .insert(section.id().clone(), state.sections.len());
            state.sections.push(Arc::new(section));
        }
        state
    }

    /// Look up the live section by id.
    #[must_use]
    pub fn section(&self, id: &Id) -> Option<&Section> {
        self.index.get(id).map(|&i| &*self.sections[i])
    }

    /// Ids of the selected items of `section`, in canonical order.
    ///
    /// Empty for an unknown section.
    #[must_use]
    pub fn selected_ids(&self, section: &Id) -> Vec<Id> {
        self.section(section)
            .map(|s| s.selected().map(|item| item.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Labels of the selected items of `section`, in canonical order.
    #[must_use]
    pub fn selected_labels(&self, section: &Id) -> Vec<&str> {
        self.section(section)
            .map(|s| s.selected_labels().collect())
            .unwrap_or_default()
    }

    /// Project the current selection. Pure; the result is a fresh snapshot.
    #[must_use]
    pub fn selection(&self) -> SelectionSet {
        SelectionSet {
            sections: self.sections.clone(),
        }
    }

    /// Toggle or select `item` inside `section`.
    ///
    /// - [`Mode::Toggle`](crate::Mode::Toggle): flips the item's flag.
    /// - [`Mode::Exclusive`](crate::Mode::Exclusive): selects the item and
    ///   deselects its siblings. Targeting the already selected item is not a
    ///   change; an exclusive choice is never toggled off here.
    pub fn toggle_item(&mut self, section: &Id, item: &Id) -> Option<SelectionSet> {
        let Some(&slot) = self.index.get(section) else {
            tracing::trace!(%section, %item, "toggle ignored: unknown section");
            return None;
        };
        let current = &self.sections[slot];
        if current.item(item).is_none() {
            tracing::trace!(%section, %item, "toggle ignored: unknown item");
            return None;
        }
        let next = current.toggled(item)?;
        Some(self.replace(slot, next))
    }

    /// Deselect every item of `section`; other sections are untouched.
    pub fn clear_section(&mut self, section: &Id) -> Option<SelectionSet> {
        let Some(&slot) = self.index.get(section) else {
            tracing::trace!(%section, "clear ignored: unknown section");
            return None;
        };
        let next = self.sections[slot].cleared()?;
        Some(self.replace(slot, next))
    }

    /// Deselect every item in every section.
    pub fn clear_all(&mut self) -> Option<SelectionSet> {
        let mut changed = false;
        for slot in &mut self.sections {
            if let Some(next) = slot.cleared() {
                *slot = Arc::new(next);
                changed = true;
            }
        }
        changed.then(|| self.selection())
    }

    /// Replace the item list of `section` after a data refresh.
    ///
    /// Items whose id survives keep their flag; the rest start unselected.
    /// Always yields a new snapshot for a known section, since the candidate
    /// list itself changed.
    pub fn replace_items(
        &mut self,
        section: &Id,
        items: impl IntoIterator<Item = Item>,
    ) -> Option<SelectionSet> {
        let Some(&slot) = self.index.get(section) else {
            tracing::trace!(%section, "item refresh ignored: unknown section");
            return None;
        };
        let next = self.sections[slot].with_items(items);
        Some(self.replace(slot, next))
    }

    fn replace(&mut self, slot: usize, next: Section) -> SelectionSet {
        self.sections[slot] = Arc::new(next);
        self.selection()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::SelectionState;
    use crate::{Id, Item, Section};

    fn state() -> SelectionState {
        SelectionState::new(vec![
            Section::toggle(
                "tags",
                vec![
                    Item::new(0, "pvp"),
                    Item::new(1, "skyblock"),
                    Item::new(2, "survival"),
                ],
            ),
            Section::exclusive(
                "sort",
                vec![
                    Item::new("players", "Players"),
                    Item::new("rating", "Rating"),
                    Item::new("name", "Name"),
                ],
            ),
        ])
    }

    fn tags() -> Id {
        Id::from("tags")
    }

    fn sort() -> Id {
        Id::from("sort")
    }

    #[test]
    fn toggle_section_is_xor_of_toggles() {
        let mut state = state();
        let sequence = [0, 1, 0, 2, 1, 1, 2, 2];
        for id in sequence {
            state.toggle_item(&tags(), &Id::from(id));
        }
        // 0: twice, 1: three times, 2: three times.
        assert_eq!(state.selected_ids(&tags()), vec![Id::from(1), Id::from(2)]);
        assert!(state.selected_ids(&sort()).is_empty());
    }

    #[test]
    fn exclusive_section_tracks_last_target() {
        let mut state = state();
        for id in ["rating", "players", "name", "name", "rating"] {
            state.toggle_item(&sort(), &Id::from(id));
            let selected = state.selected_ids(&sort());
            assert_eq!(selected, vec![Id::from(id)]);
        }
    }

    #[test]
    fn untouched_sections_keep_identity() {
        let mut state = state();
        let before = state.selection();
        let after = state.toggle_item(&tags(), &Id::from(0)).unwrap();
        assert!(after.same_section(&before, &sort()));
        assert!(!after.same_section(&before, &tags()));
        assert_ne!(before, after);
    }

    #[test]
    fn unchanged_transition_yields_nothing() {
        let mut state = state();
        state.toggle_item(&sort(), &Id::from("rating"));
        assert!(state.toggle_item(&sort(), &Id::from("rating")).is_none());
        assert!(state.clear_section(&tags()).is_none());
    }

    #[test]
    fn lookup_misses_are_silent() {
        let mut state = state();
        let before = state.selection();
        assert!(state.toggle_item(&Id::from("nope"), &Id::from(0)).is_none());
        assert!(state.toggle_item(&tags(), &Id::from(99)).is_none());
        assert!(state.clear_section(&Id::from("nope")).is_none());
        assert!(state.replace_items(&Id::from("nope"), Vec::new()).is_none());
        assert_eq!(before, state.selection());
    }

    #[test]
    fn clear_section_leaves_others() {
        let mut state = state();
        state.toggle_item(&tags(), &Id::from(0));
        state.toggle_item(&tags(), &Id::from(2));
        state.toggle_item(&sort(), &Id::from("name"));
        let before = state.selection();
        let after = state.clear_section(&tags()).unwrap();
        assert_eq!(after.section(&tags()).unwrap().selected_count(), 0);
        assert!(after.same_section(&before, &sort()));
        assert_eq!(state.selected_labels(&sort()), vec!["Name"]);
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut state = state();
        assert!(state.clear_all().is_none());
        state.toggle_item(&tags(), &Id::from(1));
        state.toggle_item(&sort(), &Id::from("players"));
        let set = state.clear_all().unwrap();
        assert!(set.is_cleared());
    }

    #[test]
    fn duplicate_sections_are_dropped() {
        let state = SelectionState::new(vec![
            Section::toggle("tags", vec![Item::new(0, "a")]),
            Section::exclusive("tags", vec![Item::new(0, "b")]),
        ]);
        assert_eq!(state.selection().len(), 1);
        assert_eq!(state.section(&tags()).unwrap().items()[0].label, "a");
    }

    #[test]
    fn replace_items_preserves_surviving_selection() {
        let mut state = state();
        state.toggle_item(&tags(), &Id::from(1));
        state.toggle_item(&tags(), &Id::from(2));
        let set = state
            .replace_items(&tags(), vec![Item::new(2, "survival"), Item::new(3, "creative")])
            .unwrap();
        let labels: Vec<_> = set.section(&tags()).unwrap().selected_labels().collect();
        assert_eq!(labels, vec!["survival"]);
    }
}
