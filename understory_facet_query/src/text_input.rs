// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A search field feeding the text facet.

use alloc::string::String;

use crate::{Aggregator, Query, Scheduler};

/// When a [`TextInput`] forwards its value to the aggregator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitMode {
    /// Every edit is forwarded; the aggregator's quiescence window debounces.
    #[default]
    OnDebounce,
    /// Every edit is forwarded and composed at once.
    OnChange,
    /// Edits are held until [`TextInput::submit`].
    OnSubmit,
}

/// Editable text value with a [`SubmitMode`].
///
/// ```
/// use understory_facet_query::{Aggregator, AggregatorConfig, ManualScheduler, SubmitMode, TextInput};
///
/// let mut agg = Aggregator::new(AggregatorConfig::default(), ManualScheduler::new());
/// let mut input = TextInput::new(SubmitMode::OnSubmit);
///
/// assert!(input.set_value("skyblock", &mut agg).is_none());
/// assert_eq!(agg.pending(), None);
///
/// let query = input.submit(&mut agg).unwrap();
/// assert_eq!(query.text(), "skyblock");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    mode: SubmitMode,
}

impl TextInput {
    /// Create an empty input.
    #[must_use]
    pub const fn new(mode: SubmitMode) -> Self {
        Self {
            value: String::new(),
            mode,
        }
    }

    /// Current raw value, exactly as typed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Submit mode.
    #[must_use]
    pub const fn mode(&self) -> SubmitMode {
        self.mode
    }

    /// Replace the value after an edit.
    ///
    /// Returns a query only in [`SubmitMode::OnChange`], where the edit is
    /// composed immediately.
    pub fn set_value<S: Scheduler>(
        &mut self,
        value: impl Into<String>,
        aggregator: &mut Aggregator<S>,
    ) -> Option<Query> {
        self.value = value.into();
        match self.mode {
            SubmitMode::OnDebounce => {
                aggregator.set_text(&self.value);
                None
            }
            SubmitMode::OnChange => {
                aggregator.set_text(&self.value);
                aggregator.flush()
            }
            SubmitMode::OnSubmit => None,
        }
    }

    /// Explicit submission (the submit key).
    ///
    /// Only [`SubmitMode::OnSubmit`] inputs forward here; returns `None` when
    /// the submitted text matches what the aggregator already holds.
    pub fn submit<S: Scheduler>(&mut self, aggregator: &mut Aggregator<S>) -> Option<Query> {
        if self.mode != SubmitMode::OnSubmit {
            return None;
        }
        aggregator.set_text(&self.value);
        aggregator.flush()
    }

    /// Empty the field, as its reset button does.
    pub fn clear<S: Scheduler>(&mut self, aggregator: &mut Aggregator<S>) -> Option<Query> {
        self.set_value(String::new(), aggregator)
    }
}
