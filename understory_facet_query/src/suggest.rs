// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag suggestions while typing into the text facet.
//!
//! The word under the cursor (the last word of the text) is matched against a
//! tag catalog. Accepting a suggestion moves it into the tag selection and
//! removes the partial word from the text.
//!
//! ```
//! use understory_facet_query::{accept_tag, suggest_tags};
//!
//! let catalog = ["pvp", "kitpvp", "skyblock", "survival"];
//! let mut selected = vec![String::from("pvp")];
//!
//! let text = "hypixel PV";
//! assert_eq!(suggest_tags(text, &catalog, &selected), ["kitpvp"]);
//!
//! let text = accept_tag(text, "kitpvp", &mut selected).unwrap();
//! assert_eq!(text, "hypixel ");
//! assert_eq!(selected, ["pvp", "kitpvp"]);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Catalog tags containing the last word of `text`, case-insensitively,
/// that are not already selected. Catalog order is kept.
///
/// Text ending in whitespace or holding no word yields no suggestions.
#[must_use]
pub fn suggest_tags<'a, T: AsRef<str>>(
    text: &str,
    catalog: &'a [T],
    selected: &[String],
) -> Vec<&'a str> {
    if text.ends_with(char::is_whitespace) {
        return Vec::new();
    }
    let Some(word) = text.split_whitespace().next_back() else {
        return Vec::new();
    };
    let word = word.to_lowercase();
    catalog
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| tag.to_lowercase().contains(&word))
        .filter(|tag| !selected.iter().any(|s| s == tag))
        .collect()
}

/// Add `tag` to `selected` and drop the partial word from `text`.
///
/// Returns the new text: the remaining words joined by single spaces, with a
/// trailing space when any word remains. Returns `None` and leaves
/// `selected` alone if `tag` is already selected.
pub fn accept_tag(text: &str, tag: &str, selected: &mut Vec<String>) -> Option<String> {
    if selected.iter().any(|s| s == tag) {
        return None;
    }
    selected.push(tag.into());
    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.pop();
    let mut out = words.join(" ");
    if !words.is_empty() {
        out.push(' ');
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{accept_tag, suggest_tags};

    const CATALOG: [&str; 6] = ["pvp", "skyblock", "minigames", "survival", "kitpvp", "Requires Resourcepack"];

    #[test]
    fn suggestions_keep_catalog_order_and_skip_selected() {
        assert_eq!(suggest_tags("pv", &CATALOG, &[]), ["pvp", "kitpvp"]);
        assert_eq!(suggest_tags("pv", &CATALOG, &[String::from("pvp")]), ["kitpvp"]);
        assert_eq!(suggest_tags("resource", &CATALOG, &[]), ["Requires Resourcepack"]);
    }

    #[test]
    fn no_word_means_no_suggestions() {
        assert!(suggest_tags("", &CATALOG, &[]).is_empty());
        assert!(suggest_tags("pv ", &CATALOG, &[]).is_empty());
        assert!(suggest_tags("zzz", &CATALOG, &[]).is_empty());
    }

    #[test]
    fn owned_catalogs_work_too() {
        let catalog: Vec<String> = CATALOG.iter().map(|t| String::from(*t)).collect();
        assert_eq!(suggest_tags("SKY", &catalog, &[]), ["skyblock"]);
    }

    #[test]
    fn accepting_drops_the_last_word() {
        let mut selected = Vec::new();
        assert_eq!(accept_tag("sky", "skyblock", &mut selected).as_deref(), Some(""));
        assert_eq!(
            accept_tag("  big   network  mini", "minigames", &mut selected).as_deref(),
            Some("big network ")
        );
        assert_eq!(selected, vec!["skyblock", "minigames"]);
    }

    #[test]
    fn accepting_a_selected_tag_is_refused() {
        let mut selected = vec![String::from("pvp")];
        assert_eq!(accept_tag("pv", "pvp", &mut selected), None);
        assert_eq!(selected.len(), 1);
    }
}
