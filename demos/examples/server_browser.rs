// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A faceted server browser, end to end.
//!
//! This example wires together:
//! - `understory_selection` for the filter dropdowns and their search fields,
//! - `understory_placement` for where each dropdown opens,
//! - `understory_facet_query` for debounced query composition, tag completion
//!   and resolving queries against the server list.
//!
//! Time is simulated with a `ManualScheduler`; every step below happens at an
//! explicit tick.
//!
//! Run:
//! - `cargo run -p understory_demos --example server_browser`
//! - `RUST_LOG=debug cargo run -p understory_demos --example server_browser` to see
//!   every composed query and placement decision.

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_facet_query::{
    Aggregator, AggregatorConfig, Listing, ManualScheduler, Query, ResultGate, SubmitMode,
    TextInput, accept_tag, resolve, suggest_tags,
};
use understory_placement::{PlacementConfig, Surface};
use understory_selection::{Id, Item, ItemSearch, Section, SelectionState};

const SERVERS: &str = include_str!("../data/servers.json");

const TAG_CATALOG: [&str; 22] = [
    "pvp",
    "skyblock",
    "minigames",
    "survival",
    "creative",
    "factions",
    "roleplay",
    "economy",
    "parkour",
    "adventure",
    "vanilla",
    "hardcore",
    "modded",
    "events",
    "building",
    "quests",
    "community",
    "redstone",
    "prison",
    "kitpvp",
    "towny",
    "Requires Resourcepack",
];

fn items<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<Item> {
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| Item::new(i as i64, label))
        .collect()
}

fn show(label: &str, servers: &[Listing], query: &Query, gate: &mut ResultGate) {
    if !gate.accept(query.revision()) {
        return;
    }
    let hits = resolve(servers, query);
    println!(
        "\n== {label} (revision {}, changed {:?}) ==",
        query.revision(),
        query.changes()
    );
    println!(
        "text={:?} facets={:?} sort={:?}",
        query.text(),
        query.facets().collect::<Vec<_>>(),
        query.sort().collect::<Vec<_>>()
    );
    for server in hits {
        println!(
            "  {:<12} {}:{:<6} players={:?} rating={:?}",
            server.name, server.address, server.port, server.players, server.rating
        );
    }
}

fn main() -> Result<(), serde_json::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let servers: Vec<Listing> = serde_json::from_str(SERVERS)?;
    tracing::info!(count = servers.len(), "loaded servers");

    let platforms = Id::from("platforms");
    let versions = Id::from("versions");
    let tags = Id::from("tags");
    let order = Id::from("order");

    let mut filters = SelectionState::new([
        Section::toggle(platforms.clone(), items(["Java Edition", "Bedrock Edition"])),
        Section::toggle(
            versions.clone(),
            items(["1.8.9", "1.16.5", "1.21.8", "1.21.10"]),
        ),
        Section::toggle(tags.clone(), items(TAG_CATALOG)),
    ]);
    let mut sort = SelectionState::new([Section::exclusive(
        order.clone(),
        [
            Item::new("players-desc", "Most players"),
            Item::new("rating-desc", "Best rated"),
            Item::new("name", "Name"),
        ],
    )]);

    let mut agg = Aggregator::new(AggregatorConfig::default(), ManualScheduler::new());
    let mut gate = ResultGate::new();
    let mut search = ItemSearch::new();
    let mut input = TextInput::new(SubmitMode::OnDebounce);

    // Initial population, before any interaction.
    if let Some(query) = agg.start() {
        show("initial", &servers, &query, &mut gate);
    }

    // Open the tag dropdown near the bottom-right of the window.
    let viewport = Size::new(1280.0, 800.0);
    let trigger = Rect::new(1120.0, 690.0, 1240.0, 730.0);
    let mut dropdown = Surface::new(PlacementConfig::default());
    let placement = dropdown.open(trigger, viewport);
    println!("\ntag dropdown opens {placement:?}");

    if let Some(section) = filters.section(&tags)
        && section.wants_search_field(false)
    {
        search.set_fragment(tags.clone(), "pv");
        let visible: Vec<&str> = search
            .visible(section)
            .into_iter()
            .map(|item| item.label.as_str())
            .collect();
        println!("tag search \"pv\" shows {visible:?}");
    }

    // Pick "pvp" from the narrowed list, then dismiss with a press elsewhere.
    if let Some(set) = filters.toggle_item(&tags, &Id::from(0)) {
        agg.set_selection("filters", set);
    }
    let panel = Rect::new(920.0, 390.0, 1240.0, 690.0);
    if dropdown.on_pointer_down(Point::new(100.0, 100.0), trigger, panel) {
        search.reset_all();
    }

    // Type into the search bar within the same window.
    agg.scheduler_mut().advance_to(120);
    input.set_value("h", &mut agg);
    agg.scheduler_mut().advance_to(200);
    input.set_value("hyp", &mut agg);
    // Still inside the quiescence window that the last keystroke restarted.
    assert!(agg.advance_to(450).is_none());
    if let Some(query) = agg.advance_to(500) {
        show("after typing \"hyp\" + tag pvp", &servers, &query, &mut gate);
    }

    // Tag completion from the word being typed.
    input.set_value("network kitp", &mut agg);
    let mut selected: Vec<String> = filters
        .selected_labels(&tags)
        .into_iter()
        .map(String::from)
        .collect();
    let suggestions = suggest_tags(input.value(), &TAG_CATALOG, &selected);
    println!("\nsuggestions for {:?}: {suggestions:?}", input.value());
    if let Some(tag) = suggestions.first()
        && let Some(text) = accept_tag(input.value(), tag, &mut selected)
    {
        input.set_value(text, &mut agg);
        if let Some(item) = TAG_CATALOG.iter().position(|t| t == tag)
            && let Some(set) = filters.toggle_item(&tags, &Id::from(item as i64))
        {
            agg.set_selection("filters", set);
        }
    }
    // Sort by rating, then clear text so only facets remain.
    if let Some(set) = sort.toggle_item(&order, &Id::from("rating-desc")) {
        agg.set_sort(set);
    }
    input.clear(&mut agg);
    if let Some(query) = agg.advance_to(900) {
        show("tags pvp + kitpvp, best rated", &servers, &query, &mut gate);
    }

    // Platform and version facets: Java + Bedrock is all-of, versions are any-of.
    if let Some(set) = filters.clear_section(&tags) {
        agg.set_selection("filters", set);
    }
    for (section, item) in [(&platforms, 0), (&platforms, 1), (&versions, 2), (&versions, 3)] {
        if let Some(set) = filters.toggle_item(section, &Id::from(item)) {
            agg.set_selection("filters", set);
        }
    }
    if let Some(set) = sort.toggle_item(&order, &Id::from("name")) {
        agg.set_sort(set);
    }
    if let Some(query) = agg.flush() {
        show("Java + Bedrock, 1.21.8 or 1.21.10", &servers, &query, &mut gate);
    }

    // Clearing everything returns to the full list.
    if let Some(set) = filters.clear_all() {
        agg.set_selection("filters", set);
    }
    if let Some(query) = agg.advance_to(2_000) {
        show("cleared", &servers, &query, &mut gate);
    }

    Ok(())
}
