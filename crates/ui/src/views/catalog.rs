use dioxus::prelude::*;
use dioxus_router::use_navigator;

use catalog_core::catalog::CompletedSummary;
use catalog_core::filter::{DifficultyFilter, FilterState};
use catalog_core::model::Difficulty;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_challenge_card, ChallengeCardVm};

#[derive(Clone, Debug, PartialEq)]
struct CatalogData {
    cards: Vec<ChallengeCardVm>,
    summary: CompletedSummary,
}

#[component]
pub fn CatalogView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let mut search = use_signal(String::new);
    let mut difficulty = use_signal(DifficultyFilter::default);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let plan = catalog
                .build_catalog()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let cards = plan
                .entries
                .iter()
                .map(map_challenge_card)
                .collect::<Vec<_>>();
            Ok::<_, ViewError>(CatalogData {
                cards,
                summary: plan.summary,
            })
        }
    });

    let state = view_state_from_resource(&resource);
    // Filtering runs synchronously against the materialized cards on every
    // keystroke and difficulty click; the render order itself is untouched.
    let filter = FilterState::new(search(), difficulty());

    rsx! {
        div { class: "page catalog-page",
            header { class: "view-header",
                h2 { class: "view-title", "Challenges" }
                p { class: "view-subtitle", "Pick a challenge and mark it complete when you are done." }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => {
                    let visible_cards = data
                        .cards
                        .iter()
                        .filter(|card| card.matches(&filter))
                        .cloned()
                        .collect::<Vec<_>>();
                    let filter_buttons = std::iter::once((None::<Difficulty>, "all"))
                        .chain(Difficulty::ALL.into_iter().map(|tier| (Some(tier), tier.as_str())))
                        .map(|(tier, label)| {
                            let selected = match tier {
                                None => DifficultyFilter::All,
                                Some(tier) => DifficultyFilter::Only(tier),
                            };
                            let active = difficulty() == selected;
                            let btn_class = if active { "filter-btn active" } else { "filter-btn" };
                            let mut difficulty = difficulty;
                            rsx! {
                                button {
                                    class: "{btn_class}",
                                    r#type: "button",
                                    onclick: move |_| difficulty.set(selected),
                                    "{label}"
                                }
                            }
                        });
                    let summary_pills = Difficulty::ALL
                        .into_iter()
                        .filter(|tier| data.summary.count(*tier) > 0)
                        .map(|tier| {
                            let count = data.summary.count(tier);
                            rsx! {
                                span { class: "summary-pill {tier.as_str()}",
                                    "{tier.as_str()}: {count}"
                                }
                            }
                        });
                    let cards = visible_cards.iter().map(|card| {
                        let nav = navigator;
                        let card_id = card.id.value();
                        let name = card.name.clone();
                        let short_description = card.short_description.clone();
                        let difficulty_key = card.difficulty.as_str();
                        let card_class = if card.is_completed {
                            format!("challenge-card {difficulty_key} completed")
                        } else {
                            format!("challenge-card {difficulty_key}")
                        };
                        rsx! {
                            div {
                                class: "{card_class}",
                                onclick: move |_| {
                                    let _ = nav.push(Route::Challenge { id: card_id });
                                },
                                div { class: "challenge-header",
                                    div { class: "challenge-name", "{name}" }
                                    span { class: "difficulty {difficulty_key}", "{difficulty_key}" }
                                }
                                p { class: "challenge-description", "{short_description}" }
                                if card.is_new {
                                    span { class: "new-badge", "New!" }
                                }
                                if card.is_completed {
                                    div { class: "completed-overlay", "Completed" }
                                }
                            }
                        }
                    });
                    rsx! {
                        div { class: "catalog-search",
                            input {
                                class: "catalog-search-input",
                                r#type: "text",
                                placeholder: "Search challenges...",
                                value: "{search()}",
                                oninput: move |evt| search.set(evt.value()),
                            }
                            if !search().is_empty() {
                                button {
                                    class: "catalog-search-clear",
                                    r#type: "button",
                                    onclick: move |_| search.set(String::new()),
                                    "×"
                                }
                            }
                        }
                        div { class: "filter-bar",
                            {filter_buttons}
                        }
                        if data.summary.total() > 0 {
                            div { class: "completed-summary",
                                span { class: "summary-label", "Completed: {data.summary.total()}" }
                                {summary_pills}
                            }
                        }
                        if visible_cards.is_empty() {
                            div { class: "no-results", "No challenges found" }
                        } else {
                            div { class: "challenges-grid",
                                {cards}
                            }
                        }
                    }
                }
            }
        }
    }
}
