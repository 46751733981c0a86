use dioxus::prelude::*;
use dioxus_router::use_navigator;

use catalog_core::model::ChallengeId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{CatalogView, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_challenge_detail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToggleState {
    Idle,
    Saving,
    Error(ViewError),
}

#[component]
pub fn DetailView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let challenges = ctx.challenges();
    let completions = ctx.completions();
    let mut toggle_state = use_signal(|| ToggleState::Idle);

    let completions_for_resource = completions.clone();
    let resource = use_resource(move || {
        let challenges = challenges.clone();
        let completions = completions_for_resource.clone();
        async move {
            // Waits for the challenge list if the fetch is still in flight,
            // so a deep link taken before data arrives still resolves.
            let Some(challenge) = challenges
                .find(ChallengeId::new(id))
                .await
                .map_err(|_| ViewError::Unknown)?
            else {
                return Ok::<_, ViewError>(None);
            };
            let is_completed = completions
                .is_completed(challenge.id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(Some(map_challenge_detail(&challenge, is_completed)))
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page detail-page",
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
                // Unknown id: leave the catalog on screen, no error dialog.
                ViewState::Ready(None) => rsx! {
                    CatalogView {}
                },
                ViewState::Ready(Some(vm)) => {
                    let difficulty_key = vm.difficulty.as_str();
                    let toggle_label = vm.toggle_label();
                    let toggle_class = if vm.is_completed {
                        "btn toggle-complete completed"
                    } else {
                        "btn toggle-complete"
                    };
                    rsx! {
                        button {
                            class: "back-link",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Catalog {});
                            },
                            "← Back to Challenges"
                        }
                        div { class: "detail-header {difficulty_key}",
                            h1 { class: "detail-title", "{vm.name}" }
                            span { class: "detail-difficulty {difficulty_key}", "{difficulty_key}" }
                        }
                        div { class: "detail-content",
                            div { class: "section",
                                h2 { class: "section-title", "Description" }
                                p { class: "section-content", "{vm.full_description}" }
                            }
                            if !vm.requirements.is_empty() {
                                div { class: "section",
                                    h2 { class: "section-title", "Requirements" }
                                    ul { class: "requirements-list",
                                        for requirement in vm.requirements.iter() {
                                            li { "{requirement}" }
                                        }
                                    }
                                }
                            }
                            if let Some(code) = vm.example_code.as_ref() {
                                div { class: "section",
                                    h2 { class: "section-title", "Example Code" }
                                    pre { class: "code-block", "{code}" }
                                }
                            }
                            if let Some(output) = vm.example_output.as_ref() {
                                div { class: "section",
                                    h2 { class: "section-title", "Example Output" }
                                    pre { class: "code-block", "{output}" }
                                }
                            }
                            if let Some(hint) = vm.hint.as_ref() {
                                div { class: "section",
                                    div { class: "hint-box",
                                        div { class: "hint-title", "💡 Hint" }
                                        p { class: "section-content", "{hint}" }
                                    }
                                }
                            }
                            if !vm.resources.is_empty() {
                                div { class: "section",
                                    h2 { class: "section-title", "Learning Resources" }
                                    div { class: "section-content",
                                        for resource_link in vm.resources.iter() {
                                            a {
                                                class: "resource-link",
                                                href: "{resource_link.url}",
                                                target: "_blank",
                                                "• {resource_link.name}"
                                            }
                                        }
                                    }
                                }
                            }
                            div { class: "section",
                                if let ToggleState::Error(err) = toggle_state() {
                                    p { class: "toggle-error", "{err.message()}" }
                                }
                                button {
                                    class: "{toggle_class}",
                                    r#type: "button",
                                    disabled: toggle_state() == ToggleState::Saving,
                                    onclick: move |_| {
                                        let mut toggle_state = toggle_state;
                                        let mut resource = resource;
                                        let completions = completions.clone();
                                        spawn(async move {
                                            toggle_state.set(ToggleState::Saving);
                                            match completions.toggle(ChallengeId::new(id)).await {
                                                Ok(_) => {
                                                    toggle_state.set(ToggleState::Idle);
                                                    // The write is persisted before this
                                                    // restart, so the re-read sees it.
                                                    resource.restart();
                                                }
                                                Err(_) => {
                                                    toggle_state.set(ToggleState::Error(ViewError::Unknown));
                                                }
                                            }
                                        });
                                    },
                                    "{toggle_label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
