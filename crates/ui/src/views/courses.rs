use dioxus::prelude::*;
use dioxus_router::Link;
use services::{CourseProgress, LoadStatus};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_card};

use super::widgets::{ProgressBar, WarningBanner};

#[derive(Clone, Debug, PartialEq)]
struct CoursesData {
    cards: Vec<CourseCardVm>,
    corrupted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetState {
    Idle,
    Confirming,
    Resetting,
    Error(ViewError),
}

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let store = ctx.progress_store();
    let store_for_reset = ctx.progress_store();
    let mut reset_state = use_signal(|| ResetState::Idle);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let store = store.clone();
        async move {
            let corrupted = store.load_status().await == LoadStatus::Corrupted;
            let completed = store.get_all_completed().await;
            let cards = catalog
                .courses()
                .iter()
                .map(|course| {
                    map_course_card(course, &CourseProgress::from_completed(course, &completed))
                })
                .collect();
            Ok::<_, ViewError>(CoursesData { cards, corrupted })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page courses",
            header { class: "page-header",
                h2 { "Courses" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| reset_state.set(ResetState::Confirming),
                    "Reset progress"
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.corrupted {
                        WarningBanner {
                            message: "Saved progress could not be read. Reset progress to start tracking again.".to_string(),
                        }
                    }
                    if data.cards.is_empty() {
                        p { "No courses available." }
                    } else {
                        ul { class: "course-list",
                            for card in data.cards.iter().cloned() {
                                CourseCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            if matches!(reset_state(), ResetState::Confirming | ResetState::Resetting | ResetState::Error(_)) {
                div {
                    class: "modal-overlay",
                    onclick: move |_| reset_state.set(ResetState::Idle),
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Reset all progress?" }
                        p { class: "modal-body",
                            "Every lesson in every course will be marked as not started."
                        }
                        if let ResetState::Error(err) = reset_state() {
                            p { class: "modal-error", "{err.message()}" }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| reset_state.set(ResetState::Idle),
                                "Cancel"
                            }
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                disabled: reset_state() == ResetState::Resetting,
                                onclick: move |_| {
                                    let mut reset_state = reset_state;
                                    let mut resource = resource;
                                    let store = store_for_reset.clone();
                                    spawn(async move {
                                        reset_state.set(ResetState::Resetting);
                                        if store.reset().await {
                                            reset_state.set(ResetState::Idle);
                                        } else {
                                            reset_state.set(ResetState::Error(ViewError::Unknown));
                                        }
                                        resource.restart();
                                    });
                                },
                                "Reset"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    rsx! {
        li { class: "course-card",
            h3 { "{card.title}" }
            if let Some(description) = card.description.as_ref() {
                p { class: "course-description", "{description}" }
            }
            p { class: "course-meta", "{card.lesson_count_label}" }
            ProgressBar { bar: card.progress.clone() }
            Link { class: "btn btn-primary", to: Route::Course { course_id: card.id.clone() },
                "Open Course"
            }
        }
    }
}
