#[cfg(test)]
use std::cell::RefCell;
use std::collections::HashMap;
#[cfg(test)]
use std::rc::Rc;
use std::time::Duration;

use course_core::model::LessonRef;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::CourseProgress;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    LessonLinkVm, MarkOutcome, ModuleNavVm, WarningToast, map_lesson_page, mark_and_confirm,
    nav_expanded,
};

use super::widgets::{ProgressBar, WarningBanner};

const WARNING_TIMEOUT: Duration = Duration::from_secs(4);

fn link_route(course_id: &str, link: &LessonLinkVm) -> Route {
    match link {
        LessonLinkVm::Lesson {
            module_id,
            lesson_id,
        } => Route::Lesson {
            course_id: course_id.to_owned(),
            module_id: module_id.clone(),
            lesson_id: lesson_id.clone(),
        },
        LessonLinkVm::CourseComplete => Route::CourseComplete {
            course_id: course_id.to_owned(),
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LessonIntent {
    MarkComplete,
    /// Marks the lesson if needed, then moves on. Stays put when the mark
    /// could not be saved so the warning stays visible.
    Next,
}

#[component]
pub fn LessonView(course_id: String, module_id: String, lesson_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let store = ctx.progress_store();
    let toggled = use_signal(HashMap::<String, bool>::new);
    let toast = use_signal(WarningToast::default);
    let saving = use_signal(|| false);

    let resource = use_resource(use_reactive(
        (&course_id, &module_id, &lesson_id),
        move |(course_id, module_id, lesson_id)| {
            let catalog = catalog.clone();
            let store = store.clone();
            async move {
                let lesson = LessonRef::parse_parts(&module_id, &lesson_id)
                    .map_err(|_| ViewError::NotFound)?;
                let course = catalog.course_by_str(&course_id).ok_or(ViewError::NotFound)?;
                let completed = store.get_all_completed().await;
                let progress = CourseProgress::from_completed(course, &completed);
                map_lesson_page(course, &lesson, &progress, &completed).ok_or(ViewError::NotFound)
            }
        },
    ));

    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let store = ctx.progress_store();
        use_callback(move |intent: LessonIntent| {
            if *saving.peek() {
                return;
            }
            let page = match &*resource.peek() {
                Some(Ok(page)) => page.clone(),
                _ => return,
            };
            let store = store.clone();
            let mut saving = saving;
            let mut toast = toast;
            let mut resource = resource;
            spawn(async move {
                let saved = if page.is_completed {
                    true
                } else {
                    saving.set(true);
                    let outcome = mark_and_confirm(&store, &page.lesson).await;
                    saving.set(false);
                    resource.restart();
                    if let Some(message) = outcome.warning() {
                        let ticket = toast.write().show(message);
                        spawn(async move {
                            tokio::time::sleep(WARNING_TIMEOUT).await;
                            toast.write().expire(ticket);
                        });
                    }
                    outcome == MarkOutcome::Completed
                };
                if intent == LessonIntent::Next && saved {
                    navigator.push(link_route(&page.course_id, &page.next));
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LessonTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    rsx! {
        div { class: "page lesson-page",
            if let Some(message) = toast.read().message() {
                WarningBanner { message: message.to_string() }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(page) => {
                    rsx! {
                        div { class: "lesson-layout",
                            ModuleNavigation {
                                course_id: page.course_id.clone(),
                                modules: page.modules.clone(),
                                toggled,
                            }
                            article { class: "lesson",
                                header { class: "lesson-header",
                                    Link {
                                        class: "breadcrumb",
                                        to: Route::Course { course_id: page.course_id.clone() },
                                        "{page.course_title}"
                                    }
                                    p { class: "lesson-module", "{page.module_position_label}: {page.module_title}" }
                                    h2 { "{page.title}" }
                                    if let Some(duration) = page.duration.as_ref() {
                                        span { class: "lesson-duration", "{duration}" }
                                    }
                                    ProgressBar { bar: page.course_progress.clone() }
                                }
                                if let Some(body) = page.body_html.as_ref() {
                                    div { class: "lesson-body", dangerous_inner_html: "{body}" }
                                } else {
                                    p { class: "lesson-body lesson-placeholder",
                                        "Content for this lesson is coming soon."
                                    }
                                }
                                footer { class: "lesson-actions",
                                    if let Some(previous) = page.previous.as_ref() {
                                        Link {
                                            class: "btn",
                                            to: link_route(&page.course_id, previous),
                                            "Previous Lesson"
                                        }
                                    }
                                    if page.is_completed {
                                        span { class: "btn btn-done", "Completed ✓" }
                                    } else {
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            disabled: saving(),
                                            onclick: move |_| dispatch_intent.call(LessonIntent::MarkComplete),
                                            "Mark as Complete"
                                        }
                                    }
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        disabled: saving(),
                                        onclick: move |_| dispatch_intent.call(LessonIntent::Next),
                                        if page.next == LessonLinkVm::CourseComplete { "Finish Course" } else { "Next Lesson" }
                                    }
                                }
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::Course { course_id: course_id.clone() }, "Back to course" }
                },
            }
        }
    }
}

#[component]
fn ModuleNavigation(
    course_id: String,
    modules: Vec<ModuleNavVm>,
    toggled: Signal<HashMap<String, bool>>,
) -> Element {
    rsx! {
        nav { class: "module-nav",
            for module in modules {
                {
                    let expanded = nav_expanded(&module, toggled.read().get(&module.id).copied());
                    let module_id = module.id.clone();
                    rsx! {
                        section { key: "{module.id}", class: "module-nav-section",
                            button {
                                class: "module-nav-toggle",
                                r#type: "button",
                                "aria-expanded": "{expanded}",
                                onclick: move |_| {
                                    let mut toggled = toggled;
                                    toggled.write().insert(module_id.clone(), !expanded);
                                },
                                span { class: "module-nav-caret", if expanded { "▾" } else { "▸" } }
                                span { class: "module-nav-title", "{module.title}" }
                                if module.completed {
                                    span { class: "check", "✓" }
                                }
                            }
                            if expanded {
                                ul { class: "module-nav-lessons",
                                    for lesson in module.lessons.iter() {
                                        li {
                                            key: "{lesson.lesson_id}",
                                            class: if lesson.active { "active" } else { "" },
                                            Link {
                                                to: Route::Lesson {
                                                    course_id: course_id.clone(),
                                                    module_id: lesson.module_id.clone(),
                                                    lesson_id: lesson.lesson_id.clone(),
                                                },
                                                "{lesson.title}"
                                            }
                                            if lesson.completed {
                                                span { class: "check", "✓" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LessonTestHandles {
    dispatch: Rc<RefCell<Option<Callback<LessonIntent>>>>,
}

#[cfg(test)]
impl LessonTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<LessonIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<LessonIntent> {
        (*self.dispatch.borrow()).expect("lesson dispatch registered")
    }
}
