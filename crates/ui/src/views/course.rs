use dioxus::prelude::*;
use dioxus_router::Link;
use services::CourseProgress;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ModuleNavVm, ProgressBarVm, map_module_nav, resume_lesson};

use super::widgets::ProgressBar;

#[derive(Clone, Debug, PartialEq)]
struct CourseData {
    course_id: String,
    title: String,
    description: Option<String>,
    progress: ProgressBarVm,
    started: bool,
    resume: Option<(String, String)>,
    modules: Vec<ModuleNavVm>,
}

#[component]
pub fn CourseView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let store = ctx.progress_store();

    let resource = use_resource(use_reactive((&course_id,), move |(course_id,)| {
        let catalog = catalog.clone();
        let store = store.clone();
        async move {
            let course = catalog.course_by_str(&course_id).ok_or(ViewError::NotFound)?;
            let completed = store.get_all_completed().await;
            let progress = CourseProgress::from_completed(course, &completed);
            let resume = resume_lesson(course, &completed).map(|lesson| {
                (lesson.module_id().to_string(), lesson.lesson_id().to_string())
            });
            Ok::<_, ViewError>(CourseData {
                course_id: course.id().to_string(),
                title: course.title().to_owned(),
                description: course.description().map(str::to_owned),
                progress: progress.course.into(),
                started: progress.course.completed > 0,
                resume,
                modules: map_module_nav(course, &progress, &completed, None),
            })
        }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page course",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    header { class: "page-header",
                        h2 { "{data.title}" }
                        if let Some(description) = data.description.as_ref() {
                            p { class: "course-description", "{description}" }
                        }
                    }
                    ProgressBar { bar: data.progress.clone() }
                    if let Some((module_id, lesson_id)) = data.resume.clone() {
                        Link {
                            class: "btn btn-primary",
                            to: Route::Lesson {
                                course_id: data.course_id.clone(),
                                module_id,
                                lesson_id,
                            },
                            if data.started { "Continue" } else { "Start Course" }
                        }
                    } else {
                        p { "This course has no lessons yet." }
                    }
                    ol { class: "module-list",
                        for module in data.modules.iter().cloned() {
                            ModuleSummary {
                                key: "{module.id}",
                                course_id: data.course_id.clone(),
                                module,
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::Courses {}, "Back to courses" }
                },
            }
        }
    }
}

#[component]
fn ModuleSummary(course_id: String, module: ModuleNavVm) -> Element {
    rsx! {
        li { class: if module.completed { "module complete" } else { "module" },
            div { class: "module-header",
                h3 { "{module.title}" }
                if module.completed {
                    span { class: "check", "✓" }
                }
                span { class: "module-progress", "{module.progress_label}" }
            }
            if module.lessons.is_empty() {
                p { class: "module-empty", "No lessons yet." }
            } else {
                ul { class: "lesson-list",
                    for lesson in module.lessons.iter() {
                        li { key: "{lesson.lesson_id}",
                            class: if lesson.completed { "lesson completed" } else { "lesson" },
                            Link {
                                to: Route::Lesson {
                                    course_id: course_id.clone(),
                                    module_id: lesson.module_id.clone(),
                                    lesson_id: lesson.lesson_id.clone(),
                                },
                                "{lesson.title}"
                            }
                            if let Some(duration) = lesson.duration.as_ref() {
                                span { class: "lesson-duration", "{duration}" }
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
