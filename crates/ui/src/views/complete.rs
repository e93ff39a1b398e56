use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ProgressBarVm;

use super::widgets::ProgressBar;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CompleteData {
    course_id: String,
    title: String,
    progress: ProgressBarVm,
}

#[component]
pub fn CourseCompleteView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let aggregator = ctx.aggregator();

    let resource = use_resource(use_reactive((&course_id,), move |(course_id,)| {
        let catalog = catalog.clone();
        let aggregator = aggregator.clone();
        async move {
            let course = catalog.course_by_str(&course_id).ok_or(ViewError::NotFound)?;
            let progress = aggregator.course_progress(course.modules()).await;
            Ok::<_, ViewError>(CompleteData {
                course_id: course.id().to_string(),
                title: course.title().to_owned(),
                progress: progress.into(),
            })
        }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page course-complete",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.progress.complete {
                        h2 { "Course complete!" }
                        p { "You finished every lesson in {data.title}." }
                    } else {
                        h2 { "End of {data.title}" }
                        p { "You reached the last lesson. Some lessons are still open." }
                    }
                    ProgressBar { bar: data.progress.clone() }
                    div { class: "complete-actions",
                        Link {
                            class: "btn btn-primary",
                            to: Route::Course { course_id: data.course_id.clone() },
                            "Back to course"
                        }
                        Link { class: "btn", to: Route::Courses {}, "All courses" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
