use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CourseCompleteView, CourseView, CoursesView, LessonView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CoursesView)] Courses {},
        #[route("/courses/:course_id", CourseView)] Course { course_id: String },
        #[route("/courses/:course_id/complete", CourseCompleteView)] CourseComplete { course_id: String },
        #[route("/courses/:course_id/:module_id/:lesson_id", LessonView)] Lesson {
            course_id: String,
            module_id: String,
            lesson_id: String,
        },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Learn" }
            ul {
                li { Link { to: Route::Courses {}, "Courses" } }
            }
        }
    }
}
