use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, CatalogService, ProgressAggregator, ProgressStore};
use storage::repository::{InMemoryRepository, KeyValueStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::lesson::{LessonIntent, LessonTestHandles};
use crate::views::{CourseCompleteView, CourseView, CoursesView, LessonView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn progress_store(&self) -> Arc<ProgressStore> {
        self.services.progress_store()
    }

    fn aggregator(&self) -> Arc<ProgressAggregator> {
        self.services.aggregator()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Courses,
    Course(&'static str),
    Lesson(&'static str, &'static str, &'static str),
    Complete(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    lesson_handles: Option<LessonTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.lesson_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Course(course_id) => rsx! { CourseView { course_id: course_id.to_string() } },
        ViewKind::Lesson(course_id, module_id, lesson_id) => rsx! {
            LessonView {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
                lesson_id: lesson_id.to_string(),
            }
        },
        ViewKind::Complete(course_id) => rsx! {
            CourseCompleteView { course_id: course_id.to_string() }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<ProgressStore>,
    pub lesson_handles: Option<LessonTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Fires a lesson action the way its buttons do, then lets the spawned
    /// work and the resource refresh finish.
    pub async fn dispatch_lesson(&mut self, intent: LessonIntent) {
        let dispatch = self
            .lesson_handles
            .as_ref()
            .expect("lesson view harness")
            .dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Rebuilds and lets pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_repo(view, InMemoryRepository::new()).await
}

/// Harness whose store starts from a raw persisted `completedLessons` value.
pub async fn setup_view_harness_with_persisted(view: ViewKind, raw: &str) -> ViewHarness {
    let repo = InMemoryRepository::new();
    repo.set(services::COMPLETED_LESSONS_KEY, raw)
        .await
        .expect("seed persisted progress");
    setup_view_harness_with_repo(view, repo).await
}

/// Harness whose storage refuses every write, as a full browser quota would.
pub async fn setup_view_harness_without_space(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_repo(view, InMemoryRepository::with_quota(0)).await
}

async fn setup_view_harness_with_repo(view: ViewKind, repo: InMemoryRepository) -> ViewHarness {
    let storage = Storage {
        kv: Arc::new(repo),
    };
    let catalog = CatalogService::bundled().expect("bundled catalog");
    let services = AppServices::from_storage(&storage, catalog);
    let store = services.progress_store();
    let app = Arc::new(TestApp { services });

    let lesson_handles = match view {
        ViewKind::Lesson(..) => Some(LessonTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            lesson_handles: lesson_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store,
        lesson_handles,
    }
}
