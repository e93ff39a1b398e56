use super::lesson::LessonIntent;
use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_persisted,
    setup_view_harness_without_space,
};

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_renders_course_progress() {
    let mut harness = setup_view_harness(ViewKind::Courses).await;
    assert!(harness.store.mark_complete("html-basics", "intro-to-html").await);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Web Foundations"), "missing course title in {html}");
    assert!(html.contains("1 of 4 completed"), "missing course count in {html}");
    assert!(html.contains("width: 25%"), "missing progress width in {html}");
    assert!(html.contains("Full Stack JavaScript"), "missing second course in {html}");
    assert!(html.contains("0 of 4 completed"), "missing untouched course in {html}");
    assert!(!html.contains("could not be read"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_warns_about_corrupted_progress() {
    let mut harness = setup_view_harness_with_persisted(ViewKind::Courses, "{broken").await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("could not be read"), "missing banner in {html}");
    assert!(html.contains("0 of 4 completed"), "corrupted value should read as empty in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_modules_and_checkmarks() {
    let mut harness = setup_view_harness_with_persisted(
        ViewKind::Course("web-foundations"),
        r#"["html-basics:intro-to-html","html-basics:html-elements"]"#,
    )
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("HTML Fundamentals"), "missing module in {html}");
    assert!(html.contains("2 of 2 completed"), "missing module count in {html}");
    assert!(html.contains("0 of 1 completed"), "missing css count in {html}");
    assert!(html.contains("✓"), "missing checkmark in {html}");
    assert!(html.contains("Continue"), "missing resume link in {html}");
    assert!(html.contains("width: 50%"), "missing course progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_reports_unknown_course() {
    let mut harness = setup_view_harness(ViewKind::Course("no-such-course")).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("does not exist"), "missing not-found message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_markdown_lesson() {
    let mut harness = setup_view_harness(ViewKind::Lesson(
        "web-foundations",
        "css-basics",
        "intro-to-css",
    ))
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Module 2 of 3"), "missing module position in {html}");
    assert!(html.contains("<h3>Welcome to CSS!</h3>"), "missing lesson body in {html}");
    assert!(html.contains("Mark as Complete"), "missing mark button in {html}");
    assert!(html.contains("Previous Lesson"), "missing previous link in {html}");
    assert!(html.contains("Next Lesson"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_shows_completed_state() {
    let mut harness = setup_view_harness_with_persisted(
        ViewKind::Lesson("web-foundations", "html-basics", "intro-to-html"),
        r#"["html-basics:intro-to-html"]"#,
    )
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Completed ✓"), "missing completed state in {html}");
    assert!(!html.contains("Mark as Complete"), "completed lesson offers marking in {html}");
    assert!(!html.contains("Previous Lesson"), "first lesson has no previous in {html}");
    assert!(html.contains("HTML Elements"), "sidebar should list module lessons in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_last_lesson_finishes_course() {
    let mut harness = setup_view_harness(ViewKind::Lesson(
        "web-foundations",
        "js-first-steps",
        "intro-to-javascript",
    ))
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Finish Course"), "missing finish button in {html}");
    assert!(html.contains("Module 3 of 3"), "missing module position in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_marks_lesson_complete() {
    let mut harness = setup_view_harness(ViewKind::Lesson(
        "web-foundations",
        "css-basics",
        "intro-to-css",
    ))
    .await;

    harness.settle().await;
    harness.dispatch_lesson(LessonIntent::MarkComplete).await;

    let html = harness.render();
    assert!(html.contains("Completed ✓"), "missing completed state in {html}");
    assert!(!html.contains("could not be saved"), "unexpected warning in {html}");
    assert!(harness.store.is_completed("css-basics", "intro-to-css").await);
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_warns_when_mark_is_not_saved() {
    let mut harness = setup_view_harness_without_space(ViewKind::Lesson(
        "web-foundations",
        "css-basics",
        "intro-to-css",
    ))
    .await;

    harness.settle().await;
    harness.dispatch_lesson(LessonIntent::MarkComplete).await;

    let html = harness.render();
    assert!(html.contains("could not be saved"), "missing warning in {html}");
    assert!(html.contains("Mark as Complete"), "lesson should stay unchecked in {html}");
    assert!(!html.contains("Completed ✓"), "unsaved lesson shown as done in {html}");
    assert!(!harness.store.is_completed("css-basics", "intro-to-css").await);
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_unsaved_finish_stays_on_lesson() {
    let mut harness = setup_view_harness_without_space(ViewKind::Lesson(
        "web-foundations",
        "js-first-steps",
        "intro-to-javascript",
    ))
    .await;

    harness.settle().await;
    harness.dispatch_lesson(LessonIntent::Next).await;

    let html = harness.render();
    assert!(html.contains("could not be saved"), "missing warning in {html}");
    assert!(html.contains("Finish Course"), "view navigated away in {html}");
    assert!(html.contains("Mark as Complete"), "lesson should stay unchecked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_reports_unknown_lesson() {
    let mut harness = setup_view_harness(ViewKind::Lesson(
        "web-foundations",
        "html-basics",
        "missing-lesson",
    ))
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("does not exist"), "missing not-found message in {html}");
    assert!(html.contains("Back to course"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn complete_view_smoke_renders_final_snapshot() {
    let mut harness = setup_view_harness_with_persisted(
        ViewKind::Complete("web-foundations"),
        r#"["html-basics:intro-to-html","html-basics:html-elements","css-basics:intro-to-css","js-first-steps:intro-to-javascript"]"#,
    )
    .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course complete!"), "missing heading in {html}");
    assert!(html.contains("4 of 4 completed"), "missing final count in {html}");
}
