use std::collections::{HashMap, HashSet};

use course_core::model::{ContentFormat, Lesson};

/// Renders a lesson body to sanitized HTML.
///
/// Returns `None` when the lesson has no content yet.
#[must_use]
pub fn lesson_body_html(lesson: &Lesson) -> Option<String> {
    let content = lesson.content()?;
    if content.trim().is_empty() {
        return None;
    }
    let html = match lesson.format() {
        ContentFormat::Html => sanitize_html(content),
        ContentFormat::Markdown => markdown_to_html(content),
    };
    Some(html)
}

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Lesson HTML is authored content, but it is still rendered through
/// `dangerous_inner_html`, so only a reading-oriented subset survives.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "span", "br", "hr", "em", "strong", "b",
        "i", "del", "code", "pre", "blockquote", "ul", "ol", "li", "a", "table", "thead", "tbody",
        "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("code", ["class"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
