//! Markdown to HTML for the web page

use pulldown_cmark::{html, Event, Options, Parser as MdParser};

/// Render report markdown as an HTML fragment.
///
/// Raw HTML in the model's output is escaped rather than passed through.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = MdParser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
