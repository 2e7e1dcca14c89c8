//! Rich-text body rendering
//!
//! Supports the subset the content schema allows: normal paragraphs, bullet
//! lists and the `strong` decorator. Unknown styles render as paragraphs and
//! unknown marks are ignored. All text is HTML-escaped.

use ketebul_common::content::{Body, Span, TextBlock};

pub fn to_html(body: &Body) -> String {
    match body {
        Body::Text(text) => text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect(),
        Body::Blocks(blocks) => blocks_to_html(blocks),
    }
}

fn blocks_to_html(blocks: &[TextBlock]) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for block in blocks {
        let is_bullet = block.list_item.as_deref() == Some("bullet");

        if is_bullet && !in_list {
            html.push_str("<ul>");
            in_list = true;
        } else if !is_bullet && in_list {
            html.push_str("</ul>");
            in_list = false;
        }

        let inner: String = block.children.iter().map(span_to_html).collect();
        if is_bullet {
            html.push_str(&format!("<li>{}</li>", inner));
        } else {
            html.push_str(&format!("<p>{}</p>", inner));
        }
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

fn span_to_html(span: &Span) -> String {
    let text = escape_html(&span.text);
    if span.marks.iter().any(|m| m == "strong") {
        format!("<strong>{}</strong>", text)
    } else {
        text
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
