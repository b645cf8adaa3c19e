//! Typst command builders.
//!
//! These produce the exact byte sequences the downstream renderer expects;
//! bodies are passed through untouched and must already be escaped.

use crate::document::TextAlign;

/// `#name[body]`
pub fn wrap(name: &str, body: &str) -> String {
    format!("#{}[{}]", name, body)
}

/// `#name(args)[body]`
pub fn wrap_with(name: &str, args: &str, body: &str) -> String {
    format!("#{}({})[{}]", name, args, body)
}

/// `[body]`, one item of a list command.
pub fn group(body: &str) -> String {
    format!("[{}]", body)
}

pub const LINK_COLOR: &str = "#show link: set text(fill: blue)";

pub fn language(lang: &str) -> String {
    format!("#set text(lang: \"{}\")", lang)
}

/// Title body must already be escaped.
pub fn title(escaped: &str) -> String {
    format!("#set document(title: [{}])", escaped)
}

pub fn heading(level: u8, body: &str) -> String {
    wrap_with("heading", &format!("level: {}", level), body)
}

/// Wrap `body` for center/right alignment. Left and justified text need no
/// wrapper.
pub fn align(align: Option<TextAlign>, body: String) -> String {
    match align {
        Some(TextAlign::Center) => wrap_with("align", "center", &body),
        Some(TextAlign::Right) => wrap_with("align", "right", &body),
        Some(TextAlign::Left) | Some(TextAlign::Justify) | None => body,
    }
}

pub fn link(href: &str, body: &str) -> String {
    wrap_with("link", &format!("\"{}\"", href), body)
}
