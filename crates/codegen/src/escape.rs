/// Characters that carry meaning in Typst markup and must be backslashed.
pub const ESCAPED: [char; 11] = ['\\', '#', '{', '}', '[', ']', '*', '_', '~', '^', '|'];

/// Escape literal text for inclusion in markup.
///
/// Each character in [`ESCAPED`] gets a backslash in front of it. The
/// input is scanned once, so a backslash introduced here is never escaped
/// again.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
