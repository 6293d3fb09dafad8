//! Escaping for the two Telegram parse modes the bot uses: MarkdownV2 for
//! channel posts, HTML for the admin-facing draft preview.

/// Characters MarkdownV2 requires to be escaped with a preceding backslash.
const MARKDOWN_SPECIALS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escape MarkdownV2 special characters.
///
/// Not idempotent: the backslashes it inserts are themselves re-escaped on a
/// second pass, so callers must escape exactly once per outbound text.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_SPECIALS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
