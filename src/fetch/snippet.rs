//! Snippet cleanup shared by the platform fetchers.

use std::sync::LazyLock;

use regex::Regex;

/// Image URL patterns replaced with a `[IMAGE]` placeholder, applied in
/// order. The bare-URL pattern runs first, so an image URL inside a `src`
/// attribute is usually rewritten before the attribute pattern sees it.
static IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"https?://\S+?\.(?:jpg|jpeg|png|gif|webp|svg)").expect("valid regex"),
        Regex::new(r"data:image/[a-z]+;base64,[a-zA-Z0-9+/=]+").expect("valid regex"),
        Regex::new(r#"src=['"]https?://\S+?\.(?:jpg|jpeg|png|gif|webp|svg)['"]"#)
            .expect("valid regex"),
    ]
});

/// Replace inline image URLs in snippet text with `[IMAGE]` placeholders.
pub(crate) fn scrub_images(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let mut processed = content.to_string();
    for pattern in IMAGE_PATTERNS.iter() {
        processed = pattern.replace_all(&processed, "[IMAGE]").into_owned();
    }
    processed
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
