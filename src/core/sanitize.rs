// src/core/sanitize.rs

use super::html::{decode_entities, strip_tags};

/// Leading characters that flag an option as the correct one.
pub const ANSWER_MARKERS: [char; 2] = ['*', '✓'];

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

fn clean_once(s: &str) -> String {
    normalize_ws(&strip_tags(decode_entities(s)))
}

/// Cell text → display text: entities decoded, tags stripped, whitespace
/// collapsed and trimmed.
///
/// Iterates to a fixed point, so `clean_text(clean_text(s)) == clean_text(s)`
/// holds even for doubly-encoded input such as `&amp;lt;b&amp;gt;`. Every
/// non-final pass shrinks the string or only rewrites whitespace, so the
/// loop terminates.
pub fn clean_text(s: &str) -> String {
    let mut cur = clean_once(s);
    loop {
        let next = clean_once(&cur);
        if next == cur {
            return cur;
        }
        cur = next;
    }
}

/// Length as a reader counts it (chars, not bytes).
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// If `raw` starts with a correct-answer marker, return the text with the
/// marker (and the whitespace after it) removed.
pub fn strip_answer_marker(raw: &str) -> Option<&str> {
    let t = raw.trim_start();
    let rest = t.strip_prefix(ANSWER_MARKERS)?;
    Some(rest.trim_start())
}

/// Cut to at most `max` chars, appending "..." when something was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_ix, _)) => join!(&s[..byte_ix], "..."),
        None => s!(s),
    }
}
