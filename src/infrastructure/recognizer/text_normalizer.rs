use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans raw recognizer output: collapses whitespace and turns all-caps
/// transducer output into sentence case. Mixed-case text keeps its casing.
pub fn normalize_transcript(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");

    if is_all_caps(&collapsed) {
        to_sentence_case(&collapsed)
    } else {
        collapsed.into_owned()
    }
}

fn is_all_caps(text: &str) -> bool {
    let mut has_letters = false;
    for ch in text.chars().filter(|c| c.is_alphabetic()) {
        if ch.is_lowercase() {
            return false;
        }
        has_letters |= ch.is_uppercase();
    }
    has_letters
}

fn to_sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;

    for ch in text.to_lowercase().chars() {
        if capitalize_next && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
        if matches!(ch, '.' | '!' | '?') {
            capitalize_next = true;
        }
    }

    out
}
