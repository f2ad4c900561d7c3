// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning text into index terms.
//!
//! Two phases, both public because the index builder needs them separately:
//!
//! 1. [`split_terms`]: split camelCase, lowercase, cut on anything outside
//!    `[a-z0-9@]`, drop one-character tokens and stopwords.
//! 2. [`process_term`]: strip a handful of English suffixes, or reject the
//!    term outright.
//!
//! [`tokenize`] is the two composed. Queries, fields, and section term sets
//! all go through the same pipeline, so a query term can only ever match a
//! term that was produced the same way.
//!
//! # Why not a real stemmer?
//!
//! Swift identifiers. A Porter stemmer turns `Sendable`, `Observable`,
//! `Codable` into stems that collide with unrelated words. The suffix list
//! here is short and never touches `-able`/`-ible`.
//!
//! # Idempotence
//!
//! `tokenize(tokenize(x).join(" ")) == tokenize(x)`. Stripping runs to a
//! fixpoint and a stripped term that lands on a stopword is rejected, so
//! re-tokenizing output never changes it.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English function words that carry no search signal.
pub const STOPWORDS: [&str; 29] = [
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is",
    "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "were", "will", "with",
    "you", "your",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Suffix rules in the order they are tried: `(suffix, length the term must exceed)`.
const SUFFIX_RULES: [(&str, usize); 4] = [("ing", 5), ("tion", 6), ("ness", 6), ("ment", 6)];

#[inline]
pub fn is_stopword(term: &str) -> bool {
    STOPWORD_SET.contains(term)
}

/// Insert spaces at camelCase boundaries.
///
/// `fooBar` → `foo Bar` (lowercase then capital) and `URLSession` →
/// `URL Session` (a capital followed by capital+lowercase). Only ASCII
/// letters count.
fn split_camel_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let lower_to_upper = prev.is_ascii_lowercase();
            let acronym_end = prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            if lower_to_upper || acronym_end {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

#[inline]
fn is_term_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '@'
}

/// Phase one: split into raw lowercase terms, no suffix stripping.
pub fn split_terms(text: &str) -> Vec<String> {
    split_camel_case(text)
        .to_lowercase()
        .split(|c: char| !is_term_char(c))
        .filter(|t| t.len() > 1 && !is_stopword(t))
        .map(str::to_string)
        .collect()
}

fn strip_once(term: &str) -> Option<&str> {
    SUFFIX_RULES
        .iter()
        .find(|(suffix, min)| term.len() > *min && term.ends_with(suffix))
        .map(|(suffix, _)| &term[..term.len() - suffix.len()])
}

/// Phase two: normalize one raw term. `None` means drop it.
///
/// ```
/// use skillsearch::process_term;
///
/// assert_eq!(process_term("running").as_deref(), Some("runn"));
/// assert_eq!(process_term("doing").as_deref(), Some("doing"));
/// assert_eq!(process_term("sendable").as_deref(), Some("sendable"));
/// assert_eq!(process_term("the"), None);
/// ```
pub fn process_term(term: &str) -> Option<String> {
    if term.len() <= 1 || is_stopword(term) {
        return None;
    }

    let mut current = term;
    while let Some(stripped) = strip_once(current) {
        current = stripped;
    }

    if is_stopword(current) {
        return None;
    }
    Some(current.to_string())
}

/// Split and normalize text into index terms.
///
/// ```
/// use skillsearch::tokenize;
///
/// assert_eq!(tokenize("URLSession"), vec!["url", "session"]);
/// assert_eq!(tokenize("@MainActor isolation"), vec!["@main", "actor", "isola"]);
/// assert!(tokenize("the and of").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    split_terms(text)
        .iter()
        .filter_map(|t| process_term(t))
        .collect()
}
