//! Term normalizer — turns free text into a whole-phrase matchable form.
//!
//! Normalization is the contract that makes phrase containment work: the
//! same function is applied to search terms at compile time and to stored
//! title/description text at evaluation time, so a term matches exactly
//! when its tokens appear as a contiguous run of whole tokens in the text.
//!
//! The rules are deliberately minimal: maximal runs of ASCII letters and
//! digits become lowercase tokens; every other character (punctuation,
//! hyphens, whitespace, non-ASCII) is a separator; tokens are joined with
//! a single space. `normalize_phrase` is idempotent.

/// Normalize a raw string into a lowercase, single-spaced token phrase.
///
/// Returns the empty string when the input contains no ASCII alphanumerics;
/// callers must treat that as "contributes no predicate".
///
/// ```
/// use bulletin_core::normalize::normalize_phrase;
/// assert_eq!(normalize_phrase("Machine-Learning, AI!"), "machine learning ai");
/// assert_eq!(normalize_phrase("   "), "");
/// ```
pub fn normalize_phrase(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_token = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if !in_token && !out.is_empty() {
                out.push(' ');
            }
            out.push(ch.to_ascii_lowercase());
            in_token = true;
        } else {
            in_token = false;
        }
    }
    out
}

/// Whole-token phrase containment over two already-normalized phrases.
///
/// Both sides are padded with a single leading/trailing space so the
/// needle must align with token boundaries: "deep learning" is found in
/// "intro to deep learning systems" but not in "deeplearning" and not in
/// "learning deep".
pub fn phrase_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let padded_hay = format!(" {haystack} ");
    let padded_needle = format!(" {needle} ");
    padded_hay.contains(&padded_needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
