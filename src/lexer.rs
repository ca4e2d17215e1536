//! Delimiter tokenization for pipeline lines.
//!
//! The same two functions split a line into pipe-delimited stages and a
//! stage into argument words. Consecutive delimiters never produce an
//! empty token, mirroring `strtok`-style field semantics. Fields are
//! not trimmed: a whitespace-only stage survives the `|` split and only
//! collapses when split again on spaces, which is how the parser tells
//! a blank stage apart from a missing one.

/// Split `text` on `delim`, keeping only non-empty fields.
///
/// `"a  b"` split on `' '` yields `["a", "b"]`, not three tokens.
pub fn split(text: &str, delim: char) -> Vec<&str> {
    text.split(delim).filter(|field| !field.is_empty()).collect()
}

/// Number of fields [`split`] would produce; 0 for an empty input.
///
/// Callers size pipeline storage from this count before performing the
/// actual split, so it must always agree with `split(text, delim).len()`.
pub fn count(text: &str, delim: char) -> usize {
    text.split(delim).filter(|field| !field.is_empty()).count()
}
