//! Key path parsing.
//!
//! A lookup key is a sequence of segments separated by `.`. A segment is
//! either unquoted (any characters except `.`, `'` and `"`) or wrapped in
//! matching single or double quotes, in which case it may embed dots:
//! `db."driver.options".timeout` has the segments `db`, `driver.options`
//! and `timeout`.
//!
//! The same grammar is used for top-level lookup keys and for keys handed to
//! delegated backends.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::{LookupError, Result};

/// One token of a raw key: a quoted segment, an unquoted segment, or a run
/// of separator dots. Anything the pattern cannot cover (a stray quote)
/// shows up as a gap between consecutive matches.
static KEY_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'|([^'".]+)|(\.+)"#).unwrap());

/// Split a raw key into its path segments.
///
/// The empty key parses to a single empty segment rather than an error.
/// Runs of adjacent separator dots collapse into one separator, so `a..b`
/// parses the same as `a.b`. Stray quotes, leading/trailing separators and
/// adjacent segments with no separator between them are syntax errors.
pub fn split_key(key: &str) -> Result<Vec<String>> {
    if key.is_empty() {
        return Ok(vec![String::new()]);
    }

    let mut segments = Vec::new();
    let mut tokens = 0usize;
    let mut last_end = 0usize;

    for caps in KEY_TOKEN_REGEX.captures_iter(key) {
        let matched = caps.get(0).expect("match group 0 always present");
        if matched.start() != last_end {
            return Err(LookupError::syntax(key));
        }
        last_end = matched.end();
        tokens += 1;

        if let Some(segment) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
            segments.push(segment.as_str().to_string());
        }
    }

    // A trailing stray quote leaves uncovered input.
    if last_end != key.len() {
        return Err(LookupError::syntax(key));
    }

    // Segments and separators must strictly alternate, starting and ending
    // with a segment.
    if segments.len() * 2 != tokens + 1 {
        return Err(LookupError::syntax(key));
    }

    Ok(segments)
}
