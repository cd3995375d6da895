//! Plain `%{var}` interpolation against the lookup scope.
//!
//! This is the non-delegating string substitution applied to answer strings
//! and mapping keys. Unknown variables interpolate to the empty string, which
//! also makes hierarchy levels like `nodes/%{node}` collapse to an ignorable
//! entry when the variable is absent from the scope.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::types::Scope;

static VARIABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%\{([^}]+)\}").unwrap());

/// Replace every `%{name}` occurrence with the scope value for `name`.
pub fn interpolate(input: &str, scope: &Scope) -> String {
    if !input.contains("%{") {
        return input.to_string();
    }

    VARIABLE_REGEX
        .replace_all(input, |caps: &Captures| {
            let name = caps[1].trim();
            scope.get(name).cloned().unwrap_or_default()
        })
        .into_owned()
}
