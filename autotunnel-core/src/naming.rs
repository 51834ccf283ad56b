//! Tunnel naming: uniqueness, file-name helpers and fallback names.

use std::collections::HashSet;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

/// Matches `<base>(<digits>)` at the end of a name
static NUMBERED_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.*)\((\d+)\)$").ok());

/// Splits `base(n)` into `(base, "n")`
#[must_use]
pub fn split_numbered_suffix(name: &str) -> Option<(&str, &str)> {
    let captures = NUMBERED_SUFFIX.as_ref()?.captures(name)?;
    let base = captures.get(1)?.as_str();
    let number = captures.get(2)?.as_str();
    Some((base, number))
}

/// Returns true if the name ends in a parenthesized integer
#[must_use]
pub fn has_number_in_parentheses(name: &str) -> bool {
    split_numbered_suffix(name).is_some()
}

/// Returns a name not contained in `existing`.
///
/// A free candidate is returned unchanged. Otherwise `base(1)`, `base(2)`, …
/// are tried in order, where `base` is the candidate with any trailing
/// `(<integer>)` removed. At most `existing.len() + 1` proposals are needed.
#[must_use]
pub fn unique_name(candidate: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(candidate) {
        return candidate.to_string();
    }

    let base = split_numbered_suffix(candidate).map_or(candidate, |(base, _)| base);
    let limit = existing.len() + 1;

    (1..=limit)
        .map(|n| format!("{base}({n})"))
        .find(|proposal| !existing.contains(proposal))
        .unwrap_or_else(|| format!("{base}({})", limit + 1))
}

/// Returns the extension of a file name including the dot (`".conf"`)
#[must_use]
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Strips directories and the extension from a file name.
///
/// `"exports/home.conf"` becomes `"home"`; a name without a dot is
/// returned as is.
#[must_use]
pub fn name_from_file_name(file_name: &str) -> &str {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    base.rfind('.').map_or(base, |idx| &base[..idx])
}

/// Source of fallback tunnel names
pub trait NameGenerator: Send + Sync {
    /// Produces a new candidate name
    fn generate(&self) -> String;
}

/// Generates names of the form `tunnel12345`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTunnelName;

impl NameGenerator for RandomTunnelName {
    fn generate(&self) -> String {
        let suffix: u32 = rand::rng().random_range(10_000..100_000);
        format!("tunnel{suffix}")
    }
}

/// Always returns the same name. Useful for deterministic callers and tests.
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl NameGenerator for FixedName {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
