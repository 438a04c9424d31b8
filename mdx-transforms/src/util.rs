//! Small shared helpers.

use regex::Regex;

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. It will
/// never match any input, which is safer than a trivial pattern like `^$`
/// that would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  // The pattern asserts something impossible and is guaranteed to be valid
  #[allow(clippy::unwrap_used, reason = "both patterns are known-valid")]
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
