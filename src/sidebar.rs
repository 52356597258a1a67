//! Sidebar content splicing.
//!
//! The rendered standings block is framed by a pair of invisible markdown
//! markers. Splicing replaces the first span between the markers in place,
//! or appends the block when the document has no markers yet. The pattern
//! requires two marker occurrences; a document with exactly one marker
//! does not match and falls through to append.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};

/// Marker-pair pattern framing the standings block in the community
/// description. The markers themselves are part of the rendered text, so
/// an in-place replace leaves the document splice-able on the next cycle.
pub const DEFAULT_STANDINGS_PATTERN: &str =
    r"\[]\(/pennant/standings\).*\[]\(/pennant/standings\)";

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile_pattern(DEFAULT_STANDINGS_PATTERN).expect("default standings pattern must compile")
});

/// The compiled default marker-pair pattern
pub fn default_pattern() -> &'static Regex {
    &DEFAULT_PATTERN
}

/// Compile a splice pattern with `.` matching newlines, since the
/// standings block spans lines
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
}

/// Merge rendered standings text into an existing document.
///
/// Replaces the first span matched by `pattern` with `rendered` verbatim;
/// with no match, appends `rendered` after a blank line. Returns the new
/// document; the input is never mutated. Callers must skip the merge (and
/// the platform write) entirely when `rendered` is empty.
pub fn merge(existing: &str, rendered: &str, pattern: &Regex) -> String {
    if pattern.is_match(existing) {
        pattern.replace(existing, NoExpand(rendered)).into_owned()
    } else {
        format!("{existing}\n\n{rendered}")
    }
}
