//! Segment classification and normalization
//!
//! Maps one raw directory segment (`(admin)`, `[id]`, `[...slug]`, `about`) to the
//! syntax the client router understands. All functions are **pure** and total:
//! every input string has an answer, nothing here can fail.

use std::borrow::Cow;

/// Wildcard marker emitted for catch-all segments and not-found routes
pub const WILDCARD: &str = "*";

/// The kinds of raw segment a directory name can express
///
/// Borrowed from the input, so classifying never allocates.
///
/// # Examples
///
/// ```
/// use nexroute::segment::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("(marketing)"), SegmentKind::Group("marketing"));
/// assert_eq!(classify_segment("[...slug]"), SegmentKind::CatchAll("slug"));
/// assert_eq!(classify_segment("[id]"), SegmentKind::Dynamic("id"));
/// assert_eq!(classify_segment("about"), SegmentKind::Static("about"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// `(name)`: organizes files, contributes no URL component
    Group(&'a str),
    /// `[...name]`: matches any remaining suffix
    CatchAll(&'a str),
    /// `[name]`: captures one named parameter
    Dynamic(&'a str),
    /// Anything else, used literally
    Static(&'a str),
}

/// Classifies a raw segment
///
/// # Rules (first match wins)
///
/// 1. **Group**: `(name)` with a non-empty name containing no `)`
/// 2. **Catch-all**: `[...name]` with a non-empty name
/// 3. **Dynamic**: `[name]` with a non-empty name containing no `]`
/// 4. **Static**: any other text, including `()`, `[]` and `[[...name]]`
pub fn classify_segment(segment: &str) -> SegmentKind<'_> {
    if let Some(name) = segment
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .filter(|name| !name.is_empty() && !name.contains(')'))
    {
        return SegmentKind::Group(name);
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            if let Some(name) = inner.strip_prefix("...").filter(|name| !name.is_empty()) {
                return SegmentKind::CatchAll(name);
            }

            if !inner.is_empty() && !inner.contains(']') {
                return SegmentKind::Dynamic(inner);
            }

            SegmentKind::Static(segment)
        }
        None => SegmentKind::Static(segment),
    }
}

impl SegmentKind<'_> {
    /// Whether this segment disappears from the URL
    pub fn is_group(&self) -> bool {
        matches!(self, SegmentKind::Group(_))
    }
}

/// Normalizes a raw segment to client-router syntax
///
/// Returns `Cow::Borrowed` for everything except dynamic segments, so literal
/// segments cost nothing.
///
/// # Examples
///
/// ```
/// use nexroute::segment::normalize_segment;
///
/// assert_eq!(normalize_segment("(admin)"), "");
/// assert_eq!(normalize_segment("[...slug]"), "*");
/// assert_eq!(normalize_segment("[id]"), ":id");
/// assert_eq!(normalize_segment("about"), "about");
/// ```
pub fn normalize_segment(segment: &str) -> Cow<'_, str> {
    match classify_segment(segment) {
        SegmentKind::Group(_) => Cow::Borrowed(""),
        SegmentKind::CatchAll(_) => Cow::Borrowed(WILDCARD),
        SegmentKind::Dynamic(name) => Cow::Owned(format!(":{name}")),
        SegmentKind::Static(segment) => Cow::Borrowed(segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(admin)", "")]
    #[case("(marketing)", "")]
    #[case("[...slug]", "*")]
    #[case("[id]", ":id")]
    #[case("[postId]", ":postId")]
    #[case("about", "about")]
    #[case("", "")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_segment(raw), expected);
    }

    #[rstest]
    #[case("()")]
    #[case("[]")]
    #[case("(a)b)")]
    #[case("[[...slug]]")]
    #[case("[a]b]")]
    #[case("(admin")]
    #[case("id]")]
    fn test_malformed_segments_stay_literal(#[case] raw: &str) {
        assert_eq!(normalize_segment(raw), raw);
        assert_eq!(classify_segment(raw), SegmentKind::Static(raw));
    }

    #[test]
    fn test_empty_catch_all_name_is_dynamic() {
        // `[...]` has no catch-all name, so it falls through to the dynamic rule
        assert_eq!(classify_segment("[...]"), SegmentKind::Dynamic("..."));
        assert_eq!(normalize_segment("[...]"), ":...");
    }

    #[test]
    fn test_group_wins_over_brackets() {
        assert_eq!(classify_segment("([id])"), SegmentKind::Group("[id]"));
    }

    #[test]
    fn test_static_is_borrowed() {
        assert!(matches!(normalize_segment("docs"), Cow::Borrowed("docs")));
        assert!(matches!(normalize_segment("[id]"), Cow::Owned(_)));
    }
}
