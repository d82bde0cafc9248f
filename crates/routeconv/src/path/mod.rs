//! Pattern tokenizing: anchor stripping and segment splitting
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

pub mod segments;
pub use segments::Segments;

/// Strips routing anchors from a raw pattern
///
/// Removes one leading `^` and any run of trailing `/` and `$` characters.
/// Anchors are routing-syntax noise, not path content.
///
/// # Examples
///
/// ```
/// use routeconv::path::strip_anchors;
///
/// assert_eq!(strip_anchors("^users/$"), "users");
/// assert_eq!(strip_anchors("^$"), "");
/// assert_eq!(strip_anchors("groups/<gid>"), "groups/<gid>");
/// ```
pub fn strip_anchors(pattern: &str) -> &str {
    pattern
        .strip_prefix('^')
        .unwrap_or(pattern)
        .trim_end_matches(['/', '$'])
}

/// Splits a raw pattern into its segments
///
/// Every call re-scans the input; the returned iterator borrows from
/// `pattern` and can be cloned to restart.
///
/// # Examples
///
/// ```
/// use routeconv::path::tokenize;
///
/// let segments: Vec<_> = tokenize("^articles/(?P<year>[0-9]{4})/$").collect();
/// assert_eq!(segments, vec!["articles", "(?P<year>[0-9]{4})"]);
/// ```
pub fn tokenize(pattern: &str) -> Segments<'_> {
    Segments::new(strip_anchors(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("^$", "")]
    #[case("", "")]
    #[case("^users/", "users")]
    #[case("users/$", "users")]
    #[case("^^users", "^users")]
    #[case("a//", "a")]
    fn test_strip_anchors(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_anchors(raw), expected);
    }

    #[rstest]
    #[case("articles")]
    #[case("favicon.ico")]
    #[case("(?P<page>(a|b))")]
    fn test_single_segment_without_slash(#[case] raw: &str) {
        let segments: Vec<_> = tokenize(raw).collect();
        assert_eq!(segments, vec![strip_anchors(raw)]);
    }

    #[test]
    fn test_tokenize_restarts_on_every_call() {
        let first: Vec<_> = tokenize("a/b").collect();
        let second: Vec<_> = tokenize("a/b").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tokenize_root_patterns_yield_nothing() {
        assert_eq!(tokenize("^$").count(), 0);
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("/").count(), 0);
    }
}
