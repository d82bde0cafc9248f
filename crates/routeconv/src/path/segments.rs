use std::borrow::Cow;

/// Lazy iterator over the segments of an anchor-stripped pattern
///
/// For pattern `articles/(?P<year>[0-9]{4})/[^/]+`, yields:
/// `articles` → `(?P<year>[0-9]{4})` → `[^/]+`
///
/// A `/` only separates segments when it sits outside every `[...]` and
/// `(...)` group and is not escaped. An escaped slash stays inside its
/// segment and loses its backslash.
///
/// # Performance
///
/// - **Allocations**: zero, unless a segment contains an escaped slash
/// - **Complexity**: O(n), every byte is scanned exactly once
///
/// # Examples
///
/// ```
/// use routeconv::path::Segments;
///
/// let segments: Vec<_> = Segments::new("a/[b/c]/d").collect();
/// assert_eq!(segments, vec!["a", "[b/c]", "d"]);
///
/// let segments: Vec<_> = Segments::new(r"a\/b/c").collect();
/// assert_eq!(segments, vec!["a/b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: Option<&'a str>,
}

impl<'a> Segments<'a> {
    /// Creates an iterator over an already anchor-stripped pattern
    ///
    /// Use [`tokenize`](super::tokenize) to strip `^`, `$` and the trailing
    /// slash first.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            rest: (!pattern.is_empty()).then_some(pattern),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Cow<'a, str>;

    /// Scans up to the next splitting `/`
    ///
    /// Depth counters start at zero for every segment: a split can only happen
    /// at depth zero, so nothing carries over. Unbalanced groups are not an
    /// error; the counters simply never return to zero and the remainder of
    /// the pattern becomes one segment.
    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        let mut brackets = 0i32;
        let mut parens = 0i32;
        let mut escaped = false;
        let mut slash_escapes = Vec::new();

        // All delimiters are ASCII, so byte offsets are always char boundaries
        for (i, byte) in rest.bytes().enumerate() {
            if escaped {
                escaped = false;
                if byte == b'/' {
                    slash_escapes.push(i - 1);
                }
                continue;
            }

            match byte {
                b'/' if brackets == 0 && parens == 0 => {
                    self.rest = Some(&rest[i + 1..]);
                    return Some(unescape_slashes(&rest[..i], &slash_escapes));
                }
                b'\\' => escaped = true,
                b'[' => brackets += 1,
                b']' => brackets -= 1,
                b'(' => parens += 1,
                b')' => parens -= 1,
                _ => {}
            }
        }

        // A trailing `/` leaves nothing behind it, not an empty segment
        self.rest = None;
        (!rest.is_empty()).then(|| unescape_slashes(rest, &slash_escapes))
    }
}

/// Drops the backslashes at `slash_escapes`, each of which escaped a `/`
///
/// Other backslashes stay put: inside `[...]` or `(...)` an escaped
/// backslash followed by a plain `/` keeps both backslashes.
fn unescape_slashes<'a>(segment: &'a str, slash_escapes: &[usize]) -> Cow<'a, str> {
    if slash_escapes.is_empty() {
        return Cow::Borrowed(segment);
    }

    let mut unescaped = String::with_capacity(segment.len() - slash_escapes.len());
    let mut start = 0;
    for &offset in slash_escapes {
        unescaped.push_str(&segment[start..offset]);
        start = offset + 1;
    }
    unescaped.push_str(&segment[start..]);
    Cow::Owned(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(pattern: &str) -> Vec<String> {
        Segments::new(pattern).map(Cow::into_owned).collect()
    }

    #[test]
    fn test_plain_segments() {
        assert_eq!(collect("users/list"), vec!["users", "list"]);
    }

    #[test]
    fn test_empty_pattern_yields_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_slash_inside_brackets_does_not_split() {
        assert_eq!(collect("a/[b/c]/d"), vec!["a", "[b/c]", "d"]);
    }

    #[test]
    fn test_slash_inside_group_does_not_split() {
        assert_eq!(collect("docs/(?P<path>a/b)"), vec!["docs", "(?P<path>a/b)"]);
    }

    #[test]
    fn test_escaped_slash_is_unescaped() {
        assert_eq!(collect(r"a\/b/c"), vec!["a/b", "c"]);
    }

    #[test]
    fn test_escaped_backslash_before_slash_splits() {
        assert_eq!(collect(r"a\\/b"), vec![r"a\\", "b"]);
    }

    #[test]
    fn test_escaped_backslash_inside_brackets_survives_unescaping() {
        assert_eq!(collect(r"[\\/]x\/y"), vec![r"[\\/]x/y"]);
        assert_eq!(collect(r"[\\/]x"), vec![r"[\\/]x"]);
    }

    #[test]
    fn test_every_escaped_slash_is_unescaped() {
        assert_eq!(collect(r"(a\/b\/c)/d"), vec!["(a/b/c)", "d"]);
    }

    #[test]
    fn test_escaped_bracket_does_not_open_group() {
        assert_eq!(collect(r"\[x/y"), vec![r"\[x", "y"]);
    }

    #[test]
    fn test_unbalanced_group_swallows_rest() {
        assert_eq!(collect("a/(b/c/d"), vec!["a", "(b/c/d"]);
    }

    #[test]
    fn test_double_slash_yields_empty_segment() {
        assert_eq!(collect("a//b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_trailing_slash_adds_no_segment() {
        assert_eq!(collect("a/b/"), vec!["a", "b"]);
    }

    #[test]
    fn test_borrowed_without_escapes() {
        let first = Segments::new("users/list").next();
        assert!(matches!(first, Some(Cow::Borrowed("users"))));
    }

    #[test]
    fn test_clone_restarts_independently() {
        let mut iter = Segments::new("a/b/c");
        let snapshot = iter.clone();
        iter.next();
        assert_eq!(iter.count(), 2);
        assert_eq!(snapshot.count(), 3);
    }
}
