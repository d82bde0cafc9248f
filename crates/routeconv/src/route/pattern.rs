//! Segment classification
//!
//! Pure functional parsing of raw pattern segments into typed parts.
//! All functions are **pure**: same input → same output, no side effects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::converter::{TypeRegistry, DEFAULT_PLACEHOLDER_REGEX};
use crate::error::SegmentError;

/// Characters that make a segment a regex rather than a literal
pub const METACHARACTERS: &[char] = &[
    '.', '*', '?', '+', '^', '$', '|', '\\', '[', ']', '(', ')', '{', '}',
];

/// Placeholder shown for a capture without a parameter name
pub const UNNAMED_PLACEHOLDER: &str = "TODO";

// `(?!REJECT)?(?P<NAME>(REGEX))` or `(?!REJECT)?(?P<NAME>REGEX)`
static NAMED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\(\?!(?P<reject>[^)]+)\))?\(\?P<(?P<name>[^>]+)>\(?(?P<regex>[^)]+)\)?\)$",
    )
    .unwrap()
});

// `<TYPE:NAME>` or `<NAME>`
static TYPED_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(?:(?P<type>[^:>]+):)?(?P<name>[^:>]+)>$").unwrap());

// `favicon.ico`, `robots\.txt`, `.well-known`, `\.hidden`
static LOOSE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\\?\.)?[A-Za-z0-9_-]+(?:\\?\.[A-Za-z0-9_-]+)?$").unwrap()
});

// Total: every string matches, with or without a leading reject group
static OPAQUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?:\(\?!(?P<reject>[^)]+)\))?(?P<regex>.*)$").unwrap());

/// A path segment matched by a regex, optionally bound to a parameter
///
/// When `reject` is non-empty the segment must also NOT match it
/// (negative lookahead).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Capture {
    pub regex: String,
    pub name: String,
    pub reject: String,
}

impl Capture {
    pub fn new(regex: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            name: name.into(),
            reject: String::new(),
        }
    }

    /// Adds a negative-lookahead reject clause (builder pattern)
    pub fn with_reject(mut self, reject: impl Into<String>) -> Self {
        self.reject = reject.into();
        self
    }

    pub fn has_reject(&self) -> bool {
        !self.reject.is_empty()
    }

    /// Display token renderers substitute for this capture
    ///
    /// # Examples
    ///
    /// ```
    /// use routeconv::Capture;
    ///
    /// assert_eq!(Capture::new("[0-9]+", "year").placeholder(), "YEAR");
    /// assert_eq!(Capture::new("a|b", "").placeholder(), "TODO");
    /// ```
    pub fn placeholder(&self) -> String {
        if self.name.is_empty() {
            UNNAMED_PLACEHOLDER.to_string()
        } else {
            self.name.to_uppercase()
        }
    }
}

/// One normalized path segment
///
/// Functional sum type: a segment is either matched verbatim or by a regex.
///
/// # Examples
///
/// ```
/// use routeconv::{classify_segment, Part, TypeRegistry};
///
/// let registry = TypeRegistry::builtin();
///
/// let part = classify_segment("articles", registry).unwrap().part;
/// assert_eq!(part, Part::literal("articles"));
///
/// let part = classify_segment("<int:year>", registry).unwrap().part;
/// assert_eq!(part, Part::capture("[0-9]+", "year"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Segment matched verbatim
    Literal { value: String },
    /// Segment matched by a regex
    Capture(Capture),
}

impl Part {
    pub fn literal(value: impl Into<String>) -> Self {
        Part::Literal {
            value: value.into(),
        }
    }

    pub fn capture(regex: impl Into<String>, name: impl Into<String>) -> Self {
        Part::Capture(Capture::new(regex, name))
    }

    pub fn as_capture(&self) -> Option<&Capture> {
        match self {
            Part::Capture(capture) => Some(capture),
            Part::Literal { .. } => None,
        }
    }
}

/// Which classification rule accepted a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `(?P<name>regex)`, optionally behind a reject group
    NamedRegex,
    /// `<type:name>` or `<name>`
    Placeholder,
    /// No regex metacharacters at all
    Literal,
    /// Filename-like text whose dots are taken literally
    LooseLiteral,
    /// Anything else, optionally behind a reject group
    OpaqueRegex,
}

impl SegmentKind {
    /// Whether the segment is valid in the framework's placeholder-only route syntax
    pub fn is_route_syntax(self) -> bool {
        matches!(self, SegmentKind::Literal | SegmentKind::Placeholder)
    }
}

/// A classified segment: the rule that fired and the part it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: SegmentKind,
    pub part: Part,
}

impl Classified {
    fn new(kind: SegmentKind, part: Part) -> Self {
        Self { kind, part }
    }
}

/// Classifies a segment into a part (pure function)
///
/// # Rules (evaluated in order, first match wins)
///
/// 1. **Named regex**: `(?!reject)?(?P<name>(regex))` or `(?!reject)?(?P<name>regex)`
/// 2. **Typed placeholder**: `<type:name>` or `<name>`
/// 3. **Literal**: no metacharacters, or a filename-like loose literal
/// 4. **Opaque regex**: anything else, with an optional leading reject group
///
/// # Errors
///
/// - [`SegmentError::UnknownType`] when a placeholder names a type missing
///   from `registry`
/// - [`SegmentError::Malformed`] if the fallback grammar fails to match, which
///   it never should
pub fn classify_segment(
    segment: &str,
    registry: &TypeRegistry,
) -> Result<Classified, SegmentError> {
    if let Some(classified) = match_named_regex(segment) {
        return Ok(classified);
    }

    match match_placeholder(segment, registry) {
        Some(result) => result,
        None => match_literal(segment)
            .or_else(|| match_opaque_regex(segment))
            .ok_or_else(|| SegmentError::Malformed(segment.to_string())),
    }
}

/// Rule 1: `(?!reject)?(?P<name>regex)`
///
/// One redundant pair of parens around the body is unwrapped:
/// `(?P<page>(a|b))` yields regex `a|b`.
pub fn match_named_regex(segment: &str) -> Option<Classified> {
    let caps = NAMED_REGEX.captures(segment)?;
    let capture = Capture::new(&caps["regex"], &caps["name"])
        .with_reject(caps.name("reject").map_or("", |m| m.as_str()));

    Some(Classified::new(
        SegmentKind::NamedRegex,
        Part::Capture(capture),
    ))
}

/// Rule 2: `<type:name>` or `<name>`
///
/// Returns `None` when the segment is not a placeholder at all, and
/// `Some(Err(..))` when it is one but its type is unknown.
pub fn match_placeholder(
    segment: &str,
    registry: &TypeRegistry,
) -> Option<Result<Classified, SegmentError>> {
    let caps = TYPED_PLACEHOLDER.captures(segment)?;
    let name = &caps["name"];

    let regex = match caps.name("type") {
        Some(type_name) => match registry.regex_for(type_name.as_str()) {
            Some(regex) => regex,
            None => return Some(Err(SegmentError::UnknownType(type_name.as_str().to_string()))),
        },
        None => DEFAULT_PLACEHOLDER_REGEX,
    };

    Some(Ok(Classified::new(
        SegmentKind::Placeholder,
        Part::capture(regex, name),
    )))
}

/// Rule 3: plain text, or filename-like text with literal dots
///
/// The loose form accepts an optional leading dot and one dotted extension,
/// each escaped or bare. Escaped dots are stored unescaped.
///
/// A bare dot is taken literally even though a regex would match any
/// character there: `v1.0` and `a.b` become literals, so their dots never
/// show up in a pattern's regex set or the unknown-regex report.
pub fn match_literal(segment: &str) -> Option<Classified> {
    if !segment.contains(METACHARACTERS) {
        return Some(Classified::new(SegmentKind::Literal, Part::literal(segment)));
    }

    LOOSE_LITERAL.is_match(segment).then(|| {
        Classified::new(
            SegmentKind::LooseLiteral,
            Part::literal(segment.replace("\\.", ".")),
        )
    })
}

/// Rule 4: an unnamed regex, optionally behind a reject group
pub fn match_opaque_regex(segment: &str) -> Option<Classified> {
    let caps = OPAQUE_REGEX.captures(segment)?;
    let capture = Capture::new(&caps["regex"], "")
        .with_reject(caps.name("reject").map_or("", |m| m.as_str()));

    Some(Classified::new(
        SegmentKind::OpaqueRegex,
        Part::Capture(capture),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify(segment: &str) -> Classified {
        classify_segment(segment, TypeRegistry::builtin()).unwrap()
    }

    #[test]
    fn test_classify_literal() {
        let classified = classify("articles");
        assert_eq!(classified.kind, SegmentKind::Literal);
        assert_eq!(classified.part, Part::literal("articles"));
    }

    #[test]
    fn test_classify_empty_segment_is_literal() {
        assert_eq!(classify("").part, Part::literal(""));
    }

    #[test]
    fn test_classify_typed_placeholder() {
        let registry = TypeRegistry::empty().with_converter("int", "[0-9]+");
        let classified = classify_segment("<int:year>", &registry).unwrap();
        assert_eq!(classified.kind, SegmentKind::Placeholder);
        assert_eq!(classified.part, Part::capture("[0-9]+", "year"));
    }

    #[test]
    fn test_classify_untyped_placeholder() {
        assert_eq!(classify("<gid>").part, Part::capture("[^/]+", "gid"));
    }

    #[test]
    fn test_classify_unknown_type() {
        let err = classify_segment("<money:amount>", TypeRegistry::builtin()).unwrap_err();
        assert_eq!(err, SegmentError::UnknownType("money".to_string()));
    }

    #[test]
    fn test_classify_named_regex() {
        let classified = classify("(?P<year>[0-9]{4})");
        assert_eq!(classified.kind, SegmentKind::NamedRegex);
        assert_eq!(classified.part, Part::capture("[0-9]{4}", "year"));
    }

    #[test]
    fn test_classify_named_regex_unwraps_redundant_group() {
        assert_eq!(classify("(?P<page>(a|b))").part, Part::capture("a|b", "page"));
    }

    #[test]
    fn test_classify_named_regex_with_reject() {
        let part = classify("(?!users|groups)(?P<resource>[^/]+)").part;
        assert_eq!(
            part,
            Part::Capture(Capture::new("[^/]+", "resource").with_reject("users|groups"))
        );
    }

    #[test]
    fn test_named_regex_wins_over_placeholder_shape() {
        // `(?P<` also contains `<...>`, rule 1 must be tried first
        assert_eq!(classify("(?P<id>[0-9]+)").kind, SegmentKind::NamedRegex);
    }

    #[test]
    fn test_classify_opaque_regex_with_reject() {
        let classified = classify("(?!search)(.*)");
        assert_eq!(classified.kind, SegmentKind::OpaqueRegex);
        assert_eq!(
            classified.part,
            Part::Capture(Capture::new("(.*)", "").with_reject("search"))
        );
    }

    #[test]
    fn test_classify_opaque_regex() {
        assert_eq!(classify("[0-9]+").part, Part::capture("[0-9]+", ""));
    }

    #[rstest]
    #[case("favicon.ico", "favicon.ico")]
    #[case(r"robots\.txt", "robots.txt")]
    #[case(".well-known", ".well-known")]
    #[case(r"\.hidden", ".hidden")]
    #[case("v1.0", "v1.0")]
    fn test_classify_loose_literal(#[case] segment: &str, #[case] expected: &str) {
        let classified = classify(segment);
        assert_eq!(classified.kind, SegmentKind::LooseLiteral);
        assert_eq!(classified.part, Part::literal(expected));
    }

    #[rstest]
    #[case("jquery.min.js")]
    #[case("a.*")]
    #[case("file.")]
    fn test_loose_literal_rejects_regex_like_text(#[case] segment: &str) {
        assert_eq!(classify(segment).kind, SegmentKind::OpaqueRegex);
    }

    #[test]
    fn test_placeholder_display() {
        assert_eq!(Capture::new("[^/]+", "gid").placeholder(), "GID");
        assert_eq!(Capture::new("(.*)", "").placeholder(), "TODO");
    }

    #[test]
    fn test_route_syntax_kinds() {
        assert!(SegmentKind::Literal.is_route_syntax());
        assert!(SegmentKind::Placeholder.is_route_syntax());
        assert!(!SegmentKind::LooseLiteral.is_route_syntax());
        assert!(!SegmentKind::NamedRegex.is_route_syntax());
        assert!(!SegmentKind::OpaqueRegex.is_route_syntax());
    }

    #[test]
    fn test_bare_dots_are_literal() {
        for segment in ["v1.0", "a.b"] {
            let classified = classify(segment);
            assert_eq!(classified.kind, SegmentKind::LooseLiteral);
            assert_eq!(classified.part, Part::literal(segment));
        }

        let pattern = crate::Pattern::compile("h", "api/v1.0/a.b").unwrap();
        assert!(pattern.regexes().is_empty());
    }
}
