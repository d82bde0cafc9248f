//! Pattern parsing and suffix policy
//!
//! Pure functional parsers that turn a raw pattern into ordered parts.
//! All functions are **pure**: same input → same output, no side effects.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::pattern::{classify_segment, Capture, Classified, Part};
use crate::converter::TypeRegistry;
use crate::error::Result;
use crate::path::tokenize;

/// A `(regex, name)` pair referenced by a pattern
pub type RegexRef = (String, String);

/// Regex of the wildcard suffix appended to open prefixes
pub const WILDCARD_REGEX: &str = ".*";

/// Parameter name of the wildcard suffix, displayed as `SUFFIX`
pub const WILDCARD_NAME: &str = "suffix";

/// How a compiled pattern treats whatever follows its last segment
///
/// # Examples
///
/// ```
/// use routeconv::{Pattern, Suffix};
///
/// let pattern = Pattern::compile("views.wellknown", ".well-known/").unwrap();
/// assert!(pattern.suffix().is_wildcard());
///
/// let pattern = Pattern::compile("views.groups", "groups/<gid>").unwrap();
/// assert_eq!(pattern.suffix(), &Suffix::OptionalSlash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suffix {
    /// The path must end with exactly `/`
    Slash,
    /// A trailing `/` is accepted but not required (`/?`)
    OptionalSlash,
    /// Anything may follow the last fixed segment
    Wildcard(Capture),
}

impl Suffix {
    pub fn wildcard() -> Self {
        Suffix::Wildcard(Capture::new(WILDCARD_REGEX, WILDCARD_NAME))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Suffix::Wildcard(_))
    }

    /// Routing-syntax text of a fixed suffix, `None` for the wildcard
    pub fn literal(&self) -> Option<&'static str> {
        match self {
            Suffix::Slash => Some("/"),
            Suffix::OptionalSlash => Some("/?"),
            Suffix::Wildcard(_) => None,
        }
    }
}

/// Output of [`parse_pattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    pub parts: Vec<Part>,
    pub suffix: Suffix,
    pub regexes: BTreeSet<RegexRef>,
}

/// Internal state accumulator for fold-based parsing
///
/// All mutations are local to the fold accumulator; each builder method
/// returns the updated state.
#[derive(Debug)]
struct ParseState {
    parts: Vec<Part>,
    regexes: BTreeSet<RegexRef>,
    route_syntax: bool,
}

impl ParseState {
    fn new(raw: &str) -> Self {
        Self {
            parts: Vec::new(),
            regexes: BTreeSet::new(),
            route_syntax: !raw.starts_with('^') && !raw.ends_with('$'),
        }
    }

    /// Appends a classified segment, recording every regex it references
    fn with_segment(mut self, classified: Classified) -> Self {
        self.route_syntax &= classified.kind.is_route_syntax();

        if let Part::Capture(capture) = &classified.part {
            self.regexes
                .insert((capture.regex.clone(), capture.name.clone()));
            if capture.has_reject() {
                self.regexes.insert((capture.reject.clone(), String::new()));
            }
        }

        self.parts.push(classified.part);
        self
    }

    /// Decides the suffix and deconstructs the state
    fn finalize(self, raw: &str) -> ParsedPattern {
        let suffix = decide_suffix(raw, self.parts.len(), self.route_syntax);
        ParsedPattern {
            parts: self.parts,
            suffix,
            regexes: self.regexes,
        }
    }
}

/// Parses a raw pattern into parts, suffix and referenced regexes
///
/// Uses functional composition:
/// - `tokenize` - lazy segment iterator
/// - `try_fold` - classify each segment into the `ParseState` accumulator,
///   stopping at the first unclassifiable segment
/// - `finalize` - decide the suffix policy once every part is known
///
/// # Examples
///
/// ```
/// use routeconv::route::parser::parse_pattern;
/// use routeconv::{Part, Suffix, TypeRegistry};
///
/// let parsed = parse_pattern("^users/(?P<uid>[^/]+)", TypeRegistry::builtin()).unwrap();
/// assert_eq!(parsed.parts, vec![Part::literal("users"), Part::capture("[^/]+", "uid")]);
/// assert_eq!(parsed.suffix, Suffix::OptionalSlash);
/// ```
///
/// # Errors
///
/// `UnknownConverterType` or `MalformedPattern`, naming `raw`.
pub fn parse_pattern(raw: &str, registry: &TypeRegistry) -> Result<ParsedPattern> {
    let state = tokenize(raw).try_fold(ParseState::new(raw), |state, segment| -> Result<_> {
        let classified = classify_segment(&segment, registry).map_err(|e| e.in_pattern(raw))?;
        tracing::trace!("Classified segment {:?} as {:?}", segment, classified.kind);
        Ok(state.with_segment(classified))
    })?;

    Ok(state.finalize(raw))
}

/// Decides the suffix policy (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. **Exact slash**: the pattern ends with `/$`, has no parts (root), or is
///    an end-anchored route-syntax pattern ending with `/`
/// 2. **Wildcard**: any other pattern ending with `/` is an open prefix
/// 3. **Optional slash**: everything else
///
/// `route_syntax` is true when the pattern has no anchors and every segment
/// is a plain literal or a `<type:name>` placeholder. The source framework
/// always anchors that syntax at both ends.
///
/// # Examples
///
/// ```
/// use routeconv::route::parser::decide_suffix;
/// use routeconv::Suffix;
///
/// assert_eq!(decide_suffix("^users/$", 1, false), Suffix::Slash);
/// assert_eq!(decide_suffix("^admin/", 1, false), Suffix::wildcard());
/// assert_eq!(decide_suffix("users/<uid>/", 2, true), Suffix::Slash);
/// assert_eq!(decide_suffix("users/<uid>", 2, true), Suffix::OptionalSlash);
/// ```
pub fn decide_suffix(raw: &str, part_count: usize, route_syntax: bool) -> Suffix {
    let trailing_slash = raw.ends_with('/');

    if raw.ends_with("/$") || part_count == 0 || (route_syntax && trailing_slash) {
        Suffix::Slash
    } else if trailing_slash {
        Suffix::wildcard()
    } else {
        Suffix::OptionalSlash
    }
}
