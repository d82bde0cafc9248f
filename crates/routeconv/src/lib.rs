//! # routeconv
//!
//! Converts URL patterns written in a web framework's routing syntax into a
//! normalized, language-agnostic routing IR. Supported segment syntax:
//! - Plain literals (`articles`, `favicon.ico`)
//! - Named regex groups (`(?P<year>[0-9]{4})`)
//! - Typed placeholders (`<int:year>`, `<gid>`)
//! - Opaque regexes with an optional negative-lookahead reject clause
//!   (`(?!search)(.*)`)
//!
//! ## Pipeline
//!
//! raw pattern → [`path::tokenize`] → [`classify_segment`] per segment →
//! [`Pattern`] (ordered parts + suffix + regex set) → [`synthesize`] fixtures
//!
//! Every stage is a pure function; a [`Pattern`] is immutable once compiled.
//!
//! ## Suffix Policy
//!
//! - `^users/$`, `about/`, root patterns → exact trailing slash
//! - `^admin/`, `.well-known/` → open prefix, anything may follow
//! - everything else → optional trailing slash
//!
//! ## Example
//!
//! ```
//! use routeconv::{synthesize, ExampleTable, Part, Pattern, Suffix};
//!
//! let pattern = Pattern::compile("views.article", "articles/<int:year>/").unwrap();
//! assert_eq!(
//!     pattern.parts(),
//!     &[Part::literal("articles"), Part::capture("[0-9]+", "year")]
//! );
//! assert_eq!(pattern.suffix(), &Suffix::Slash);
//!
//! let table = ExampleTable::new().with_values("[0-9]+", "", ["2020"]);
//! let cases = synthesize(&pattern, Some(&table));
//! assert_eq!(cases["/articles/2020/"], "/articles/YEAR/");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod batch;
mod converter;
mod error;
pub mod io;
pub mod path;
pub mod render;
pub mod report;
pub mod route;
pub mod selftest;
mod synth;

pub use batch::{compile_all, regex_union, InputRecord};
pub use converter::{TypeRegistry, DEFAULT_PLACEHOLDER_REGEX};
pub use error::{ConvertError, Result, SegmentError};
pub use path::{strip_anchors, tokenize, Segments};
pub use render::{JsonLinesRenderer, Render};
pub use report::{unknown_regexes, UnknownRegex};
pub use route::{classify_segment, Capture, Classified, Part, RegexRef, SegmentKind, Suffix};
pub use synth::{synthesize, ExampleTable};

// ============================================================================
// Core Types
// ============================================================================

/// A compiled URL pattern
///
/// Built once from a raw pattern string and never mutated afterwards; every
/// error surfaces from [`compile`](Self::compile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Opaque routing destination, passed through untouched
    handler: String,
    /// The pattern as written
    raw: String,
    /// Segments in source order
    parts: Vec<Part>,
    suffix: Suffix,
    /// Every `(regex, name)` referenced by a capture or reject clause
    regexes: BTreeSet<RegexRef>,
    /// Caller-supplied `example path → expected path`, never derived
    explicit_test_cases: BTreeMap<String, String>,
}

impl Pattern {
    /// Compiles a pattern against the built-in type registry
    ///
    /// # Examples
    ///
    /// ```
    /// use routeconv::{Capture, Part, Pattern};
    ///
    /// let pattern = Pattern::compile("views.resource", "^(?!users|groups)(?P<resource>[^/]+)/$").unwrap();
    /// assert_eq!(
    ///     pattern.parts(),
    ///     &[Part::Capture(Capture::new("[^/]+", "resource").with_reject("users|groups"))]
    /// );
    /// assert_eq!(pattern.regexes().len(), 2);
    /// ```
    pub fn compile(handler: impl Into<String>, raw: impl Into<String>) -> Result<Self> {
        Self::compile_with(handler, raw, TypeRegistry::builtin())
    }

    /// Compiles a pattern against a caller-supplied type registry
    pub fn compile_with(
        handler: impl Into<String>,
        raw: impl Into<String>,
        registry: &TypeRegistry,
    ) -> Result<Self> {
        Self::compile_with_tests(handler, raw, registry, BTreeMap::new())
    }

    /// Compiles a pattern carrying explicit test cases
    ///
    /// Explicit cases take precedence over synthesized ones with the same
    /// example path.
    pub fn compile_with_tests(
        handler: impl Into<String>,
        raw: impl Into<String>,
        registry: &TypeRegistry,
        explicit_test_cases: BTreeMap<String, String>,
    ) -> Result<Self> {
        let raw = raw.into();
        let parsed = route::parse_pattern(&raw, registry)?;

        tracing::debug!(
            "Compiled pattern {:?} into {} parts ({:?})",
            raw,
            parsed.parts.len(),
            parsed.suffix
        );

        Ok(Pattern {
            handler: handler.into(),
            raw,
            parts: parsed.parts,
            suffix: parsed.suffix,
            regexes: parsed.regexes,
            explicit_test_cases,
        })
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn suffix(&self) -> &Suffix {
        &self.suffix
    }

    pub fn regexes(&self) -> &BTreeSet<RegexRef> {
        &self.regexes
    }

    pub fn explicit_test_cases(&self) -> &BTreeMap<String, String> {
        &self.explicit_test_cases
    }

    /// Captures in source order, excluding the wildcard suffix
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.parts.iter().filter_map(Part::as_capture)
    }

    /// Test cases a renderer should emit for this pattern
    ///
    /// With an example table this is [`synthesize`] (explicit cases merged
    /// last); without one only the explicit cases remain.
    pub fn test_cases(&self, table: Option<&ExampleTable>) -> BTreeMap<String, String> {
        match table {
            Some(_) => synthesize(self, table),
            None => self.explicit_test_cases.clone(),
        }
    }
}
