//! Test-case synthesis
//!
//! Substitutes example values into a compiled pattern's captures to produce
//! `example path → expected normalized path` fixtures.

use std::collections::{BTreeMap, BTreeSet};

use crate::route::{Capture, Part, Suffix};
use crate::Pattern;

/// Example values keyed by `(regex, name)`
///
/// Lookup falls back from `(regex, name)` to the name-agnostic `(regex, "")`
/// when no name-specific values exist.
///
/// # Examples
///
/// ```
/// use routeconv::ExampleTable;
///
/// let table = ExampleTable::new()
///     .with_values("[0-9]+", "", ["1", "42"])
///     .with_values("[0-9]+", "year", ["2020"]);
///
/// assert_eq!(table.lookup("[0-9]+", "year"), Some(&["2020".to_string()][..]));
/// assert_eq!(table.lookup("[0-9]+", "month").map(<[_]>::len), Some(2));
/// assert_eq!(table.lookup("[a-z]+", "month"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleTable {
    values: BTreeMap<(String, String), Vec<String>>,
}

impl ExampleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one example value for `(regex, name)`
    pub fn insert(
        &mut self,
        regex: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.values
            .entry((regex.into(), name.into()))
            .or_default()
            .push(value.into());
    }

    /// Appends several example values (builder pattern)
    pub fn with_values<I, V>(mut self, regex: &str, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.insert(regex, name, value);
        }
        self
    }

    /// Values for `(regex, name)`, falling back to `(regex, "")`
    pub fn lookup(&self, regex: &str, name: &str) -> Option<&[String]> {
        let exact = self.get(regex, name);
        if exact.is_some() || name.is_empty() {
            return exact;
        }
        self.get(regex, "")
    }

    /// Values for a capture, with the same fallback as [`lookup`](Self::lookup)
    pub fn lookup_capture(&self, capture: &Capture) -> Option<&[String]> {
        self.lookup(&capture.regex, &capture.name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, regex: &str, name: &str) -> Option<&[String]> {
        self.values
            .get(&(regex.to_string(), name.to_string()))
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }
}

impl<R, N, V> FromIterator<(R, N, V)> for ExampleTable
where
    R: Into<String>,
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (R, N, V)>>(iter: I) -> Self {
        let mut table = ExampleTable::new();
        for (regex, name, value) in iter {
            table.insert(regex, name, value);
        }
        table
    }
}

/// Internal accumulator for fold-based synthesis
///
/// `candidates` is the set of concrete path prefixes built so far; once it
/// is empty it stays empty.
struct SynthState<'t> {
    table: &'t ExampleTable,
    candidates: BTreeSet<String>,
    expected: String,
}

impl<'t> SynthState<'t> {
    fn new(table: &'t ExampleTable) -> Self {
        Self {
            table,
            candidates: BTreeSet::from([String::new()]),
            expected: String::new(),
        }
    }

    fn with_literal(mut self, value: &str) -> Self {
        self.candidates = self
            .candidates
            .into_iter()
            .map(|candidate| format!("{candidate}/{value}"))
            .collect();
        self.expected.push('/');
        self.expected.push_str(value);
        self
    }

    /// Cartesian product of the candidates with the capture's example values
    fn with_capture(mut self, capture: &Capture) -> Self {
        self.expected.push('/');
        self.expected.push_str(&capture.placeholder());

        let values = self.table.lookup_capture(capture).unwrap_or_default();
        self.candidates = self
            .candidates
            .iter()
            .flat_map(|candidate| values.iter().map(move |value| format!("{candidate}/{value}")))
            .collect();
        self
    }

    fn with_part(self, part: &Part) -> Self {
        match part {
            Part::Literal { value } => self.with_literal(value),
            Part::Capture(capture) => self.with_capture(capture),
        }
    }

    /// Fixed suffixes end in `/`; the wildcard contributes no segment of its own
    fn with_suffix(mut self, suffix: &Suffix) -> Self {
        self.candidates = self
            .candidates
            .into_iter()
            .map(|candidate| candidate + "/")
            .collect();

        match suffix {
            Suffix::Slash | Suffix::OptionalSlash => self.expected.push('/'),
            Suffix::Wildcard(capture) => {
                self.expected.push('/');
                self.expected.push_str(&capture.placeholder());
            }
        }
        self
    }

    fn into_cases(self) -> BTreeMap<String, String> {
        let expected = self.expected;
        self.candidates
            .into_iter()
            .map(|candidate| (candidate, expected.clone()))
            .collect()
    }
}

/// Synthesizes test cases for a compiled pattern (pure function)
///
/// Returns an empty map when no example table is supplied. Otherwise walks
/// the parts building every concrete example path; all of them map to one
/// shared expected path with captures replaced by their placeholders.
///
/// A capture without example values empties the whole result: synthesis is
/// all-or-nothing per pattern. Explicit test cases on the pattern are merged
/// last and win over synthesized ones.
///
/// # Examples
///
/// ```
/// use routeconv::{synthesize, ExampleTable, Pattern};
///
/// let pattern = Pattern::compile("views.groups", "groups/<gid>").unwrap();
/// let table = ExampleTable::new().with_values("[^/]+", "gid", ["wheel"]);
///
/// let cases = synthesize(&pattern, Some(&table));
/// assert_eq!(cases.len(), 1);
/// assert_eq!(cases["/groups/wheel/"], "/groups/GID/");
/// ```
pub fn synthesize(pattern: &Pattern, table: Option<&ExampleTable>) -> BTreeMap<String, String> {
    let Some(table) = table else {
        return BTreeMap::new();
    };

    let mut cases = pattern
        .parts()
        .iter()
        .fold(SynthState::new(table), SynthState::with_part)
        .with_suffix(pattern.suffix())
        .into_cases();

    cases.extend(
        pattern
            .explicit_test_cases()
            .iter()
            .map(|(path, expected)| (path.clone(), expected.clone())),
    );
    cases
}
