//! Built-in fixtures and the self-test runner
//!
//! The fixtures double as the default batch: converting without an input
//! file converts every fixture pattern, with the pattern as its own handler.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::{self, Write};

use once_cell::sync::Lazy;

use crate::batch::InputRecord;
use crate::converter::TypeRegistry;
use crate::route::{Capture, Part, Suffix};
use crate::synth::{synthesize, ExampleTable};
use crate::Pattern;

/// What a fixture asserts about its compiled pattern
#[derive(Debug, Clone)]
pub enum Check {
    /// The ordered parts
    Parts(Vec<Part>),
    /// The suffix policy
    Suffix(Suffix),
    /// Synthesized cases against an example table
    Cases {
        examples: ExampleTable,
        expected: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone)]
pub struct Fixture {
    pub pattern: &'static str,
    pub check: Check,
}

fn parts(pattern: &'static str, parts: Vec<Part>) -> Fixture {
    Fixture {
        pattern,
        check: Check::Parts(parts),
    }
}

fn suffix(pattern: &'static str, suffix: Suffix) -> Fixture {
    Fixture {
        pattern,
        check: Check::Suffix(suffix),
    }
}

fn cases(pattern: &'static str, examples: ExampleTable, expected: &[(&str, &str)]) -> Fixture {
    Fixture {
        pattern,
        check: Check::Cases {
            examples,
            expected: expected
                .iter()
                .map(|(path, expected)| (path.to_string(), expected.to_string()))
                .collect(),
        },
    }
}

const ARTICLES_ROUTE: &str = "articles/<int:year>/<int:month>/<slug:slug>/";
const ARTICLES_REGEX: &str =
    r"^articles/(?P<year>[0-9]{4})/(?P<month>[0-9]{2})/(?P<slug>[\w-]+)/$";

static FIXTURES: Lazy<Vec<Fixture>> = Lazy::new(|| {
    vec![
        // Parts
        parts("^$", vec![]),
        parts(
            ARTICLES_ROUTE,
            vec![
                Part::literal("articles"),
                Part::capture("[0-9]+", "year"),
                Part::capture("[0-9]+", "month"),
                Part::capture("[-a-zA-Z0-9_]+", "slug"),
            ],
        ),
        parts(
            ARTICLES_REGEX,
            vec![
                Part::literal("articles"),
                Part::capture("[0-9]{4}", "year"),
                Part::capture("[0-9]{2}", "month"),
                Part::capture(r"[\w-]+", "slug"),
            ],
        ),
        parts(
            "^go/(?P<page>(a|b))",
            vec![Part::literal("go"), Part::capture("a|b", "page")],
        ),
        parts(
            "groups/<gid>",
            vec![Part::literal("groups"), Part::capture("[^/]+", "gid")],
        ),
        parts(
            "^users/(?P<uid>[^/]+)",
            vec![Part::literal("users"), Part::capture("[^/]+", "uid")],
        ),
        parts(
            "^(?!users|groups)(?P<resource>[^/]+)/$",
            vec![Part::Capture(
                Capture::new("[^/]+", "resource").with_reject("users|groups"),
            )],
        ),
        parts(
            "help/(?!search)(.*)",
            vec![
                Part::literal("help"),
                Part::Capture(Capture::new("(.*)", "").with_reject("search")),
            ],
        ),
        parts(r"^favicon\.ico$", vec![Part::literal("favicon.ico")]),
        parts(".well-known/", vec![Part::literal(".well-known")]),
        parts(
            "^static/(?P<path>.*)$",
            vec![Part::literal("static"), Part::capture(".*", "path")],
        ),
        // Suffixes
        suffix("^$", Suffix::Slash),
        suffix(ARTICLES_ROUTE, Suffix::Slash),
        suffix("help/(?!search)(.*)", Suffix::OptionalSlash),
        suffix(".well-known/", Suffix::wildcard()),
        suffix("^admin/", Suffix::wildcard()),
        suffix("^users/(?P<uid>[^/]+)/$", Suffix::Slash),
        // Synthesis
        cases(
            "groups/<gid>",
            ExampleTable::new().with_values("[^/]+", "gid", ["wheel"]),
            &[("/groups/wheel/", "/groups/GID/")],
        ),
        cases(
            "^users/(?P<uid>[^/]+)",
            ExampleTable::new().with_values("[^/]+", "", ["alice", "bob"]),
            &[("/users/alice/", "/users/UID/"), ("/users/bob/", "/users/UID/")],
        ),
        cases(
            ARTICLES_ROUTE,
            ExampleTable::new()
                .with_values("[0-9]+", "year", ["2020"])
                .with_values("[0-9]+", "", ["01"])
                .with_values("[-a-zA-Z0-9_]+", "", ["hello-world"]),
            &[("/articles/2020/01/hello-world/", "/articles/YEAR/MONTH/SLUG/")],
        ),
        cases(
            ".well-known/",
            ExampleTable::new(),
            &[("/.well-known/", "/.well-known/SUFFIX")],
        ),
        cases("help/(?!search)(.*)", ExampleTable::new(), &[]),
    ]
});

/// Every built-in fixture, in a fixed order
pub fn fixtures() -> &'static [Fixture] {
    &FIXTURES
}

/// Distinct fixture patterns as input rows, handler = pattern
pub fn builtin_patterns() -> Vec<InputRecord> {
    let mut seen = Vec::new();
    for fixture in fixtures() {
        if !seen.contains(&fixture.pattern) {
            seen.push(fixture.pattern);
        }
    }
    seen.into_iter()
        .map(|pattern| InputRecord::new(pattern, pattern))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub pattern: String,
    pub outcome: Outcome,
}

impl CaseResult {
    fn compare<T: PartialEq + Debug>(pattern: &str, expected: &T, actual: &T) -> Self {
        let outcome = if expected == actual {
            Outcome::Pass
        } else {
            Outcome::Fail {
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            }
        };
        CaseResult {
            pattern: pattern.to_string(),
            outcome,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

impl Fixture {
    /// Compiles the fixture pattern and evaluates its check
    ///
    /// A compile error is a failure whose actual value is the error message.
    pub fn run(&self, registry: &TypeRegistry) -> CaseResult {
        let pattern = match Pattern::compile_with(self.pattern, self.pattern, registry) {
            Ok(pattern) => pattern,
            Err(e) => {
                return CaseResult {
                    pattern: self.pattern.to_string(),
                    outcome: Outcome::Fail {
                        expected: format!("{:?}", self.check),
                        actual: e.to_string(),
                    },
                }
            }
        };

        match &self.check {
            Check::Parts(expected) => {
                CaseResult::compare(self.pattern, expected, &pattern.parts().to_vec())
            }
            Check::Suffix(expected) => CaseResult::compare(self.pattern, expected, pattern.suffix()),
            Check::Cases { examples, expected } => CaseResult::compare(
                self.pattern,
                expected,
                &synthesize(&pattern, Some(examples)),
            ),
        }
    }
}

/// Results of one self-test run, in fixture order
#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub results: Vec<CaseResult>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    /// Writes `PASS: <pattern>` or `FAIL: <pattern>` with expected/actual lines
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in &self.results {
            match &result.outcome {
                Outcome::Pass => writeln!(out, "PASS: {}", result.pattern)?,
                Outcome::Fail { expected, actual } => {
                    writeln!(out, "FAIL: {}", result.pattern)?;
                    writeln!(out, "  expected: {expected}")?;
                    writeln!(out, "    actual: {actual}")?;
                }
            }
        }
        Ok(())
    }
}

/// Runs every built-in fixture against `registry`
///
/// # Examples
///
/// ```
/// use routeconv::selftest::run_self_test;
/// use routeconv::TypeRegistry;
///
/// let report = run_self_test(TypeRegistry::builtin());
/// assert!(report.passed());
/// ```
pub fn run_self_test(registry: &TypeRegistry) -> SelfTestReport {
    let results: Vec<CaseResult> = fixtures().iter().map(|f| f.run(registry)).collect();
    tracing::debug!(
        "Self-test ran {} fixtures, {} failed",
        results.len(),
        results.iter().filter(|r| !r.passed()).count()
    );
    SelfTestReport { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_fixtures_pass() {
        let report = run_self_test(TypeRegistry::builtin());
        let failures: Vec<_> = report.failures().collect();
        assert!(failures.is_empty(), "failing fixtures: {failures:#?}");
    }

    #[test]
    fn test_missing_converter_fails_fixture() {
        let registry = TypeRegistry::empty();
        let report = run_self_test(&registry);
        assert!(!report.passed());
        assert!(report
            .failures()
            .any(|result| result.pattern == ARTICLES_ROUTE));
    }

    #[test]
    fn test_builtin_patterns_are_distinct() {
        let records = builtin_patterns();
        assert_eq!(records[0], InputRecord::new("^$", "^$"));
        assert_eq!(records.len(), 13);
    }

    #[test]
    fn test_write_to_format() {
        let report = SelfTestReport {
            results: vec![
                CaseResult {
                    pattern: "^$".to_string(),
                    outcome: Outcome::Pass,
                },
                CaseResult {
                    pattern: "a/".to_string(),
                    outcome: Outcome::Fail {
                        expected: "Slash".to_string(),
                        actual: "OptionalSlash".to_string(),
                    },
                },
            ],
        };
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "PASS: ^$\nFAIL: a/\n  expected: Slash\n    actual: OptionalSlash\n"
        );
    }
}
