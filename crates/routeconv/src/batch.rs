//! Batch compilation
//!
//! Patterns are independent, so a batch may be compiled on a worker pool.
//! Results always come back in input order and one failing pattern never
//! stops the others.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::converter::TypeRegistry;
use crate::error::{ConvertError, Result};
use crate::route::RegexRef;
use crate::Pattern;

/// One input row: a handler, its pattern and an optional explicit fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "Handler")]
    pub handler: String,
    #[serde(rename = "Pattern")]
    pub pattern: String,
    #[serde(rename = "Test Case", default)]
    pub test_case: Option<String>,
    #[serde(rename = "Expected", default)]
    pub expected: Option<String>,
}

impl InputRecord {
    pub fn new(handler: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            pattern: pattern.into(),
            test_case: None,
            expected: None,
        }
    }

    /// Attaches an explicit `example path → expected path` fixture
    pub fn with_test_case(mut self, path: impl Into<String>, expected: impl Into<String>) -> Self {
        self.test_case = Some(path.into());
        self.expected = Some(expected.into());
        self
    }

    /// Explicit fixtures carried by this row
    ///
    /// A row with a test case but no expected value maps it to `""`.
    pub fn explicit_test_cases(&self) -> BTreeMap<String, String> {
        self.test_case
            .iter()
            .filter(|path| !path.is_empty())
            .map(|path| (path.clone(), self.expected.clone().unwrap_or_default()))
            .collect()
    }

    pub fn compile(&self, registry: &TypeRegistry) -> Result<Pattern> {
        Pattern::compile_with_tests(
            self.handler.as_str(),
            self.pattern.as_str(),
            registry,
            self.explicit_test_cases(),
        )
    }
}

/// Compiles every record, preserving input order
///
/// `jobs <= 1` compiles sequentially on the calling thread; otherwise a
/// rayon pool of `jobs` workers is built for the batch. The outer `Result`
/// only fails when the pool cannot be built.
///
/// # Examples
///
/// ```
/// use routeconv::{compile_all, InputRecord, TypeRegistry};
///
/// let records = vec![
///     InputRecord::new("views.groups", "groups/<gid>"),
///     InputRecord::new("views.price", "price/<money:amount>"),
/// ];
/// let results = compile_all(&records, TypeRegistry::builtin(), 2).unwrap();
///
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn compile_all(
    records: &[InputRecord],
    registry: &TypeRegistry,
    jobs: usize,
) -> Result<Vec<Result<Pattern>>> {
    tracing::debug!("Compiling {} patterns with {} job(s)", records.len(), jobs.max(1));

    let compile = |record: &InputRecord| {
        record.compile(registry).map_err(|e| {
            tracing::warn!("Failed to compile {:?}: {}", record.pattern, e);
            e
        })
    };

    if jobs <= 1 {
        return Ok(records.iter().map(compile).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    Ok(pool.install(|| records.par_iter().map(compile).collect()))
}

/// Union of the regexes referenced by every pattern
pub fn regex_union<'a, I>(patterns: I) -> BTreeSet<RegexRef>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    patterns
        .into_iter()
        .flat_map(|pattern| pattern.regexes().iter().cloned())
        .collect()
}

/// Compiled patterns and per-pattern failures, split apart
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub patterns: Vec<Pattern>,
    pub failures: Vec<ConvertError>,
}

impl BatchOutcome {
    /// Splits batch results, keeping input order on both sides
    pub fn from_results(results: Vec<Result<Pattern>>) -> Self {
        results
            .into_iter()
            .fold(BatchOutcome::default(), |mut outcome, result| {
                match result {
                    Ok(pattern) => outcome.patterns.push(pattern),
                    Err(e) => outcome.failures.push(e),
                }
                outcome
            })
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn regexes(&self) -> BTreeSet<RegexRef> {
        regex_union(&self.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn records() -> Vec<InputRecord> {
        vec![
            InputRecord::new("views.root", "^$"),
            InputRecord::new("views.groups", "groups/<gid>"),
            InputRecord::new("views.bad", "price/<money:amount>"),
            InputRecord::new("views.article", "articles/<int:year>/"),
            InputRecord::new("views.help", "help/(?!search)(.*)"),
        ]
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    fn test_compile_all_keeps_order(#[case] jobs: usize) {
        let results = compile_all(&records(), TypeRegistry::builtin(), jobs).unwrap();
        let handlers: Vec<Option<&str>> = results
            .iter()
            .map(|r| r.as_ref().ok().map(Pattern::handler))
            .collect();
        assert_eq!(
            handlers,
            vec![
                Some("views.root"),
                Some("views.groups"),
                None,
                Some("views.article"),
                Some("views.help"),
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = compile_all(&records(), TypeRegistry::builtin(), 1).unwrap();
        let parallel = compile_all(&records(), TypeRegistry::builtin(), 3).unwrap();
        let ok = |results: Vec<Result<Pattern>>| -> Vec<Pattern> {
            results.into_iter().filter_map(|r| r.ok()).collect()
        };
        assert_eq!(ok(sequential), ok(parallel));
    }

    #[test]
    fn test_outcome_splits_failures() {
        let results = compile_all(&records(), TypeRegistry::builtin(), 1).unwrap();
        let outcome = BatchOutcome::from_results(results);
        assert_eq!(outcome.patterns.len(), 4);
        assert_eq!(outcome.failures.len(), 1);
        assert!(!outcome.is_clean());
        assert!(matches!(
            outcome.failures[0],
            ConvertError::UnknownConverterType { ref type_name, .. } if type_name == "money"
        ));
    }

    #[test]
    fn test_regex_union() {
        let results = compile_all(&records(), TypeRegistry::builtin(), 1).unwrap();
        let union = BatchOutcome::from_results(results).regexes();
        assert_eq!(
            union.into_iter().collect::<Vec<_>>(),
            vec![
                ("(.*)".to_string(), String::new()),
                ("[0-9]+".to_string(), "year".to_string()),
                ("[^/]+".to_string(), "gid".to_string()),
                ("search".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_record_explicit_cases() {
        let record = InputRecord::new("h", "about/").with_test_case("/about/", "/about/");
        let pattern = record.compile(TypeRegistry::builtin()).unwrap();
        assert_eq!(pattern.explicit_test_cases()["/about/"], "/about/");
        assert!(InputRecord::new("h", "about/").explicit_test_cases().is_empty());
    }
}
