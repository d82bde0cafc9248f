//! Unknown-regex report
//!
//! Lists every regex fragment a batch references that the example table
//! has no values for, so the table can be curated by hand and fed back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::synth::ExampleTable;
use crate::Pattern;

/// One row of the report, shaped like an example-table row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnknownRegex {
    #[serde(rename = "RegEx")]
    pub regex: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Always empty when generated; filled in by whoever curates the table
    #[serde(rename = "Example")]
    pub example: String,
}

impl UnknownRegex {
    pub fn new(regex: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            name: name.into(),
            example: String::new(),
        }
    }
}

/// Collects `(regex, name)` pairs lacking example values (pure function)
///
/// The result is the sorted, deduplicated union over all patterns. A pair
/// counts as known when either `(regex, name)` or `(regex, "")` has values.
///
/// # Examples
///
/// ```
/// use routeconv::{unknown_regexes, ExampleTable, Pattern, UnknownRegex};
///
/// let patterns = vec![
///     Pattern::compile("a", "groups/<gid>").unwrap(),
///     Pattern::compile("b", "articles/<int:year>").unwrap(),
/// ];
/// let table = ExampleTable::new().with_values("[^/]+", "", ["wheel"]);
///
/// assert_eq!(
///     unknown_regexes(&patterns, &table),
///     vec![UnknownRegex::new("[0-9]+", "year")]
/// );
/// ```
pub fn unknown_regexes<'a, I>(patterns: I, table: &ExampleTable) -> Vec<UnknownRegex>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    patterns
        .into_iter()
        .flat_map(Pattern::regexes)
        .filter(|(regex, name)| table.lookup(regex, name).is_none())
        .map(|(regex, name)| UnknownRegex::new(regex.as_str(), name.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_everything_unknown_with_empty_table() {
        let patterns = vec![Pattern::compile("h", "^(?!users|groups)(?P<resource>[^/]+)/$").unwrap()];
        assert_eq!(
            unknown_regexes(&patterns, &ExampleTable::new()),
            vec![
                UnknownRegex::new("[^/]+", "resource"),
                UnknownRegex::new("users|groups", ""),
            ]
        );
    }

    #[test]
    fn test_union_is_deduplicated_across_patterns() {
        let patterns = vec![
            Pattern::compile("a", "groups/<gid>").unwrap(),
            Pattern::compile("b", "teams/<gid>").unwrap(),
        ];
        assert_eq!(
            unknown_regexes(&patterns, &ExampleTable::new()),
            vec![UnknownRegex::new("[^/]+", "gid")]
        );
    }

    #[test]
    fn test_literal_patterns_report_nothing() {
        let patterns = vec![Pattern::compile("h", "^favicon\\.ico$").unwrap()];
        assert!(unknown_regexes(&patterns, &ExampleTable::new()).is_empty());
    }

    #[test]
    fn test_wildcard_suffix_is_not_reported() {
        let patterns = vec![Pattern::compile("h", "^admin/").unwrap()];
        assert!(unknown_regexes(&patterns, &ExampleTable::new()).is_empty());
    }
}
