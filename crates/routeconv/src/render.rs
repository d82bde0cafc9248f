//! Renderer seam
//!
//! A renderer turns a compiled [`Pattern`] plus its test cases into target
//! configuration text. Only an IR dump ships here; target-format templates
//! live with whoever consumes the IR.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::route::{Part, RegexRef, Suffix};
use crate::Pattern;

/// Writes one compiled pattern to an output stream
pub trait Render {
    fn render(
        &self,
        pattern: &Pattern,
        tests: &BTreeMap<String, String>,
        out: &mut dyn Write,
    ) -> Result<()>;
}

#[derive(Serialize)]
struct PatternRecord<'a> {
    handler: &'a str,
    pattern: &'a str,
    parts: &'a [Part],
    suffix: &'a Suffix,
    regexes: Vec<&'a RegexRef>,
    tests: &'a BTreeMap<String, String>,
}

/// Serializes each pattern as one JSON object per line
///
/// # Examples
///
/// ```
/// use routeconv::{JsonLinesRenderer, Pattern, Render};
///
/// let pattern = Pattern::compile("views.about", "about/").unwrap();
/// let mut out = Vec::new();
/// JsonLinesRenderer::new()
///     .render(&pattern, &pattern.test_cases(None), &mut out)
///     .unwrap();
///
/// let line = String::from_utf8(out).unwrap();
/// assert!(line.starts_with(r#"{"handler":"views.about""#));
/// assert!(line.ends_with('\n'));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonLinesRenderer {
    /// Indent each object instead of writing it on one line
    pub pretty: bool,
}

impl JsonLinesRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Render for JsonLinesRenderer {
    fn render(
        &self,
        pattern: &Pattern,
        tests: &BTreeMap<String, String>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let record = PatternRecord {
            handler: pattern.handler(),
            pattern: pattern.raw(),
            parts: pattern.parts(),
            suffix: pattern.suffix(),
            regexes: pattern.regexes().iter().collect(),
            tests,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &record)?;
        } else {
            serde_json::to_writer(&mut *out, &record)?;
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::ExampleTable;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn render(pattern: &Pattern, tests: &BTreeMap<String, String>) -> Value {
        let mut out = Vec::new();
        JsonLinesRenderer::new().render(pattern, tests, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_render_capture_pattern() {
        let pattern = Pattern::compile("views.groups", "groups/<gid>").unwrap();
        let table = ExampleTable::new().with_values("[^/]+", "gid", ["wheel"]);
        let value = render(&pattern, &pattern.test_cases(Some(&table)));

        assert_eq!(
            value,
            json!({
                "handler": "views.groups",
                "pattern": "groups/<gid>",
                "parts": [
                    {"type": "literal", "value": "groups"},
                    {"type": "capture", "regex": "[^/]+", "name": "gid", "reject": ""},
                ],
                "suffix": {"type": "optional_slash"},
                "regexes": [["[^/]+", "gid"]],
                "tests": {"/groups/wheel/": "/groups/GID/"},
            })
        );
    }

    #[test]
    fn test_render_wildcard_suffix() {
        let pattern = Pattern::compile("views.wellknown", ".well-known/").unwrap();
        let value = render(&pattern, &BTreeMap::new());
        assert_eq!(
            value["suffix"],
            json!({"type": "wildcard", "regex": ".*", "name": "suffix", "reject": ""})
        );
    }

    #[test]
    fn test_one_line_per_pattern() {
        let renderer = JsonLinesRenderer::new();
        let mut out = Vec::new();
        for raw in ["^$", "about/", "^admin/"] {
            let pattern = Pattern::compile("h", raw).unwrap();
            renderer.render(&pattern, &BTreeMap::new(), &mut out).unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }
}
