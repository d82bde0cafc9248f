//! Type registry for `<type:name>` placeholders
//!
//! Maps short converter names to the regex fragment the source framework
//! substitutes for them.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Regex used for a placeholder with no type, e.g. `<gid>`
pub const DEFAULT_PLACEHOLDER_REGEX: &str = "[^/]+";

static BUILTIN: Lazy<TypeRegistry> = Lazy::new(|| {
    TypeRegistry::empty()
        .with_converter("int", "[0-9]+")
        .with_converter("path", ".+")
        .with_converter("slug", "[-a-zA-Z0-9_]+")
        .with_converter("str", DEFAULT_PLACEHOLDER_REGEX)
        .with_converter(
            "uuid",
            "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        )
});

/// Converter name → regex fragment
///
/// # Examples
///
/// ```
/// use routeconv::TypeRegistry;
///
/// let registry = TypeRegistry::builtin().clone().with_converter("year", "[0-9]{4}");
/// assert_eq!(registry.regex_for("int"), Some("[0-9]+"));
/// assert_eq!(registry.regex_for("year"), Some("[0-9]{4}"));
/// assert_eq!(registry.regex_for("money"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    converters: BTreeMap<String, String>,
}

impl TypeRegistry {
    /// A registry with no converters at all
    pub fn empty() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// The converters every installation of the source framework ships
    pub fn builtin() -> &'static TypeRegistry {
        &BUILTIN
    }

    /// Adds or replaces a converter (builder pattern)
    pub fn with_converter(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.converters.insert(name.into(), regex.into());
        self
    }

    pub fn regex_for(&self, name: &str) -> Option<&str> {
        self.converters.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Converters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.converters
            .iter()
            .map(|(name, regex)| (name.as_str(), regex.as_str()))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TypeRegistry {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.converters
            .extend(iter.into_iter().map(|(name, regex)| (name.into(), regex.into())));
    }
}
