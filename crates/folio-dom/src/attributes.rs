//! Ordered attribute storage for a single element.

use indexmap::IndexMap;

use crate::DomError;

/// Ordered map of attribute names to values for one element.
///
/// Names are case-sensitive. Setting an existing name replaces its value in
/// place; setting a new name appends it. Iteration follows first-insertion
/// order, which is also the order attributes are serialized in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, String>,
}

impl AttributeSet {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidAttribute`] if `name` is not a valid
    /// attribute name. The set is left unchanged in that case.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<(), DomError> {
        let name = name.into();
        if !is_valid_attribute_name(&name) {
            return Err(DomError::InvalidAttribute {
                name,
                reason: "not a valid attribute name",
            });
        }
        let _ = self.entries.insert(name, value.into());
        Ok(())
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check whether an attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// "Attribute names must consist of one or more characters other than
/// controls, U+0020 SPACE, U+0022 ("), U+0027 ('), U+003E (>), U+002F (/),
/// U+003D (=), and noncharacters."
///
/// NOTE: Noncharacters are not checked.
pub(crate) fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_control() || c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(attrs: &AttributeSet) -> Vec<&str> {
        attrs.entries().map(|(name, _)| name).collect()
    }

    #[test]
    fn test_set_appends_new_names_in_order() {
        let mut attrs = AttributeSet::new();
        attrs.set("rel", "canonical").unwrap();
        attrs.set("href", "/a").unwrap();
        attrs.set("data-x", "1").unwrap();

        assert_eq!(names(&attrs), ["rel", "href", "data-x"]);
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_original_position() {
        let mut attrs = AttributeSet::new();
        attrs.set("a", "1").unwrap();
        attrs.set("b", "2").unwrap();
        attrs.set("a", "3").unwrap();

        assert_eq!(names(&attrs), ["a", "b"]);
        assert_eq!(attrs.get("a"), Some("3"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut attrs = AttributeSet::new();
        attrs.set("lang", "en").unwrap();
        attrs.set("LANG", "fr").unwrap();

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("lang"), Some("en"));
    }

    #[test]
    fn test_invalid_names_rejected_without_mutation() {
        let mut attrs = AttributeSet::new();
        attrs.set("id", "main").unwrap();

        for bad in ["", "a b", "a=b", "\"q\"", "x/", "tab\t"] {
            let err = attrs.set(bad, "v").unwrap_err();
            assert!(matches!(err, DomError::InvalidAttribute { ref name, .. } if name == bad));
        }
        assert_eq!(names(&attrs), ["id"]);
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let mut attrs = AttributeSet::new();
        attrs.set("hidden", "").unwrap();
        assert!(attrs.contains("hidden"));
        assert_eq!(attrs.get("hidden"), Some(""));
    }
}
