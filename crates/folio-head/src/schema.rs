use std::any::Any;

use folio_common::warning::warn_once;
use folio_dom::{Composite, DomError, DomTree, NodeId};
use serde::Serialize;
use serde_json::Value;

/// MIME type of the script elements structured data is wrapped in.
pub const JSON_LD_TYPE: &str = "application/ld+json";

/// Structured data for a document head.
///
/// Every entry is a JSON object (typically a schema.org description such as
/// `{"@context": "https://schema.org", "@type": "WebSite", ...}`) and renders
/// as its own `<script type="application/ld+json">` element, in the order the
/// entries were added. JSON keys keep their insertion order and are written
/// without whitespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<Value>,
}

impl Schema {
    /// Create an empty structured-data block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one structured-data entry.
    ///
    /// The value is converted to JSON immediately, so later changes to the
    /// caller's data do not affect the document.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Serialization`] if `data` cannot be represented as
    /// JSON or is not a JSON object. Nothing is recorded in that case.
    pub fn add_schema<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<(), DomError> {
        let value = serde_json::to_value(data)
            .map_err(|e| DomError::Serialization(format!("structured data: {e}")))?;

        let Value::Object(object) = &value else {
            return Err(DomError::Serialization(format!(
                "structured data must be a JSON object, got {}",
                json_kind(&value)
            )));
        };
        for key in ["@context", "@type"] {
            if !object.contains_key(key) {
                warn_once("Schema", &format!("structured data entry has no \"{key}\""));
            }
        }

        self.entries.push(value);
        Ok(())
    }

    /// The entries added so far, in order.
    #[must_use]
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Compact JSON that is safe to embed in a `<script>` element.
///
/// [§ 4.12.1.3 Restrictions for contents of script elements](https://html.spec.whatwg.org/multipage/scripting.html#restrictions-for-contents-of-script-elements)
///
/// `<`, `>` and `&` only occur inside JSON strings, where they are written as
/// `\u003c`, `\u003e` and `\u0026`. JSON reads these back as the same
/// characters, but the HTML parser never sees `</script` or `<!--` in the
/// element's text.
fn script_safe_json(value: &Value) -> Result<String, DomError> {
    let json = serde_json::to_string(value)
        .map_err(|e| DomError::Serialization(format!("structured data: {e}")))?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

impl Composite for Schema {
    fn expand(&self, tree: &mut DomTree, parent: NodeId) -> Result<(), DomError> {
        for entry in &self.entries {
            let script = tree.add_tag(parent, "script")?;
            tree.set_attribute(script, "type", JSON_LD_TYPE)?;
            let _ = tree.add_raw(script, script_safe_json(entry)?)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
