use std::any::Any;

use folio_common::warning::warn_once_with;
use folio_dom::{Composite, DomError, DomTree, NodeId};
use indexmap::IndexMap;

/// Viewport emitted for every document.
const VIEWPORT: &str = "width=device-width, initial-scale=1";

/// The metadata block of a document head.
///
/// Holds the page's title, description, canonical URL, and any extra named
/// meta tags, and renders them (plus charset and viewport) as `<title>`,
/// `<meta>`, and `<link>` elements. Each setter replaces the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTags {
    title: Option<String>,
    description: Option<String>,
    canonical: Option<String>,
    image: Option<String>,
    named: IndexMap<String, String>,
}

impl MetaTags {
    /// Create an empty metadata block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title. Also emitted as `og:title`.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Set the page description. Also emitted as `og:description`.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Set the canonical URL. Emitted as `<link rel="canonical">` and
    /// `og:url`.
    pub fn set_canonical(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !is_absolute_http(&url) {
            warn_once_with("Meta", "canonical URL is not an absolute http(s) URL", &url);
        }
        self.canonical = Some(url);
    }

    /// Set the preview image URL, emitted as `og:image`.
    pub fn set_image(&mut self, url: impl Into<String>) {
        self.image = Some(url.into());
    }

    /// Add a `<meta name=.. content=..>` tag. A second call with the same
    /// name replaces the content in place.
    pub fn add_meta(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let _ = self.named.insert(name.into(), content.into());
    }

    /// The current title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The current description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The current canonical URL.
    #[must_use]
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// The current preview image URL.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

fn is_absolute_http(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}

/// Append a void element carrying `attrs` in order.
fn void_tag(
    tree: &mut DomTree,
    parent: NodeId,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), DomError> {
    let id = tree.add_tag(parent, name)?;
    for &(key, value) in attrs {
        tree.set_attribute(id, key, value)?;
    }
    Ok(())
}

impl Composite for MetaTags {
    fn expand(&self, tree: &mut DomTree, parent: NodeId) -> Result<(), DomError> {
        void_tag(tree, parent, "meta", &[("charset", "utf-8")])?;
        void_tag(tree, parent, "meta", &[("name", "viewport"), ("content", VIEWPORT)])?;

        if let Some(title) = &self.title {
            let id = tree.add_tag(parent, "title")?;
            let _ = tree.add_text(id, title.as_str())?;
        }
        if let Some(description) = &self.description {
            void_tag(tree, parent, "meta", &[("name", "description"), ("content", description.as_str())])?;
        }
        if let Some(canonical) = &self.canonical {
            void_tag(tree, parent, "link", &[("rel", "canonical"), ("href", canonical.as_str())])?;
        }
        for (name, content) in &self.named {
            void_tag(tree, parent, "meta", &[("name", name.as_str()), ("content", content.as_str())])?;
        }

        // Open Graph
        let properties = [
            ("og:title", &self.title),
            ("og:description", &self.description),
            ("og:url", &self.canonical),
            ("og:image", &self.image),
        ];
        for (property, value) in properties {
            if let Some(value) = value {
                void_tag(tree, parent, "meta", &[("property", property), ("content", value.as_str())])?;
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_http_detection() {
        assert!(is_absolute_http("https://example.com/page"));
        assert!(is_absolute_http("http://example.com"));
        assert!(!is_absolute_http("https://"));
        assert!(!is_absolute_http("/page"));
        assert!(!is_absolute_http("ftp://example.com"));
    }
}
