//! A complete HTML document with a fixed skeleton and named insertion points.
//!
//! # Scope
//!
//! [`Document`] assembles, once at construction:
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="...">
//!   <head>
//!     [meta]      MetaTags composite
//!     [styles]    fragment
//!     [scripts]   fragment
//!     [schema]    Schema composite
//!   </head>
//!   <body>
//!     [pre_main]  fragment
//!     <main></main>
//!     [post_main] fragment
//!   </body>
//! </html>
//! ```
//!
//! The skeleton is never restructured; only the content of its slots grows.
//! Every accessor returns the same [`NodeId`] for the lifetime of the
//! document, and [`Document::tree_mut`] lets callers append into any of them.
//!
//! Documents are cheap and independent. Build one per request rather than
//! sharing one between threads.

use folio_dom::{DomError, DomTree, NodeId};
use folio_head::{MetaTags, Schema};
use serde::Serialize;

pub use folio_dom as dom;
pub use folio_head as head;

/// Language used when none is given.
pub const DEFAULT_LANG: &str = "en-US";

/// Construction-time settings for a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

/// An HTML document built on a fixed skeleton.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html: NodeId,
    head: NodeId,
    body: NodeId,
    main: NodeId,
    meta: NodeId,
    styles: NodeId,
    scripts: NodeId,
    schema: NodeId,
    pre_main: NodeId,
    post_main: NodeId,
}

impl Document {
    /// Create a document with `lang="en-US"`.
    ///
    /// # Errors
    ///
    /// Construction with the default options does not fail in practice; the
    /// `Result` is shared with [`Document::with_options`].
    pub fn new() -> Result<Self, DomError> {
        Self::with_options(DocumentOptions::default())
    }

    /// Create a document with the given `lang` attribute.
    ///
    /// # Errors
    ///
    /// See [`Document::with_options`].
    pub fn with_lang(lang: impl Into<String>) -> Result<Self, DomError> {
        Self::with_options(DocumentOptions { lang: lang.into() })
    }

    /// Create a document from explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidAttribute`] if `lang` is empty or contains
    /// whitespace.
    pub fn with_options(options: DocumentOptions) -> Result<Self, DomError> {
        if options.lang.is_empty() || options.lang.chars().any(char::is_whitespace) {
            return Err(DomError::InvalidAttribute {
                name: "lang".to_string(),
                reason: "language tag must be non-empty and contain no whitespace",
            });
        }

        let mut tree = DomTree::new();
        let _ = tree.add_doctype(NodeId::ROOT)?;
        let html = tree.add_tag(NodeId::ROOT, "html")?;
        tree.set_attribute(html, "lang", options.lang)?;

        let head = tree.add_tag(html, "head")?;
        let meta = tree.add_composite(head, MetaTags::new())?;
        let styles = tree.add_fragment(head)?;
        let scripts = tree.add_fragment(head)?;
        let schema = tree.add_composite(head, Schema::new())?;

        let body = tree.add_tag(html, "body")?;
        let pre_main = tree.add_fragment(body)?;
        let main = tree.add_tag(body, "main")?;
        let post_main = tree.add_fragment(body)?;

        Ok(Self {
            tree,
            html,
            head,
            body,
            main,
            meta,
            styles,
            scripts,
            schema,
            pre_main,
            post_main,
        })
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The underlying tree, for appending content into any slot.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The `<html>` element.
    #[must_use]
    pub const fn html(&self) -> NodeId {
        self.html
    }

    /// The `<head>` element.
    #[must_use]
    pub const fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// The `<main>` element.
    #[must_use]
    pub const fn main(&self) -> NodeId {
        self.main
    }

    /// The metadata composite (first child of `<head>`).
    #[must_use]
    pub const fn meta(&self) -> NodeId {
        self.meta
    }

    /// The stylesheet fragment in `<head>`.
    #[must_use]
    pub const fn styles(&self) -> NodeId {
        self.styles
    }

    /// The script fragment in `<head>`.
    #[must_use]
    pub const fn scripts(&self) -> NodeId {
        self.scripts
    }

    /// The structured-data composite (last child of `<head>`).
    #[must_use]
    pub const fn schema(&self) -> NodeId {
        self.schema
    }

    /// The fragment in `<body>` before `<main>`.
    #[must_use]
    pub const fn pre_main(&self) -> NodeId {
        self.pre_main
    }

    /// The fragment in `<body>` after `<main>`.
    #[must_use]
    pub const fn post_main(&self) -> NodeId {
        self.post_main
    }

    /// Current metadata state.
    #[must_use]
    pub fn meta_tags(&self) -> Option<&MetaTags> {
        self.tree.composite::<MetaTags>(self.meta)
    }

    /// Current structured-data state.
    #[must_use]
    pub fn schema_data(&self) -> Option<&Schema> {
        self.tree.composite::<Schema>(self.schema)
    }

    fn update_meta(&mut self, update: impl FnOnce(&mut MetaTags)) -> Result<(), DomError> {
        let meta = self
            .tree
            .composite_mut::<MetaTags>(self.meta)
            .ok_or_else(|| DomError::InvalidStructure("metadata slot is missing".to_string()))?;
        update(meta);
        Ok(())
    }

    /// Set the page title.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidStructure`] if the metadata slot no longer
    /// holds a [`MetaTags`].
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DomError> {
        self.update_meta(|meta| meta.set_title(title))
    }

    /// Set the page description.
    ///
    /// # Errors
    ///
    /// See [`Document::set_title`].
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), DomError> {
        self.update_meta(|meta| meta.set_description(description))
    }

    /// Set the canonical URL.
    ///
    /// # Errors
    ///
    /// See [`Document::set_title`].
    pub fn set_canonical(&mut self, url: impl Into<String>) -> Result<(), DomError> {
        self.update_meta(|meta| meta.set_canonical(url))
    }

    /// Add a structured-data entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Serialization`] if `data` is not representable as
    /// a JSON object; the document is unchanged in that case.
    pub fn add_schema<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<(), DomError> {
        self.tree
            .composite_mut::<Schema>(self.schema)
            .ok_or_else(|| DomError::InvalidStructure("structured-data slot is missing".to_string()))?
            .add_schema(data)
    }

    /// Builder form of [`Document::set_title`].
    ///
    /// # Errors
    ///
    /// See [`Document::set_title`].
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, DomError> {
        self.set_title(title)?;
        Ok(self)
    }

    /// Builder form of [`Document::set_description`].
    ///
    /// # Errors
    ///
    /// See [`Document::set_title`].
    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self, DomError> {
        self.set_description(description)?;
        Ok(self)
    }

    /// Builder form of [`Document::set_canonical`].
    ///
    /// # Errors
    ///
    /// See [`Document::set_title`].
    pub fn with_canonical(mut self, url: impl Into<String>) -> Result<Self, DomError> {
        self.set_canonical(url)?;
        Ok(self)
    }

    /// Builder form of [`Document::add_schema`].
    ///
    /// # Errors
    ///
    /// See [`Document::add_schema`].
    pub fn with_schema<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self, DomError> {
        self.add_schema(data)?;
        Ok(self)
    }

    /// Append `<link rel="stylesheet" href=..>` to the styles fragment.
    ///
    /// # Errors
    ///
    /// Propagates tree errors, which do not occur for the fixed skeleton.
    pub fn add_stylesheet(&mut self, href: impl Into<String>) -> Result<NodeId, DomError> {
        let link = self.tree.add_tag(self.styles, "link")?;
        self.tree.set_attribute(link, "rel", "stylesheet")?;
        self.tree.set_attribute(link, "href", href)?;
        Ok(link)
    }

    /// Append `<script src=..></script>` to the scripts fragment.
    ///
    /// # Errors
    ///
    /// Propagates tree errors, which do not occur for the fixed skeleton.
    pub fn add_script(&mut self, src: impl Into<String>) -> Result<NodeId, DomError> {
        let script = self.tree.add_tag(self.scripts, "script")?;
        self.tree.set_attribute(script, "src", src)?;
        Ok(script)
    }

    /// Render the document to HTML.
    ///
    /// Output starts with `<!DOCTYPE html>`. Rendering does not change the
    /// document, so repeated calls return identical strings.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Serialization`] if a composite node placed in the
    /// tree by the caller fails to expand. No partial output is returned.
    pub fn to_html(&self) -> Result<String, DomError> {
        self.tree.to_html()
    }
}
