//! Head-section nodes for the Folio document builder.
//!
//! # Scope
//!
//! This crate provides the two composite nodes that live in a document's
//! `<head>`:
//! - **[`MetaTags`]** - charset, viewport, title, description, canonical URL,
//!   and their Open Graph counterparts
//! - **[`Schema`]** - structured data rendered as JSON-LD script elements
//!
//! Both are ordinary [`folio_dom::Composite`] implementations: the tree only
//! asks them to expand when it is rendered.

/// Metadata tags.
pub mod meta;
/// Structured data (JSON-LD).
pub mod schema;

pub use meta::MetaTags;
pub use schema::Schema;
