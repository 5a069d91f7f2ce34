//! Error taxonomy for tree construction and serialization.

use thiserror::Error;

/// Errors raised while building or rendering a document tree.
///
/// Every fallible operation fails at the call that caused the problem and
/// leaves the tree exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// An attribute name was empty or contained characters that cannot
    /// appear in an attribute name, or a value was unusable for its attribute.
    #[error("invalid attribute {name:?}: {reason}")]
    InvalidAttribute {
        /// The attribute's name.
        name: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A tag name was empty or not a valid element name.
    #[error("invalid tag name {name:?}")]
    InvalidTagName {
        /// The rejected name.
        name: String,
    },

    /// The requested change does not fit the tree's shape, e.g. appending a
    /// child to a text node or a void element, or addressing a node that
    /// does not exist.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// A node could not produce valid output.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
