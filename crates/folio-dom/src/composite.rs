//! Nodes that generate their own children at render time.

use std::any::Any;
use std::fmt;

use crate::{DomError, DomTree, NodeId};

/// A node that owns private state and expands into primitive nodes when the
/// tree is rendered.
///
/// The tree and the serializer only ever see a composite through this trait.
/// Whatever vocabulary the composite speaks (meta tags, structured data, ...)
/// stays inside the implementing type; callers reach its mutators with
/// [`DomTree::composite_mut`].
///
/// Expansion must be deterministic: with no intervening mutation, two calls
/// must append the same nodes.
pub trait Composite: fmt::Debug + Send {
    /// Append this node's current output as children of `parent`.
    ///
    /// `tree` is a scratch tree owned by the serializer; `parent` is a
    /// fragment in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated nodes are not well-formed. The
    /// serializer reports it as [`DomError::Serialization`].
    fn expand(&self, tree: &mut DomTree, parent: NodeId) -> Result<(), DomError>;

    /// Upcast for typed access through [`DomTree::composite`].
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed access through [`DomTree::composite_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
