//! Document tree implementation for the Folio document builder.
//!
//! This crate provides an arena-based tree of HTML nodes and a one-way
//! serializer that renders any subtree to text.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A `NodeId` handed out by an `add_*` call stays valid for the lifetime of the
//! tree, so an insertion point (a fragment) can be kept and appended to at any
//! time before rendering. Nodes cannot be removed or re-typed once attached.
//!
//! Node variants:
//! - **Element** - named tag with an ordered [`AttributeSet`] and children
//! - **Fragment** - anonymous grouping that renders only its children
//! - **Text** / **Raw** / **Doctype** - leaves
//! - **Composite** - a [`Composite`] that expands into primitive nodes on render

pub mod attributes;
mod composite;
mod error;
pub mod serialize;

pub use attributes::AttributeSet;
pub use composite::Composite;
pub use error::DomError;
pub use serialize::{is_void_element, to_html};

/// A type-safe index into the document tree.
///
/// Two handles are equal exactly when they address the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root fragment is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the tree, with its parent and ordered children.
#[derive(Debug)]
pub struct Node {
    /// What this node renders as.
    pub node_type: NodeType,

    /// The owning node; `None` only for the root.
    pub parent: Option<NodeId>,

    /// Children in insertion order, which is also render order.
    pub children: Vec<NodeId>,
}

/// The kind of a node.
#[derive(Debug)]
pub enum NodeType {
    /// Anonymous grouping; contributes no markup of its own.
    Fragment,
    /// [§ 13.1.1 The DOCTYPE](https://html.spec.whatwg.org/multipage/syntax.html#the-doctype)
    Doctype,
    /// A named element with attributes and children.
    Element(ElementData),
    /// Character data, escaped on render.
    Text(String),
    /// Pre-rendered markup, emitted verbatim.
    Raw(String),
    /// A node that generates its children on render.
    Composite(Box<dyn Composite>),
}

impl NodeType {
    /// Whether nodes of this kind may hold children.
    ///
    /// Fragments and non-void elements do; everything else is a leaf.
    #[must_use]
    pub fn accepts_children(&self) -> bool {
        match self {
            Self::Fragment => true,
            Self::Element(data) => !is_void_element(&data.tag_name),
            Self::Doctype | Self::Text(_) | Self::Raw(_) | Self::Composite(_) => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Fragment => "fragment".to_string(),
            Self::Doctype => "doctype".to_string(),
            Self::Element(data) if is_void_element(&data.tag_name) => {
                format!("void element <{}>", data.tag_name)
            }
            Self::Element(data) => format!("element <{}>", data.tag_name),
            Self::Text(_) => "text node".to_string(),
            Self::Raw(_) => "raw node".to_string(),
            Self::Composite(_) => "composite node".to_string(),
        }
    }
}

/// Element-specific data.
///
/// The tag name is fixed at creation; attributes may grow over the
/// element's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The element's local name, e.g. `"head"`.
    pub tag_name: String,
    /// Attributes in insertion order.
    pub attrs: AttributeSet,
}

impl ElementData {
    /// Create element data with no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTagName`] unless `tag_name` starts with an
    /// ASCII letter and continues with ASCII alphanumerics or `-`.
    pub fn new(tag_name: impl Into<String>) -> Result<Self, DomError> {
        let tag_name = tag_name.into();
        if !is_valid_tag_name(&tag_name) {
            return Err(DomError::InvalidTagName { name: tag_name });
        }
        Ok(Self {
            tag_name,
            attrs: AttributeSet::new(),
        })
    }
}

fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Arena-based document tree.
///
/// All nodes live in one contiguous vector and refer to each other by
/// [`NodeId`]. The root ([`NodeId::ROOT`]) is a fragment, so a tree renders as
/// the concatenation of its top-level nodes (typically a doctype followed by
/// the `<html>` element).
#[derive(Debug)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the root fragment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Fragment,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root fragment ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new node of the given kind as the last child of `parent`.
    ///
    /// This is the single entry point for growing the tree; every other
    /// `add_*` method delegates here.
    ///
    /// # Errors
    ///
    /// - [`DomError::InvalidStructure`] if `parent` does not exist or cannot
    ///   hold children (leaves and void elements).
    /// - [`DomError::InvalidTagName`] if `node_type` is an element whose name
    ///   is not valid.
    pub fn add_node(&mut self, parent: NodeId, node_type: NodeType) -> Result<NodeId, DomError> {
        let parent_node = self
            .get(parent)
            .ok_or_else(|| DomError::InvalidStructure(format!("no node with id {}", parent.0)))?;
        if !parent_node.node_type.accepts_children() {
            return Err(DomError::InvalidStructure(format!(
                "{} cannot have children",
                parent_node.node_type.describe()
            )));
        }
        if let NodeType::Element(data) = &node_type {
            if !is_valid_tag_name(&data.tag_name) {
                return Err(DomError::InvalidTagName {
                    name: data.tag_name.clone(),
                });
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Create a child element named `name` under `parent` and return the new
    /// child, so building can continue inside it.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_tag(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, DomError> {
        let data = ElementData::new(name)?;
        self.add_node(parent, NodeType::Element(data))
    }

    /// Create a child fragment under `parent` and return its handle.
    ///
    /// The handle stays valid for the lifetime of the tree; nodes appended to
    /// it later render at the fragment's position.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_fragment(&mut self, parent: NodeId) -> Result<NodeId, DomError> {
        self.add_node(parent, NodeType::Fragment)
    }

    /// Append a text node. The text is escaped when rendered.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId, DomError> {
        self.add_node(parent, NodeType::Text(text.into()))
    }

    /// Append pre-rendered markup that is emitted verbatim.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_raw(&mut self, parent: NodeId, markup: impl Into<String>) -> Result<NodeId, DomError> {
        self.add_node(parent, NodeType::Raw(markup.into()))
    }

    /// Append a `<!DOCTYPE html>` node.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_doctype(&mut self, parent: NodeId) -> Result<NodeId, DomError> {
        self.add_node(parent, NodeType::Doctype)
    }

    /// Append a composite node.
    ///
    /// # Errors
    ///
    /// See [`DomTree::add_node`].
    pub fn add_composite<C: Composite + 'static>(
        &mut self,
        parent: NodeId,
        composite: C,
    ) -> Result<NodeId, DomError> {
        self.add_node(parent, NodeType::Composite(Box::new(composite)))
    }

    /// Set an attribute on an element, replacing any earlier value in place.
    ///
    /// # Errors
    ///
    /// - [`DomError::InvalidStructure`] if `id` is missing or not an element.
    /// - [`DomError::InvalidAttribute`] if `name` is not a valid attribute name.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.node_type) {
            Some(NodeType::Element(data)) => data.attrs.set(name, value),
            Some(other) => Err(DomError::InvalidStructure(format!(
                "{} cannot have attributes",
                other.describe()
            ))),
            None => Err(DomError::InvalidStructure(format!("no node with id {}", id.0))),
        }
    }

    /// Get an attribute of an element.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attrs.get(name))
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get the tag name if this node is an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Borrow a composite node as its concrete type.
    ///
    /// Returns `None` if the node is missing, not a composite, or a
    /// composite of another type.
    #[must_use]
    pub fn composite<T: Composite + 'static>(&self, id: NodeId) -> Option<&T> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Composite(c) => c.as_any().downcast_ref::<T>(),
            _ => None,
        })
    }

    /// Mutably borrow a composite node as its concrete type.
    ///
    /// Only the composite's own state is reachable this way; the tree's
    /// structure cannot be changed through it.
    #[must_use]
    pub fn composite_mut<T: Composite + 'static>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.node_type {
            NodeType::Composite(c) => c.as_any_mut().downcast_mut::<T>(),
            _ => None,
        })
    }

    /// Render the whole tree to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Serialization`] if a composite fails to expand.
    pub fn to_html(&self) -> Result<String, DomError> {
        to_html(self, NodeId::ROOT)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
