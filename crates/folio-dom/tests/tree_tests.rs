//! Tests for tree construction: add_tag, add_fragment, add_node, attributes.

use folio_dom::{DomError, DomTree, ElementData, NodeId, NodeType};

// ========== add_tag ==========

#[test]
fn test_add_tag_returns_new_child() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let html = tree.add_tag(NodeId::ROOT, "html")?;
    let head = tree.add_tag(html, "head")?;

    assert_ne!(html, head);
    assert_eq!(tree.parent(head), Some(html));
    assert_eq!(tree.children(html), &[head]);
    assert_eq!(tree.tag_name(head), Some("head"));
    Ok(())
}

#[test]
fn test_children_keep_insertion_order() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let body = tree.add_tag(NodeId::ROOT, "body")?;
    let a = tree.add_tag(body, "header")?;
    let b = tree.add_fragment(body)?;
    let c = tree.add_text(body, "tail")?;

    assert_eq!(tree.children(body), &[a, b, c]);
    assert_eq!(tree.first_child(body), Some(a));
    assert_eq!(tree.last_child(body), Some(c));
    Ok(())
}

#[test]
fn test_invalid_tag_names_rejected() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let before = tree.len();

    for bad in ["", "1div", "my tag", "<p>", "-x"] {
        let err = tree.add_tag(NodeId::ROOT, bad).unwrap_err();
        assert_eq!(err, DomError::InvalidTagName { name: bad.to_string() });
    }
    assert_eq!(tree.len(), before);
    assert!(tree.children(NodeId::ROOT).is_empty());

    let _ = tree.add_tag(NodeId::ROOT, "custom-element")?;
    let _ = tree.add_tag(NodeId::ROOT, "h1")?;
    Ok(())
}

#[test]
fn test_add_node_validates_prebuilt_elements() {
    let mut tree = DomTree::new();
    let data = ElementData {
        tag_name: String::new(),
        attrs: Default::default(),
    };
    let err = tree.add_node(NodeId::ROOT, NodeType::Element(data)).unwrap_err();
    assert!(matches!(err, DomError::InvalidTagName { .. }));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_add_node_appends_prebuilt_nodes() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let head = tree.add_tag(NodeId::ROOT, "head")?;

    let mut data = ElementData::new("link")?;
    data.attrs.set("rel", "stylesheet")?;
    let link = tree.add_node(head, NodeType::Element(data))?;
    let outer = tree.add_node(head, NodeType::Fragment)?;
    let inner = tree.add_node(outer, NodeType::Fragment)?;
    let text = tree.add_node(inner, NodeType::Text("x & y".to_string()))?;

    assert_eq!(tree.children(head), &[link, outer]);
    assert_eq!(tree.children(outer), &[inner]);
    assert_eq!(tree.parent(text), Some(inner));
    assert_eq!(
        tree.to_html()?,
        "<head><link rel=\"stylesheet\">x &amp; y</head>"
    );
    Ok(())
}

// ========== structure checks ==========

#[test]
fn test_leaves_cannot_have_children() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let text = tree.add_text(NodeId::ROOT, "hello")?;
    let doctype = tree.add_doctype(NodeId::ROOT)?;
    let raw = tree.add_raw(NodeId::ROOT, "<b>x</b>")?;

    for leaf in [text, doctype, raw] {
        let err = tree.add_tag(leaf, "span").unwrap_err();
        assert!(matches!(err, DomError::InvalidStructure(_)));
        assert!(tree.children(leaf).is_empty());
    }
    Ok(())
}

#[test]
fn test_void_elements_cannot_have_children() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let meta = tree.add_tag(NodeId::ROOT, "meta")?;

    let err = tree.add_text(meta, "nope").unwrap_err();
    assert_eq!(
        err,
        DomError::InvalidStructure("void element <meta> cannot have children".to_string())
    );
    Ok(())
}

#[test]
fn test_unknown_parent_rejected() {
    let mut tree = DomTree::new();
    let err = tree.add_fragment(NodeId(42)).unwrap_err();
    assert!(matches!(err, DomError::InvalidStructure(_)));
    assert_eq!(tree.len(), 1);
}

// ========== fragments ==========

#[test]
fn test_fragment_handle_stays_appendable() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let head = tree.add_tag(NodeId::ROOT, "head")?;
    let styles = tree.add_fragment(head)?;
    let title = tree.add_tag(head, "title")?;

    // Appending later still lands inside the fragment, ahead of <title>.
    let link = tree.add_tag(styles, "link")?;
    let nested = tree.add_fragment(styles)?;
    let _ = tree.add_tag(nested, "style")?;

    assert_eq!(tree.children(head), &[styles, title]);
    assert_eq!(tree.children(styles)[0], link);
    assert!(tree.is_descendant_of(link, head));
    assert_eq!(tree.ancestors(link).collect::<Vec<_>>(), [styles, head, NodeId::ROOT]);
    Ok(())
}

// ========== attributes ==========

#[test]
fn test_set_attribute_on_element() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let html = tree.add_tag(NodeId::ROOT, "html")?;
    tree.set_attribute(html, "lang", "en-US")?;
    tree.set_attribute(html, "dir", "ltr")?;
    tree.set_attribute(html, "lang", "nl")?;

    let attrs: Vec<_> = tree
        .as_element(html)
        .map(|e| e.attrs.entries().collect())
        .unwrap_or_default();
    assert_eq!(attrs, [("lang", "nl"), ("dir", "ltr")]);
    assert_eq!(tree.attribute(html, "dir"), Some("ltr"));
    Ok(())
}

#[test]
fn test_set_attribute_rejects_bad_targets_and_names() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let frag = tree.add_fragment(NodeId::ROOT)?;
    let div = tree.add_tag(NodeId::ROOT, "div")?;

    assert!(matches!(
        tree.set_attribute(frag, "id", "x"),
        Err(DomError::InvalidStructure(_))
    ));
    assert!(matches!(
        tree.set_attribute(div, "", "x"),
        Err(DomError::InvalidAttribute { name, .. }) if name.is_empty()
    ));
    assert_eq!(tree.as_element(div).map(|e| e.attrs.len()), Some(0));
    Ok(())
}
