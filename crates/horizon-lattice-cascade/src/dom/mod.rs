//! A small arena-backed document tree implementing [`Element`].
//!
//! [`Document`] stores element and text nodes in a [`SlotMap`], addressed by
//! stable [`NodeId`]s. It is the tree used by this crate's own tests and is
//! suitable for hosts that do not have a DOM of their own.
//!
//! In HTML mode (see [`Document::html`]) elements are created in the HTML
//! namespace, type selectors compare tag names ASCII case-insensitively,
//! and the attributes HTML lists as case-insensitive (`type`, `lang`,
//! `dir`, ...) compare their values that way too.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_cascade::dom::Document;
//! use horizon_lattice_cascade::selector::{Selector, SelectorMatcher, SelectorPart};
//!
//! let mut doc = Document::html();
//! let div = doc.create_element("div");
//! let p = doc.create_element("p");
//! doc.append_child(div, p)?;
//! doc.set_attribute(p, "class", "note")?;
//!
//! let selector = Selector::type_selector("DIV").child(SelectorPart::class_only("note"));
//! let element = doc.element(p).expect("p is an element");
//! assert!(SelectorMatcher::new().matches(&element, &selector)?);
//! # Ok::<(), horizon_lattice_cascade::Error>(())
//! ```

mod table;

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::element::{CaseSensitivity, ChildNode, Element, ElementState, HTML_NAMESPACE};
use crate::targets;
use crate::{Error, Result};

new_key_type! {
    /// Identifier of a node in a [`Document`].
    ///
    /// Ids stay valid for the lifetime of the document.
    pub struct NodeId;
}

/// Attributes whose values HTML compares ASCII case-insensitively in selectors.
const HTML_CASE_INSENSITIVE_ATTRIBUTES: &[&str] = &[
    "accept", "accept-charset", "align", "alink", "axis", "bgcolor", "charset", "checked",
    "clear", "codetype", "color", "compact", "declare", "defer", "dir", "direction",
    "disabled", "enctype", "face", "frame", "hreflang", "http-equiv", "lang", "language",
    "link", "media", "method", "multiple", "nohref", "noresize", "noshade", "nowrap",
    "readonly", "rel", "rev", "rules", "scope", "scrolling", "selected", "shape", "target",
    "text", "type", "valign", "valuetype", "vlink",
];

#[derive(Debug, Clone)]
struct Attribute {
    namespace: Option<String>,
    local_name: String,
    value: String,
}

#[derive(Debug, Clone)]
struct ElementData {
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    states: HashSet<ElementState>,
    value: Option<String>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena of element and text nodes.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    html: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty generic (XML-like) document.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            html: false,
        }
    }

    /// Create an empty HTML document.
    pub fn html() -> Self {
        Self {
            html: true,
            ..Self::new()
        }
    }

    /// Whether this is an HTML document.
    pub fn is_html(&self) -> bool {
        self.html
    }

    /// Number of nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element.
    ///
    /// In an HTML document the element is placed in the HTML namespace.
    pub fn create_element(&mut self, local_name: impl Into<String>) -> NodeId {
        let namespace = self.html.then(|| HTML_NAMESPACE.to_string());
        self.insert_element(namespace, local_name.into())
    }

    /// Create a detached element in an explicit namespace.
    pub fn create_element_ns(
        &mut self,
        namespace: Option<&str>,
        local_name: impl Into<String>,
    ) -> NodeId {
        self.insert_element(namespace.map(str::to_string), local_name.into())
    }

    fn insert_element(&mut self, namespace: Option<String>, local_name: String) -> NodeId {
        self.nodes.insert(NodeData {
            kind: NodeKind::Element(ElementData {
                local_name,
                namespace,
                attributes: vec![],
                states: HashSet::new(),
                value: None,
            }),
            parent: None,
            children: vec![],
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: vec![],
        })
    }

    /// Append a detached node as the last child of an element.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child {
            return Err(Error::invalid_node("a node cannot be its own child"));
        }

        let parent_node = self
            .nodes
            .get(parent)
            .ok_or_else(|| Error::invalid_node(format!("unknown parent {parent:?}")))?;
        if !matches!(parent_node.kind, NodeKind::Element(_)) {
            return Err(Error::invalid_node("text nodes cannot have children"));
        }

        let child_node = self
            .nodes
            .get(child)
            .ok_or_else(|| Error::invalid_node(format!("unknown child {child:?}")))?;
        if child_node.parent.is_some() {
            return Err(Error::invalid_node(format!("{child:?} already has a parent")));
        }

        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(Error::invalid_node(format!(
                "{child:?} is an ancestor of {parent:?}"
            )));
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        tracing::trace!(target: targets::DOM, ?parent, ?child, "appended child");
        Ok(())
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|n| n.parent), move |&current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    /// Set an attribute with no namespace.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.set_attribute_ns(id, None, name, value)
    }

    /// Set a namespaced attribute, replacing any existing value.
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        namespace: Option<&str>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let element = self.element_data_mut(id)?;
        let name = name.into();
        let value = value.into();

        match element
            .attributes
            .iter_mut()
            .find(|attr| attr.namespace.as_deref() == namespace && attr.local_name == name)
        {
            Some(attr) => attr.value = value,
            None => element.attributes.push(Attribute {
                namespace: namespace.map(str::to_string),
                local_name: name,
                value,
            }),
        }
        Ok(())
    }

    /// Remove an attribute with no namespace.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        let element = self.element_data_mut(id)?;
        element
            .attributes
            .retain(|attr| !(attr.namespace.is_none() && attr.local_name == name));
        Ok(())
    }

    /// Turn a dynamic state on or off.
    pub fn set_state(&mut self, id: NodeId, state: ElementState, enabled: bool) -> Result<()> {
        let element = self.element_data_mut(id)?;
        if enabled {
            element.states.insert(state);
        } else {
            element.states.remove(&state);
        }
        Ok(())
    }

    /// Set the current value of a form control.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        self.element_data_mut(id)?.value = Some(value.into());
        Ok(())
    }

    /// A matchable handle to an element, or `None` for text and unknown ids.
    pub fn element(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let node = self.nodes.get(id)?;
        match &node.kind {
            NodeKind::Element(element) => Some(NodeRef {
                doc: self,
                id,
                node,
                element,
            }),
            NodeKind::Text(_) => None,
        }
    }

    /// Elements without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .filter_map(|(id, _)| self.element(id))
    }

    fn element_data_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Element(element)) => Ok(element),
            Some(NodeKind::Text(_)) => Err(Error::invalid_node(format!("{id:?} is a text node"))),
            None => Err(Error::invalid_node(format!("unknown node {id:?}"))),
        }
    }
}

/// A handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
    node: &'a NodeData,
    element: &'a ElementData,
}

impl<'a> NodeRef<'a> {
    /// The element's node id.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// The owning document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Element children, in document order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let doc = self.doc;
        self.node.children.iter().filter_map(move |&id| doc.element(id))
    }

    fn siblings(&self) -> &'a [NodeId] {
        self.node
            .parent
            .and_then(|parent| self.doc.nodes.get(parent))
            .map(|parent| parent.children.as_slice())
            .unwrap_or_default()
    }

    fn is_named(&self, name: &str) -> bool {
        self.element.local_name.eq_ignore_ascii_case(name)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("local_name", &self.element.local_name)
            .finish()
    }
}

impl<'a> Element for NodeRef<'a> {
    fn local_name(&self) -> &str {
        &self.element.local_name
    }

    fn namespace(&self) -> Option<&str> {
        self.element.namespace.as_deref()
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.doc.html && self.namespace() == Some(HTML_NAMESPACE)
    }

    fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.element
            .attributes
            .iter()
            .find(|attr| attr.namespace.as_deref() == namespace && attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    fn any_attribute(&self, local_name: &str) -> Option<&str> {
        self.element
            .attributes
            .iter()
            .find(|attr| attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    fn attribute_case_sensitivity(&self, local_name: &str) -> CaseSensitivity {
        if self.is_html_element_in_html_document()
            && HTML_CASE_INSENSITIVE_ATTRIBUTES.contains(&local_name)
        {
            CaseSensitivity::AsciiCaseInsensitive
        } else {
            CaseSensitivity::CaseSensitive
        }
    }

    fn parent_element(&self) -> Option<Self> {
        self.node.parent.and_then(|parent| self.doc.element(parent))
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let siblings = self.siblings();
        let position = siblings.iter().position(|&id| id == self.id)?;
        siblings[..position]
            .iter()
            .rev()
            .find_map(|&id| self.doc.element(id))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let siblings = self.siblings();
        let position = siblings.iter().position(|&id| id == self.id)?;
        siblings[position + 1..]
            .iter()
            .find_map(|&id| self.doc.element(id))
    }

    fn child_nodes(&self) -> Vec<ChildNode<'_, Self>> {
        self.node
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.doc.nodes.get(id)?;
                Some(match &node.kind {
                    NodeKind::Text(text) => ChildNode::Text(Cow::Borrowed(text.as_str())),
                    NodeKind::Element(element) => ChildNode::Element(NodeRef {
                        doc: self.doc,
                        id,
                        node,
                        element,
                    }),
                })
            })
            .collect()
    }

    fn form_control_value(&self) -> Option<Cow<'_, str>> {
        self.element.value.as_deref().map(Cow::Borrowed)
    }

    fn table_columns(&self) -> Option<Vec<Self>> {
        Some(table::columns_of(self))
    }

    fn matches_state(&self, state: ElementState) -> bool {
        self.element.states.contains(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_navigation() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        let text = doc.create_text("between");
        let b = doc.create_element("b");
        for child in [a, text, b] {
            doc.append_child(root, child).unwrap();
        }

        let a_ref = doc.element(a).unwrap();
        let b_ref = doc.element(b).unwrap();
        assert_eq!(a_ref.next_sibling_element(), Some(b_ref));
        assert_eq!(b_ref.prev_sibling_element(), Some(a_ref));
        assert_eq!(a_ref.prev_sibling_element(), None);
        assert_eq!(a_ref.parent_element().map(|p| p.node_id()), Some(root));
        assert_eq!(doc.element(root).unwrap().child_nodes().len(), 3);
        assert_eq!(doc.element(root).unwrap().text_content(), "between");
        assert!(doc.element(text).is_none());
        assert_eq!(doc.roots().count(), 1);
    }

    #[test]
    fn invalid_edits() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let text = doc.create_text("t");

        assert!(matches!(doc.append_child(a, a), Err(Error::InvalidNode { .. })));
        assert!(doc.append_child(text, b).is_err());
        assert!(doc.set_attribute(text, "x", "y").is_err());

        doc.append_child(a, b).unwrap();
        // Already attached.
        assert!(doc.append_child(a, b).is_err());
        // Would create a cycle.
        assert!(doc.append_child(b, a).is_err());

        // Ids from a larger document do not exist here.
        let mut other = Document::new();
        let ids: Vec<_> = (0..5).map(|_| other.create_element("x")).collect();
        assert!(doc.append_child(a, ids[4]).is_err());
        assert!(doc.element(ids[4]).is_none());
    }

    #[test]
    fn attributes_and_namespaces() {
        let mut doc = Document::html();
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "text").unwrap();
        doc.set_attribute(input, "type", "Checkbox").unwrap();
        doc.set_attribute_ns(input, Some("urn:x"), "flag", "1").unwrap();

        let element = doc.element(input).unwrap();
        assert_eq!(element.attribute(None, "type"), Some("Checkbox"));
        assert_eq!(element.attribute(None, "flag"), None);
        assert_eq!(element.attribute(Some("urn:x"), "flag"), Some("1"));
        assert_eq!(element.any_attribute("flag"), Some("1"));
        assert!(element.is_html_element_in_html_document());
        assert_eq!(
            element.attribute_case_sensitivity("type"),
            CaseSensitivity::AsciiCaseInsensitive
        );
        assert_eq!(
            element.attribute_case_sensitivity("class"),
            CaseSensitivity::CaseSensitive
        );

        doc.remove_attribute(input, "type").unwrap();
        assert_eq!(doc.element(input).unwrap().attribute(None, "type"), None);
    }

    #[test]
    fn generic_documents_are_case_sensitive() {
        let mut doc = Document::new();
        let el = doc.create_element("item");
        let element = doc.element(el).unwrap();
        assert!(!element.is_html_element_in_html_document());
        assert_eq!(element.namespace(), None);
        assert_eq!(
            element.attribute_case_sensitivity("type"),
            CaseSensitivity::CaseSensitive
        );
    }

    #[test]
    fn state_and_value() {
        let mut doc = Document::html();
        let input = doc.create_element("input");
        doc.set_state(input, ElementState::Checked, true).unwrap();
        doc.set_value(input, "hello").unwrap();

        let element = doc.element(input).unwrap();
        assert!(element.matches_state(ElementState::Checked));
        assert!(!element.matches_state(ElementState::Hover));
        assert_eq!(element.form_control_value().as_deref(), Some("hello"));

        doc.set_state(input, ElementState::Checked, false).unwrap();
        assert!(!doc.element(input).unwrap().matches_state(ElementState::Checked));
    }

    #[test]
    fn node_id_is_distinct_from_the_id_attribute() {
        let mut doc = Document::html();
        let p = doc.create_element("p");
        doc.set_attribute(p, "id", "intro").unwrap();

        let element = doc.element(p).unwrap();
        assert_eq!(element.node_id(), p);
        assert_eq!(element.id(), Some("intro"));
    }
}
