//! The element capability that selector matching is generic over.
//!
//! Any tree-shaped document model can be matched against by implementing
//! [`Element`] on a cheap, cloneable handle to one of its elements. Only the
//! navigation and lookup methods are required; everything else has a
//! default built on top of them.

use std::borrow::Cow;
use std::fmt;

/// Namespace URI of the `xml:` prefix, used for `xml:lang`.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace URI of HTML elements.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// How an element compares the values of one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    /// Values are compared exactly.
    #[default]
    CaseSensitive,
    /// ASCII letters compare equal regardless of case.
    AsciiCaseInsensitive,
}

impl CaseSensitivity {
    /// Compare two strings under this sensitivity.
    pub fn eq_str(self, a: &str, b: &str) -> bool {
        match self {
            CaseSensitivity::CaseSensitive => a == b,
            CaseSensitivity::AsciiCaseInsensitive => a.eq_ignore_ascii_case(b),
        }
    }

    /// Check whether `haystack` starts with `prefix`.
    pub fn starts_with(self, haystack: &str, prefix: &str) -> bool {
        haystack
            .as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| self.eq_bytes(head, prefix.as_bytes()))
    }

    /// Check whether `haystack` ends with `suffix`.
    pub fn ends_with(self, haystack: &str, suffix: &str) -> bool {
        haystack
            .len()
            .checked_sub(suffix.len())
            .and_then(|start| haystack.as_bytes().get(start..))
            .is_some_and(|tail| self.eq_bytes(tail, suffix.as_bytes()))
    }

    /// Check whether `haystack` contains `needle`.
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseSensitivity::CaseSensitive => haystack.contains(needle),
            CaseSensitivity::AsciiCaseInsensitive => haystack
                .as_bytes()
                .windows(needle.len().max(1))
                .any(|window| window.eq_ignore_ascii_case(needle.as_bytes())),
        }
    }

    fn eq_bytes(self, a: &[u8], b: &[u8]) -> bool {
        match self {
            CaseSensitivity::CaseSensitive => a == b,
            CaseSensitivity::AsciiCaseInsensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Dynamic element state answered by the host rather than the tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// `:hover`
    Hover,
    /// `:active`
    Active,
    /// `:focus`
    Focus,
    /// `:focus-visible`
    FocusVisible,
    /// `:focus-within`
    FocusWithin,
    /// `:enabled`
    Enabled,
    /// `:disabled`
    Disabled,
    /// `:checked`
    Checked,
    /// `:indeterminate`
    Indeterminate,
    /// `:link`
    Link,
    /// `:visited`
    Visited,
    /// `:target`
    Target,
}

impl ElementState {
    /// Look up a state by its pseudo-class keyword.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hover" => Some(Self::Hover),
            "active" => Some(Self::Active),
            "focus" => Some(Self::Focus),
            "focus-visible" => Some(Self::FocusVisible),
            "focus-within" => Some(Self::FocusWithin),
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            "checked" => Some(Self::Checked),
            "indeterminate" => Some(Self::Indeterminate),
            "link" => Some(Self::Link),
            "visited" => Some(Self::Visited),
            "target" => Some(Self::Target),
            _ => None,
        }
    }

    /// The pseudo-class keyword for this state.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Focus => "focus",
            Self::FocusVisible => "focus-visible",
            Self::FocusWithin => "focus-within",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
            Self::Indeterminate => "indeterminate",
            Self::Link => "link",
            Self::Visited => "visited",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// A child of an element, in document order.
#[derive(Debug, Clone)]
pub enum ChildNode<'a, E> {
    /// A child element.
    Element(E),
    /// A text node.
    Text(Cow<'a, str>),
}

/// Read-only view of one element in a document tree.
///
/// Implementations are expected to be cheap handles (an id plus a reference
/// to the owning document). Matching never mutates the tree.
pub trait Element: Clone + Sized {
    /// The element's local (tag) name.
    fn local_name(&self) -> &str;

    /// The element's namespace URI, if any.
    fn namespace(&self) -> Option<&str> {
        None
    }

    /// Whether type selectors should compare the tag name ASCII case-insensitively.
    fn is_html_element_in_html_document(&self) -> bool {
        false
    }

    /// Look up an attribute by exact namespace and local name.
    fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str>;

    /// Look up an attribute by local name in any namespace.
    fn any_attribute(&self, local_name: &str) -> Option<&str> {
        self.attribute(None, local_name)
    }

    /// How values of the named attribute compare when a selector gives no flag.
    fn attribute_case_sensitivity(&self, _local_name: &str) -> CaseSensitivity {
        CaseSensitivity::CaseSensitive
    }

    /// The element's id.
    fn id(&self) -> Option<&str> {
        self.attribute(None, "id")
    }

    /// Whether the element's class list contains `name`.
    fn has_class(&self, name: &str) -> bool {
        self.attribute(None, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == name))
    }

    /// The parent element, or `None` at the root.
    fn parent_element(&self) -> Option<Self>;

    /// The closest preceding sibling that is an element.
    fn prev_sibling_element(&self) -> Option<Self>;

    /// The closest following sibling that is an element.
    fn next_sibling_element(&self) -> Option<Self>;

    /// Element and text children, in document order.
    fn child_nodes(&self) -> Vec<ChildNode<'_, Self>>;

    /// Concatenated text of all descendant text nodes, in document order.
    fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![owned_children(self).into_iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                Some(ChildNode::Text(chunk)) => text.push_str(&chunk),
                Some(ChildNode::Element(child)) => stack.push(owned_children(&child).into_iter()),
                None => {
                    stack.pop();
                }
            }
        }
        text
    }

    /// The element's resolved language: the nearest `xml:lang` or `lang`
    /// attribute on the element or an ancestor.
    fn language(&self) -> Option<String> {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            let lang = element
                .attribute(Some(XML_NAMESPACE), "lang")
                .or_else(|| element.attribute(None, "lang"));
            if let Some(lang) = lang {
                return Some(lang.to_string());
            }
            current = element.parent_element();
        }
        None
    }

    /// The current value of a form control, if this element is one.
    fn form_control_value(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// The column and column-group elements this table cell belongs to.
    ///
    /// `None` means the document has no table model; non-cells in a
    /// document that has one return an empty list.
    fn table_columns(&self) -> Option<Vec<Self>> {
        None
    }

    /// Whether the element is currently in the given dynamic state.
    fn matches_state(&self, _state: ElementState) -> bool {
        false
    }
}

fn owned_children<E: Element>(element: &E) -> Vec<ChildNode<'static, E>> {
    element
        .child_nodes()
        .into_iter()
        .map(|child| match child {
            ChildNode::Text(text) => ChildNode::Text(Cow::Owned(text.into_owned())),
            ChildNode::Element(child) => ChildNode::Element(child),
        })
        .collect()
}
