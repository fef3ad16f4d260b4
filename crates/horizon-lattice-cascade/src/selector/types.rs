//! Selector type definitions.

use std::fmt;

use crate::element::ElementState;
use crate::{Error, Result};

/// A comma-separated list of selectors (e.g., "h1, .title > span").
///
/// A list matches an element if any of its members does. Member order is
/// preserved so that matching can report which branch matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    /// Create a list from selectors.
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }

    /// Create a list holding a single selector.
    pub fn single(selector: Selector) -> Self {
        Self(vec![selector])
    }

    /// Number of selectors in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the selectors.
    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.0.iter()
    }

    /// Get the selector at `index`.
    pub fn get(&self, index: usize) -> Option<&Selector> {
        self.0.get(index)
    }

    /// Check every member for structural errors.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::malformed_selector(self, "selector list is empty"));
        }
        self.iter().try_for_each(Selector::validate)
    }
}

impl From<Selector> for SelectorList {
    fn from(selector: Selector) -> Self {
        Self::single(selector)
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A complete selector (e.g., "div.note > p:first-child").
///
/// A selector consists of one or more compound selectors connected by
/// combinators. `combinators[i]` joins `parts[i]` and `parts[i + 1]`, so the
/// rightmost part is the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of compound selectors, leftmost first.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Create a selector from a single compound.
    pub fn compound(part: SelectorPart) -> Self {
        Self {
            parts: vec![part],
            combinators: vec![],
        }
    }

    /// Create a simple type selector.
    pub fn type_selector(name: impl Into<String>) -> Self {
        Self::compound(SelectorPart::type_only(name))
    }

    /// Create a universal selector (*).
    pub fn universal() -> Self {
        Self::compound(SelectorPart::universal())
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::compound(SelectorPart::class_only(class_name))
    }

    /// Create an ID selector.
    pub fn id(id: impl Into<String>) -> Self {
        Self::compound(SelectorPart::id_only(id))
    }

    /// Append a part joined by the given combinator.
    pub fn combine(mut self, combinator: Combinator, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(combinator);
        }
        self.parts.push(part);
        self
    }

    /// Add a descendant selector part.
    pub fn descendant(self, part: SelectorPart) -> Self {
        self.combine(Combinator::Descendant, part)
    }

    /// Add a child selector part.
    pub fn child(self, part: SelectorPart) -> Self {
        self.combine(Combinator::Child, part)
    }

    /// Add an adjacent sibling selector part.
    pub fn adjacent(self, part: SelectorPart) -> Self {
        self.combine(Combinator::AdjacentSibling, part)
    }

    /// Add a general sibling selector part.
    pub fn sibling(self, part: SelectorPart) -> Self {
        self.combine(Combinator::GeneralSibling, part)
    }

    /// Add a column selector part.
    pub fn column(self, part: SelectorPart) -> Self {
        self.combine(Combinator::Column, part)
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }

    /// The pseudo-element of the subject, if any.
    pub fn pseudo_element(&self) -> Option<&PseudoElement> {
        self.subject().and_then(SelectorPart::pseudo_element)
    }

    /// Total number of logical pseudo-classes (`:is`, `:not`, `:where`)
    /// at the top level of this selector, across all parts.
    pub fn logical_count(&self) -> usize {
        self.parts.iter().map(SelectorPart::logical_count).sum()
    }

    /// Check structural invariants that the parser is expected to uphold.
    pub fn validate(&self) -> Result<()> {
        self.validate_inner(false)
    }

    fn validate_inner(&self, nested: bool) -> Result<()> {
        if self.parts.is_empty() {
            return Err(Error::malformed_selector(self, "selector has no parts"));
        }
        if self.combinators.len() + 1 != self.parts.len() {
            return Err(Error::malformed_selector(
                self,
                format!(
                    "{} parts need {} combinators, found {}",
                    self.parts.len(),
                    self.parts.len() - 1,
                    self.combinators.len()
                ),
            ));
        }

        let last = self.parts.len() - 1;
        for (index, part) in self.parts.iter().enumerate() {
            if part.simple.is_empty() {
                return Err(Error::malformed_selector(self, "empty compound selector"));
            }

            let mut seen_pseudo_element = false;
            for simple in &part.simple {
                match simple {
                    SimpleSelector::PseudoElement(_) => {
                        if nested {
                            return Err(Error::malformed_selector(
                                self,
                                "pseudo-elements are not allowed inside a selector argument",
                            ));
                        }
                        if index != last {
                            return Err(Error::malformed_selector(
                                self,
                                "pseudo-element must be in the subject",
                            ));
                        }
                        if seen_pseudo_element {
                            return Err(Error::malformed_selector(
                                self,
                                "only one pseudo-element is allowed",
                            ));
                        }
                        seen_pseudo_element = true;
                    }
                    SimpleSelector::PseudoClass(PseudoClass::State(_)) => {}
                    _ if seen_pseudo_element => {
                        return Err(Error::malformed_selector(
                            self,
                            "only state pseudo-classes may follow a pseudo-element",
                        ));
                    }
                    SimpleSelector::PseudoClass(pseudo) => {
                        if let Some(list) = pseudo.selector_list() {
                            if list.is_empty() {
                                return Err(Error::malformed_selector(
                                    self,
                                    format!(":{}() needs at least one selector", pseudo.name()),
                                ));
                            }
                            for inner in list {
                                inner.validate_inner(true)?;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match self.combinators.get(i - 1) {
                    Some(Combinator::Descendant) => write!(f, " ")?,
                    Some(Combinator::Child) => write!(f, " > ")?,
                    Some(Combinator::AdjacentSibling) => write!(f, " + ")?,
                    Some(Combinator::GeneralSibling) => write!(f, " ~ ")?,
                    Some(Combinator::Column) => write!(f, " || ")?,
                    None => write!(f, " ?? ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g., "p.note:first-child").
///
/// Every simple selector must match for the compound to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Simple selectors in source order.
    pub simple: Vec<SimpleSelector>,
}

impl SelectorPart {
    /// Create a new empty selector part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type-only selector.
    pub fn type_only(name: impl Into<String>) -> Self {
        Self::new().with_type(name)
    }

    /// Create a universal selector part.
    pub fn universal() -> Self {
        Self::new().with(SimpleSelector::Universal(NamespaceConstraint::Any))
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self::new().with_class(class_name)
    }

    /// Create an ID-only selector.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self::new().with_id(id)
    }

    /// Append any simple selector.
    pub fn with(mut self, simple: SimpleSelector) -> Self {
        self.simple.push(simple);
        self
    }

    /// Add a type selector in any namespace.
    pub fn with_type(self, name: impl Into<String>) -> Self {
        self.with(SimpleSelector::Type(TypeSelector {
            namespace: NamespaceConstraint::Any,
            name: name.into(),
        }))
    }

    /// Add a type selector constrained to a namespace.
    pub fn with_type_ns(self, namespace: NamespaceConstraint, name: impl Into<String>) -> Self {
        self.with(SimpleSelector::Type(TypeSelector {
            namespace,
            name: name.into(),
        }))
    }

    /// Add an ID selector.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with(SimpleSelector::Id(id.into()))
    }

    /// Add a class selector.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with(SimpleSelector::Class(class.into()))
    }

    /// Add an attribute selector.
    pub fn with_attribute(self, attribute: AttributeSelector) -> Self {
        self.with(SimpleSelector::Attribute(attribute))
    }

    /// Add a pseudo-class selector.
    pub fn with_pseudo(self, pseudo: PseudoClass) -> Self {
        self.with(SimpleSelector::PseudoClass(pseudo))
    }

    /// Add a pseudo-element.
    pub fn with_pseudo_element(self, pseudo: PseudoElement) -> Self {
        self.with(SimpleSelector::PseudoElement(pseudo))
    }

    /// The pseudo-element in this compound, if any.
    pub fn pseudo_element(&self) -> Option<&PseudoElement> {
        self.simple.iter().find_map(|simple| match simple {
            SimpleSelector::PseudoElement(pseudo) => Some(pseudo),
            _ => None,
        })
    }

    /// Number of logical pseudo-classes directly in this compound.
    pub fn logical_count(&self) -> usize {
        self.simple
            .iter()
            .filter(|simple| matches!(simple, SimpleSelector::PseudoClass(p) if p.is_logical()))
            .count()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simple {
            write!(f, "{}", simple)?;
        }
        Ok(())
    }
}

/// One simple selector inside a compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Universal selector (*), optionally namespace-constrained.
    Universal(NamespaceConstraint),
    /// Type selector (tag name).
    Type(TypeSelector),
    /// ID selector (#id).
    Id(String),
    /// Class selector (.class).
    Class(String),
    /// Attribute selector ([name op value]).
    Attribute(AttributeSelector),
    /// Pseudo-class (:first-child, :is(...), ...).
    PseudoClass(PseudoClass),
    /// Pseudo-element (::before, ...).
    PseudoElement(PseudoElement),
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Universal(ns) => write!(f, "{}*", ns),
            SimpleSelector::Type(t) => write!(f, "{}", t),
            SimpleSelector::Id(id) => write!(f, "#{}", id),
            SimpleSelector::Class(class) => write!(f, ".{}", class),
            SimpleSelector::Attribute(attr) => write!(f, "{}", attr),
            SimpleSelector::PseudoClass(pseudo) => write!(f, ":{}", pseudo),
            SimpleSelector::PseudoElement(pseudo) => write!(f, "::{}", pseudo),
        }
    }
}

/// Namespace restriction on a type, universal or attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NamespaceConstraint {
    /// No restriction (`*|` or no prefix without a default namespace).
    #[default]
    Any,
    /// Only the null namespace (`|name`).
    None,
    /// Only the given namespace URI.
    Url(String),
}

impl NamespaceConstraint {
    /// Check a namespace against this constraint.
    pub fn matches(&self, namespace: Option<&str>) -> bool {
        match self {
            NamespaceConstraint::Any => true,
            NamespaceConstraint::None => namespace.is_none(),
            NamespaceConstraint::Url(url) => namespace == Some(url.as_str()),
        }
    }
}

impl fmt::Display for NamespaceConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceConstraint::Any => Ok(()),
            NamespaceConstraint::None => write!(f, "|"),
            NamespaceConstraint::Url(url) => write!(f, "{{{}}}|", url),
        }
    }
}

/// Type selector - matches an element's tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSelector {
    /// Namespace restriction.
    pub namespace: NamespaceConstraint,
    /// Local name (e.g., "div", "svg").
    pub name: String,
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.name)
    }
}

/// Attribute selector (e.g., `[lang|="en"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Namespace restriction on the attribute.
    pub namespace: NamespaceConstraint,
    /// Attribute local name.
    pub name: String,
    /// Value test; `None` only checks presence.
    pub operation: Option<AttributeOperation>,
}

impl AttributeSelector {
    /// `[name]` - presence test.
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            namespace: NamespaceConstraint::Any,
            name: name.into(),
            operation: None,
        }
    }

    /// `[name op value]` with the element's default case handling.
    pub fn new(name: impl Into<String>, operator: AttrOperator, value: impl Into<String>) -> Self {
        Self {
            namespace: NamespaceConstraint::Any,
            name: name.into(),
            operation: Some(AttributeOperation {
                operator,
                value: value.into(),
                case: CaseFlag::Default,
            }),
        }
    }

    /// Set the explicit case flag (`i` or `s`).
    pub fn with_case(mut self, case: CaseFlag) -> Self {
        if let Some(op) = &mut self.operation {
            op.case = case;
        }
        self
    }

    /// Restrict the attribute to a namespace.
    pub fn with_namespace(mut self, namespace: NamespaceConstraint) -> Self {
        self.namespace = namespace;
        self
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}", self.namespace, self.name)?;
        if let Some(op) = &self.operation {
            write!(f, "{}\"{}\"", op.operator, op.value)?;
            match op.case {
                CaseFlag::Default => {}
                CaseFlag::Insensitive => write!(f, " i")?,
                CaseFlag::Sensitive => write!(f, " s")?,
            }
        }
        write!(f, "]")
    }
}

/// Operator and value of an attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeOperation {
    /// Comparison operator.
    pub operator: AttrOperator,
    /// Value to compare against.
    pub value: String,
    /// Case handling requested by the selector.
    pub case: CaseFlag,
}

/// Attribute comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `=` - exact match.
    Equals,
    /// `~=` - whitespace-separated list contains the value.
    Includes,
    /// `|=` - exact match or prefix followed by a hyphen.
    DashMatch,
    /// `^=` - starts with.
    Prefix,
    /// `$=` - ends with.
    Suffix,
    /// `*=` - contains substring.
    Substring,
}

impl fmt::Display for AttrOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrOperator::Equals => "=",
            AttrOperator::Includes => "~=",
            AttrOperator::DashMatch => "|=",
            AttrOperator::Prefix => "^=",
            AttrOperator::Suffix => "$=",
            AttrOperator::Substring => "*=",
        })
    }
}

/// Case flag on an attribute selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseFlag {
    /// No flag: use the sensitivity the element declares for the attribute.
    #[default]
    Default,
    /// `i` - ASCII case-insensitive.
    Insensitive,
    /// `s` - case-sensitive.
    Sensitive,
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
    /// Adjacent sibling (+): matches immediately following sibling.
    AdjacentSibling,
    /// General sibling (~): matches any following sibling.
    GeneralSibling,
    /// Column combinator (||): matches cells belonging to a column.
    Column,
}

/// Pseudo-class selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// :root - element without a parent.
    Root,
    /// :empty - no element children and no non-whitespace text.
    Empty,
    /// :first-child - first among siblings.
    FirstChild,
    /// :last-child - last among siblings.
    LastChild,
    /// :only-child - only child of parent.
    OnlyChild,
    /// :first-of-type - first sibling with this tag name.
    FirstOfType,
    /// :last-of-type - last sibling with this tag name.
    LastOfType,
    /// :only-of-type - only sibling with this tag name.
    OnlyOfType,
    /// :nth-child(An+B)
    NthChild(NthExpr),
    /// :nth-last-child(An+B)
    NthLastChild(NthExpr),
    /// :nth-of-type(An+B)
    NthOfType(NthExpr),
    /// :nth-last-of-type(An+B)
    NthLastOfType(NthExpr),
    /// :not(list) - negation.
    Not(SelectorList),
    /// :is(list) - matches any, takes the specificity of the matching branch.
    Is(SelectorList),
    /// :where(list) - matches any, contributes no specificity.
    Where(SelectorList),
    /// :lang(range, ...) - language range match.
    Lang(Vec<String>),
    /// :dir(ident) - resolved text direction.
    Dir(String),
    /// Dynamic state (:hover, :checked, ...).
    State(ElementState),
}

impl PseudoClass {
    /// Parse an argument-less pseudo-class from its CSS keyword.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "root" => Some(Self::Root),
            "empty" => Some(Self::Empty),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "first-of-type" => Some(Self::FirstOfType),
            "last-of-type" => Some(Self::LastOfType),
            "only-of-type" => Some(Self::OnlyOfType),
            other => ElementState::from_css(other).map(Self::State),
        }
    }

    /// `:is()` over the given selectors.
    pub fn is(selectors: impl Into<SelectorList>) -> Self {
        Self::Is(selectors.into())
    }

    /// `:not()` over the given selectors.
    pub fn not(selectors: impl Into<SelectorList>) -> Self {
        Self::Not(selectors.into())
    }

    /// `:where()` over the given selectors.
    pub fn where_(selectors: impl Into<SelectorList>) -> Self {
        Self::Where(selectors.into())
    }

    /// The CSS name of this pseudo-class, without arguments.
    pub fn name(&self) -> &'static str {
        match self {
            PseudoClass::Root => "root",
            PseudoClass::Empty => "empty",
            PseudoClass::FirstChild => "first-child",
            PseudoClass::LastChild => "last-child",
            PseudoClass::OnlyChild => "only-child",
            PseudoClass::FirstOfType => "first-of-type",
            PseudoClass::LastOfType => "last-of-type",
            PseudoClass::OnlyOfType => "only-of-type",
            PseudoClass::NthChild(_) => "nth-child",
            PseudoClass::NthLastChild(_) => "nth-last-child",
            PseudoClass::NthOfType(_) => "nth-of-type",
            PseudoClass::NthLastOfType(_) => "nth-last-of-type",
            PseudoClass::Not(_) => "not",
            PseudoClass::Is(_) => "is",
            PseudoClass::Where(_) => "where",
            PseudoClass::Lang(_) => "lang",
            PseudoClass::Dir(_) => "dir",
            PseudoClass::State(state) => state.as_css(),
        }
    }

    /// Whether this pseudo-class takes a nested selector list.
    pub fn is_logical(&self) -> bool {
        self.selector_list().is_some()
    }

    /// The nested selector list of `:is()`, `:not()` or `:where()`.
    pub fn selector_list(&self) -> Option<&SelectorList> {
        match self {
            PseudoClass::Not(list) | PseudoClass::Is(list) | PseudoClass::Where(list) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::NthChild(expr)
            | PseudoClass::NthLastChild(expr)
            | PseudoClass::NthOfType(expr)
            | PseudoClass::NthLastOfType(expr) => write!(f, "{}({})", self.name(), expr),
            PseudoClass::Not(list) | PseudoClass::Is(list) | PseudoClass::Where(list) => {
                write!(f, "{}({})", self.name(), list)
            }
            PseudoClass::Lang(ranges) => write!(f, "lang({})", ranges.join(", ")),
            PseudoClass::Dir(dir) => write!(f, "dir({})", dir),
            _ => f.write_str(self.name()),
        }
    }
}

/// Pseudo-element selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    /// ::before
    Before,
    /// ::after
    After,
    /// ::first-line
    FirstLine,
    /// ::first-letter
    FirstLetter,
    /// ::marker
    Marker,
    /// ::selection
    Selection,
    /// ::placeholder
    Placeholder,
    /// ::backdrop
    Backdrop,
}

impl PseudoElement {
    /// Parse from a CSS keyword, with or without the leading colons.
    pub fn from_css(s: &str) -> Option<Self> {
        let name = s.trim_start_matches(':');
        match name.to_ascii_lowercase().as_str() {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "first-line" => Some(Self::FirstLine),
            "first-letter" => Some(Self::FirstLetter),
            "marker" => Some(Self::Marker),
            "selection" => Some(Self::Selection),
            "placeholder" => Some(Self::Placeholder),
            "backdrop" => Some(Self::Backdrop),
            _ => None,
        }
    }
}

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PseudoElement::Before => "before",
            PseudoElement::After => "after",
            PseudoElement::FirstLine => "first-line",
            PseudoElement::FirstLetter => "first-letter",
            PseudoElement::Marker => "marker",
            PseudoElement::Selection => "selection",
            PseudoElement::Placeholder => "placeholder",
            PseudoElement::Backdrop => "backdrop",
        })
    }
}

/// Expression for :nth-child and friends (An+B).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NthExpr {
    /// Coefficient (A in An+B).
    pub a: i32,
    /// Offset (B in An+B).
    pub b: i32,
}

impl NthExpr {
    /// Create a new nth expression.
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Check if a 0-indexed position matches this expression.
    pub fn matches(&self, index: usize) -> bool {
        let n = index as i64 + 1; // Convert to 1-indexed
        let (a, b) = (self.a as i64, self.b as i64);
        if a == 0 {
            n == b
        } else {
            let diff = n - b;
            if a > 0 {
                diff >= 0 && diff % a == 0
            } else {
                diff <= 0 && diff % a == 0
            }
        }
    }

    /// :nth-child(odd) = 2n+1.
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// :nth-child(even) = 2n.
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// :nth-child(n) - matches all.
    pub fn all() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl fmt::Display for NthExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (2, 1) => write!(f, "odd"),
            (2, 0) => write!(f, "even"),
            (0, b) => write!(f, "{}", b),
            (1, 0) => write!(f, "n"),
            (a, 0) => write!(f, "{}n", a),
            (1, b) if b > 0 => write!(f, "n+{}", b),
            (1, b) => write!(f, "n{}", b),
            (a, b) if b > 0 => write!(f, "{}n+{}", a, b),
            (a, b) => write!(f, "{}n{}", a, b),
        }
    }
}
