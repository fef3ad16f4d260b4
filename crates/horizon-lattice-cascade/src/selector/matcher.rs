//! Selector matching algorithm.
//!
//! Matching walks a selector right to left: the subject compound must match
//! the element itself, and each combinator then constrains which ancestor
//! or sibling has to match the compound to its left. Descendant and
//! sibling combinators backtrack over every candidate.
//!
//! Besides a yes/no answer the matcher records, for every `:is()`, `:not()`
//! and `:where()` it passes through, which branches of the argument list
//! matched. [`Specificity::of_match`](super::Specificity::of_match) uses
//! that record to score `:is()` by the branch that actually applied.

use super::{
    AttrOperator, AttributeSelector, CaseFlag, Combinator, NamespaceConstraint, PseudoClass,
    PseudoElement, Selector, SelectorList, SelectorPart, SimpleSelector, TypeSelector,
};
use crate::direction::{DirectionResolver, DirectionalityPolicy, TextDirection};
use crate::element::{CaseSensitivity, ChildNode, Element};
use crate::error::Capability;
use crate::{Error, Result};

/// Branch choices made while matching one selector.
///
/// Entries are indexed by the ordinal of the logical pseudo-class within the
/// selector, counting left to right across all compounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorMatch {
    logical: Vec<Option<BranchMatch>>,
}

impl SelectorMatch {
    fn for_selector(selector: &Selector) -> Self {
        Self {
            logical: vec![None; selector.logical_count()],
        }
    }

    fn record(&mut self, ordinal: usize, branches: BranchMatch) {
        if let Some(slot) = self.logical.get_mut(ordinal) {
            *slot = Some(branches);
        }
    }

    /// The branches recorded for the logical pseudo-class at `ordinal`.
    pub fn branch(&self, ordinal: usize) -> Option<&BranchMatch> {
        self.logical.get(ordinal).and_then(Option::as_ref)
    }

    /// Number of logical pseudo-classes in the matched selector.
    pub fn logical_count(&self) -> usize {
        self.logical.len()
    }
}

/// The branches of one logical pseudo-class's argument list that matched.
///
/// For `:not()` this is always empty, since it only matches when no branch does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMatch {
    branches: Vec<MatchedBranch>,
}

impl BranchMatch {
    /// All matching branches, in argument order.
    pub fn branches(&self) -> &[MatchedBranch] {
        &self.branches
    }

    /// Indices of the matching branches.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.branches.iter().map(|b| b.index)
    }

    /// Returns true if no branch matched.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// One matching branch and the choices made inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedBranch {
    /// Position of the branch in the argument list.
    pub index: usize,
    /// Branch choices for logical pseudo-classes nested in the branch.
    pub inner: SelectorMatch,
}

/// Selector matching engine.
///
/// A matcher is cheap to clone and holds only configuration: the
/// directionality policy used by `:dir()` and the pseudo-element being
/// styled, if any.
#[derive(Debug, Clone, Default)]
pub struct SelectorMatcher {
    direction: DirectionResolver,
    pseudo_element: Option<PseudoElement>,
}

impl SelectorMatcher {
    /// Create a matcher with the default HTML directionality policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom directionality policy.
    pub fn with_policy(policy: DirectionalityPolicy) -> Self {
        Self {
            direction: DirectionResolver::new(policy),
            pseudo_element: None,
        }
    }

    /// Match selectors for a pseudo-element of the element instead of the element itself.
    pub fn for_pseudo_element(mut self, pseudo: PseudoElement) -> Self {
        self.pseudo_element = Some(pseudo);
        self
    }

    /// The pseudo-element this matcher targets.
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        self.pseudo_element
    }

    /// The resolver used for `:dir()`.
    pub fn direction_resolver(&self) -> &DirectionResolver {
        &self.direction
    }

    /// Check if a selector matches the element.
    pub fn matches<E: Element>(&self, element: &E, selector: &Selector) -> Result<bool> {
        Ok(self.match_selector(element, selector)?.is_some())
    }

    /// Check if any selector of a list matches the element.
    pub fn matches_list<E: Element>(&self, element: &E, list: &SelectorList) -> Result<bool> {
        for selector in list {
            if self.matches(element, selector)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Match a selector and report which logical branches were taken.
    ///
    /// Returns `Ok(None)` if the selector does not match.
    pub fn match_selector<E: Element>(
        &self,
        element: &E,
        selector: &Selector,
    ) -> Result<Option<SelectorMatch>> {
        selector.validate()?;

        if selector.pseudo_element() != self.pseudo_element.as_ref() {
            return Ok(None);
        }

        let mut trace = SelectorMatch::for_selector(selector);
        let matched = self.match_from_subject(element, selector, &mut trace)?;
        Ok(matched.then_some(trace))
    }

    /// Match every member of a list, returning the matching ones with their records.
    pub fn match_list<E: Element>(
        &self,
        element: &E,
        list: &SelectorList,
    ) -> Result<Vec<(usize, SelectorMatch)>> {
        let mut matched = vec![];
        for (index, selector) in list.iter().enumerate() {
            if let Some(trace) = self.match_selector(element, selector)? {
                matched.push((index, trace));
            }
        }
        Ok(matched)
    }

    fn match_from_subject<E: Element>(
        &self,
        element: &E,
        selector: &Selector,
        trace: &mut SelectorMatch,
    ) -> Result<bool> {
        let offsets = logical_offsets(selector);
        self.match_from(element, selector, selector.parts.len() - 1, &offsets, trace)
    }

    /// Match `parts[index]` against `element`, then the rest of the chain leftwards.
    fn match_from<E: Element>(
        &self,
        element: &E,
        selector: &Selector,
        index: usize,
        offsets: &[usize],
        trace: &mut SelectorMatch,
    ) -> Result<bool> {
        if !self.match_compound(element, &selector.parts[index], offsets[index], trace)? {
            return Ok(false);
        }

        if index == 0 {
            return Ok(true);
        }

        let next = index - 1;
        match selector.combinators[next] {
            Combinator::Descendant => {
                let mut ancestor = element.parent_element();
                while let Some(candidate) = ancestor {
                    if self.match_from(&candidate, selector, next, offsets, trace)? {
                        return Ok(true);
                    }
                    ancestor = candidate.parent_element();
                }
                Ok(false)
            }

            Combinator::Child => match element.parent_element() {
                Some(parent) => self.match_from(&parent, selector, next, offsets, trace),
                None => Ok(false),
            },

            Combinator::AdjacentSibling => match element.prev_sibling_element() {
                Some(prev) => self.match_from(&prev, selector, next, offsets, trace),
                None => Ok(false),
            },

            Combinator::GeneralSibling => {
                let mut sibling = element.prev_sibling_element();
                while let Some(candidate) = sibling {
                    if self.match_from(&candidate, selector, next, offsets, trace)? {
                        return Ok(true);
                    }
                    sibling = candidate.prev_sibling_element();
                }
                Ok(false)
            }

            Combinator::Column => {
                let Some(columns) = element.table_columns() else {
                    tracing::debug!(
                        target: crate::targets::MATCH,
                        selector = %selector,
                        "column combinator without a table model"
                    );
                    return Err(Error::capability_missing(Capability::TableColumns, selector));
                };
                for column in &columns {
                    if self.match_from(column, selector, next, offsets, trace)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Check if a compound selector matches the element.
    fn match_compound<E: Element>(
        &self,
        element: &E,
        part: &SelectorPart,
        first_ordinal: usize,
        trace: &mut SelectorMatch,
    ) -> Result<bool> {
        let mut ordinal = first_ordinal;

        for simple in &part.simple {
            let matched = match simple {
                SimpleSelector::Universal(namespace) => namespace.matches(element.namespace()),
                SimpleSelector::Type(type_selector) => type_matches(element, type_selector),
                SimpleSelector::Id(id) => element.id() == Some(id.as_str()),
                SimpleSelector::Class(class) => element.has_class(class),
                SimpleSelector::Attribute(attribute) => attribute_matches(element, attribute),
                // Checked against the matcher's target before the walk starts.
                SimpleSelector::PseudoElement(_) => true,
                SimpleSelector::PseudoClass(pseudo) => {
                    let mut branches = None;
                    let matched = self.pseudo_matches(element, pseudo, &mut branches)?;
                    if pseudo.is_logical() {
                        if let Some(branches) = branches.filter(|_| matched) {
                            trace.record(ordinal, branches);
                        }
                        ordinal += 1;
                    }
                    matched
                }
            };

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Check if a pseudo-class matches the element.
    ///
    /// Logical pseudo-classes store their matching branches in `branches`.
    fn pseudo_matches<E: Element>(
        &self,
        element: &E,
        pseudo: &PseudoClass,
        branches: &mut Option<BranchMatch>,
    ) -> Result<bool> {
        let matched = match pseudo {
            PseudoClass::Root => element.parent_element().is_none(),
            PseudoClass::Empty => is_empty(element),

            PseudoClass::FirstChild => element.prev_sibling_element().is_none(),
            PseudoClass::LastChild => element.next_sibling_element().is_none(),
            PseudoClass::OnlyChild => {
                element.prev_sibling_element().is_none() && element.next_sibling_element().is_none()
            }
            PseudoClass::FirstOfType => count_preceding(element, true) == 0,
            PseudoClass::LastOfType => count_following(element, true) == 0,
            PseudoClass::OnlyOfType => {
                count_preceding(element, true) == 0 && count_following(element, true) == 0
            }
            PseudoClass::NthChild(expr) => expr.matches(count_preceding(element, false)),
            PseudoClass::NthLastChild(expr) => expr.matches(count_following(element, false)),
            PseudoClass::NthOfType(expr) => expr.matches(count_preceding(element, true)),
            PseudoClass::NthLastOfType(expr) => expr.matches(count_following(element, true)),

            PseudoClass::Not(list) => {
                let found = self.matching_branches(element, list)?;
                let matched = found.is_empty();
                *branches = Some(found);
                matched
            }
            PseudoClass::Is(list) | PseudoClass::Where(list) => {
                let found = self.matching_branches(element, list)?;
                let matched = !found.is_empty();
                *branches = Some(found);
                matched
            }

            PseudoClass::Lang(ranges) => element
                .language()
                .is_some_and(|lang| ranges.iter().any(|range| lang_matches(range, &lang))),

            PseudoClass::Dir(keyword) => match TextDirection::from_keyword(keyword) {
                Some(direction) => self.direction.resolve(element) == direction,
                None => false,
            },

            PseudoClass::State(state) => element.matches_state(*state),
        };

        Ok(matched)
    }

    /// Match every branch of a nested list against the element itself.
    fn matching_branches<E: Element>(
        &self,
        element: &E,
        list: &SelectorList,
    ) -> Result<BranchMatch> {
        let mut found = BranchMatch::default();
        for (index, selector) in list.iter().enumerate() {
            let mut inner = SelectorMatch::for_selector(selector);
            if self.match_from_subject(element, selector, &mut inner)? {
                found.branches.push(MatchedBranch { index, inner });
            }
        }
        Ok(found)
    }
}

/// First logical ordinal of each part.
fn logical_offsets(selector: &Selector) -> Vec<usize> {
    let mut next = 0;
    selector
        .parts
        .iter()
        .map(|part| {
            let first = next;
            next += part.logical_count();
            first
        })
        .collect()
}

fn type_matches<E: Element>(element: &E, selector: &TypeSelector) -> bool {
    if !selector.namespace.matches(element.namespace()) {
        return false;
    }
    if element.is_html_element_in_html_document() {
        element.local_name().eq_ignore_ascii_case(&selector.name)
    } else {
        element.local_name() == selector.name
    }
}

fn attribute_matches<E: Element>(element: &E, selector: &AttributeSelector) -> bool {
    let value = match &selector.namespace {
        NamespaceConstraint::Any => element.any_attribute(&selector.name),
        NamespaceConstraint::None => element.attribute(None, &selector.name),
        NamespaceConstraint::Url(url) => element.attribute(Some(url.as_str()), &selector.name),
    };

    let Some(value) = value else {
        return false;
    };
    let Some(op) = &selector.operation else {
        return true;
    };

    let case = match op.case {
        CaseFlag::Default => element.attribute_case_sensitivity(&selector.name),
        CaseFlag::Insensitive => CaseSensitivity::AsciiCaseInsensitive,
        CaseFlag::Sensitive => CaseSensitivity::CaseSensitive,
    };
    let expected = op.value.as_str();

    match op.operator {
        AttrOperator::Equals => case.eq_str(value, expected),
        AttrOperator::Includes => {
            !expected.is_empty()
                && !expected.contains(|c: char| c.is_ascii_whitespace())
                && value
                    .split_ascii_whitespace()
                    .any(|token| case.eq_str(token, expected))
        }
        AttrOperator::DashMatch => {
            case.eq_str(value, expected)
                || (case.starts_with(value, expected)
                    && value.as_bytes().get(expected.len()) == Some(&b'-'))
        }
        AttrOperator::Prefix => !expected.is_empty() && case.starts_with(value, expected),
        AttrOperator::Suffix => !expected.is_empty() && case.ends_with(value, expected),
        AttrOperator::Substring => !expected.is_empty() && case.contains(value, expected),
    }
}

fn is_empty<E: Element>(element: &E) -> bool {
    element.child_nodes().iter().all(|child| match child {
        ChildNode::Element(_) => false,
        ChildNode::Text(text) => text.chars().all(|c| c.is_ascii_whitespace()),
    })
}

fn same_type<E: Element>(a: &E, b: &E) -> bool {
    a.local_name() == b.local_name() && a.namespace() == b.namespace()
}

/// Number of preceding element siblings, optionally only those of the same type.
fn count_preceding<E: Element>(element: &E, of_type: bool) -> usize {
    let mut count = 0;
    let mut sibling = element.prev_sibling_element();
    while let Some(current) = sibling {
        if !of_type || same_type(element, &current) {
            count += 1;
        }
        sibling = current.prev_sibling_element();
    }
    count
}

/// Number of following element siblings, optionally only those of the same type.
fn count_following<E: Element>(element: &E, of_type: bool) -> usize {
    let mut count = 0;
    let mut sibling = element.next_sibling_element();
    while let Some(current) = sibling {
        if !of_type || same_type(element, &current) {
            count += 1;
        }
        sibling = current.next_sibling_element();
    }
    count
}

/// Basic language-range matching: equal, or a prefix ending at a hyphen.
fn lang_matches(range: &str, lang: &str) -> bool {
    if range == "*" {
        return !lang.is_empty();
    }
    if range.is_empty() {
        return false;
    }
    if range.eq_ignore_ascii_case(lang) {
        return true;
    }
    lang.as_bytes()
        .get(..range.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(range.as_bytes()))
        && lang.as_bytes().get(range.len()) == Some(&b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementState;
    use crate::selector::NthExpr;
    use std::borrow::Cow;

    /// A tiny flat tree: every element lives in one slice and links by index.
    #[derive(Debug)]
    struct Node {
        name: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
        parent: Option<usize>,
        children: Vec<usize>,
        text: Option<&'static str>,
        states: Vec<ElementState>,
    }

    #[derive(Clone, Copy)]
    struct TestElement<'a> {
        nodes: &'a [Node],
        index: usize,
    }

    impl<'a> TestElement<'a> {
        fn node(&self) -> &'a Node {
            &self.nodes[self.index]
        }

        fn at(&self, index: usize) -> Self {
            Self {
                nodes: self.nodes,
                index,
            }
        }

        fn element_siblings(&self) -> Vec<usize> {
            match self.node().parent {
                Some(parent) => self.nodes[parent]
                    .children
                    .iter()
                    .copied()
                    .filter(|&i| self.nodes[i].text.is_none())
                    .collect(),
                None => vec![self.index],
            }
        }
    }

    impl<'a> Element for TestElement<'a> {
        fn local_name(&self) -> &str {
            self.node().name
        }

        fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
            if namespace.is_some() {
                return None;
            }
            self.node()
                .attrs
                .iter()
                .find(|(name, _)| *name == local_name)
                .map(|(_, value)| *value)
        }

        fn parent_element(&self) -> Option<Self> {
            self.node().parent.map(|p| self.at(p))
        }

        fn prev_sibling_element(&self) -> Option<Self> {
            let siblings = self.element_siblings();
            let pos = siblings.iter().position(|&i| i == self.index)?;
            pos.checked_sub(1).map(|p| self.at(siblings[p]))
        }

        fn next_sibling_element(&self) -> Option<Self> {
            let siblings = self.element_siblings();
            let pos = siblings.iter().position(|&i| i == self.index)?;
            siblings.get(pos + 1).map(|&i| self.at(i))
        }

        fn child_nodes(&self) -> Vec<ChildNode<'_, Self>> {
            self.node()
                .children
                .iter()
                .map(|&i| match self.nodes[i].text {
                    Some(text) => ChildNode::Text(Cow::Borrowed(text)),
                    None => ChildNode::Element(self.at(i)),
                })
                .collect()
        }

        fn matches_state(&self, state: ElementState) -> bool {
            self.node().states.contains(&state)
        }
    }

    fn element(name: &'static str, parent: Option<usize>, children: Vec<usize>) -> Node {
        Node {
            name,
            attrs: vec![],
            parent,
            children,
            text: None,
            states: vec![],
        }
    }

    fn text(value: &'static str, parent: usize) -> Node {
        Node {
            name: "#text",
            attrs: vec![],
            parent: Some(parent),
            children: vec![],
            text: Some(value),
            states: vec![],
        }
    }

    /// <div class="box">
    ///   <p id="first" class="note">hi</p>
    ///   <span/>
    ///   <p class="note warning" lang="en-GB"/>
    /// </div>
    fn sample() -> Vec<Node> {
        let mut div = element("div", None, vec![1, 3, 4]);
        div.attrs = vec![("class", "box")];
        let mut p1 = element("p", Some(0), vec![2]);
        p1.attrs = vec![("id", "first"), ("class", "note")];
        p1.states = vec![ElementState::Hover];
        let mut p2 = element("p", Some(0), vec![]);
        p2.attrs = vec![("class", "note warning"), ("lang", "en-GB")];
        vec![div, p1, text("hi", 1), element("span", Some(0), vec![]), p2]
    }

    fn at(nodes: &[Node], index: usize) -> TestElement<'_> {
        TestElement { nodes, index }
    }

    #[test]
    fn type_class_and_id_selectors() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p1 = at(&nodes, 1);

        assert!(matcher.matches(&p1, &Selector::type_selector("p")).unwrap());
        assert!(!matcher.matches(&p1, &Selector::type_selector("P")).unwrap());
        assert!(matcher.matches(&p1, &Selector::universal()).unwrap());
        assert!(matcher.matches(&p1, &Selector::class("note")).unwrap());
        assert!(matcher.matches(&p1, &Selector::id("first")).unwrap());
        assert!(!matcher.matches(&p1, &Selector::id("second")).unwrap());
    }

    #[test]
    fn combinators_walk_the_tree() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p2 = at(&nodes, 4);

        let sel = Selector::class("box").child(SelectorPart::type_only("p"));
        assert!(matcher.matches(&p2, &sel).unwrap());

        let sel = Selector::type_selector("span").adjacent(SelectorPart::type_only("p"));
        assert!(matcher.matches(&p2, &sel).unwrap());

        let sel = Selector::id("first").adjacent(SelectorPart::type_only("p"));
        assert!(!matcher.matches(&p2, &sel).unwrap());

        let sel = Selector::id("first").sibling(SelectorPart::type_only("p"));
        assert!(matcher.matches(&p2, &sel).unwrap());

        let sel = Selector::type_selector("section").descendant(SelectorPart::type_only("p"));
        assert!(!matcher.matches(&p2, &sel).unwrap());
    }

    #[test]
    fn descendant_backtracks_over_ancestors() {
        // <div class="a"><div class="b"><div><p/></div></div></div>
        let mut outer = element("div", None, vec![1]);
        outer.attrs = vec![("class", "a")];
        let mut middle = element("div", Some(0), vec![2]);
        middle.attrs = vec![("class", "b")];
        let inner = element("div", Some(1), vec![3]);
        let p = element("p", Some(2), vec![]);
        let nodes = vec![outer, middle, inner, p];

        // `.a > div p`: the nearest div ancestor fails `.a >`, a farther one succeeds.
        let sel = Selector::class("a")
            .child(SelectorPart::type_only("div"))
            .descendant(SelectorPart::type_only("p"));
        assert!(SelectorMatcher::new().matches(&at(&nodes, 3), &sel).unwrap());
    }

    #[test]
    fn structural_pseudo_classes() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p1 = at(&nodes, 1);
        let span = at(&nodes, 3);
        let p2 = at(&nodes, 4);
        let pseudo = |p: PseudoClass| Selector::compound(SelectorPart::new().with_pseudo(p));

        assert!(matcher.matches(&p1, &pseudo(PseudoClass::FirstChild)).unwrap());
        assert!(!matcher.matches(&p2, &pseudo(PseudoClass::FirstChild)).unwrap());
        assert!(matcher.matches(&p2, &pseudo(PseudoClass::LastChild)).unwrap());
        assert!(matcher.matches(&span, &pseudo(PseudoClass::OnlyOfType)).unwrap());
        assert!(matcher.matches(&p2, &pseudo(PseudoClass::LastOfType)).unwrap());
        assert!(!matcher.matches(&p1, &pseudo(PseudoClass::OnlyOfType)).unwrap());
        let second = pseudo(PseudoClass::NthChild(NthExpr::new(0, 2)));
        assert!(matcher.matches(&span, &second).unwrap());
        let third_from_end = pseudo(PseudoClass::NthLastChild(NthExpr::new(0, 3)));
        assert!(matcher.matches(&p1, &third_from_end).unwrap());
        assert!(matcher.matches(&p2, &pseudo(PseudoClass::NthOfType(NthExpr::even()))).unwrap());
        assert!(matcher.matches(&at(&nodes, 0), &pseudo(PseudoClass::Root)).unwrap());
        assert!(!matcher.matches(&p1, &pseudo(PseudoClass::Root)).unwrap());
        assert!(matcher.matches(&span, &pseudo(PseudoClass::Empty)).unwrap());
        assert!(!matcher.matches(&p1, &pseudo(PseudoClass::Empty)).unwrap());
    }

    #[test]
    fn empty_ignores_whitespace_text() {
        let mut div = element("div", None, vec![1]);
        div.attrs = vec![];
        let nodes = vec![div, text("  \n\t", 0)];
        let sel = Selector::compound(SelectorPart::new().with_pseudo(PseudoClass::Empty));
        assert!(SelectorMatcher::new().matches(&at(&nodes, 0), &sel).unwrap());
    }

    #[test]
    fn attribute_operators() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p2 = at(&nodes, 4);
        let attr = |a: AttributeSelector| Selector::compound(SelectorPart::new().with_attribute(a));

        assert!(matcher.matches(&p2, &attr(AttributeSelector::exists("lang"))).unwrap());
        assert!(!matcher.matches(&p2, &attr(AttributeSelector::exists("dir"))).unwrap());
        assert!(matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Includes, "warning")))
            .unwrap());
        assert!(!matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Equals, "warning")))
            .unwrap());
        assert!(matcher
            .matches(&p2, &attr(AttributeSelector::new("lang", AttrOperator::DashMatch, "en")))
            .unwrap());
        assert!(matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Prefix, "note")))
            .unwrap());
        assert!(matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Suffix, "ning")))
            .unwrap());
        assert!(matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Substring, "e w")))
            .unwrap());
        assert!(!matcher
            .matches(&p2, &attr(AttributeSelector::new("class", AttrOperator::Substring, "")))
            .unwrap());
        assert!(!matcher
            .matches(&p2, &attr(AttributeSelector::new("lang", AttrOperator::Equals, "EN-gb")))
            .unwrap());
        assert!(matcher
            .matches(
                &p2,
                &attr(
                    AttributeSelector::new("lang", AttrOperator::Equals, "EN-gb")
                        .with_case(CaseFlag::Insensitive)
                )
            )
            .unwrap());
    }

    #[test]
    fn logical_pseudo_classes() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p1 = at(&nodes, 1);
        let p2 = at(&nodes, 4);

        let not_first = Selector::compound(
            SelectorPart::type_only("p").with_pseudo(PseudoClass::not(Selector::id("first"))),
        );
        assert!(!matcher.matches(&p1, &not_first).unwrap());
        assert!(matcher.matches(&p2, &not_first).unwrap());

        let is_list = SelectorList::new(vec![Selector::class("warning"), Selector::id("first")]);
        let sel =
            Selector::compound(SelectorPart::new().with_pseudo(PseudoClass::Is(is_list.clone())));
        assert!(matcher.matches(&p1, &sel).unwrap());
        assert!(matcher.matches(&p2, &sel).unwrap());
        assert!(!matcher.matches(&at(&nodes, 3), &sel).unwrap());

        let sel = Selector::compound(SelectorPart::new().with_pseudo(PseudoClass::Where(is_list)));
        assert!(matcher.matches(&p1, &sel).unwrap());
    }

    #[test]
    fn match_reports_all_matching_branches() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p1 = at(&nodes, 1);

        let list = SelectorList::new(vec![
            Selector::class("warning"),
            Selector::id("first"),
            Selector::type_selector("p"),
        ]);
        let sel = Selector::compound(SelectorPart::new().with_pseudo(PseudoClass::Is(list)));
        let trace = matcher.match_selector(&p1, &sel).unwrap().unwrap();

        assert_eq!(trace.logical_count(), 1);
        let branch = trace.branch(0).unwrap();
        assert_eq!(branch.indices().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn lang_and_state_pseudo_classes() {
        let nodes = sample();
        let matcher = SelectorMatcher::new();
        let p1 = at(&nodes, 1);
        let p2 = at(&nodes, 4);
        let lang = |r: &str| {
            Selector::compound(
                SelectorPart::new().with_pseudo(PseudoClass::Lang(vec![r.to_string()])),
            )
        };

        assert!(matcher.matches(&p2, &lang("en")).unwrap());
        assert!(matcher.matches(&p2, &lang("EN-gb")).unwrap());
        assert!(!matcher.matches(&p2, &lang("en-US")).unwrap());
        assert!(matcher.matches(&p2, &lang("*")).unwrap());
        assert!(!matcher.matches(&p1, &lang("en")).unwrap());

        let hover = Selector::compound(
            SelectorPart::new().with_pseudo(PseudoClass::State(ElementState::Hover)),
        );
        assert!(matcher.matches(&p1, &hover).unwrap());
        assert!(!matcher.matches(&p2, &hover).unwrap());
    }

    #[test]
    fn pseudo_element_requires_target() {
        let nodes = sample();
        let p1 = at(&nodes, 1);
        let before = Selector::compound(
            SelectorPart::type_only("p").with_pseudo_element(PseudoElement::Before),
        );
        let plain = Selector::type_selector("p");

        let matcher = SelectorMatcher::new();
        assert!(!matcher.matches(&p1, &before).unwrap());
        assert!(matcher.matches(&p1, &plain).unwrap());

        let matcher = SelectorMatcher::new().for_pseudo_element(PseudoElement::Before);
        assert!(matcher.matches(&p1, &before).unwrap());
        assert!(!matcher.matches(&p1, &plain).unwrap());

        let matcher = SelectorMatcher::new().for_pseudo_element(PseudoElement::After);
        assert!(!matcher.matches(&p1, &before).unwrap());
    }

    #[test]
    fn column_combinator_without_table_model_is_an_error() {
        let nodes = sample();
        let sel = Selector::type_selector("col").column(SelectorPart::type_only("p"));
        let err = SelectorMatcher::new().matches(&at(&nodes, 1), &sel).unwrap_err();
        assert!(err.is_capability_missing());

        // The subject is checked first, so a non-matching subject never needs the table model.
        let sel = Selector::type_selector("col").column(SelectorPart::type_only("td"));
        assert!(!SelectorMatcher::new().matches(&at(&nodes, 1), &sel).unwrap());
    }

    #[test]
    fn malformed_selector_is_an_error() {
        let nodes = sample();
        let sel = Selector {
            parts: vec![SelectorPart::type_only("div"), SelectorPart::type_only("p")],
            combinators: vec![],
        };
        let err = SelectorMatcher::new().matches(&at(&nodes, 1), &sel).unwrap_err();
        assert!(matches!(err, Error::MalformedSelector { .. }));
    }

    #[test]
    fn lang_range_rules() {
        assert!(lang_matches("en", "en"));
        assert!(lang_matches("en", "en-US"));
        assert!(lang_matches("EN", "en-us"));
        assert!(!lang_matches("en", "english"));
        assert!(!lang_matches("en-US", "en"));
        assert!(!lang_matches("", "en"));
    }

    #[test]
    fn dir_follows_the_configured_policy() {
        let mut nodes = sample();
        nodes[0].attrs.push(("direction", "rtl"));
        let rtl = Selector::compound(
            SelectorPart::new().with_pseudo(PseudoClass::Dir("rtl".to_string())),
        );

        let default = SelectorMatcher::new();
        assert!(!default.matches(&at(&nodes, 1), &rtl).unwrap());

        let custom =
            SelectorMatcher::with_policy(DirectionalityPolicy::new().dir_attribute("direction"));
        assert_eq!(custom.direction_resolver().policy().dir_attribute, "direction");
        assert!(custom.matches(&at(&nodes, 1), &rtl).unwrap());
    }
}
