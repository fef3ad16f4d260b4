//! CSS specificity calculation.

use std::ops::{Add, AddAssign};

use super::{
    PseudoClass, Selector, SelectorList, SelectorMatch, SelectorMatcher, SelectorPart,
    SimpleSelector,
};
use crate::element::Element;
use crate::Result;

/// CSS specificity as (a, b, c) tuple.
///
/// - a: ID selectors
/// - b: Class selectors, attributes, pseudo-classes
/// - c: Type selectors, pseudo-elements
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Create a specificity from its three counts.
    pub fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self(ids, classes, types)
    }

    /// Calculate specificity of a selector from its structure alone.
    ///
    /// `:is()` and `:not()` count as their most specific argument; `:where()`
    /// counts nothing.
    pub fn of_selector(selector: &Selector) -> Self {
        Self::compute(selector, None)
    }

    /// The most specific member of a selector list.
    pub fn of_list(list: &SelectorList) -> Self {
        list.iter().map(Self::of_selector).max().unwrap_or_default()
    }

    /// Calculate specificity of a selector as it matched a particular element.
    ///
    /// `:is()` counts as its most specific argument among the branches that
    /// actually matched. `:not()` still counts its most specific argument,
    /// since none of them matched.
    pub fn of_match(selector: &Selector, matched: &SelectorMatch) -> Self {
        Self::compute(selector, Some(matched))
    }

    /// Match `selector` against `element` and compute the match-dependent specificity.
    ///
    /// Returns `Ok(None)` if the selector does not match.
    pub fn of_matching<E: Element>(
        selector: &Selector,
        element: &E,
        matcher: &SelectorMatcher,
    ) -> Result<Option<Self>> {
        Ok(matcher
            .match_selector(element, selector)?
            .map(|matched| Self::of_match(selector, &matched)))
    }

    /// Calculate specificity of a single compound selector.
    pub fn of_part(part: &SelectorPart) -> Self {
        let mut spec = Self::ZERO;
        let mut ordinal = 0;
        Self::add_part(part, None, &mut ordinal, &mut spec);
        spec
    }

    fn compute(selector: &Selector, matched: Option<&SelectorMatch>) -> Self {
        let mut spec = Self::ZERO;
        let mut ordinal = 0;
        for part in &selector.parts {
            Self::add_part(part, matched, &mut ordinal, &mut spec);
        }
        spec
    }

    fn add_part(
        part: &SelectorPart,
        matched: Option<&SelectorMatch>,
        ordinal: &mut usize,
        spec: &mut Self,
    ) {
        for simple in &part.simple {
            match simple {
                SimpleSelector::Universal(_) => {} // * has no specificity
                SimpleSelector::Type(_) | SimpleSelector::PseudoElement(_) => spec.2 += 1,
                SimpleSelector::Id(_) => spec.0 += 1,
                SimpleSelector::Class(_) | SimpleSelector::Attribute(_) => spec.1 += 1,
                SimpleSelector::PseudoClass(pseudo) => match pseudo {
                    PseudoClass::Where(_) => *ordinal += 1,
                    PseudoClass::Not(list) => {
                        *spec += Self::of_list(list);
                        *ordinal += 1;
                    }
                    PseudoClass::Is(list) => {
                        let branches = matched.and_then(|m| m.branch(*ordinal));
                        let inner = match branches {
                            Some(branches) if !branches.is_empty() => branches
                                .branches()
                                .iter()
                                .filter_map(|b| {
                                    list.get(b.index).map(|s| Self::of_match(s, &b.inner))
                                })
                                .max()
                                .unwrap_or_default(),
                            _ => Self::of_list(list),
                        };
                        *spec += inner;
                        *ordinal += 1;
                    }
                    _ => spec.1 += 1,
                },
            }
        }
    }

    /// Get the ID selector count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the class/pseudo-class count.
    pub fn classes(&self) -> u32 {
        self.1
    }

    /// Get the type selector count.
    pub fn types(&self) -> u32 {
        self.2
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(
            self.0.saturating_add(rhs.0),
            self.1.saturating_add(rhs.1),
            self.2.saturating_add(rhs.2),
        )
    }
}

impl AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}
