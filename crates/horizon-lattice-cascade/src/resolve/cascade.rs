//! Ordered collection of matched rules.

use std::collections::{btree_map, BTreeMap};
use std::slice;

use crate::rules::{Origin, StyleRule};
use crate::selector::Specificity;

/// Sort key of a cascade entry.
///
/// Compared field by field: origin, then specificity, then source order.
/// Within one origin this is exactly (specificity, source order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CascadeKey {
    /// Origin of the rule.
    pub origin: Origin,
    /// Specificity the rule matched with.
    pub specificity: Specificity,
    /// Source order of the rule (higher = later).
    pub source_order: u32,
}

/// One matched rule with its sort key.
#[derive(Debug, Clone, Copy)]
pub struct CascadeEntry<'a> {
    /// The matched rule.
    pub rule: &'a StyleRule,
    /// Where the rule sorts.
    pub key: CascadeKey,
}

/// Matched rules in ascending priority.
///
/// Later entries override earlier ones. Insertion order never affects the
/// result: entries sort by [`CascadeKey`], and the cascade only borrows rules.
/// Iteration does not consume or mutate the cascade, so it can be repeated.
#[derive(Debug, Clone, Default)]
pub struct Cascade<'a> {
    entries: BTreeMap<CascadeKey, Vec<&'a StyleRule>>,
    len: usize,
}

impl<'a> Cascade<'a> {
    /// Create an empty cascade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a matched rule with the specificity it matched with.
    pub fn add(&mut self, rule: &'a StyleRule, specificity: Specificity) {
        let key = CascadeKey {
            origin: rule.origin,
            specificity,
            source_order: rule.source_order,
        };
        self.entries.entry(key).or_default().push(rule);
        self.len += 1;
    }

    /// Iterate over entries from lowest to highest priority.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            outer: self.entries.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Iterate over the rules from lowest to highest priority.
    pub fn rules(&self) -> impl Iterator<Item = &'a StyleRule> + '_ {
        self.iter().map(|entry| entry.rule)
    }

    /// The highest-priority entry.
    pub fn last(&self) -> Option<CascadeEntry<'a>> {
        let (key, rules) = self.entries.last_key_value()?;
        rules.last().map(|rule| CascadeEntry { rule: *rule, key: *key })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the cascade is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'c, 'a> IntoIterator for &'c Cascade<'a> {
    type Item = CascadeEntry<'a>;
    type IntoIter = Iter<'c, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Cascade`].
#[derive(Debug, Clone)]
pub struct Iter<'c, 'a> {
    outer: btree_map::Iter<'c, CascadeKey, Vec<&'a StyleRule>>,
    current: Option<(CascadeKey, slice::Iter<'c, &'a StyleRule>)>,
    remaining: usize,
}

impl<'c, 'a> Iterator for Iter<'c, 'a> {
    type Item = CascadeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, rules)) = &mut self.current {
                if let Some(rule) = rules.next() {
                    self.remaining -= 1;
                    return Some(CascadeEntry { rule: *rule, key: *key });
                }
            }
            let (key, rules) = self.outer.next()?;
            self.current = Some((*key, rules.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}
