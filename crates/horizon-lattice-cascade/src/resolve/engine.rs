//! Main style resolution engine.

use crate::element::Element;
use crate::resolve::{cascade_declarations, Cascade, CascadedDeclarations};
use crate::rules::{StyleRule, StyleSheet};
use crate::selector::{SelectorMatcher, Specificity};
use crate::targets;
use crate::Result;

/// The main style resolution engine.
///
/// The resolver owns stylesheets and a configured [`SelectorMatcher`]. For
/// each element it collects the matching rules into a [`Cascade`] and can
/// merge that into winning declarations.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    /// All registered stylesheets, in the order they were added.
    stylesheets: Vec<StyleSheet>,
    /// Matcher used for every rule.
    matcher: SelectorMatcher,
    /// Source order given to the next ingested rule.
    next_order: u32,
}

impl StyleResolver {
    /// Create a resolver with the default matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with a configured matcher.
    pub fn with_matcher(matcher: SelectorMatcher) -> Self {
        Self {
            matcher,
            ..Self::default()
        }
    }

    /// The matcher in use.
    pub fn matcher(&self) -> &SelectorMatcher {
        &self.matcher
    }

    /// Add a stylesheet.
    ///
    /// Every rule gets a source order continuing after all previously added
    /// rules, and the sheet's origin.
    pub fn add_stylesheet(&mut self, mut stylesheet: StyleSheet) {
        for rule in &mut stylesheet.rules {
            rule.source_order = self.next_order;
            rule.origin = stylesheet.origin;
            self.next_order = self.next_order.saturating_add(1);
        }
        tracing::debug!(
            target: targets::CASCADE,
            origin = %stylesheet.origin,
            rules = stylesheet.rules.len(),
            "added stylesheet"
        );
        self.stylesheets.push(stylesheet);
    }

    /// Registered stylesheets.
    pub fn stylesheets(&self) -> &[StyleSheet] {
        &self.stylesheets
    }

    /// Total number of rules across all stylesheets.
    pub fn rule_count(&self) -> usize {
        self.stylesheets.iter().map(StyleSheet::len).sum()
    }

    /// Clear all stylesheets.
    pub fn clear_stylesheets(&mut self) {
        self.stylesheets.clear();
        self.next_order = 0;
    }

    /// Collect every rule matching `element`, ordered by priority.
    ///
    /// A rule with several selectors enters once, with the highest
    /// specificity among its matching selectors.
    pub fn cascade_for<E: Element>(&self, element: &E) -> Result<Cascade<'_>> {
        let mut cascade = Cascade::new();

        for rule in self.stylesheets.iter().flat_map(StyleSheet::iter) {
            let specificity = match self.rule_specificity(rule, element) {
                Ok(specificity) => specificity,
                Err(err) => {
                    tracing::warn!(
                        target: targets::CASCADE,
                        element = element.local_name(),
                        selectors = %rule.selectors,
                        error = %err,
                        "cannot evaluate rule"
                    );
                    return Err(err);
                }
            };

            if let Some(specificity) = specificity {
                tracing::trace!(
                    target: targets::CASCADE,
                    selectors = %rule.selectors,
                    %specificity,
                    order = rule.source_order,
                    "rule matched"
                );
                cascade.add(rule, specificity);
            }
        }

        tracing::debug!(
            target: targets::CASCADE,
            element = element.local_name(),
            matched = cascade.len(),
            "resolved cascade"
        );
        Ok(cascade)
    }

    /// Collect matching rules and merge them into winning declarations.
    pub fn declarations_for<E: Element>(&self, element: &E) -> Result<CascadedDeclarations<'_>> {
        let cascade = self.cascade_for(element)?;
        Ok(cascade_declarations(&cascade))
    }

    fn rule_specificity<E: Element>(
        &self,
        rule: &StyleRule,
        element: &E,
    ) -> Result<Option<Specificity>> {
        let mut best = None;
        for selector in &rule.selectors {
            if let Some(specificity) = Specificity::of_matching(selector, element, &self.matcher)? {
                best = best.max(Some(specificity));
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::rules::{DeclarationBlock, Origin};
    use crate::selector::{PseudoElement, Selector, SelectorList, SelectorPart};

    #[test]
    fn source_order_spans_stylesheets() {
        let mut resolver = StyleResolver::new();

        let mut first = StyleSheet::author();
        first.add_rule(Selector::type_selector("p"), DeclarationBlock::new().set("color", "red"));
        first.add_rule(Selector::type_selector("div"), DeclarationBlock::default());
        let mut second = StyleSheet::user();
        second.add_rule(Selector::type_selector("p"), DeclarationBlock::default());

        resolver.add_stylesheet(first);
        resolver.add_stylesheet(second);

        let orders: Vec<_> = resolver
            .stylesheets()
            .iter()
            .flat_map(StyleSheet::iter)
            .map(|r| (r.source_order, r.origin))
            .collect();
        assert_eq!(orders, [(0, Origin::Author), (1, Origin::Author), (2, Origin::User)]);
        assert_eq!(resolver.rule_count(), 3);

        resolver.clear_stylesheets();
        assert_eq!(resolver.rule_count(), 0);
    }

    #[test]
    fn list_rules_use_best_matching_member() {
        let mut doc = Document::html();
        let p = doc.create_element("p");
        doc.set_attribute(p, "class", "x").unwrap();

        let mut sheet = StyleSheet::author();
        sheet.add_rule(
            SelectorList::new(vec![
                Selector::id("nope"),
                Selector::class("x"),
                Selector::type_selector("p"),
            ]),
            DeclarationBlock::new().set("color", "red"),
        );
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(sheet);

        let element = doc.element(p).unwrap();
        let cascade = resolver.cascade_for(&element).unwrap();
        assert_eq!(cascade.len(), 1);
        assert_eq!(cascade.last().map(|e| e.key.specificity), Some(Specificity(0, 1, 0)));
    }

    #[test]
    fn declarations_merge() {
        let mut doc = Document::html();
        let p = doc.create_element("p");
        doc.set_attribute(p, "id", "main").unwrap();

        let mut sheet = StyleSheet::author();
        sheet.add_rule(Selector::id("main"), DeclarationBlock::new().set("color", "blue"));
        sheet.add_rule(
            Selector::type_selector("p"),
            DeclarationBlock::new().set("color", "red").set("margin", "0"),
        );
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(sheet);

        let decls = resolver.declarations_for(&doc.element(p).unwrap()).unwrap();
        assert_eq!(decls.value("color"), Some("blue"));
        assert_eq!(decls.value("margin"), Some("0"));
    }

    #[test]
    fn pseudo_element_resolver_only_sees_its_rules() {
        let mut doc = Document::html();
        let p = doc.create_element("p");

        let mut sheet = StyleSheet::author();
        sheet.add_rule(Selector::type_selector("p"), DeclarationBlock::new().set("color", "red"));
        sheet.add_rule(
            Selector::compound(
                SelectorPart::type_only("p").with_pseudo_element(PseudoElement::Before),
            ),
            DeclarationBlock::new().set("content", "\"*\""),
        );

        let mut resolver = StyleResolver::with_matcher(
            SelectorMatcher::new().for_pseudo_element(PseudoElement::Before),
        );
        resolver.add_stylesheet(sheet);

        let decls = resolver.declarations_for(&doc.element(p).unwrap()).unwrap();
        assert_eq!(decls.value("content"), Some("\"*\""));
        assert_eq!(decls.value("color"), None);
    }
}
