//! Single style rule definition.

use crate::rules::{DeclarationBlock, Origin};
use crate::selector::{Selector, SelectorList, Specificity};

/// A style rule mapping a selector list to declarations.
///
/// Each rule has:
/// - A selector list that determines which elements it applies to
/// - Declarations to apply when any member matches
/// - The origin it came from
/// - Source order for tie-breaking, assigned once when the rule is ingested
///
/// Equality compares selector text, declarations and origin. Two rules
/// differing only in source order are equal.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// The selectors for matching elements.
    pub selectors: SelectorList,
    /// The declarations to apply.
    pub declarations: DeclarationBlock,
    /// Where the rule came from.
    pub origin: Origin,
    /// Source order (for tie-breaking when specificity is equal).
    pub source_order: u32,
}

impl StyleRule {
    /// Create a new author rule.
    pub fn new(
        selectors: impl Into<SelectorList>,
        declarations: DeclarationBlock,
        source_order: u32,
    ) -> Self {
        Self {
            selectors: selectors.into(),
            declarations,
            origin: Origin::Author,
            source_order,
        }
    }

    /// Create a rule with a type selector.
    pub fn for_type(
        name: impl Into<String>,
        declarations: DeclarationBlock,
        source_order: u32,
    ) -> Self {
        Self::new(Selector::type_selector(name), declarations, source_order)
    }

    /// Create a rule with a class selector.
    pub fn for_class(
        class: impl Into<String>,
        declarations: DeclarationBlock,
        source_order: u32,
    ) -> Self {
        Self::new(Selector::class(class), declarations, source_order)
    }

    /// Create a rule with an ID selector.
    pub fn for_id(
        id: impl Into<String>,
        declarations: DeclarationBlock,
        source_order: u32,
    ) -> Self {
        Self::new(Selector::id(id), declarations, source_order)
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Highest structural specificity among the rule's selectors.
    ///
    /// Matching can only lower an `:is()` contribution, so this is an upper
    /// bound for any element.
    pub fn max_specificity(&self) -> Specificity {
        Specificity::of_list(&self.selectors)
    }
}

impl PartialEq for StyleRule {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.declarations == other.declarations
            && self.selectors.to_string() == other.selectors.to_string()
    }
}

impl Eq for StyleRule {}
