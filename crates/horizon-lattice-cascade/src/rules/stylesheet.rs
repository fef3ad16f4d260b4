//! Stylesheet collection and management.

use std::fmt;

use crate::rules::{DeclarationBlock, StyleRule};
use crate::selector::SelectorList;

/// Where a style sheet came from.
///
/// For normal declarations later origins win; for `!important`
/// declarations the order is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Origin {
    /// Built-in defaults of the host.
    UserAgent = 0,
    /// User preferences.
    User = 1,
    /// The document's own styles.
    #[default]
    Author = 2,
}

impl Origin {
    /// Rank used for `!important` declarations, where origin precedence is reversed.
    pub fn important_rank(self) -> u8 {
        2 - self as u8
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::UserAgent => write!(f, "user-agent"),
            Origin::User => write!(f, "user"),
            Origin::Author => write!(f, "author"),
        }
    }
}

/// A stylesheet containing rules from one origin.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// The rules in this stylesheet.
    pub rules: Vec<StyleRule>,
    /// Origin of every rule in the sheet.
    pub origin: Origin,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(origin: Origin) -> Self {
        Self {
            rules: vec![],
            origin,
        }
    }

    /// Create a user-agent stylesheet.
    pub fn user_agent() -> Self {
        Self::new(Origin::UserAgent)
    }

    /// Create a user stylesheet.
    pub fn user() -> Self {
        Self::new(Origin::User)
    }

    /// Create an author stylesheet.
    pub fn author() -> Self {
        Self::new(Origin::Author)
    }

    /// Add a rule to the stylesheet.
    ///
    /// The rule's order is automatically set based on the current number of rules.
    pub fn add_rule(&mut self, selectors: impl Into<SelectorList>, declarations: DeclarationBlock) {
        let order = self.next_order();
        self.rules
            .push(StyleRule::new(selectors, declarations, order).with_origin(self.origin));
    }

    /// Add a pre-built rule to the stylesheet, taking over its origin and order.
    pub fn add_style_rule(&mut self, mut rule: StyleRule) {
        rule.source_order = self.next_order();
        rule.origin = self.origin;
        self.rules.push(rule);
    }

    fn next_order(&self) -> u32 {
        u32::try_from(self.rules.len()).unwrap_or(u32::MAX)
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
