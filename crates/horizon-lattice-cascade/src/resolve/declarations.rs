//! Merging a cascade into winning declarations.

use std::collections::BTreeMap;

use crate::resolve::{Cascade, CascadeKey};
use crate::rules::{Declaration, StyleRule};

/// The declaration that won for one property.
#[derive(Debug, Clone, Copy)]
pub struct CascadedValue<'a> {
    /// The winning declaration.
    pub declaration: &'a Declaration,
    /// The rule it came from.
    pub rule: &'a StyleRule,
    /// Cascade position of that rule.
    pub key: CascadeKey,
}

impl<'a> CascadedValue<'a> {
    /// The declared value.
    pub fn value(&self) -> &'a str {
        &self.declaration.value
    }

    /// Whether the winning declaration is `!important`.
    pub fn is_important(&self) -> bool {
        self.declaration.important
    }

    fn rank(&self) -> (bool, u8, CascadeKey) {
        let important = self.declaration.important;
        let origin_rank = if important {
            self.key.origin.important_rank()
        } else {
            self.key.origin as u8
        };
        (important, origin_rank, self.key)
    }
}

/// Winning declarations per property name.
#[derive(Debug, Clone, Default)]
pub struct CascadedDeclarations<'a> {
    values: BTreeMap<&'a str, CascadedValue<'a>>,
}

impl<'a> CascadedDeclarations<'a> {
    /// The winning declaration for a property.
    pub fn get(&self, name: &str) -> Option<&CascadedValue<'a>> {
        self.values.get(name)
    }

    /// The winning value for a property.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).map(CascadedValue::value)
    }

    /// Iterate over properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &CascadedValue<'a>)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of properties with a winning declaration.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no property was declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pick the winning declaration for every property named in the cascade.
///
/// Normal declarations: last wins in cascade order. `!important`
/// declarations beat normal ones, and among them origin precedence is
/// reversed (user-agent over user over author).
pub fn cascade_declarations<'a>(cascade: &Cascade<'a>) -> CascadedDeclarations<'a> {
    let mut values: BTreeMap<&'a str, CascadedValue<'a>> = BTreeMap::new();

    for entry in cascade {
        for declaration in &entry.rule.declarations {
            let candidate = CascadedValue {
                declaration,
                rule: entry.rule,
                key: entry.key,
            };
            match values.get(declaration.name.as_str()) {
                Some(current) if current.rank() > candidate.rank() => {}
                _ => {
                    values.insert(&declaration.name, candidate);
                }
            }
        }
    }

    CascadedDeclarations { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DeclarationBlock, Origin};
    use crate::selector::Specificity;

    #[test]
    fn later_entries_override() {
        let low = StyleRule::for_type(
            "p",
            DeclarationBlock::new().set("color", "red").set("margin", "0"),
            0,
        );
        let high = StyleRule::for_class("x", DeclarationBlock::new().set("color", "blue"), 1);

        let mut cascade = Cascade::new();
        cascade.add(&high, Specificity(0, 1, 0));
        cascade.add(&low, Specificity(0, 0, 1));

        let decls = cascade_declarations(&cascade);
        assert_eq!(decls.value("color"), Some("blue"));
        assert_eq!(decls.value("margin"), Some("0"));
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn important_beats_specificity() {
        let low =
            StyleRule::for_type("p", DeclarationBlock::new().set_important("color", "red"), 0);
        let high = StyleRule::for_id("x", DeclarationBlock::new().set("color", "blue"), 1);

        let mut cascade = Cascade::new();
        cascade.add(&low, Specificity(0, 0, 1));
        cascade.add(&high, Specificity(1, 0, 0));

        let decls = cascade_declarations(&cascade);
        let color = decls.get("color").unwrap();
        assert_eq!(color.value(), "red");
        assert!(color.is_important());
    }

    #[test]
    fn important_reverses_origin() {
        let ua =
            StyleRule::for_type("p", DeclarationBlock::new().set_important("color", "black"), 0)
                .with_origin(Origin::UserAgent);
        let author =
            StyleRule::for_id("x", DeclarationBlock::new().set_important("color", "blue"), 1);
        let user = StyleRule::for_type("p", DeclarationBlock::new().set("display", "none"), 2)
            .with_origin(Origin::User);
        let author_display =
            StyleRule::for_type("p", DeclarationBlock::new().set("display", "block"), 3);

        let mut cascade = Cascade::new();
        for rule in [&ua, &author, &user, &author_display] {
            cascade.add(rule, rule.max_specificity());
        }

        let decls = cascade_declarations(&cascade);
        assert_eq!(decls.value("color"), Some("black"));
        assert_eq!(decls.value("display"), Some("block"));
    }

    #[test]
    fn empty_cascade_has_no_declarations() {
        let decls = cascade_declarations(&Cascade::new());
        assert!(decls.is_empty());
        assert!(decls.value("color").is_none());
    }
}
