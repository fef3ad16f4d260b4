//! Selector matching, specificity and cascade ordering for Horizon Lattice.
//!
//! This crate decides which style rules apply to an element and in which
//! order they override each other:
//!
//! - **Selectors**: type, class, ID, attribute, structural, logical
//!   (`:is()`, `:not()`, `:where()`), `:lang()` and `:dir()` pseudo-classes
//!   joined by descendant, child, sibling and column combinators
//! - **Specificity**: `(ids, classes, types)` with `:is()` scored by the
//!   branch that actually matched
//! - **Cascading**: rules ordered by origin, specificity and source order
//! - **Directionality**: first-strong-character resolution for `:dir()`
//!
//! Matching is generic over the [`Element`](element::Element) trait, so any
//! tree can be styled. [`dom::Document`] is a ready-made implementation.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_cascade::prelude::*;
//!
//! let mut doc = Document::html();
//! let div = doc.create_element("div");
//! let p = doc.create_element("p");
//! doc.append_child(div, p)?;
//! doc.set_attribute(p, "class", "note")?;
//!
//! let mut sheet = StyleSheet::author();
//! sheet.add_rule(Selector::type_selector("p"), DeclarationBlock::new().set("color", "black"));
//! sheet.add_rule(Selector::class("note"), DeclarationBlock::new().set("color", "blue"));
//!
//! let mut resolver = StyleResolver::new();
//! resolver.add_stylesheet(sheet);
//!
//! let element = doc.element(p).expect("p is an element");
//! let declarations = resolver.declarations_for(&element)?;
//! assert_eq!(declarations.value("color"), Some("blue"));
//! # Ok::<(), horizon_lattice_cascade::Error>(())
//! ```

pub mod direction;
pub mod dom;
pub mod element;
pub mod resolve;
pub mod rules;
pub mod selector;

mod error;

pub use error::{Capability, Error, Result};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Selector matching target.
    pub const MATCH: &str = "horizon_lattice_cascade::match";
    /// Directionality target.
    pub const DIRECTION: &str = "horizon_lattice_cascade::direction";
    /// Cascade construction target.
    pub const CASCADE: &str = "horizon_lattice_cascade::cascade";
    /// Reference document target.
    pub const DOM: &str = "horizon_lattice_cascade::dom";
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::direction::{
        resolve_direction, DirectionResolver, DirectionalityPolicy, TextDirection,
    };
    pub use crate::dom::{Document, NodeId, NodeRef};
    pub use crate::element::{Element, ElementState};
    pub use crate::resolve::{cascade_declarations, Cascade, CascadedDeclarations, StyleResolver};
    pub use crate::rules::{Declaration, DeclarationBlock, Origin, StyleRule, StyleSheet};
    pub use crate::selector::{
        AttrOperator, AttributeSelector, Combinator, NthExpr, PseudoClass, PseudoElement, Selector,
        SelectorList, SelectorMatcher, SelectorPart, Specificity,
    };
    pub use crate::{Error, Result};
}
