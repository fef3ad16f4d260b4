//! Cascade construction and style resolution.

mod cascade;
mod declarations;
mod engine;

pub use cascade::{Cascade, CascadeEntry, CascadeKey, Iter};
pub use declarations::{cascade_declarations, CascadedDeclarations, CascadedValue};
pub use engine::StyleResolver;
