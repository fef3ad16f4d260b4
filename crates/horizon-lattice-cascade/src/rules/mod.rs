//! Style rules, declaration blocks and stylesheets.

mod declaration;
mod rule;
mod stylesheet;

pub use declaration::{Declaration, DeclarationBlock};
pub use rule::StyleRule;
pub use stylesheet::{Origin, StyleSheet};
