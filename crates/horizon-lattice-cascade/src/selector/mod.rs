//! CSS selector types, matching and specificity.

mod matcher;
mod specificity;
mod types;

pub use matcher::{BranchMatch, MatchedBranch, SelectorMatch, SelectorMatcher};
pub use specificity::Specificity;
pub use types::*;
