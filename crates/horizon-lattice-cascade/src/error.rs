//! Error types for selector matching and cascade resolution.

use std::fmt;

/// Result type alias for matching and cascade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A question about the document that an [`Element`](crate::element::Element)
/// implementation may be unable to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Table column membership, needed by the column combinator (`||`).
    TableColumns,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::TableColumns => write!(f, "a table column model"),
        }
    }
}

/// Errors that can occur while matching selectors.
///
/// A selector that is well-formed and simply does not match is not an
/// error; it yields `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The element cannot answer a question the selector depends on.
    #[error("Cannot evaluate '{selector}': element does not provide {capability}")]
    CapabilityMissing {
        capability: Capability,
        selector: String,
    },

    /// The selector structure handed over by the parser is invalid.
    #[error("Malformed selector '{selector}': {message}")]
    MalformedSelector { selector: String, message: String },

    /// An edit on the reference document referred to a missing or misplaced node.
    #[error("Invalid node: {message}")]
    InvalidNode { message: String },
}

impl Error {
    /// Create a capability error.
    pub fn capability_missing(capability: Capability, selector: impl fmt::Display) -> Self {
        Self::CapabilityMissing {
            capability,
            selector: selector.to_string(),
        }
    }

    /// Create a malformed selector error.
    pub fn malformed_selector(selector: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::MalformedSelector {
            selector: selector.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid node error.
    pub fn invalid_node(message: impl Into<String>) -> Self {
        Self::InvalidNode {
            message: message.into(),
        }
    }

    /// Returns true if this error means "can't evaluate" rather than a defect.
    pub fn is_capability_missing(&self) -> bool {
        matches!(self, Self::CapabilityMissing { .. })
    }
}
