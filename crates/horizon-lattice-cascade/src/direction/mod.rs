//! Element directionality for `:dir()`.
//!
//! The resolved direction of an element comes from, in order: an explicit
//! `dir="ltr"`/`dir="rtl"`, content sniffing for `dir="auto"` and elements
//! that auto-detect by default (such as `<bdi>`), and finally inheritance
//! from the parent. The root defaults to left-to-right.
//!
//! Sniffing uses the first-strong rule: the first character in document
//! order whose bidi class is `L`, `R` or `AL` decides.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_cascade::direction::{first_strong_direction, TextDirection};
//!
//! assert_eq!(first_strong_direction("مرحبا Hello"), Some(TextDirection::RightToLeft));
//! assert_eq!(first_strong_direction("Hello مرحبا"), Some(TextDirection::LeftToRight));
//! assert_eq!(first_strong_direction("123!@#"), None);
//! ```

mod policy;
mod resolver;

pub use policy::DirectionalityPolicy;
pub use resolver::{resolve_direction, DirectionResolver};

use std::fmt;

use unicode_bidi::{bidi_class, BidiClass};

/// Resolved text direction of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// Left-to-right (the root default).
    #[default]
    LeftToRight,
    /// Right-to-left.
    RightToLeft,
}

impl TextDirection {
    /// Check if this direction is left-to-right.
    pub fn is_ltr(self) -> bool {
        matches!(self, TextDirection::LeftToRight)
    }

    /// Check if this direction is right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }

    /// Parse `ltr` or `rtl`, ASCII case-insensitively.
    ///
    /// `auto` and anything else yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("ltr") {
            Some(TextDirection::LeftToRight)
        } else if keyword.eq_ignore_ascii_case("rtl") {
            Some(TextDirection::RightToLeft)
        } else {
            None
        }
    }

    /// The keyword for this direction.
    pub fn as_keyword(self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "ltr",
            TextDirection::RightToLeft => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_keyword())
    }
}

/// Direction of the first strong character in `text`, if there is one.
pub fn first_strong_direction(text: &str) -> Option<TextDirection> {
    text.chars().find_map(|c| match bidi_class(c) {
        BidiClass::L => Some(TextDirection::LeftToRight),
        BidiClass::R | BidiClass::AL => Some(TextDirection::RightToLeft),
        _ => None,
    })
}
