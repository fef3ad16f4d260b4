//! Property declarations.

use std::fmt;

/// A single `name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Property name.
    pub name: String,
    /// Unparsed property value.
    pub value: String,
    /// Whether the declaration carries `!important`.
    pub important: bool,
}

impl Declaration {
    /// Create a normal declaration.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            important: false,
        }
    }

    /// Create an `!important` declaration.
    pub fn important(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            important: true,
            ..Self::new(name, value)
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}

/// Ordered declarations of one rule.
///
/// Setting a property that is already present replaces it in place, so each
/// name appears at most once and keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeclarationBlock {
    declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a declaration.
    pub fn push(&mut self, declaration: Declaration) {
        match self.declarations.iter_mut().find(|d| d.name == declaration.name) {
            Some(existing) => *existing = declaration,
            None => self.declarations.push(declaration),
        }
    }

    /// Set a normal declaration (builder style).
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Declaration::new(name, value));
        self
    }

    /// Set an `!important` declaration (builder style).
    pub fn set_important(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Declaration::important(name, value));
        self
    }

    /// Look up a declaration by property name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Remove a declaration, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Declaration> {
        let index = self.declarations.iter().position(|d| d.name == name)?;
        Some(self.declarations.remove(index))
    }

    /// Iterate over declarations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for DeclarationBlock {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut block = Self::new();
        for declaration in iter {
            block.push(declaration);
        }
        block
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{};", declaration)?;
        }
        Ok(())
    }
}
