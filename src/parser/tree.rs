//! Declaration tree produced by a source parser
//!
//! Only what the fixers need is modelled: functions, class-like types with
//! their methods and properties, and the lines they span.

use serde::Serialize;

/// Kind of a located declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Method,
    Property,
    Class,
    Interface,
    Trait,
    Enum,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Method => write!(f, "method"),
            Self::Property => write!(f, "property"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Trait => write!(f, "trait"),
            Self::Enum => write!(f, "enum"),
        }
    }
}

/// A declaration with 1-based, inclusive line bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl Declaration {
    pub fn new(
        kind: DeclarationKind,
        name: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            start_line,
            end_line,
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// A class-like declaration and its members, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassNode {
    pub declaration: Declaration,
    pub methods: Vec<Declaration>,
    pub properties: Vec<Declaration>,
}

impl ClassNode {
    pub fn new(declaration: Declaration) -> Self {
        Self {
            declaration,
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }
}

/// Parsed view of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceTree {
    pub functions: Vec<Declaration>,
    pub classes: Vec<ClassNode>,
}

impl SourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty()
    }
}

/// Source-to-tree oracle
///
/// Returns `None` when the content cannot be parsed; fixers report that as
/// an ordinary failure.
pub trait SourceParser: Send + Sync {
    fn parse(&self, content: &str) -> Option<SourceTree>;
}
