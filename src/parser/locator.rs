//! Declaration lookup by line number

use super::tree::{ClassNode, Declaration, SourceTree};

/// Tolerance for diagnostics that point at the signature line itself
pub const EXACT: usize = 0;

/// Tolerance for diagnostics that point a few lines into a declaration body
pub const BODY_WINDOW: usize = 5;

/// Result of a successful lookup
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub declaration: &'a Declaration,
    pub enclosing_class: Option<&'a ClassNode>,
    /// 1-based line the declaration starts on
    pub declaration_line: usize,
}

impl<'a> Located<'a> {
    fn new(declaration: &'a Declaration, enclosing_class: Option<&'a ClassNode>) -> Self {
        Self {
            declaration,
            enclosing_class,
            declaration_line: declaration.start_line,
        }
    }

    /// `Class::method` or `function`, for messages
    pub fn qualified_name(&self) -> String {
        match self.enclosing_class {
            Some(class) => format!("{}::{}", class.name(), self.declaration.name),
            None => self.declaration.name.clone(),
        }
    }
}

fn within(start_line: usize, target_line: usize, tolerance: usize) -> bool {
    start_line.abs_diff(target_line) <= tolerance
}

/// Find the function or method whose start line is within `tolerance` of
/// `target_line`
///
/// Free functions are searched first, then the methods of every class in
/// file order. The first match wins.
pub fn locate(tree: &SourceTree, target_line: usize, tolerance: usize) -> Option<Located<'_>> {
    if let Some(function) = tree
        .functions
        .iter()
        .find(|f| within(f.start_line, target_line, tolerance))
    {
        return Some(Located::new(function, None));
    }

    tree.classes.iter().find_map(|class| {
        class
            .methods
            .iter()
            .find(|m| within(m.start_line, target_line, tolerance))
            .map(|method| Located::new(method, Some(class)))
    })
}

/// Find a class property declared within `tolerance` of `target_line`
pub fn locate_property(
    tree: &SourceTree,
    target_line: usize,
    tolerance: usize,
) -> Option<Located<'_>> {
    tree.classes.iter().find_map(|class| {
        class
            .properties
            .iter()
            .find(|p| within(p.start_line, target_line, tolerance))
            .map(|property| Located::new(property, Some(class)))
    })
}

/// Find a class-like declaration starting within `tolerance` of `target_line`
pub fn locate_class(tree: &SourceTree, target_line: usize, tolerance: usize) -> Option<Located<'_>> {
    tree.classes
        .iter()
        .find(|c| within(c.declaration.start_line, target_line, tolerance))
        .map(|class| Located::new(&class.declaration, None))
}

/// Find the innermost function or method whose body spans `target_line`
pub fn locate_enclosing(tree: &SourceTree, target_line: usize) -> Option<Located<'_>> {
    let functions = tree
        .functions
        .iter()
        .filter(|f| f.contains_line(target_line))
        .map(|f| Located::new(f, None));

    let methods = tree.classes.iter().flat_map(|class| {
        class
            .methods
            .iter()
            .filter(|m| m.contains_line(target_line))
            .map(move |m| Located::new(m, Some(class)))
    });

    functions
        .chain(methods)
        .min_by_key(|located| located.declaration.end_line - located.declaration.start_line)
}
