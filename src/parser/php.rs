//! PHP Declaration Parser
//!
//! tree-sitter based `SourceParser` for PHP. Collects functions, class-like
//! types, their methods and their properties, including declarations nested
//! in namespaces or conditional blocks.

use super::tree::{ClassNode, Declaration, DeclarationKind, SourceParser, SourceTree};
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

/// Parser for PHP files (with or without the leading `<?php` tag)
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpParser;

impl PhpParser {
    pub fn new() -> Self {
        Self
    }

    fn language() -> Language {
        tree_sitter_php::LANGUAGE_PHP.into()
    }
}

impl SourceParser for PhpParser {
    fn parse(&self, content: &str) -> Option<SourceTree> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&Self::language()) {
            warn!("Failed to load PHP grammar: {}", e);
            return None;
        }

        let tree = parser.parse(content, None)?;
        let root = tree.root_node();
        if root.has_error() {
            debug!("PHP source contains syntax errors, using partial tree");
        }

        let mut source_tree = SourceTree::new();
        collect(&root, content, &mut source_tree);
        Some(source_tree)
    }
}

fn collect(node: &Node, source: &str, out: &mut SourceTree) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                if let Some(function) = declaration(&child, source, DeclarationKind::Function) {
                    out.functions.push(function);
                }
            }
            kind => match class_kind(kind) {
                Some(class_kind) => {
                    if let Some(class) = class_node(&child, source, class_kind) {
                        out.classes.push(class);
                    }
                }
                None => collect(&child, source, out),
            },
        }
    }
}

fn class_kind(node_kind: &str) -> Option<DeclarationKind> {
    match node_kind {
        "class_declaration" => Some(DeclarationKind::Class),
        "interface_declaration" => Some(DeclarationKind::Interface),
        "trait_declaration" => Some(DeclarationKind::Trait),
        "enum_declaration" => Some(DeclarationKind::Enum),
        _ => None,
    }
}

fn class_node(node: &Node, source: &str, kind: DeclarationKind) -> Option<ClassNode> {
    let mut class = ClassNode::new(declaration(node, source, kind)?);

    let Some(body) = node.child_by_field_name("body") else {
        return Some(class);
    };

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_declaration" => {
                if let Some(method) = declaration(&member, source, DeclarationKind::Method) {
                    class.methods.push(method);
                }
            }
            "property_declaration" => {
                class.properties.extend(properties(&member, source));
            }
            _ => {}
        }
    }

    Some(class)
}

fn declaration(node: &Node, source: &str, kind: DeclarationKind) -> Option<Declaration> {
    let name_node = node.child_by_field_name("name")?;
    Some(Declaration::new(
        kind,
        node_text(&name_node, source),
        node.start_position().row + 1,
        node.end_position().row + 1,
    ))
}

/// One declaration per property element, all spanning the whole statement
fn properties(node: &Node, source: &str) -> Vec<Declaration> {
    let start_line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;

    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == "property_element")
        .filter_map(|element| {
            let mut inner = element.walk();
            let variable = element
                .named_children(&mut inner)
                .find(|c| c.kind() == "variable_name")?;
            let name = node_text(&variable, source);
            Some(Declaration::new(
                DeclarationKind::Property,
                name.trim_start_matches('$'),
                start_line,
                end_line,
            ))
        })
        .collect()
}

fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string()
}
