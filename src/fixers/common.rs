//! Shared editing helpers for the built-in fixers

use crate::models::{Diagnostic, FixResult};
use crate::parser::{DocBlockEditor, Located, Tag};

/// Declaration a fixer decided to annotate
#[derive(Debug, Clone)]
pub struct Target {
    /// 1-based line the declaration starts on
    pub line: usize,
    /// Name used in messages (`Class::method`, `function`, `Class::$property`)
    pub label: String,
}

impl Target {
    pub fn new(line: usize, label: impl Into<String>) -> Self {
        Self {
            line,
            label: label.into(),
        }
    }
}

impl From<Located<'_>> for Target {
    fn from(located: Located<'_>) -> Self {
        Self::new(located.declaration_line, located.qualified_name())
    }
}

/// Insert `@tag value` into the block above `declaration_line`
///
/// Creates the block when there is none. Returns the reason as `Err` when
/// the line is out of range or `already_present` reports the annotation
/// exists, so nothing is ever duplicated. Lines outside the edited block
/// keep their own line endings.
pub fn insert_annotation(
    editor: &DocBlockEditor,
    content: &str,
    declaration_line: usize,
    tag: &Tag,
    value: &str,
    already_present: impl Fn(&str) -> bool,
) -> Result<String, String> {
    let mut lines: Vec<&str> = content.split_inclusive('\n').collect();
    let texts: Vec<&str> = lines.iter().map(|line| strip_ending(line)).collect();

    let anchor = declaration_line
        .checked_sub(1)
        .filter(|index| *index < lines.len())
        .ok_or_else(|| format!("Line {} is outside the file", declaration_line))?;

    let indent: String = texts[anchor]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let newline = match &lines[anchor][texts[anchor].len()..] {
        "" => first_ending(content),
        ending => ending,
    };

    let (range, block) = match editor.extract(&texts, anchor) {
        Some(existing) => {
            if already_present(&existing.text) {
                return Err(format!("PHPDoc already contains {}", tag));
            }
            let updated = editor.add_annotation(Some(&existing.text), tag, value, &indent);
            (existing.start_line..existing.end_line + 1, updated)
        }
        None => (anchor..anchor, editor.add_annotation(None, tag, value, &indent)),
    };

    let replacement: Vec<String> = block
        .lines()
        .map(|line| format!("{}{}", line, newline))
        .collect();
    let mut output = String::with_capacity(content.len() + block.len() + 16);
    for line in lines.drain(..range.start) {
        output.push_str(line);
    }
    replacement.iter().for_each(|line| output.push_str(line));
    for line in lines.drain(range.end - range.start..) {
        output.push_str(line);
    }
    Ok(output)
}

fn strip_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// The file's first line ending, `\n` when it has none
fn first_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(index) if content[..index].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Turn an insertion attempt into a `FixResult`
pub fn annotate(
    editor: &DocBlockEditor,
    diagnostic: &Diagnostic,
    content: &str,
    target: Target,
    tag: Tag,
    value: &str,
    already_present: impl Fn(&str) -> bool,
) -> FixResult {
    match insert_annotation(editor, content, target.line, &tag, value, already_present) {
        Ok(updated) => {
            let change = format!("Added {} {} to {}", tag, value, target.label);
            FixResult::success(diagnostic.clone(), updated, change.clone(), vec![change])
        }
        Err(reason) => FixResult::failure(
            diagnostic.clone(),
            content,
            format!("{}: {}", target.label, reason),
        ),
    }
}

/// Check that the located declaration is the one the message names
///
/// PHP function and method names are case-insensitive; namespaces and class
/// prefixes in `symbol` are ignored.
pub fn names_match(symbol: &str, declaration_name: &str) -> bool {
    let member = symbol.rsplit("::").next().unwrap_or(symbol);
    let base = member.rsplit('\\').next().unwrap_or(member);
    base.trim_start_matches('$')
        .eq_ignore_ascii_case(declaration_name.trim_start_matches('$'))
}
