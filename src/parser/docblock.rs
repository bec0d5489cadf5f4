//! PHPDoc Block Editor
//!
//! Locates, parses and rewrites the `/** ... */` annotation blocks that
//! precede PHP declarations.
//!
//! Every function here is total: malformed input yields `None` or the text
//! unchanged, so callers can treat "cannot parse" as "cannot fix".

use std::collections::BTreeMap;
use std::fmt;

/// Tags understood by the editor, declared in the order `format` emits them
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Param,
    Return,
    Var,
    Throws,
    Property,
    PropertyRead,
    PropertyWrite,
    Method,
    Mixin,
    Pure,
    Impure,
    RequireExtends,
    RequireImplements,
    Sealed,
    /// Any tag outside the known vocabulary, kept as raw passthrough
    Other(String),
}

/// Structural shape of a tag's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    /// `type $name description`
    ParameterLike,
    /// `type description`
    ReturnLike,
    /// No payload
    Flag,
    /// `ClassName description`
    ClassName,
    /// `[static] ReturnType name(args) description`
    MethodSignature,
    Raw,
}

impl Tag {
    /// Resolve a tag name as written after `@`
    pub fn from_name(name: &str) -> Self {
        match name {
            "param" => Self::Param,
            "return" => Self::Return,
            "var" => Self::Var,
            "throws" => Self::Throws,
            "property" => Self::Property,
            "property-read" => Self::PropertyRead,
            "property-write" => Self::PropertyWrite,
            "method" => Self::Method,
            "mixin" => Self::Mixin,
            "phpstan-pure" | "pure" => Self::Pure,
            "phpstan-impure" | "impure" => Self::Impure,
            "phpstan-require-extends" => Self::RequireExtends,
            "phpstan-require-implements" => Self::RequireImplements,
            "phpstan-sealed" => Self::Sealed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical name, without the leading `@`
    pub fn name(&self) -> &str {
        match self {
            Self::Param => "param",
            Self::Return => "return",
            Self::Var => "var",
            Self::Throws => "throws",
            Self::Property => "property",
            Self::PropertyRead => "property-read",
            Self::PropertyWrite => "property-write",
            Self::Method => "method",
            Self::Mixin => "mixin",
            Self::Pure => "phpstan-pure",
            Self::Impure => "phpstan-impure",
            Self::RequireExtends => "phpstan-require-extends",
            Self::RequireImplements => "phpstan-require-implements",
            Self::Sealed => "phpstan-sealed",
            Self::Other(name) => name,
        }
    }

    pub fn family(&self) -> TagFamily {
        match self {
            Self::Param | Self::Var | Self::Property | Self::PropertyRead | Self::PropertyWrite => {
                TagFamily::ParameterLike
            }
            Self::Return | Self::Throws => TagFamily::ReturnLike,
            Self::Pure | Self::Impure => TagFamily::Flag,
            Self::Mixin | Self::RequireExtends | Self::RequireImplements | Self::Sealed => {
                TagFamily::ClassName
            }
            Self::Method => TagFamily::MethodSignature,
            Self::Other(_) => TagFamily::Raw,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// One `@tag ...` entry; which fields are populated depends on the tag family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEntry {
    pub type_expr: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Payload exactly as written after the tag name (continuation lines joined by `\n`)
    pub raw: String,
}

impl TagEntry {
    fn extend(&mut self, text: &str) {
        self.description = Some(match self.description.take() {
            Some(desc) => format!("{} {}", desc, text),
            None => text.to_string(),
        });
        // An empty first line stays empty so `format` writes a bare tag line
        self.raw = format!("{}\n{}", self.raw, text);
    }
}

/// Parsed form of an annotation block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlockData {
    /// Free text lines before the first tag
    pub summary: Vec<String>,
    pub tags: BTreeMap<Tag, Vec<TagEntry>>,
}

impl DocBlockData {
    pub fn entries(&self, tag: &Tag) -> &[TagEntry] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, tag: Tag, entry: TagEntry) {
        self.tags.entry(tag).or_default().push(entry);
    }
}

/// A block located in a file; line bounds are 0-based and inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingClose,
    SeekingOpen,
    Done,
}

/// Find the block that ends on the line directly above `anchor_index`
///
/// Scans upward from `anchor_index - 1`. That line must close a block;
/// continuation lines (`*`-prefixed, or blank) are accepted until the `/**`
/// opener. Any other line aborts the scan.
pub fn extract<S: AsRef<str>>(lines: &[S], anchor_index: usize) -> Option<DocBlock> {
    if anchor_index == 0 || anchor_index > lines.len() {
        return None;
    }

    let end_line = anchor_index - 1;
    let mut state = ScanState::SeekingClose;
    let mut index = end_line;

    loop {
        let trimmed = lines[index].as_ref().trim();
        state = match state {
            ScanState::SeekingClose if trimmed.ends_with("*/") => {
                if trimmed.starts_with("/**") {
                    ScanState::Done
                } else {
                    ScanState::SeekingOpen
                }
            }
            ScanState::SeekingOpen if trimmed.starts_with("/**") => ScanState::Done,
            ScanState::SeekingOpen if trimmed.ends_with("*/") => return None,
            ScanState::SeekingOpen if trimmed.is_empty() || trimmed.starts_with('*') => {
                ScanState::SeekingOpen
            }
            _ => return None,
        };

        if state == ScanState::Done {
            break;
        }
        index = index.checked_sub(1)?;
    }

    let text = lines[index..=end_line]
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    Some(DocBlock {
        text,
        start_line: index,
        end_line,
    })
}

/// Parse a block into its summary and tag entries
///
/// Returns `None` when the text is not delimited by `/**` and `*/`.
pub fn parse(block_text: &str) -> Option<DocBlockData> {
    let trimmed = block_text.trim();
    let inner = trimmed.strip_prefix("/**")?.strip_suffix("*/")?;

    let mut data = DocBlockData::default();
    let mut last_tag: Option<Tag> = None;

    for line in inner.lines() {
        let text = strip_comment_star(line);
        if text.is_empty() {
            continue;
        }

        if let Some((name, value)) = split_tag(text) {
            let tag = Tag::from_name(name);
            let entry = parse_entry(&tag, value);
            data.push(tag.clone(), entry);
            last_tag = Some(tag);
        } else if let Some(entry) = last_tag
            .as_ref()
            .and_then(|tag| data.tags.get_mut(tag))
            .and_then(|entries| entries.last_mut())
        {
            entry.extend(text);
        } else {
            data.summary.push(text.to_string());
        }
    }

    Some(data)
}

/// Check whether a block carries `tag`, optionally for a specific entry name
///
/// Names compare exactly, including the `$` of parameter names.
pub fn has_annotation(block_text: &str, tag: &Tag, name: Option<&str>) -> bool {
    let Some(data) = parse(block_text) else {
        return false;
    };

    let entries = data.entries(tag);
    match name {
        Some(name) => entries
            .iter()
            .any(|entry| entry.name.as_deref() == Some(name)),
        None => !entries.is_empty(),
    }
}

/// Append `@tag value` to a block, or create a new block when there is none
///
/// The new line goes directly before the closing marker; every other line is
/// kept verbatim. This never checks for an existing entry: callers must ask
/// `has_annotation` first.
pub fn add_annotation(block_text: Option<&str>, tag: &Tag, value: &str, indent: &str) -> String {
    let Some(text) = block_text.filter(|text| !text.trim().is_empty()) else {
        return create_docblock(&[(tag.clone(), value.to_string())], indent);
    };

    let new_line = tag_line(tag, value);
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let Some(close_index) = lines
        .iter()
        .rposition(|line| line.trim_end().ends_with("*/"))
    else {
        return text.to_string();
    };

    let block_indent = leading_whitespace(&lines[0]).to_string();
    let close_line = lines[close_index].clone();
    let trimmed = close_line.trim();

    if trimmed.starts_with("/**") {
        // Single-line block: expand before appending
        let inner = trimmed
            .strip_prefix("/**")
            .and_then(|rest| rest.strip_suffix("*/"))
            .unwrap_or_default()
            .trim();
        let mut expanded = vec![format!("{}/**", block_indent)];
        if !inner.is_empty() {
            expanded.push(format!("{} * {}", block_indent, inner));
        }
        expanded.push(format!("{} * {}", block_indent, new_line));
        expanded.push(format!("{} */", block_indent));
        lines.splice(close_index..=close_index, expanded);
    } else {
        let marker = close_line.rfind("*/").unwrap_or(0);
        let before = &close_line[..marker];
        if before.trim().is_empty() {
            lines.insert(close_index, format!("{}* {}", before, new_line));
        } else {
            lines.splice(
                close_index..=close_index,
                [
                    before.trim_end().to_string(),
                    format!("{} * {}", block_indent, new_line),
                    format!("{} */", block_indent),
                ],
            );
        }
    }

    let mut result = lines.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Build a fresh block holding the given tags
pub fn create_docblock(tags: &[(Tag, String)], indent: &str) -> String {
    let mut data = DocBlockData::default();
    for (tag, value) in tags {
        data.push(tag.clone(), parse_entry(tag, value));
    }
    format(&data, indent)
}

/// Serialize parsed data back into a block, tags in canonical order
pub fn format(data: &DocBlockData, indent: &str) -> String {
    let mut out = vec![format!("{}/**", indent)];

    for line in &data.summary {
        out.push(format!("{} * {}", indent, line));
    }
    if !data.summary.is_empty() && !data.tags.is_empty() {
        out.push(format!("{} *", indent));
    }

    for (tag, entries) in &data.tags {
        for entry in entries {
            let mut raw_lines = entry.raw.lines();
            let first = raw_lines.next().unwrap_or_default();
            out.push(format!("{} * {}", indent, tag_line(tag, first)));
            for continuation in raw_lines {
                out.push(format!("{} * {}", indent, continuation));
            }
        }
    }

    out.push(format!("{} */", indent));
    out.join("\n")
}

/// Cloneable handle over the editing functions
///
/// Strategies receive one of these instead of calling the module directly so
/// the factory can inject it like any other collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocBlockEditor;

impl DocBlockEditor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S], anchor_index: usize) -> Option<DocBlock> {
        extract(lines, anchor_index)
    }

    pub fn parse(&self, block_text: &str) -> Option<DocBlockData> {
        parse(block_text)
    }

    pub fn has_annotation(&self, block_text: &str, tag: &Tag, name: Option<&str>) -> bool {
        has_annotation(block_text, tag, name)
    }

    pub fn add_annotation(
        &self,
        block_text: Option<&str>,
        tag: &Tag,
        value: &str,
        indent: &str,
    ) -> String {
        add_annotation(block_text, tag, value, indent)
    }
}

fn tag_line(tag: &Tag, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        format!("@{}", tag.name())
    } else {
        format!("@{} {}", tag.name(), value)
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

fn strip_comment_star(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix('*').unwrap_or(trimmed).trim()
}

/// Split `@name rest` into its tag name and payload
fn split_tag(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('@')?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() {
        return None;
    }
    Some((name, rest[end..].trim()))
}

fn parse_entry(tag: &Tag, value: &str) -> TagEntry {
    let value = value.trim();
    let mut entry = TagEntry {
        raw: value.to_string(),
        ..TagEntry::default()
    };

    match tag.family() {
        TagFamily::ParameterLike => {
            let (first, rest) = split_type(value);
            if is_variable(first) {
                entry.name = non_empty(normalize_variable(first));
                entry.description = non_empty(rest);
            } else {
                entry.type_expr = non_empty(first);
                let (second, description) = split_word(rest);
                if is_variable(second) {
                    entry.name = non_empty(normalize_variable(second));
                    entry.description = non_empty(description);
                } else {
                    entry.description = non_empty(rest);
                }
            }
        }
        TagFamily::ReturnLike => {
            let (type_expr, description) = split_type(value);
            entry.type_expr = non_empty(type_expr);
            entry.description = non_empty(description);
        }
        TagFamily::ClassName => {
            let (name, description) = split_type(value);
            entry.name = non_empty(name);
            entry.description = non_empty(description);
        }
        TagFamily::MethodSignature => parse_method_signature(value, &mut entry),
        TagFamily::Flag | TagFamily::Raw => {}
    }

    entry
}

fn parse_method_signature(value: &str, entry: &mut TagEntry) {
    let signature = value.strip_prefix("static ").unwrap_or(value).trim_start();
    let Some(open) = signature.find('(') else {
        entry.name = non_empty(signature);
        return;
    };

    let head = signature[..open].trim();
    match head.rfind(char::is_whitespace) {
        Some(split) => {
            entry.type_expr = non_empty(head[..split].trim());
            entry.name = non_empty(head[split..].trim());
        }
        None => entry.name = non_empty(head),
    }

    let mut depth = 0usize;
    for (offset, ch) in signature[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    entry.description = non_empty(signature[open + offset + 1..].trim());
                    return;
                }
            }
            _ => {}
        }
    }
}

/// Read one type expression, keeping bracketed parts (`array<int, string>`)
/// and union/intersection operators together
fn split_type(value: &str) -> (&str, &str) {
    let mut depth = 0i32;
    let mut last_significant = None;
    let mut chars = value.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                let continues_after = value[index..].trim_start().starts_with(['|', '&']);
                let continues_before = matches!(last_significant, Some('|' | '&' | ',' | ':'));
                if !continues_after && !continues_before {
                    return (value[..index].trim_end(), value[index..].trim());
                }
            }
            _ => {}
        }
        if !ch.is_whitespace() {
            last_significant = Some(ch);
        }
    }

    (value, "")
}

fn split_word(value: &str) -> (&str, &str) {
    match value.find(char::is_whitespace) {
        Some(index) => (&value[..index], value[index..].trim()),
        None => (value, ""),
    }
}

fn is_variable(token: &str) -> bool {
    normalize_variable(token).starts_with('$')
}

/// `...$args` and `&$ref` are named `$args` and `$ref`
fn normalize_variable(token: &str) -> &str {
    token.trim_start_matches("...").trim_start_matches('&')
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_annotation_before_closing_marker() {
        let block = "/**\n * @param string $name\n */";
        let updated = add_annotation(Some(block), &Tag::Return, "void", "");

        assert_eq!(updated, "/**\n * @param string $name\n * @return void\n */");
        assert_eq!(updated.matches("*/").count(), 1);
        let param = updated.find("@param").unwrap();
        let ret = updated.find("@return").unwrap();
        assert!(param < ret);
    }

    #[test]
    fn test_add_annotation_creates_block_when_missing() {
        let created = add_annotation(None, &Tag::Return, "mixed", "    ");
        assert_eq!(created, "    /**\n     * @return mixed\n     */");

        let from_blank = add_annotation(Some("   "), &Tag::Pure, "", "");
        assert_eq!(from_blank, "/**\n * @phpstan-pure\n */");
    }

    #[test]
    fn test_add_annotation_keeps_indented_style() {
        let block = "    /**\n     * Does things.\n     */";
        let updated = add_annotation(Some(block), &Tag::Param, "int $id", "    ");
        assert_eq!(
            updated,
            "    /**\n     * Does things.\n     * @param int $id\n     */"
        );
    }

    #[test]
    fn test_add_annotation_expands_single_line_block() {
        let updated = add_annotation(Some("    /** @var int */"), &Tag::Var, "string", "    ");
        assert_eq!(
            updated,
            "    /**\n     * @var int\n     * @var string\n     */"
        );
    }

    #[test]
    fn test_add_annotation_splits_content_on_closing_line() {
        let block = "/**\n * Summary */";
        let updated = add_annotation(Some(block), &Tag::Return, "void", "");
        assert_eq!(updated, "/**\n * Summary\n * @return void\n */");
    }

    #[test]
    fn test_add_annotation_never_deduplicates() {
        let block = "/**\n * @return void\n */";
        let updated = add_annotation(Some(block), &Tag::Return, "void", "");
        assert_eq!(updated.matches("@return void").count(), 2);
    }

    #[test]
    fn test_add_annotation_unterminated_block_unchanged() {
        let block = "/**\n * @return void";
        assert_eq!(add_annotation(Some(block), &Tag::Var, "int", ""), block);
    }

    #[test]
    fn test_extract_multiline_block() {
        let lines = vec![
            "<?php",
            "",
            "/**",
            " * Greets.",
            " *",
            " * @param string $name",
            " */",
            "function greet($name) {}",
        ];
        let block = extract(&lines, 7).unwrap();
        assert_eq!(block.start_line, 2);
        assert_eq!(block.end_line, 6);
        assert!(block.text.starts_with("/**"));
        assert!(block.text.ends_with(" */"));
    }

    #[test]
    fn test_extract_single_line_block() {
        let lines = vec!["class A {", "    /** @var int */", "    public $id;", "}"];
        let block = extract(&lines, 2).unwrap();
        assert_eq!(block.start_line, 1);
        assert_eq!(block.end_line, 1);
        assert_eq!(block.text, "    /** @var int */");
    }

    #[test]
    fn test_extract_requires_block_directly_above() {
        let lines = vec!["/**", " * @return void", " */", "", "function f() {}"];
        assert!(extract(&lines, 4).is_none());
        assert!(extract(&lines, 3).is_some());
    }

    #[test]
    fn test_extract_aborts_on_code_line() {
        let lines = vec!["$x = 1;", " * stray", " */", "function f() {}"];
        assert!(extract(&lines, 3).is_none());
    }

    #[test]
    fn test_extract_rejects_plain_comment_and_bounds() {
        let lines = vec!["/* not a doc */", "function f() {}"];
        assert!(extract(&lines, 1).is_none());
        assert!(extract(&lines, 0).is_none());
        assert!(extract(&lines, 5).is_none());
    }

    #[test]
    fn test_parse_tag_families() {
        let block = r#"/**
 * Summary line.
 *
 * @param array<int, string> $items The items
 * @param ...$rest
 * @return static|null
 * @throws \RuntimeException when it fails
 * @method static Builder where(string $col, mixed $value) Filter rows
 * @mixin \Illuminate\Database\Query\Builder
 * @phpstan-pure
 * @phpstan-sealed Circle|Square
 * @custom-tag anything goes
 */"#;
        let data = parse(block).unwrap();

        assert_eq!(data.summary, vec!["Summary line."]);

        let params = data.entries(&Tag::Param);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].type_expr.as_deref(), Some("array<int, string>"));
        assert_eq!(params[0].name.as_deref(), Some("$items"));
        assert_eq!(params[0].description.as_deref(), Some("The items"));
        assert_eq!(params[1].type_expr, None);
        assert_eq!(params[1].name.as_deref(), Some("$rest"));

        let ret = &data.entries(&Tag::Return)[0];
        assert_eq!(ret.type_expr.as_deref(), Some("static|null"));
        assert_eq!(ret.description, None);

        let throws = &data.entries(&Tag::Throws)[0];
        assert_eq!(throws.type_expr.as_deref(), Some("\\RuntimeException"));
        assert_eq!(throws.description.as_deref(), Some("when it fails"));

        let method = &data.entries(&Tag::Method)[0];
        assert_eq!(method.type_expr.as_deref(), Some("Builder"));
        assert_eq!(method.name.as_deref(), Some("where"));
        assert_eq!(method.description.as_deref(), Some("Filter rows"));

        let mixin = &data.entries(&Tag::Mixin)[0];
        assert_eq!(
            mixin.name.as_deref(),
            Some("\\Illuminate\\Database\\Query\\Builder")
        );

        assert_eq!(data.entries(&Tag::Pure).len(), 1);
        assert_eq!(
            data.entries(&Tag::Sealed)[0].name.as_deref(),
            Some("Circle|Square")
        );

        let other = &data.entries(&Tag::Other("custom-tag".to_string()))[0];
        assert_eq!(other.raw, "anything goes");
        assert_eq!(other.type_expr, None);
    }

    #[test]
    fn test_parse_union_with_spaces_and_continuation() {
        let block = "/**\n * @var int | string $value first\n *      second line\n */";
        let data = parse(block).unwrap();
        let var = &data.entries(&Tag::Var)[0];
        assert_eq!(var.type_expr.as_deref(), Some("int | string"));
        assert_eq!(var.name.as_deref(), Some("$value"));
        assert_eq!(var.description.as_deref(), Some("first second line"));
    }

    #[test]
    fn test_parse_rejects_non_block() {
        assert!(parse("// @return void").is_none());
        assert!(parse("/** @return void").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_parse_aliases_purity_flags() {
        let data = parse("/** @pure */").unwrap();
        assert_eq!(data.entries(&Tag::Pure).len(), 1);
        let data = parse("/**\n * @impure\n */").unwrap();
        assert_eq!(data.entries(&Tag::Impure).len(), 1);
    }

    #[test]
    fn test_has_annotation_scoped_by_name() {
        let block = "/**\n * @param int $id\n * @param string $name\n */";
        assert!(has_annotation(block, &Tag::Param, None));
        assert!(has_annotation(block, &Tag::Param, Some("$id")));
        assert!(!has_annotation(block, &Tag::Param, Some("$email")));
        assert!(!has_annotation(block, &Tag::Param, Some("id")));
        assert!(!has_annotation(block, &Tag::Return, None));
        assert!(!has_annotation("garbage", &Tag::Param, None));
    }

    #[test]
    fn test_format_round_trip() {
        let block = r#"/**
 * Loads a user.
 * @throws NotFound
 * @param callable(int): void $cb Callback
 *   called once
 * @return User|null
 * @see Other
 * @phpstan-require-extends Model
 */"#;
        let parsed = parse(block).unwrap();
        let formatted = format(&parsed, "  ");
        let reparsed = parse(&formatted).unwrap();
        assert_eq!(parsed, reparsed);

        // Continuation under a tag with no payload on its own line
        for block in [
            "/**\n * @return\n *   int the value\n */",
            "/**\n * @phpstan-pure\n *   no side effects\n */",
        ] {
            let parsed = parse(block).unwrap();
            let reparsed = parse(&format(&parsed, "")).unwrap();
            assert_eq!(parsed, reparsed, "{}", block);
        }

        // Canonical order puts @param before @return before @throws
        let param = formatted.find("@param").unwrap();
        let ret = formatted.find("@return").unwrap();
        let throws = formatted.find("@throws").unwrap();
        let see = formatted.find("@see").unwrap();
        assert!(param < ret && ret < throws && throws < see);
    }

    #[test]
    fn test_create_docblock_orders_tags() {
        let block = create_docblock(
            &[
                (Tag::Return, "void".to_string()),
                (Tag::Param, "int $id".to_string()),
            ],
            "",
        );
        assert_eq!(block, "/**\n * @param int $id\n * @return void\n */");
    }

    #[test]
    fn test_editor_handle_delegates() {
        let editor = DocBlockEditor::new();
        let block = editor.add_annotation(None, &Tag::Var, "int", "");
        assert!(editor.has_annotation(&block, &Tag::Var, None));
        assert_eq!(editor.parse(&block).unwrap().entries(&Tag::Var).len(), 1);
    }
}
