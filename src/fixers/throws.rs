use super::common::{annotate, Target};
use super::strategy::FixStrategy;
use crate::models::{Diagnostic, FixResult};
use crate::parser::locator::{locate, locate_enclosing, BODY_WINDOW};
use crate::parser::{DocBlockEditor, SourceParser, Tag};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Method|Function) (?P<symbol>\S+)\(\) throws checked exception (?P<exception>\S+) but it's missing from the PHPDoc @throws tag\.$",
    )
    .unwrap()
});

/// Adds `@throws` for checked exceptions missing from a PHPDoc
///
/// PHPStan points at the throw site, so the declaration is the one whose body
/// spans the line, or failing that one starting within the body window.
pub struct MissingThrowsFixer {
    parser: Arc<dyn SourceParser>,
    editor: DocBlockEditor,
}

impl MissingThrowsFixer {
    pub const NAME: &'static str = "missing_throws";

    pub fn new(parser: Arc<dyn SourceParser>, editor: DocBlockEditor) -> Self {
        Self { parser, editor }
    }
}

/// Fully qualify namespaced class names for use inside a PHPDoc
fn qualify(exception: &str) -> String {
    if exception.contains('\\') && !exception.starts_with('\\') {
        format!("\\{}", exception)
    } else {
        exception.to_string()
    }
}

/// True when the block already lists `exception` under `@throws`
fn documents_exception(editor: &DocBlockEditor, block: &str, exception: &str) -> bool {
    let wanted = exception.trim_start_matches('\\');
    let short = wanted.rsplit('\\').next().unwrap_or(wanted);

    editor
        .parse(block)
        .map(|data| {
            data.entries(&Tag::Throws).iter().any(|entry| {
                entry.type_expr.as_deref().is_some_and(|types| {
                    types.split('|').any(|t| {
                        let t = t.trim().trim_start_matches('\\');
                        t == wanted || t == short
                    })
                })
            })
        })
        .unwrap_or(false)
}

impl FixStrategy for MissingThrowsFixer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Adds @throws for checked exceptions missing from the PHPDoc"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        MESSAGE_RE.is_match(&diagnostic.message)
    }

    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult {
        let Some(exception) = diagnostic.capture(&MESSAGE_RE, "exception") else {
            return FixResult::failure(diagnostic.clone(), content, "No exception name in message");
        };
        let exception = qualify(exception);

        let Some(tree) = self.parser.parse(content) else {
            return FixResult::failure(diagnostic.clone(), content, "Could not parse file");
        };

        let Some(located) = locate_enclosing(&tree, diagnostic.line)
            .or_else(|| locate(&tree, diagnostic.line, BODY_WINDOW))
        else {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!("No function or method encloses line {}", diagnostic.line),
            );
        };

        annotate(
            &self.editor,
            diagnostic,
            content,
            Target::from(located),
            Tag::Throws,
            &exception,
            |block| documents_exception(&self.editor, block, &exception),
        )
    }
}
