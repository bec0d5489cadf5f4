use super::common::{annotate, names_match, Target};
use super::strategy::FixStrategy;
use crate::models::{Diagnostic, FixResult};
use crate::parser::locator::{locate, EXACT};
use crate::parser::{DocBlockEditor, SourceParser, Tag};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Method|Function) (?P<symbol>\S+)\(\) has no return type specified\.$")
        .unwrap()
});

/// Adds `@return mixed` to functions and methods PHPStan reports as untyped
pub struct MissingReturnTypeFixer {
    parser: Arc<dyn SourceParser>,
    editor: DocBlockEditor,
}

impl MissingReturnTypeFixer {
    pub const NAME: &'static str = "missing_return_type";

    pub fn new(parser: Arc<dyn SourceParser>, editor: DocBlockEditor) -> Self {
        Self { parser, editor }
    }
}

impl FixStrategy for MissingReturnTypeFixer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Adds @return mixed to functions and methods without a return type"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        MESSAGE_RE.is_match(&diagnostic.message)
    }

    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult {
        let symbol = diagnostic.capture(&MESSAGE_RE, "symbol").unwrap_or_default();

        let Some(tree) = self.parser.parse(content) else {
            return FixResult::failure(diagnostic.clone(), content, "Could not parse file");
        };

        let Some(located) = locate(&tree, diagnostic.line, EXACT) else {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!("No function or method declared at line {}", diagnostic.line),
            );
        };

        if !names_match(symbol, &located.declaration.name) {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!(
                    "Declaration at line {} is {}, expected {}",
                    diagnostic.line,
                    located.qualified_name(),
                    symbol
                ),
            );
        }

        annotate(
            &self.editor,
            diagnostic,
            content,
            Target::from(located),
            Tag::Return,
            "mixed",
            |block| self.editor.has_annotation(block, &Tag::Return, None),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixOutcome;
    use crate::parser::PhpParser;

    fn fixer() -> MissingReturnTypeFixer {
        MissingReturnTypeFixer::new(Arc::new(PhpParser::new()), DocBlockEditor::new())
    }

    #[test]
    fn test_can_fix() {
        let fixer = fixer();
        assert!(fixer.can_fix(&Diagnostic::new(
            "a.php",
            3,
            "Method App\\Foo::bar() has no return type specified."
        )));
        assert!(fixer.can_fix(&Diagnostic::new(
            "a.php",
            3,
            "Function helper() has no return type specified."
        )));
        assert!(!fixer.can_fix(&Diagnostic::new(
            "a.php",
            3,
            "Method App\\Foo::bar() has parameter $x with no type specified."
        )));
    }

    #[test]
    fn test_adds_return_tag() {
        let content = "<?php\n\nfunction helper()\n{\n}\n";
        let diagnostic = Diagnostic::new("a.php", 3, "Function helper() has no return type specified.");
        let result = fixer().fix(&diagnostic, content);

        assert_eq!(result.outcome, FixOutcome::Success);
        assert_eq!(
            result.content,
            "<?php\n\n/**\n * @return mixed\n */\nfunction helper()\n{\n}\n"
        );
        assert_eq!(result.changes, vec!["Added @return mixed to helper"]);
    }

    #[test]
    fn test_existing_return_is_not_duplicated() {
        let content = "<?php\n\n/**\n * @return int\n */\nfunction helper()\n{\n}\n";
        let diagnostic = Diagnostic::new("a.php", 6, "Function helper() has no return type specified.");
        let result = fixer().fix(&diagnostic, content);

        assert_eq!(result.outcome, FixOutcome::Failure);
        assert_eq!(result.content, content);
    }

    #[test]
    fn test_wrong_line_fails() {
        let content = "<?php\n\nfunction helper()\n{\n}\n";
        let diagnostic = Diagnostic::new("a.php", 4, "Function helper() has no return type specified.");
        let result = fixer().fix(&diagnostic, content);
        assert_eq!(result.outcome, FixOutcome::Failure);
        assert!(result.description.contains("line 4"));
    }

    #[test]
    fn test_name_mismatch_fails() {
        let content = "<?php\n\nfunction helper()\n{\n}\n";
        let diagnostic = Diagnostic::new("a.php", 3, "Function other() has no return type specified.");
        let result = fixer().fix(&diagnostic, content);
        assert_eq!(result.outcome, FixOutcome::Failure);
        assert_eq!(result.content, content);
    }
}
