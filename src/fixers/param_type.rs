use super::common::{annotate, names_match, Target};
use super::strategy::FixStrategy;
use crate::models::{Diagnostic, FixResult};
use crate::parser::locator::{locate, EXACT};
use crate::parser::{DocBlockEditor, SourceParser, Tag};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Method|Function) (?P<symbol>\S+)\(\) has parameter \$(?P<param>\w+) with no type specified\.$",
    )
    .unwrap()
});

/// Adds `@param mixed $name` for parameters PHPStan reports as untyped
pub struct MissingParamTypeFixer {
    parser: Arc<dyn SourceParser>,
    editor: DocBlockEditor,
}

impl MissingParamTypeFixer {
    pub const NAME: &'static str = "missing_param_type";

    pub fn new(parser: Arc<dyn SourceParser>, editor: DocBlockEditor) -> Self {
        Self { parser, editor }
    }
}

impl FixStrategy for MissingParamTypeFixer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Adds @param mixed $name for parameters without a type"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        MESSAGE_RE.is_match(&diagnostic.message)
    }

    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult {
        let symbol = diagnostic.capture(&MESSAGE_RE, "symbol").unwrap_or_default();
        let Some(param) = diagnostic.capture(&MESSAGE_RE, "param") else {
            return FixResult::failure(diagnostic.clone(), content, "No parameter name in message");
        };
        let variable = format!("${}", param);

        let Some(tree) = self.parser.parse(content) else {
            return FixResult::failure(diagnostic.clone(), content, "Could not parse file");
        };

        let Some(located) = locate(&tree, diagnostic.line, EXACT)
            .filter(|located| names_match(symbol, &located.declaration.name))
        else {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!("Could not find {}() at line {}", symbol, diagnostic.line),
            );
        };

        annotate(
            &self.editor,
            diagnostic,
            content,
            Target::from(located),
            Tag::Param,
            &format!("mixed {}", variable),
            |block| {
                self.editor
                    .has_annotation(block, &Tag::Param, Some(variable.as_str()))
            },
        )
    }
}
