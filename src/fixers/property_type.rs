use super::common::{annotate, names_match, Target};
use super::strategy::FixStrategy;
use crate::models::{Diagnostic, FixResult};
use crate::parser::locator::{locate_property, EXACT};
use crate::parser::{DocBlockEditor, SourceParser, Tag};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Property (?P<class>[^\s:]+)::\$(?P<property>\w+) has no type specified\.$")
        .unwrap()
});

/// Adds `@var mixed` to class properties PHPStan reports as untyped
pub struct MissingPropertyTypeFixer {
    parser: Arc<dyn SourceParser>,
    editor: DocBlockEditor,
}

impl MissingPropertyTypeFixer {
    pub const NAME: &'static str = "missing_property_type";

    pub fn new(parser: Arc<dyn SourceParser>, editor: DocBlockEditor) -> Self {
        Self { parser, editor }
    }
}

impl FixStrategy for MissingPropertyTypeFixer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Adds @var mixed to properties without a type"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        MESSAGE_RE.is_match(&diagnostic.message)
    }

    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult {
        let property = diagnostic
            .capture(&MESSAGE_RE, "property")
            .unwrap_or_default();

        let Some(tree) = self.parser.parse(content) else {
            return FixResult::failure(diagnostic.clone(), content, "Could not parse file");
        };

        let Some(located) = locate_property(&tree, diagnostic.line, EXACT)
            .filter(|located| names_match(property, &located.declaration.name))
        else {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!("Could not find property ${} at line {}", property, diagnostic.line),
            );
        };

        // `public $a, $b;` shares one block, so a @var there would type both
        let shared = located
            .enclosing_class
            .map(|class| {
                class
                    .properties
                    .iter()
                    .filter(|p| p.start_line == located.declaration_line)
                    .count()
                    > 1
            })
            .unwrap_or(false);
        if shared {
            return FixResult::failure(
                diagnostic.clone(),
                content,
                format!("${} shares its declaration with other properties", property),
            );
        }

        let class = located.enclosing_class.map(|c| c.name()).unwrap_or("?");
        let target = Target::new(located.declaration_line, format!("{}::${}", class, property));

        annotate(
            &self.editor,
            diagnostic,
            content,
            target,
            Tag::Var,
            "mixed",
            |block| self.editor.has_annotation(block, &Tag::Var, None),
        )
    }
}
