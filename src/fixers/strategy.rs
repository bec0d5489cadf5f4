use crate::models::{Diagnostic, FixResult};

/// Common interface for all fixers
///
/// Each fixer recognizes one family of PHPStan messages and remediates it by
/// editing a PHPDoc block.
pub trait FixStrategy: Send + Sync {
    /// Stable identifier used in configuration
    fn name(&self) -> &str;

    /// One-line summary for `stanfix fixers`
    fn description(&self) -> &str;

    /// Higher priorities are tried first
    fn priority(&self) -> i32 {
        0
    }

    /// Check if this fixer handles the diagnostic
    ///
    /// Must depend only on the diagnostic, never on file content.
    fn can_fix(&self, diagnostic: &Diagnostic) -> bool;

    /// Attempt the fix against `content`
    ///
    /// Never panics or errors: anything that prevents a fix is returned as a
    /// failed `FixResult` carrying `content` unchanged.
    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult;
}

type Predicate = Box<dyn Fn(&Diagnostic) -> bool + Send + Sync>;
type Handler = Box<dyn Fn(&Diagnostic, &str) -> FixResult + Send + Sync>;

/// Fixer built from a predicate and a handler closure
pub struct FnStrategy {
    name: String,
    description: String,
    priority: i32,
    predicate: Predicate,
    handler: Handler,
}

impl FnStrategy {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&Diagnostic) -> bool + Send + Sync + 'static,
        handler: impl Fn(&Diagnostic, &str) -> FixResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority: 0,
            predicate: Box::new(predicate),
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl FixStrategy for FnStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        (self.predicate)(diagnostic)
    }

    fn fix(&self, diagnostic: &Diagnostic, content: &str) -> FixResult {
        (self.handler)(diagnostic, content)
    }
}

impl std::fmt::Debug for FnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStrategy")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
