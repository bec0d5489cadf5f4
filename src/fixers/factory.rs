use super::registry::RegistryError;
use super::strategy::FixStrategy;
use crate::parser::{DocBlockEditor, PhpParser, SourceParser};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Shared services handed to fixers at construction
#[derive(Clone)]
pub struct Collaborators {
    pub parser: Arc<dyn SourceParser>,
    pub editor: DocBlockEditor,
}

impl Collaborators {
    pub fn new(parser: Arc<dyn SourceParser>, editor: DocBlockEditor) -> Self {
        Self { parser, editor }
    }

    /// tree-sitter PHP parser with the default editor
    pub fn php() -> Self {
        Self::new(Arc::new(PhpParser::new()), DocBlockEditor::new())
    }
}

/// A constructor parameter a custom fixer asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collaborator {
    Parser,
    Editor,
    /// Anything outside the known set; always resolves to nothing
    Other(String),
}

impl From<&str> for Collaborator {
    fn from(name: &str) -> Self {
        match name {
            "parser" => Collaborator::Parser,
            "editor" => Collaborator::Editor,
            other => Collaborator::Other(other.to_string()),
        }
    }
}

/// Resolved constructor arguments
///
/// Only requested collaborators are filled in. Unknown requests are listed
/// in `unresolved` so the builder can decide whether it can do without them.
#[derive(Default)]
pub struct Injected {
    pub parser: Option<Arc<dyn SourceParser>>,
    pub editor: Option<DocBlockEditor>,
    pub unresolved: Vec<String>,
}

type Builder = Arc<dyn Fn(Injected) -> Result<Box<dyn FixStrategy>, String> + Send + Sync>;

/// How to build one custom fixer
#[derive(Clone)]
pub struct StrategyDefinition {
    pub name: String,
    pub params: Vec<Collaborator>,
    build: Builder,
}

impl StrategyDefinition {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Collaborator>,
        build: impl Fn(Injected) -> Result<Box<dyn FixStrategy>, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            build: Arc::new(build),
        }
    }
}

/// Catalogue of custom fixers that configuration may name
///
/// Custom fixers are defined up front; configuration selects them by name and
/// the factory injects whichever collaborators each one declares.
#[derive(Default, Clone)]
pub struct StrategyFactory {
    definitions: HashMap<String, StrategyDefinition>,
}

impl StrategyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn define(&mut self, definition: StrategyDefinition) -> &mut Self {
        self.definitions.insert(definition.name.clone(), definition);
        self
    }

    /// Build the named fixer, injecting requested collaborators
    ///
    /// # Errors
    /// `UnknownStrategy` when nothing is defined under `name`;
    /// `NonConforming` when the builder fails or yields a fixer whose name
    /// differs from the definition.
    pub fn create(
        &self,
        name: &str,
        collaborators: &Collaborators,
    ) -> Result<Box<dyn FixStrategy>, RegistryError> {
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| RegistryError::UnknownStrategy(name.to_string()))?;

        let injected = resolve(&definition.params, collaborators);
        if !injected.unresolved.is_empty() {
            debug!(
                "{}: no collaborator for {}",
                name,
                injected.unresolved.join(", ")
            );
        }

        let strategy = (definition.build)(injected).map_err(|reason| {
            RegistryError::NonConforming {
                name: name.to_string(),
                reason,
            }
        })?;

        if strategy.name().is_empty() {
            return Err(RegistryError::NonConforming {
                name: name.to_string(),
                reason: "fixer name is empty".to_string(),
            });
        }
        if strategy.name() != name {
            return Err(RegistryError::NonConforming {
                name: name.to_string(),
                reason: format!("fixer reports its name as '{}'", strategy.name()),
            });
        }

        Ok(strategy)
    }
}

fn resolve(params: &[Collaborator], collaborators: &Collaborators) -> Injected {
    let mut injected = Injected::default();
    for param in params {
        match param {
            Collaborator::Parser => injected.parser = Some(Arc::clone(&collaborators.parser)),
            Collaborator::Editor => injected.editor = Some(collaborators.editor),
            Collaborator::Other(name) => injected.unresolved.push(name.clone()),
        }
    }
    injected
}
