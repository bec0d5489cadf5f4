//! Priority-ordered fixer table and dispatch

use super::factory::{Collaborators, StrategyFactory};
use super::strategy::FixStrategy;
use crate::models::{Configuration, Diagnostic, FixResult};
use std::cmp::Reverse;
use tracing::debug;

/// Errors raised while building the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown custom fixer: '{0}'. It must be defined in the strategy factory before it can be named in configuration")]
    UnknownStrategy(String),

    #[error("Custom fixer '{name}' does not satisfy the fixer contract: {reason}")]
    NonConforming { name: String, reason: String },

    #[error("Fixer '{0}' is registered more than once")]
    Duplicate(String),
}

/// A fixer with its effective priority and enabled state
pub struct Registration {
    pub strategy: Box<dyn FixStrategy>,
    pub priority: i32,
    pub enabled: bool,
}

impl Registration {
    pub fn name(&self) -> &str {
        self.strategy.name()
    }
}

/// Fixers in dispatch order: descending priority, then registration order
#[derive(Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in fixers, then every custom fixer named in
    /// configuration, applying priority overrides and enable/disable lists
    pub fn from_config(
        config: &Configuration,
        collaborators: &Collaborators,
        factory: &StrategyFactory,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for strategy in super::builtin_strategies(collaborators) {
            registry.register_configured(strategy, config)?;
        }

        for name in config.custom_strategy_names() {
            let strategy = factory.create(name, collaborators)?;
            registry.register_configured(strategy, config)?;
        }

        debug!(
            "Registry built with {} fixers ({} enabled)",
            registry.len(),
            registry.enabled().count()
        );
        Ok(registry)
    }

    fn register_configured(
        &mut self,
        strategy: Box<dyn FixStrategy>,
        config: &Configuration,
    ) -> Result<(), RegistryError> {
        let name = strategy.name().to_string();
        self.register_with(strategy, config.priority_for(&name), config.is_enabled(&name))
    }

    /// Register with the fixer's own priority, enabled
    pub fn register(&mut self, strategy: Box<dyn FixStrategy>) -> Result<(), RegistryError> {
        self.register_with(strategy, None, true)
    }

    /// Register with an optional priority override
    pub fn register_with(
        &mut self,
        strategy: Box<dyn FixStrategy>,
        priority: Option<i32>,
        enabled: bool,
    ) -> Result<(), RegistryError> {
        if self.get(strategy.name()).is_some() {
            return Err(RegistryError::Duplicate(strategy.name().to_string()));
        }

        let priority = priority.unwrap_or_else(|| strategy.priority());
        self.registrations.push(Registration {
            strategy,
            priority,
            enabled,
        });
        // Stable sort keeps registration order among equal priorities
        self.registrations.sort_by_key(|r| Reverse(r.priority));
        Ok(())
    }

    /// Hand the diagnostic to the first enabled fixer that claims it
    ///
    /// The claiming fixer's result is final, success or failure; later
    /// fixers are never consulted. `None` means no fixer claimed it.
    pub fn dispatch(&self, diagnostic: &Diagnostic, content: &str) -> Option<FixResult> {
        let registration = self
            .enabled()
            .find(|r| r.strategy.can_fix(diagnostic))?;

        debug!(
            "{} claimed {}:{}",
            registration.name(),
            diagnostic.file.display(),
            diagnostic.line
        );
        Some(registration.strategy.fix(diagnostic, content))
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.name() == name)
    }

    /// All registrations in dispatch order
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter().filter(|r| r.enabled)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
