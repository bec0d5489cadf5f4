//! Fixers: one strategy per PHPStan message family
//!
//! Strategies are registered in a priority-ordered [`Registry`]; each
//! diagnostic is dispatched to the first enabled strategy that claims it.

pub mod common;
pub mod factory;
pub mod param_type;
pub mod property_type;
pub mod registry;
pub mod return_type;
pub mod strategy;
pub mod throws;

pub use factory::{Collaborator, Collaborators, Injected, StrategyDefinition, StrategyFactory};
pub use param_type::MissingParamTypeFixer;
pub use property_type::MissingPropertyTypeFixer;
pub use registry::{Registration, Registry, RegistryError};
pub use return_type::MissingReturnTypeFixer;
pub use strategy::{FixStrategy, FnStrategy};
pub use throws::MissingThrowsFixer;

/// Built-in fixers in registration order
pub fn builtin_strategies(collaborators: &Collaborators) -> Vec<Box<dyn FixStrategy>> {
    let Collaborators { parser, editor } = collaborators.clone();
    vec![
        Box::new(MissingReturnTypeFixer::new(parser.clone(), editor)),
        Box::new(MissingParamTypeFixer::new(parser.clone(), editor)),
        Box::new(MissingPropertyTypeFixer::new(parser.clone(), editor)),
        Box::new(MissingThrowsFixer::new(parser, editor)),
    ]
}
