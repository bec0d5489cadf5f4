pub mod config;
pub mod diagnostic;
pub mod fix_result;

pub use config::{ConfigError, Configuration, StanfixConfig};
pub use diagnostic::Diagnostic;
pub use fix_result::{BatchOutcome, FileFixReport, FixOutcome, FixResult, FixStatistics};
