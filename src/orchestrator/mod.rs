pub mod batch;

pub use batch::{BatchFixer, ProgressCallback};
