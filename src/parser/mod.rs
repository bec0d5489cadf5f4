pub mod docblock;
pub mod locator;
pub mod php;
pub mod phpstan;
pub mod tree;

pub use docblock::{DocBlock, DocBlockData, DocBlockEditor, Tag, TagEntry};
pub use locator::{locate, locate_class, locate_enclosing, locate_property, Located};
pub use php::PhpParser;
pub use phpstan::{load_report, parse_report};
pub use tree::{ClassNode, Declaration, DeclarationKind, SourceParser, SourceTree};
