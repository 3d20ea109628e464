//! CSS structural parsing, validation and fix-up.
//!
//! The submodules cooperate around one mutable tree per document:
//!
//! - [`ast`]: the tree itself, with positions and raw source text.
//! - [`parser`]: `cssparser`-based builder with error accumulation.
//! - [`properties`]: declaration value checks against known grammars.
//! - [`escape`]: `regexp()` backslash repair.
//! - [`serializer`]: compact re-emission of the (possibly mutated) tree.
//! - [`validator`]: the orchestrating walk, exposed as [`validate_and_fix`].
//!
//! The tree is built fresh per document, mutated in place, serialized and
//! discarded; nothing is shared across documents.

pub mod ast;
pub mod escape;
pub mod parser;
pub mod properties;
pub mod serializer;
pub mod validator;

pub use escape::escape_css_regexp;
pub use validator::{validate_and_fix, Fixup, ValidateOptions};
