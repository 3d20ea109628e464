//! Core transformation engine for userstyle documents.
//!
//! A userstyle ships as CSS with a metadata block describing configurable
//! variables. This crate turns such a document into plain, injectable CSS:
//! variable placeholders are substituted with their defaults, every
//! declaration is promoted to `!important` so it wins over page styles, and
//! the document is validated and repaired along the way.
//!
//! The pipeline has three stages, run in order by [`process`]:
//!
//! 1. **Resolve**: substitute `/*[[name]]*/` placeholders using the
//!    metadata's variable table ([`resolver`]).
//! 2. **Normalize priority**: add `!important` to every declaration, either
//!    by a line-oriented textual rewrite or structurally through the parsed
//!    tree ([`priority`], [`css::validator`]).
//! 3. **Validate and fix**: lint declaration values against known property
//!    grammars and repair under-escaped `regexp()` patterns in
//!    document-matching at-rules ([`css`]).
//!
//! # Examples
//!
//! ```rust
//! use usercast_core::{process, Metadata, PipelineOptions};
//!
//! let out = process("a { color: red; }", &Metadata::default(), &PipelineOptions::default())?;
//! assert_eq!(out.css, "a{color:red !important}");
//! # Ok::<(), usercast_core::PipelineError>(())
//! ```

pub mod css;
mod error;
pub mod metadata;
pub mod pipeline;
pub mod priority;
pub mod resolver;

pub use css::{escape_css_regexp, validate_and_fix, Fixup, ValidateOptions};
pub use error::{PipelineError, ResolveError};
pub use metadata::{Metadata, Variable, VariableOption};
pub use pipeline::{process, PipelineOptions, Processed};
pub use priority::{escalate_textual, ImportantStrategy};
pub use resolver::resolve;
