//! The per-document transformation pipeline.
//!
//! Resolver → priority normalizer → validator/fixer, in that order, with no
//! feedback loop. Everything here is pure and synchronous; a batch driver
//! can run any number of documents in parallel without coordination.

use tracing::debug;

use crate::css::{validate_and_fix, ValidateOptions};
use crate::error::PipelineError;
use crate::metadata::Metadata;
use crate::priority::{escalate_textual, ImportantStrategy};
use crate::resolver::resolve;

/// Configuration for [`process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// How declarations are promoted to `!important`.
    pub strategy: ImportantStrategy,
}

/// A successfully transformed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// The final CSS text.
    pub css: String,
    /// Informational diagnostics collected along the way.
    pub warnings: Vec<String>,
}

/// Runs the whole pipeline over one document.
///
/// # Errors
///
/// [`PipelineError::Resolve`] when variable resolution fails (fatal for the
/// document); [`PipelineError::Validation`] when the CSS has syntax or value
/// errors, carrying the diagnostics and the untransformed text so the caller
/// can decide whether to continue.
pub fn process(
    raw: &str,
    metadata: &Metadata,
    options: &PipelineOptions,
) -> Result<Processed, PipelineError> {
    let resolved = resolve(raw, metadata)?;
    debug!(bytes = resolved.len(), "variables resolved");

    let (css, escalate_importance) = match options.strategy {
        ImportantStrategy::Textual => (escalate_textual(&resolved), false),
        ImportantStrategy::Structural => (resolved, true),
    };

    let fixup = validate_and_fix(&css, &ValidateOptions { escalate_importance });
    if !fixup.errors.is_empty() {
        return Err(PipelineError::Validation {
            errors: fixup.errors,
            css: fixup.transformed,
        });
    }
    Ok(Processed {
        css: fixup.transformed,
        warnings: fixup.warnings,
    })
}
