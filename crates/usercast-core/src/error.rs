//! Error types for the userstyle pipeline.
//!
//! [`ResolveError`] covers the fatal per-document failures of variable
//! resolution; [`PipelineError`] is the top-level error returned by
//! [`process`](crate::pipeline::process), wrapping resolution failures and
//! validation failures alike.

use std::fmt;

/// Error from variable resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The metadata declares a preprocessor this crate does not support.
    UnsupportedPreprocessor(String),

    /// A select-style variable's default names no option in its list.
    /// This is a defect in the source metadata, not a recoverable condition.
    NoMatchingOption { variable: String, default: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnsupportedPreprocessor(name) => {
                write!(f, "unsupported preprocessor: {}", name)
            }
            ResolveError::NoMatchingOption { variable, default } => {
                write!(
                    f,
                    "variable '{}' has no option named '{}'",
                    variable, default
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Error type for a whole document's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Variable resolution failed; the document cannot be transformed.
    Resolve(ResolveError),

    /// Validation found errors. `css` holds the untransformed input so a
    /// caller that chooses to continue despite lint failures still has the
    /// original text.
    Validation { errors: Vec<String>, css: String },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Resolve(err) => write!(f, "{}", err),
            PipelineError::Validation { errors, .. } => {
                write!(f, "validation failed with {} error(s)", errors.len())
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolveError> for PipelineError {
    fn from(err: ResolveError) -> Self {
        PipelineError::Resolve(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_preprocessor_display() {
        let err = ResolveError::UnsupportedPreprocessor("stylus".into());
        assert_eq!(err.to_string(), "unsupported preprocessor: stylus");
    }

    #[test]
    fn test_no_matching_option_display() {
        let err = ResolveError::NoMatchingOption {
            variable: "theme".into(),
            default: "mocha".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("theme"));
        assert!(msg.contains("mocha"));
    }

    #[test]
    fn test_validation_error_source_chain() {
        let err: PipelineError = ResolveError::UnsupportedPreprocessor("less".into()).into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
