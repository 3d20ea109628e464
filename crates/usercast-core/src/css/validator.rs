//! Structural validation and fix-up.
//!
//! One entry point, [`validate_and_fix`]: parse, lint declaration values,
//! and — only when the document is clean — escalate importance and repair
//! `regexp()` escaping inside document-matching at-rules. Any error keeps
//! the input text untouched; warnings never block transformation.

use tracing::debug;

use super::ast::{PreludeArg, PreludeNode};
use super::escape::escape_css_regexp;
use super::parser::{location_string, parse};
use super::properties::{check_declaration, MatchFailure, SyntaxCheck};
use super::serializer::serialize;

/// Result of validating and fixing one document.
#[derive(Debug, Clone, Default)]
pub struct Fixup {
    /// Fatal diagnostics; non-empty means `transformed` is the original
    /// input, untouched.
    pub errors: Vec<String>,
    /// Informational diagnostics (escaping repairs).
    pub warnings: Vec<String>,
    /// The fixed-up CSS, or the original input when errors exist.
    pub transformed: String,
}

/// Options for [`validate_and_fix`].
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Set every declaration's importance flag during the fix pass. Disabled
    /// when the textual escalation strategy already ran over the input.
    pub escalate_importance: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            escalate_importance: true,
        }
    }
}

/// At-rule names whose preludes may carry `regexp()` predicates.
fn is_document_rule(name: &str) -> bool {
    name == "document" || name == "-moz-document"
}

/// Validates `css` and, when clean, applies the fix passes.
pub fn validate_and_fix(css: &str, options: &ValidateOptions) -> Fixup {
    let (mut sheet, mut errors) = parse(css);

    sheet.each_declaration(|declaration| {
        if let SyntaxCheck::Failed(failure) = check_declaration(&declaration.property, &declaration.tokens)
        {
            let detail = failure.detail();
            let message = match failure {
                MatchFailure::Mismatch => format!("Invalid value for `{}`", declaration.property),
                MatchFailure::UnknownTypeReference(_) => detail.clone(),
            };
            errors.push(format!(
                "{} ({}): {}\n{}",
                location_string(declaration.location),
                declaration.property,
                message,
                detail
            ));
        }
    });

    if !errors.is_empty() {
        debug!(errors = errors.len(), "validation failed, skipping fix passes");
        return Fixup {
            errors,
            warnings: Vec::new(),
            transformed: css.to_string(),
        };
    }

    if options.escalate_importance {
        sheet.each_declaration_mut(|declaration| declaration.important = true);
    }

    let mut warnings = Vec::new();
    sheet.each_at_rule_mut(|at| {
        if !is_document_rule(&at.name) {
            return;
        }
        for component in &mut at.prelude {
            let PreludeNode::Function(func) = component else {
                continue;
            };
            if func.name != "regexp" {
                continue;
            }
            match func.args.first_mut() {
                Some(PreludeArg::String { raw, location }) => {
                    let repaired = escape_css_regexp(raw);
                    if repaired != *raw {
                        warnings.push(format!(
                            "{}: Fixed escaping in regexp({})",
                            location_string(*location),
                            raw
                        ));
                        *raw = repaired;
                    }
                }
                _ => {
                    errors.push(format!(
                        "{}: regexp() argument must be a String",
                        location_string(func.location)
                    ));
                }
            }
        }
    });

    // A bad regexp() argument is as fatal as a syntax error: report it and
    // leave the document untouched.
    if !errors.is_empty() {
        return Fixup {
            errors,
            warnings: Vec::new(),
            transformed: css.to_string(),
        };
    }

    debug!(warnings = warnings.len(), "document transformed");
    Fixup {
        errors,
        warnings,
        transformed: serialize(&sheet),
    }
}
