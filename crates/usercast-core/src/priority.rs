//! Importance escalation strategies.
//!
//! Userstyles are written against the normal cascade but must override the
//! host page's own author styles, so every declaration gets promoted to
//! `!important`. Two strategies exist:
//!
//! - [`ImportantStrategy::Textual`]: a line-oriented rewrite of the raw CSS
//!   text. Best effort only; it assumes one declaration per line terminated
//!   by `;` and a newline, and skips anything already carrying a `!`.
//! - [`ImportantStrategy::Structural`]: the declaration nodes of the parsed
//!   tree get their importance flag set during validation (see
//!   [`validate_and_fix`](crate::css::validate_and_fix)). Exact, and the
//!   preferred strategy whenever a structural parse happens anyway.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which importance-escalation strategy the pipeline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportantStrategy {
    /// Heuristic text rewrite via [`escalate_textual`].
    Textual,
    /// Exact per-declaration flag escalation during the validation walk.
    #[default]
    Structural,
}

/// Matches `: value;\n` where the value contains no `;`, `!` or newline.
static DECLARATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([^;!\n]*);\n").expect("declaration pattern"));

/// Appends ` !important` to declarations found by line scanning.
///
/// This is a heuristic, not a parser: declarations that share a line with
/// other declarations, omit the trailing semicolon, or span multiple lines
/// are left untouched. Values already containing `!` are skipped, which also
/// makes the rewrite idempotent.
pub fn escalate_textual(css: &str) -> String {
    DECLARATION_LINE
        .replace_all(css, ":$1 !important;\n")
        .into_owned()
}
