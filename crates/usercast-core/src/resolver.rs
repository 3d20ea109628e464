//! Variable placeholder resolution.
//!
//! Userstyles written for the `uso` preprocessor embed placeholders of the
//! form `/*[[name]]*/` in their CSS body; `color` variables additionally get
//! a `/*[[name-rgb]]*/` form that expands to a decimal `R, G, B` triplet.
//! [`resolve`] substitutes every placeholder using the metadata's declared
//! variables, in declaration order.
//!
//! Documents with no preprocessor (or `"default"`) carry no placeholder
//! syntax and pass through unchanged.

use crate::error::ResolveError;
use crate::metadata::{Metadata, Variable};

/// Substitutes all variable placeholders in `raw` according to `metadata`.
///
/// # Errors
///
/// - [`ResolveError::UnsupportedPreprocessor`] for any preprocessor other
///   than absent, `"default"` or `"uso"`.
/// - [`ResolveError::NoMatchingOption`] when a select-style variable's
///   default names no option.
///
/// # Example
///
/// ```rust
/// use usercast_core::{resolve, Metadata};
///
/// // No preprocessor: identity.
/// let meta = Metadata::default();
/// let css = "a{color:/*[[accent]]*/;}";
/// assert_eq!(resolve(css, &meta).unwrap(), css);
/// ```
pub fn resolve(raw: &str, metadata: &Metadata) -> Result<String, ResolveError> {
    match metadata.preprocessor.as_deref() {
        None | Some("default") => Ok(raw.to_string()),
        Some("uso") => resolve_uso(raw, metadata),
        Some(other) => Err(ResolveError::UnsupportedPreprocessor(other.to_string())),
    }
}

fn resolve_uso(raw: &str, metadata: &Metadata) -> Result<String, ResolveError> {
    let mut out = raw.to_string();
    for (name, variable) in &metadata.vars {
        let value = resolved_value(name, variable)?;
        let placeholder = format!("/*[[{}]]*/", name);
        out = out.replace(&placeholder, &value);
        if matches!(variable, Variable::Color { .. }) {
            let rgb_placeholder = format!("/*[[{}-rgb]]*/", name);
            if out.contains(&rgb_placeholder) {
                out = out.replace(&rgb_placeholder, &decimal_rgb(&value));
            }
        }
    }
    Ok(out)
}

/// Computes the substitution value for one variable.
fn resolved_value(name: &str, variable: &Variable) -> Result<String, ResolveError> {
    match variable {
        Variable::Select { default, options } => options
            .iter()
            .find(|option| option.name == *default)
            .map(|option| option.value.clone())
            .ok_or_else(|| ResolveError::NoMatchingOption {
                variable: name.to_string(),
                default: default.clone(),
            }),
        Variable::Number { default, units } => Ok(match units {
            Some(units) => format!("{}{}", default, units),
            None => default.clone(),
        }),
        Variable::Text { default }
        | Variable::Color { default }
        | Variable::Checkbox { default }
        | Variable::Other { default } => Ok(default.clone()),
    }
}

/// Decomposes a resolved color value into a decimal `"R, G, B"` triplet.
///
/// The leading character (conventionally `#`) is dropped and the remainder's
/// leading digit run is parsed as base 10. Known quirk: hex digits `a`-`f`
/// terminate the parse early, so `#4caf50` decomposes from the integer 4.
/// Existing exports depend on these exact triplets; changing the base here
/// would alter published stylesheets byte-for-byte.
fn decimal_rgb(value: &str) -> String {
    let rest = value.get(1..).unwrap_or("");
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    let n = digits.parse::<i64>().unwrap_or(0);
    let r = (n >> 16) & 0xff;
    let g = (n >> 8) & 0xff;
    let b = n & 0xff;
    format!("{}, {}, {}", r, g, b)
}
