//! Escaping repair for `regexp()` literals.
//!
//! The regular-expression argument of a document-matching at-rule is read
//! twice: once by the CSS string tokenizer and once by the regex engine. A
//! backslash that should reach the regex engine therefore has to be written
//! doubled in the source, but many styles in the wild only escape once.
//! [`escape_css_regexp`] promotes those single escapes to double escapes.

/// Repairs under-escaped backslashes in a `regexp()` string literal.
///
/// If the input contains a double backslash anywhere, it is taken as
/// deliberately escaped and returned unchanged. Otherwise every backslash is
/// single by definition and gets doubled. Single pass; the output never
/// needs the repair again.
///
/// ```rust
/// use usercast_core::escape_css_regexp;
///
/// assert_eq!(escape_css_regexp(r"\w+"), r"\\w+");
/// assert_eq!(escape_css_regexp(r"\\w+"), r"\\w+");
/// assert_eq!(escape_css_regexp("no-escapes"), "no-escapes");
/// ```
pub fn escape_css_regexp(source: &str) -> String {
    if source.contains("\\\\") {
        return source.to_string();
    }
    source.replace('\\', "\\\\")
}
