//! Serialization of the structural tree back to CSS text.
//!
//! Output is compact: no indentation, declarations joined with `;` and no
//! trailing semicolon before a closing brace. All text comes from the raw
//! slices captured at parse time, so values, selectors and prelude tokens
//! round-trip in the author's spelling.

use super::ast::{AtRule, AtRuleBody, Declaration, Node, PreludeArg, PreludeNode, Stylesheet};

/// Serializes a stylesheet to CSS text.
pub fn serialize(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    for node in &sheet.nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Style(rule) => {
            out.push_str(&rule.selector);
            out.push('{');
            write_declarations(out, &rule.declarations);
            out.push('}');
        }
        Node::At(at) => write_at_rule(out, at),
    }
}

fn write_at_rule(out: &mut String, at: &AtRule) {
    out.push('@');
    out.push_str(&at.name);
    if !at.prelude.is_empty() {
        out.push(' ');
        write_components(out, &at.prelude);
    }
    match &at.body {
        AtRuleBody::None => out.push(';'),
        AtRuleBody::Declarations(decls) => {
            out.push('{');
            write_declarations(out, decls);
            out.push('}');
        }
        AtRuleBody::Rules(children) => {
            out.push('{');
            for child in children {
                write_node(out, child);
            }
            out.push('}');
        }
    }
}

fn write_declarations(out: &mut String, declarations: &[Declaration]) {
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&declaration.property);
        out.push(':');
        out.push_str(&declaration.value);
        if declaration.important {
            out.push_str(" !important");
        }
    }
}

/// Writes prelude components: commas attach to the previous component,
/// everything else is space separated.
fn write_components(out: &mut String, components: &[PreludeNode]) {
    let mut first = true;
    for component in components {
        match component {
            PreludeNode::Raw(raw) if raw == "," => out.push(','),
            PreludeNode::Raw(raw) => {
                if !first {
                    out.push(' ');
                }
                out.push_str(raw);
            }
            PreludeNode::Function(func) => {
                if !first {
                    out.push(' ');
                }
                out.push_str(&func.name);
                out.push('(');
                write_args(out, &func.args);
                out.push(')');
            }
        }
        first = false;
    }
}

fn write_args(out: &mut String, args: &[PreludeArg]) {
    let mut first = true;
    for arg in args {
        let raw = match arg {
            PreludeArg::String { raw, .. } => raw,
            PreludeArg::Raw(raw) => raw,
        };
        if raw == "," {
            out.push(',');
        } else if !first {
            out.push(' ');
        }
        if raw != "," {
            out.push_str(raw);
        }
        first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;

    fn roundtrip(css: &str) -> String {
        let (sheet, errors) = parse(css);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        serialize(&sheet)
    }

    #[test]
    fn test_compact_rule_output() {
        assert_eq!(roundtrip("a { color: red; }"), "a{color:red}");
    }

    #[test]
    fn test_multiple_declarations_joined_with_semicolon() {
        assert_eq!(
            roundtrip("a { color: red; top: 0; }"),
            "a{color:red;top:0}"
        );
    }

    #[test]
    fn test_important_suffix() {
        assert_eq!(
            roundtrip("a { color: red !important; }"),
            "a{color:red !important}"
        );
    }

    #[test]
    fn test_media_rule_output() {
        assert_eq!(
            roundtrip("@media screen and (max-width: 10px) { a { top: 0; } }"),
            "@media screen and (max-width: 10px){a{top:0}}"
        );
    }

    #[test]
    fn test_moz_document_prelude_output() {
        assert_eq!(
            roundtrip("@-moz-document url-prefix(\"https://a/\"), regexp(\"a\\.b\") { a { top: 0; } }"),
            "@-moz-document url-prefix(\"https://a/\"), regexp(\"a\\.b\"){a{top:0}}"
        );
    }

    #[test]
    fn test_statement_at_rule_output() {
        assert_eq!(
            roundtrip("@import url(\"base.css\");"),
            "@import url(\"base.css\");"
        );
    }
}
