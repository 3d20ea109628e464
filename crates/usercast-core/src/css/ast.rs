//! Structural CSS tree.
//!
//! A thin, mutable representation of a parsed stylesheet: enough structure to
//! validate declaration values, flip importance flags, and rewrite string
//! literals inside at-rule preludes, while keeping the raw text of
//! everything else so serialization never invents content. Positions come
//! from the tokenizer and survive into diagnostics.

pub use cssparser::SourceLocation;

/// A parsed stylesheet: the ordered top-level nodes.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// One rule at any nesting level.
#[derive(Debug, Clone)]
pub enum Node {
    Style(StyleRule),
    At(AtRule),
}

/// A qualified rule: raw selector text plus its declarations.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
    pub location: SourceLocation,
}

/// A single declaration. `value` is the raw source text of the value without
/// any priority suffix; `tokens` is the simplified token view used for
/// grammar checking.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub tokens: Vec<ValueToken>,
    pub important: bool,
    pub location: SourceLocation,
}

/// An at-rule with its prelude and body.
#[derive(Debug, Clone)]
pub struct AtRule {
    /// Name without the `@`, case preserved.
    pub name: String,
    pub prelude: Vec<PreludeNode>,
    pub body: AtRuleBody,
    pub location: SourceLocation,
}

/// Body shape of an at-rule.
#[derive(Debug, Clone)]
pub enum AtRuleBody {
    /// Statement at-rule (`@import`, `@charset`): no block.
    None,
    /// Declaration block (`@font-face`, `@page`).
    Declarations(Vec<Declaration>),
    /// Nested rule list (`@media`, `@-moz-document`, `@supports`).
    Rules(Vec<Node>),
}

/// One component of an at-rule prelude.
#[derive(Debug, Clone)]
pub enum PreludeNode {
    /// A function call such as `url-prefix(...)` or `regexp(...)`.
    Function(PreludeFunction),
    /// Any other token, kept as raw source text.
    Raw(String),
}

/// A function call in an at-rule prelude.
#[derive(Debug, Clone)]
pub struct PreludeFunction {
    pub name: String,
    pub args: Vec<PreludeArg>,
    pub location: SourceLocation,
}

/// One argument token of a prelude function.
#[derive(Debug, Clone)]
pub enum PreludeArg {
    /// A string literal. `raw` is the source text including the surrounding
    /// quotes, escapes intact; rewriting it rewrites the serialized output.
    String { raw: String, location: SourceLocation },
    /// Any other token, kept as raw source text.
    Raw(String),
}

/// Simplified value token for property grammar checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueToken {
    Ident(String),
    Function(String),
    Hash(String),
    Dimension { value: f32, unit: String },
    Number(f32),
    Percentage(f32),
    QuotedString(String),
    Url(String),
    Delim(char),
    Other,
}

impl Stylesheet {
    /// Visits every declaration in the tree, depth first, mutably.
    pub fn each_declaration_mut<F: FnMut(&mut Declaration)>(&mut self, mut f: F) {
        fn walk<F: FnMut(&mut Declaration)>(nodes: &mut [Node], f: &mut F) {
            for node in nodes {
                match node {
                    Node::Style(rule) => rule.declarations.iter_mut().for_each(&mut *f),
                    Node::At(at) => match &mut at.body {
                        AtRuleBody::Declarations(decls) => decls.iter_mut().for_each(&mut *f),
                        AtRuleBody::Rules(children) => walk(children, f),
                        AtRuleBody::None => {}
                    },
                }
            }
        }
        walk(&mut self.nodes, &mut f);
    }

    /// Visits every declaration in the tree, depth first.
    pub fn each_declaration<F: FnMut(&Declaration)>(&self, mut f: F) {
        fn walk<F: FnMut(&Declaration)>(nodes: &[Node], f: &mut F) {
            for node in nodes {
                match node {
                    Node::Style(rule) => rule.declarations.iter().for_each(&mut *f),
                    Node::At(at) => match &at.body {
                        AtRuleBody::Declarations(decls) => decls.iter().for_each(&mut *f),
                        AtRuleBody::Rules(children) => walk(children, f),
                        AtRuleBody::None => {}
                    },
                }
            }
        }
        walk(&self.nodes, &mut f);
    }

    /// Visits every at-rule in the tree, depth first, mutably.
    pub fn each_at_rule_mut<F: FnMut(&mut AtRule)>(&mut self, mut f: F) {
        fn walk<F: FnMut(&mut AtRule)>(nodes: &mut [Node], f: &mut F) {
            for node in nodes {
                if let Node::At(at) = node {
                    f(at);
                    if let AtRuleBody::Rules(children) = &mut at.body {
                        walk(children, f);
                    }
                }
            }
        }
        walk(&mut self.nodes, &mut f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(property: &str) -> Declaration {
        Declaration {
            property: property.into(),
            value: "0".into(),
            tokens: vec![ValueToken::Number(0.0)],
            important: false,
            location: SourceLocation { line: 0, column: 1 },
        }
    }

    #[test]
    fn test_walk_reaches_nested_declarations() {
        let mut sheet = Stylesheet {
            nodes: vec![
                Node::Style(StyleRule {
                    selector: "a".into(),
                    declarations: vec![decl("top")],
                    location: SourceLocation { line: 0, column: 1 },
                }),
                Node::At(AtRule {
                    name: "media".into(),
                    prelude: vec![PreludeNode::Raw("screen".into())],
                    body: AtRuleBody::Rules(vec![Node::Style(StyleRule {
                        selector: "b".into(),
                        declarations: vec![decl("left"), decl("right")],
                        location: SourceLocation { line: 1, column: 1 },
                    })]),
                    location: SourceLocation { line: 1, column: 1 },
                }),
            ],
        };

        let mut seen = Vec::new();
        sheet.each_declaration(|d| seen.push(d.property.clone()));
        assert_eq!(seen, vec!["top", "left", "right"]);

        sheet.each_declaration_mut(|d| d.important = true);
        sheet.each_declaration(|d| assert!(d.important));
    }
}
