//! CSS parsing into the structural tree.
//!
//! Built on `cssparser`'s rule parsing traits. The parser recovers from
//! errors: an invalid rule or declaration is recorded as a diagnostic and
//! parsing continues with the next item, so a single document yields both a
//! (partial) tree and the full list of low-level syntax errors.
//!
//! Raw source text is kept for selectors, declaration values and prelude
//! tokens, so the serializer reproduces the author's spelling instead of a
//! re-tokenized approximation. String literals in preludes keep their quotes
//! and escape sequences untouched; the escaping fix-up depends on that.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, SourceLocation,
    StyleSheetParser, Token,
};

use super::ast::{
    AtRule, AtRuleBody, Declaration, Node, PreludeArg, PreludeFunction, PreludeNode, StyleRule,
    Stylesheet, ValueToken,
};

/// Parses `css`, accumulating low-level syntax errors instead of aborting.
pub fn parse(css: &str) -> (Stylesheet, Vec<String>) {
    let mut errors = Vec::new();
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let nodes = parse_rule_list(&mut parser, &mut errors);
    (Stylesheet { nodes }, errors)
}

/// Formats a source location as `line:column`, lines 1-based.
pub(crate) fn location_string(location: SourceLocation) -> String {
    format!("{}:{}", location.line + 1, location.column)
}

fn format_parse_error(err: &ParseError<'_, ()>) -> String {
    let message = match &err.kind {
        ParseErrorKind::Basic(basic) => basic.to_string(),
        ParseErrorKind::Custom(()) => "invalid syntax".to_string(),
    };
    format!("{}: {}", location_string(err.location), message)
}

/// At-rules whose block is a declaration list rather than nested rules.
fn at_rule_has_declaration_body(name: &str) -> bool {
    let base = strip_vendor_prefix(name);
    matches!(
        base,
        "font-face" | "page" | "viewport" | "counter-style" | "property"
    )
}

fn strip_vendor_prefix(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('-') {
        if let Some(idx) = rest.find('-') {
            return &rest[idx + 1..];
        }
    }
    name
}

fn token_opens_block(token: &Token) -> bool {
    matches!(
        token,
        Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock
    )
}

/// Consumes the contents of a just-returned block-opening token so that the
/// parser position lands after its closing delimiter.
fn consume_block<'i, 't>(input: &mut Parser<'i, 't>) {
    let _ = input.parse_nested_block(|nested| -> Result<(), ParseError<'i, ()>> {
        loop {
            let token = match nested.next() {
                Ok(token) => token.clone(),
                Err(_) => return Ok(()),
            };
            if token_opens_block(&token) {
                consume_block(nested);
            }
        }
    });
}

fn simplify_token(token: &Token) -> ValueToken {
    match token {
        Token::Ident(name) => ValueToken::Ident(name.as_ref().to_string()),
        Token::Function(name) => ValueToken::Function(name.as_ref().to_string()),
        Token::Hash(value) | Token::IDHash(value) => ValueToken::Hash(value.as_ref().to_string()),
        Token::Dimension { value, unit, .. } => ValueToken::Dimension {
            value: *value,
            unit: unit.as_ref().to_string(),
        },
        Token::Number { value, .. } => ValueToken::Number(*value),
        Token::Percentage { unit_value, .. } => ValueToken::Percentage(*unit_value * 100.0),
        Token::QuotedString(value) => ValueToken::QuotedString(value.as_ref().to_string()),
        Token::UnquotedUrl(value) => ValueToken::Url(value.as_ref().to_string()),
        Token::Delim(c) => ValueToken::Delim(*c),
        _ => ValueToken::Other,
    }
}

fn parse_rule_list<'i, 't>(input: &mut Parser<'i, 't>, errors: &mut Vec<String>) -> Vec<Node> {
    let mut nodes = Vec::new();
    // Errors surfaced by the iterator itself are staged separately because
    // the rule parser holds the shared error list for its callbacks.
    let mut iter_errors = Vec::new();
    {
        let mut rule_parser = RuleParser { errors };
        for result in StyleSheetParser::new(input, &mut rule_parser) {
            match result {
                Ok(node) => nodes.push(node),
                Err((err, _slice)) => iter_errors.push(format_parse_error(&err)),
            }
        }
    }
    errors.append(&mut iter_errors);
    nodes
}

fn parse_declaration_list<'i, 't>(
    input: &mut Parser<'i, 't>,
    errors: &mut Vec<String>,
) -> Vec<Declaration> {
    let mut decl_parser = DeclParser;
    let mut declarations = Vec::new();
    let iter = RuleBodyParser::new(input, &mut decl_parser);
    for result in iter {
        match result {
            Ok(declaration) => declarations.push(declaration),
            Err((err, _slice)) => errors.push(format_parse_error(&err)),
        }
    }
    declarations
}

/// Prelude of an at-rule, accumulated before its block is seen.
struct AtPrelude {
    name: String,
    components: Vec<PreludeNode>,
}

struct RuleParser<'e> {
    errors: &'e mut Vec<String>,
}

impl<'i, 'e> QualifiedRuleParser<'i> for RuleParser<'e> {
    type Prelude = (String, SourceLocation);
    type QualifiedRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        input.skip_whitespace();
        let location = input.current_source_location();
        let start = input.position();
        let mut end = start;
        loop {
            let token = match input.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            if token_opens_block(&token) {
                consume_block(input);
            }
            end = input.position();
        }
        let selector = input.slice(start..end).trim().to_string();
        if selector.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok((selector, location))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let (selector, location) = prelude;
        let declarations = parse_declaration_list(input, self.errors);
        Ok(Node::Style(StyleRule {
            selector,
            declarations,
            location,
        }))
    }
}

impl<'i, 'e> AtRuleParser<'i> for RuleParser<'e> {
    type Prelude = AtPrelude;
    type AtRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut components = Vec::new();
        loop {
            input.skip_whitespace();
            let location = input.current_source_location();
            let start = input.position();
            let token = match input.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            match token {
                Token::Function(fname) => {
                    let mut args = Vec::new();
                    let _ = input.parse_nested_block(|nested| -> Result<(), ParseError<'i, ()>> {
                        loop {
                            nested.skip_whitespace();
                            let arg_location = nested.current_source_location();
                            let arg_start = nested.position();
                            let token = match nested.next() {
                                Ok(token) => token.clone(),
                                Err(_) => return Ok(()),
                            };
                            match token {
                                Token::QuotedString(_) => {
                                    let raw =
                                        nested.slice(arg_start..nested.position()).to_string();
                                    args.push(PreludeArg::String {
                                        raw,
                                        location: arg_location,
                                    });
                                }
                                token => {
                                    if token_opens_block(&token) {
                                        consume_block(nested);
                                    }
                                    let raw =
                                        nested.slice(arg_start..nested.position()).to_string();
                                    args.push(PreludeArg::Raw(raw));
                                }
                            }
                        }
                    });
                    components.push(PreludeNode::Function(PreludeFunction {
                        name: fname.as_ref().to_string(),
                        args,
                        location,
                    }));
                }
                token => {
                    if token_opens_block(&token) {
                        consume_block(input);
                    }
                    components.push(PreludeNode::Raw(
                        input.slice(start..input.position()).to_string(),
                    ));
                }
            }
        }
        Ok(AtPrelude {
            name: name.as_ref().to_string(),
            components,
        })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let body = if at_rule_has_declaration_body(&prelude.name) {
            AtRuleBody::Declarations(parse_declaration_list(input, self.errors))
        } else {
            AtRuleBody::Rules(parse_rule_list(input, self.errors))
        };
        Ok(Node::At(AtRule {
            name: prelude.name,
            prelude: prelude.components,
            body,
            location: start.source_location(),
        }))
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(Node::At(AtRule {
            name: prelude.name,
            prelude: prelude.components,
            body: AtRuleBody::None,
            location: start.source_location(),
        }))
    }
}

struct DeclParser;

impl<'i> DeclarationParser<'i> for DeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        input.skip_whitespace();
        let location = input.current_source_location();
        let value_start = input.position();
        let mut value_end = value_start;
        let mut tokens = Vec::new();
        let mut important = false;

        loop {
            input.skip_whitespace();
            let token = match input.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            if important {
                // nothing is allowed after the priority
                return Err(input.new_custom_error(()));
            }
            match token {
                Token::Delim('!') => {
                    let matched = matches!(
                        input.next(),
                        Ok(Token::Ident(ident)) if ident.eq_ignore_ascii_case("important")
                    );
                    if !matched {
                        return Err(input.new_custom_error(()));
                    }
                    important = true;
                }
                Token::BadString(_) | Token::BadUrl(_) => {
                    return Err(input.new_custom_error(()));
                }
                token => {
                    if token_opens_block(&token) {
                        consume_block(input);
                    }
                    tokens.push(simplify_token(&token));
                    value_end = input.position();
                }
            }
        }

        let value = input.slice(value_start..value_end).trim().to_string();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(Declaration {
            property: name.as_ref().to_string(),
            value,
            tokens,
            important,
            location,
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
