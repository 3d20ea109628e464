//! Declaration value checking against known property grammars.
//!
//! Each known property maps to a list of component types; a value passes
//! when every one of its tokens is accepted by at least one component (or is
//! universally acceptable, like `var()`). The checker is deliberately
//! lenient with what it does not know: custom properties, vendor-prefixed
//! properties and properties missing from the table are ignored rather than
//! reported, so only two failure categories ever reach the caller —
//! a value mismatch, and a grammar component the checker cannot resolve.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::ast::ValueToken;

/// Outcome of checking one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxCheck {
    Valid,
    Ignored(IgnoredReason),
    Failed(MatchFailure),
}

/// Why a declaration was skipped rather than checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// `--custom-property` definitions accept any value.
    CustomProperty,
    /// Vendor-prefixed properties are out of grammar scope.
    VendorPrefix,
    /// Property not in the grammar table.
    UnknownProperty,
}

/// A reportable grammar failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFailure {
    /// The value does not match the property's declared syntax.
    Mismatch,
    /// The property's grammar references a component type the checker does
    /// not implement.
    UnknownTypeReference(String),
}

impl MatchFailure {
    /// The underlying error detail line for diagnostics.
    pub fn detail(&self) -> String {
        match self {
            MatchFailure::Mismatch => "Mismatch".to_string(),
            MatchFailure::UnknownTypeReference(name) => {
                format!("Unknown type reference: {}", name)
            }
        }
    }
}

/// Checks `tokens` against the grammar registered for `property`.
pub fn check_declaration(property: &str, tokens: &[ValueToken]) -> SyntaxCheck {
    if property.starts_with("--") {
        return SyntaxCheck::Ignored(IgnoredReason::CustomProperty);
    }
    if property.starts_with('-') {
        return SyntaxCheck::Ignored(IgnoredReason::VendorPrefix);
    }
    let Some(components) = PROPERTY_GRAMMAR.get(property.to_ascii_lowercase().as_str()) else {
        return SyntaxCheck::Ignored(IgnoredReason::UnknownProperty);
    };
    match match_components(tokens, components) {
        Ok(()) => SyntaxCheck::Valid,
        Err(failure) => SyntaxCheck::Failed(failure),
    }
}

/// Matches every token against the component list.
pub(crate) fn match_components(
    tokens: &[ValueToken],
    components: &[&str],
) -> Result<(), MatchFailure> {
    if let [ValueToken::Ident(ident)] = tokens {
        if is_wide_keyword(ident) {
            return Ok(());
        }
    }
    for token in tokens {
        if is_universal(token) {
            continue;
        }
        let mut accepted = false;
        for component in components {
            if component_accepts(component, token)? {
                accepted = true;
                break;
            }
        }
        if !accepted {
            return Err(MatchFailure::Mismatch);
        }
    }
    Ok(())
}

/// Tokens legal in any property value.
fn is_universal(token: &ValueToken) -> bool {
    match token {
        // Separators and anything the tokenizer flattened.
        ValueToken::Other => true,
        ValueToken::Function(name) => matches!(
            name.to_ascii_lowercase().as_str(),
            "var" | "calc" | "env" | "min" | "max" | "clamp"
        ),
        _ => false,
    }
}

fn is_wide_keyword(ident: &str) -> bool {
    matches!(
        ident.to_ascii_lowercase().as_str(),
        "inherit" | "initial" | "unset" | "revert" | "revert-layer"
    )
}

fn component_accepts(component: &str, token: &ValueToken) -> Result<bool, MatchFailure> {
    if let Some(keywords) = component.strip_prefix("keyword:") {
        return Ok(match token {
            ValueToken::Ident(ident) => {
                let ident = ident.to_ascii_lowercase();
                keywords.split('|').any(|k| k == ident)
            }
            _ => false,
        });
    }
    let accepted = match component {
        "color" => is_color(token),
        "length" => is_length(token),
        "percentage" => matches!(token, ValueToken::Percentage(_)),
        "number" => matches!(token, ValueToken::Number(_)),
        "integer" => matches!(token, ValueToken::Number(n) if n.fract() == 0.0),
        "line-width" => {
            is_length(token)
                || matches!(
                    token,
                    ValueToken::Ident(ident)
                        if matches!(ident.to_ascii_lowercase().as_str(), "thin" | "medium" | "thick")
                )
        }
        "string" => matches!(token, ValueToken::QuotedString(_)),
        "url" => {
            matches!(token, ValueToken::Url(_))
                || matches!(token, ValueToken::Function(name) if name.eq_ignore_ascii_case("url"))
        }
        "image" => {
            matches!(token, ValueToken::Url(_))
                || matches!(
                    token,
                    ValueToken::Function(name) if matches!(
                        name.to_ascii_lowercase().as_str(),
                        "url"
                            | "linear-gradient"
                            | "radial-gradient"
                            | "conic-gradient"
                            | "repeating-linear-gradient"
                            | "repeating-radial-gradient"
                            | "image-set"
                    )
                )
        }
        "time" => matches!(
            token,
            ValueToken::Dimension { unit, .. }
                if matches!(unit.to_ascii_lowercase().as_str(), "s" | "ms")
        ),
        "family-name" => matches!(
            token,
            ValueToken::Ident(_) | ValueToken::QuotedString(_)
        ),
        other => return Err(MatchFailure::UnknownTypeReference(other.to_string())),
    };
    Ok(accepted)
}

fn is_length(token: &ValueToken) -> bool {
    match token {
        ValueToken::Dimension { unit, .. } => matches!(
            unit.to_ascii_lowercase().as_str(),
            "px" | "em"
                | "rem"
                | "ex"
                | "ch"
                | "cap"
                | "ic"
                | "lh"
                | "rlh"
                | "vw"
                | "vh"
                | "vmin"
                | "vmax"
                | "vi"
                | "vb"
                | "pt"
                | "pc"
                | "in"
                | "cm"
                | "mm"
                | "q"
        ),
        // Unitless zero is a valid length.
        ValueToken::Number(n) => *n == 0.0,
        _ => false,
    }
}

fn is_color(token: &ValueToken) -> bool {
    match token {
        ValueToken::Hash(value) => {
            matches!(value.len(), 3 | 4 | 6 | 8)
                && value.bytes().all(|b| b.is_ascii_hexdigit())
        }
        ValueToken::Ident(name) => {
            let name = name.to_ascii_lowercase();
            name == "transparent" || name == "currentcolor" || NAMED_COLORS.contains(&name.as_str())
        }
        ValueToken::Function(name) => matches!(
            name.to_ascii_lowercase().as_str(),
            "rgb" | "rgba" | "hsl" | "hsla" | "hwb" | "lab" | "lch" | "oklab" | "oklch"
                | "color" | "color-mix" | "light-dark"
        ),
        _ => false,
    }
}

/// CSS extended color keywords.
static NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
    "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Known property grammars, component-wise.
static PROPERTY_GRAMMAR: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, &'static [&'static str]> = HashMap::new();

    const COLOR: &[&str] = &["color"];
    for property in [
        "color",
        "background-color",
        "border-color",
        "border-top-color",
        "border-right-color",
        "border-bottom-color",
        "border-left-color",
        "outline-color",
        "text-decoration-color",
        "caret-color",
        "column-rule-color",
        "accent-color",
        "fill",
        "stroke",
    ] {
        table.insert(property, COLOR);
    }

    const SIZE: &[&str] = &[
        "length",
        "percentage",
        "keyword:auto|none|min-content|max-content|fit-content",
    ];
    for property in [
        "width",
        "height",
        "min-width",
        "min-height",
        "max-width",
        "max-height",
    ] {
        table.insert(property, SIZE);
    }

    const MARGIN: &[&str] = &["length", "percentage", "keyword:auto"];
    for property in [
        "margin",
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "top",
        "right",
        "bottom",
        "left",
        "inset",
    ] {
        table.insert(property, MARGIN);
    }

    const PADDING: &[&str] = &["length", "percentage"];
    for property in [
        "padding",
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "border-radius",
        "text-indent",
    ] {
        table.insert(property, PADDING);
    }

    const BORDER_WIDTH: &[&str] = &["line-width"];
    for property in [
        "border-width",
        "border-top-width",
        "border-right-width",
        "border-bottom-width",
        "border-left-width",
        "outline-width",
        "column-rule-width",
    ] {
        table.insert(property, BORDER_WIDTH);
    }

    const BORDER_STYLE: &[&str] =
        &["keyword:none|hidden|dotted|dashed|solid|double|groove|ridge|inset|outset"];
    for property in [
        "border-style",
        "border-top-style",
        "border-right-style",
        "border-bottom-style",
        "border-left-style",
        "outline-style",
    ] {
        table.insert(property, BORDER_STYLE);
    }

    const GAP: &[&str] = &["length", "percentage", "keyword:normal"];
    for property in ["gap", "row-gap", "column-gap"] {
        table.insert(property, GAP);
    }

    table.insert(
        "font-size",
        &[
            "length",
            "percentage",
            "keyword:xx-small|x-small|small|medium|large|x-large|xx-large|smaller|larger",
        ],
    );
    table.insert(
        "line-height",
        &["number", "length", "percentage", "keyword:normal"],
    );
    table.insert("letter-spacing", &["length", "keyword:normal"]);
    table.insert("word-spacing", &["length", "percentage", "keyword:normal"]);
    table.insert("z-index", &["integer", "keyword:auto"]);
    table.insert("opacity", &["number", "percentage"]);
    table.insert("font-weight", &["number", "keyword:normal|bold|bolder|lighter"]);
    table.insert("font-style", &["keyword:normal|italic|oblique"]);
    table.insert("font-family", &["family-name"]);
    table.insert(
        "display",
        &["keyword:block|inline|inline-block|flex|inline-flex|grid|inline-grid|none|contents|table|table-row|table-cell|list-item|flow-root"],
    );
    table.insert("position", &["keyword:static|relative|absolute|fixed|sticky"]);
    table.insert("float", &["keyword:left|right|none|inline-start|inline-end"]);
    table.insert("clear", &["keyword:left|right|both|none"]);
    table.insert("visibility", &["keyword:visible|hidden|collapse"]);
    for property in ["overflow", "overflow-x", "overflow-y"] {
        table.insert(property, &["keyword:visible|hidden|scroll|auto|clip"]);
    }
    table.insert(
        "text-align",
        &["keyword:left|right|center|justify|start|end|match-parent"],
    );
    table.insert(
        "text-transform",
        &["keyword:none|capitalize|uppercase|lowercase|full-width"],
    );
    table.insert(
        "text-decoration-line",
        &["keyword:none|underline|overline|line-through|blink"],
    );
    table.insert(
        "text-decoration",
        &[
            "keyword:none|underline|overline|line-through|solid|double|dotted|dashed|wavy",
            "color",
            "line-width",
        ],
    );
    table.insert(
        "white-space",
        &["keyword:normal|nowrap|pre|pre-wrap|pre-line|break-spaces"],
    );
    table.insert("box-sizing", &["keyword:content-box|border-box"]);
    table.insert("background-image", &["image", "keyword:none"]);
    table.insert("list-style-image", &["image", "keyword:none"]);
    table.insert(
        "vertical-align",
        &[
            "length",
            "percentage",
            "keyword:baseline|sub|super|top|text-top|middle|bottom|text-bottom",
        ],
    );
    table.insert(
        "flex-direction",
        &["keyword:row|row-reverse|column|column-reverse"],
    );
    table.insert("flex-wrap", &["keyword:nowrap|wrap|wrap-reverse"]);
    table.insert("flex-grow", &["number"]);
    table.insert("flex-shrink", &["number"]);
    table.insert(
        "cursor",
        &[
            "url",
            "number",
            "keyword:auto|default|pointer|text|move|grab|grabbing|not-allowed|crosshair|wait|progress|help|none|zoom-in|zoom-out|col-resize|row-resize",
        ],
    );
    table.insert("transition-duration", &["time"]);
    table.insert("transition-delay", &["time"]);
    table.insert("animation-duration", &["time"]);
    table.insert("animation-delay", &["time"]);
    table.insert("content", &["string", "url", "keyword:none|normal|open-quote|close-quote"]);

    table
});

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> ValueToken {
        ValueToken::Ident(name.into())
    }

    fn px(value: f32) -> ValueToken {
        ValueToken::Dimension {
            value,
            unit: "px".into(),
        }
    }

    // =========================================================================
    // Acceptance
    // =========================================================================

    #[test]
    fn test_named_color_is_valid() {
        assert_eq!(check_declaration("color", &[ident("red")]), SyntaxCheck::Valid);
        assert_eq!(
            check_declaration("color", &[ident("rebeccapurple")]),
            SyntaxCheck::Valid
        );
    }

    #[test]
    fn test_hex_color_is_valid() {
        assert_eq!(
            check_declaration("color", &[ValueToken::Hash("1a2b3c".into())]),
            SyntaxCheck::Valid
        );
    }

    #[test]
    fn test_color_function_is_valid() {
        assert_eq!(
            check_declaration("color", &[ValueToken::Function("rgba".into())]),
            SyntaxCheck::Valid
        );
    }

    #[test]
    fn test_var_is_universally_accepted() {
        assert_eq!(
            check_declaration("color", &[ValueToken::Function("var".into())]),
            SyntaxCheck::Valid
        );
    }

    #[test]
    fn test_wide_keywords_always_match() {
        assert_eq!(check_declaration("color", &[ident("inherit")]), SyntaxCheck::Valid);
        assert_eq!(check_declaration("width", &[ident("unset")]), SyntaxCheck::Valid);
    }

    #[test]
    fn test_margin_shorthand_component_wise() {
        assert_eq!(
            check_declaration("margin", &[ValueToken::Number(0.0), ident("auto")]),
            SyntaxCheck::Valid
        );
    }

    // =========================================================================
    // Rejection and skipping
    // =========================================================================

    #[test]
    fn test_length_for_color_is_a_mismatch() {
        assert_eq!(
            check_declaration("color", &[px(5.0)]),
            SyntaxCheck::Failed(MatchFailure::Mismatch)
        );
    }

    #[test]
    fn test_unknown_ident_for_color_is_a_mismatch() {
        assert_eq!(
            check_declaration("color", &[ident("redd")]),
            SyntaxCheck::Failed(MatchFailure::Mismatch)
        );
    }

    #[test]
    fn test_nonzero_number_is_not_a_length() {
        assert_eq!(
            check_declaration("width", &[ValueToken::Number(5.0)]),
            SyntaxCheck::Failed(MatchFailure::Mismatch)
        );
        assert_eq!(
            check_declaration("width", &[ValueToken::Number(0.0)]),
            SyntaxCheck::Valid
        );
    }

    #[test]
    fn test_custom_property_is_ignored() {
        assert_eq!(
            check_declaration("--accent", &[px(5.0)]),
            SyntaxCheck::Ignored(IgnoredReason::CustomProperty)
        );
    }

    #[test]
    fn test_vendor_prefix_is_ignored() {
        assert_eq!(
            check_declaration("-moz-osx-font-smoothing", &[ident("grayscale")]),
            SyntaxCheck::Ignored(IgnoredReason::VendorPrefix)
        );
    }

    #[test]
    fn test_unknown_property_is_ignored() {
        assert_eq!(
            check_declaration("scroll-snap-coordinate", &[px(1.0)]),
            SyntaxCheck::Ignored(IgnoredReason::UnknownProperty)
        );
    }

    #[test]
    fn test_unresolvable_component_is_reported() {
        let err = match_components(&[ident("x")], &["frobnicate"]).unwrap_err();
        assert_eq!(err, MatchFailure::UnknownTypeReference("frobnicate".into()));
        assert_eq!(err.detail(), "Unknown type reference: frobnicate");
    }
}
