//! Userstyle metadata types.
//!
//! The metadata header of a userstyle is parsed by an external tool; this
//! module defines the record it hands over: an optional preprocessor name and
//! an ordered map of declared variables. Variables are capability-tagged:
//! each kind carries exactly the fields its resolution needs, so the resolver
//! can match on the variant instead of comparing type strings.
//!
//! # Example
//!
//! ```rust
//! use usercast_core::Metadata;
//!
//! let meta: Metadata = serde_json::from_str(r##"{
//!     "preprocessor": "uso",
//!     "vars": {
//!         "accent": { "type": "color", "default": "#336699" },
//!         "size":   { "type": "number", "default": "10", "units": "px" }
//!     }
//! }"##).unwrap();
//! assert_eq!(meta.preprocessor.as_deref(), Some("uso"));
//! assert_eq!(meta.vars.len(), 2);
//! ```

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Parsed userstyle metadata, as produced by the external header parser.
///
/// `vars` preserves the declaration order of the header; placeholder
/// substitution walks it front to back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// Declared preprocessor dialect, e.g. `"uso"`. Absent means plain CSS.
    #[serde(default)]
    pub preprocessor: Option<String>,
    /// Declared variables, keyed by name, in declaration order.
    #[serde(default)]
    pub vars: IndexMap<String, Variable>,
}

/// A single declared variable.
///
/// The `select`, `dropdown` and `image` metadata types all resolve the same
/// way (look up the default option) and share the [`Variable::Select`]
/// variant; `number` and `range` share [`Variable::Number`]. Type strings
/// this crate does not recognize land in [`Variable::Other`] and resolve to
/// their default verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variable {
    /// Free-form text.
    Text { default: String },
    /// A color value; also eligible for `-rgb` placeholder expansion.
    Color { default: String },
    /// A checkbox, default `"0"` or `"1"`.
    Checkbox { default: String },
    /// An option list; `default` names the selected option.
    Select {
        default: String,
        options: Vec<VariableOption>,
    },
    /// A numeric value with an optional unit suffix.
    Number {
        default: String,
        units: Option<String>,
    },
    /// Unrecognized variable type; resolves to its default verbatim.
    Other { default: String },
}

/// One entry of a [`Variable::Select`] option list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableOption {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub value: String,
}

/// Wire shape of a variable as the header parser emits it.
#[derive(Deserialize)]
struct RawVariable {
    #[serde(rename = "type")]
    kind: String,
    default: String,
    #[serde(default)]
    options: Option<Vec<VariableOption>>,
    #[serde(default)]
    units: Option<String>,
}

impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawVariable::deserialize(deserializer)?;
        let variable = match raw.kind.as_str() {
            "text" => Variable::Text {
                default: raw.default,
            },
            "color" => Variable::Color {
                default: raw.default,
            },
            "checkbox" => Variable::Checkbox {
                default: raw.default,
            },
            "select" | "dropdown" | "image" => {
                let options = raw.options.ok_or_else(|| {
                    de::Error::custom(format!(
                        "variable type '{}' requires an options list",
                        raw.kind
                    ))
                })?;
                Variable::Select {
                    default: raw.default,
                    options,
                }
            }
            "number" | "range" => Variable::Number {
                default: raw.default,
                units: raw.units,
            },
            _ => Variable::Other {
                default: raw.default,
            },
        };
        Ok(variable)
    }
}

impl Variable {
    /// Returns the raw default string of this variable.
    pub fn default_value(&self) -> &str {
        match self {
            Variable::Text { default }
            | Variable::Color { default }
            | Variable::Checkbox { default }
            | Variable::Select { default, .. }
            | Variable::Number { default, .. }
            | Variable::Other { default } => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_text_variable() {
        let v: Variable = serde_json::from_str(r#"{"type":"text","default":"serif"}"#).unwrap();
        assert_eq!(
            v,
            Variable::Text {
                default: "serif".into()
            }
        );
    }

    #[test]
    fn test_dropdown_and_image_map_to_select() {
        let json = r#"{
            "type": "dropdown",
            "default": "a",
            "options": [{"name": "a", "label": "A", "value": "1px"}]
        }"#;
        let v: Variable = serde_json::from_str(json).unwrap();
        assert!(matches!(v, Variable::Select { .. }));

        let json = json.replace("dropdown", "image");
        let v: Variable = serde_json::from_str(&json).unwrap();
        assert!(matches!(v, Variable::Select { .. }));
    }

    #[test]
    fn test_select_without_options_is_rejected() {
        let result: Result<Variable, _> =
            serde_json::from_str(r#"{"type":"select","default":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_maps_to_number() {
        let v: Variable =
            serde_json::from_str(r#"{"type":"range","default":"10","units":"px"}"#).unwrap();
        assert_eq!(
            v,
            Variable::Number {
                default: "10".into(),
                units: Some("px".into())
            }
        );
    }

    #[test]
    fn test_unknown_type_falls_back_to_other() {
        let v: Variable = serde_json::from_str(r#"{"type":"gradient","default":"x"}"#).unwrap();
        assert_eq!(v, Variable::Other { default: "x".into() });
    }

    #[test]
    fn test_vars_preserve_declaration_order() {
        let meta: Metadata = serde_json::from_str(
            r#"{"vars": {
                "zeta": {"type": "text", "default": "1"},
                "alpha": {"type": "text", "default": "2"},
                "mid": {"type": "text", "default": "3"}
            }}"#,
        )
        .unwrap();
        let names: Vec<&str> = meta.vars.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}
