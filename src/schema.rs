//! Component shape schemas and the static schema registry (spec.md §4.2,
//! §9 Design Notes: "treat the component → schema mapping as a small
//! immutable table populated at library init; do not rely on class
//! reflection").

use crate::context::RenderIssue;
use crate::error::ErrorCode;
use crate::node::Props;
use serde_json::Value;

/// The recognized shape of a single prop.
#[derive(Clone, Copy, Debug)]
pub enum PropKind {
    /// Any JSON value is acceptable (most `children`-bearing props).
    Any,
    String,
    Number,
    Bool,
    Array,
    Object,
    /// A string that must be one of the listed values.
    StringEnum(&'static [&'static str]),
    /// A boolean or a formula string starting with `=` (the `If.when` shape,
    /// spec.md §4.2 control-flow table).
    BoolOrFormula,
}

/// One recognized prop in a component's schema.
#[derive(Clone, Copy, Debug)]
pub struct PropSpec {
    pub name: &'static str,
    pub kind: PropKind,
    pub required: bool,
}

impl PropSpec {
    pub const fn optional(name: &'static str, kind: PropKind) -> Self {
        PropSpec {
            name,
            kind,
            required: false,
        }
    }

    pub const fn required(name: &'static str, kind: PropKind) -> Self {
        PropSpec {
            name,
            kind,
            required: true,
        }
    }
}

/// A component's static shape schema: its recognized props.
///
/// Unrecognized prop keys are not an error by themselves (the schema
/// describes *recognized* keys and their constraints, spec.md §3) — only a
/// recognized key with the wrong shape, or a missing required key, fails
/// validation.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    pub component: &'static str,
    pub props: &'static [PropSpec],
}

impl Schema {
    /// Validates `props` (already merged with `children` by the caller,
    /// per spec.md §4.3 step 3) against this schema, returning one
    /// [`RenderIssue`] per offending field.
    pub fn validate(&self, component: &str, props: &Props) -> Vec<RenderIssue> {
        let mut issues = Vec::new();
        for spec in self.props {
            match props.get(spec.name) {
                None => {
                    if spec.required {
                        issues.push(RenderIssue::new(
                            component,
                            Some(spec.name),
                            ErrorCode::PropValidation,
                            format!("missing required prop `{}`", spec.name),
                        ));
                    }
                }
                Some(value) => {
                    if let Some(msg) = mismatch_message(spec.kind, value) {
                        issues.push(RenderIssue::new(
                            component,
                            Some(spec.name),
                            ErrorCode::PropValidation,
                            msg,
                        ));
                    }
                }
            }
        }
        issues
    }
}

fn mismatch_message(kind: PropKind, value: &Value) -> Option<String> {
    let ok = match kind {
        PropKind::Any => true,
        PropKind::String => value.is_string(),
        PropKind::Number => value.is_number(),
        PropKind::Bool => value.is_boolean(),
        PropKind::Array => value.is_array(),
        PropKind::Object => value.is_object(),
        PropKind::StringEnum(variants) => value
            .as_str()
            .map(|s| variants.contains(&s))
            .unwrap_or(false),
        PropKind::BoolOrFormula => {
            value.is_boolean() || value.as_str().is_some()
        }
    };
    if ok {
        None
    } else {
        Some(match kind {
            PropKind::StringEnum(variants) => {
                format!("expected one of {variants:?}, got {value}")
            }
            PropKind::BoolOrFormula => format!("expected a boolean or formula string, got {value}"),
            _ => format!("expected {kind:?}, got {value}"),
        })
    }
}
