//! The interactive input requirement record (spec.md §4.4 Ask family,
//! GLOSSARY "Requirement") and its companion value-collection types.
//!
//! A requirement is a superset shape — only the fields relevant to a given
//! Ask variant are populated, matching the spec's own "requirement record
//! carries {…} — a superset covering all Ask variants" language.

use serde_json::Value;

/// The kind of value an Ask requirement is collecting, used by a host to
/// pick a UI widget and to parse/validate the supplied answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequirementKind {
    Text,
    Number,
    Select,
    MultiSelect,
    Confirm,
    Editor,
    File,
    Path,
    Date,
    Secret,
    Choice,
    Rating,
    ReviewFile,
}

impl RequirementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequirementKind::Text => "text",
            RequirementKind::Number => "number",
            RequirementKind::Select => "select",
            RequirementKind::MultiSelect => "multiSelect",
            RequirementKind::Confirm => "confirm",
            RequirementKind::Editor => "editor",
            RequirementKind::File => "file",
            RequirementKind::Path => "path",
            RequirementKind::Date => "date",
            RequirementKind::Secret => "secret",
            RequirementKind::Choice => "choice",
            RequirementKind::Rating => "rating",
            RequirementKind::ReviewFile => "reviewFile",
        }
    }
}

/// One labeled choice, used by `Select`/`MultiSelect`/`Choice`/`Rating`.
#[derive(Clone, Debug, PartialEq)]
pub struct RequirementOption {
    pub value: Value,
    pub label: String,
}

/// An interactive input requirement, produced by an Ask component for the
/// input iterator and satisfied by the host (spec.md §4.4, §4.5).
#[derive(Clone, Debug, PartialEq)]
pub struct Requirement {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub kind: RequirementKind,
    pub required: bool,
    pub default: Option<Value>,
    pub options: Vec<RequirementOption>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub extensions: Vec<String>,
    pub multiple: bool,
    pub must_exist: bool,
    pub must_be_directory: bool,
    pub include_time: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub masked: bool,
    pub language: Option<String>,
    pub labels: Vec<String>,
}

impl Requirement {
    /// Builds the minimal requirement shape; variant constructors
    /// (`ask::text`, `ask::select`, …) fill in the rest via `..`.
    pub fn new(name: impl Into<String>, kind: RequirementKind) -> Self {
        Requirement {
            name: name.into(),
            label: None,
            description: None,
            kind,
            required: false,
            default: None,
            options: Vec::new(),
            min: None,
            max: None,
            extensions: Vec::new(),
            multiple: false,
            must_exist: false,
            must_be_directory: false,
            include_time: false,
            min_date: None,
            max_date: None,
            masked: kind == RequirementKind::Secret,
            language: None,
            labels: Vec::new(),
        }
    }
}
