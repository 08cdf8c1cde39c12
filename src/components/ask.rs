//! The Ask family (spec.md §4.4 "Ask family (interactive inputs)"):
//! `Text`, `Number`, `Select`, `Confirm`, `Editor`, `MultiSelect`, `File`,
//! `Path`, `Date`, `Secret`, `Choice`, `Rating`, `ReviewFile`.
//!
//! Every variant does two things: it exposes an [`Requirement`] via
//! `Component::requirement` for the input iterator (spec.md §4.5), and it
//! renders the already-resolved value at render time (spec.md §4.4 "Common
//! behavior"). `Component::requirement` only receives `props` (not
//! `children`, see DESIGN.md decision 5), so option/label sources that rely
//! on inline child elements (`Option`, `Label`) are only available to
//! `render`, not to the requirement shape reported to the input iterator —
//! those variants fall back to the `options`/`labels` props there.

use crate::component::{Component, ComponentError};
use crate::context::{Action, SharedContext};
use crate::node::{Node, Props};
use crate::propx::{array_prop, bool_prop_or, num_prop, str_prop, string_list_prop};
use crate::renderer::stringify_value;
use crate::requirement::{Requirement, RequirementKind, RequirementOption};
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

fn base_requirement(props: &Props, kind: RequirementKind) -> Option<Requirement> {
    let name = str_prop(props, "name")?.to_string();
    let mut req = Requirement::new(name, kind);
    req.label = str_prop(props, "label").map(str::to_string);
    req.description = str_prop(props, "description").map(str::to_string);
    req.required = bool_prop_or(props, "required", false);
    req.default = props.get("default").cloned();
    Some(req)
}

/// The generic "look up the input, else default, else placeholder" render
/// rule shared by every Ask variant except `Confirm`/`MultiSelect`/
/// `Select`/`Choice`/`Rating` (spec.md §4.4 Common behavior).
fn generic_value_text(props: &Props, ctx: &SharedContext) -> String {
    let name = str_prop(props, "name").unwrap_or_default();
    if let Some(v) = ctx.input(name) {
        return stringify_value(v);
    }
    if let Some(d) = props.get("default") {
        return stringify_value(d);
    }
    format!("{{{name}}}")
}

/// Resolves `Select`/`MultiSelect`/`Choice`-style options: the `options`
/// prop (a list of bare strings or `{value, label}` objects) merged with
/// any inline `Option` children (whose own label text wins per spec.md
/// §4.4 "child labels win").
fn collect_options(props: &Props, children: &[Node]) -> Vec<RequirementOption> {
    let mut out = Vec::new();
    if let Some(items) = array_prop(props, "options") {
        for item in items {
            match item {
                Value::String(s) => out.push(RequirementOption {
                    value: Value::String(s.clone()),
                    label: s.clone(),
                }),
                Value::Object(obj) => {
                    let value = obj.get("value").cloned().unwrap_or_else(|| item.clone());
                    let label = obj
                        .get("label")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| stringify_value(&value));
                    out.push(RequirementOption { value, label });
                }
                other => out.push(RequirementOption {
                    value: other.clone(),
                    label: stringify_value(other),
                }),
            }
        }
    }
    for child in children {
        if let Node::Element(el) = child {
            if el.type_name() == Some("Option") {
                let value = el
                    .props()
                    .get("value")
                    .cloned()
                    .unwrap_or(Value::String(plain_text(el.children())));
                let text = plain_text(el.children());
                let label = if text.is_empty() { stringify_value(&value) } else { text };
                if let Some(existing) = out.iter_mut().find(|o| o.value == value) {
                    existing.label = label;
                } else {
                    out.push(RequirementOption { value, label });
                }
            }
        }
    }
    out
}

fn plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|n| match n {
            Node::Text(s) => s.clone(),
            Node::Number(n) => n.to_string(),
            _ => String::new(),
        })
        .collect()
}

fn label_for(options: &[RequirementOption], value: &Value) -> Option<String> {
    options.iter().find(|o| &o.value == value).map(|o| o.label.clone())
}

macro_rules! ask_schema {
    ($schema_static:ident, $component:expr, $extra:expr) => {
        static $schema_static: Schema = Schema {
            component: $component,
            props: $extra,
        };
    };
}

const COMMON_PROPS: &[PropSpec] = &[
    PropSpec::required("name", PropKind::String),
    PropSpec::optional("label", PropKind::String),
    PropSpec::optional("description", PropKind::String),
    PropSpec::optional("default", PropKind::Any),
    PropSpec::optional("required", PropKind::Bool),
];

// -------------------------------------------------------------------- Text

pub struct Text;
ask_schema!(ASK_TEXT_SCHEMA, "Ask.Text", COMMON_PROPS);

#[async_trait(?Send)]
impl Component for Text {
    fn schema(&self) -> &'static Schema {
        &ASK_TEXT_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        base_requirement(props, RequirementKind::Text)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// ------------------------------------------------------------------ Number

pub struct Number;

static ASK_NUMBER_SCHEMA: Schema = Schema {
    component: "Ask.Number",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Number),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("min", PropKind::Number),
        PropSpec::optional("max", PropKind::Number),
    ],
};

#[async_trait(?Send)]
impl Component for Number {
    fn schema(&self) -> &'static Schema {
        &ASK_NUMBER_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Number)?;
        req.min = num_prop(props, "min");
        req.max = num_prop(props, "max");
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// ------------------------------------------------------------------ Select

pub struct Select;

static ASK_SELECT_SCHEMA: Schema = Schema {
    component: "Ask.Select",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Any),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("options", PropKind::Array),
    ],
};

#[async_trait(?Send)]
impl Component for Select {
    fn schema(&self) -> &'static Schema {
        &ASK_SELECT_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Select)?;
        req.options = collect_options(props, &[]);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let options = collect_options(props, children);
        let value = ctx.input(name).cloned().or_else(|| props.get("default").cloned());
        let text = match value {
            Some(v) => label_for(&options, &v).unwrap_or_else(|| stringify_value(&v)),
            None => format!("{{{name}}}"),
        };
        Ok(Node::text(text))
    }
}

// ----------------------------------------------------------------- Confirm

pub struct Confirm;
ask_schema!(
    ASK_CONFIRM_SCHEMA,
    "Ask.Confirm",
    &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Bool),
        PropSpec::optional("required", PropKind::Bool),
    ]
);

#[async_trait(?Send)]
impl Component for Confirm {
    fn schema(&self) -> &'static Schema {
        &ASK_CONFIRM_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        base_requirement(props, RequirementKind::Confirm)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let value = ctx
            .input(name)
            .and_then(Value::as_bool)
            .or_else(|| props.get("default").and_then(Value::as_bool))
            .unwrap_or(false);
        Ok(Node::text(if value { "Yes" } else { "No" }))
    }
}

// ------------------------------------------------------------------ Editor

pub struct Editor;

static ASK_EDITOR_SCHEMA: Schema = Schema {
    component: "Ask.Editor",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::String),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("language", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for Editor {
    fn schema(&self) -> &'static Schema {
        &ASK_EDITOR_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Editor)?;
        req.language = str_prop(props, "language").map(str::to_string);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// -------------------------------------------------------------- MultiSelect

pub struct MultiSelect;

static ASK_MULTI_SELECT_SCHEMA: Schema = Schema {
    component: "Ask.MultiSelect",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Array),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("options", PropKind::Array),
    ],
};

#[async_trait(?Send)]
impl Component for MultiSelect {
    fn schema(&self) -> &'static Schema {
        &ASK_MULTI_SELECT_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::MultiSelect)?;
        req.multiple = true;
        req.options = collect_options(props, &[]);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let options = collect_options(props, children);
        let selected = ctx
            .input(name)
            .and_then(Value::as_array)
            .cloned()
            .or_else(|| array_prop(props, "default").cloned());
        let text = match selected {
            Some(values) => values
                .iter()
                .map(|v| label_for(&options, v).unwrap_or_else(|| stringify_value(v)))
                .collect::<Vec<_>>()
                .join(", "),
            None => format!("{{{name}}}"),
        };
        Ok(Node::text(text))
    }
}

// -------------------------------------------------------------------- File

pub struct File;

static ASK_FILE_SCHEMA: Schema = Schema {
    component: "Ask.File",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::String),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("mustExist", PropKind::Bool),
        PropSpec::optional("extensions", PropKind::Array),
    ],
};

#[async_trait(?Send)]
impl Component for File {
    fn schema(&self) -> &'static Schema {
        &ASK_FILE_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::File)?;
        req.must_exist = bool_prop_or(props, "mustExist", false);
        req.extensions = string_list_prop(props, "extensions");
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// -------------------------------------------------------------------- Path

pub struct Path;

static ASK_PATH_SCHEMA: Schema = Schema {
    component: "Ask.Path",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::String),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("mustExist", PropKind::Bool),
        PropSpec::optional("mustBeDirectory", PropKind::Bool),
    ],
};

#[async_trait(?Send)]
impl Component for Path {
    fn schema(&self) -> &'static Schema {
        &ASK_PATH_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Path)?;
        req.must_exist = bool_prop_or(props, "mustExist", false);
        req.must_be_directory = bool_prop_or(props, "mustBeDirectory", false);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// -------------------------------------------------------------------- Date

pub struct Date;

static ASK_DATE_SCHEMA: Schema = Schema {
    component: "Ask.Date",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::String),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("includeTime", PropKind::Bool),
        PropSpec::optional("minDate", PropKind::String),
        PropSpec::optional("maxDate", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for Date {
    fn schema(&self) -> &'static Schema {
        &ASK_DATE_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Date)?;
        req.include_time = bool_prop_or(props, "includeTime", false);
        req.min_date = str_prop(props, "minDate").map(str::to_string);
        req.max_date = str_prop(props, "maxDate").map(str::to_string);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// ------------------------------------------------------------------ Secret

pub struct Secret;
ask_schema!(ASK_SECRET_SCHEMA, "Ask.Secret", COMMON_PROPS);

#[async_trait(?Send)]
impl Component for Secret {
    fn schema(&self) -> &'static Schema {
        &ASK_SECRET_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        base_requirement(props, RequirementKind::Secret)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::text(generic_value_text(props, ctx)))
    }
}

// ------------------------------------------------------------------ Choice

pub struct Choice;

static ASK_CHOICE_SCHEMA: Schema = Schema {
    component: "Ask.Choice",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Any),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::required("options", PropKind::Array),
    ],
};

#[async_trait(?Send)]
impl Component for Choice {
    fn schema(&self) -> &'static Schema {
        &ASK_CHOICE_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Choice)?;
        req.options = collect_options(props, &[]);
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let options = collect_options(props, children);
        let value = ctx.input(name).cloned().or_else(|| props.get("default").cloned());
        let text = match value {
            Some(v) => label_for(&options, &v).unwrap_or_else(|| stringify_value(&v)),
            None => format!("{{{name}}}"),
        };
        Ok(Node::text(text))
    }
}

// ------------------------------------------------------------------ Rating

pub struct Rating;

static ASK_RATING_SCHEMA: Schema = Schema {
    component: "Ask.Rating",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::Number),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("min", PropKind::Number),
        PropSpec::optional("max", PropKind::Number),
        PropSpec::optional("labels", PropKind::Array),
    ],
};

#[async_trait(?Send)]
impl Component for Rating {
    fn schema(&self) -> &'static Schema {
        &ASK_RATING_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        let mut req = base_requirement(props, RequirementKind::Rating)?;
        req.min = num_prop(props, "min");
        req.max = num_prop(props, "max");
        req.labels = string_list_prop(props, "labels");
        Some(req)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let value = ctx
            .input(name)
            .and_then(Value::as_f64)
            .or_else(|| num_prop(props, "default"));
        let Some(value) = value else {
            return Ok(Node::text(format!("{{{name}}}")));
        };
        let labels = rating_labels(props, children);
        let min = num_prop(props, "min").unwrap_or(0.0);
        let index = (value - min).round() as usize;
        let text = labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| stringify_value(&Value::from(value)));
        Ok(Node::text(text))
    }
}

/// `labels` prop entries, falling back to inline `Label` children in
/// position order (spec.md §4.4 Rating: "per-value labels from `Label`
/// children or `labels` prop").
fn rating_labels(props: &Props, children: &[Node]) -> Vec<String> {
    let from_prop = string_list_prop(props, "labels");
    if !from_prop.is_empty() {
        return from_prop;
    }
    children
        .iter()
        .filter_map(|n| match n {
            Node::Element(el) if el.type_name() == Some("Label") => Some(plain_text(el.children())),
            _ => None,
        })
        .collect()
}

// -------------------------------------------------------------- ReviewFile

/// The Ask-family `ReviewFile` variant: an interactive file-selection input
/// that, once resolved, also records a `reviewFile` post-execution action —
/// distinct from the static `ReviewFile` descendant registered under
/// `PostExecution` (spec.md §4.4 Post-execution), which takes its file path
/// from a literal prop rather than a collected input.
pub struct ReviewFile;

static ASK_REVIEW_FILE_SCHEMA: Schema = Schema {
    component: "Ask.ReviewFile",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("label", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("default", PropKind::String),
        PropSpec::optional("required", PropKind::Bool),
        PropSpec::optional("editor", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for ReviewFile {
    fn schema(&self) -> &'static Schema {
        &ASK_REVIEW_FILE_SCHEMA
    }

    fn hoist_name(&self) -> bool {
        true
    }

    fn requirement(&self, props: &Props) -> Option<Requirement> {
        base_requirement(props, RequirementKind::ReviewFile)
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let name = str_prop(props, "name").unwrap_or_default();
        let file = ctx
            .input(name)
            .and_then(Value::as_str)
            .or_else(|| str_prop(props, "default"))
            .map(str::to_string);
        if let Some(file) = file.clone() {
            ctx.push_action(Action::ReviewFile {
                file,
                editor: str_prop(props, "editor").map(str::to_string),
            });
        }
        Ok(Node::text(file.unwrap_or_else(|| format!("{{{name}}}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Environment, RenderContext};
    use serde_json::{json, Map};

    #[tokio::test]
    async fn unresolved_text_renders_placeholder() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let mut props = Props::new();
        props.insert("name".to_string(), json!("u"));
        let node = Text.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert_eq!(s, "{u}"),
            _ => panic!("expected text"),
        }
    }

    #[tokio::test]
    async fn default_is_used_when_input_absent() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let mut props = Props::new();
        props.insert("name".to_string(), json!("u"));
        props.insert("default".to_string(), json!("world"));
        let node = Text.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert_eq!(s, "world"),
            _ => panic!("expected text"),
        }
    }

    #[tokio::test]
    async fn input_wins_over_default() {
        let mut inputs = Map::new();
        inputs.insert("u".to_string(), json!("alice"));
        let ctx = RenderContext::new(inputs, Environment::default());
        let mut props = Props::new();
        props.insert("name".to_string(), json!("u"));
        props.insert("default".to_string(), json!("world"));
        let node = Text.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert_eq!(s, "alice"),
            _ => panic!("expected text"),
        }
    }

    #[tokio::test]
    async fn confirm_renders_no_when_absent() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let mut props = Props::new();
        props.insert("name".to_string(), json!("ok"));
        let node = Confirm.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert_eq!(s, "No"),
            _ => panic!("expected text"),
        }
    }

    #[tokio::test]
    async fn review_file_pushes_post_execution_action() {
        let mut inputs = Map::new();
        inputs.insert("target".to_string(), json!("./out.ts"));
        let ctx = RenderContext::new(inputs, Environment::default());
        let mut props = Props::new();
        props.insert("name".to_string(), json!("target"));
        ReviewFile.render(&props, None, &[], &ctx).await.unwrap();
        let (actions, _) = ctx.drain();
        assert_eq!(
            actions,
            vec![Action::ReviewFile {
                file: "./out.ts".to_string(),
                editor: None
            }]
        );
    }
}
