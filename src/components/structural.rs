//! Structural composition (spec.md §4.4 "Structural composition" table):
//! `Prompt`, `Section`, `Role`, `Task`, `Constraint`, the `Constraints`/
//! `Contexts`/`EdgeCases`/`Guardrails`/`References` containers, `Format`,
//! `SuccessCriteria`/`Criterion`, and `Tone`/`Style`/`Audience`.

use crate::childsearch;
use crate::component::{Component, ComponentError};
use crate::context::{PromptDefaults, RenderIssue, SharedContext};
use crate::delimiter::{wrap_node_with_delimiter, Delimiter};
use crate::error::ErrorCode;
use crate::factory::jsx;
use crate::node::{Node, Props};
use crate::presets;
use crate::propx::{array_prop, bool_prop_or, object_prop, str_prop, string_list_prop};
use crate::provider;
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

fn delimiter_of(props: &Props) -> Delimiter {
    Delimiter::parse(str_prop(props, "delimiter"))
}

// ---------------------------------------------------------------- Prompt

pub struct Prompt;

static PROMPT_SCHEMA: Schema = Schema {
    component: "Prompt",
    props: &[
        PropSpec::required("name", PropKind::String),
        PropSpec::optional("bare", PropKind::Bool),
        PropSpec::optional("defaults", PropKind::Any),
        PropSpec::optional("noRole", PropKind::Bool),
        PropSpec::optional("noFormat", PropKind::Bool),
        PropSpec::optional("noConstraints", PropKind::Bool),
        PropSpec::optional("noSuccessCriteria", PropKind::Bool),
        PropSpec::optional("noGuardrails", PropKind::Bool),
        PropSpec::optional("role", PropKind::String),
        PropSpec::optional("expertise", PropKind::String),
        PropSpec::optional("slots", PropKind::Object),
        PropSpec::optional("version", PropKind::String),
        PropSpec::optional("description", PropKind::String),
        PropSpec::optional("tags", PropKind::Array),
    ],
};

fn effective_defaults(props: &Props, base: PromptDefaults) -> PromptDefaults {
    let mut out = base;
    if let Some(obj) = object_prop(props, "defaults") {
        if let Some(b) = obj.get("role").and_then(Value::as_bool) {
            out.include_role = b;
        }
        if let Some(b) = obj.get("format").and_then(Value::as_bool) {
            out.include_format = b;
        }
        if let Some(b) = obj.get("constraints").and_then(Value::as_bool) {
            out.include_constraints = b;
        }
        if let Some(b) = obj.get("successCriteria").and_then(Value::as_bool) {
            out.include_success_criteria = b;
        }
        if let Some(b) = obj.get("guardrails").and_then(Value::as_bool) {
            out.include_guardrails = b;
        }
    }
    if bool_prop_or(props, "noRole", false) {
        out.include_role = false;
    }
    if bool_prop_or(props, "noFormat", false) {
        out.include_format = false;
    }
    if bool_prop_or(props, "noConstraints", false) {
        out.include_constraints = false;
    }
    if bool_prop_or(props, "noSuccessCriteria", false) {
        out.include_success_criteria = false;
    }
    if bool_prop_or(props, "noGuardrails", false) {
        out.include_guardrails = false;
    }
    out
}

fn slot(props: &Props, key: &str) -> Option<Node> {
    let value = object_prop(props, "slots")?.get(key)?;
    Some(match value {
        Value::String(s) => Node::text(s.clone()),
        other => Node::text(other.to_string()),
    })
}

#[async_trait(?Send)]
impl Component for Prompt {
    fn schema(&self) -> &'static Schema {
        &PROMPT_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        if bool_prop_or(props, "bare", false) || str_prop(props, "defaults") == Some("none") {
            return Ok(Node::List(children.to_vec()));
        }

        let effective = effective_defaults(props, ctx.env.prompt);

        if childsearch::find_first(children, "Task").is_none() {
            ctx.push_issue(RenderIssue::new(
                "Prompt",
                None,
                ErrorCode::WarnMissingTask,
                "no Task descendant found",
            ));
        }
        let format_strict = childsearch::find_first(children, "Format")
            .map(|f| bool_prop_or(f.props(), "strict", false))
            .unwrap_or(false);
        let shows_reasoning = childsearch::find_first(children, "Steps")
            .map(|s| bool_prop_or(s.props(), "showReasoning", false))
            .unwrap_or(false);
        if format_strict && shows_reasoning {
            ctx.push_issue(RenderIssue::new(
                "Prompt",
                None,
                ErrorCode::WarnConflictingInstructions,
                "Format.strict is set while reasoning is shown",
            ));
        }

        let mut sections = Vec::new();

        if effective.include_role && childsearch::find_first(children, "Role").is_none() {
            sections.push(slot(props, "role").unwrap_or_else(|| {
                let mut role_props = Props::new();
                for key in ["role", "expertise", "domain", "experience", "preset", "delimiter"] {
                    if let Some(v) = props.get(key) {
                        role_props.insert(key.to_string(), v.clone());
                    }
                }
                Node::Element(jsx("Role", role_props, Vec::new()).expect("static type name"))
            }));
        }

        sections.push(Node::List(children.to_vec()));

        if effective.include_format && childsearch::find_first(children, "Format").is_none() {
            sections.push(
                slot(props, "format")
                    .unwrap_or_else(|| Node::Element(jsx("Format", Props::new(), Vec::new()).unwrap())),
            );
        }
        if effective.include_constraints && childsearch::find_first(children, "Constraints").is_none() {
            sections.push(
                slot(props, "constraints")
                    .unwrap_or_else(|| Node::Element(jsx("Constraints", Props::new(), Vec::new()).unwrap())),
            );
        }
        if effective.include_success_criteria
            && childsearch::find_first(children, "SuccessCriteria").is_none()
        {
            sections.push(slot(props, "successCriteria").unwrap_or_else(|| {
                Node::Element(jsx("SuccessCriteria", Props::new(), Vec::new()).unwrap())
            }));
        }
        if effective.include_guardrails && childsearch::find_first(children, "Guardrails").is_none() {
            sections.push(
                slot(props, "guardrails")
                    .unwrap_or_else(|| Node::Element(jsx("Guardrails", Props::new(), Vec::new()).unwrap())),
            );
        }

        Ok(Node::List(sections))
    }
}

// ---------------------------------------------------------------- Section

pub struct Section;

static SECTION_SCHEMA: Schema = Schema {
    component: "Section",
    props: &[
        PropSpec::optional("name", PropKind::String),
        PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
    ],
};

#[async_trait(?Send)]
impl Component for Section {
    fn schema(&self) -> &'static Schema {
        &SECTION_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let tag = str_prop(props, "name").unwrap_or("section");
        let delimiter = match str_prop(props, "delimiter") {
            Some(d) => Delimiter::parse(Some(d)),
            None if str_prop(props, "name").is_none() => Delimiter::None,
            None => Delimiter::Xml,
        };
        Ok(wrap_node_with_delimiter(children.to_vec(), tag, delimiter))
    }
}

// ------------------------------------------------------------------- Role

pub struct Role;

static ROLE_SCHEMA: Schema = Schema {
    component: "Role",
    props: &[
        PropSpec::optional("preset", PropKind::String),
        PropSpec::optional("expertise", PropKind::String),
        PropSpec::optional("domain", PropKind::String),
        PropSpec::optional("experience", PropKind::String),
        PropSpec::optional("traits", PropKind::Array),
        PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
    ],
};

fn role_body_text(props: &Props, ctx: &SharedContext) -> String {
    if let Some(preset) = str_prop(props, "preset") {
        return presets::role_preset(preset).unwrap_or(preset).to_string();
    }
    if let Some(expertise) = str_prop(props, "expertise") {
        let mut text = format!("a {expertise} expert");
        if let Some(domain) = str_prop(props, "domain") {
            text.push_str(&format!(" in {domain}"));
        }
        if let Some(experience) = str_prop(props, "experience") {
            text.push_str(&format!(" with {experience} experience"));
        }
        if let Some(traits) = array_prop(props, "traits") {
            let traits: Vec<&str> = traits.iter().filter_map(Value::as_str).collect();
            if !traits.is_empty() {
                text.push_str(&format!(", known for being {}", traits.join(", ")));
            }
        }
        return text;
    }
    format!("a helpful {}", ctx.env.default_role)
}

#[async_trait(?Send)]
impl Component for Role {
    fn schema(&self) -> &'static Schema {
        &ROLE_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let adaptation = provider::adaptation_for(ctx.env.provider);
        let body = if children.is_empty() {
            Node::text(format!("{}{}.", adaptation.role_prefix, role_body_text(props, ctx)))
        } else {
            Node::List(children.to_vec())
        };
        Ok(wrap_node_with_delimiter(vec![body], "role", delimiter_of(props)))
    }
}

// ------------------------------------------------------------------- Task

pub struct Task;

static TASK_SCHEMA: Schema = Schema {
    component: "Task",
    props: &[
        PropSpec::optional("preset", PropKind::String),
        PropSpec::optional("verb", PropKind::String),
        PropSpec::optional("subject", PropKind::String),
        PropSpec::optional("objective", PropKind::String),
        PropSpec::optional("scope", PropKind::String),
        PropSpec::optional("complexity", PropKind::String),
        PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
    ],
};

#[async_trait(?Send)]
impl Component for Task {
    fn schema(&self) -> &'static Schema {
        &TASK_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let body = if !children.is_empty() {
            Node::List(children.to_vec())
        } else if let Some(preset) = str_prop(props, "preset") {
            Node::text(presets::task_preset(preset).unwrap_or(preset).to_string())
        } else {
            let verb = str_prop(props, "verb").unwrap_or("Complete");
            let mut text = match str_prop(props, "subject") {
                Some(subject) => format!("{verb} {subject}"),
                None => verb.to_string(),
            };
            if let Some(objective) = str_prop(props, "objective") {
                text.push_str(&format!(" in order to {objective}"));
            }
            if let Some(scope) = str_prop(props, "scope") {
                text.push_str(&format!(". Scope: {scope}"));
            }
            if let Some(complexity) = str_prop(props, "complexity") {
                text.push_str(&format!(". Complexity: {complexity}"));
            }
            Node::text(text)
        };
        Ok(wrap_node_with_delimiter(vec![body], "task", delimiter_of(props)))
    }
}

// ------------------------------------------------------------- Constraint

pub struct Constraint;

static CONSTRAINT_SCHEMA: Schema = Schema {
    component: "Constraint",
    props: &[
        PropSpec::optional(
            "type",
            PropKind::StringEnum(&["MUST", "SHOULD", "MAY", "MUST NOT", "SHOULD NOT"]),
        ),
        PropSpec::optional("preset", PropKind::String),
        PropSpec::optional("positive", PropKind::String),
        PropSpec::optional("category", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for Constraint {
    fn schema(&self) -> &'static Schema {
        &CONSTRAINT_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let kind = str_prop(props, "type").unwrap_or("MUST");
        let text = if !children.is_empty() {
            Node::List(children.to_vec())
        } else if let Some(preset) = str_prop(props, "preset") {
            Node::text(presets::constraint_preset(preset).unwrap_or(preset).to_string())
        } else {
            Node::text("")
        };

        let adaptation = provider::adaptation_for(ctx.env.provider);
        let is_negative = kind == "MUST NOT" || kind == "SHOULD NOT";
        let (final_kind, final_body) = if adaptation.constraint_style == provider::ConstraintStyle::Positive
            && is_negative
        {
            match str_prop(props, "positive") {
                Some(positive) => ("MUST", Node::text(positive.to_string())),
                None => (kind, text),
            }
        } else {
            (kind, text)
        };

        Ok(Node::List(vec![
            Node::text(format!("{final_kind}: ")),
            final_body,
            Node::text("\n"),
        ]))
    }
}

// --------------------------------------------------------------- Containers

/// Shared render for the five "bulleted, defaults-aware" containers
/// (spec.md §4.4): own children win; defaults are prepended only when there
/// are no own children, or when `extend=true`.
fn render_container(
    tag: &'static str,
    default_lines: &'static [&'static str],
    props: &Props,
    children: &[Node],
) -> Node {
    let exclude = string_list_prop(props, "exclude");
    let include_defaults = children.is_empty() || bool_prop_or(props, "extend", false);
    let mut body = Vec::new();
    if include_defaults {
        for line in default_lines {
            if exclude.iter().any(|ex| line.to_lowercase().contains(&ex.to_lowercase())) {
                continue;
            }
            body.push(Node::text(format!("{line}\n")));
        }
    }
    body.extend(children.to_vec());
    wrap_node_with_delimiter(body, tag, delimiter_of(props))
}

macro_rules! container_component {
    ($name:ident, $schema_static:ident, $tag:expr, $default_lines:expr, $extra_props:expr) => {
        pub struct $name;

        static $schema_static: Schema = Schema {
            component: stringify!($name),
            props: $extra_props,
        };

        #[async_trait(?Send)]
        impl Component for $name {
            fn schema(&self) -> &'static Schema {
                &$schema_static
            }

            async fn render(
                &self,
                props: &Props,
                _resolved: Option<&Value>,
                children: &[Node],
                _ctx: &SharedContext,
            ) -> Result<Node, ComponentError> {
                Ok(render_container($tag, $default_lines, props, children))
            }
        }
    };
}

static CONTAINER_PROPS: &[PropSpec] = &[
    PropSpec::optional("extend", PropKind::Bool),
    PropSpec::optional("exclude", PropKind::Array),
    PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
];

container_component!(Constraints, CONSTRAINTS_SCHEMA, "constraints", presets::DEFAULT_CONSTRAINTS, CONTAINER_PROPS);
container_component!(Contexts, CONTEXTS_SCHEMA, "contexts", EMPTY_LINES, CONTAINER_PROPS);
container_component!(EdgeCases, EDGE_CASES_SCHEMA, "edge-cases", EMPTY_LINES, CONTAINER_PROPS);

static EMPTY_LINES: &[&str] = &[];

pub struct Guardrails;

static GUARDRAILS_PROPS: &[PropSpec] = &[
    PropSpec::optional("extend", PropKind::Bool),
    PropSpec::optional("exclude", PropKind::Array),
    PropSpec::optional("prohibit", PropKind::Array),
    PropSpec::optional("require", PropKind::Array),
    PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
];

static GUARDRAILS_SCHEMA: Schema = Schema {
    component: "Guardrails",
    props: GUARDRAILS_PROPS,
};

#[async_trait(?Send)]
impl Component for Guardrails {
    fn schema(&self) -> &'static Schema {
        &GUARDRAILS_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let mut extra: Vec<Node> = Vec::new();
        for p in string_list_prop(props, "prohibit") {
            extra.push(Node::text(format!("MUST NOT: {p}\n")));
        }
        for r in string_list_prop(props, "require") {
            extra.push(Node::text(format!("MUST: {r}\n")));
        }
        let mut merged_children = extra;
        merged_children.extend(children.to_vec());
        Ok(render_container(
            "guardrails",
            &["never request or repeat personally identifiable information",
              "never produce content that could cause real-world harm"],
            props,
            &merged_children,
        ))
    }
}

pub struct References;

static REFERENCES_PROPS: &[PropSpec] = &[
    PropSpec::optional("sources", PropKind::Array),
    PropSpec::optional("style", PropKind::String),
    PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
];

static REFERENCES_SCHEMA: Schema = Schema {
    component: "References",
    props: REFERENCES_PROPS,
};

#[async_trait(?Send)]
impl Component for References {
    fn schema(&self) -> &'static Schema {
        &REFERENCES_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let style = str_prop(props, "style").unwrap_or("list");
        let mut body = vec![Node::text(format!("{}\n", presets::reference_style(style)))];
        for source in string_list_prop(props, "sources") {
            body.push(Node::text(format!("- {source}\n")));
        }
        body.extend(children.to_vec());
        Ok(wrap_node_with_delimiter(body, "references", delimiter_of(props)))
    }
}

// -------------------------------------------------------------------- Format

pub struct Format;

static FORMAT_SCHEMA: Schema = Schema {
    component: "Format",
    props: &[
        PropSpec::optional("type", PropKind::String),
        PropSpec::optional("strict", PropKind::Bool),
        PropSpec::optional("schema", PropKind::Any),
        PropSpec::optional("template", PropKind::String),
        PropSpec::optional("example", PropKind::String),
        PropSpec::optional("validate", PropKind::Bool),
        PropSpec::optional("language", PropKind::String),
        PropSpec::optional("minLength", PropKind::Number),
        PropSpec::optional("maxLength", PropKind::Number),
        PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
    ],
};

#[async_trait(?Send)]
impl Component for Format {
    fn schema(&self) -> &'static Schema {
        &FORMAT_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let adaptation = provider::adaptation_for(ctx.env.provider);
        let fmt_type = str_prop(props, "type")
            .map(str::to_string)
            .unwrap_or_else(|| match adaptation.format_preference {
                Delimiter::Xml => "xml".to_string(),
                Delimiter::Markdown => "markdown".to_string(),
                Delimiter::None => "text".to_string(),
            });
        let mut body = vec![Node::text(format!("Output format: {fmt_type}\n"))];
        if let Some(schema) = props.get("schema") {
            body.push(Node::text(format!("Schema: {schema}\n")));
        }
        if let Some(template) = str_prop(props, "template") {
            body.push(Node::text(format!("Template:\n{template}\n")));
        }
        if let Some(example) = str_prop(props, "example") {
            body.push(Node::text(format!("Example:\n{example}\n")));
        }
        if let Some(min) = props.get("minLength").and_then(Value::as_u64) {
            body.push(Node::text(format!("Minimum length: {min}\n")));
        }
        if let Some(max) = props.get("maxLength").and_then(Value::as_u64) {
            body.push(Node::text(format!("Maximum length: {max}\n")));
        }
        body.extend(children.to_vec());
        if bool_prop_or(props, "strict", false) {
            body.push(Node::text("Return ONLY the formatted output, nothing else.\n"));
        }
        Ok(wrap_node_with_delimiter(body, "format", delimiter_of(props)))
    }
}

// -------------------------------------------------------- SuccessCriteria

pub struct SuccessCriteria;

static SUCCESS_CRITERIA_SCHEMA: Schema = Schema {
    component: "SuccessCriteria",
    props: &[
        PropSpec::optional("preset", PropKind::String),
        PropSpec::optional("extend", PropKind::Bool),
        PropSpec::optional("exclude", PropKind::Array),
        PropSpec::optional("delimiter", PropKind::StringEnum(&["xml", "markdown", "none"])),
    ],
};

static DEFAULT_SUCCESS_CRITERIA: &[&str] = &[
    "The output addresses every part of the request",
    "The output is clear and unambiguous",
];

#[async_trait(?Send)]
impl Component for SuccessCriteria {
    fn schema(&self) -> &'static Schema {
        &SUCCESS_CRITERIA_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        if let Some(preset) = str_prop(props, "preset") {
            let line = presets::success_criteria_preset(preset).unwrap_or(preset);
            let mut body = vec![Node::text(format!("- {line}\n"))];
            body.extend(children.to_vec());
            return Ok(wrap_node_with_delimiter(body, "success-criteria", delimiter_of(props)));
        }
        Ok(render_container("success-criteria", DEFAULT_SUCCESS_CRITERIA, props, children))
    }
}

pub struct Criterion;

static CRITERION_SCHEMA: Schema = Schema {
    component: "Criterion",
    props: &[PropSpec::optional("name", PropKind::String), PropSpec::optional("threshold", PropKind::Any)],
};

#[async_trait(?Send)]
impl Component for Criterion {
    fn schema(&self) -> &'static Schema {
        &CRITERION_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let body = if let (Some(name), Some(threshold)) = (str_prop(props, "name"), props.get("threshold")) {
            Node::text(format!("{name}: {threshold}"))
        } else {
            Node::List(children.to_vec())
        };
        Ok(Node::List(vec![Node::text("- "), body, Node::text("\n")]))
    }
}

// ----------------------------------------------------------- Tone/Style/Audience

macro_rules! phrase_component {
    ($name:ident, $schema_static:ident, $tag:expr) => {
        pub struct $name;

        static $schema_static: Schema = Schema {
            component: stringify!($name),
            props: &[PropSpec::optional("value", PropKind::String)],
        };

        #[async_trait(?Send)]
        impl Component for $name {
            fn schema(&self) -> &'static Schema {
                &$schema_static
            }

            async fn render(
                &self,
                props: &Props,
                _resolved: Option<&Value>,
                children: &[Node],
                _ctx: &SharedContext,
            ) -> Result<Node, ComponentError> {
                let body = if !children.is_empty() {
                    Node::List(children.to_vec())
                } else {
                    Node::text(str_prop(props, "value").unwrap_or("neutral").to_string())
                };
                Ok(Node::List(vec![Node::text(concat!($tag, ": ")), body, Node::text("\n")]))
            }
        }
    };
}

phrase_component!(Tone, TONE_SCHEMA, "Tone");
phrase_component!(Style, STYLE_SCHEMA, "Style");
phrase_component!(Audience, AUDIENCE_SCHEMA, "Audience");
