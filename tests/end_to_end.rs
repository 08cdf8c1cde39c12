//! End-to-end scenarios from spec.md §8 ("End-to-end scenarios" S1-S6 and
//! the failure scenarios), driven entirely through the crate's public
//! surface (`create_prompt_from_source_default` + `render`).

use promptweave::{create_prompt_from_source, create_prompt_from_source_default, render, RenderOptions};
use promptweave::component::{builtin_registry, Component, ComponentError, DEFAULT_REGISTRY};
use promptweave::context::{Environment, Provider, SharedContext};
use promptweave::error::ErrorCode;
use promptweave::node::{Node, Props};
use promptweave::schema::{PropKind, PropSpec, Schema};
use serde_json::{json, Map, Value};

async fn render_source(source: &str, inputs: Map<String, serde_json::Value>, env: Environment) -> promptweave::RenderResult {
    let element = create_prompt_from_source_default(source, "test.prompt").unwrap();
    let options = RenderOptions { inputs, env, trim: true };
    render(&element, options, &DEFAULT_REGISTRY).await
}

// S1: basic prompt with defaults
#[tokio::test]
async fn s1_basic_prompt_with_defaults() {
    let mut env = Environment::default();
    env.provider = Provider::Openai;
    let result = render_source(
        r#"<Prompt name="t"><Task verb="summarize" /></Prompt>"#,
        Map::new(),
        env,
    )
    .await;

    assert!(result.text.contains("<role>"));
    assert!(result.text.contains("You are a helpful Assistant."));
    assert!(result.text.contains("<task>"));
    assert!(result.text.contains("summarize"));
    assert!(result.text.contains("Output format: markdown"));
    assert!(result.text.contains("<constraints>"));
    assert!(result.text.contains("concise"));
    assert!(result.ok);
    assert!(result.errors.iter().all(|e| e.code.is_warning()));
}

// S2: bare mode
#[tokio::test]
async fn s2_bare_mode_renders_only_children() {
    let result = render_source(
        r#"<Prompt name="t" bare><Task verb="summarize" /></Prompt>"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert_eq!(result.text, "<task>\nsummarize\n</task>".trim());
}

// S3: Steps with Fragment
#[tokio::test]
async fn s3_steps_with_fragment_auto_numbers_across_fragment_boundary() {
    let result = render_source(
        r#"<Steps><><Step>A</Step><Step>B</Step></><Step>C</Step></Steps>"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert!(result.text.contains("1. A\n"));
    assert!(result.text.contains("2. B\n"));
    assert!(result.text.contains("3. C\n"));
    assert!(result.text.contains("<steps>"));
    assert!(result.text.contains("</steps>"));
}

// S4: variable passing via a hoisted Ask default
#[tokio::test]
async fn s4_variable_passing_uses_default_then_input() {
    let source = r#"
const u = <Ask.Text name="u" default="world" />;
export default (
  <Prompt name="greet" bare><Task>hello {u}</Task></Prompt>
);
"#;
    let no_inputs = render_source(source, Map::new(), Environment::default()).await;
    assert!(no_inputs.text.contains("hello world"));

    let mut inputs = Map::new();
    inputs.insert("u".to_string(), json!("alice"));
    let with_input = render_source(source, inputs, Environment::default()).await;
    assert!(with_input.text.contains("hello alice"));
}

// S5: DeferredRef chain — a component resolves an object, and a sibling
// references one of its fields through a member chain (`gh.stars`).
struct UserInfo;

static USER_INFO_SCHEMA: Schema = Schema {
    component: "UserInfo",
    props: &[
        PropSpec::required("username", PropKind::String),
        PropSpec::optional("name", PropKind::String),
    ],
};

#[async_trait::async_trait(?Send)]
impl Component for UserInfo {
    fn schema(&self) -> &'static Schema {
        &USER_INFO_SCHEMA
    }

    async fn resolve(&self, props: &Props, _ctx: &SharedContext) -> Result<Option<Value>, ComponentError> {
        let username = props.get("username").and_then(Value::as_str).unwrap_or_default();
        Ok(Some(json!({
            "displayName": if username == "octocat" { "Octocat" } else { username },
            "stars": 70,
        })))
    }

    async fn render(
        &self,
        _props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::Null)
    }
}

#[tokio::test]
async fn s5_deferred_ref_chain_resolves_a_sibling_components_field() {
    let mut registry = builtin_registry();
    registry.insert("UserInfo", Box::new(UserInfo) as Box<dyn Component + Send + Sync>);

    let source = r#"
const gh = <UserInfo username="octocat" name="gh" />;
export default (
  <Prompt name="p" bare>{gh}<Task>Stars: {gh.stars}</Task></Prompt>
);
"#;
    let element = create_prompt_from_source(source, "test.prompt", &registry).unwrap();
    let options = RenderOptions { inputs: Map::new(), env: Environment::default(), trim: true };
    let result = render(&element, options, &registry).await;
    assert!(result.text.contains("Stars: 70"));
    assert!(result.ok);
}

// S6: post-execution collection
#[tokio::test]
async fn s6_post_execution_collects_actions_and_renders_no_text() {
    let result = render_source(
        r#"<PostExecution><ReviewFile file="./out.ts" /><RunCommand command="npm test" /></PostExecution>"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert_eq!(result.text, "");
    assert_eq!(result.post_execution.len(), 2);
    match &result.post_execution[0] {
        promptweave::context::Action::ReviewFile { file, .. } => assert_eq!(file, "./out.ts"),
        other => panic!("expected reviewFile, got {other:?}"),
    }
    match &result.post_execution[1] {
        promptweave::context::Action::RunCommand { command, .. } => assert_eq!(command, "npm test"),
        other => panic!("expected runCommand, got {other:?}"),
    }
}

// Boundary behaviors
#[tokio::test]
async fn for_each_over_empty_items_renders_empty() {
    let result = render_source(
        r#"<ForEach items={[]} />"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert_eq!(result.text, "");
}

#[tokio::test]
async fn if_true_with_no_children_renders_empty() {
    let result = render_source(r#"<If when={true} />"#, Map::new(), Environment::default()).await;
    assert_eq!(result.text, "");
}

#[tokio::test]
async fn if_formula_gates_on_inputs() {
    let source = r#"<If when='=AND(a>5,b="x")'><Task verb="go" /></If>"#;
    let mut inputs = Map::new();
    inputs.insert("a".to_string(), json!(6));
    inputs.insert("b".to_string(), json!("x"));
    let matched = render_source(source, inputs.clone(), Environment::default()).await;
    assert!(matched.text.contains("go"));

    inputs.insert("a".to_string(), json!(1));
    let unmatched = render_source(source, inputs, Environment::default()).await;
    assert!(!unmatched.text.contains("go"));
}

#[tokio::test]
async fn if_provider_list_gates_on_environment() {
    let source = r#"<If provider={["anthropic", "google"]}><Task verb="go" /></If>"#;
    let mut env = Environment::default();
    env.provider = Provider::Anthropic;
    let matched = render_source(source, Map::new(), env).await;
    assert!(matched.text.contains("go"));

    let mut env2 = Environment::default();
    env2.provider = Provider::Openai;
    let unmatched = render_source(source, Map::new(), env2).await;
    assert!(!unmatched.text.contains("go"));
}

// Failure scenarios
#[tokio::test]
async fn unknown_component_yields_missing_schema_and_still_renders_children() {
    let result = render_source(r#"<TotallyMadeUp>hi</TotallyMadeUp>"#, Map::new(), Environment::default()).await;
    assert_eq!(result.text, "hi");
    assert!(!result.ok);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::MissingSchema));
}

#[tokio::test]
async fn invalid_delimiter_value_falls_back_to_children_with_prop_validation_error() {
    let result = render_source(
        r#"<Section name="x" delimiter="invalid">body</Section>"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert_eq!(result.text, "body");
    assert!(!result.ok);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::PropValidation && e.prop.as_deref() == Some("delimiter")));
}

#[tokio::test]
async fn if_when_integer_is_a_validation_error_and_omits_children() {
    let result = render_source(r#"<If when={42}><Task verb="go" /></If>"#, Map::new(), Environment::default()).await;
    assert!(!result.ok);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::PropValidation && e.prop.as_deref() == Some("when")));
    assert!(!result.text.contains("go"));
}

#[tokio::test]
async fn missing_task_in_prompt_is_a_non_fatal_warning() {
    let result = render_source(
        r#"<Prompt name="t"><Section name="notes">just notes</Section></Prompt>"#,
        Map::new(),
        Environment::default(),
    )
    .await;
    assert!(result.ok);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::WarnMissingTask));
}
