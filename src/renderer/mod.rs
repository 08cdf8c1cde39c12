//! The recursive async render walk (spec.md §4.3, §5).
//!
//! A single-threaded executor, `Rc<RefCell<_>>` shared state, and
//! `futures::join_all` over sibling futures are enough: no component ever
//! needs a second thread, so the whole walk stays free of `Send`/`Sync`
//! bounds and mutex overhead. Async recursion needs an explicit
//! `Pin<Box<dyn Future>>` trampoline since `async fn` can't call itself
//! directly.

use crate::component::ComponentRegistry;
use crate::context::{Action, Environment, RenderContext, RenderIssue, SharedContext};
use crate::deferred::DeferredRef;
use crate::error::ErrorCode;
use crate::node::{Element, ElementType, Node};
use futures::future::join_all;
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Inputs to a single render pass (spec.md §4.3 `options`).
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub inputs: Map<String, Value>,
    pub env: Environment,
    pub trim: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            inputs: Map::new(),
            env: Environment::default(),
            trim: true,
        }
    }
}

/// The stable render-result wire shape (spec.md §6).
#[derive(Clone, Debug)]
pub struct RenderResult {
    pub ok: bool,
    pub text: String,
    pub errors: Vec<RenderIssue>,
    pub post_execution: Vec<Action>,
}

/// Renders `element` to text against `registry`, collecting diagnostics and
/// post-execution actions along the way (spec.md §4.3).
///
/// Never returns an `Err`: every failure mode the walk encounters is
/// recorded as a [`RenderIssue`] and the offending subtree falls back to
/// rendering its children (spec.md §4.7) — the only way this function's
/// caller observes failure is `result.ok == false`.
#[tracing::instrument(name = "render_prompt", skip_all)]
pub async fn render(
    element: &Element,
    options: RenderOptions,
    registry: &ComponentRegistry,
) -> RenderResult {
    let ctx = RenderContext::new(options.inputs, options.env);
    let mut text = render_element(element, &ctx, registry).await;
    if options.trim {
        text = text.trim().to_string();
    }
    let (post_execution, errors) = ctx.drain();
    let ok = !errors.iter().any(|issue| !issue.code.is_warning());
    if !ok {
        tracing::warn!(error_count = errors.len(), "render completed with diagnostics");
    }
    RenderResult {
        ok,
        text,
        errors,
        post_execution,
    }
}

/// Renders any child node (spec.md §3 node kinds), boxed so it can recurse
/// through `render_element`/`render_children` without `async fn` self-
/// recursion (which the compiler rejects — the future's size would be
/// infinite).
fn render_node<'a>(
    node: &'a Node,
    ctx: &'a SharedContext,
    registry: &'a ComponentRegistry,
) -> Pin<Box<dyn Future<Output = String> + 'a>> {
    Box::pin(async move {
        match node {
            Node::Text(s) => s.clone(),
            Node::Number(n) => format_number(*n),
            Node::Bool(_) => String::new(),
            Node::Null => String::new(),
            Node::Ref(r) => resolve_deferred(r, ctx),
            Node::List(items) => render_children(items, ctx, registry).await,
            Node::Element(e) => render_element(e, ctx, registry).await,
        }
    })
}

/// Renders a sequence of nodes **concurrently** (spec.md §4.3 step 2,
/// §5 "child rendering issues a concurrent join over deferred child
/// renders"), concatenating in original source order regardless of which
/// sibling finishes first.
async fn render_children(nodes: &[Node], ctx: &SharedContext, registry: &ComponentRegistry) -> String {
    let futures = nodes.iter().map(|n| render_node(n, ctx, registry));
    join_all(futures).await.concat()
}

async fn render_element(element: &Element, ctx: &SharedContext, registry: &ComponentRegistry) -> String {
    match element.ty() {
        ElementType::Fragment => render_children(element.children(), ctx, registry).await,
        ElementType::Component(name) | ElementType::Unknown(name) => {
            match registry.get(name.as_str()) {
                None => {
                    tracing::warn!(component = name.as_str(), "unknown component, falling back to children");
                    ctx.push_issue(RenderIssue::new(
                        name.as_str(),
                        None,
                        ErrorCode::MissingSchema,
                        format!("unknown component: {name}"),
                    ));
                    render_children(element.children(), ctx, registry).await
                }
                Some(component) => {
                    render_known_component(name, component.as_ref(), element, ctx, registry).await
                }
            }
        }
    }
}

async fn render_known_component(
    name: &str,
    component: &(dyn crate::component::Component),
    element: &Element,
    ctx: &SharedContext,
    registry: &ComponentRegistry,
) -> String {
    let props = element.props();

    let issues = component.schema().validate(name, props);
    if !issues.is_empty() {
        tracing::warn!(component = name, issue_count = issues.len(), "prop validation failed");
        for issue in issues {
            ctx.push_issue(issue);
        }
        return render_children(element.children(), ctx, registry).await;
    }

    let resolved = match component.resolve(props, ctx).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(component = name, error = %e, "resolve failed");
            ctx.push_issue(RenderIssue::new(name, None, ErrorCode::RuntimeError, e.to_string()));
            return render_children(element.children(), ctx, registry).await;
        }
    };

    if let Some(v) = &resolved {
        ctx.set_resolved(element.id(), v.clone());
    }
    if component.hoist_name() {
        if let Some(hoisted) = props.get("name").and_then(Value::as_str) {
            ctx.hoist(hoisted, element.id());
        }
    }

    let rendered = match component.render(props, resolved.as_ref(), element.children(), ctx).await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(component = name, error = %e, "render failed");
            ctx.push_issue(RenderIssue::new(name, None, ErrorCode::RuntimeError, e.to_string()));
            return render_children(element.children(), ctx, registry).await;
        }
    };

    render_node(&rendered, ctx, registry).await
}

/// Resolves a `DeferredRef` against its target's memoized resolved value
/// (spec.md §3). A target that hasn't resolved yet, or a path segment that
/// doesn't exist on the resolved value, yields an empty string rather than
/// an error — the spec treats DeferredRef resolution as silent-fails-empty,
/// reserving `runtime_error`/`prop_validation` for component-level failures.
fn resolve_deferred(r: &DeferredRef, ctx: &SharedContext) -> String {
    let Some(root) = ctx.resolved(r.target()) else {
        return String::new();
    };
    let mut cur = root;
    for key in r.path() {
        cur = match cur.get(key) {
            Some(v) => v.clone(),
            None => return String::new(),
        };
    }
    stringify_value(&cur)
}

/// Stringifies a resolved value for substitution into text (used by
/// `DeferredRef` resolution and by the Ask family's own rendering).
/// Composite values fall back to their JSON form rather than silently
/// dropping data.
pub fn stringify_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentRegistry};
    use crate::factory::{fragment, jsx};
    use crate::node::{Node, Props};
    use crate::schema::Schema;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    static ECHO_SCHEMA: Schema = Schema {
        component: "Echo",
        props: &[],
    };

    #[async_trait(?Send)]
    impl Component for Echo {
        fn schema(&self) -> &'static Schema {
            &ECHO_SCHEMA
        }

        async fn render(
            &self,
            _props: &crate::node::Props,
            _resolved: Option<&Value>,
            children: &[Node],
            _ctx: &SharedContext,
        ) -> Result<Node, crate::component::ComponentError> {
            // Components return a still-unrendered node tree; the central
            // walk (not the component) recurses into `children`.
            Ok(Node::List(vec![
                Node::text("["),
                Node::List(children.to_vec()),
                Node::text("]"),
            ]))
        }
    }

    fn registry_with_echo() -> ComponentRegistry {
        let mut reg: ComponentRegistry = ComponentRegistry::new();
        reg.insert("Echo", Box::new(Echo) as Box<dyn Component + Send + Sync>);
        reg
    }

    #[tokio::test]
    async fn fragment_renders_children_concatenated() {
        let frag = fragment(vec![Node::text("a"), Node::text("b")]);
        let result = render(&frag, RenderOptions::default(), &ComponentRegistry::new()).await;
        assert_eq!(result.text, "ab");
        assert!(result.ok);
    }

    #[tokio::test]
    async fn unknown_component_falls_back_to_children() {
        let el = jsx("NotRegistered", Props::new(), vec![Node::text("hi")]).unwrap();
        let result = render(&el, RenderOptions::default(), &ComponentRegistry::new()).await;
        assert_eq!(result.text, "hi");
        assert!(!result.ok);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::MissingSchema);
    }

    #[tokio::test]
    async fn known_component_renders_via_its_render_method() {
        let el = jsx("Echo", Props::new(), vec![Node::text("x")]).unwrap();
        let registry = registry_with_echo();
        let result = render(&el, RenderOptions::default(), &registry).await;
        assert_eq!(result.text, "[x]");
        assert!(result.ok);
    }

    #[tokio::test]
    async fn deferred_ref_resolves_to_empty_when_target_unresolved() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let target = crate::node::ElementId::fresh();
        let r = DeferredRef::new(target, vec!["stars".to_string()]);
        assert_eq!(resolve_deferred(&r, &ctx), "");
        ctx.set_resolved(target, json!({"stars": 70}));
        assert_eq!(resolve_deferred(&r, &ctx), "70");
    }
}
