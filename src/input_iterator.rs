//! The input-collection walk (spec.md §4.5): a distinct, non-rendering
//! traversal that surfaces one [`Requirement`] at a time, respecting
//! `If`/`ForEach` branching and depending on previously-supplied answers
//! (formulas read from the same `inputs` map being built up).
//!
//! Mirrors the spec's `createInputIterator(element) → { start(), current(),
//! next(value) }` contract (spec.md §6) as an explicit Rust struct rather
//! than a generator, since stepping depends on host-supplied values between
//! calls (a coroutine in the source, a plain step function here).

use crate::component::ComponentRegistry;
use crate::condition::if_holds;
use crate::context::Environment;
use crate::error::PromptError;
use crate::node::{Element, ElementType, Node};
use crate::requirement::Requirement;
use serde_json::{Map, Value};

/// Drives step-at-a-time interactive input collection over an element tree.
pub struct InputIterator<'a> {
    root: &'a Element,
    registry: &'a ComponentRegistry,
    env: Environment,
    inputs: Map<String, Value>,
}

impl<'a> InputIterator<'a> {
    pub fn new(root: &'a Element, registry: &'a ComponentRegistry, env: Environment) -> Self {
        InputIterator {
            root,
            registry,
            env,
            inputs: Map::new(),
        }
    }

    /// Seeds the iterator with already-known input values (e.g. supplied
    /// directly by a non-interactive caller), so only the remaining gaps
    /// are surfaced by `current()`.
    pub fn with_known_inputs(mut self, known: Map<String, Value>) -> Self {
        self.inputs = known;
        self
    }

    /// Present for API parity with spec.md §6's `start()`; the walk has no
    /// separate setup phase, so this simply resets nothing and exists as a
    /// no-op the host can call before the first `current()`.
    pub fn start(&mut self) {}

    /// The next unanswered requirement, or `None` once every Ask-bearing
    /// branch that will actually be taken has a value.
    pub fn current(&self) -> Option<Requirement> {
        find_in_element(self.root, self.registry, &self.env, &self.inputs)
    }

    /// Supplies the value for the requirement `current()` last returned.
    pub fn next(&mut self, value: Value) -> Result<(), PromptError> {
        let Some(req) = self.current() else {
            tracing::warn!("next() called with no pending requirement");
            return Err(PromptError::InputAborted(
                "next() called with no pending requirement".to_string(),
            ));
        };
        tracing::trace!(requirement = %req.name, "collected input");
        self.inputs.insert(req.name, value);
        Ok(())
    }

    /// Aborts collection for the requirement `current()` last returned,
    /// surfacing a `PromptError` the host can propagate (spec.md §4.5
    /// "receive the host-supplied value (or an abort)").
    pub fn abort(&self) -> PromptError {
        let name = self
            .current()
            .map(|r| r.name)
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::warn!(requirement = %name, "input collection aborted");
        PromptError::InputAborted(name)
    }

    /// Whether every reachable Ask requirement has an answer.
    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Consumes the iterator, returning the staging map of collected
    /// inputs (spec.md §4.5 step 3: "store `(name -> value)` into a staging
    /// map").
    pub fn into_inputs(self) -> Map<String, Value> {
        self.inputs
    }
}

fn find_next(
    node: &Node,
    registry: &ComponentRegistry,
    env: &Environment,
    inputs: &Map<String, Value>,
) -> Option<Requirement> {
    match node {
        Node::List(items) => items.iter().find_map(|n| find_next(n, registry, env, inputs)),
        Node::Element(element) => find_in_element(element, registry, env, inputs),
        _ => None,
    }
}

fn find_in_element(
    element: &Element,
    registry: &ComponentRegistry,
    env: &Environment,
    inputs: &Map<String, Value>,
) -> Option<Requirement> {
    match element.ty() {
        ElementType::Fragment => find_in_children(element.children(), registry, env, inputs),
        ElementType::Component(name) | ElementType::Unknown(name) => {
            if name == "If" {
                // Only descend into a branch the render walk will actually
                // take (spec.md §4.5). A malformed `when` just hides the
                // branch from collection; the render walk surfaces the
                // validation error.
                return match if_holds(element.props(), env, inputs) {
                    Ok(true) => find_in_children(element.children(), registry, env, inputs),
                    _ => None,
                };
            }
            if name == "ForEach" {
                // `items` is supplied via props, never via interactive
                // input, and `RenderContext.inputs` is a flat by-name map
                // shared across every iteration — so a single pass over
                // the loop body surfaces every distinct requirement name
                // it can ever produce; repeating it per item would only
                // rediscover the same names.
                return find_in_children(element.children(), registry, env, inputs);
            }

            if let Some(component) = registry.get(name.as_str()) {
                if let Some(req) = component.requirement(element.props()) {
                    if !inputs.contains_key(&req.name) {
                        return Some(req);
                    }
                }
            }
            find_in_children(element.children(), registry, env, inputs)
        }
    }
}

fn find_in_children(
    children: &[Node],
    registry: &ComponentRegistry,
    env: &Environment,
    inputs: &Map<String, Value>,
) -> Option<Requirement> {
    children.iter().find_map(|n| find_next(n, registry, env, inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentError};
    use crate::context::SharedContext;
    use crate::factory::jsx;
    use crate::node::Props;
    use crate::requirement::RequirementKind;
    use crate::schema::{PropKind, PropSpec, Schema};
    use async_trait::async_trait;
    use serde_json::json;

    struct AskText;

    static ASK_TEXT_SCHEMA: Schema = Schema {
        component: "Ask.Text",
        props: &[PropSpec::required("name", PropKind::String)],
    };

    #[async_trait(?Send)]
    impl Component for AskText {
        fn schema(&self) -> &'static Schema {
            &ASK_TEXT_SCHEMA
        }

        fn requirement(&self, props: &Props) -> Option<Requirement> {
            let name = props.get("name")?.as_str()?.to_string();
            Some(Requirement::new(name, RequirementKind::Text))
        }

        async fn render(
            &self,
            _props: &Props,
            _resolved: Option<&Value>,
            _children: &[Node],
            _ctx: &SharedContext,
        ) -> Result<Node, ComponentError> {
            Ok(Node::text(""))
        }
    }

    fn registry() -> ComponentRegistry {
        let mut reg: ComponentRegistry = ComponentRegistry::new();
        reg.insert("Ask.Text", Box::new(AskText) as Box<dyn Component + Send + Sync>);
        reg
    }

    #[test]
    fn surfaces_one_requirement_then_completes() {
        let mut props = Props::new();
        props.insert("name".to_string(), json!("u"));
        let el = jsx("Ask.Text", props, Vec::new()).unwrap();
        let reg = registry();
        let mut iter = InputIterator::new(&el, &reg, Environment::default());
        let req = iter.current().expect("one requirement");
        assert_eq!(req.name, "u");
        iter.next(json!("alice")).unwrap();
        assert!(iter.is_complete());
        assert_eq!(iter.into_inputs().get("u"), Some(&json!("alice")));
    }

    #[test]
    fn skips_ask_behind_false_if() {
        let mut ask_props = Props::new();
        ask_props.insert("name".to_string(), json!("u"));
        let ask = jsx("Ask.Text", ask_props, Vec::new()).unwrap();

        let mut if_props = Props::new();
        if_props.insert("when".to_string(), json!(false));
        let gated = jsx("If", if_props, vec![Node::Element(ask)]).unwrap();

        let reg = registry();
        let iter = InputIterator::new(&gated, &reg, Environment::default());
        assert!(iter.current().is_none());
    }
}
