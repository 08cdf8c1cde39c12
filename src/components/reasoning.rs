//! Reasoning (spec.md §4.4 "Reasoning: Steps, Step", §4.6 auto-numbering
//! state machine).

use crate::component::{Component, ComponentError};
use crate::context::SharedContext;
use crate::node::{Element, ElementType, Node, Props};
use crate::presets;
use crate::propx::{bool_prop_or, str_prop};
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

pub struct Steps;

static STEPS_SCHEMA: Schema = Schema {
    component: "Steps",
    props: &[
        PropSpec::optional(
            "style",
            PropKind::StringEnum(&["step-by-step", "think-aloud", "structured", "minimal", "least-to-most"]),
        ),
        PropSpec::optional("preset", PropKind::String),
        PropSpec::optional("extend", PropKind::Bool),
        PropSpec::optional("verify", PropKind::Bool),
        PropSpec::optional("selfCritique", PropKind::Bool),
        PropSpec::optional("showReasoning", PropKind::Bool),
    ],
};

#[async_trait(?Send)]
impl Component for Steps {
    fn schema(&self) -> &'static Schema {
        &STEPS_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let style = str_prop(props, "style").unwrap_or("step-by-step");
        let mut body = vec![Node::text(format!("{}\n", presets::steps_style_instruction(style)))];
        body.push(Node::text("<steps>\n"));

        let mut counter: u64 = 1;
        let preset = str_prop(props, "preset");
        if let Some(preset) = preset {
            if let Some(phases) = presets::steps_preset_phases(preset) {
                for phase in phases {
                    body.push(Node::text(format!("{counter}. {phase}\n")));
                    counter += 1;
                }
            }
        }
        let continue_with_children = preset.is_none() || bool_prop_or(props, "extend", false);
        if continue_with_children && !children.is_empty() {
            body.push(Node::List(auto_number_steps(children, &mut counter)));
        }

        body.push(Node::text("</steps>\n"));
        if bool_prop_or(props, "verify", false) {
            body.push(Node::text("Verify your answer before finalizing.\n"));
        }
        if bool_prop_or(props, "selfCritique", false) {
            body.push(Node::text("Critique your own reasoning for errors.\n"));
        }
        if bool_prop_or(props, "showReasoning", false) {
            body.push(Node::text("Show your reasoning explicitly.\n"));
        }

        Ok(Node::List(body))
    }
}

/// Auto-numbers `Step` children (spec.md §4.6 `autoNumberSteps`): flattens
/// transparently through `Fragment`, assigns the running counter to any
/// `Step` missing an explicit `number`, and re-seeds the counter to
/// `number + 1` when a `Step` supplies one explicitly. Everything else
/// passes through untouched and does not consume a number.
fn auto_number_steps(nodes: &[Node], counter: &mut u64) -> Vec<Node> {
    nodes.iter().map(|n| auto_number_node(n, counter)).collect()
}

fn auto_number_node(node: &Node, counter: &mut u64) -> Node {
    match node {
        Node::Element(e) if e.type_name() == Some("Step") => {
            let mut props = e.props().clone();
            let assigned = match props.get("number").and_then(Value::as_u64) {
                Some(explicit) => {
                    *counter = explicit + 1;
                    explicit
                }
                None => {
                    let n = *counter;
                    *counter += 1;
                    n
                }
            };
            props.insert("number".to_string(), Value::from(assigned));
            Node::Element(Element::new(
                ElementType::Component("Step".to_string()),
                props,
                e.children().to_vec(),
            ))
        }
        Node::Element(e) if e.is_fragment() => {
            let renumbered = auto_number_steps(e.children(), counter);
            Node::Element(Element::new(ElementType::Fragment, Props::new(), renumbered))
        }
        Node::List(items) => Node::List(auto_number_steps(items, counter)),
        other => other.clone(),
    }
}

pub struct Step;

static STEP_SCHEMA: Schema = Schema {
    component: "Step",
    props: &[PropSpec::optional("number", PropKind::Number)],
};

#[async_trait(?Send)]
impl Component for Step {
    fn schema(&self) -> &'static Schema {
        &STEP_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let n = props.get("number").and_then(Value::as_u64).unwrap_or(0);
        let prefix = if n > 0 { format!("{n}. ") } else { String::new() };
        Ok(Node::List(vec![
            Node::text(prefix),
            Node::List(children.to_vec()),
            Node::text("\n"),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{fragment, jsx};

    #[test]
    fn numbers_through_fragment_and_override() {
        let step_a = jsx("Step", Props::new(), vec![Node::text("A")]).unwrap();
        let step_b = jsx("Step", Props::new(), vec![Node::text("B")]).unwrap();
        let frag = fragment(vec![Node::Element(step_a), Node::Element(step_b)]);

        let mut override_props = Props::new();
        override_props.insert("number".to_string(), Value::from(5));
        let step_override = jsx("Step", override_props, vec![Node::text("C")]).unwrap();
        let step_after = jsx("Step", Props::new(), vec![Node::text("D")]).unwrap();

        let children = vec![
            Node::Element(frag),
            Node::Element(step_override),
            Node::Element(step_after),
        ];
        let mut counter = 1;
        let numbered = auto_number_steps(&children, &mut counter);

        let numbers: Vec<u64> = numbered
            .iter()
            .flat_map(|n| match n {
                Node::Element(e) if e.is_fragment() => e
                    .children()
                    .iter()
                    .filter_map(|c| match c {
                        Node::Element(step) => step.props().get("number").and_then(Value::as_u64),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
                Node::Element(step) => step
                    .props()
                    .get("number")
                    .and_then(Value::as_u64)
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 5, 6]);
    }
}
