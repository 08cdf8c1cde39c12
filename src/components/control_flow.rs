//! Control flow (spec.md §4.4): `If`, `ForEach`.

use crate::component::{Component, ComponentError};
use crate::condition::if_holds;
use crate::context::{RenderIssue, SharedContext};
use crate::error::ErrorCode;
use crate::node::{Element, ElementType, Node, Props};
use crate::propx::bool_prop_or;
use crate::renderer::stringify_value;
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

pub struct If;

static IF_SCHEMA: Schema = Schema {
    component: "If",
    props: &[
        PropSpec::optional("when", PropKind::Any),
        PropSpec::optional("provider", PropKind::Any),
        PropSpec::optional("notProvider", PropKind::Any),
    ],
};

#[async_trait(?Send)]
impl Component for If {
    fn schema(&self) -> &'static Schema {
        &IF_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        match if_holds(props, &ctx.env, &ctx.inputs) {
            Ok(true) => Ok(Node::List(children.to_vec())),
            Ok(false) => Ok(Node::List(Vec::new())),
            Err(e) => {
                ctx.push_issue(RenderIssue::new(
                    "If",
                    Some("when"),
                    ErrorCode::PropValidation,
                    e.to_string(),
                ));
                Ok(Node::List(Vec::new()))
            }
        }
    }
}

pub struct ForEach;

static FOR_EACH_SCHEMA: Schema = Schema {
    component: "ForEach",
    props: &[PropSpec::required("items", PropKind::Array)],
};

#[async_trait(?Send)]
impl Component for ForEach {
    fn schema(&self) -> &'static Schema {
        &FOR_EACH_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let items = props
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            out.push(Node::List(bind_items(children, item, index)));
        }
        Ok(Node::List(out))
    }
}

/// `ForEach.Item`: the accessor a loop body uses to read the current item
/// or index (spec.md §4.4 `ForEach` — "children is a function of `(item,
/// index)`"). `ForEach` substitutes every occurrence of this element in its
/// children template before the element ever reaches the renderer, so it
/// never dispatches through the registry inside a loop. Used standalone
/// (outside any `ForEach`), it has no item to read and renders empty.
pub struct Item;

static ITEM_SCHEMA: Schema = Schema {
    component: "ForEach.Item",
    props: &[
        PropSpec::optional("path", PropKind::String),
        PropSpec::optional("index", PropKind::Bool),
    ],
};

#[async_trait(?Send)]
impl Component for Item {
    fn schema(&self) -> &'static Schema {
        &ITEM_SCHEMA
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

/// Deep-clones `nodes`, replacing every `ForEach.Item` element with the
/// textual value it projects out of `item`/`index`. Stops at a nested
/// `ForEach`: that loop owns its own `ForEach.Item` children and must not
/// have this iteration's item substituted into them.
fn bind_items(nodes: &[Node], item: &Value, index: usize) -> Vec<Node> {
    nodes.iter().map(|n| bind_item_node(n, item, index)).collect()
}

fn bind_item_node(node: &Node, item: &Value, index: usize) -> Node {
    match node {
        Node::Element(e) if e.type_name() == Some("ForEach.Item") => {
            Node::text(item_text(e.props(), item, index))
        }
        Node::Element(e) if e.type_name() == Some("ForEach") => Node::Element(e.clone()),
        Node::Element(e) => Node::Element(Element::new(
            e.ty().clone(),
            e.props().clone(),
            bind_items(e.children(), item, index),
        )),
        Node::List(items) => Node::List(bind_items(items, item, index)),
        other => other.clone(),
    }
}

fn item_text(props: &Props, item: &Value, index: usize) -> String {
    if bool_prop_or(props, "index", false) {
        return index.to_string();
    }
    let mut current = item.clone();
    if let Some(path) = props.get("path").and_then(Value::as_str) {
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = current.get(segment).cloned().unwrap_or(Value::Null);
        }
    }
    stringify_value(&current)
}
