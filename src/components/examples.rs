//! Examples (spec.md §4.4): `Examples`/`Example`/`ExampleInput`/
//! `ExampleOutput`/`NegativeExample` — fixed-shape wrappers, no preset or
//! delimiter choice (unlike the structural family).

use crate::component::{Component, ComponentError};
use crate::context::SharedContext;
use crate::node::{Node, Props};
use crate::propx::str_prop;
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

fn wrap_fixed(tag: &str, body: Vec<Node>) -> Node {
    Node::List(vec![
        Node::text(format!("<{tag}>\n")),
        Node::List(body),
        Node::text(format!("\n</{tag}>\n")),
    ])
}

macro_rules! fixed_wrapper {
    ($name:ident, $schema_static:ident, $tag:expr) => {
        pub struct $name;

        static $schema_static: Schema = Schema {
            component: stringify!($name),
            props: &[],
        };

        #[async_trait(?Send)]
        impl Component for $name {
            fn schema(&self) -> &'static Schema {
                &$schema_static
            }

            async fn render(
                &self,
                _props: &Props,
                _resolved: Option<&Value>,
                children: &[Node],
                _ctx: &SharedContext,
            ) -> Result<Node, ComponentError> {
                Ok(wrap_fixed($tag, children.to_vec()))
            }
        }
    };
}

fixed_wrapper!(Examples, EXAMPLES_SCHEMA, "examples");
fixed_wrapper!(Example, EXAMPLE_SCHEMA, "example");
fixed_wrapper!(ExampleInput, EXAMPLE_INPUT_SCHEMA, "input");
fixed_wrapper!(ExampleOutput, EXAMPLE_OUTPUT_SCHEMA, "output");

pub struct NegativeExample;

static NEGATIVE_EXAMPLE_SCHEMA: Schema = Schema {
    component: "NegativeExample",
    props: &[PropSpec::optional("reason", PropKind::String)],
};

#[async_trait(?Send)]
impl Component for NegativeExample {
    fn schema(&self) -> &'static Schema {
        &NEGATIVE_EXAMPLE_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let mut body = children.to_vec();
        if let Some(reason) = str_prop(props, "reason") {
            body.push(Node::text(format!("\nReason this is wrong: {reason}")));
        }
        Ok(wrap_fixed("bad-example", body))
    }
}
