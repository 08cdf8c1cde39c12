//! Utility values (spec.md §4.4): `Uuid`, `Timestamp`, `DateTime`,
//! `Hostname`, `Username`, `Cwd` — each renders a process-scoped value and
//! is therefore non-deterministic across renders, unlike every other
//! built-in (spec.md §8 universal invariants explicitly carve these out).

use crate::component::{Component, ComponentError};
use crate::context::SharedContext;
use crate::node::{Node, Props};
use crate::propx::str_prop;
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

macro_rules! value_component {
    ($name:ident, $schema_static:ident, $body:expr) => {
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
                _children: &[Node],
                _ctx: &SharedContext,
            ) -> Result<Node, ComponentError> {
                Ok(Node::text($body()))
            }
        }
    };
}

value_component!(Uuid, UUID_SCHEMA, || uuid::Uuid::new_v4().to_string());
value_component!(Timestamp, TIMESTAMP_SCHEMA, || Utc::now().to_rfc3339());
value_component!(Hostname, HOSTNAME_SCHEMA, || whoami::hostname());
value_component!(Username, USERNAME_SCHEMA, || whoami::username());
value_component!(Cwd, CWD_SCHEMA, || std::env::current_dir()
    .map(|p| p.display().to_string())
    .unwrap_or_default());

pub struct DateTime;

static DATE_TIME_SCHEMA: Schema = Schema {
    component: "DateTime",
    props: &[PropSpec::optional("format", PropKind::String)],
};

#[async_trait(?Send)]
impl Component for DateTime {
    fn schema(&self) -> &'static Schema {
        &DATE_TIME_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let format = str_prop(props, "format").unwrap_or("%Y-%m-%d %H:%M:%S UTC");
        Ok(Node::text(Utc::now().format(format).to_string()))
    }
}
