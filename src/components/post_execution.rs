//! Post-execution (spec.md §4.4): `PostExecution` is a transparent
//! container; its `ReviewFile`/`OpenUrl`/`RunCommand` descendants push
//! records onto `context.postExecution` and render no text.

use crate::component::{Component, ComponentError};
use crate::context::{Action, SharedContext};
use crate::node::{Node, Props};
use crate::propx::{object_prop, str_prop};
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;

pub struct PostExecution;

static POST_EXECUTION_SCHEMA: Schema = Schema {
    component: "PostExecution",
    props: &[],
};

#[async_trait(?Send)]
impl Component for PostExecution {
    fn schema(&self) -> &'static Schema {
        &POST_EXECUTION_SCHEMA
    }

    async fn render(
        &self,
        _props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(Node::List(children.to_vec()))
    }
}

pub struct ReviewFile;

static REVIEW_FILE_SCHEMA: Schema = Schema {
    component: "ReviewFile",
    props: &[
        PropSpec::required("file", PropKind::String),
        PropSpec::optional("editor", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for ReviewFile {
    fn schema(&self) -> &'static Schema {
        &REVIEW_FILE_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        ctx.push_action(Action::ReviewFile {
            file: str_prop(props, "file").unwrap_or_default().to_string(),
            editor: str_prop(props, "editor").map(str::to_string),
        });
        Ok(Node::text(""))
    }
}

pub struct OpenUrl;

static OPEN_URL_SCHEMA: Schema = Schema {
    component: "OpenUrl",
    props: &[
        PropSpec::required("url", PropKind::String),
        PropSpec::optional("browser", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for OpenUrl {
    fn schema(&self) -> &'static Schema {
        &OPEN_URL_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        ctx.push_action(Action::OpenUrl {
            url: str_prop(props, "url").unwrap_or_default().to_string(),
            browser: str_prop(props, "browser").map(str::to_string),
        });
        Ok(Node::text(""))
    }
}

pub struct RunCommand;

static RUN_COMMAND_SCHEMA: Schema = Schema {
    component: "RunCommand",
    props: &[
        PropSpec::required("command", PropKind::String),
        PropSpec::optional("cwd", PropKind::String),
        PropSpec::optional("env", PropKind::Object),
    ],
};

#[async_trait(?Send)]
impl Component for RunCommand {
    fn schema(&self) -> &'static Schema {
        &RUN_COMMAND_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        ctx.push_action(Action::RunCommand {
            command: str_prop(props, "command").unwrap_or_default().to_string(),
            cwd: str_prop(props, "cwd").map(str::to_string),
            env: object_prop(props, "env").cloned(),
        });
        Ok(Node::text(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Environment, RenderContext};
    use serde_json::{json, Map};

    #[tokio::test]
    async fn run_command_renders_nothing_and_pushes_action() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let mut props = Props::new();
        props.insert("command".to_string(), json!("npm test"));
        let node = RunCommand.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert!(s.is_empty()),
            _ => panic!("expected empty text"),
        }
        let (actions, _) = ctx.drain();
        assert_eq!(
            actions,
            vec![Action::RunCommand {
                command: "npm test".to_string(),
                cwd: None,
                env: None
            }]
        );
    }

    #[tokio::test]
    async fn post_execution_is_a_transparent_container() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let node = PostExecution
            .render(&Props::new(), None, &[Node::text("x")], &ctx)
            .await
            .unwrap();
        match node {
            Node::List(items) => assert_eq!(items.len(), 1),
            _ => panic!("expected list"),
        }
    }
}
