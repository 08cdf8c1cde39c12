//! Data wrappers (spec.md §4.4): `Code`, `Xml`, `Json`, `File`.

use crate::component::{Component, ComponentError};
use crate::context::SharedContext;
use crate::node::{Node, Props};
use crate::propx::str_prop;
use crate::schema::{PropKind, PropSpec, Schema};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

pub struct Code;

static CODE_SCHEMA: Schema = Schema {
    component: "Code",
    props: &[
        PropSpec::optional("language", PropKind::String),
        PropSpec::optional("filename", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for Code {
    fn schema(&self) -> &'static Schema {
        &CODE_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        Ok(fenced_block(
            str_prop(props, "language").unwrap_or("text"),
            str_prop(props, "filename"),
            children.to_vec(),
        ))
    }
}

/// Builds a ```` ```lang ```` fence around `body`, with an optional leading
/// `// filename` comment line (shared by `Code` and `File`).
fn fenced_block(language: &str, filename: Option<&str>, body: Vec<Node>) -> Node {
    let mut out = vec![Node::text(format!("```{language}\n"))];
    if let Some(filename) = filename {
        out.push(Node::text(format!("// {filename}\n")));
    }
    out.push(Node::List(body));
    out.push(Node::text("\n```\n"));
    Node::List(out)
}

pub struct Xml;

static XML_SCHEMA: Schema = Schema {
    component: "Xml",
    props: &[PropSpec::optional("root", PropKind::String)],
};

#[async_trait(?Send)]
impl Component for Xml {
    fn schema(&self) -> &'static Schema {
        &XML_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let body = match str_prop(props, "root") {
            Some(root) => vec![
                Node::text(format!("<{root}>\n")),
                Node::List(children.to_vec()),
                Node::text(format!("\n</{root}>")),
            ],
            None => children.to_vec(),
        };
        Ok(fenced_block("xml", None, body))
    }
}

pub struct Json;

static JSON_SCHEMA: Schema = Schema {
    component: "Json",
    props: &[PropSpec::optional("value", PropKind::Any)],
};

#[async_trait(?Send)]
impl Component for Json {
    fn schema(&self) -> &'static Schema {
        &JSON_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let pretty = match props.get("value") {
            Some(value) => serde_json::to_string_pretty(value)
                .map_err(|e| ComponentError::new(format!("failed to pretty-print value: {e}")))?,
            None => return Ok(fenced_block("json", None, children.to_vec())),
        };
        Ok(fenced_block("json", None, vec![Node::text(pretty)]))
    }
}

pub struct File;

static FILE_SCHEMA: Schema = Schema {
    component: "File",
    props: &[
        PropSpec::required("path", PropKind::String),
        PropSpec::optional("language", PropKind::String),
    ],
};

#[async_trait(?Send)]
impl Component for File {
    fn schema(&self) -> &'static Schema {
        &FILE_SCHEMA
    }

    async fn render(
        &self,
        props: &Props,
        _resolved: Option<&Value>,
        _children: &[Node],
        _ctx: &SharedContext,
    ) -> Result<Node, ComponentError> {
        let path = str_prop(props, "path").unwrap_or_default();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let language = str_prop(props, "language")
                    .map(str::to_string)
                    .unwrap_or_else(|| language_for_extension(path).to_string());
                let filename = Path::new(path).file_name().and_then(|f| f.to_str());
                Ok(fenced_block(&language, filename, vec![Node::text(contents)]))
            }
            Err(e) => Ok(Node::text(format!("[File: could not read '{path}': {e}]\n"))),
        }
    }
}

/// Maps a file extension to a fence language, falling back to `text` for
/// anything unrecognized.
fn language_for_extension(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("rs") => "rust",
        Some("py") => "python",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("ts" | "tsx") => "typescript",
        Some("go") => "go",
        Some("java") => "java",
        Some("rb") => "ruby",
        Some("c" | "h") => "c",
        Some("cc" | "cpp" | "cxx" | "hpp") => "cpp",
        Some("sh" | "bash") => "bash",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("yaml" | "yml") => "yaml",
        Some("md") => "markdown",
        Some("html" | "htm") => "html",
        Some("css") => "css",
        Some("sql") => "sql",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Environment, RenderContext};
    use serde_json::{json, Map};

    #[tokio::test]
    async fn missing_file_emits_explanatory_string() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let mut props = Props::new();
        props.insert("path".to_string(), json!("/no/such/path.rs"));
        let node = File.render(&props, None, &[], &ctx).await.unwrap();
        match node {
            Node::Text(s) => assert!(s.contains("could not read")),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn extension_table_covers_common_languages() {
        assert_eq!(language_for_extension("main.rs"), "rust");
        assert_eq!(language_for_extension("script.py"), "python");
        assert_eq!(language_for_extension("unknown.xyz"), "text");
    }
}
