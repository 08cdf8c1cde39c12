//! Section delimiter framing (spec.md §4.4): `xml | markdown | none`.

use crate::node::Node;

/// The framing convention used when a structural component emits a named
/// section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Xml,
    Markdown,
    None,
}

impl Delimiter {
    /// Parses a delimiter prop value, defaulting to `Xml` (the spec's
    /// default for `name`-carrying forms) for anything unrecognized.
    /// Callers that need to surface an invalid value as a `prop_validation`
    /// error do so via the component's schema (`PropKind::StringEnum`)
    /// *before* calling this — by the time a component body calls this
    /// function the value has already passed validation, or it falls back
    /// to the default.
    pub fn parse(value: Option<&str>) -> Delimiter {
        match value {
            Some("markdown") => Delimiter::Markdown,
            Some("none") => Delimiter::None,
            _ => Delimiter::Xml,
        }
    }
}

/// Wraps `body` under `tag` per the chosen delimiter (spec.md §4.4):
///
/// - `xml` → `<tag>\n` + body + `\n</tag>\n`
/// - `markdown` → `## tag\n\n` + body
/// - `none` → body unmodified
pub fn wrap_with_delimiter(body: &str, tag: &str, delimiter: Delimiter) -> String {
    match delimiter {
        Delimiter::Xml => format!("<{tag}>\n{body}\n</{tag}>\n"),
        Delimiter::Markdown => format!("## {tag}\n\n{body}"),
        Delimiter::None => body.to_string(),
    }
}

/// The `Node`-level equivalent of [`wrap_with_delimiter`]: wraps a still-
/// unrendered body (which may contain elements, DeferredRefs, or anything
/// else the central renderer still needs to walk) in the same framing,
/// instead of requiring the caller to have already stringified it.
///
/// Every structural component that wraps real children (as opposed to a
/// component-computed string) builds its output this way, so nested
/// elements inside e.g. `<Section>` still go through the one recursive
/// render walk rather than being rendered twice.
pub fn wrap_node_with_delimiter(body: Vec<Node>, tag: &str, delimiter: Delimiter) -> Node {
    match delimiter {
        Delimiter::Xml => Node::List(vec![
            Node::text(format!("<{tag}>\n")),
            Node::List(body),
            Node::text(format!("\n</{tag}>\n")),
        ]),
        Delimiter::Markdown => Node::List(vec![Node::text(format!("## {tag}\n\n")), Node::List(body)]),
        Delimiter::None => Node::List(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_wraps_exactly() {
        let out = wrap_with_delimiter("B", "X", Delimiter::Xml);
        assert_eq!(out, "<X>\nB\n</X>\n");
    }

    #[test]
    fn none_is_identity() {
        assert_eq!(wrap_with_delimiter("body text", "tag", Delimiter::None), "body text");
    }

    #[test]
    fn markdown_uses_heading() {
        assert_eq!(
            wrap_with_delimiter("B", "section", Delimiter::Markdown),
            "## section\n\nB"
        );
    }
}
