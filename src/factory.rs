//! Element factories (spec.md §4.1): `jsx`/`jsxs`/`Fragment`.
//!
//! These are the two normalized entry points the source's transform step
//! would compile element syntax down to. Both flatten and filter children
//! per spec.md §3/§4.1 before constructing the element.

use crate::error::PromptError;
use crate::node::{Element, ElementType, Node, Props};

/// Builds an element of the named component type.
///
/// `children` is normalized: nested lists are recursively flattened,
/// `null`/`false` are dropped, and `0`/empty-string/`true` are kept as-is
/// (spec.md §4.1). Fails with [`PromptError::UnknownComponent`] only in the
/// sense that an empty type name is rejected outright — unresolved but
/// non-empty names become `ElementType::Unknown` and are handled at render
/// time (spec.md §4.3's "unknown component" diagnostic), not at
/// construction time.
pub fn jsx(ty: impl Into<String>, props: Props, children: Vec<Node>) -> Result<Element, PromptError> {
    let ty = ty.into();
    if ty.trim().is_empty() {
        return Err(PromptError::Lowering(
            "element type name must not be empty".to_string(),
        ));
    }
    let flattened = normalize_children(children);
    Ok(Element::new(ElementType::Component(ty), props, flattened))
}

/// Equivalent to [`jsx`] — kept as a distinct entry point only because the
/// spec names both `jsx`/`jsxs` as equivalent factories (spec.md §4.1); in
/// the source implementation `jsxs` is the variant used for elements with
/// more than one static child, a distinction that doesn't matter once
/// children are normalized the same way regardless of arity.
pub fn jsxs(ty: impl Into<String>, props: Props, children: Vec<Node>) -> Result<Element, PromptError> {
    jsx(ty, props, children)
}

/// Builds a `Fragment` grouping element: a type-transparent, non-rendering
/// wrapper around its children (spec.md §4.1).
pub fn fragment(children: Vec<Node>) -> Element {
    let flattened = normalize_children(children);
    Element::new(ElementType::Fragment, Props::new(), flattened)
}

/// Flattens nested `Node::List` values and drops `null`/`false` entries,
/// preserving order (spec.md §3/§4.1, §8 universal invariant on children
/// normalization).
pub fn normalize_children(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    flatten_into(children, &mut out);
    out
}

fn flatten_into(children: Vec<Node>, out: &mut Vec<Node>) {
    for child in children {
        match child {
            Node::List(nested) => flatten_into(nested, out),
            Node::Null => {}
            Node::Bool(false) => {}
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn normalizes_and_flattens_children() {
        let children = vec![
            Node::Null,
            Node::text("a"),
            Node::Null,
            Node::Number(0.0),
            Node::Bool(false),
            Node::text("b"),
        ];
        let out = normalize_children(children);
        let texts: Vec<String> = out
            .iter()
            .map(|n| match n {
                Node::Text(s) => s.clone(),
                Node::Number(n) => n.to_string(),
                other => format!("{other:?}"),
            })
            .collect();
        assert_eq!(texts, vec!["a".to_string(), "0".to_string(), "b".to_string()]);
    }

    #[test]
    fn nested_arrays_fully_flatten() {
        let children = vec![
            Node::List(vec![Node::text("a"), Node::List(vec![Node::text("b")])]),
            Node::text("c"),
        ];
        let out = normalize_children(children);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_type_name_is_rejected() {
        assert!(jsx("", Props::new(), Vec::new()).is_err());
        assert!(jsx("   ", Props::new(), Vec::new()).is_err());
    }
}
