//! Property-based tests for the universal invariants spec.md §8 calls out:
//! children normalization (flatten/drop-null/drop-false, order-preserving)
//! and `Steps` auto-numbering idempotence.

use proptest::prelude::*;
use promptweave::component::DEFAULT_REGISTRY;
use promptweave::context::Environment;
use promptweave::factory::normalize_children;
use promptweave::node::Node;
use promptweave::{create_prompt_from_source_default, render, RenderOptions};
use serde_json::Map;

/// A small, proptest-friendly mirror of a normalizable child: either a kept
/// leaf or a value that normalization must drop.
#[derive(Clone, Debug)]
enum RawChild {
    Kept(String),
    Null,
    False,
    Nested(Vec<RawChild>),
}

fn raw_child_strategy() -> impl Strategy<Value = RawChild> {
    let leaf = prop_oneof![
        "[a-z]{1,5}".prop_map(RawChild::Kept),
        Just(RawChild::Null),
        Just(RawChild::False),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(RawChild::Nested)
    })
}

fn to_node(raw: &RawChild) -> Node {
    match raw {
        RawChild::Kept(s) => Node::text(s.clone()),
        RawChild::Null => Node::Null,
        RawChild::False => Node::Bool(false),
        RawChild::Nested(items) => Node::List(items.iter().map(to_node).collect()),
    }
}

/// The kept leaves `normalize_children` should preserve, in order, once
/// nesting is fully flattened and null/false entries are dropped (spec.md
/// §3/§4.1/§8).
fn expected_kept(raw: &[RawChild], out: &mut Vec<String>) {
    for child in raw {
        match child {
            RawChild::Kept(s) => out.push(s.clone()),
            RawChild::Null | RawChild::False => {}
            RawChild::Nested(items) => expected_kept(items, out),
        }
    }
}

proptest! {
    #[test]
    fn normalize_children_flattens_and_drops_null_and_false(raw in prop::collection::vec(raw_child_strategy(), 0..8)) {
        let nodes: Vec<Node> = raw.iter().map(to_node).collect();
        let normalized = normalize_children(nodes);

        let mut expected = Vec::new();
        expected_kept(&raw, &mut expected);

        prop_assert_eq!(normalized.len(), expected.len());
        for (node, text) in normalized.iter().zip(expected.iter()) {
            match node {
                Node::Text(s) => prop_assert_eq!(s, text),
                other => prop_assert!(false, "expected text node, got {:?}", other),
            }
        }
        // No List, Null, or Bool(false) should survive flattening.
        for node in &normalized {
            prop_assert!(!matches!(node, Node::List(_) | Node::Null | Node::Bool(false)));
        }
    }

    #[test]
    fn normalize_children_is_idempotent(raw in prop::collection::vec(raw_child_strategy(), 0..8)) {
        let nodes: Vec<Node> = raw.iter().map(to_node).collect();
        let once = normalize_children(nodes);
        let twice = normalize_children(once.clone());
        prop_assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            match (a, b) {
                (Node::Text(x), Node::Text(y)) => prop_assert_eq!(x, y),
                _ => prop_assert!(false, "normalization changed shape on a second pass"),
            }
        }
    }

    /// `Steps` re-derives numbering from scratch on every render (spec.md
    /// §8: "re-running on an already-numbered child list produces the same
    /// output"), so rendering the same source twice must yield identical,
    /// densely-numbered `1..=n` output regardless of step count.
    #[test]
    fn steps_auto_numbering_is_stable_across_repeated_renders(count in 1usize..8) {
        let body: String = (0..count).map(|i| format!("<Step>s{i}</Step>")).collect();
        let source = format!("<Steps>{body}</Steps>");

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let render_once = || {
            let element = create_prompt_from_source_default(&source, "steps.prompt").unwrap();
            rt.block_on(render(&element, RenderOptions { inputs: Map::new(), env: Environment::default(), trim: true }, &DEFAULT_REGISTRY))
        };

        let first = render_once();
        let second = render_once();
        prop_assert_eq!(&first.text, &second.text);
        for n in 1..=count {
            prop_assert!(first.text.contains(&format!("{n}. s{}", n - 1)));
        }
    }
}
