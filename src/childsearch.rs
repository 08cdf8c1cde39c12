//! Type-predicated, Fragment-transparent child search (spec.md §2 utility
//! list, §4.4 "scan the flattened child list (through Fragments)").
//!
//! Used by `Prompt`'s composition algorithm to find its `Role`/`Task`/
//! `Format`/`SuccessCriteria` descendants and container instances, without
//! caring whether the author wrapped them in one or more `Fragment`s.

use crate::node::{Element, ElementType, Node};

/// Returns the first descendant element whose type name is `type_name`,
/// recursing transparently through `Fragment` wrappers but not through
/// other components' children (containers are searched one level deep from
/// the root's direct/fragment-flattened children, matching the spec's
/// "scan the flattened child list").
pub fn find_first<'a>(children: &'a [Node], type_name: &str) -> Option<&'a Element> {
    for node in children {
        match node {
            Node::Element(el) => {
                if el.is_fragment() {
                    if let Some(found) = find_first(el.children(), type_name) {
                        return Some(found);
                    }
                } else if el.type_name() == Some(type_name) {
                    return Some(el);
                }
            }
            Node::List(nested) => {
                if let Some(found) = find_first(nested, type_name) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns every matching descendant element, in source order, under the
/// same Fragment-transparent rule as [`find_first`].
pub fn find_all<'a>(children: &'a [Node], type_name: &str) -> Vec<&'a Element> {
    let mut out = Vec::new();
    collect_all(children, type_name, &mut out);
    out
}

fn collect_all<'a>(children: &'a [Node], type_name: &str, out: &mut Vec<&'a Element>) {
    for node in children {
        match node {
            Node::Element(el) => {
                if el.is_fragment() {
                    collect_all(el.children(), type_name, out);
                } else if el.type_name() == Some(type_name) {
                    out.push(el);
                }
            }
            Node::List(nested) => collect_all(nested, type_name, out),
            _ => {}
        }
    }
}

/// Returns true if any descendant element (Fragment-transparent) matches
/// one of `type_names`.
pub fn contains_any(children: &[Node], type_names: &[&str]) -> bool {
    type_names.iter().any(|t| find_first(children, t).is_some())
}

pub fn type_name_is(element: &Element, name: &str) -> bool {
    matches!(element.ty(), ElementType::Component(n) if n == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{fragment, jsx};
    use crate::node::Props;

    #[test]
    fn finds_through_nested_fragments() {
        let task = jsx("Task", Props::new(), Vec::new()).unwrap();
        let inner = fragment(vec![Node::Element(task)]);
        let outer = fragment(vec![Node::Element(inner)]);
        let found = find_first(&[Node::Element(outer)], "Task");
        assert!(found.is_some());
    }

    #[test]
    fn find_all_collects_every_match_in_order() {
        let a = jsx("Constraint", Props::new(), vec![Node::text("a")]).unwrap();
        let b = jsx("Constraint", Props::new(), vec![Node::text("b")]).unwrap();
        let children = vec![Node::Element(a), Node::Element(b)];
        let all = find_all(&children, "Constraint");
        assert_eq!(all.len(), 2);
    }
}
