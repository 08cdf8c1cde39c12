//! JSX-flavored prompt source: preprocess → transform → evaluate (spec.md
//! §1 "out of scope... collaborators" and §6 build-time surface), producing
//! the element tree the rest of the crate operates on.
//!
//! The three stages are kept as separate modules/functions exactly as the
//! spec's external-interfaces section names them, even though this crate
//! (unlike the system the spec distills) implements all three itself rather
//! than treating them as named collaborators:
//! - [`preprocess::preprocess`] — textual wrapping of bare element source.
//! - [`lowering::transform`] — oxc-based parse + AST walk into [`ir`].
//! - [`evaluate::evaluate`] — interprets the lowered IR into an [`Element`].

mod evaluate;
mod ir;
mod lowering;
mod preprocess;

use crate::component::{ComponentRegistry, DEFAULT_REGISTRY};
use crate::context::Environment;
use crate::error::PromptError;
use crate::input_iterator::InputIterator;
use crate::node::{Element, Node};
use serde_json::{Map, Value};

/// Compiles `source` (a `.prompt`/`.psx` file's content) into an element
/// tree, using `registry` to resolve `hoistName` auto-binding during
/// evaluation (spec.md §4.2).
///
/// A bare file — one whose meaningful top level is a single JSX expression
/// — lowers to a `Fragment` of exactly one child once `preprocess` wraps it;
/// that wrapper is unwrapped back to its sole child here, so a one-element
/// prompt source compiles to that element directly rather than to a
/// pointless one-child `Fragment` (spec.md §6 "module evaluator... executes
/// the lowered code").
pub fn create_prompt_from_source(
    source: &str,
    filename: &str,
    registry: &ComponentRegistry,
) -> Result<Element, PromptError> {
    let preprocessed = preprocess::preprocess(source, filename);
    let module = lowering::transform(&preprocessed, filename)?;
    let root = evaluate::evaluate(&module, registry)?;
    Ok(unwrap_singleton_fragment(root))
}

/// Convenience over [`create_prompt_from_source`] using the built-in
/// component registry.
pub fn create_prompt_from_source_default(source: &str, filename: &str) -> Result<Element, PromptError> {
    create_prompt_from_source(source, filename, &DEFAULT_REGISTRY)
}

fn unwrap_singleton_fragment(element: Element) -> Element {
    if element.is_fragment() && element.children().len() == 1 {
        if let Node::Element(inner) = &element.children()[0] {
            return inner.clone();
        }
    }
    element
}

/// Builds an [`InputIterator`] over an already-compiled prompt tree (spec.md
/// §4.5), seeded with any inputs already known.
pub fn create_input_iterator<'a>(
    root: &'a Element,
    registry: &'a ComponentRegistry,
    env: Environment,
    known_inputs: Map<String, Value>,
) -> InputIterator<'a> {
    InputIterator::new(root, registry, env).with_known_inputs(known_inputs)
}

pub use evaluate::evaluate;
pub use ir::{IrAttr, IrChild, IrElement, IrExpr, LoweredModule};
pub use lowering::transform;
pub use preprocess::preprocess;
