//! The element/node data model (spec.md §3).
//!
//! An [`Element`] is the immutable triple `(type, props, children)`. A
//! [`Node`] is anything that can appear as a child: a primitive, an
//! `Element`, a [`crate::deferred::DeferredRef`], or a nested sequence —
//! nesting is flattened by [`crate::factory`] at construction time, so by
//! the time a `Node::List` reaches the renderer it is already flat.

use crate::deferred::DeferredRef;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity for an [`Element`].
///
/// This is the Rust substitute for the proxy/object identity the source
/// implementation relies on (spec.md §9 Design Notes): since `Element`
/// values have no stable pointer identity once cloned or moved, every
/// element is tagged with an id at construction time. [`DeferredRef`]
/// targets an `ElementId`, and [`crate::context::RenderContext`] memoizes
/// resolved values keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    /// Allocates a fresh, process-unique id.
    pub fn fresh() -> Self {
        ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The mapping from prop name to prop value.
///
/// Realized as `serde_json::Map` so that schema validation, the `Json`
/// data wrapper, and Ask-family requirement records all share one
/// representation without a bespoke `PropValue` enum.
pub type Props = Map<String, Value>;

/// What an element's `type` field refers to (spec.md §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    /// The distinguished grouping token. Never appears in rendered text
    /// and is transparent to type-predicated child search (spec.md §4.1).
    Fragment,
    /// A registered built-in or user component, referenced by name. The
    /// renderer looks this name up in a [`crate::component::ComponentRegistry`].
    Component(String),
    /// A bare string type with no matching registration — renders its
    /// children with an `unknown component` diagnostic (spec.md §4.3).
    Unknown(String),
}

/// An immutable element: `(type, props, children)`.
#[derive(Clone, Debug)]
pub struct Element {
    id: ElementId,
    ty: ElementType,
    props: Props,
    children: Vec<Node>,
}

impl Element {
    /// Constructs an element. Prefer [`crate::factory::jsx`]/
    /// [`crate::factory::jsxs`], which additionally normalize children.
    pub fn new(ty: ElementType, props: Props, children: Vec<Node>) -> Self {
        Element {
            id: ElementId::fresh(),
            ty,
            props,
            children,
        }
    }

    /// This element's process-unique identity.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element's type.
    pub fn ty(&self) -> &ElementType {
        &self.ty
    }

    /// The element's props.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The element's (already-flattened) children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns true if this element's type is `Fragment`.
    pub fn is_fragment(&self) -> bool {
        matches!(self.ty, ElementType::Fragment)
    }

    /// The component name if this element's type is a registered component
    /// or an unknown bare-string type.
    pub fn type_name(&self) -> Option<&str> {
        match &self.ty {
            ElementType::Fragment => None,
            ElementType::Component(name) | ElementType::Unknown(name) => Some(name),
        }
    }

    /// Accesses a prop as a [`DeferredRef`], the Rust equivalent of the
    /// proxy's property-access interception (spec.md §3).
    ///
    /// Returns `None` for the reserved key set, exactly as the proxy
    /// protocol requires: those keys must return `undefined` rather than
    /// create a `DeferredRef`, so that elements are handled safely by host
    /// facilities that probe for them.
    pub fn get(&self, key: &str) -> Option<DeferredRef> {
        if is_reserved_key(key) {
            None
        } else {
            Some(DeferredRef::new(self.id, vec![key.to_string()]))
        }
    }

    /// Unconditionally builds a `DeferredRef` path starting at `key`,
    /// without the reserved-key guard. Used by component authors who
    /// already know the key is a real prop name.
    pub fn field(&self, key: impl Into<String>) -> DeferredRef {
        DeferredRef::new(self.id, vec![key.into()])
    }

    /// A `DeferredRef` with an empty path, referring to this element's
    /// whole resolved value (used by interpolation sugar like `{name}`
    /// where `name` is an Ask component's own resolved input value).
    pub fn whole(&self) -> DeferredRef {
        DeferredRef::new(self.id, Vec::new())
    }
}

/// The reserved keys that must never produce a `DeferredRef` (spec.md §3,
/// §8 universal invariants).
pub fn is_reserved_key(key: &str) -> bool {
    matches!(
        key,
        "then" | "catch" | "finally" | "constructor" | "toJSON" | "toString" | "valueOf"
    )
}

/// Identity test mirroring the spec's `isElement(x)` — trivial in Rust
/// since `Element` is its own type, but kept as a named function so call
/// sites read the same as the spec's universal invariants (spec.md §8).
pub fn is_element(node: &Node) -> bool {
    matches!(node, Node::Element(_))
}

/// Identity test mirroring the spec's `isDeferredRef(x)`.
pub fn is_deferred_ref(node: &Node) -> bool {
    matches!(node, Node::Ref(_))
}

/// A child node: a primitive, an element, a deferred reference, or a
/// nested sequence (flattened away by [`crate::factory`] before it reaches
/// the renderer, but the variant exists so intermediate construction code
/// can build nested lists naturally).
#[derive(Clone, Debug)]
pub enum Node {
    /// A text leaf.
    Text(String),
    /// A numeric leaf, rendered via its default `Display`.
    Number(f64),
    /// A boolean leaf. Renders as empty string (spec.md §3).
    Bool(bool),
    /// `null`/`undefined`. Renders as empty string.
    Null,
    /// A nested element.
    Element(Element),
    /// A deferred reference, resolved against the render context at
    /// render time (spec.md §3).
    Ref(DeferredRef),
    /// A nested, not-yet-flattened sequence.
    List(Vec<Node>),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(s: impl Into<String>) -> Node {
        Node::Text(s.into())
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<DeferredRef> for Node {
    fn from(r: DeferredRef) -> Self {
        Node::Ref(r)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n as f64)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_are_unique() {
        let a = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        let b = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn reserved_keys_never_produce_refs() {
        let e = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        for key in ["then", "catch", "finally", "constructor", "toJSON", "toString", "valueOf"] {
            assert!(e.get(key).is_none(), "{key} should be reserved");
        }
    }

    #[test]
    fn non_reserved_keys_produce_refs_with_matching_path() {
        let e = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        let r = e.get("stars").expect("not reserved");
        assert_eq!(r.path(), &["stars".to_string()]);
    }

    #[test]
    fn chained_access_extends_path() {
        let e = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        let r = e.field("user").field("address").field("city");
        assert_eq!(
            r.path(),
            &["user".to_string(), "address".to_string(), "city".to_string()]
        );
    }
}
