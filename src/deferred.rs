//! `DeferredRef`: a lazily-resolved access path into another element's
//! resolved value (spec.md §3).
//!
//! In the source implementation this is produced by the proxy's
//! property-access interception. In Rust there is no such interception, so
//! [`crate::node::Element::get`]/[`crate::node::Element::field`] construct
//! `DeferredRef` values explicitly (spec.md §9 Design Notes).

use crate::node::ElementId;

/// An access path `(target, path)` resolved lazily against `target`'s
/// resolved value during rendering.
///
/// `path` may be empty, meaning "the target's whole resolved value" — the
/// Rust equivalent of referencing a hoisted name directly (`{name}`)
/// rather than one of its fields (`{name.field}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredRef {
    target: ElementId,
    path: Vec<String>,
}

impl DeferredRef {
    /// Builds a new deferred reference.
    pub fn new(target: ElementId, path: Vec<String>) -> Self {
        DeferredRef { target, path }
    }

    /// The element this reference resolves against.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// The access path, outermost key first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Extends the path by one more key, chaining access
    /// (`elem.user.address.city`).
    pub fn field(mut self, key: impl Into<String>) -> DeferredRef {
        self.path.push(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;
    use crate::node::{ElementType, Props};

    #[test]
    fn empty_path_means_whole_value() {
        let e = Element::new(ElementType::Fragment, Props::new(), Vec::new());
        let r = e.whole();
        assert!(r.path().is_empty());
        assert_eq!(r.target(), e.id());
    }
}
