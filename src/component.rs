//! The component contract and registry (spec.md §4.2, §4.3).
//!
//! A component is either a "class" (has `resolve` + `render`) or a
//! "function" (`render` only) in the source's terms; Rust has no such
//! distinction at the type level; instead every built-in implements
//! [`Component`], and `resolve` defaults to producing no resolved value —
//! the function-component case. [`ComponentKind`] records which shape a
//! given implementation presents, purely for diagnostics/dispatch parity
//! with spec.md §4.2's two markers (`componentMarker`, `hoistName`).

use crate::context::SharedContext;
use crate::node::{Node, Props};
use crate::requirement::Requirement;
use crate::schema::Schema;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Whether a component presents the "class" (has a resolver) or "function"
/// shape (spec.md §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Class,
    Function,
}

/// An error raised from inside a component's `resolve`/`render`. Caught at
/// the render boundary and converted into a `runtime_error` [`crate::context::RenderIssue`]
/// (spec.md §4.3 step 3, §7) — this type never crosses the public `render()`
/// API.
#[derive(Debug)]
pub struct ComponentError(pub String);

impl std::fmt::Display for ComponentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ComponentError {}

impl ComponentError {
    pub fn new(message: impl Into<String>) -> Self {
        ComponentError(message.into())
    }
}

/// The component render contract (spec.md §4.2).
///
/// Implementations are stateless (no per-instance props are stored — props
/// are passed into each call), so every built-in is a zero-sized unit
/// struct, making the static registry `Send + Sync` without any unsafe
/// code or interior mutability.
#[async_trait(?Send)]
pub trait Component {
    /// This component's static shape schema (spec.md §4.2).
    fn schema(&self) -> &'static Schema;

    /// Whether this component is a "class" (provides `resolve`) or
    /// "function" component (spec.md §4.2's `componentMarker`).
    fn kind(&self) -> ComponentKind {
        ComponentKind::Function
    }

    /// Whether the preprocessor should assign this element a hoisted
    /// identifier equal to `props.name`, enabling `{name}` interpolation
    /// (spec.md §4.2's `hoistName`).
    fn hoist_name(&self) -> bool {
        false
    }

    /// The input requirement this element asks of the host, if any (spec.md
    /// §4.5 "ask the component for its current requirement"). Only the
    /// Ask family overrides this; every other component is not input-
    /// bearing and keeps the default `None`.
    fn requirement(&self, _props: &Props) -> Option<Requirement> {
        None
    }

    /// Produces this component's resolved value, consumed by `DeferredRef`s
    /// that target it. Absent (returns `Ok(None)`) for function components.
    async fn resolve(
        &self,
        _props: &Props,
        _ctx: &SharedContext,
    ) -> Result<Option<serde_json::Value>, ComponentError> {
        Ok(None)
    }

    /// Produces this component's rendered node, given its already-
    /// normalized props, its resolved value (if any), and its children.
    async fn render(
        &self,
        props: &Props,
        resolved: Option<&serde_json::Value>,
        children: &[Node],
        ctx: &SharedContext,
    ) -> Result<Node, ComponentError>;
}

/// The static, immutable name → implementation table (spec.md §9 Design
/// Notes: "do not rely on class reflection").
pub type ComponentRegistry = HashMap<&'static str, Box<dyn Component + Send + Sync>>;

/// Builds the registry of every built-in component (spec.md §4.4).
pub fn builtin_registry() -> ComponentRegistry {
    crate::components::register_all()
}

/// The process-wide default registry, built once. `create_prompt_from_source`
/// and `render` both accept an explicit `&ComponentRegistry` instead of
/// reaching for a process-global (spec.md §9: "reimplement as an explicit
/// parameter... no process-global state is required") — this `Lazy` exists
/// only as a convenience default for callers who don't need custom
/// components.
pub static DEFAULT_REGISTRY: Lazy<ComponentRegistry> = Lazy::new(builtin_registry);
