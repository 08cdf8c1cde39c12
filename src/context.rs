//! `RenderContext` and the supporting wire types it carries (spec.md §3,
//! §6).
//!
//! The mutable lists (`postExecution`, `errors`, `metadata`, the resolved-
//! value map) live behind a single [`RefCell`], shared via [`Rc`] across
//! concurrently-joined sibling renders. The single-threaded cooperative
//! scheduler (spec.md §5) is what makes sharing interior-mutable state
//! without a mutex sound — no render ever crosses a thread boundary.

use crate::node::ElementId;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The LLM provider a render targets (spec.md §6 configuration).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    Openai,
    Google,
    Unspecified,
}

impl Provider {
    /// Parses a provider name, defaulting unknown strings to `Unspecified`
    /// rather than erroring — the config surface is deliberately permissive
    /// (spec.md §6: `env.llm.provider ∈ {anthropic, openai, google,
    /// unspecified, …}`, an open set).
    pub fn parse(name: &str) -> Provider {
        match name.to_ascii_lowercase().as_str() {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::Openai,
            "google" => Provider::Google,
            _ => Provider::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Openai => "openai",
            Provider::Google => "google",
            Provider::Unspecified => "unspecified",
        }
    }
}

/// `env.prompt.*` feature toggles (spec.md §6).
#[derive(Clone, Copy, Debug)]
pub struct PromptDefaults {
    pub include_role: bool,
    pub include_format: bool,
    pub include_constraints: bool,
    pub include_success_criteria: bool,
    pub include_guardrails: bool,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        PromptDefaults {
            include_role: true,
            include_format: true,
            include_constraints: true,
            include_success_criteria: false,
            include_guardrails: false,
        }
    }
}

/// `env.llm`/`env.prompt` configuration (spec.md §3 `RenderContext`, §6).
#[derive(Clone, Debug)]
pub struct Environment {
    pub provider: Provider,
    pub prompt: PromptDefaults,
    pub default_role: String,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            provider: Provider::Unspecified,
            prompt: PromptDefaults::default(),
            default_role: "Assistant".to_string(),
        }
    }
}

/// A post-execution action record (spec.md §4.4 Post-execution, §6 wire
/// shape).
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ReviewFile { file: String, editor: Option<String> },
    OpenUrl { url: String, browser: Option<String> },
    RunCommand {
        command: String,
        cwd: Option<String>,
        env: Option<Map<String, Value>>,
    },
}

impl Action {
    /// The wire `type` discriminant (spec.md §6).
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::ReviewFile { .. } => "reviewFile",
            Action::OpenUrl { .. } => "openUrl",
            Action::RunCommand { .. } => "runCommand",
        }
    }
}

/// One accumulated render-time diagnostic (spec.md §4.7, §7). Never
/// propagates as a Rust error — these are plain data, appended to
/// `RenderContext` and surfaced in `RenderResult::errors`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderIssue {
    pub component: String,
    pub prop: Option<String>,
    pub code: crate::error::ErrorCode,
    pub message: String,
    pub path: Vec<String>,
}

impl RenderIssue {
    pub fn new(
        component: impl Into<String>,
        prop: Option<&str>,
        code: crate::error::ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        RenderIssue {
            component: component.into(),
            prop: prop.map(|s| s.to_string()),
            code,
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }
}

/// The mutable portion of a render: accumulated actions, issues, cross-
/// component metadata, resolved values, and hoisted-name bookkeeping.
#[derive(Default)]
struct MutableState {
    post_execution: Vec<Action>,
    issues: Vec<RenderIssue>,
    metadata: Map<String, Value>,
    resolved: HashMap<ElementId, Value>,
    hoisted_names: HashMap<String, ElementId>,
}

/// The process-scoped state for one render (spec.md §3 `RenderContext`).
///
/// `inputs` and `env` are read-only to components (spec.md §5 shared-
/// resource policy); the rest is append-/mutate-only behind a `RefCell`.
pub struct RenderContext {
    pub inputs: Map<String, Value>,
    pub env: Environment,
    state: RefCell<MutableState>,
}

/// A shared handle to a [`RenderContext`], cloned cheaply (`Rc::clone`)
/// into every concurrently-joined child render.
pub type SharedContext = Rc<RenderContext>;

impl RenderContext {
    pub fn new(inputs: Map<String, Value>, env: Environment) -> SharedContext {
        Rc::new(RenderContext {
            inputs,
            env,
            state: RefCell::new(MutableState::default()),
        })
    }

    /// Looks up a supplied input value by name.
    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }

    /// Records a post-execution action. Appended in the order its owning
    /// component finishes `render` (spec.md §4.3 ordering guarantees).
    pub fn push_action(&self, action: Action) {
        self.state.borrow_mut().post_execution.push(action);
    }

    /// Records a render-time diagnostic.
    pub fn push_issue(&self, issue: RenderIssue) {
        self.state.borrow_mut().issues.push(issue);
    }

    /// Memoizes a component's resolved value, consumed by `DeferredRef`s
    /// that target it (spec.md §4.3 step 3).
    pub fn set_resolved(&self, id: ElementId, value: Value) {
        self.state.borrow_mut().resolved.insert(id, value);
    }

    /// Looks up a previously memoized resolved value.
    pub fn resolved(&self, id: ElementId) -> Option<Value> {
        self.state.borrow().resolved.get(&id).cloned()
    }

    /// Associates a hoisted identifier (spec.md §4.2 `hoistName`) with the
    /// element that owns it, so source-level interpolation (`{name}`) can
    /// be compiled to a `DeferredRef` lookup by name.
    pub fn hoist(&self, name: impl Into<String>, id: ElementId) {
        self.state.borrow_mut().hoisted_names.insert(name.into(), id);
    }

    /// Resolves a hoisted name back to its owning element id.
    pub fn hoisted(&self, name: &str) -> Option<ElementId> {
        self.state.borrow().hoisted_names.get(name).copied()
    }

    /// Reads (and clones) a metadata value shared across components.
    pub fn metadata_get(&self, key: &str) -> Option<Value> {
        self.state.borrow().metadata.get(key).cloned()
    }

    /// Writes a metadata value shared across components (spec.md §3
    /// `RenderContext.metadata`, "cross-component signalling").
    pub fn metadata_set(&self, key: impl Into<String>, value: Value) {
        self.state.borrow_mut().metadata.insert(key.into(), value);
    }

    /// Drains the accumulated actions and issues without consuming the
    /// context. Called once, at the end of [`crate::renderer::render`], via
    /// the shared `Rc` handle (whose strong count may still be >1 if a
    /// component stashed a clone, so this takes `&self` rather than
    /// requiring `Rc::try_unwrap`).
    pub fn drain(&self) -> (Vec<Action>, Vec<RenderIssue>) {
        let mut state = self.state.borrow_mut();
        (
            std::mem::take(&mut state.post_execution),
            std::mem::take(&mut state.issues),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse_defaults_to_unspecified() {
        assert_eq!(Provider::parse("anthropic"), Provider::Anthropic);
        assert_eq!(Provider::parse("ANTHROPIC"), Provider::Anthropic);
        assert_eq!(Provider::parse("not-a-provider"), Provider::Unspecified);
    }

    #[test]
    fn resolved_values_round_trip() {
        let ctx = RenderContext::new(Map::new(), Environment::default());
        let id = ElementId::fresh();
        assert!(ctx.resolved(id).is_none());
        ctx.set_resolved(id, Value::from("hi"));
        assert_eq!(ctx.resolved(id), Some(Value::from("hi")));
    }
}
