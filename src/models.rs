//! Wire-level batch rendering types (spec.md §6 external interfaces,
//! render-time surface).
//!
//! This module defines the data structures [`crate::service::PromptService`]
//! accepts and returns. They are deliberately separate from the in-memory
//! render types in `renderer.rs`/`context.rs`: those carry non-`Send`,
//! non-`Serialize` handles (`Rc<RenderContext>`), while these are plain,
//! serializable records suitable for a batch request/response boundary.
//!
//! ## Resource Limits
//!
//! Resource limits are enforced at the library level to prevent memory
//! exhaustion from oversized or over-numerous prompt sources. These are
//! reliability measures, not security controls.

use crate::context::{Action, Environment, RenderIssue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Input to a batch of named prompt-source renders.
///
/// Every source in the batch renders against the same `inputs`/`env` —
/// per-source overrides aren't modeled; a caller needing different inputs
/// per file issues separate `render_batch` calls.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct NamedPromptBatchInput {
    /// Map of file names to prompt source text (`.prompt`/`.psx` content).
    pub sources: HashMap<String, String>,
    /// Input values shared by every source in the batch.
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

/// The serializable projection of a single render (spec.md §6 render-time
/// surface `RenderResult`), suitable for batch responses.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RenderedPrompt {
    pub ok: bool,
    pub text: String,
    pub errors: Vec<WireIssue>,
    #[serde(rename = "postExecution")]
    pub post_execution: Vec<WireAction>,
}

impl From<crate::renderer::RenderResult> for RenderedPrompt {
    fn from(r: crate::renderer::RenderResult) -> Self {
        RenderedPrompt {
            ok: r.ok,
            text: r.text,
            errors: r.errors.into_iter().map(WireIssue::from).collect(),
            post_execution: r.post_execution.into_iter().map(WireAction::from).collect(),
        }
    }
}

/// Serializable form of [`RenderIssue`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireIssue {
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prop: Option<String>,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub path: Vec<String>,
}

impl From<RenderIssue> for WireIssue {
    fn from(i: RenderIssue) -> Self {
        WireIssue {
            component: i.component,
            prop: i.prop,
            code: i.code.as_str().to_string(),
            message: i.message,
            path: i.path,
        }
    }
}

/// Serializable, tagged form of [`Action`] (spec.md §6 post-execution wire
/// shape: `{ type, ...fields }`).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum WireAction {
    #[serde(rename = "reviewFile")]
    ReviewFile {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        editor: Option<String>,
    },
    #[serde(rename = "openUrl")]
    OpenUrl {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        browser: Option<String>,
    },
    #[serde(rename = "runCommand")]
    RunCommand {
        command: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cwd: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        env: Option<Map<String, Value>>,
    },
}

impl From<Action> for WireAction {
    fn from(a: Action) -> Self {
        match a {
            Action::ReviewFile { file, editor } => WireAction::ReviewFile { file, editor },
            Action::OpenUrl { url, browser } => WireAction::OpenUrl { url, browser },
            Action::RunCommand { command, cwd, env } => WireAction::RunCommand { command, cwd, env },
        }
    }
}

/// Resource limits for preventing resource exhaustion in batch rendering.
///
/// These limits are enforced by [`crate::service::PromptService`]; they are
/// reliability measures, not security controls.
#[derive(Clone, Debug)]
pub struct ResourceLimits {
    /// Maximum number of sources in a single batch request.
    pub max_batch_size: usize,
    /// Maximum prompt source size per file (in bytes).
    pub max_source_size: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        ResourceLimits {
            max_batch_size: 1000,
            max_source_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl ResourceLimits {
    /// Validates resource limits and returns an error if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_batch_size == 0 {
            return Err("max_batch_size must be greater than 0".to_string());
        }
        if self.max_source_size == 0 {
            return Err("max_source_size must be greater than 0".to_string());
        }

        const MAX_RECOMMENDED_BATCH_SIZE: usize = 100_000;
        if self.max_batch_size > MAX_RECOMMENDED_BATCH_SIZE {
            return Err(format!(
                "max_batch_size ({}) exceeds recommended maximum of {}",
                self.max_batch_size, MAX_RECOMMENDED_BATCH_SIZE
            ));
        }

        const MAX_RECOMMENDED_SOURCE_SIZE: usize = 100 * 1024 * 1024; // 100 MB
        if self.max_source_size > MAX_RECOMMENDED_SOURCE_SIZE {
            return Err(format!(
                "max_source_size ({}) exceeds recommended maximum of {} bytes (100 MB)",
                self.max_source_size, MAX_RECOMMENDED_SOURCE_SIZE
            ));
        }

        Ok(())
    }
}

/// Environment settings carried alongside a batch request, mirroring
/// [`Environment`] in a serializable shape for config-file/CLI use.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentOverride {
    pub provider: Option<String>,
    pub default_role: Option<String>,
}

impl EnvironmentOverride {
    /// Applies this override onto a base `Environment`, leaving unset
    /// fields untouched.
    pub fn apply(&self, mut env: Environment) -> Environment {
        if let Some(provider) = &self.provider {
            env.provider = crate::context::Provider::parse(provider);
        }
        if let Some(role) = &self.default_role {
            env.default_role = role.clone();
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_limits_reject_zero_batch_size() {
        let limits = ResourceLimits {
            max_batch_size: 0,
            ..ResourceLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn environment_override_leaves_unset_fields_alone() {
        let base = Environment::default();
        let overridden = EnvironmentOverride {
            provider: Some("openai".to_string()),
            default_role: None,
        }
        .apply(base.clone());
        assert_eq!(overridden.default_role, base.default_role);
        assert_eq!(overridden.provider, crate::context::Provider::Openai);
    }
}
