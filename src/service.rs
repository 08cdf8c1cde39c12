//! High-level batch rendering service with resource limits and error
//! handling (spec.md §6 external interfaces), generalizing the per-prompt
//! [`crate::renderer::render`] pass into a named-batch operation.
//!
//! ## Architecture
//!
//! `PromptService` wraps [`PromptServiceConfig`] (resource limits plus the
//! base [`Environment`]) and offers an async `render_batch` — the natural
//! shape for this crate's async render walk — alongside a blocking wrapper
//! for callers (like the CLI) that aren't already inside a `tokio` runtime.
//!
//! ## Configuration
//!
//! Configuration can be loaded from environment variables
//! (`PromptServiceConfig::from_env`) or, behind the `cli` feature, from a
//! TOML file (`PromptServiceConfig::from_file`).

use crate::component::ComponentRegistry;
use crate::context::Environment;
use crate::models::{EnvironmentOverride, NamedPromptBatchInput, RenderedPrompt, ResourceLimits};
use crate::renderer::{self, RenderOptions};
use crate::source::create_prompt_from_source;
use anyhow::Error as AnyhowError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::Path;

const ENV_MAX_BATCH_SIZE: &str = "PROMPTWEAVE_MAX_BATCH_SIZE";
const ENV_MAX_SOURCE_SIZE: &str = "PROMPTWEAVE_MAX_SOURCE_SIZE";
const ENV_PROVIDER: &str = "PROMPTWEAVE_PROVIDER";

/// Configuration for [`PromptService`].
#[derive(Clone, Debug)]
pub struct PromptServiceConfig {
    /// Resource limits for preventing resource exhaustion in batch requests.
    pub resource_limits: ResourceLimits,
    /// The base environment every render in a batch starts from.
    pub environment: Environment,
}

impl Default for PromptServiceConfig {
    fn default() -> Self {
        PromptServiceConfig {
            resource_limits: ResourceLimits::default(),
            environment: Environment::default(),
        }
    }
}

/// TOML configuration structure for file-based configuration.
#[cfg(feature = "cli")]
#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    max_batch_size: Option<usize>,
    max_source_size: Option<usize>,
    provider: Option<String>,
    default_role: Option<String>,
}

impl PromptServiceConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = env::var(ENV_MAX_BATCH_SIZE) {
            if let Ok(v) = raw.parse() {
                config.resource_limits.max_batch_size = v;
            }
        }
        if let Ok(raw) = env::var(ENV_MAX_SOURCE_SIZE) {
            if let Ok(v) = raw.parse() {
                config.resource_limits.max_source_size = v;
            }
        }
        if let Ok(provider) = env::var(ENV_PROVIDER) {
            config.environment.provider = crate::context::Provider::parse(&provider);
        }
        config
    }

    /// Loads configuration from a TOML file (requires the `cli` feature).
    #[cfg(feature = "cli")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read configuration file {}: {e}", path.display()))?;
        let toml_config: TomlConfig = toml::from_str(&contents)
            .map_err(|e| format!("failed to parse configuration file {}: {e}", path.display()))?;

        let mut config = Self::default();
        if let Some(v) = toml_config.max_batch_size {
            config.resource_limits.max_batch_size = v;
        }
        if let Some(v) = toml_config.max_source_size {
            config.resource_limits.max_source_size = v;
        }
        let overrides = EnvironmentOverride {
            provider: toml_config.provider,
            default_role: toml_config.default_role,
        };
        config.environment = overrides.apply(config.environment);
        Ok(config)
    }

    /// Loads configuration from a TOML file, then applies environment
    /// variable overrides on top (requires the `cli` feature).
    #[cfg(feature = "cli")]
    pub fn from_file_and_env(path: impl AsRef<Path>) -> Result<Self, String> {
        let mut config = Self::from_file(path)?;
        let env_config = Self::from_env();
        config.resource_limits = env_config.resource_limits;
        if env::var(ENV_PROVIDER).is_ok() {
            config.environment.provider = env_config.environment.provider;
        }
        Ok(config)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.resource_limits.validate()
    }
}

/// Top-level service that batches prompt-source rendering requests.
#[derive(Clone)]
pub struct PromptService {
    config: PromptServiceConfig,
}

impl PromptService {
    /// Creates a new service with the given configuration, validating it
    /// first.
    pub fn new(config: PromptServiceConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(PromptService { config })
    }

    /// Returns a reference to the service configuration.
    pub fn config(&self) -> &PromptServiceConfig {
        &self.config
    }

    /// Renders a batch of named prompt sources against a shared set of
    /// inputs (spec.md §6), recovering from individual source failures so
    /// one bad file doesn't abort the whole batch.
    #[tracing::instrument(name = "render_batch", skip_all, fields(batch_size = input.sources.len()))]
    pub async fn render_batch(
        &self,
        input: &NamedPromptBatchInput,
        registry: &ComponentRegistry,
    ) -> Result<BatchRenderOutcome, RenderBatchError> {
        self.validate_resource_limits(input)?;

        if input.sources.is_empty() {
            return Ok(BatchRenderOutcome::empty());
        }

        let mut files = HashMap::with_capacity(input.sources.len());
        let mut errors = Vec::new();
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for (name, source) in &input.sources {
            match self.render_one(name, source, input, registry).await {
                Ok(rendered) => {
                    succeeded += 1;
                    files.insert(name.clone(), FileRenderOutcome::success(rendered));
                }
                Err(err) => {
                    failed += 1;
                    tracing::warn!(file = name.as_str(), error = %err, "prompt source failed to render");
                    let message = format!("{err:#}");
                    errors.push(BatchError { file: name.clone(), message: message.clone() });
                    files.insert(name.clone(), FileRenderOutcome::failure(message));
                }
            }
        }

        tracing::info!(succeeded, failed, "batch render complete");
        Ok(BatchRenderOutcome::new(files, errors, succeeded, failed))
    }

    /// Synchronous convenience wrapper over [`render_batch`](Self::render_batch),
    /// for callers not already running inside a `tokio` runtime — builds a
    /// current-thread runtime matching the render walk's own single-threaded
    /// cooperative scheduler (spec.md §5).
    pub fn render_batch_blocking(
        &self,
        input: &NamedPromptBatchInput,
        registry: &ComponentRegistry,
    ) -> Result<BatchRenderOutcome, RenderBatchError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| RenderBatchError::Internal(AnyhowError::from(e)))?;
        rt.block_on(self.render_batch(input, registry))
    }

    async fn render_one(
        &self,
        name: &str,
        source: &str,
        input: &NamedPromptBatchInput,
        registry: &ComponentRegistry,
    ) -> Result<RenderedPrompt, AnyhowError> {
        let element = create_prompt_from_source(source, name, registry)?;
        let options = RenderOptions {
            inputs: input.inputs.clone(),
            env: self.config.environment.clone(),
            trim: true,
        };
        let result = renderer::render(&element, options, registry).await;
        Ok(RenderedPrompt::from(result))
    }

    fn validate_resource_limits(&self, input: &NamedPromptBatchInput) -> Result<(), RenderBatchError> {
        let limits = &self.config.resource_limits;

        if input.sources.len() > limits.max_batch_size {
            return Err(RenderBatchError::InvalidRequest(format!(
                "batch size {} exceeds maximum allowed {}",
                input.sources.len(),
                limits.max_batch_size
            )));
        }

        for (name, source) in &input.sources {
            if source.len() > limits.max_source_size {
                return Err(RenderBatchError::InvalidRequest(format!(
                    "prompt source '{name}' is {} bytes, exceeds maximum allowed {} bytes",
                    source.len(),
                    limits.max_source_size
                )));
            }
        }

        Ok(())
    }
}

/// Errors surfaced by [`PromptService::render_batch`] itself (distinct from
/// per-file failures, which are recovered into [`BatchRenderOutcome::errors`]).
#[derive(Debug)]
pub enum RenderBatchError {
    /// The request itself is invalid (e.g. a resource limit exceeded).
    InvalidRequest(String),
    /// An internal error occurred setting up the batch.
    Internal(AnyhowError),
}

impl std::error::Error for RenderBatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderBatchError::Internal(err) => Some(err.as_ref()),
            RenderBatchError::InvalidRequest(_) => None,
        }
    }
}

impl std::fmt::Display for RenderBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderBatchError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            RenderBatchError::Internal(err) => write!(f, "internal error: {err}"),
        }
    }
}

impl From<AnyhowError> for RenderBatchError {
    fn from(err: AnyhowError) -> Self {
        RenderBatchError::Internal(err)
    }
}

impl From<crate::error::PromptError> for RenderBatchError {
    fn from(err: crate::error::PromptError) -> Self {
        RenderBatchError::Internal(AnyhowError::from(err))
    }
}

/// Outcome of a batch rendering operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRenderOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
    #[serde(default)]
    pub files: HashMap<String, FileRenderOutcome>,
}

impl BatchRenderOutcome {
    pub fn new(
        files: HashMap<String, FileRenderOutcome>,
        errors: Vec<BatchError>,
        succeeded: usize,
        failed: usize,
    ) -> Self {
        BatchRenderOutcome { total: succeeded + failed, succeeded, failed, errors, files }
    }

    pub fn empty() -> Self {
        BatchRenderOutcome { total: 0, succeeded: 0, failed: 0, errors: Vec::new(), files: HashMap::new() }
    }

    pub fn is_all_success(&self) -> bool {
        self.failed == 0
    }

    pub fn is_complete_failure(&self) -> bool {
        self.total > 0 && self.succeeded == 0
    }
}

/// Error information for a single source in a batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchError {
    pub file: String,
    pub message: String,
}

/// Status of a single source's render operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRenderStatus {
    Success,
    Failed,
}

/// Outcome of rendering a single named prompt source.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileRenderOutcome {
    pub status: FileRenderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderedPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRenderOutcome {
    fn success(result: RenderedPrompt) -> Self {
        FileRenderOutcome { status: FileRenderStatus::Success, result: Some(result), error: None }
    }

    fn failure(message: String) -> Self {
        FileRenderOutcome { status: FileRenderStatus::Failed, result: None, error: Some(message) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DEFAULT_REGISTRY;
    use serde_json::Map;

    #[tokio::test]
    async fn empty_batch_renders_nothing() {
        let service = PromptService::new(PromptServiceConfig::default()).unwrap();
        let input = NamedPromptBatchInput { sources: HashMap::new(), inputs: Map::new() };
        let outcome = service.render_batch(&input, &DEFAULT_REGISTRY).await.unwrap();
        assert_eq!(outcome.total, 0);
    }

    #[tokio::test]
    async fn batch_recovers_from_one_bad_source() {
        let service = PromptService::new(PromptServiceConfig::default()).unwrap();
        let mut sources = HashMap::new();
        sources.insert("good.prompt".to_string(), r#"<Task verb="summarize" />"#.to_string());
        sources.insert("bad.prompt".to_string(), "const x = ;".to_string());
        let input = NamedPromptBatchInput { sources, inputs: Map::new() };

        let outcome = service.render_batch(&input, &DEFAULT_REGISTRY).await.unwrap();
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.files["good.prompt"].status, FileRenderStatus::Success);
        assert_eq!(outcome.files["bad.prompt"].status, FileRenderStatus::Failed);
    }

    #[test]
    fn batch_size_over_limit_is_rejected() {
        let mut config = PromptServiceConfig::default();
        config.resource_limits.max_batch_size = 1;
        let service = PromptService::new(config).unwrap();
        let mut sources = HashMap::new();
        sources.insert("a.prompt".to_string(), "<Task/>".to_string());
        sources.insert("b.prompt".to_string(), "<Task/>".to_string());
        let input = NamedPromptBatchInput { sources, inputs: Map::new() };
        let result = service.render_batch_blocking(&input, &DEFAULT_REGISTRY);
        assert!(matches!(result, Err(RenderBatchError::InvalidRequest(_))));
    }
}
