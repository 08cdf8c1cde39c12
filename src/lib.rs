//! # promptweave
//!
//! A declarative prompt-authoring engine: authors compose prompts as trees
//! of typed, XML-like element expressions (a "prompt source"); this crate
//! compiles such a source into an element tree, gathers user-supplied input
//! values, and renders the tree to a single text artifact meant for an LLM
//! provider, alongside a list of post-execution actions.
//!
//! ## Architecture overview
//!
//! - **`node`**/**`deferred`** — the element/node data model and its
//!   deferred-property-access protocol.
//! - **`factory`** — element construction and child-list normalization.
//! - **`schema`**/**`component`** — the component contract, static shape
//!   schemas, and the registry built-ins register into.
//! - **`components`** — the built-in catalog: structural composition,
//!   control flow, reasoning, examples, data wrappers, utility values, the
//!   Ask family, and post-execution markers.
//! - **`source`** — JSX-flavored prompt source: preprocess, parse/lower
//!   (`oxc`), and evaluate into an element tree.
//! - **`input_iterator`** — the interactive input-collection walk.
//! - **`renderer`**/**`context`** — the async render walk and its shared,
//!   single-threaded `RenderContext`.
//! - **`delimiter`**/**`childsearch`**/**`presets`**/**`provider`**/
//!   **`condition`**/**`formula`**/**`requirement`**/**`propx`** —
//!   supporting utilities the catalog builds on.
//! - **`models`**/**`service`** — the batch-rendering service layer and its
//!   wire types.
//!
//! ## Usage
//!
//! ```no_run
//! use promptweave::{create_prompt_from_source_default, render, RenderOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let element = create_prompt_from_source_default(
//!     r#"<Prompt name="demo"><Task verb="summarize" /></Prompt>"#,
//!     "demo.prompt",
//! )?;
//! let result = render(&element, RenderOptions::default(), &promptweave::DEFAULT_REGISTRY).await;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

pub mod childsearch;
pub mod component;
pub mod components;
pub mod condition;
pub mod context;
pub mod deferred;
pub mod delimiter;
pub mod error;
pub mod factory;
pub mod formula;
pub mod input_iterator;
pub mod models;
pub mod node;
pub mod presets;
pub mod propx;
pub mod provider;
pub mod renderer;
pub mod requirement;
pub mod schema;
pub mod service;
pub mod source;

pub use component::{builtin_registry, Component, ComponentError, ComponentKind, ComponentRegistry, DEFAULT_REGISTRY};
pub use context::{Action, Environment, Provider, RenderContext, RenderIssue, SharedContext};
pub use error::{ErrorCode, PromptError};
pub use node::{Element, ElementId, ElementType, Node, Props};
pub use renderer::{render, RenderOptions, RenderResult};
pub use source::{create_input_iterator, create_prompt_from_source, create_prompt_from_source_default};
