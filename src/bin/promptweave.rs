//! Command-line front-end: compiles a prompt source file, collects any
//! missing interactive inputs from stdin, renders it, and prints the
//! result plus any queued post-execution actions.

use clap::Parser;
use promptweave::{
    create_input_iterator, create_prompt_from_source_default, render, Environment, Provider,
    RenderOptions, DEFAULT_REGISTRY,
};
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Renders a declarative prompt source to text.
#[derive(Parser, Debug)]
#[command(name = "promptweave")]
#[command(author, version, about = "Declarative prompt-authoring engine", long_about = None)]
struct Cli {
    /// Path to the `.prompt`/`.psx` source file to render.
    source: PathBuf,

    /// LLM provider to adapt output for.
    #[arg(long, default_value = "unspecified", env = "PROMPTWEAVE_PROVIDER")]
    provider: String,

    /// Default role name used when no `<Role>` is present.
    #[arg(long, default_value = "Assistant", env = "PROMPTWEAVE_DEFAULT_ROLE")]
    default_role: String,

    /// Skip trimming the final rendered text.
    #[arg(long)]
    no_trim: bool,

    /// Fail instead of prompting interactively when an input is missing.
    #[arg(long)]
    non_interactive: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.source) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", cli.source.display());
            return ExitCode::FAILURE;
        }
    };

    let filename = cli
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prompt".to_string());

    let element = match create_prompt_from_source_default(&source, &filename) {
        Ok(el) => el,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let env = Environment {
        provider: Provider::parse(&cli.provider),
        default_role: cli.default_role,
        ..Environment::default()
    };

    let inputs = match collect_inputs(&element, env.clone(), cli.non_interactive) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = RenderOptions {
        inputs,
        env,
        trim: !cli.no_trim,
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    let result = rt.block_on(render(&element, options, &DEFAULT_REGISTRY));

    println!("{}", result.text);

    if !result.errors.is_empty() {
        eprintln!("\n{} diagnostic(s):", result.errors.len());
        for issue in &result.errors {
            eprintln!("  [{}] {}: {}", issue.code.as_str(), issue.component, issue.message);
        }
    }

    if !result.post_execution.is_empty() {
        eprintln!("\n{} post-execution action(s):", result.post_execution.len());
        for action in &result.post_execution {
            eprintln!("  {action:?}");
        }
    }

    if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Walks pending `Ask` requirements one at a time, prompting on stdin for
/// each, until the tree has no unanswered requirement left.
fn collect_inputs(
    element: &promptweave::Element,
    env: Environment,
    non_interactive: bool,
) -> Result<Map<String, Value>, String> {
    let mut iter = create_input_iterator(element, &DEFAULT_REGISTRY, env, Map::new());

    while let Some(req) = iter.current() {
        if non_interactive {
            return Err(format!("missing required input '{}' (non-interactive mode)", req.name));
        }

        let prompt = req.label.clone().unwrap_or_else(|| req.name.clone());
        let suffix = req
            .default
            .as_ref()
            .map(|d| format!(" [{d}]"))
            .unwrap_or_default();
        print!("{prompt}{suffix}: ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        io::stdin().read_line(&mut line).map_err(|e| e.to_string())?;
        let line = line.trim();

        let value = if line.is_empty() {
            req.default.clone().unwrap_or(Value::Null)
        } else {
            parse_answer(line, req.kind)
        };

        iter.next(value).map_err(|e| e.to_string())?;
    }

    Ok(iter.into_inputs())
}

fn parse_answer(line: &str, kind: promptweave::requirement::RequirementKind) -> Value {
    use promptweave::requirement::RequirementKind;
    match kind {
        RequirementKind::Number | RequirementKind::Rating => line
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(line.to_string())),
        RequirementKind::Confirm => match line.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Value::Bool(true),
            _ => Value::Bool(false),
        },
        RequirementKind::MultiSelect => {
            Value::Array(line.split(',').map(|s| Value::String(s.trim().to_string())).collect())
        }
        _ => Value::String(line.to_string()),
    }
}
