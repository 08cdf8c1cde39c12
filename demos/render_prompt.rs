//! Compiles a small prompt source, then renders it to text and prints any
//! post-execution actions it queued.
//!
//! Run with `cargo run --example render_prompt`.

use promptweave::{create_prompt_from_source_default, render, Environment, RenderOptions, DEFAULT_REGISTRY};
use serde_json::{json, Map};

const SOURCE: &str = r#"
const topic = <Ask.Text name="topic" label="What should the summary focus on?" default="the key takeaways" />;
export default (
  <Prompt name="meeting-summary">
    <Role>a precise technical writer</Role>
    <Task>Summarize the attached notes, focusing on {topic}.</Task>
    <Constraints>
      <Constraint type="MUST">Keep the summary under 200 words</Constraint>
    </Constraints>
    <ReviewFile file="summary.md" />
  </Prompt>
);
"#;

#[tokio::main]
async fn main() {
    let element = create_prompt_from_source_default(SOURCE, "meeting-summary.prompt")
        .expect("prompt source should compile");

    // In a real caller this would be collected interactively, one input at
    // a time, via create_input_iterator. Here we already know the answer.
    let mut inputs = Map::new();
    inputs.insert("topic".to_string(), json!("action items and owners"));

    let options = RenderOptions {
        inputs,
        env: Environment::default(),
        trim: true,
    };

    let result = render(&element, options, &DEFAULT_REGISTRY).await;

    println!("--- rendered prompt ---");
    println!("{}", result.text);

    if !result.errors.is_empty() {
        println!("\n--- diagnostics ---");
        for issue in &result.errors {
            println!("[{}] {}: {}", issue.code.as_str(), issue.component, issue.message);
        }
    }

    if !result.post_execution.is_empty() {
        println!("\n--- post-execution actions ---");
        for action in &result.post_execution {
            println!("{action:?}");
        }
    }
}
