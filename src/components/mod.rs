//! The built-in component catalog (spec.md §4.4) and its registration into
//! a [`crate::component::ComponentRegistry`].

pub mod ask;
pub mod control_flow;
pub mod data;
pub mod examples;
pub mod post_execution;
pub mod reasoning;
pub mod structural;
pub mod values;

use crate::component::{Component, ComponentRegistry};

/// Builds the registry of every built-in component, keyed by the name the
/// element tree references it under (spec.md §4.4's component tables;
/// `Ask.*` names match the dotted convention used throughout §4.4/§4.5).
pub fn register_all() -> ComponentRegistry {
    let mut reg: ComponentRegistry = ComponentRegistry::new();

    macro_rules! register {
        ($name:expr, $impl:expr) => {
            reg.insert($name, Box::new($impl) as Box<dyn Component + Send + Sync>);
        };
    }

    // structural.rs
    register!("Prompt", structural::Prompt);
    register!("Section", structural::Section);
    register!("Role", structural::Role);
    register!("Task", structural::Task);
    register!("Constraint", structural::Constraint);
    register!("Constraints", structural::Constraints);
    register!("Contexts", structural::Contexts);
    register!("EdgeCases", structural::EdgeCases);
    register!("Guardrails", structural::Guardrails);
    register!("References", structural::References);
    register!("Format", structural::Format);
    register!("SuccessCriteria", structural::SuccessCriteria);
    register!("Criterion", structural::Criterion);
    register!("Tone", structural::Tone);
    register!("Style", structural::Style);
    register!("Audience", structural::Audience);

    // control_flow.rs
    register!("If", control_flow::If);
    register!("ForEach", control_flow::ForEach);
    register!("ForEach.Item", control_flow::Item);

    // reasoning.rs
    register!("Steps", reasoning::Steps);
    register!("Step", reasoning::Step);

    // examples.rs
    register!("Examples", examples::Examples);
    register!("Example", examples::Example);
    register!("ExampleInput", examples::ExampleInput);
    register!("ExampleOutput", examples::ExampleOutput);
    register!("NegativeExample", examples::NegativeExample);

    // data.rs
    register!("Code", data::Code);
    register!("Xml", data::Xml);
    register!("Json", data::Json);
    register!("File", data::File);

    // values.rs
    register!("Uuid", values::Uuid);
    register!("Timestamp", values::Timestamp);
    register!("DateTime", values::DateTime);
    register!("Hostname", values::Hostname);
    register!("Username", values::Username);
    register!("Cwd", values::Cwd);

    // ask.rs
    register!("Ask.Text", ask::Text);
    register!("Ask.Number", ask::Number);
    register!("Ask.Select", ask::Select);
    register!("Ask.Confirm", ask::Confirm);
    register!("Ask.Editor", ask::Editor);
    register!("Ask.MultiSelect", ask::MultiSelect);
    register!("Ask.File", ask::File);
    register!("Ask.Path", ask::Path);
    register!("Ask.Date", ask::Date);
    register!("Ask.Secret", ask::Secret);
    register!("Ask.Choice", ask::Choice);
    register!("Ask.Rating", ask::Rating);
    register!("Ask.ReviewFile", ask::ReviewFile);

    // post_execution.rs
    register!("PostExecution", post_execution::PostExecution);
    register!("ReviewFile", post_execution::ReviewFile);
    register!("OpenUrl", post_execution::OpenUrl);
    register!("RunCommand", post_execution::RunCommand);

    reg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_built_in_exactly_once() {
        let reg = register_all();
        assert_eq!(reg.len(), 53);
        for name in ["Prompt", "Ask.Text", "Steps", "If", "PostExecution", "Uuid"] {
            assert!(reg.contains_key(name), "missing {name}");
        }
    }
}
