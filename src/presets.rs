//! Preset tables consulted by structural components (spec.md §4.4,
//! GLOSSARY "Preset"): named bundles of default text for roles, tasks,
//! constraints, guardrails, edge cases, step phases, reference styles, and
//! success criteria.
//!
//! Small `static` tables looked up by name, with a sensible fallback when
//! the name isn't recognized.

/// Default bullet constraints injected by `Prompt` unless overridden
/// (spec.md §4.4 `Constraints` container, S1 end-to-end scenario).
pub const DEFAULT_CONSTRAINTS: &[&str] = &[
    "MUST: be concise",
    "MUST: be accurate",
    "SHOULD: avoid unnecessary repetition",
];

/// Role preset phrases, looked up by `Role.preset`.
pub fn role_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "assistant" => "a helpful assistant",
        "expert" => "a domain expert",
        "reviewer" => "a meticulous reviewer",
        "teacher" => "a patient teacher",
        "analyst" => "a rigorous analyst",
        _ => return None,
    })
}

/// Task verb preset phrases, looked up by `Task.preset`.
pub fn task_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "summarize" => "Summarize the provided content",
        "translate" => "Translate the provided content",
        "classify" => "Classify the provided content",
        "extract" => "Extract the requested information",
        "generate" => "Generate new content matching the request",
        "review" => "Review the provided content",
        _ => return None,
    })
}

/// Constraint preset phrases, looked up by `Constraint.preset`.
pub fn constraint_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "concise" => "be concise",
        "accurate" => "be factually accurate",
        "no-speculation" => "avoid speculation",
        "cite-sources" => "cite sources for factual claims",
        "on-topic" => "stay on topic",
        _ => return None,
    })
}

/// Guardrail preset phrases, looked up by entries in `Guardrails.prohibit`/
/// `Guardrails.require` or a bare `Guardrails.preset`.
pub fn guardrail_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "no-pii" => "never request or repeat personally identifiable information",
        "no-harm" => "never produce content that could cause real-world harm",
        "stay-in-scope" => "never perform actions outside the stated task",
        _ => return None,
    })
}

/// Edge-case preset phrases, looked up by `EdgeCases.preset`.
pub fn edge_case_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "empty-input" => "the input is empty or whitespace-only",
        "conflicting-instructions" => "instructions conflict with each other",
        "ambiguous-request" => "the request is ambiguous",
        _ => return None,
    })
}

/// Reference-style phrases, looked up by `References.style`.
pub fn reference_style(name: &str) -> &'static str {
    match name {
        "footnote" => "Cite using footnote markers.",
        "inline" => "Cite sources inline.",
        _ => "List sources at the end.",
    }
}

/// Success-criteria preset phrases, looked up by `SuccessCriteria.preset`.
pub fn success_criteria_preset(name: &str) -> Option<&'static str> {
    Some(match name {
        "correctness" => "The output is factually correct",
        "completeness" => "The output addresses every part of the request",
        "clarity" => "The output is clear and unambiguous",
        _ => return None,
    })
}

/// Named phases for a `Steps.preset` (spec.md §4.4 reasoning table).
pub fn steps_preset_phases(name: &str) -> Option<&'static [&'static str]> {
    Some(match name {
        "analyze-plan-execute" => &["Analyze the input", "Plan an approach", "Execute the plan"],
        "research-draft-revise" => &["Research the topic", "Draft a response", "Revise for clarity"],
        _ => return None,
    })
}

/// `Steps.style` instruction phrases (spec.md §4.4 reasoning table).
pub fn steps_style_instruction(style: &str) -> &'static str {
    match style {
        "think-aloud" => "Think aloud through each step before answering.",
        "structured" => "Work through the following structured steps.",
        "minimal" => "Briefly note each step.",
        "least-to-most" => "Solve the simplest sub-problem first, then build up.",
        _ => "Work through the following steps, one at a time.",
    }
}
