//! Shared `If` condition evaluation (spec.md §4.4 control flow), used both
//! by the `If` component at render time and by the input iterator when
//! deciding which branches to descend into (spec.md §4.5: "must respect
//! `If`/`ForEach` — it only surfaces Ask requirements on branches that will
//! be taken").

use crate::context::Environment;
use crate::context::Provider;
use crate::formula::{Formula, FormulaError};
use crate::node::Props;
use serde_json::{Map, Value};

/// Evaluates an `If` element's combined `when`/`provider`/`notProvider`
/// condition (spec.md §4.4: "`when` and `provider` may be combined with
/// short-circuit AND").
pub fn if_holds(
    props: &Props,
    env: &Environment,
    inputs: &Map<String, Value>,
) -> Result<bool, FormulaError> {
    let when_ok = match props.get("when") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => Formula::parse(s)?.evaluate(inputs)?,
        Some(other) => {
            return Err(FormulaError(format!(
                "`when` must be a boolean or formula string, got {other}"
            )))
        }
    };
    if !when_ok {
        return Ok(false);
    }

    if let Some(provider_prop) = props.get("provider") {
        if !provider_matches(provider_prop, env.provider) {
            return Ok(false);
        }
    }
    if let Some(not_provider_prop) = props.get("notProvider") {
        if provider_matches(not_provider_prop, env.provider) {
            return Ok(false);
        }
    }

    Ok(true)
}

fn provider_matches(prop: &Value, provider: Provider) -> bool {
    let target = provider.as_str();
    match prop {
        Value::String(s) => s.eq_ignore_ascii_case(target),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case(target)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_boolean_when() {
        let mut props = Props::new();
        props.insert("when".to_string(), json!(true));
        assert!(if_holds(&props, &Environment::default(), &Map::new()).unwrap());
    }

    #[test]
    fn formula_when_against_inputs() {
        let mut props = Props::new();
        props.insert("when".to_string(), json!("=AND(a>5,b=\"x\")"));
        let mut inputs = Map::new();
        inputs.insert("a".to_string(), json!(6));
        inputs.insert("b".to_string(), json!("x"));
        assert!(if_holds(&props, &Environment::default(), &inputs).unwrap());
        inputs.insert("a".to_string(), json!(1));
        assert!(!if_holds(&props, &Environment::default(), &inputs).unwrap());
    }

    #[test]
    fn provider_list_match() {
        let mut props = Props::new();
        props.insert("provider".to_string(), json!(["anthropic", "google"]));
        let mut env = Environment::default();
        env.provider = Provider::Anthropic;
        assert!(if_holds(&props, &env, &Map::new()).unwrap());
        env.provider = Provider::Openai;
        assert!(!if_holds(&props, &env, &Map::new()).unwrap());
    }

    #[test]
    fn integer_when_is_rejected() {
        let mut props = Props::new();
        props.insert("when".to_string(), json!(42));
        assert!(if_holds(&props, &Environment::default(), &Map::new()).is_err());
    }
}
