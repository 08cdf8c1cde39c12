//! Small prop-accessor helpers shared across the component catalog
//! (spec.md §4.4). `Props` is `serde_json::Map<String, Value>`, so these
//! are thin, deliberately unsurprising wrappers rather than a bespoke
//! typed-prop abstraction.

use crate::node::Props;
use serde_json::Value;

pub fn str_prop<'a>(props: &'a Props, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

pub fn bool_prop(props: &Props, key: &str) -> Option<bool> {
    props.get(key).and_then(Value::as_bool)
}

pub fn bool_prop_or(props: &Props, key: &str, default: bool) -> bool {
    bool_prop(props, key).unwrap_or(default)
}

pub fn array_prop<'a>(props: &'a Props, key: &str) -> Option<&'a Vec<Value>> {
    props.get(key).and_then(Value::as_array)
}

pub fn object_prop<'a>(props: &'a Props, key: &str) -> Option<&'a serde_json::Map<String, Value>> {
    props.get(key).and_then(Value::as_object)
}

pub fn string_list_prop(props: &Props, key: &str) -> Vec<String> {
    array_prop(props, key)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn num_prop(props: &Props, key: &str) -> Option<f64> {
    props.get(key).and_then(Value::as_f64)
}
