pub mod algorithm;
pub mod client;
pub mod collector;
pub mod document;
pub mod error;
pub mod experiment;
pub mod id;
pub mod nas;
pub mod parameter;
pub mod table;
pub mod template;
pub mod trial;

use serde_json::{Map, Value};

/// Lower-cases every key of every object in a list response.
///
/// The backend answers with PascalCase keys; typed decoding happens after this.
/// Nested objects are left untouched. Non-object elements pass through.
pub fn lowercase_keys(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect::<Map<String, Value>>(),
            ),
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::lowercase_keys;
    use serde_json::json;

    #[test]
    fn lowercases_top_level_keys() {
        let items = vec![json!({ "Name": "x", "Status": "Running" })];
        assert_eq!(lowercase_keys(items), vec![json!({ "name": "x", "status": "Running" })]);
    }

    #[test]
    fn keeps_nested_keys_and_scalars() {
        let items = vec![json!({ "MetricsName": ["Acc"], "Nested": { "Inner": 1 } }), json!(3)];
        assert_eq!(
            lowercase_keys(items),
            vec![json!({ "metricsname": ["Acc"], "nested": { "Inner": 1 } }), json!(3)]
        );
    }
}
