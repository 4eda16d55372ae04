//! Shape assertions for response bodies.

use serde_json::Value;

/// Checks the `{"error", "message"}` body and returns the message.
pub fn assert_error_body(json: &Value) -> String {
    let obj = json.as_object().expect("Error body should be an object");
    assert!(obj["error"].is_string(), "'error' should be a string");
    obj["message"]
        .as_str()
        .expect("'message' should be a string")
        .to_string()
}

/// Checks every entry of `{"flavors": [...]}` carries the flavor fields.
pub fn assert_flavor_list(json: &Value) -> usize {
    let flavors = json["flavors"]
        .as_array()
        .expect("'flavors' should be an array");

    for flavor in flavors {
        for field in ["id", "name", "cpus", "mem", "storage", "price"] {
            assert!(flavor.get(field).is_some(), "Flavor missing '{}': {}", field, flavor);
        }
    }
    flavors.len()
}

pub fn assert_valid_yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap_or_else(|e| panic!("Invalid YAML ({}): {}", e, text))
}
