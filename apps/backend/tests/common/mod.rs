#![allow(dead_code)]

// tests/common/mod.rs
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Parse a response body as JSON, panicking with the raw text on failure.
pub fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        panic!(
            "Response body is not JSON: {}",
            String::from_utf8_lossy(bytes)
        )
    })
}

/// Names held by a JSON array of strings.
pub fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}
