//! Shared test utilities for the tokenguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `tokenguard-types` would not suffice.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like an audit report (has `schema`,
///    `tool` and `generated_at`). Finding `data` payloads are free-form and
///    may carry a `tool` object of their own.
///
/// 2. **Recursive**: `generated_at` is normalized at any depth because its
///    placeholder value is fixed and cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("generated_at");
        if is_report
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("generated_at") {
                map.insert(
                    "generated_at".to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_report_tool_version_and_timestamp() {
        let input = json!({
            "schema": "tokenguard.audit.findings.v1",
            "tool": { "name": "tokenguard", "version": "0.1.0" },
            "generated_at": "2026-01-01T00:00:00Z",
            "scanned": "src",
            "findings": [
                {
                    "data": { "component": "Text", "version": "2" }
                }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], VERSION_PLACEHOLDER);
        assert_eq!(result["tool"]["name"], "tokenguard");
        assert_eq!(result["generated_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(result["scanned"], "src");
        assert_eq!(result["findings"][0]["data"]["version"], "2");
    }

    #[test]
    fn nested_report_like_object_keeps_its_version() {
        let input = json!({
            "schema": "tokenguard.audit.findings.v1",
            "tool": { "name": "tokenguard", "version": "0.1.0" },
            "generated_at": "2026-01-01T00:00:00Z",
            "findings": [
                {
                    "data": {
                        "schema": "fake",
                        "tool": { "name": "inner", "version": "9.9.9" },
                        "generated_at": "2026-06-01T12:00:00Z"
                    }
                }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], VERSION_PLACEHOLDER);
        assert_eq!(
            result["findings"][0]["data"]["tool"]["version"], "9.9.9",
            "nested tool.version should NOT be normalized"
        );
        assert_eq!(
            result["findings"][0]["data"]["generated_at"], TIMESTAMP_PLACEHOLDER,
            "nested generated_at should be normalized"
        );
    }

    #[test]
    fn root_without_report_keys_not_normalized() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "generated_at": "2026-01-01T00:00:00Z"
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["generated_at"], TIMESTAMP_PLACEHOLDER);
    }
}
