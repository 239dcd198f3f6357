//! Static tool descriptions.
//!
//! A `ToolDefinition` declares what a provider can do and what arguments it
//! takes. Definitions are immutable after registration; parameter order is
//! significant because validation reports the first violation in declaration
//! order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared runtime type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Array,
    /// Plain JSON object. Arrays do not qualify.
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Whether a runtime JSON value matches this declared type.
    ///
    /// `Object` explicitly excludes arrays even though both are compound
    /// JSON values.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    /// Closed set of accepted values, compared against the stringified
    /// runtime value. `None` means unconstrained.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            allowed_values: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_allowed_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// A callable tool as declared by its provider.
///
/// Tool names are unique within a provider; the executor looks tools up by
/// name after the provider itself has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter, preserving declaration order.
    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_type_matches_runtime_values() {
        assert!(ParamType::String.matches(&json!("hi")));
        assert!(ParamType::Number.matches(&json!(5)));
        assert!(ParamType::Number.matches(&json!(5.5)));
        assert!(ParamType::Boolean.matches(&json!(true)));
        assert!(ParamType::Array.matches(&json!([1, 2])));
        assert!(ParamType::Object.matches(&json!({"a": 1})));
    }

    #[test]
    fn object_excludes_arrays() {
        assert!(!ParamType::Object.matches(&json!([1, 2])));
        assert!(ParamType::Array.matches(&json!([1, 2])));
        assert!(!ParamType::Array.matches(&json!({"a": 1})));
    }

    #[test]
    fn definition_preserves_parameter_order() {
        let tool = ToolDefinition::new("search")
            .with_parameter(ToolParameter::new("query", ParamType::String).required())
            .with_parameter(ToolParameter::new("limit", ParamType::Number));

        let names: Vec<_> = tool.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["query", "limit"]);
    }

    #[test]
    fn parameter_deserializes_wire_shape() {
        let param: ToolParameter = serde_json::from_value(json!({
            "name": "mode",
            "type": "string",
            "required": true,
            "enum": ["fast", "thorough"]
        }))
        .unwrap();

        assert_eq!(param.name, "mode");
        assert_eq!(param.param_type, ParamType::String);
        assert!(param.required);
        assert_eq!(
            param.allowed_values,
            Some(vec!["fast".to_string(), "thorough".to_string()])
        );
    }
}
