//! Parameter validation.
//!
//! Pure check of supplied arguments against a tool's declared parameters.
//! The first violation in declaration order wins, which keeps failure
//! messages deterministic for a given request.

use crate::error::ParamError;
use crate::tool::ToolDefinition;
use serde_json::{Map, Value};

/// Stringify a value the way enum membership is compared: bare strings drop
/// their quotes, everything else uses its JSON rendering.
fn enum_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate `params` against the tool's declared parameters.
///
/// Checks, per parameter in declaration order:
/// - a `required` parameter must be present;
/// - a present value must match the declared type (`object` excludes arrays);
/// - a present value must be a member of the declared enum, if any.
pub fn validate_params(tool: &ToolDefinition, params: &Map<String, Value>) -> Result<(), ParamError> {
    for parameter in &tool.parameters {
        let value = match params.get(&parameter.name) {
            Some(value) => value,
            None => {
                if parameter.required {
                    return Err(ParamError::MissingRequired {
                        name: parameter.name.clone(),
                    });
                }
                continue;
            }
        };

        if !parameter.param_type.matches(value) {
            return Err(ParamError::TypeMismatch {
                name: parameter.name.clone(),
                expected: parameter.param_type.as_str(),
            });
        }

        if let Some(allowed) = &parameter.allowed_values {
            if !allowed.contains(&enum_key(value)) {
                return Err(ParamError::NotAllowed {
                    name: parameter.name.clone(),
                    allowed: allowed.clone(),
                });
            }
        }
    }

    Ok(())
}
