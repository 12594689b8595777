//! Utility functions for the Solafon MCP server

use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};
use validator::{Validate, ValidationError};

use crate::solafon::models::ToolError;

/// Deserializes a tool's `arguments` object into its typed form and runs the
/// field constraints. Missing optional fields get their defaults here.
pub fn parse_args<T: DeserializeOwned + Validate>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { Value::Object(Default::default()) } else { args };
    let parsed: T = from_value(args).map_err(|e| ToolError::InvalidParams(e.to_string()))?;
    parsed
        .validate()
        .map_err(|e| ToolError::InvalidParams(e.to_string()))?;
    Ok(parsed)
}

/// Field validator: value must be a hyphenated UUID.
pub fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if value.len() == 36 && uuid::Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("uuid"))
    }
}
