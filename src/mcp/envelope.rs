// src/mcp/envelope.rs
//
// Every tool result goes back to the host in the same shape: one text block
// holding the pretty-printed JSON of whatever the API returned.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
}

/// Wrap a value as a tool result.
pub fn wrap(value: &Value) -> ToolResult {
    // Serializing a `Value` cannot fail: its map keys are always strings
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    ToolResult {
        content: vec![ContentBlock::Text { text }],
    }
}

impl ToolResult {
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
