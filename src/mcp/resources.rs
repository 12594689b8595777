//! Resource Registry
//!
//! API reference documents served verbatim by uri.

use serde_json::{json, Value};

pub const MARKDOWN: &str = "text/markdown";

#[derive(Debug)]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub text: &'static str,
}

impl ResourceDefinition {
    /// The entry as listed by `resources/list`
    pub fn to_json(&self) -> Value {
        json!({
            "uri": self.uri,
            "name": self.name,
            "description": self.description,
            "mimeType": self.mime_type,
        })
    }

    /// The `contents` entry returned by `resources/read`
    pub fn contents(&self) -> Value {
        json!({
            "uri": self.uri,
            "mimeType": self.mime_type,
            "text": self.text,
        })
    }
}

pub static RESOURCES: &[ResourceDefinition] = &[
    ResourceDefinition {
        uri: "docs://bot-api",
        name: "Solafon Bot API",
        description: "Bot endpoints: messages, conversations, users, app settings, webhook events",
        mime_type: MARKDOWN,
        text: include_str!("resources/bot-api.md"),
    },
    ResourceDefinition {
        uri: "docs://wallet-api",
        name: "Solafon Wallet API",
        description: "Wallet endpoints: balances, token prices, transaction history and relay",
        mime_type: MARKDOWN,
        text: include_str!("resources/wallet-api.md"),
    },
];

pub fn read_resource(uri: &str) -> Option<&'static ResourceDefinition> {
    RESOURCES.iter().find(|r| r.uri == uri)
}
