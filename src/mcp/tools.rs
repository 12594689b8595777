//! # Tool Registry
//!
//! The fixed catalog of tools this server exposes. Each entry bundles the
//! JSON schema advertised in `tools/list` with a handler that parses the
//! arguments into their typed form, calls the Solafon API and hands back the
//! raw response for wrapping.
//!
//! ## Bot
//! - `get_bot_info`, `send_message`, `edit_message`, `delete_message`
//! - `list_conversations`, `get_conversation_messages`, `get_user`
//!
//! ## App settings (resolve app id first)
//! - `set_webhook`, `set_welcome_message`
//!
//! ## Wallet
//! - `get_wallet_balance`, `get_token_list`, `get_token_prices`
//! - `get_transaction_history`, `get_transaction_status`
//! - `get_latest_blockhash`, `send_transaction`, `simulate_transaction`

use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};
use lazy_static::lazy_static;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::{
    mcp::envelope::{self, ToolResult},
    solafon::{
        client::SolafonClient,
        models::ToolError,
        services::{bot, developer, wallet},
    },
    utils::parse_args,
};

pub type ToolFuture<'a> = BoxFuture<'a, Result<Value, ToolError>>;
pub type ToolHandler = for<'a> fn(&'a SolafonClient, Value) -> ToolFuture<'a>;

pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

impl ToolDefinition {
    /// The entry as listed by `tools/list`
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema,
        })
    }
}

pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    by_name: HashMap<&'static str, usize>,
}

lazy_static! {
    pub static ref TOOL_REGISTRY: ToolRegistry = ToolRegistry::new(catalog());
}

impl ToolRegistry {
    fn new(tools: Vec<ToolDefinition>) -> Self {
        let by_name = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name, i))
            .collect();
        Self { tools, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Tools in catalog order
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Run a tool by name and wrap whatever the API returned.
    pub async fn call(
        &self,
        client: &SolafonClient,
        name: &str,
        args: Value,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        info!("Calling tool: {}", tool.name);
        let value = (tool.handler)(client, args).await?;
        Ok(envelope::wrap(&value))
    }
}

// Adapts a service function to the registry's handler signature.
macro_rules! handler {
    ($name:ident => $service:path) => {
        fn $name(client: &SolafonClient, args: Value) -> ToolFuture<'_> {
            async move { Ok::<_, ToolError>($service(client, parse_args(args)?).await?) }.boxed()
        }
    };
    ($name:ident => $service:path, no_args) => {
        fn $name(client: &SolafonClient, _args: Value) -> ToolFuture<'_> {
            async move { Ok::<_, ToolError>($service(client).await?) }.boxed()
        }
    };
}

handler!(get_bot_info => bot::get_bot_info, no_args);
handler!(send_message => bot::send_message);
handler!(edit_message => bot::edit_message);
handler!(delete_message => bot::delete_message);
handler!(list_conversations => bot::list_conversations);
handler!(get_conversation_messages => bot::get_conversation_messages);
handler!(get_user => bot::get_user);
handler!(set_webhook => developer::set_webhook);
handler!(set_welcome_message => developer::set_welcome_message);
handler!(get_wallet_balance => wallet::get_wallet_balance);
handler!(get_token_list => wallet::get_token_list, no_args);
handler!(get_token_prices => wallet::get_token_prices);
handler!(get_transaction_history => wallet::get_transaction_history);
handler!(get_transaction_status => wallet::get_transaction_status);
handler!(get_latest_blockhash => wallet::get_latest_blockhash, no_args);
handler!(send_transaction => wallet::send_transaction);
handler!(simulate_transaction => wallet::simulate_transaction);

// --- Schemas ---

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn uuid_field(description: &str) -> Value {
    json!({"type": "string", "format": "uuid", "description": description})
}

fn button_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "description": "Button id, echoed back in callbacks"},
            "text": {"type": "string", "description": "Button label"},
            "action": {"type": "string", "enum": ["callback", "url", "webApp"]},
            "payload": {"type": "string", "description": "Callback payload (action=callback)"},
            "url": {"type": "string", "description": "Target URL (action=url or webApp)"}
        },
        "required": ["id", "text", "action"]
    })
}

fn card_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "subtitle": {"type": "string"},
            "imageUrl": {"type": "string", "format": "uri"},
            "buttons": {"type": "array", "items": button_schema()}
        },
        "required": ["title"]
    })
}

fn content_properties() -> Map<String, Value> {
    let props = json!({
        "type": {
            "type": "string",
            "enum": ["text", "image", "carousel"],
            "default": "text",
            "description": "Message type"
        },
        "text": {"type": "string", "description": "Message text"},
        "imageUrl": {"type": "string", "format": "uri", "description": "Image URL (type=image)"},
        "buttons": {"type": "array", "items": button_schema(), "description": "Inline buttons"},
        "cards": {"type": "array", "items": card_schema(), "description": "Carousel cards (type=carousel)"}
    });
    match props {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn content_schema_with(id_field: Option<(&str, Value)>) -> Value {
    let mut props = Map::new();
    let mut required = Vec::new();
    if let Some((name, schema)) = id_field {
        props.insert(name.to_string(), schema);
        required.push(name);
    }
    props.extend(content_properties());
    object_schema(Value::Object(props), &required)
}

fn catalog() -> Vec<ToolDefinition> {
    vec![
        // --- Bot ---
        ToolDefinition {
            name: "get_bot_info",
            description: "Get the profile of the bot the configured token belongs to (id, app id, name).",
            input_schema: object_schema(json!({}), &[]),
            handler: get_bot_info,
        },
        ToolDefinition {
            name: "send_message",
            description: "Send a message (text, image or carousel, optionally with buttons) to a conversation.",
            input_schema: content_schema_with(Some((
                "conversationId",
                uuid_field("Conversation to post into"),
            ))),
            handler: send_message,
        },
        ToolDefinition {
            name: "edit_message",
            description: "Replace the content of a message the bot sent earlier.",
            input_schema: content_schema_with(Some(("messageId", uuid_field("Message to edit")))),
            handler: edit_message,
        },
        ToolDefinition {
            name: "delete_message",
            description: "Delete a message the bot sent earlier.",
            input_schema: object_schema(
                json!({"messageId": uuid_field("Message to delete")}),
                &["messageId"],
            ),
            handler: delete_message,
        },
        ToolDefinition {
            name: "list_conversations",
            description: "List conversations the bot takes part in, newest first.",
            input_schema: object_schema(
                json!({
                    "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 20},
                    "offset": {"type": "integer", "minimum": 0, "default": 0}
                }),
                &[],
            ),
            handler: list_conversations,
        },
        ToolDefinition {
            name: "get_conversation_messages",
            description: "Get messages of a conversation, newest first.",
            input_schema: object_schema(
                json!({
                    "conversationId": uuid_field("Conversation to read"),
                    "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50},
                    "before": {"type": "string", "description": "Only messages older than this message id"}
                }),
                &["conversationId"],
            ),
            handler: get_conversation_messages,
        },
        ToolDefinition {
            name: "get_user",
            description: "Get the public profile of a user.",
            input_schema: object_schema(json!({"userId": uuid_field("User to look up")}), &["userId"]),
            handler: get_user,
        },
        // --- App settings ---
        ToolDefinition {
            name: "set_webhook",
            description: "Set the webhook URL that receives the bot's events.",
            input_schema: object_schema(
                json!({
                    "url": {"type": "string", "format": "uri", "description": "HTTPS endpoint receiving events"},
                    "events": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Event types to deliver, e.g. [\"message\", \"callback\"]"
                    }
                }),
                &["url"],
            ),
            handler: set_webhook,
        },
        ToolDefinition {
            name: "set_welcome_message",
            description: "Set the message new users see when they first open the bot.",
            input_schema: content_schema_with(None),
            handler: set_welcome_message,
        },
        // --- Wallet ---
        ToolDefinition {
            name: "get_wallet_balance",
            description: "Get the SOL and token balances of a wallet address.",
            input_schema: object_schema(
                json!({"address": {"type": "string", "description": "Base58 wallet address"}}),
                &["address"],
            ),
            handler: get_wallet_balance,
        },
        ToolDefinition {
            name: "get_token_list",
            description: "List the tokens supported by the wallet service.",
            input_schema: object_schema(json!({}), &[]),
            handler: get_token_list,
        },
        ToolDefinition {
            name: "get_token_prices",
            description: "Get current USD prices for tokens.",
            input_schema: object_schema(
                json!({
                    "mints": {
                        "type": "string",
                        "default": "all",
                        "description": "Comma separated mint addresses, or \"all\""
                    }
                }),
                &[],
            ),
            handler: get_token_prices,
        },
        ToolDefinition {
            name: "get_transaction_history",
            description: "Get recent transactions of a wallet address.",
            input_schema: object_schema(
                json!({
                    "address": {"type": "string", "description": "Base58 wallet address"},
                    "limit": {"type": "integer", "minimum": 1, "maximum": 50, "default": 50},
                    "before": {"type": "string", "description": "Only transactions before this signature"}
                }),
                &["address"],
            ),
            handler: get_transaction_history,
        },
        ToolDefinition {
            name: "get_transaction_status",
            description: "Get the confirmation status of a transaction.",
            input_schema: object_schema(
                json!({"signature": {"type": "string", "description": "Transaction signature"}}),
                &["signature"],
            ),
            handler: get_transaction_status,
        },
        ToolDefinition {
            name: "get_latest_blockhash",
            description: "Get a recent blockhash for building a transaction.",
            input_schema: object_schema(json!({}), &[]),
            handler: get_latest_blockhash,
        },
        ToolDefinition {
            name: "send_transaction",
            description: "Submit a transaction that has already been signed by the user's wallet.",
            input_schema: object_schema(
                json!({
                    "signedTransaction": {"type": "string", "description": "Base64 encoded signed transaction"}
                }),
                &["signedTransaction"],
            ),
            handler: send_transaction,
        },
        ToolDefinition {
            name: "simulate_transaction",
            description: "Simulate a transaction without submitting it.",
            input_schema: object_schema(
                json!({"transaction": {"type": "string", "description": "Base64 encoded transaction"}}),
                &["transaction"],
            ),
            handler: simulate_transaction,
        },
    ]
}
