// src/solafon/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::utils::validate_uuid;

// --- Error types ---

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid API base URL '{0}': {1}")]
    InvalidBaseUrl(String, url::ParseError),
    #[error("bot token contains characters not allowed in an HTTP header")]
    InvalidToken,
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("request to Solafon API failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidParams(String),
    #[error("Tool not found: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

// --- Message content ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    Callback,
    Url,
    WebApp,
}

/// An inline button attached to a message or a carousel card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub id: String,
    pub text: String,
    pub action: ButtonAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One card of a carousel message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
}

/// Message content as the bot API expects it. Optional parts are only
/// present when the caller supplied a non-empty value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

/// Content fields shared by every tool that composes a message.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContentArgs {
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub buttons: Option<Vec<Button>>,
    #[serde(default)]
    #[validate]
    pub cards: Option<Vec<Card>>,
}

impl ContentArgs {
    pub fn into_content(self) -> MessageContent {
        let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());
        MessageContent {
            message_type: self.message_type,
            text: non_empty(self.text),
            image_url: non_empty(self.image_url),
            buttons: self.buttons,
            cards: self.cards,
        }
    }
}

// --- Bot tool arguments ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageArgs {
    #[validate(custom = "validate_uuid")]
    pub conversation_id: String,
    #[serde(flatten)]
    #[validate]
    pub content: ContentArgs,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageArgs {
    #[validate(custom = "validate_uuid")]
    pub message_id: String,
    #[serde(flatten)]
    #[validate]
    pub content: ContentArgs,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageIdArgs {
    #[validate(custom = "validate_uuid")]
    pub message_id: String,
}

pub const DEFAULT_CONVERSATION_LIMIT: u32 = 20;
pub const DEFAULT_MESSAGE_LIMIT: u32 = 50;
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 50;

fn default_conversation_limit() -> u32 {
    DEFAULT_CONVERSATION_LIMIT
}

fn default_message_limit() -> u32 {
    DEFAULT_MESSAGE_LIMIT
}

fn default_transaction_limit() -> u32 {
    DEFAULT_TRANSACTION_LIMIT
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListConversationsArgs {
    #[serde(default = "default_conversation_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessagesArgs {
    #[validate(custom = "validate_uuid")]
    pub conversation_id: String,
    #[serde(default = "default_message_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    /// Cursor: only messages older than this message id
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserArgs {
    #[validate(custom = "validate_uuid")]
    pub user_id: String,
}

// --- Developer (app settings) tool arguments ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct WebhookArgs {
    #[validate(url)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
}

// --- Wallet tool arguments ---

#[derive(Debug, Deserialize, Validate)]
pub struct AddressArgs {
    #[validate(length(min = 1))]
    pub address: String,
}

fn default_mints() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct TokenPricesArgs {
    /// Comma separated mint addresses, or "all"
    #[serde(default = "default_mints")]
    pub mints: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TransactionHistoryArgs {
    #[validate(length(min = 1))]
    pub address: String,
    #[serde(default = "default_transaction_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: u32,
    /// Cursor: only transactions before this signature
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignatureArgs {
    #[validate(length(min = 1))]
    pub signature: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionArgs {
    /// Base64 encoded, fully signed transaction
    #[validate(length(min = 1))]
    pub signed_transaction: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SimulateTransactionArgs {
    /// Base64 encoded transaction
    #[validate(length(min = 1))]
    pub transaction: String,
}
