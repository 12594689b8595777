// src/solafon/services/bot.rs

use serde_json::{json, Value};
use tracing::info;

use crate::solafon::{
    client::SolafonClient,
    models::{
        ConversationMessagesArgs, EditMessageArgs, GatewayError, ListConversationsArgs,
        MessageIdArgs, SendMessageArgs, UserArgs,
    },
};

/// Identity of the bot the configured token belongs to.
pub async fn get_bot_info(client: &SolafonClient) -> Result<Value, GatewayError> {
    client.get("/api/bot/me", &[]).await
}

pub async fn send_message(
    client: &SolafonClient,
    args: SendMessageArgs,
) -> Result<Value, GatewayError> {
    info!("Sending message to conversation {}", args.conversation_id);
    let body = json!({
        "conversationId": args.conversation_id,
        "content": args.content.into_content(),
    });
    client.post("/api/bot/messages", &body).await
}

pub async fn edit_message(
    client: &SolafonClient,
    args: EditMessageArgs,
) -> Result<Value, GatewayError> {
    let path = format!("/api/bot/messages/{}", args.message_id);
    let body = json!({ "content": args.content.into_content() });
    client.patch(&path, &body).await
}

pub async fn delete_message(
    client: &SolafonClient,
    args: MessageIdArgs,
) -> Result<Value, GatewayError> {
    client
        .delete(&format!("/api/bot/messages/{}", args.message_id))
        .await
}

pub async fn list_conversations(
    client: &SolafonClient,
    args: ListConversationsArgs,
) -> Result<Value, GatewayError> {
    client
        .get(
            "/api/bot/conversations",
            &[
                ("limit", args.limit.to_string()),
                ("offset", args.offset.to_string()),
            ],
        )
        .await
}

pub async fn get_conversation_messages(
    client: &SolafonClient,
    args: ConversationMessagesArgs,
) -> Result<Value, GatewayError> {
    let path = format!("/api/bot/conversations/{}/messages", args.conversation_id);
    client
        .get(
            &path,
            &[
                ("limit", args.limit.to_string()),
                ("before", args.before.unwrap_or_default()),
            ],
        )
        .await
}

pub async fn get_user(client: &SolafonClient, args: UserArgs) -> Result<Value, GatewayError> {
    client
        .get(&format!("/api/bot/users/{}", args.user_id), &[])
        .await
}
