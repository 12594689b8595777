// src/solafon/services/developer.rs
//
// App settings live under /api/developer/apps/{appId}. The bot token does not
// carry the app id, so these calls look it up from the bot's identity first.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::solafon::{
    client::SolafonClient,
    models::{ContentArgs, GatewayError, WebhookArgs},
    services::bot,
};

pub const MISSING_APP_ID: &str =
    "Could not determine app ID. Make sure SOLAFON_BOT_TOKEN belongs to a registered bot app.";

/// Reads the application id out of a bot identity payload.
///
/// `appId` wins over `id`. Empty strings and zero count as absent.
pub fn extract_app_id(bot_info: &Value) -> Option<String> {
    ["appId", "id"].iter().find_map(|key| match bot_info.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// Phase one of every app-settings call.
pub async fn resolve_app_id(client: &SolafonClient) -> Result<Option<String>, GatewayError> {
    let me = bot::get_bot_info(client).await?;
    let app_id = extract_app_id(&me);
    if app_id.is_none() {
        warn!("Bot identity response carried no app id");
    }
    Ok(app_id)
}

fn missing_app_id() -> Value {
    json!({ "error": MISSING_APP_ID })
}

pub async fn set_webhook(client: &SolafonClient, args: WebhookArgs) -> Result<Value, GatewayError> {
    let Some(app_id) = resolve_app_id(client).await? else {
        return Ok(missing_app_id());
    };
    info!("Setting webhook for app {} to {}", app_id, args.url);
    let body = serde_json::to_value(&args)?;
    client
        .put(&format!("/api/developer/apps/{}/webhook", app_id), &body)
        .await
}

pub async fn set_welcome_message(
    client: &SolafonClient,
    args: ContentArgs,
) -> Result<Value, GatewayError> {
    let Some(app_id) = resolve_app_id(client).await? else {
        return Ok(missing_app_id());
    };
    info!("Setting welcome message for app {}", app_id);
    let body = serde_json::to_value(args.into_content())?;
    client
        .put(&format!("/api/developer/apps/{}/welcome-message", app_id), &body)
        .await
}
