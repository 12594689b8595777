//! HTTP gateway to the Solafon platform API.
//!
//! Every tool goes through [`SolafonClient::call`]. Response bodies are
//! handed back as data whatever the HTTP status; only transport failures
//! surface as errors.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client, Method, Request,
};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::solafon::models::GatewayError;

/// Header carrying the bot token (`X-Bot-Token`)
pub const BOT_TOKEN_HEADER: &str = "x-bot-token";

#[derive(Clone, Debug)]
pub struct SolafonClient {
    http: Client,
    base_url: String,
    default_headers: HeaderMap,
}

impl SolafonClient {
    /// Create a client for the configured base URL and optional bot token
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| GatewayError::InvalidBaseUrl(base_url.clone(), e))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.bot_token {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|_| GatewayError::InvalidToken)?;
            value.set_sensitive(true);
            default_headers.insert(HeaderName::from_static(BOT_TOKEN_HEADER), value);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("solafon-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            default_headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Compose the outbound request without sending it.
    ///
    /// Query pairs with an empty value are left out entirely.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Request, GatewayError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| GatewayError::InvalidBaseUrl(raw, e))?;

        if query.iter().any(|(_, v)| !v.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter().filter(|(_, v)| !v.is_empty()) {
                pairs.append_pair(key, value);
            }
        }

        let mut builder = self
            .http
            .request(method, url)
            .headers(self.default_headers.clone());
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        Ok(builder.build()?)
    }

    /// Issue a request and return the response body as JSON.
    ///
    /// A body that is not valid JSON comes back as `{status, body}`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value, GatewayError> {
        let request = self.build_request(method, path, body, query)?;
        debug!(method = %request.method(), url = %request.url(), "Calling Solafon API");

        let res = self.http.execute(request).await?;
        let status = res.status();
        debug!(status = %status, "Solafon API response status");

        let text = res.text().await?;
        Ok(serde_json::from_str::<Value>(&text)
            .unwrap_or_else(|_| json!({"status": status.as_u16(), "body": text})))
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError> {
        self.call(Method::GET, path, None, query).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        self.call(Method::POST, path, Some(body), &[]).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        self.call(Method::PATCH, path, Some(body), &[]).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        self.call(Method::PUT, path, Some(body), &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, GatewayError> {
        self.call(Method::DELETE, path, None, &[]).await
    }
}
