//! # MCP Handler Module
//!
//! Dispatches JSON-RPC requests from the host to the tool, prompt and
//! resource registries.
//!
//! ## Supported Methods
//! - `initialize`, `ping`
//! - `tools/list`, `tools/call`
//! - `prompts/list`, `prompts/get`
//! - `resources/list`, `resources/read`
//!
//! A method named after a registered tool is treated as `tools/call` with
//! `params` as the arguments.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    mcp::{
        prompts,
        protocol::{error_codes, Request, Response, PROTOCOL_VERSION},
        resources,
        tools::TOOL_REGISTRY,
    },
    solafon::models::ToolError,
    AppState,
};

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        "prompts/list" => handle_prompts_list(&req),
        "prompts/get" => handle_prompts_get(&req),
        "resources/list" => handle_resources_list(&req),
        "resources/read" => handle_resources_read(&req),
        // Convenience alias: call a tool directly by its name
        name if TOOL_REGISTRY.contains(name) => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": name,
                    "arguments": req.params_or_empty(),
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": "solafon_mcp",
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({
        "tools": { "listChanged": false },
        "prompts": { "listChanged": false },
        "resources": { "subscribe": false, "listChanged": false }
    });
    let instructions = "Solafon MCP server: messaging bot API and Solana wallet API as tools, \
        with step-by-step prompts for building bots and API reference resources.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

fn handle_tools_list(req: &Request) -> Response {
    let tools: Vec<Value> = TOOL_REGISTRY.list().iter().map(|t| t.to_json()).collect();
    Response::success(req.id.clone(), json!({ "tools": tools }))
}

/// Handles a 'tools/call' request by dispatching it to the registry.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".into(),
            )
        }
    };

    let args = params.get("arguments").cloned().unwrap_or(Value::Null);

    match TOOL_REGISTRY.call(&state.client, tool_name, args).await {
        Ok(result) => Response::success(req.id, result.into_value()),
        Err(err) => {
            warn!("Tool {} failed: {}", tool_name, err);
            let code = match &err {
                ToolError::InvalidParams(_) => error_codes::INVALID_PARAMS,
                ToolError::UnknownTool(_) => error_codes::INVALID_PARAMS,
                ToolError::Gateway(_) => error_codes::INTERNAL_ERROR,
            };
            Response::error(req.id, code, err.to_string())
        }
    }
}

fn handle_prompts_list(req: &Request) -> Response {
    let prompts: Vec<Value> = prompts::PROMPTS.iter().map(|p| p.to_json()).collect();
    Response::success(req.id.clone(), json!({ "prompts": prompts }))
}

fn handle_prompts_get(req: &Request) -> Response {
    let name = req
        .params
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("");

    match prompts::get_prompt(name) {
        Some(prompt) => Response::success(
            req.id.clone(),
            json!({
                "description": prompt.description,
                "messages": prompt.messages(),
            }),
        ),
        None => Response::error(
            req.id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Prompt not found: {}", name),
        ),
    }
}

fn handle_resources_list(req: &Request) -> Response {
    let resources: Vec<Value> = resources::RESOURCES.iter().map(|r| r.to_json()).collect();
    Response::success(req.id.clone(), json!({ "resources": resources }))
}

fn handle_resources_read(req: &Request) -> Response {
    let uri = req
        .params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .unwrap_or("");

    if uri.is_empty() {
        return Response::error(
            req.id.clone(),
            error_codes::INVALID_PARAMS,
            "Missing uri".into(),
        );
    }

    match resources::read_resource(uri) {
        Some(resource) => Response::success(
            req.id.clone(),
            json!({ "contents": [resource.contents()] }),
        ),
        None => Response::error(
            req.id.clone(),
            error_codes::RESOURCE_NOT_FOUND,
            format!("Resource not found: {}", uri),
        ),
    }
}
