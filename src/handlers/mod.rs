pub mod get_asset;
pub mod list_assets;
pub mod search_assets;

use crate::assets::registry::AssetRegistry;
use crate::protocol::{
    GetAssetParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListAssetsParams,
    SearchAssetsParams, ToolCallParams, ToolResult,
};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, registry: &AssetRegistry) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-asset-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": "list_assets",
                        "description": "List loaded repository assets, optionally filtered by category and locale",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "category": {
                                    "type": "string",
                                    "enum": ["prompt", "agent", "instruction", "skill"],
                                    "description": "Restrict results to one asset category"
                                },
                                "locale": {
                                    "type": "string",
                                    "description": "Restrict results to assets with this locale tag"
                                }
                            }
                        }
                    },
                    {
                        "name": "get_asset",
                        "description": "Fetch one asset by its full id, including content",
                        "inputSchema": {
                            "type": "object",
                            "required": ["id"],
                            "properties": {
                                "id": {
                                    "type": "string",
                                    "description": "Asset id in the form category:relative/path"
                                }
                            }
                        }
                    },
                    {
                        "name": "search_assets",
                        "description": "Keyword search over asset names, paths, titles, and descriptions (all keywords must match)",
                        "inputSchema": {
                            "type": "object",
                            "required": ["keywords"],
                            "properties": {
                                "keywords": {
                                    "type": "string",
                                    "description": "Whitespace-separated keywords, matched case-insensitively"
                                },
                                "category": {
                                    "type": "string",
                                    "enum": ["prompt", "agent", "instruction", "skill"],
                                    "description": "Restrict the search to one asset category"
                                }
                            }
                        }
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, registry).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, registry: &AssetRegistry) -> ToolResult {
    match params.name.as_str() {
        "list_assets" => {
            // Arguments are optional: a bare call lists everything.
            let list_params: ListAssetsParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!(
                            "Invalid arguments for list_assets: {e}"
                        ));
                    }
                },
                None => ListAssetsParams::default(),
            };
            list_assets::handle(list_params, registry).await
        }

        "get_asset" => {
            let get_params: GetAssetParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!(
                            "Invalid arguments for get_asset: {e}"
                        ));
                    }
                },
                None => {
                    return ToolResult::error("Missing arguments for get_asset");
                }
            };
            get_asset::handle(get_params, registry).await
        }

        "search_assets" => {
            let search_params: SearchAssetsParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!(
                            "Invalid arguments for search_assets: {e}"
                        ));
                    }
                },
                None => {
                    return ToolResult::error("Missing arguments for search_assets");
                }
            };
            search_assets::handle(search_params, registry).await
        }

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}
