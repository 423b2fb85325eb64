//! Integration tests for the tool handlers and the JSON-RPC dispatch flow.
//!
//! Handlers are exercised directly against an initialized registry, and the
//! full dispatch path is covered through `tools/call` requests.

use std::fs;
use std::path::Path;

use mcp_asset_server::assets::registry::AssetRegistry;
use mcp_asset_server::handlers;
use mcp_asset_server::protocol::{
    GetAssetParams, JsonRpcRequest, ListAssetsParams, RpcId, SearchAssetsParams,
};

fn write_scenario_repo(root: &Path) {
    fs::create_dir_all(root.join(".cfg/prompts")).unwrap();
    fs::create_dir_all(root.join(".cfg/agents")).unwrap();
    fs::write(root.join(".cfg/prompts/a.prompt.md"), "X").unwrap();
    fs::write(root.join(".cfg/agents/b.agent.md"), "Y").unwrap();
}

fn ready_registry(root: &Path) -> AssetRegistry {
    write_scenario_repo(root);
    let registry = AssetRegistry::new(root);
    registry.initialize();
    registry
}

fn result_json(result: &mcp_asset_server::protocol::ToolResult) -> serde_json::Value {
    serde_json::from_str(&result.content[0].text).unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_file_repository_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    // list_assets() → count 2
    let listed = handlers::list_assets::handle(ListAssetsParams::default(), &registry).await;
    assert!(!listed.is_error);
    let value = result_json(&listed);
    assert_eq!(value["count"].as_u64().unwrap(), 2);
    assert_eq!(value["assets"].as_array().unwrap().len(), 2);

    // get_asset("prompt:.cfg/prompts/a.prompt.md") → content "X"
    let got = handlers::get_asset::handle(
        GetAssetParams {
            id: "prompt:.cfg/prompts/a.prompt.md".into(),
        },
        &registry,
    )
    .await;
    assert!(!got.is_error);
    let asset = result_json(&got);
    assert_eq!(asset["content"].as_str().unwrap(), "X");
    assert_eq!(asset["category"].as_str().unwrap(), "prompt");
    assert_eq!(asset["encoding"].as_str().unwrap(), "utf-8");

    // search_assets("a") → exactly the prompt asset
    let hits = handlers::search_assets::handle(
        SearchAssetsParams {
            keywords: "a.prompt".into(),
            category: None,
        },
        &registry,
    )
    .await;
    assert!(!hits.is_error);
    let value = result_json(&hits);
    assert_eq!(value["count"].as_u64().unwrap(), 1);
    assert_eq!(
        value["assets"][0]["id"].as_str().unwrap(),
        "prompt:.cfg/prompts/a.prompt.md"
    );

    // search_assets("zzz") → count 0
    let misses = handlers::search_assets::handle(
        SearchAssetsParams {
            keywords: "zzz".into(),
            category: None,
        },
        &registry,
    )
    .await;
    assert!(!misses.is_error, "zero matches is a success, not an error");
    assert_eq!(result_json(&misses)["count"].as_u64().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_assets_rejects_unknown_category() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let result = handlers::list_assets::handle(
        ListAssetsParams {
            category: Some("recipe".into()),
            locale: None,
        },
        &registry,
    )
    .await;
    assert!(result.is_error);
    let err = result_json(&result);
    assert_eq!(err["error"]["code"].as_str().unwrap(), "invalid_category");
}

#[tokio::test]
async fn get_asset_rejects_empty_id() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let result = handlers::get_asset::handle(GetAssetParams { id: "  ".into() }, &registry).await;
    assert!(result.is_error);
    let err = result_json(&result);
    assert_eq!(err["error"]["code"].as_str().unwrap(), "invalid_id");
}

#[tokio::test]
async fn get_asset_missing_id_is_distinct_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let result = handlers::get_asset::handle(
        GetAssetParams {
            id: "prompt:.cfg/prompts/missing.prompt.md".into(),
        },
        &registry,
    )
    .await;
    assert!(result.is_error);
    let err = result_json(&result);
    assert_eq!(err["error"]["code"].as_str().unwrap(), "asset_not_found");
}

#[tokio::test]
async fn search_assets_rejects_empty_keywords() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let result = handlers::search_assets::handle(
        SearchAssetsParams {
            keywords: String::new(),
            category: None,
        },
        &registry,
    )
    .await;
    assert!(result.is_error);
    let err = result_json(&result);
    assert_eq!(err["error"]["code"].as_str().unwrap(), "invalid_keywords");
}

#[tokio::test]
async fn handlers_signal_uninitialized_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = AssetRegistry::new(tmp.path());

    let result = handlers::list_assets::handle(ListAssetsParams::default(), &registry).await;
    assert!(result.is_error);
    let err = result_json(&result);
    assert_eq!(err["error"]["code"].as_str().unwrap(), "not_initialized");
}

// ---------------------------------------------------------------------------
// Dispatch integration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dispatch_tools_list_advertises_all_tools() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(1)),
        method: "tools/list".into(),
        params: None,
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();
    let tools = result["tools"].as_array().unwrap();

    let tool_names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert!(tool_names.contains(&"list_assets"));
    assert!(tool_names.contains(&"get_asset"));
    assert!(tool_names.contains(&"search_assets"));
    assert_eq!(tools.len(), 3, "Should advertise exactly 3 tools");
}

#[tokio::test]
async fn dispatch_list_assets_via_tools_call() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(2)),
        method: "tools/call".into(),
        params: Some(serde_json::json!({
            "name": "list_assets",
            "arguments": { "category": "agent" }
        })),
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();

    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["count"].as_u64().unwrap(), 1);
    assert_eq!(parsed["assets"][0]["name"].as_str().unwrap(), "b");
}

#[tokio::test]
async fn dispatch_get_asset_via_tools_call() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Str("req-3".into())),
        method: "tools/call".into(),
        params: Some(serde_json::json!({
            "name": "get_asset",
            "arguments": { "id": "agent:.cfg/agents/b.agent.md" }
        })),
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();

    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["content"].as_str().unwrap(), "Y");
    assert_eq!(parsed["name"].as_str().unwrap(), "b");
}

#[tokio::test]
async fn dispatch_unknown_method_and_tool() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(4)),
        method: "assets/mutate".into(),
        params: None,
    };
    let response = handlers::dispatch(&req, &registry).await.unwrap();
    assert_eq!(response.error.unwrap().code, -32601);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(5)),
        method: "tools/call".into(),
        params: Some(serde_json::json!({ "name": "delete_asset", "arguments": {} })),
    };
    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result["isError"].as_bool(), Some(true));
}

#[tokio::test]
async fn dispatch_initialize_and_ping() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ready_registry(tmp.path());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(6)),
        method: "initialize".into(),
        params: Some(serde_json::json!({ "protocolVersion": "2024-11-05" })),
    };
    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result["serverInfo"]["name"].as_str().unwrap(), "mcp-asset-server");
    assert!(result["capabilities"]["tools"].is_object());

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(7)),
        method: "ping".into(),
        params: None,
    };
    let response = handlers::dispatch(&req, &registry).await.unwrap();
    assert!(response.error.is_none());

    // Notifications produce no response.
    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: None,
        method: "notifications/initialized".into(),
        params: None,
    };
    assert!(handlers::dispatch(&req, &registry).await.is_none());
}
