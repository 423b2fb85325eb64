use crate::assets::registry::AssetRegistry;
use crate::protocol::{AssetErrorCode, AssetErrorResponse, GetAssetParams, ToolResult};

/// Handle a `get_asset` tool call.
///
/// Exact-match lookup by full asset id. An empty id is a validation error; a
/// well-formed id with no matching asset is a distinct `asset_not_found`
/// error, never a transport fault.
pub async fn handle(params: GetAssetParams, registry: &AssetRegistry) -> ToolResult {
    if params.id.trim().is_empty() {
        return AssetErrorResponse::canonical(AssetErrorCode::InvalidId).into();
    }

    let asset = match registry.get(&params.id) {
        Ok(a) => a,
        Err(_) => return AssetErrorResponse::canonical(AssetErrorCode::NotInitialized).into(),
    };

    let Some(asset) = asset else {
        return AssetErrorResponse::canonical(AssetErrorCode::AssetNotFound).into();
    };

    match serde_json::to_string(&asset) {
        Ok(json) => ToolResult::text(json),
        Err(e) => {
            tracing::error!(error = %e, "serialization failed");
            AssetErrorResponse::canonical(AssetErrorCode::InternalError).into()
        }
    }
}
