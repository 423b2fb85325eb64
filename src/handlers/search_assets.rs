use crate::assets::registry::AssetRegistry;
use crate::protocol::{AssetErrorCode, AssetErrorResponse, SearchAssetsParams, ToolResult};

use super::list_assets::{parse_category, to_tool_result};

/// Handle a `search_assets` tool call.
///
/// The keywords string is required and must not be empty; beyond that the
/// search always succeeds, possibly with zero matches. Note the registry
/// treats a whitespace-only keyword string as matching nothing, so a sloppy
/// caller gets an empty result rather than a full dump.
pub async fn handle(params: SearchAssetsParams, registry: &AssetRegistry) -> ToolResult {
    if params.keywords.is_empty() {
        return AssetErrorResponse::canonical(AssetErrorCode::InvalidKeywords).into();
    }

    let category = match parse_category(params.category.as_deref()) {
        Ok(c) => c,
        Err(err) => return err.into(),
    };

    match registry.search(&params.keywords, category) {
        Ok(assets) => to_tool_result(assets),
        Err(_) => AssetErrorResponse::canonical(AssetErrorCode::NotInitialized).into(),
    }
}
