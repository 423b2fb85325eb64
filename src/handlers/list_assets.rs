use serde::Serialize;

use crate::assets::registry::{AssetRegistry, ListFilter};
use crate::assets::{AssetSummary, Category};
use crate::protocol::{AssetErrorCode, AssetErrorResponse, ListAssetsParams, ToolResult};

#[derive(Debug, Serialize)]
struct ListAssetsResponse {
    assets: Vec<AssetSummary>,
    count: usize,
}

/// Handle a `list_assets` tool call.
///
/// Returns every asset matching the optional category and locale filters as
/// lightweight summaries. An empty result is a valid success, not an error;
/// the only validation failure is an unknown category tag.
pub async fn handle(params: ListAssetsParams, registry: &AssetRegistry) -> ToolResult {
    let category = match parse_category(params.category.as_deref()) {
        Ok(c) => c,
        Err(err) => return err.into(),
    };

    let filter = ListFilter {
        category,
        locale: params.locale,
    };

    let assets = match registry.list(&filter) {
        Ok(a) => a,
        Err(_) => return AssetErrorResponse::canonical(AssetErrorCode::NotInitialized).into(),
    };

    to_tool_result(assets)
}

/// Validate an optional category tag against the closed enumeration.
pub(crate) fn parse_category(
    tag: Option<&str>,
) -> Result<Option<Category>, AssetErrorResponse> {
    match tag {
        None => Ok(None),
        Some(s) => match Category::parse(s) {
            Some(c) => Ok(Some(c)),
            None => Err(AssetErrorResponse::canonical(
                AssetErrorCode::InvalidCategory,
            )),
        },
    }
}

pub(crate) fn to_tool_result(assets: Vec<AssetSummary>) -> ToolResult {
    let payload = ListAssetsResponse {
        count: assets.len(),
        assets,
    };
    match serde_json::to_string(&payload) {
        Ok(json) => ToolResult::text(json),
        Err(e) => {
            tracing::error!(error = %e, "serialization failed");
            AssetErrorResponse::canonical(AssetErrorCode::InternalError).into()
        }
    }
}
