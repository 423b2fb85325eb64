pub mod request;
pub mod response;

pub use request::{
    GetAssetParams, InitializeParams, JsonRpcRequest, ListAssetsParams, RpcId, SearchAssetsParams,
    ToolCallParams,
};
pub use response::{
    AssetError, AssetErrorCode, AssetErrorResponse, JsonRpcError, JsonRpcResponse, ToolResult,
    ToolResultContent,
};
