use serde::{Deserialize, Serialize};

use super::request::RpcId;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self { code: -32600, message: detail.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self { code: -32603, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// MCP tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// MCP tool call result wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Domain-level error types (caller-visible, structured)
// ---------------------------------------------------------------------------

/// Asset tool error code. Validation and not-found failures map to JSON-RPC
/// -32602; server-side failures map to -32603. Discovery- and load-time
/// errors are never surfaced here; they only produce log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetErrorCode {
    InvalidCategory,
    InvalidId,
    InvalidKeywords,
    AssetNotFound,
    NotInitialized,
    InternalError,
}

impl AssetErrorCode {
    /// Map to the corresponding JSON-RPC 2.0 error code.
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::InvalidCategory | Self::InvalidId | Self::InvalidKeywords => -32602,
            Self::AssetNotFound => -32602,
            Self::NotInitialized | Self::InternalError => -32603,
        }
    }
}

/// Structured error object carried in tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetError {
    pub code: AssetErrorCode,
    pub message: String,
}

/// Top-level structured error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetErrorResponse {
    pub error: AssetError,
}

impl AssetErrorResponse {
    pub fn new(code: AssetErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: AssetError {
                code,
                message: message.into(),
            },
        }
    }

    /// Construct with the canonical message for a given code.
    pub fn canonical(code: AssetErrorCode) -> Self {
        let message = match &code {
            AssetErrorCode::InvalidCategory => "Category is not recognized",
            AssetErrorCode::InvalidId => "Asset id must be a non-empty string",
            AssetErrorCode::InvalidKeywords => "Keywords must be a non-empty string",
            AssetErrorCode::AssetNotFound => "Asset does not exist",
            AssetErrorCode::NotInitialized => "Asset registry is not initialized",
            AssetErrorCode::InternalError => "Internal error",
        };
        Self::new(code, message)
    }
}

/// Convert a structured asset error into a JSON-RPC error.
///
/// The JSON-RPC `code` is derived from the asset error code, the `message`
/// is the human-readable text, and the full structured payload rides in
/// `data` for clients that inspect it.
impl From<AssetErrorResponse> for JsonRpcError {
    fn from(err: AssetErrorResponse) -> Self {
        Self {
            code: err.error.code.json_rpc_code(),
            message: err.error.message.clone(),
            data: Some(
                serde_json::to_value(&err)
                    .expect("AssetErrorResponse must serialize to JSON Value"),
            ),
        }
    }
}

/// Convert a structured asset error into a tool result with `isError: true`.
///
/// The text content is the JSON-serialized `AssetErrorResponse`, preserving
/// the structure for clients that parse tool output.
impl From<AssetErrorResponse> for ToolResult {
    fn from(err: AssetErrorResponse) -> Self {
        let json = serde_json::to_string(&err)
            .expect("AssetErrorResponse must serialize to JSON string");
        Self::error(format!("{json}\n"))
    }
}
