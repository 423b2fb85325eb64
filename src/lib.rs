//! MCP server for repository text assets.
//!
//! Discovers prompt, agent, instruction, and skill files under a repository
//! root, loads them into an immutable in-memory registry, and exposes
//! `list_assets`, `get_asset`, and `search_assets` tools over JSON-RPC 2.0 —
//! either on stdio or over an HTTP/SSE transport with single-connection
//! semantics.

pub mod assets;
pub mod config;
pub mod handlers;
pub mod http;
pub mod protocol;
pub mod server;

pub mod schema;
