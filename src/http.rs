//! Network transport: an HTTP listener exposing a health check, a
//! Server-Sent-Events stream, and a message-posting endpoint.
//!
//! One streaming client at a time. The slot is a mutex-guarded option; a
//! second `GET /sse` while a stream is active is answered 409 and the first
//! stream is untouched. `POST /message` feeds JSON-RPC requests to the
//! dispatcher and responses travel back down the active stream as `message`
//! events. Client disconnect returns the slot to idle.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use anyhow::Context as _;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::mpsc;
use tokio_stream::Stream;

use crate::assets::registry::AssetRegistry;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Path advertised to SSE clients for posting messages.
const MESSAGE_PATH: &str = "/message";

/// Buffered responses per stream before `POST /message` handling backpressures.
const STREAM_BUFFER: usize = 32;

#[derive(Clone)]
pub struct HttpState {
    registry: Arc<AssetRegistry>,
    slot: Arc<StreamSlot>,
}

/// The single streaming slot plus a generation counter so a stale guard
/// cannot evict a newer stream.
struct StreamSlot {
    active: Mutex<Option<ActiveStream>>,
    next_id: AtomicU64,
}

struct ActiveStream {
    id: u64,
    tx: mpsc::Sender<JsonRpcResponse>,
    /// MCP handshake state for this stream session.
    initialized: bool,
}

/// Bind the listener and serve until shutdown. A bind failure (port already
/// in use, permission denied) is fatal: the process must not run degraded.
pub async fn serve(registry: Arc<AssetRegistry>, port: u16) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind HTTP listener on {addr}"))?;
    tracing::info!(%addr, "network transport listening");

    axum::serve(listener, router(registry)).await?;
    Ok(())
}

/// Build the transport router. Public so tests can drive it without a socket.
pub fn router(registry: Arc<AssetRegistry>) -> Router {
    let state = HttpState {
        registry,
        slot: Arc::new(StreamSlot {
            active: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }),
    };

    Router::new()
        .route("/health", get(health))
        .route("/sse", get(open_stream))
        .route(MESSAGE_PATH, post(post_message))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// `GET /sse`: acquire the streaming slot or reject with 409.
async fn open_stream(
    State(state): State<HttpState>,
) -> Result<Sse<KeepAliveStream<EventStream>>, StatusCode> {
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);

    let id = {
        let mut active = state.slot.active.lock().expect("stream slot lock poisoned");
        if active.is_some() {
            tracing::warn!("rejecting second SSE connection, stream already active");
            return Err(StatusCode::CONFLICT);
        }
        let id = state.slot.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        *active = Some(ActiveStream {
            id,
            tx,
            initialized: false,
        });
        id
    };
    tracing::info!(stream = id, "sse client connected");

    let stream = EventStream {
        rx,
        endpoint_sent: false,
        _guard: SlotGuard {
            slot: Arc::clone(&state.slot),
            id,
        },
    };
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// `POST /message`: forward one JSON-RPC request into the active stream
/// session. 400 while no stream is open; otherwise the request is accepted
/// and any response is delivered as an SSE `message` event.
async fn post_message(State(state): State<HttpState>, body: String) -> Response {
    let (tx, stream_id, initialized) = {
        let active = state.slot.active.lock().expect("stream slot lock poisoned");
        match &*active {
            Some(s) => (s.tx.clone(), s.id, s.initialized),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error": "no active SSE stream"})),
                )
                    .into_response();
            }
        }
    };

    let req: JsonRpcRequest = match serde_json::from_str(body.trim()) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "request parse error");
            deliver(
                &tx,
                JsonRpcResponse::error(None, JsonRpcError::parse_error()),
            )
            .await;
            return StatusCode::ACCEPTED.into_response();
        }
    };

    if req.jsonrpc != "2.0" {
        deliver(
            &tx,
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
        )
        .await;
        return StatusCode::ACCEPTED.into_response();
    }

    // Same handshake gate as the stdio transport, scoped to this stream.
    if !initialized && req.method != "initialize" {
        if req.id.is_some() {
            deliver(
                &tx,
                JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                ),
            )
            .await;
        }
        return StatusCode::ACCEPTED.into_response();
    }

    if let Some(resp) = handlers::dispatch(&req, &state.registry).await {
        deliver(&tx, resp).await;
    }

    if req.method == "initialize" {
        let mut active = state.slot.active.lock().expect("stream slot lock poisoned");
        if let Some(s) = active.as_mut() {
            if s.id == stream_id {
                s.initialized = true;
            }
        }
    }

    StatusCode::ACCEPTED.into_response()
}

async fn deliver(tx: &mpsc::Sender<JsonRpcResponse>, resp: JsonRpcResponse) {
    if tx.send(resp).await.is_err() {
        tracing::warn!("stream closed before response delivery");
    }
}

/// Frees the streaming slot when the event stream is dropped, i.e. when the
/// client disconnects. Only clears the slot if it still holds this stream's
/// generation.
struct SlotGuard {
    slot: Arc<StreamSlot>,
    id: u64,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let mut active = self.slot.active.lock().expect("stream slot lock poisoned");
        if active.as_ref().map(|s| s.id) == Some(self.id) {
            *active = None;
            tracing::info!(stream = self.id, "sse client disconnected, slot freed");
        }
    }
}

/// SSE event source for one client: an initial `endpoint` event naming the
/// posting path, then one `message` event per JSON-RPC response.
struct EventStream {
    rx: mpsc::Receiver<JsonRpcResponse>,
    endpoint_sent: bool,
    _guard: SlotGuard,
}

impl Stream for EventStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if !self.endpoint_sent {
            self.endpoint_sent = true;
            return Poll::Ready(Some(Ok(Event::default()
                .event("endpoint")
                .data(MESSAGE_PATH))));
        }

        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(resp)) => {
                let data = serde_json::to_string(&resp)
                    .expect("JsonRpcResponse must serialize to JSON string");
                Poll::Ready(Some(Ok(Event::default().event("message").data(data))))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
