//! `tiny_http` listener
//!
//! Accepts connections on a blocking thread and hands every request to the
//! tokio runtime, where the body is read, the router awaited and the
//! response written.

use std::io::{Cursor, Read};
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use tiny_http::{Header, Request, Response, Server, StatusCode};
use tokio::task::JoinHandle;

use crate::api::{ApiError, EditorApi, RequestContext};
use crate::config::ServerConfig;

use super::routes::{Reply, Router};

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;

/// HTTP server serving the editor API
pub struct ApiServer {
    server: Arc<Server>,
    router: Arc<Router>,
    user_header: Option<String>,
}

impl std::fmt::Debug for ApiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiServer")
            .field("addr", &self.local_addr())
            .field("router", &self.router)
            .field("user_header", &self.user_header)
            .finish_non_exhaustive()
    }
}

impl ApiServer {
    /// Bind the listener described by `config`
    pub fn bind(config: &ServerConfig, api: Arc<EditorApi>) -> anyhow::Result<Self> {
        let addr = config.bind_addr();
        let server = Server::http(&addr)
            .map_err(|e| anyhow::anyhow!("Failed to start server on {addr}: {e}"))?;

        Ok(Self {
            server: Arc::new(server),
            router: Arc::new(Router::with_prefix(api, &config.prefix)),
            user_header: config.user_header.clone(),
        })
    }

    /// Address actually bound (useful with port 0)
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Handle that stops [`ApiServer::run`] from another task
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
        }
    }

    /// Serve until shut down
    ///
    /// Must be called from within a tokio runtime. Returns once the accept
    /// loop has stopped and every request it accepted has been answered.
    pub async fn run(self) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Handle::current();
        let Self {
            server,
            router,
            user_header,
        } = self;

        if let Some(addr) = server.server_addr().to_ip() {
            info!("editor api listening on http://{addr}");
        }

        let in_flight = tokio::task::spawn_blocking(move || {
            let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
            for request in server.incoming_requests() {
                in_flight.retain(|task| !task.is_finished());
                let ctx = request_context(&request, user_header.as_deref());
                in_flight.push(runtime.spawn(serve(Arc::clone(&router), ctx, request)));
            }
            in_flight
        })
        .await?;

        if !in_flight.is_empty() {
            info!("waiting for {} in-flight request(s)", in_flight.len());
        }
        for task in in_flight {
            if let Err(e) = task.await {
                error!("request task failed: {e}");
            }
        }

        info!("editor api stopped");
        Ok(())
    }
}

/// Stops a running [`ApiServer`]
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
}

impl std::fmt::Debug for ShutdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandle").finish_non_exhaustive()
    }
}

impl ShutdownHandle {
    /// Stop accepting requests
    ///
    /// [`ApiServer::run`] still answers the requests it already accepted
    /// before returning.
    pub fn shutdown(&self) {
        self.server.unblock();
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

async fn serve(router: Arc<Router>, ctx: RequestContext, request: Request) {
    let read = tokio::task::spawn_blocking(move || {
        let mut request = request;
        let body = read_body(&mut request);
        (request, body)
    })
    .await;
    let (request, body) = match read {
        Ok(read) => read,
        Err(e) => {
            error!("request reader failed: {e}");
            return;
        },
    };

    // Request is not Sync, so nothing borrowed from it may live across an await
    let method = request.method().clone();
    let url = request.url().to_string();
    let reply = match body {
        Ok(body) => router.dispatch(&method, &url, &ctx, &body).await,
        Err(e) => Reply::error(&e),
    };

    let response = to_response(&reply);
    match tokio::task::spawn_blocking(move || request.respond(response)).await {
        Ok(Ok(())) => {},
        Ok(Err(e)) => warn!("failed to write response: {e}"),
        Err(e) => error!("response writer failed: {e}"),
    }
}

/// Resolve the upstream-injected identity
fn request_context(request: &Request, user_header: Option<&str>) -> RequestContext {
    let user = user_header.and_then(|name| {
        request
            .headers()
            .iter()
            .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str().trim().to_string())
            .filter(|user| !user.is_empty())
    });
    RequestContext { user }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read the raw request body
fn read_body(request: &mut Request) -> Result<Vec<u8>, ApiError> {
    if let Some(length) = request.body_length()
        && length as u64 > MAX_BODY_BYTES
    {
        return Err(too_large());
    }
    read_limited(request.as_reader(), MAX_BODY_BYTES)
}

/// Read at most `limit` bytes, failing when the reader holds more
fn read_limited(reader: impl Read, limit: u64) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;
    if body.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(body)
}

fn too_large() -> ApiError {
    ApiError::payload_too_large(format!("Request body exceeds {MAX_BODY_BYTES} bytes"))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a settled reply into a `tiny_http` response
fn to_response(reply: &Reply) -> Response<Cursor<Vec<u8>>> {
    let status = StatusCode(reply.status);
    let Some(body) = &reply.body else {
        return Response::from_data(Vec::new()).with_status_code(status);
    };

    let json = serde_json::to_vec(body).unwrap_or_else(|_| br#"{"code":"INTERNAL_ERROR"}"#.to_vec());
    let response = Response::from_data(json).with_status_code(status);
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
