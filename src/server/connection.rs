// Connection handling module
// Serves each accepted TCP connection on its own task

use std::sync::Arc;
use std::time::Instant;

use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Serve one connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 (keep-alive on) with the request handler
/// 3. Writes an access log entry per response when enabled
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move {
                    if !state.access_log_enabled() {
                        return handler::handle_request(req, state).await;
                    }

                    let started = Instant::now();
                    let mut entry = AccessLogEntry::from_request(&peer_addr, &req);
                    let response = handler::handle_request(req, Arc::clone(&state)).await?;

                    entry.status = response.status().as_u16();
                    entry.body_bytes = response
                        .body()
                        .size_hint()
                        .exact()
                        .and_then(|n| usize::try_from(n).ok())
                        .unwrap_or(0);
                    entry.request_time_us =
                        u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                    logger::log_access(&entry, &state.config.logging.access_log_format);

                    Ok(response)
                }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
