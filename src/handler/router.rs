//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: decode, route, load, respond.
//! Every method gets the same lookup treatment.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files::{self, StaticFile};
use crate::http;
use crate::logger;
use crate::routing;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let uri = req.uri();
    let raw_target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    logger::log_request(raw_target);

    let response = match serve_path(uri.path(), &state).await {
        Ok(file) => http::build_file_response(file.content, file.content_type),
        Err(err) => {
            log_failure(&err);
            http::build_error_response(&err)
        }
    };

    Ok(response)
}

/// Decode the raw path, route it and load the file
async fn serve_path(raw_path: &str, state: &AppState) -> Result<StaticFile, ServeError> {
    let decoded = http::decode_path(raw_path)?;
    let target = routing::resolve(&decoded, &state.roots);
    static_files::load_file(&target, &decoded).await
}

fn log_failure(err: &ServeError) {
    match err {
        // Missing files are routine; escapes were logged while loading
        ServeError::NotFound(_) | ServeError::OutsideRoot { .. } => {}
        ServeError::MalformedPath(_) => logger::log_warning(&err.to_string()),
        ServeError::Io { .. } => logger::log_error(&err.to_string()),
    }
}
