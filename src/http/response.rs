//! HTTP response building module
//!
//! Provides builders for every status code the file server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::error::{io_error_code, ServeError};

/// Body of the 404 page
pub const NOT_FOUND_BODY: &str = "<h1>404 - 文件未找到 File Not Found</h1>";

/// Build 200 response carrying file contents
pub fn build_file_response(content: Vec<u8>, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("400 Bad Request")))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("400 Bad Request")))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("403 Forbidden")))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(Bytes::from("403 Forbidden")))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(NOT_FOUND_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)))
        })
}

/// Build 500 Internal Server Error response naming the I/O error code
pub fn build_500_response(code: &str) -> Response<Full<Bytes>> {
    let body = format!("Server Error: {code}");
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body.clone())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Map a request failure to its response
pub fn build_error_response(err: &ServeError) -> Response<Full<Bytes>> {
    match err {
        ServeError::MalformedPath(_) => build_400_response(),
        ServeError::OutsideRoot { .. } => build_403_response(),
        ServeError::NotFound(_) => build_404_response(),
        ServeError::Io { source, .. } => build_500_response(&io_error_code(source)),
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
