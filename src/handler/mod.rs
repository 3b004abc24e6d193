//! Request handler module
//!
//! Maps each request onto a file under one of the root directories.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
