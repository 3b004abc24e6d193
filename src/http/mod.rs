//! HTTP protocol layer module
//!
//! Path decoding, content types and response builders, decoupled from the
//! route table and the filesystem.

pub mod decode;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use decode::decode_path;
pub use response::{
    build_400_response, build_403_response, build_404_response, build_500_response,
    build_error_response, build_file_response,
};
