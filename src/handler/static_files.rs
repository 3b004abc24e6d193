//! Static file serving module
//!
//! Loads a routed file after checking that it stays under its base directory.

use crate::error::ServeError;
use crate::http::mime;
use crate::logger;
use crate::routing::ResolvedPath;
use tokio::fs;

/// File contents ready to be sent
#[derive(Debug)]
pub struct StaticFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Load a resolved file, enforcing containment under `target.base`
pub async fn load_file(target: &ResolvedPath, request_path: &str) -> Result<StaticFile, ServeError> {
    let base = fs::canonicalize(&target.base)
        .await
        .map_err(|e| ServeError::from_io(&target.base, e))?;

    let file = fs::canonicalize(&target.file)
        .await
        .map_err(|e| ServeError::from_io(&target.file, e))?;

    if !file.starts_with(&base) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file.display()
        ));
        return Err(ServeError::OutsideRoot {
            path: request_path.to_string(),
            base,
        });
    }

    let content = fs::read(&file)
        .await
        .map_err(|e| ServeError::from_io(&target.file, e))?;

    // Content type follows the requested name, not a symlink target
    let content_type = mime::content_type_for(&target.file);

    Ok(StaticFile {
        content,
        content_type,
    })
}
