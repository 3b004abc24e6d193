//! Error types
//!
//! `ServeError` covers everything that can go wrong while answering a single
//! request; each variant maps to one status code. `StartupError` covers the
//! fatal conditions before the accept loop runs.

use hyper::StatusCode;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-request failure, terminal for that request only
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("malformed request path '{0}'")]
    MalformedPath(String),

    #[error("path '{path}' resolves outside of {}", .base.display())]
    OutsideRoot { path: String, base: PathBuf },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedPath(_) => StatusCode::BAD_REQUEST,
            Self::OutsideRoot { .. } => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Short errno-style code for an I/O error, used in 500 bodies
///
/// The OS errno wins when there is one; the `ErrorKind` only covers errors
/// built without an OS code.
pub fn io_error_code(err: &io::Error) -> String {
    if let Some(name) = err.raw_os_error().and_then(errno_name) {
        return name.to_string();
    }
    let code = match err.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::IsADirectory => "EISDIR",
        io::ErrorKind::NotADirectory => "ENOTDIR",
        io::ErrorKind::OutOfMemory => "ENOMEM",
        other => return format!("{other:?}"),
    };
    code.to_string()
}

#[cfg(unix)]
const fn errno_name(errno: i32) -> Option<&'static str> {
    let name = match errno {
        libc::ENOENT => "ENOENT",
        libc::EACCES => "EACCES",
        libc::EPERM => "EPERM",
        libc::EISDIR => "EISDIR",
        libc::ENOTDIR => "ENOTDIR",
        libc::ELOOP => "ELOOP",
        libc::ENAMETOOLONG => "ENAMETOOLONG",
        libc::EMFILE => "EMFILE",
        libc::ENFILE => "ENFILE",
        libc::ENOMEM => "ENOMEM",
        libc::EIO => "EIO",
        libc::EBUSY => "EBUSY",
        libc::EAGAIN => "EAGAIN",
        libc::EINVAL => "EINVAL",
        _ => return None,
    };
    Some(name)
}

#[cfg(not(unix))]
const fn errno_name(_errno: i32) -> Option<&'static str> {
    None
}

/// Fatal startup failure
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid port '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("server root {} is not usable: {source}", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log files: {0}")]
    Logger(#[source] io::Error),

    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = ServeError::from_io(
            Path::new("/srv/missing.png"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, ServeError::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_io_other_is_internal_error() {
        let err = ServeError::from_io(
            Path::new("/srv/secret"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ServeError::Io { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServeError::MalformedPath("%zz".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        let escape = ServeError::OutsideRoot {
            path: "/../etc/passwd".to_string(),
            base: PathBuf::from("/srv"),
        };
        assert_eq!(escape.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_io_error_code() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(io_error_code(&denied), "EACCES");
        let dir = io::Error::from(io::ErrorKind::IsADirectory);
        assert_eq!(io_error_code(&dir), "EISDIR");
        let other = io::Error::from(io::ErrorKind::TimedOut);
        assert_eq!(io_error_code(&other), "TimedOut");
    }

    #[cfg(unix)]
    #[test]
    fn test_io_error_code_uses_errno() {
        let looped = io::Error::from_raw_os_error(libc::ELOOP);
        assert_eq!(io_error_code(&looped), "ELOOP");
        let long = io::Error::from_raw_os_error(libc::ENAMETOOLONG);
        assert_eq!(io_error_code(&long), "ENAMETOOLONG");
        let dir = io::Error::from_raw_os_error(libc::EISDIR);
        assert_eq!(io_error_code(&dir), "EISDIR");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_reports_eloop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("b.html");
        std::os::unix::fs::symlink(&b, &a).unwrap();
        std::os::unix::fs::symlink(&a, &b).unwrap();

        let err = std::fs::read(&a).unwrap_err();
        assert_eq!(io_error_code(&err), "ELOOP");
    }

    #[test]
    fn test_startup_error_messages_are_readable() {
        let err = StartupError::InvalidPort("abc".to_string());
        assert_eq!(
            err.to_string(),
            "invalid port 'abc': expected an integer between 1 and 65535"
        );

        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let err = StartupError::Bind {
            addr,
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to bind 0.0.0.0:8080: "));
        assert!(!message.contains("Os {"));
    }
}
