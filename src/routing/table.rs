//! Route table module
//!
//! Maps a decoded request path to a file under the server root or its parent.
//! Rules are evaluated in order and the first matching prefix wins.

use std::io;
use std::path::{Path, PathBuf};

/// Path served when the request is for `/`
pub const INDEX_PATH: &str = "/index.html";

/// Which root directory a rule resolves under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The server's own directory
    Server,
    /// One level above the server's directory (shared SDK and plugin folders)
    Parent,
}

/// A single prefix rule of the route table
#[derive(Debug, PartialEq, Eq)]
pub struct PrefixRule {
    pub prefix: &'static str,
    pub root: RootKind,
}

impl PrefixRule {
    /// Directory the prefix names, relative to its root
    pub fn mount_dir(&self) -> &'static str {
        self.prefix.trim_matches('/')
    }
}

/// Ordered prefix rules; anything unmatched falls back to `DEFAULT_ROOT`
pub const ROUTE_TABLE: &[PrefixRule] = &[
    PrefixRule {
        prefix: "/dist/",
        root: RootKind::Parent,
    },
    PrefixRule {
        prefix: "/jspsych-plugin/",
        root: RootKind::Parent,
    },
    PrefixRule {
        prefix: "/jspsych-extension/",
        root: RootKind::Parent,
    },
];

pub const DEFAULT_ROOT: RootKind = RootKind::Server;

/// Canonical root directories, resolved once at startup
#[derive(Debug, Clone)]
pub struct Roots {
    server: PathBuf,
    parent: PathBuf,
}

impl Roots {
    /// Canonicalize `server_root`; its parent becomes the parent root
    pub fn new(server_root: &Path) -> io::Result<Self> {
        let server = server_root.canonicalize()?;
        if !server.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", server.display()),
            ));
        }
        let parent = server.parent().map_or_else(|| server.clone(), Path::to_path_buf);
        Ok(Self { server, parent })
    }

    pub fn server(&self) -> &Path {
        &self.server
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn dir(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Server => &self.server,
            RootKind::Parent => &self.parent,
        }
    }
}

/// Result of routing a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Filesystem location of the requested file
    pub file: PathBuf,
    /// Directory the file must stay under once symlinks and `..` are resolved
    pub base: PathBuf,
}

/// Find the first rule whose prefix matches `path`
pub fn match_prefix(path: &str) -> Option<&'static PrefixRule> {
    ROUTE_TABLE.iter().find(|rule| path.starts_with(rule.prefix))
}

/// Resolve a percent-decoded request path against the route table
pub fn resolve(decoded_path: &str, roots: &Roots) -> ResolvedPath {
    let path = if decoded_path == "/" {
        INDEX_PATH
    } else {
        decoded_path
    };
    let relative = path.trim_start_matches('/');

    match match_prefix(path) {
        Some(rule) => {
            let root = roots.dir(rule.root);
            ResolvedPath {
                file: root.join(relative),
                base: root.join(rule.mount_dir()),
            }
        }
        None => {
            let root = roots.dir(DEFAULT_ROOT);
            ResolvedPath {
                file: root.join(relative),
                base: root.to_path_buf(),
            }
        }
    }
}
