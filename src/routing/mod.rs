//! Routing module
//!
//! Provides the fixed route table that decides which root directory a
//! request path is served from.

mod table;

pub use table::{
    match_prefix, resolve, PrefixRule, ResolvedPath, RootKind, Roots, DEFAULT_ROOT, INDEX_PATH,
    ROUTE_TABLE,
};
