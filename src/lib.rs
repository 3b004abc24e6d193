//! Static file server for browser-based experiments.
//!
//! Serves the experiment directory and, for the shared `/dist/`,
//! `/jspsych-plugin/` and `/jspsych-extension/` prefixes, its parent directory.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
