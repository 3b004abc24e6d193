// Configuration module entry point
// Loads settings, applies the command-line port and holds the shared state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig};

/// Settings file looked up when no `--config` is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "server";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error, every key has a default
    pub fn load_from(config_path: &str) -> Result<Self, StartupError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Override the configured port with the first positional argument
    pub fn apply_port_arg(&mut self, arg: Option<&str>) -> Result<(), StartupError> {
        if let Some(port) = parse_port_arg(arg)? {
            self.server.port = port;
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        if self.server.port == 0 {
            return Err(StartupError::InvalidPort("0".to_string()));
        }
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| StartupError::InvalidAddress(addr.clone()))
    }
}

/// Parse the port argument; empty or absent means "keep the configured port"
pub fn parse_port_arg(arg: Option<&str>) -> Result<Option<u16>, StartupError> {
    let Some(raw) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(Some(port)),
        _ => Err(StartupError::InvalidPort(raw.to_string())),
    }
}
