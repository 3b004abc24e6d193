// Server module entry point
// Listener setup, accept loop, connection tasks, signals and startup banner

pub mod banner;
pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use banner::{network_addresses, print_banner};
pub use listener::create_listener;
pub use server_loop::run_server;
pub use signal::{start_signal_handler, SignalHandler};
