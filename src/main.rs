use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use experiment_server::config::{self, AppState};
use experiment_server::error::StartupError;
use experiment_server::{logger, server};

/// Static file server for the experiment directory
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Port to listen on (default 8080)
    port: Option<String>,

    /// Settings file, extension optional
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StartupError> {
    let mut cfg = config::Config::load_from(&cli.config)?;
    cfg.apply_port_arg(cli.port.as_deref())?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    // Build the Tokio runtime, honoring the configured worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg)?);

    let listener =
        server::create_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&addr, &state.config, state.roots.server());
    server::print_banner(addr.port(), &server::network_addresses());

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::run_server(listener, state, Arc::clone(&signals.shutdown)).await;
    Ok(())
}
