use spa_preview::{config, logger, server};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Serving root is fixed at startup
    let root = std::env::current_dir()?;

    // Build the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, root))?;

    // Drop connections still in flight instead of waiting on keep-alive clients
    runtime.shutdown_background();
    Ok(())
}

async fn async_main(cfg: config::Config, root: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener =
        server::create_listener(addr).map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&addr, &root, &cfg);

    let state = Arc::new(config::AppState::new(cfg, root));
    let shutdown = async {
        match server::shutdown_signal().await {
            Ok(signal) => logger::log_shutdown(signal),
            Err(e) => {
                logger::log_error(&format!("Failed to register shutdown signals: {e}"));
                std::future::pending::<()>().await;
            }
        }
    };

    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}
