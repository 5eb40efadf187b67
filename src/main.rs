use clap::Parser;
use std::process::ExitCode;

use fileserve::cli::Cli;
use fileserve::config::Config;
use fileserve::{logger, FileHandler, Server, StartupError};

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
    let cfg = Config::load(cli)?;
    let addr = cfg.get_socket_addr()?;
    logger::init(&cfg.logging).map_err(StartupError::Logging)?;

    // Size the runtime from config, default is one worker per core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async move {
        let server = Server::bind(addr, FileHandler::from_config(&cfg))?;
        logger::log_server_start(&server.local_addr(), &cfg.files.root);
        server.run().await;
        Ok(())
    })
}
