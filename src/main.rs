//! Sandbox-runtime binary entry point.

use sandbox_runtime::api::{self, AppState};
use sandbox_runtime::{cli, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("sandbox-runtime: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return std::process::ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return std::process::ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sandbox-runtime: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    sandbox_runtime::logging::init_with_filter(config.log_filter());

    info!("sandbox-runtime v{}", env!("CARGO_PKG_VERSION"));
    info!(root = %config.sandbox.root.display(), "sandbox root");

    if !config.sandbox.root.is_dir() {
        warn!(
            root = %config.sandbox.root.display(),
            "sandbox root does not exist; commands will fail to spawn"
        );
    }

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("sandbox-runtime: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let state = AppState::new(config.sandbox.root.clone());

    if let Err(e) = api::serve(addr, state).await {
        eprintln!("sandbox-runtime: {e}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
