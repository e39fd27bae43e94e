//! Template sync worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p tmplsync-worker
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use tmplsync_common::{init_tracing, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format follows APP_ENV
    let config = AppConfig::from_env();
    let env = config.as_ref().map_or(Environment::default(), |c| c.app.env);

    if let Err(e) = init_tracing(&TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        interval_secs = config.sync.interval_secs,
        run_once = config.sync.run_once,
        "Configuration loaded"
    );

    if let Err(e) = tmplsync_worker::run(config).await {
        error!(error = %e, code = e.error_code(), "Template sync worker failed");
        std::process::exit(1);
    }
}
