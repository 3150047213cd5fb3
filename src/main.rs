/*!
 * Linkwatch entry point
 */

use std::sync::Arc;

use linkwatch::error::{LinkwatchError, Result, EXIT_SUCCESS};
use linkwatch::{logging, run_monitor, MonitorConfig, SystemProber};
use tokio::io::BufReader;

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let config = MonitorConfig::default();

    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| LinkwatchError::Runtime(format!("Failed to start async runtime: {}", e)))?;

    let prober = Arc::new(SystemProber::new(&config.policy));
    let result = runtime.block_on(run_monitor(
        &config,
        prober,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ));

    // A console read may still be parked in a blocking thread
    runtime.shutdown_timeout(config.shutdown_grace);

    result.map(|_| ())
}
