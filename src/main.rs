//! Word frequency server.
//!
//! ```text
//!     POST /service/word   {"word": "..."}  ──┐
//!                                             ├──▶ http (axum) ──▶ FrequencyTable
//!     GET  /service/prefix?prefix=...       ──┘        │            (RwLock<BTreeMap>)
//!                                                      ▼
//!                                          observability (tracing, metrics)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use word_frequency::config::{load_config, validate_config, ServiceConfig};
use word_frequency::observability::{logging, metrics};
use word_frequency::{FrequencyTable, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "word-frequency")]
#[command(about = "In-memory word frequency service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(word_frequency::config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "word-frequency starting");
    tracing::info!(
        config_path = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let table = Arc::new(FrequencyTable::new());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config, table);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
