//! dairylog — core of a dairy production report tool.
//!
//! Ingests an uploaded PDF report, submits it to an external asynchronous
//! extraction service, polls for results under a bounded fixed-interval
//! policy, normalizes the server-defined record schema into stable rows
//! plus an explicit field list, persists completed reports, and derives
//! table/chart presentation inputs. The UI shell lives outside this crate
//! and renders whatever structured results the core returns.

pub mod config;
pub mod connectivity;
pub mod models;
pub mod pipeline;
pub mod present;
pub mod storage;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG` or the crate default filter.
///
/// Call once from the shell embedding this crate.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
