//! This file defines the kyc-registry binary entry point.

use kyc_registry::app;
use kyc_registry::app_state::AppState;
use kyc_registry::cli;
use kyc_registry::metrics;
use kyc_registry::server;
use kyc_registry::store::ClientStore;
use kyc_registry::tracing;

use std::process::exit;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing();
    ::tracing::debug!("{:?}", args);
    if let Err(error) = metrics::register_metrics() {
        ::tracing::error!("failed to register metrics: {}", error);
        exit(1)
    }
    let store = match ClientStore::load(&args.data_file) {
        Ok(store) => store,
        Err(error) => {
            ::tracing::error!("{}", error);
            if let Some(source) = std::error::Error::source(&error) {
                ::tracing::error!("Caused by: {}", source);
            }
            exit(1)
        }
    };
    let state = Arc::new(AppState::new(store));
    let service = app::service(&args, state);
    if let Err(error) = server::serve(&args, service).await {
        ::tracing::error!("{}", error);
        exit(1)
    }
}
