//! Tracing (logging)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_FILTER: &str = "kyc_registry=debug,tower_http=debug";

/// Build the log filter from `directives`, falling back to [DEFAULT_FILTER].
///
/// Invalid directives are reported on stderr, since the subscriber that would log them does not
/// exist yet.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    match directives {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|error| {
            eprintln!("ignoring invalid RUST_LOG '{}': {}", directives, error);
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Initialise tracing (logging) for the registry server.
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to debug logging
/// for this crate and tower_http.
pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(build_filter(directives.as_deref()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
