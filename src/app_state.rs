use crate::store::ClientStore;

use std::sync::Arc;

/// Shared application state passed to each request handler.
///
/// The state is immutable once constructed, so concurrent requests need no coordination.
pub struct AppState {
    /// Client records, loaded before the server starts.
    pub store: ClientStore,
}

impl AppState {
    /// Create and return an [AppState].
    pub fn new(store: ClientStore) -> Self {
        Self { store }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
