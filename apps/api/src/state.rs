use std::sync::Arc;

use crate::assistant::relay::ChatRelay;
use crate::config::Config;
use crate::listings::store::ListingStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
    /// `None` when the data service credentials are not configured.
    pub listings: Option<Arc<dyn ListingStore>>,
    pub config: Config,
}
