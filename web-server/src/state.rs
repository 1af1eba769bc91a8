use std::sync::Arc;

use flightmap::types::EnrichedDataset;

/// Shared application state: the enriched snapshot built once at startup.
/// Handlers only ever read it, so cloning the state between requests is
/// an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<EnrichedDataset>,
}
