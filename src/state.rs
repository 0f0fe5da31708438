use crate::services::eth_client::ChainReader;
use crate::services::prices::PriceSource;
use std::sync::Arc;

/// Shared handles behind the router. Both are injected so tests can swap in
/// doubles for the node endpoint and the price source.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<dyn ChainReader>,
    pub prices: Arc<dyn PriceSource>,
}
