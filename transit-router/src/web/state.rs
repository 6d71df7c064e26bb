//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PathCache;
use crate::network::Network;
use crate::planner::RouterConfig;

/// Shared application state.
///
/// The network is immutable and shared by every request; each route query
/// builds its own search graph.
#[derive(Clone)]
pub struct AppState {
    /// Static rail network
    pub network: Arc<Network>,

    /// Route planner configuration
    pub config: Arc<RouterConfig>,

    /// Cache of computed paths between station pairs
    pub cache: Arc<PathCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: RouterConfig) -> Self {
        let cache = PathCache::new(&config);
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
