//! Caching layer for computed paths.
//!
//! The network is static, so the K shortest paths between two stations
//! never change. Paths are cached by (source station, destination station,
//! K); itineraries are rebuilt per request because the walk distances
//! depend on the exact coordinates.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::domain::StationId;
use crate::planner::{RankedPath, RouterConfig};

/// Cache key: (source station, destination station, K).
type PathKey = (StationId, StationId, usize);

/// Cached search result.
type PathEntry = Arc<Vec<RankedPath>>;

/// Bounded TTL cache of K-shortest-paths results.
#[derive(Clone)]
pub struct PathCache {
    paths: MokaCache<PathKey, PathEntry>,
}

impl PathCache {
    /// Create a cache sized and timed by the router configuration.
    pub fn new(config: &RouterConfig) -> Self {
        let paths = MokaCache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl())
            .build();
        Self { paths }
    }

    /// Return the cached paths for a key, computing and storing them on a
    /// miss. Errors are not cached.
    pub fn get_or_try_insert<E>(
        &self,
        source: &StationId,
        dest: &StationId,
        k: usize,
        compute: impl FnOnce() -> Result<Vec<RankedPath>, E>,
    ) -> Result<PathEntry, E> {
        let key = (source.clone(), dest.clone(), k);
        if let Some(entry) = self.paths.get(&key) {
            return Ok(entry);
        }

        let entry = Arc::new(compute()?);
        self.paths.insert(key, entry.clone());
        Ok(entry)
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.paths.invalidate_all();
    }
}
