//! Routing configuration.

use std::time::Duration;

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Number of alternative routes returned when the caller does not ask
    /// for a specific number.
    pub default_routes: usize,

    /// Upper bound on the number of routes a caller may request.
    pub max_routes: usize,

    /// Maximum walk from a coordinate to its nearest station (km).
    /// Queries with either end further away than this return no routes.
    pub service_radius_km: f64,

    /// Maximum number of spur searches per query.
    /// Bounds the cost of the K-shortest-paths search on long paths.
    pub max_spur_searches: usize,

    /// How long computed paths stay in the path cache (seconds).
    pub cache_ttl_secs: u64,

    /// Maximum number of station pairs held in the path cache.
    pub cache_capacity: u64,
}

impl RouterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_routes: usize,
        max_routes: usize,
        service_radius_km: f64,
        max_spur_searches: usize,
        cache_ttl_secs: u64,
        cache_capacity: u64,
    ) -> Self {
        Self {
            default_routes,
            max_routes,
            service_radius_km,
            max_spur_searches,
            cache_ttl_secs,
            cache_capacity,
        }
    }

    /// Clamp a requested route count to `1..=max_routes`, defaulting when
    /// none was given.
    pub fn route_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_routes)
            .clamp(1, self.max_routes.max(1))
    }

    /// Returns the cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_routes: 3,
            max_routes: 10,
            service_radius_km: 5.0,
            max_spur_searches: 10_000,
            cache_ttl_secs: 600, // 10 minutes
            cache_capacity: 1000,
        }
    }
}
