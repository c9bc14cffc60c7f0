//! Caching and fallback layer for TransportAPI responses.
//!
//! Live departures change minute to minute, so they are cached briefly;
//! nearby stops barely change and are cached for longer. Stop lookups are
//! keyed by a ~100 m grid cell so small GPS jitter reuses the same entry.
//!
//! This layer also owns the fallback decision: any failure from the
//! directory yields the static dataset, which is never cached so the next
//! request retries the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::{AtcoCode, Coordinates, Departure, Stop};
use crate::transport::{Sourced, StopDirectory, fallback_departures, fallback_stops};

/// Cache key for stop lookups: coordinate grid cell.
type StopsKey = (i32, i32);

type StopsEntry = Arc<Vec<Stop>>;
type DeparturesEntry = Arc<Vec<Departure>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached departure boards.
    pub departures_ttl: Duration,

    /// TTL for cached stop lookups.
    pub stops_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            departures_ttl: Duration::from_secs(30),
            stops_ttl: Duration::from_secs(5 * 60),
            max_capacity: 1000,
        }
    }
}

/// Stop directory with caching and fallback.
pub struct CachedTransportClient {
    directory: Arc<dyn StopDirectory>,
    stops: MokaCache<StopsKey, StopsEntry>,
    departures: MokaCache<AtcoCode, DeparturesEntry>,
}

impl CachedTransportClient {
    /// Create a new cached client.
    pub fn new(directory: Arc<dyn StopDirectory>, config: &CacheConfig) -> Self {
        let stops = MokaCache::builder()
            .time_to_live(config.stops_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let departures = MokaCache::builder()
            .time_to_live(config.departures_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            directory,
            stops,
            departures,
        }
    }

    /// Nearby stops, from cache, the API, or the fallback set.
    pub async fn nearby_stops(&self, at: Coordinates) -> Sourced<StopsEntry> {
        let key = at.grid_cell();

        if let Some(cached) = self.stops.get(&key).await {
            debug!(?key, "stops cache hit");
            return Sourced::live(cached);
        }

        match self.directory.nearby_stops(at).await {
            Ok(stops) => {
                let entry = Arc::new(stops);
                self.stops.insert(key, entry.clone()).await;
                Sourced::live(entry)
            }
            Err(e) => {
                warn!(error = %e, "nearby stops unavailable, serving fallback");
                Sourced::fallback(Arc::new(fallback_stops()))
            }
        }
    }

    /// Live departures, from cache, the API, or the fallback set.
    pub async fn live_departures(&self, stop: &AtcoCode) -> Sourced<DeparturesEntry> {
        if let Some(cached) = self.departures.get(stop).await {
            debug!(%stop, "departures cache hit");
            return Sourced::live(cached);
        }

        match self.directory.live_departures(stop).await {
            Ok(departures) => {
                let entry = Arc::new(departures);
                self.departures.insert(stop.clone(), entry.clone()).await;
                Sourced::live(entry)
            }
            Err(e) => {
                warn!(%stop, error = %e, "live departures unavailable, serving fallback");
                Sourced::fallback(Arc::new(fallback_departures()))
            }
        }
    }
}
