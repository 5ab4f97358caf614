//! Reference-data repository with an explicit staleness contract.
//!
//! Locations and categories change rarely and are read constantly, so they
//! get a caching decorator. Staleness is visible and testable: entries live
//! for a fixed TTL measured against the injected clock, and writers call
//! `invalidate()` to drop the snapshot immediately.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use gearshed_core::Clock;
use gearshed_inventory::{Category, Location};

use crate::error::StorageError;

/// Read path for reference data.
pub trait ReferenceData: Send + Sync {
    fn locations(&self) -> Result<Vec<Location>, StorageError>;

    fn categories(&self) -> Result<Vec<Category>, StorageError>;
}

#[derive(Debug, Clone)]
struct Snapshot {
    locations: Vec<Location>,
    categories: Vec<Category>,
    fetched_at: DateTime<Utc>,
}

/// TTL-caching decorator over any [`ReferenceData`] source.
pub struct CachedReferenceData<R, C> {
    source: R,
    clock: C,
    ttl: Duration,
    cache: RwLock<Option<Snapshot>>,
}

impl<R, C> CachedReferenceData<R, C>
where
    R: ReferenceData,
    C: Clock,
{
    /// TTL comes from `GEARSHED_REFDATA_TTL_SECS`, defaulting to 5 minutes.
    pub fn new(source: R, clock: C) -> Self {
        let ttl_secs = std::env::var("GEARSHED_REFDATA_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(300);
        Self::with_ttl(source, clock, Duration::seconds(ttl_secs))
    }

    pub fn with_ttl(source: R, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Drop the cached snapshot. The next read refetches from the source.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
        tracing::debug!("reference data cache invalidated");
    }

    fn fresh_snapshot(&self) -> Result<Snapshot, StorageError> {
        let now = self.clock.now();

        if let Ok(cache) = self.cache.read() {
            if let Some(snapshot) = cache.as_ref() {
                if now - snapshot.fetched_at < self.ttl {
                    return Ok(snapshot.clone());
                }
            }
        }

        let snapshot = Snapshot {
            locations: self.source.locations()?,
            categories: self.source.categories()?,
            fetched_at: now,
        };
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(snapshot.clone());
        }
        Ok(snapshot)
    }
}

impl<R, C> ReferenceData for CachedReferenceData<R, C>
where
    R: ReferenceData,
    C: Clock,
{
    fn locations(&self) -> Result<Vec<Location>, StorageError> {
        Ok(self.fresh_snapshot()?.locations)
    }

    fn categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.fresh_snapshot()?.categories)
    }
}

impl<R: ReferenceData + ?Sized> ReferenceData for std::sync::Arc<R> {
    fn locations(&self) -> Result<Vec<Location>, StorageError> {
        (**self).locations()
    }

    fn categories(&self) -> Result<Vec<Category>, StorageError> {
        (**self).categories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::TimeZone;
    use gearshed_core::{FixedClock, LocationId};

    /// Counts fetches so tests can observe cache hits vs misses.
    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl ReferenceData for CountingSource {
        fn locations(&self) -> Result<Vec<Location>, StorageError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Location {
                id: LocationId::new(),
                name: "container".to_string(),
                description: None,
            }])
        }

        fn categories(&self) -> Result<Vec<Category>, StorageError> {
            Ok(vec![])
        }
    }

    fn cached() -> (
        Arc<CountingSource>,
        Arc<FixedClock>,
        CachedReferenceData<Arc<CountingSource>, Arc<FixedClock>>,
    ) {
        let source = Arc::new(CountingSource::new());
        let clock = Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        ));
        let cache = CachedReferenceData::with_ttl(
            source.clone(),
            clock.clone(),
            Duration::seconds(60),
        );
        (source, clock, cache)
    }

    #[test]
    fn serves_from_cache_within_ttl() {
        let (source, _clock, cache) = cached();
        cache.locations().unwrap();
        cache.locations().unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refetches_after_ttl_expires() {
        let (source, clock, cache) = cached();
        cache.locations().unwrap();
        clock.advance(Duration::seconds(61));
        cache.locations().unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let (source, _clock, cache) = cached();
        cache.locations().unwrap();
        cache.invalidate();
        cache.locations().unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
