use crate::error::CalendarError;
use crate::types::reading::{StationYear, YearRecord};
use crate::weather_data::aggregator::YearAggregator;
use crate::weather_data::record_cache::RecordCache;
use crate::weather_data::source::MonthlySource;
use log::{info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Read-through access to year records: served from disk when present,
/// otherwise aggregated from the source and written to disk first.
///
/// Operations on the same (station, year) are serialized within the process.
pub struct RecordLoader<S> {
    cache: RecordCache,
    aggregator: YearAggregator<S>,
    key_locks: Mutex<HashMap<StationYear, Arc<Mutex<()>>>>,
}

impl<S: MonthlySource> RecordLoader<S> {
    pub fn new(cache_dir: &Path, aggregator: YearAggregator<S>) -> Self {
        Self {
            cache: RecordCache::new(cache_dir),
            aggregator,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    pub fn aggregator(&self) -> &YearAggregator<S> {
        &self.aggregator
    }

    /// Runs `op` while holding the lock for `key`.
    ///
    /// The lock entry is dropped from the map once no other caller holds or
    /// awaits it, so the map only holds keys currently in use.
    async fn with_key_lock<T, F, Fut>(&self, key: StationYear, op: F) -> T
    where
        F: FnOnce(StationYear) -> Fut,
        Fut: Future<Output = T>,
    {
        let lock = {
            let mut locks = self.key_locks.lock().await;
            Arc::clone(locks.entry(key.clone()).or_default())
        };

        let result = {
            let _guard = lock.lock().await;
            op(key.clone()).await
        };

        let mut locks = self.key_locks.lock().await;
        // Owned by the map and `lock` only: nobody else is waiting on this key.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&key);
        }
        result
    }

    /// Returns the cached record, building and caching it on a miss.
    pub async fn load(&self, station: &str, year: i32) -> Result<YearRecord, CalendarError> {
        self.with_key_lock(StationYear::new(station, year), |key| async move {
            self.load_locked(&key).await
        })
        .await
    }

    /// Drops the cached record and rebuilds it from the source.
    ///
    /// The old record is deleted before the rebuild starts; if the rebuild
    /// fails the key is left uncached.
    pub async fn refresh(&self, station: &str, year: i32) -> Result<YearRecord, CalendarError> {
        self.with_key_lock(StationYear::new(station, year), |key| async move {
            self.refresh_locked(&key).await
        })
        .await
    }

    /// Deletes the cached record if there is one.
    pub async fn invalidate(&self, station: &str, year: i32) -> Result<bool, CalendarError> {
        let removed = self
            .with_key_lock(StationYear::new(station, year), |key| async move {
                self.cache.invalidate(&key).await
            })
            .await?;
        Ok(removed)
    }

    /// Stores `record` as the cached record for the key, replacing any existing one.
    pub async fn save(
        &self,
        station: &str,
        year: i32,
        record: &YearRecord,
    ) -> Result<(), CalendarError> {
        self.with_key_lock(StationYear::new(station, year), |key| async move {
            self.cache.save(&key, record).await
        })
        .await?;
        Ok(())
    }

    async fn load_locked(&self, key: &StationYear) -> Result<YearRecord, CalendarError> {
        if let Some(record) = self.cache.read(key).await? {
            info!("Cache hit for {}", key);
            return Ok(record);
        }

        warn!("Cache miss for {}. Downloading and processing.", key);
        let record = self.aggregator.build(&key.station, key.year).await?;
        self.cache.save(key, &record).await?;
        Ok(record)
    }

    async fn refresh_locked(&self, key: &StationYear) -> Result<YearRecord, CalendarError> {
        self.cache.invalidate(key).await?;
        self.load_locked(key).await
    }
}
