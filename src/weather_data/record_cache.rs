use crate::types::reading::{StationYear, YearRecord};
use crate::weather_data::error::StorageError;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// JSON files on disk, one per station and year:
/// `<root>/<station>/weather_data_<year>.json`.
#[derive(Debug, Clone)]
pub struct RecordCache {
    root: PathBuf,
    #[cfg(test)]
    writes: Arc<AtomicUsize>,
}

impl RecordCache {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            #[cfg(test)]
            writes: Arc::default(),
        }
    }

    /// Number of records persisted through this cache.
    #[cfg(test)]
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn station_dir(&self, key: &StationYear) -> Result<PathBuf, StorageError> {
        let station = key.station.as_str();
        let is_plain_name = !station.is_empty()
            && station != "."
            && station != ".."
            && !station.contains(['/', '\\']);
        if !is_plain_name {
            return Err(StorageError::InvalidStation(key.station.clone()));
        }
        Ok(self.root.join(station))
    }

    pub fn path_for(&self, key: &StationYear) -> Result<PathBuf, StorageError> {
        Ok(self
            .station_dir(key)?
            .join(format!("weather_data_{}.json", key.year)))
    }

    /// Reads the stored record, or `None` when nothing is stored for `key`.
    pub async fn read(&self, key: &StationYear) -> Result<Option<YearRecord>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::CacheRead(path, e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::CacheDecode(path, e))
    }

    /// Writes `record`, replacing anything stored for `key`.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// readers never observe a half-written record.
    pub async fn save(&self, key: &StationYear, record: &YearRecord) -> Result<(), StorageError> {
        let dir = self.station_dir(key)?;
        let path = self.path_for(key)?;

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::CacheDirCreation(dir.clone(), e))?;

        let bytes =
            serde_json::to_vec(record).map_err(|e| StorageError::CacheEncode(path.clone(), e))?;
        let written = bytes.len();

        let target = path.clone();
        task::spawn_blocking(move || write_atomically(&dir, &target, &bytes)).await??;
        #[cfg(test)]
        self.writes.fetch_add(1, Ordering::SeqCst);

        info!("Wrote {} bytes for {} to {:?}", written, key, path);
        Ok(())
    }

    /// Deletes the stored record. Returns whether a file was removed.
    pub async fn invalidate(&self, key: &StationYear) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted cached record for {} at {:?}", key, path);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::CacheDeletion(path, e)),
        }
    }
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| StorageError::CacheWrite(path.to_path_buf(), e))?;
    temp_file
        .write_all(bytes)
        .map_err(|e| StorageError::CacheWrite(path.to_path_buf(), e))?;
    temp_file
        .flush()
        .map_err(|e| StorageError::CacheWrite(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| StorageError::CachePersist(path.to_path_buf(), e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reading::Reading;
    use tempfile::TempDir;

    fn sample_record() -> YearRecord {
        let mut record = YearRecord::new("Rome");
        record.insert("1/1/2023", 1, Reading::new(50.0, 32.0));
        record.insert("1/2/2023", 1, Reading::new(51.5, 33.1));
        record.insert("2/1/2023", 2, Reading::new(-4.0, -20.5));
        record
    }

    #[tokio::test]
    async fn test_save_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        let key = StationYear::new("ILAZIOCA17", 2023);
        let record = sample_record();

        cache.save(&key, &record).await.unwrap();

        assert!(dir
            .path()
            .join("ILAZIOCA17")
            .join("weather_data_2023.json")
            .is_file());
        assert_eq!(cache.read(&key).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        assert_eq!(cache.read(&StationYear::new("X", 2020)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        let key = StationYear::new("X", 2023);

        cache.save(&key, &sample_record()).await.unwrap();
        let replacement = YearRecord::new("Milan");
        cache.save(&key, &replacement).await.unwrap();

        assert_eq!(cache.read(&key).await.unwrap(), Some(replacement));
        assert_eq!(cache.writes(), 2);
        // Only the record file remains; no stray temp files.
        let entries = std::fs::read_dir(dir.path().join("X")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        let key = StationYear::new("X", 2023);
        cache.save(&key, &sample_record()).await.unwrap();

        assert!(cache.invalidate(&key).await.unwrap());
        assert!(!cache.invalidate(&key).await.unwrap());
        assert_eq!(cache.read(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        let key = StationYear::new("X", 2023);
        std::fs::create_dir_all(dir.path().join("X")).unwrap();
        std::fs::write(cache.path_for(&key).unwrap(), b"{\"country\":").unwrap();

        let err = cache.read(&key).await.unwrap_err();
        assert!(matches!(err, StorageError::CacheDecode(..)));
    }

    #[tokio::test]
    async fn test_reads_files_written_by_other_tools() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        let key = StationYear::new("X", 2019);
        std::fs::create_dir_all(dir.path().join("X")).unwrap();
        std::fs::write(
            cache.path_for(&key).unwrap(),
            r#"{"country":"Rome","data":{"5/3/2019":{"5":{"high":70.3,"low":55}}}}"#,
        )
        .unwrap();

        let record = cache.read(&key).await.unwrap().unwrap();
        assert_eq!(record.reading("5/3/2019", 5), Some(&Reading::new(70.3, 55.0)));
    }

    #[tokio::test]
    async fn test_rejects_station_names_that_escape_the_root() {
        let dir = TempDir::new().unwrap();
        let cache = RecordCache::new(dir.path());
        for station in ["", ".", "..", "../etc", "a/b", "a\\b"] {
            let key = StationYear::new(station, 2023);
            assert!(
                matches!(
                    cache.save(&key, &YearRecord::default()).await,
                    Err(StorageError::InvalidStation(_))
                ),
                "accepted {station:?}"
            );
        }
    }
}
