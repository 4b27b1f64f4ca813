use crate::errors::AppError;
use crate::models::Marker;
use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;

const VISITS_KEY: &str = "visits";
const DAILY_KEY: &str = "daily_visits";
const MARKERS_KEY: &str = "visit_markers";

/// Access to the three visit records: the global counter, the per-day
/// histogram hash, and the serialized marker list. Missing keys and fields
/// read as zero/empty throughout.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Advance the global counter and return the new value.
    async fn increment_visits(&self) -> Result<u64, AppError>;

    async fn visits(&self) -> Result<u64, AppError>;

    async fn reset_visits(&self) -> Result<(), AppError>;

    /// Advance the histogram bucket for `date` (`YYYY-MM-DD`).
    async fn increment_daily(&self, date: &str) -> Result<(), AppError>;

    async fn daily_count(&self, date: &str) -> Result<u64, AppError>;

    async fn clear_daily(&self) -> Result<(), AppError>;

    async fn markers(&self) -> Result<Vec<Marker>, AppError>;

    /// Overwrite the whole marker list. Paired with `markers` this is a
    /// read-modify-write on a single blob; concurrent writers can lose
    /// appends. Callers must not rely on it under concurrency.
    async fn replace_markers(&self, markers: &[Marker]) -> Result<(), AppError>;

    async fn clear_markers(&self) -> Result<(), AppError>;
}

fn decode_markers(raw: Option<String>) -> Result<Vec<Marker>, AppError> {
    match raw {
        Some(blob) => Ok(serde_json::from_str(&blob)?),
        None => Ok(Vec::new()),
    }
}

fn encode_markers(markers: &[Marker]) -> Result<String, AppError> {
    Ok(serde_json::to_string(markers)?)
}

/// Production backend over a Redis connection manager.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500));

        let client = Client::open(url)?;
        let conn = client.get_connection_manager_with_config(config).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl VisitStore for RedisStore {
    async fn increment_visits(&self) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.incr(VISITS_KEY, 1).await?)
    }

    async fn visits(&self) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let count: Option<u64> = conn.get(VISITS_KEY).await?;
        Ok(count.unwrap_or(0))
    }

    async fn reset_visits(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(VISITS_KEY, 0).await?;
        Ok(())
    }

    async fn increment_daily(&self, date: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.hincr(DAILY_KEY, date, 1).await?;
        Ok(())
    }

    async fn daily_count(&self, date: &str) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let count: Option<u64> = conn.hget(DAILY_KEY, date).await?;
        Ok(count.unwrap_or(0))
    }

    async fn clear_daily(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(DAILY_KEY).await?;
        Ok(())
    }

    async fn markers(&self) -> Result<Vec<Marker>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(MARKERS_KEY).await?;
        decode_markers(raw)
    }

    async fn replace_markers(&self, markers: &[Marker]) -> Result<(), AppError> {
        let payload = encode_markers(markers)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set(MARKERS_KEY, payload).await?;
        Ok(())
    }

    async fn clear_markers(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(MARKERS_KEY).await?;
        Ok(())
    }
}

/// In-process backend with the same record shapes as Redis. The marker list
/// is kept serialized so the decode path is shared with `RedisStore`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryRecords>,
}

#[derive(Default)]
struct MemoryRecords {
    visits: u64,
    daily: BTreeMap<String, u64>,
    markers: Option<String>,
}

impl MemoryStore {
    /// Inject a raw marker blob, bypassing encoding. Lets tests exercise the
    /// malformed-data path.
    pub async fn put_raw_markers(&self, raw: impl Into<String>) {
        self.inner.lock().await.markers = Some(raw.into());
    }

    pub async fn daily_total(&self) -> u64 {
        self.inner.lock().await.daily.values().sum()
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn increment_visits(&self) -> Result<u64, AppError> {
        let mut records = self.inner.lock().await;
        records.visits += 1;
        Ok(records.visits)
    }

    async fn visits(&self) -> Result<u64, AppError> {
        Ok(self.inner.lock().await.visits)
    }

    async fn reset_visits(&self) -> Result<(), AppError> {
        self.inner.lock().await.visits = 0;
        Ok(())
    }

    async fn increment_daily(&self, date: &str) -> Result<(), AppError> {
        let mut records = self.inner.lock().await;
        *records.daily.entry(date.to_string()).or_default() += 1;
        Ok(())
    }

    async fn daily_count(&self, date: &str) -> Result<u64, AppError> {
        Ok(self.inner.lock().await.daily.get(date).copied().unwrap_or(0))
    }

    async fn clear_daily(&self) -> Result<(), AppError> {
        self.inner.lock().await.daily.clear();
        Ok(())
    }

    async fn markers(&self) -> Result<Vec<Marker>, AppError> {
        let raw = self.inner.lock().await.markers.clone();
        decode_markers(raw)
    }

    async fn replace_markers(&self, markers: &[Marker]) -> Result<(), AppError> {
        let payload = encode_markers(markers)?;
        self.inner.lock().await.markers = Some(payload);
        Ok(())
    }

    async fn clear_markers(&self) -> Result<(), AppError> {
        self.inner.lock().await.markers = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_records_read_as_zero_and_empty() {
        let store = MemoryStore::default();
        assert_eq!(store.visits().await.unwrap(), 0);
        assert_eq!(store.daily_count("2026-08-06").await.unwrap(), 0);
        assert!(store.markers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn marker_list_round_trips() {
        let store = MemoryStore::default();
        let markers = vec![Marker(1.0, 2.0), Marker(-45.5, 170.0)];
        store.replace_markers(&markers).await.unwrap();
        assert_eq!(store.markers().await.unwrap(), markers);

        store.clear_markers().await.unwrap();
        assert!(store.markers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_marker_blob_is_an_error() {
        let store = MemoryStore::default();
        store.put_raw_markers("{not json").await;
        let err = store.markers().await.unwrap_err();
        assert!(matches!(err, AppError::MalformedMarkerData(_)));
    }

    #[tokio::test]
    async fn daily_buckets_accumulate_per_date() {
        let store = MemoryStore::default();
        store.increment_daily("2026-08-05").await.unwrap();
        store.increment_daily("2026-08-06").await.unwrap();
        store.increment_daily("2026-08-06").await.unwrap();

        assert_eq!(store.daily_count("2026-08-05").await.unwrap(), 1);
        assert_eq!(store.daily_count("2026-08-06").await.unwrap(), 2);
        assert_eq!(store.daily_total().await, 3);

        store.clear_daily().await.unwrap();
        assert_eq!(store.daily_total().await, 0);
    }
}
