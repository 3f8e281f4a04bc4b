use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters of forwarded store requests
#[derive(Clone)]
pub struct Metrics {
    pub uploads_forwarded: Arc<AtomicU64>,
    pub listings_forwarded: Arc<AtomicU64>,
    pub stats_forwarded: Arc<AtomicU64>,
    pub downloads_forwarded: Arc<AtomicU64>,
    pub upstream_failures: Arc<AtomicU64>,
    pub bytes_uploaded: Arc<AtomicU64>,
    pub start_time: Instant,
}

/// Which store route a request was forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRoute {
    Upload,
    Files,
    DatabaseInfo,
    Download,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            uploads_forwarded: Arc::new(AtomicU64::new(0)),
            listings_forwarded: Arc::new(AtomicU64::new(0)),
            stats_forwarded: Arc::new(AtomicU64::new(0)),
            downloads_forwarded: Arc::new(AtomicU64::new(0)),
            upstream_failures: Arc::new(AtomicU64::new(0)),
            bytes_uploaded: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_forwarded(&self, route: StoreRoute) {
        let counter = match route {
            StoreRoute::Upload => &self.uploads_forwarded,
            StoreRoute::Files => &self.listings_forwarded,
            StoreRoute::DatabaseInfo => &self.stats_forwarded,
            StoreRoute::Download => &self.downloads_forwarded,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_uploaded_bytes(&self, bytes: u64) {
        self.bytes_uploaded.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uploads_forwarded: self.uploads_forwarded.load(Ordering::Relaxed),
            listings_forwarded: self.listings_forwarded.load(Ordering::Relaxed),
            stats_forwarded: self.stats_forwarded.load(Ordering::Relaxed),
            downloads_forwarded: self.downloads_forwarded.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            bytes_uploaded: self.bytes_uploaded.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub uploads_forwarded: u64,
    pub listings_forwarded: u64,
    pub stats_forwarded: u64,
    pub downloads_forwarded: u64,
    pub upstream_failures: u64,
    pub bytes_uploaded: u64,
    pub uptime_seconds: u64,
}
