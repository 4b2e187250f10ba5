use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request outcome counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub productos_created: Arc<AtomicU64>,
    pub productos_updated: Arc<AtomicU64>,
    pub productos_deleted: Arc<AtomicU64>,
    pub fotos_uploaded: Arc<AtomicU64>,
    pub upload_bytes: Arc<AtomicU64>,
    pub validation_failures: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            productos_created: Arc::new(AtomicU64::new(0)),
            productos_updated: Arc::new(AtomicU64::new(0)),
            productos_deleted: Arc::new(AtomicU64::new(0)),
            fotos_uploaded: Arc::new(AtomicU64::new(0)),
            upload_bytes: Arc::new(AtomicU64::new(0)),
            validation_failures: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_created(&self) {
        self.productos_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_updated(&self) {
        self.productos_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_deleted(&self) {
        self.productos_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_upload(&self, bytes: u64) {
        self.fotos_uploaded.fetch_add(1, Ordering::Relaxed);
        self.upload_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn inc_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            productos_created: self.productos_created.load(Ordering::Relaxed),
            productos_updated: self.productos_updated.load(Ordering::Relaxed),
            productos_deleted: self.productos_deleted.load(Ordering::Relaxed),
            fotos_uploaded: self.fotos_uploaded.load(Ordering::Relaxed),
            upload_bytes: self.upload_bytes.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
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
    pub productos_created: u64,
    pub productos_updated: u64,
    pub productos_deleted: u64,
    pub fotos_uploaded: u64,
    pub upload_bytes: u64,
    pub validation_failures: u64,
    pub uptime_seconds: u64,
}
