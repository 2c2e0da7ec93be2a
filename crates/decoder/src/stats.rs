use std::sync::atomic::{AtomicU64, Ordering};

/// Failure and lifecycle counters for a registry. Failures that never reach
/// the caller (reset/destroy on a bad handle) stay observable here.
#[derive(Debug, Default)]
pub struct RegistryStats {
    created: AtomicU64,
    destroyed: AtomicU64,
    invalid_handle: AtomicU64,
    buffer_failures: AtomicU64,
    codec_errors: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub created: u64,
    pub destroyed: u64,
    pub invalid_handle: u64,
    pub buffer_failures: u64,
    pub codec_errors: u64,
}

impl StatsSnapshot {
    pub fn live(&self) -> u64 {
        self.created.saturating_sub(self.destroyed)
    }
}

impl RegistryStats {
    pub(crate) fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_destroyed(&self) {
        self.destroyed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalid_handle(&self) {
        self.invalid_handle.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_buffer_failure(&self) {
        self.buffer_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_codec_error(&self) {
        self.codec_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            created: self.created.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
            invalid_handle: self.invalid_handle.load(Ordering::Relaxed),
            buffer_failures: self.buffer_failures.load(Ordering::Relaxed),
            codec_errors: self.codec_errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let stats = RegistryStats::default();
        stats.record_created();
        stats.record_created();
        stats.record_destroyed();
        stats.record_invalid_handle();
        stats.record_buffer_failure();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.created, 2);
        assert_eq!(snapshot.live(), 1);
        assert_eq!(snapshot.invalid_handle, 1);
        assert_eq!(snapshot.buffer_failures, 1);
        assert_eq!(snapshot.codec_errors, 0);
    }
}
