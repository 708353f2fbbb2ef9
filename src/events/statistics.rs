//! Subscriber statistics for the event bus

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Instant;

/// Statistics tracking for a subscriber
///
/// Updated from both the publishing side (queue depth) and the consuming
/// side (processed count), hence the atomics.
#[derive(Default)]
pub struct SubscriberStatistics {
    queue_size: AtomicUsize,
    events_processed: AtomicUsize,
    last_event_time: RwLock<Option<Instant>>,
}

impl SubscriberStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_size(&self) -> usize {
        self.queue_size.load(Ordering::Relaxed)
    }

    pub fn increment_queue_size(&self) {
        self.queue_size.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement_queue_size(&self) {
        self.queue_size
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(1))
            })
            .ok();
    }

    pub fn events_processed(&self) -> usize {
        self.events_processed.load(Ordering::Relaxed)
    }

    pub fn record_event_processed(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut time) = self.last_event_time.write() {
            *time = Some(Instant::now());
        }
    }

    pub fn last_event_time(&self) -> Option<Instant> {
        *self.last_event_time.read().ok()?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_depth_counter() {
        let stats = SubscriberStatistics::new();
        assert_eq!(stats.queue_size(), 0);

        stats.increment_queue_size();
        stats.increment_queue_size();
        assert_eq!(stats.queue_size(), 2);

        stats.decrement_queue_size();
        assert_eq!(stats.queue_size(), 1);

        // Never underflows
        stats.decrement_queue_size();
        stats.decrement_queue_size();
        assert_eq!(stats.queue_size(), 0);
    }

    #[test]
    fn test_processed_tracking() {
        let stats = SubscriberStatistics::new();
        assert!(stats.last_event_time().is_none());

        stats.record_event_processed();
        assert_eq!(stats.events_processed(), 1);
        assert!(stats.last_event_time().is_some());
    }
}
