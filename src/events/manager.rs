//! NotificationManager implementation

use crate::events::error::{NotificationError, NotificationResult};
use crate::events::event::{Event, EventFilter};
use crate::events::statistics::SubscriberStatistics;
use std::collections::HashMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

struct SubscriberInfo {
    filter: EventFilter,
    source: String,
    sender: UnboundedSender<Event>,
    statistics: SubscriberStatistics,
}

/// Fan-out hub delivering queue-change events to registered subscribers
///
/// Each subscriber gets its own unbounded channel; delivery to one subscriber
/// never blocks on another. Subscribers whose receiving end is gone are
/// unregistered on the next publish.
#[derive(Default)]
pub struct NotificationManager {
    subscribers: HashMap<String, SubscriberInfo>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        subscriber_id: String,
        filter: EventFilter,
        source: String,
    ) -> UnboundedReceiver<Event> {
        let (sender, receiver) = unbounded_channel();

        let subscriber_info = SubscriberInfo {
            filter,
            source: source.clone(),
            sender,
            statistics: SubscriberStatistics::new(),
        };

        if let Some(existing) = self.subscribers.insert(subscriber_id.clone(), subscriber_info) {
            log::warn!(
                "Subscriber '{}' replaced existing subscription (source: {} -> {})",
                subscriber_id,
                existing.source,
                source
            );
        }

        receiver
    }

    pub fn unsubscribe(&mut self, subscriber_id: &str) -> bool {
        self.subscribers.remove(subscriber_id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn has_subscriber(&self, subscriber_id: &str) -> bool {
        self.subscribers.contains_key(subscriber_id)
    }

    pub fn get_subscriber_statistics(&self, subscriber_id: &str) -> Option<&SubscriberStatistics> {
        self.subscribers.get(subscriber_id).map(|info| &info.statistics)
    }

    /// Consumer-side acknowledgement: one event pulled off the channel
    pub fn record_event_processed(&self, subscriber_id: &str) {
        if let Some(info) = self.subscribers.get(subscriber_id) {
            info.statistics.decrement_queue_size();
            info.statistics.record_event_processed();
        }
    }

    /// Deliver an event to every subscriber whose filter accepts it
    ///
    /// Subscribers with a closed channel are removed and reported via
    /// `PublishFailed`; delivery to the remaining subscribers still happens.
    pub fn publish(&mut self, event: Event) -> NotificationResult<()> {
        let event_type = event.kind_name().to_string();
        let mut failed_subscribers = Vec::new();

        for (subscriber_id, subscriber_info) in &self.subscribers {
            if subscriber_info.filter.accepts(&event) {
                subscriber_info.statistics.increment_queue_size();

                if subscriber_info.sender.send(event.clone()).is_err() {
                    failed_subscribers.push(subscriber_id.clone());
                }
            }
        }

        for subscriber_id in &failed_subscribers {
            self.subscribers.remove(subscriber_id);
        }

        if !failed_subscribers.is_empty() {
            return Err(NotificationError::PublishFailed {
                event_type,
                failed_subscribers,
            });
        }

        Ok(())
    }
}
