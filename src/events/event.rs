//! Event types for the queue-change bus

use crate::model::{MessageId, UserId};
use std::time::SystemTime;

/// Payload shared by both event variants
///
/// `user` is the holder of the affected queue record. During fan-out the
/// synchronizer publishes secondary events whose `user` is the maintainer
/// receiving (or losing) the record, with `acted_by` naming the maintainer
/// whose action triggered the change.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueChange {
    pub user: UserId,
    pub acted_by: UserId,
    pub project: String,
    pub message: MessageId,
    pub queue_name: String,
    pub timestamp: SystemTime,
}

impl QueueChange {
    /// A change performed by the holder themselves
    pub fn new(
        user: UserId,
        project: impl Into<String>,
        message: MessageId,
        queue_name: impl Into<String>,
    ) -> Self {
        Self {
            acted_by: user.clone(),
            user,
            project: project.into(),
            message,
            queue_name: queue_name.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// A propagated change: `user` holds the record, `acted_by` caused it
    pub fn propagated(
        user: UserId,
        acted_by: UserId,
        project: impl Into<String>,
        message: MessageId,
        queue_name: impl Into<String>,
    ) -> Self {
        Self {
            user,
            acted_by,
            project: project.into(),
            message,
            queue_name: queue_name.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// True when this event was re-published by fan-out rather than caused
    /// directly by the holder
    pub fn is_propagated(&self) -> bool {
        self.user != self.acted_by
    }
}

/// Closed set of queue-change events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A message entered a queue for `user`
    Queued(QueueChange),
    /// A message left a queue for `user`
    Dropped(QueueChange),
}

impl Event {
    pub fn change(&self) -> &QueueChange {
        match self {
            Event::Queued(change) | Event::Dropped(change) => change,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::Queued(_) => "Queued",
            Event::Dropped(_) => "Dropped",
        }
    }
}

/// Event filtering options for subscribers
#[derive(Clone, Debug, PartialEq)]
pub enum EventFilter {
    QueuedOnly,
    DroppedOnly,
    All,
}

impl EventFilter {
    /// Check if an event should be accepted by this filter
    pub fn accepts(&self, event: &Event) -> bool {
        matches!(
            (self, event),
            (EventFilter::QueuedOnly, Event::Queued(_))
                | (EventFilter::DroppedOnly, Event::Dropped(_))
                | (EventFilter::All, _)
        )
    }
}
