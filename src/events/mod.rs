//! Typed Event Bus
//!
//! Publish/subscribe plumbing between the host's queue actions and this
//! plugin. The event set is a closed enum: a message being queued into a
//! named queue by a user, and a message being dropped from one. The
//! synchronizer both consumes these events and re-publishes them during
//! fan-out so that downstream listeners (notification mails, dashboards)
//! observe the propagated memberships too.

mod error;
mod event;
mod manager;
mod statistics;

pub mod api;

pub use error::{NotificationError, NotificationResult};
pub use event::{Event, EventFilter, QueueChange};
pub use manager::NotificationManager;
pub use statistics::SubscriberStatistics;
