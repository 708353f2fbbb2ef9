//! Public API for the event bus
//!
//! External modules should import from here rather than directly from the
//! internal modules. The bus is a process-wide service: the host publishes
//! queue changes into it, the plugin subscribes and re-publishes fan-out.

use std::sync::{Arc, LazyLock};
use tokio::sync::Mutex;

pub use crate::events::error::NotificationError;
pub use crate::events::event::{Event, EventFilter, QueueChange};
pub use crate::events::manager::NotificationManager;
pub use crate::events::statistics::SubscriberStatistics;

/// Global event bus instance
static NOTIFICATION_SERVICE: LazyLock<Arc<Mutex<NotificationManager>>> = LazyLock::new(|| {
    log::trace!("Initializing notification service");
    Arc::new(Mutex::new(NotificationManager::new()))
});

/// Access the event bus
///
/// Returns a guard for the shared process-wide bus. Each call locks the same
/// instance.
pub async fn get_notification_service() -> tokio::sync::MutexGuard<'static, NotificationManager> {
    NOTIFICATION_SERVICE.lock().await
}

/// Get a direct Arc reference to the bus for dependency injection
///
/// Used by the host when wiring the plugin: the manager handle is injected
/// via `Plugin::set_notification_manager` before initialization.
pub fn get_notification_service_arc() -> Arc<Mutex<NotificationManager>> {
    NOTIFICATION_SERVICE.clone()
}
