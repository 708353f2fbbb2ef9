//! Membership Record Store
//!
//! Persistence seam for `QueuedSeries` records. The host application owns the
//! real database; this module defines the narrow interface the plugin needs
//! (atomic get-or-create, delete, filtered reads) plus an in-memory
//! implementation used by the host's test harness and by unit tests.

mod error;
mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::model::{MessageId, QueuedSeries, UserId};

/// Storage interface for queue membership records
///
/// Implementations must provide per-record atomicity: the `created` flag
/// returned by `get_or_create` reflects whether *this* call performed the
/// insert, not a racing one. Nothing here is transactional across records;
/// fan-out treats each record as an independent unit of work.
pub trait SeriesStore: Send + Sync {
    /// Fetch the record for `(user, message, name)`, creating it if absent
    ///
    /// Returns the record and whether this call created it.
    fn get_or_create(
        &self,
        user: &UserId,
        message: &MessageId,
        name: &str,
    ) -> StoreResult<(QueuedSeries, bool)>;

    /// Delete the record for `(user, message, name)`; true if one existed
    fn delete(&self, user: &UserId, message: &MessageId, name: &str) -> StoreResult<bool>;

    /// All records for a message in one queue, in creation order
    fn by_message_and_name(&self, message: &MessageId, name: &str)
        -> StoreResult<Vec<QueuedSeries>>;

    /// All records for a message across all queues, in creation order
    fn by_message(&self, message: &MessageId) -> StoreResult<Vec<QueuedSeries>>;
}
