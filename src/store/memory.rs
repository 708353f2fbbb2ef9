//! In-memory store implementation

use crate::model::{MessageId, QueuedSeries, UserId};
use crate::store::error::StoreResult;
use crate::store::SeriesStore;
use std::collections::HashMap;
use std::sync::Mutex;

type RecordKey = (UserId, MessageId, String);

#[derive(Default)]
struct Inner {
    records: HashMap<RecordKey, u64>,
    next_seq: u64,
}

/// HashMap-backed store with the same atomicity contract as the real backend
///
/// The single mutex makes every operation per-record atomic; the sequence
/// counter gives records a stable creation order for status reconciliation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-insert; the map itself is still
        // consistent since each operation is a single insert/remove.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SeriesStore for MemoryStore {
    fn get_or_create(
        &self,
        user: &UserId,
        message: &MessageId,
        name: &str,
    ) -> StoreResult<(QueuedSeries, bool)> {
        let mut inner = self.lock();
        let key = (user.clone(), message.clone(), name.to_string());

        if let Some(&seq) = inner.records.get(&key) {
            return Ok((
                QueuedSeries {
                    user: user.clone(),
                    message: message.clone(),
                    name: name.to_string(),
                    seq,
                },
                false,
            ));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(key, seq);

        Ok((
            QueuedSeries {
                user: user.clone(),
                message: message.clone(),
                name: name.to_string(),
                seq,
            },
            true,
        ))
    }

    fn delete(&self, user: &UserId, message: &MessageId, name: &str) -> StoreResult<bool> {
        let mut inner = self.lock();
        let key = (user.clone(), message.clone(), name.to_string());
        Ok(inner.records.remove(&key).is_some())
    }

    fn by_message_and_name(
        &self,
        message: &MessageId,
        name: &str,
    ) -> StoreResult<Vec<QueuedSeries>> {
        let inner = self.lock();
        let mut records: Vec<QueuedSeries> = inner
            .records
            .iter()
            .filter(|((_, m, n), _)| m == message && n == name)
            .map(|((u, m, n), &seq)| QueuedSeries {
                user: u.clone(),
                message: m.clone(),
                name: n.clone(),
                seq,
            })
            .collect();
        records.sort_by_key(|r| r.seq);
        Ok(records)
    }

    fn by_message(&self, message: &MessageId) -> StoreResult<Vec<QueuedSeries>> {
        let inner = self.lock();
        let mut records: Vec<QueuedSeries> = inner
            .records
            .iter()
            .filter(|((_, m, _), _)| m == message)
            .map(|((u, m, n), &seq)| QueuedSeries {
                user: u.clone(),
                message: m.clone(),
                name: n.clone(),
                seq,
            })
            .collect();
        records.sort_by_key(|r| r.seq);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (UserId, MessageId) {
        (UserId::new("alice"), MessageId::new("msg-1"))
    }

    #[test]
    fn test_get_or_create_reports_creation() {
        let store = MemoryStore::new();
        let (alice, msg) = ids();

        let (first, created) = store.get_or_create(&alice, &msg, "accept").expect("create");
        assert!(created);

        let (second, created) = store.get_or_create(&alice, &msg, "accept").expect("get");
        assert!(!created);
        assert_eq!(first, second);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let (alice, msg) = ids();

        store.get_or_create(&alice, &msg, "accept").expect("create");
        assert!(store.delete(&alice, &msg, "accept").expect("delete"));
        assert!(!store.delete(&alice, &msg, "accept").expect("second delete"));
        assert!(store
            .by_message_and_name(&msg, "accept")
            .expect("query")
            .is_empty());
    }

    #[test]
    fn test_queries_filter_and_sort_by_creation() {
        let store = MemoryStore::new();
        let msg = MessageId::new("msg-1");
        let other = MessageId::new("msg-2");

        store
            .get_or_create(&UserId::new("bob"), &msg, "accept")
            .expect("create");
        store
            .get_or_create(&UserId::new("carol"), &msg, "accept")
            .expect("create");
        store
            .get_or_create(&UserId::new("alice"), &msg, "alice-private")
            .expect("create");
        store
            .get_or_create(&UserId::new("bob"), &other, "accept")
            .expect("create");

        let by_name = store.by_message_and_name(&msg, "accept").expect("query");
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name[0].user, UserId::new("bob"));
        assert_eq!(by_name[1].user, UserId::new("carol"));

        let all = store.by_message(&msg).expect("query");
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].seq < w[1].seq));
    }

    #[test]
    fn test_same_name_different_users_are_distinct() {
        let store = MemoryStore::new();
        let msg = MessageId::new("msg-1");

        store
            .get_or_create(&UserId::new("alice"), &msg, "accept")
            .expect("create");
        let (_, created) = store
            .get_or_create(&UserId::new("bob"), &msg, "accept")
            .expect("create");
        assert!(created);
    }
}
