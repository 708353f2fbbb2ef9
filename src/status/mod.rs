//! Status Reconciler
//!
//! Derives the single display tag (and at most one extra status line) for a
//! message from its membership records. Records can disagree: one maintainer
//! queued the series into "accept" while another tracks it privately. A
//! running priority resolves the conflict: 0 = nothing, 1 = tracked in some
//! private queue, 2 = sitting in a configured special queue. A candidate
//! replaces the current one only at priority >= the running priority, so with
//! records iterated in creation order the most-recently-created record wins
//! ties. Nothing here is persisted; the host recomputes status per render.

use crate::classify::QueueClassifier;
use crate::config::TagKind;
use crate::core::error_handling::log_error_with_context;
use crate::model::{MessageId, QueuedSeries, WATCHED_QUEUE};
use crate::store::SeriesStore;
use serde::Serialize;
use std::sync::Arc;

/// A rendered status badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TagKind,
    #[serde(rename = "char")]
    pub glyph: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_class: Option<String>,
}

/// An extra status line below the series subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraStatus {
    pub icon: String,
    pub html: String,
}

/// Derived display state for one message
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageStatus {
    pub tag: Option<Tag>,
    pub extra: Option<ExtraStatus>,
}

/// Reads a message's membership records and reconciles them into one status
pub struct StatusReconciler {
    store: Arc<dyn SeriesStore>,
}

impl StatusReconciler {
    pub fn new(store: Arc<dyn SeriesStore>) -> Self {
        Self { store }
    }

    /// Derive the display status for `message`
    ///
    /// A store failure degrades to the untracked tag; rendering never fails.
    pub fn derive_status(
        &self,
        classifier: &QueueClassifier,
        message: &MessageId,
    ) -> MessageStatus {
        let records = match self.store.by_message(message) {
            Ok(records) => records,
            Err(e) => {
                log_error_with_context(&e, "Membership record lookup for status");
                return untracked_status();
            }
        };
        reconcile(classifier, &records)
    }
}

/// Pure reconciliation over an ordered record list
pub fn reconcile(classifier: &QueueClassifier, records: &[QueuedSeries]) -> MessageStatus {
    if records.is_empty() {
        return untracked_status();
    }

    let mut priority = 0u8;
    let mut tag: Option<Tag> = None;
    let mut extra: Option<ExtraStatus> = None;

    for record in records {
        if let Some(matched) = classifier.classify(&record.name) {
            // priority 2 always satisfies >= running
            tag = Some(Tag {
                title: matched.title(),
                kind: matched.kind(),
                glyph: matched.glyph(),
                row_class: None,
            });
            // Lower-priority extra lines lose once a special queue is seen
            extra = None;
            priority = 2;
        } else if record.name == WATCHED_QUEUE {
            // Passive tracking, never surfaced
        } else if priority <= 1 {
            tag = Some(tracked_tag());
            extra = Some(ExtraStatus {
                icon: "fa-exclamation-circle".to_string(),
                html: format!(
                    "Series is already tracked by {}",
                    escape_html(record.user.as_str())
                ),
            });
            priority = 1;
        }
    }

    MessageStatus { tag, extra }
}

fn untracked_status() -> MessageStatus {
    MessageStatus {
        tag: Some(Tag {
            title: "Neither tracked or accepted".to_string(),
            kind: TagKind::Warning,
            glyph: "!".to_string(),
            row_class: None,
        }),
        extra: None,
    }
}

fn tracked_tag() -> Tag {
    Tag {
        title: "Tracked by maintainers".to_string(),
        kind: TagKind::Secondary,
        glyph: "T".to_string(),
        row_class: Some("tracked".to_string()),
    }
}

/// Escape HTML special characters for host-rendered fragments
pub(crate) fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollabConfig;
    use crate::model::UserId;

    fn classifier() -> QueueClassifier {
        let config = CollabConfig::from_toml_str(
            r#"
            [[queues]]
            regex = "accept"
            title = "Accepted"
            char = "A"
            type = "success"

            [[queues]]
            regex = "RHEL-(\\d+\\.\\d+)"
            title = "Queued for RHEL %s"
            char = "Q"
            type = "success"
            group = 1
        "#,
        )
        .expect("config should parse");
        QueueClassifier::new(&config).expect("classifier should compile")
    }

    fn record(user: &str, name: &str, seq: u64) -> QueuedSeries {
        QueuedSeries {
            user: UserId::new(user),
            message: MessageId::new("msg-1"),
            name: name.to_string(),
            seq,
        }
    }

    #[test]
    fn test_untracked_default() {
        let status = reconcile(&classifier(), &[]);
        let tag = status.tag.expect("untracked tag");
        assert_eq!(tag.title, "Neither tracked or accepted");
        assert_eq!(tag.kind, TagKind::Warning);
        assert_eq!(tag.glyph, "!");
        assert!(status.extra.is_none());
    }

    #[test]
    fn test_special_queue_renders_definition_tag() {
        let status = reconcile(&classifier(), &[record("alice", "RHEL-8.9", 0)]);
        let tag = status.tag.expect("special tag");
        assert_eq!(tag.title, "Queued for RHEL 8.9");
        assert_eq!(tag.kind, TagKind::Success);
        assert_eq!(tag.glyph, "Q");
    }

    #[test]
    fn test_generic_queue_renders_tracked_tag_with_extra() {
        let status = reconcile(&classifier(), &[record("alice", "alice-private", 0)]);
        let tag = status.tag.expect("tracked tag");
        assert_eq!(tag.title, "Tracked by maintainers");
        assert_eq!(tag.kind, TagKind::Secondary);
        assert_eq!(tag.glyph, "T");
        assert_eq!(tag.row_class.as_deref(), Some("tracked"));

        let extra = status.extra.expect("extra status");
        assert_eq!(extra.icon, "fa-exclamation-circle");
        assert_eq!(extra.html, "Series is already tracked by alice");
    }

    #[test]
    fn test_special_beats_generic_regardless_of_order() {
        let classifier = classifier();

        let special_first = reconcile(
            &classifier,
            &[record("alice", "accept", 0), record("bob", "bob-queue", 1)],
        );
        assert_eq!(special_first.tag.expect("tag").title, "Accepted");
        assert!(special_first.extra.is_none());

        let generic_first = reconcile(
            &classifier,
            &[record("bob", "bob-queue", 0), record("alice", "accept", 1)],
        );
        assert_eq!(generic_first.tag.expect("tag").title, "Accepted");
        assert!(generic_first.extra.is_none());
    }

    #[test]
    fn test_later_special_record_wins_tie() {
        let status = reconcile(
            &classifier(),
            &[record("alice", "accept", 0), record("bob", "RHEL-9.4", 1)],
        );
        assert_eq!(status.tag.expect("tag").title, "Queued for RHEL 9.4");
    }

    #[test]
    fn test_watched_is_ignored() {
        let classifier = classifier();

        // watched alone leaves priority at zero: no tag at all
        let status = reconcile(&classifier, &[record("alice", "watched", 0)]);
        assert!(status.tag.is_none());
        assert!(status.extra.is_none());

        // and it never overrides a real record
        let status = reconcile(
            &classifier,
            &[record("alice", "accept", 0), record("bob", "watched", 1)],
        );
        assert_eq!(status.tag.expect("tag").title, "Accepted");
    }

    #[test]
    fn test_extra_status_escapes_user_name() {
        let status = reconcile(&classifier(), &[record("<script>", "private", 0)]);
        let extra = status.extra.expect("extra status");
        assert!(extra.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tag_serialization_shape() {
        let status = reconcile(&classifier(), &[]);
        let json = serde_json::to_value(status.tag.expect("tag")).expect("serialize");
        assert_eq!(json["title"], "Neither tracked or accepted");
        assert_eq!(json["type"], "warning");
        assert_eq!(json["char"], "!");
        assert!(json.get("row_class").is_none());
    }

    #[test]
    fn test_reconciler_reads_from_store() {
        use crate::store::{MemoryStore, SeriesStore};

        let store = Arc::new(MemoryStore::new());
        let msg = MessageId::new("msg-1");
        store
            .get_or_create(&UserId::new("alice"), &msg, "accept")
            .expect("create");

        let reconciler = StatusReconciler::new(store);
        let status = reconciler.derive_status(&classifier(), &msg);
        assert_eq!(status.tag.expect("tag").title, "Accepted");
    }

    #[test]
    fn test_store_failure_degrades_to_untracked() {
        use crate::store::{SeriesStore, StoreError, StoreResult};

        struct DownStore;

        impl SeriesStore for DownStore {
            fn get_or_create(
                &self,
                _user: &UserId,
                _message: &MessageId,
                _name: &str,
            ) -> StoreResult<(QueuedSeries, bool)> {
                Err(StoreError::Unavailable {
                    message: "connection refused".to_string(),
                })
            }

            fn delete(&self, _: &UserId, _: &MessageId, _: &str) -> StoreResult<bool> {
                Err(StoreError::Unavailable {
                    message: "connection refused".to_string(),
                })
            }

            fn by_message_and_name(
                &self,
                _: &MessageId,
                _: &str,
            ) -> StoreResult<Vec<QueuedSeries>> {
                Err(StoreError::Unavailable {
                    message: "connection refused".to_string(),
                })
            }

            fn by_message(&self, _: &MessageId) -> StoreResult<Vec<QueuedSeries>> {
                Err(StoreError::Unavailable {
                    message: "connection refused".to_string(),
                })
            }
        }

        let reconciler = StatusReconciler::new(Arc::new(DownStore));
        let status = reconciler.derive_status(&classifier(), &MessageId::new("msg-1"));
        assert_eq!(status.tag.expect("tag").title, "Neither tracked or accepted");
    }
}
