//! Membership Synchronizer
//!
//! Reacts to a maintainer queueing or dropping a message and fans the action
//! out to every other maintainer of the project. One membership record exists
//! per `(user, message, queue_name)` triple; fan-out creates the missing ones,
//! fan-in deletes them again. Each maintainer's record is an independent unit
//! of work: a store failure for one is logged and skipped, the rest proceed.

use crate::classify::QueueClassifier;
use crate::core::error_handling::log_error_with_context;
use crate::events::{Event, NotificationManager, QueueChange};
use crate::model::{MessageId, Project, UserId};
use crate::store::SeriesStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Propagates queue membership between the maintainers of a project
pub struct MembershipSynchronizer {
    store: Arc<dyn SeriesStore>,
    notification_manager: Arc<Mutex<NotificationManager>>,
}

impl MembershipSynchronizer {
    pub fn new(
        store: Arc<dyn SeriesStore>,
        notification_manager: Arc<Mutex<NotificationManager>>,
    ) -> Self {
        Self {
            store,
            notification_manager,
        }
    }

    /// Handle a message being queued by `acting_user`
    ///
    /// Creates a record for every other maintainer and publishes a propagated
    /// `Queued` event per record actually created. Idempotent: records that
    /// already exist are left untouched and re-emit nothing. The acting
    /// user's own record is managed by the event source, not here.
    pub async fn on_queued(
        &self,
        classifier: &QueueClassifier,
        acting_user: &UserId,
        project: &Project,
        message: &MessageId,
        queue_name: &str,
    ) {
        if !self.applies(classifier, acting_user, project, queue_name) {
            return;
        }

        for maintainer in project.maintainers() {
            if maintainer == acting_user {
                continue;
            }

            match self.store.get_or_create(maintainer, message, queue_name) {
                Ok((_, true)) => {
                    let event = Event::Queued(QueueChange::propagated(
                        maintainer.clone(),
                        acting_user.clone(),
                        project.name.clone(),
                        message.clone(),
                        queue_name,
                    ));
                    self.publish(event).await;
                }
                Ok((_, false)) => {
                    log::debug!(
                        "Record ({}, {}, {}) already present, skipping",
                        maintainer,
                        message,
                        queue_name
                    );
                }
                Err(e) => {
                    log_error_with_context(
                        &e,
                        &format!("Fan-out record creation for maintainer '{}'", maintainer),
                    );
                }
            }
        }
    }

    /// Handle a message being dropped by `acting_user`
    ///
    /// Deletes every other maintainer's record for `(message, queue_name)`
    /// and publishes a propagated `Dropped` event per deleted record,
    /// attributed to the record's original holder.
    pub async fn on_dropped(
        &self,
        classifier: &QueueClassifier,
        acting_user: &UserId,
        project: &Project,
        message: &MessageId,
        queue_name: &str,
    ) {
        if !self.applies(classifier, acting_user, project, queue_name) {
            return;
        }

        let records = match self.store.by_message_and_name(message, queue_name) {
            Ok(records) => records,
            Err(e) => {
                log_error_with_context(&e, "Fan-in record lookup");
                return;
            }
        };

        for record in records {
            if record.user == *acting_user || !project.maintained_by(&record.user) {
                continue;
            }

            match self.store.delete(&record.user, message, queue_name) {
                Ok(true) => {
                    let event = Event::Dropped(QueueChange::propagated(
                        record.user.clone(),
                        acting_user.clone(),
                        project.name.clone(),
                        message.clone(),
                        queue_name,
                    ));
                    self.publish(event).await;
                }
                // Deleted by a concurrent drop; nothing to report
                Ok(false) => {}
                Err(e) => {
                    log_error_with_context(
                        &e,
                        &format!("Fan-in record deletion for maintainer '{}'", record.user),
                    );
                }
            }
        }
    }

    /// Precondition shared by both operations: the queue is special and the
    /// acting user is a maintainer. Anything else is silently ignored.
    fn applies(
        &self,
        classifier: &QueueClassifier,
        acting_user: &UserId,
        project: &Project,
        queue_name: &str,
    ) -> bool {
        if !classifier.is_special(queue_name) {
            log::trace!(
                "Queue '{}' is not special for project '{}', ignoring",
                queue_name,
                project.name
            );
            return false;
        }
        if !project.maintained_by(acting_user) {
            log::trace!(
                "User '{}' is not a maintainer of '{}', ignoring",
                acting_user,
                project.name
            );
            return false;
        }
        true
    }

    async fn publish(&self, event: Event) {
        let mut manager = self.notification_manager.lock().await;
        if let Err(e) = manager.publish(event) {
            log_error_with_context(&e, "Publishing propagated queue event");
        }
    }
}
