//! Host data model as seen by the plugin
//!
//! The host application owns users, projects and messages; the plugin only
//! needs identifiers, the maintainer set of a project, and the persisted
//! `QueuedSeries` membership record.

use crate::config::CollabConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a host user (the login name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a reviewable patch series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A project with its maintainer set and queue configuration
///
/// Every maintainer has equal collaboration rights; fan-out targets all of
/// them except the acting user. The configuration is an immutable value built
/// once at load time and passed by reference into the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    maintainers: Vec<UserId>,
    config: CollabConfig,
}

impl Project {
    pub fn new(name: impl Into<String>, maintainers: Vec<UserId>, config: CollabConfig) -> Self {
        Self {
            name: name.into(),
            maintainers,
            config,
        }
    }

    pub fn maintainers(&self) -> &[UserId] {
        &self.maintainers
    }

    pub fn maintained_by(&self, user: &UserId) -> bool {
        self.maintainers.contains(user)
    }

    pub fn config(&self) -> &CollabConfig {
        &self.config
    }
}

/// Persisted queue membership record: `(user, message, queue_name)`
///
/// `queue_name` is a free-text label, matched at read time against the
/// project's queue definitions; it is not a foreign key. The `seq` number is
/// assigned by the store on creation and gives a deterministic iteration
/// order for status reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedSeries {
    pub user: UserId,
    pub message: MessageId,
    pub name: String,
    pub seq: u64,
}

/// Queue name used by watch queries for passive tracking; never rendered
pub const WATCHED_QUEUE: &str = "watched";
