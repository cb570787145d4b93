//! Entity types mirroring Backlog's JSON schema.
//!
//! # Design
//! Each entity has one canonical shape. Fields Backlog may send as `null` are
//! `Option`; arrays default to empty when absent; fields whose schema varies
//! by context stay as `serde_json::Value`. Timestamps are UTC.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod file;
pub mod issue;
pub mod notification;
pub mod project;
pub mod space;
pub mod user;
pub mod wiki;

pub use file::{Attachment, SharedFile};
pub use issue::{Issue, IssueType, Milestone, Priority, Resolution, Star, Status};
pub use notification::{Comment, Notification};
pub use project::Project;
pub use space::{
    ActivityComment, ActivityContent, ActivityNotification, Change, DiskUsage, DiskUsageDetail,
    RecentUpdate, Space, SpaceNotification,
};
pub use user::User;
pub use wiki::{Tag, WikiListItem, WikiPage};

/// Body of the `*/count` and `markAsRead` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Count {
    pub count: i64,
}

/// A project or issue reference: numeric id or key such as `"TEST"` or
/// `"TEST-12"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrKey {
    Id(i64),
    Key(String),
}

impl Default for IdOrKey {
    fn default() -> Self {
        IdOrKey::Id(0)
    }
}

impl fmt::Display for IdOrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdOrKey::Id(id) => write!(f, "{id}"),
            IdOrKey::Key(key) => f.write_str(key),
        }
    }
}

impl From<i64> for IdOrKey {
    fn from(id: i64) -> Self {
        IdOrKey::Id(id)
    }
}

impl From<&str> for IdOrKey {
    fn from(key: &str) -> Self {
        IdOrKey::Key(key.to_string())
    }
}

impl From<String> for IdOrKey {
    fn from(key: String) -> Self {
        IdOrKey::Key(key)
    }
}
