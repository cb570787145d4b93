use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A file attached to an issue or wiki page.
///
/// Issue listings send only `id`, `name` and `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub created_user: Option<User>,
    pub created: Option<DateTime<Utc>>,
}

/// A file from the project's shared file storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFile {
    pub id: i64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub dir: String,
    pub name: String,
    pub size: i64,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: Option<User>,
    pub updated: Option<DateTime<Utc>>,
}
