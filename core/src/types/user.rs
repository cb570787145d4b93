use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of the space.
///
/// `role_type`: 1 administrator, 2 normal user, 3 reporter, 4 viewer,
/// 5 guest reporter, 6 guest viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Login id. `null` for bot accounts.
    pub user_id: Option<String>,
    pub name: String,
    pub role_type: i64,
    pub lang: Option<String>,
    pub mail_address: Option<String>,
    pub last_login_time: Option<DateTime<Utc>>,
}
