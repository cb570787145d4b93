use serde::{Deserialize, Serialize};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::query::{EncodeQuery, QueryParams};
use crate::types::{DiskUsage, RecentUpdate, Space, SpaceNotification};

/// Filters for `GET /space/activities`. Every scalar is sent, zero included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentUpdatesQuery {
    pub activity_type_ids: Vec<i64>,
    pub min_id: i64,
    pub max_id: i64,
    pub count: i64,
    /// `"asc"` or `"desc"`.
    pub order: String,
}

impl EncodeQuery for RecentUpdatesQuery {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_ints("activityTypeId", &self.activity_type_ids)
            .push_int("minId", self.min_id)
            .push_int("maxId", self.max_id)
            .push_int("count", self.count)
            .push_str("order", &self.order);
    }
}

impl BacklogClient {
    pub fn get_space(&self) -> Result<Space> {
        self.get_json("/space", &())
    }

    pub fn get_recent_updates(&self, query: &RecentUpdatesQuery) -> Result<Vec<RecentUpdate>> {
        self.get_json("/space/activities", query)
    }

    pub fn get_space_notification(&self) -> Result<SpaceNotification> {
        self.get_json("/space/notification", &())
    }

    pub fn get_space_disk_usage(&self) -> Result<DiskUsage> {
        self.get_json("/space/diskUsage", &())
    }
}
