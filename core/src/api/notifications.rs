use serde::{Deserialize, Serialize};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::query::{EncodeQuery, QueryParams};
use crate::types::{Count, Notification};

/// Filters for `GET /notifications/count`. Both flags are always sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationCountQuery {
    pub already_read: bool,
    pub resource_already_read: bool,
}

impl EncodeQuery for NotificationCountQuery {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_bool("alreadyRead", self.already_read)
            .push_bool("resourceAlreadyRead", self.resource_already_read);
    }
}

impl BacklogClient {
    pub fn get_notifications(&self) -> Result<Vec<Notification>> {
        self.get_json("/notifications", &())
    }

    pub fn count_notifications(&self, query: &NotificationCountQuery) -> Result<i64> {
        let count: Count = self.get_json("/notifications/count", query)?;
        Ok(count.count)
    }

    /// Reset the unread badge. Returns the new unread count.
    pub fn reset_unread_notification_count(&self) -> Result<i64> {
        let request = self.build_request(HttpMethod::Post, "/notifications/markAsRead", &());
        let count: Count = self.call_json(request)?;
        Ok(count.count)
    }

    /// Mark one notification as read. The response body is read and dropped.
    pub fn read_notification(&self, id: i64) -> Result<()> {
        let request = self.build_request(
            HttpMethod::Post,
            &format!("/notifications/{id}/markAsRead"),
            &(),
        );
        self.execute(&request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_query_always_sends_both_flags() {
        let params = NotificationCountQuery::default().to_params();
        assert_eq!(params.encode(), "alreadyRead=false&resourceAlreadyRead=false");

        let params = NotificationCountQuery {
            already_read: true,
            resource_already_read: false,
        }
        .to_params();
        assert_eq!(params.get_all("alreadyRead"), vec!["true"]);
        assert_eq!(params.get_all("resourceAlreadyRead"), vec!["false"]);
    }
}
