use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Project, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub space_key: String,
    pub name: String,
    pub owner_id: i64,
    pub lang: String,
    pub timezone: String,
    pub report_send_time: String,
    pub text_formatting_rule: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// The announcement shown at the top of the space dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceNotification {
    pub content: String,
    pub updated: Option<DateTime<Utc>>,
}

/// Storage consumption in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub capacity: i64,
    pub issue: i64,
    pub wiki: i64,
    pub file: i64,
    pub subversion: i64,
    pub git: i64,
    #[serde(rename = "gitLFS", default)]
    pub git_lfs: i64,
    #[serde(default)]
    pub details: Vec<DiskUsageDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsageDetail {
    pub project_id: i64,
    pub issue: i64,
    pub wiki: i64,
    pub file: i64,
    pub subversion: i64,
    pub git: i64,
    #[serde(rename = "gitLFS", default)]
    pub git_lfs: i64,
}

/// One entry of the space activity feed.
///
/// `activity_type` identifies the event (1 issue created, 2 issue updated,
/// 3 issue commented, 5 wiki created, ...); `content` varies with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUpdate {
    pub id: i64,
    pub project: Project,
    #[serde(rename = "type")]
    pub activity_type: i64,
    #[serde(default)]
    pub content: ActivityContent,
    #[serde(default)]
    pub notifications: Vec<ActivityNotification>,
    pub created_user: User,
    pub created: DateTime<Utc>,
}

/// Activity payload. Backlog uses snake_case keys here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityContent {
    pub id: Option<i64>,
    pub key_id: Option<i64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<ActivityComment>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityComment {
    pub id: i64,
    pub content: String,
}

/// A field change recorded by an update activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub field: String,
    pub new_value: String,
    pub old_value: String,
    #[serde(rename = "type")]
    pub change_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNotification {
    pub id: i64,
    pub already_read: bool,
    pub reason: i64,
    pub user: User,
    pub resource_already_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVITY: &str = r#"{
        "id": 3153,
        "project": {"id":92,"projectKey":"SUB","name":"Subtasking","chartEnabled":true,"subtaskingEnabled":true,"projectLeaderCanEditProjectLeader":false,"textFormattingRule":"markdown","archived":false,"displayOrder":0},
        "type": 2,
        "content": {
            "id": 4809,
            "key_id": 121,
            "summary": "Comment",
            "description": "",
            "comment": {"id": 7237, "content": ""},
            "changes": [{"field":"milestone","new_value":" R2014-07-23","old_value":"","type":"standard"}]
        },
        "notifications": [],
        "createdUser": {"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":"eguchi@nulab.example"},
        "created": "2013-12-27T07:50:44Z"
    }"#;

    #[test]
    fn activity_content_uses_snake_case_keys() {
        let update: RecentUpdate = serde_json::from_str(ACTIVITY).unwrap();
        assert_eq!(update.activity_type, 2);
        assert_eq!(update.content.key_id, Some(121));
        assert_eq!(update.content.changes[0].new_value, " R2014-07-23");
        assert_eq!(update.content.changes[0].change_type, "standard");
        assert_eq!(update.content.comment.as_ref().unwrap().id, 7237);
    }

    const DISK_USAGE: &str = r#"{"capacity":1073741824,"issue":119511,"wiki":48575,"file":0,"subversion":0,"git":0,"gitLFS":12,"details":[{"projectId":1,"issue":11931,"wiki":0,"file":0,"subversion":0,"git":0,"gitLFS":0}]}"#;

    #[test]
    fn activity_roundtrips_through_json() {
        let update: RecentUpdate = serde_json::from_str(ACTIVITY).unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["content"]["key_id"], 121);
        assert_eq!(json["content"]["changes"][0]["type"], "standard");
        let back: RecentUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(back, update);
    }

    #[test]
    fn disk_usage_reads_git_lfs() {
        let usage: DiskUsage = serde_json::from_str(DISK_USAGE).unwrap();
        assert_eq!(usage.git_lfs, 12);
        assert_eq!(usage.details.len(), 1);
        assert_eq!(usage.details[0].project_id, 1);
    }

    #[test]
    fn disk_usage_roundtrips_through_json() {
        let usage: DiskUsage = serde_json::from_str(DISK_USAGE).unwrap();
        let json = serde_json::to_value(&usage).unwrap();
        assert_eq!(json["gitLFS"], 12);
        assert_eq!(json["details"][0]["projectId"], 1);
        let back: DiskUsage = serde_json::from_value(json).unwrap();
        assert_eq!(back, usage);
    }

    #[test]
    fn space_notification_roundtrips_through_json() {
        let notice: SpaceNotification = serde_json::from_str(
            r#"{"content":"Maintenance on Sunday.","updated":"2013-06-18T07:55:37Z"}"#,
        )
        .unwrap();
        let back: SpaceNotification =
            serde_json::from_value(serde_json::to_value(&notice).unwrap()).unwrap();
        assert_eq!(back, notice);

        let empty: SpaceNotification = serde_json::from_str(r#"{"content":""}"#).unwrap();
        assert!(empty.updated.is_none());
    }

    #[test]
    fn space_roundtrips_through_json() {
        let space: Space = serde_json::from_str(
            r#"{"spaceKey":"nulab","name":"Nulab Inc.","ownerId":1,"lang":"ja","timezone":"Asia/Tokyo","reportSendTime":"08:00:00","textFormattingRule":"markdown","created":"2008-07-06T15:00:00Z","updated":"2013-06-18T07:55:37Z"}"#,
        )
        .unwrap();
        let back: Space = serde_json::from_value(serde_json::to_value(&space).unwrap()).unwrap();
        assert_eq!(back, space);
        assert_eq!(space.space_key, "nulab");
    }
}
