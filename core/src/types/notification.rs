use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Issue, Project, User};

/// An entry of the signed-in user's notification inbox.
///
/// `reason` says why the user was notified (1 assigned, 2 commented,
/// 3 issue created, ...). Pull-request payloads are left untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub already_read: bool,
    pub reason: i64,
    pub resource_already_read: bool,
    pub project: Option<Project>,
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
    pub pull_request: Option<Value>,
    pub pull_request_comment: Option<Value>,
    pub sender: User,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: Option<String>,
    pub change_log: Option<Value>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stars: Vec<Value>,
    #[serde(default)]
    pub notifications: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMENT_NOTIFICATION: &str = r#"{"id":22,"alreadyRead":false,"reason":2,"resourceAlreadyRead":true,
                "project":{"id":1,"projectKey":"TEST","name":"Test Project","chartEnabled":false,"subtaskingEnabled":false,"projectLeaderCanEditProjectLeader":false,"textFormattingRule":"markdown","archived":false,"displayOrder":0},
                "issue":null,
                "comment":{"id":7,"content":"looks good","changeLog":null,"createdUser":{"id":1,"name":"admin","roleType":1},"created":"2013-08-01T00:00:00Z","updated":"2013-08-01T00:00:00Z"},
                "pullRequest":null,"pullRequestComment":null,
                "sender":{"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":null},
                "created":"2013-08-01T00:00:00Z"}"#;

    #[test]
    fn deserializes_comment_notification() {
        let notification: Notification = serde_json::from_str(COMMENT_NOTIFICATION).unwrap();
        assert_eq!(notification.reason, 2);
        assert_eq!(notification.project.unwrap().project_key, "TEST");
        assert!(notification.issue.is_none());
        assert_eq!(notification.comment.unwrap().content.as_deref(), Some("looks good"));
        assert!(notification.pull_request.is_none());
    }

    #[test]
    fn roundtrips_through_json() {
        let notification: Notification = serde_json::from_str(COMMENT_NOTIFICATION).unwrap();
        let json = serde_json::to_string(&notification).unwrap();
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notification);
        assert!(json.contains(r#""resourceAlreadyRead":true"#));
    }
}
