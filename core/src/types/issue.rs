use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attachment, SharedFile, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub project_id: i64,
    pub issue_key: String,
    pub key_id: i64,
    pub issue_type: IssueType,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub resolution: Option<Resolution>,
    pub priority: Option<Priority>,
    pub status: Status,
    pub assignee: Option<User>,
    #[serde(default)]
    pub category: Vec<Value>,
    #[serde(default)]
    pub versions: Vec<Value>,
    #[serde(default)]
    pub milestone: Vec<Milestone>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub parent_issue_id: Option<i64>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: Option<User>,
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_fields: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub shared_files: Vec<SharedFile>,
    #[serde(default)]
    pub stars: Vec<Star>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub color: String,
    pub display_order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: i64,
    pub name: String,
}

/// Older spaces omit `projectId`, `color` and `displayOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: i64,
    #[serde(default)]
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub release_due_date: Option<DateTime<Utc>>,
    pub archived: bool,
    pub display_order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: i64,
    pub comment: Option<Value>,
    pub url: String,
    pub title: String,
    pub presenter: User,
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE: &str = r##"{
        "id": 1, "projectId": 1, "issueKey": "BLG-1", "keyId": 1,
        "issueType": {"id":2,"projectId":1,"name":"Task","color":"#7ea800","displayOrder":0},
        "summary": "first issue", "description": "",
        "resolution": null,
        "priority": {"id":3,"name":"Normal"},
        "status": {"id":1,"projectId":1,"name":"Open","color":"#ed8077","displayOrder":1000},
        "assignee": {"id":2,"userId":"eguchi","name":"eguchi","roleType":2,"lang":null,"mailAddress":"eguchi@nulab.example"},
        "category": [], "versions": [],
        "milestone": [{"id":30,"projectId":1,"name":"wait for release","description":"","startDate":null,"releaseDueDate":null,"archived":false,"displayOrder":0}],
        "startDate": null, "dueDate": "2013-02-14T00:00:00Z",
        "estimatedHours": 1.5, "actualHours": null, "parentIssueId": null,
        "createdUser": {"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":"eguchi@nulab.example"},
        "created": "2012-07-23T06:10:15Z",
        "updatedUser": {"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":"eguchi@nulab.example"},
        "updated": "2013-02-07T08:09:49Z",
        "customFields": [{"id":3,"fieldTypeId":6,"name":"Memo","value":null}],
        "attachments": [{"id":1,"name":"IMGP0088.JPG","size":85079}],
        "sharedFiles": [],
        "stars": [{"id":10,"comment":null,"url":"https://xx.backlog.jp/view/BLG-1","title":"[BLG-1] first issue | Show issue - Backlog","presenter":{"id":2,"userId":"eguchi","name":"eguchi","roleType":2,"lang":"ja","mailAddress":"eguchi@nulab.example"},"created":"2013-07-08T10:24:28Z"}]
    }"##;

    #[test]
    fn deserializes_full_issue() {
        let issue: Issue = serde_json::from_str(ISSUE).unwrap();
        assert_eq!(issue.issue_key, "BLG-1");
        assert_eq!(issue.issue_type.name, "Task");
        assert_eq!(issue.issue_type.color, "#7ea800");
        assert_eq!(issue.status.color, "#ed8077");
        assert_eq!(issue.status.name, "Open");
        assert_eq!(issue.assignee.as_ref().unwrap().name, "eguchi");
        assert_eq!(issue.milestone[0].name, "wait for release");
        assert_eq!(issue.estimated_hours, Some(1.5));
        assert!(issue.start_date.is_none());
        assert!(issue.due_date.is_some());
        assert_eq!(issue.attachments[0].size, 85079);
        assert!(issue.attachments[0].created_user.is_none());
        assert_eq!(issue.custom_fields[0]["name"], "Memo");
        assert_eq!(issue.stars[0].presenter.id, 2);
    }

    #[test]
    fn roundtrips_through_json() {
        let issue: Issue = serde_json::from_str(ISSUE).unwrap();
        let back: Issue = serde_json::from_str(&serde_json::to_string(&issue).unwrap()).unwrap();
        assert_eq!(back, issue);
    }

    #[test]
    fn minimal_issue_fills_defaults() {
        let issue: Issue = serde_json::from_str(
            r##"{"id":5,"projectId":1,"issueKey":"BLG-5","keyId":5,
                "issueType":{"id":2,"projectId":1,"name":"Task","color":"#7ea800","displayOrder":0},
                "summary":"s","status":{"id":1,"name":"Open"},
                "createdUser":{"id":1,"name":"admin","roleType":1},
                "created":"2012-07-23T06:10:15Z"}"##,
        )
        .unwrap();
        assert_eq!(issue.description, "");
        assert!(issue.assignee.is_none());
        assert!(issue.milestone.is_empty());
        assert_eq!(issue.status.display_order, 0);
    }
}
