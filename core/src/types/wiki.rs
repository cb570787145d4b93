use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attachment, SharedFile, Star, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A wiki page as listed by `GET /wikis`; the body is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiListItem {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: User,
    pub updated: DateTime<Utc>,
}

/// A wiki page with its content, as returned by the single-page endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub shared_files: Vec<SharedFile>,
    #[serde(default)]
    pub stars: Vec<Star>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: User,
    pub updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_roundtrips_through_json() {
        let page: WikiPage = serde_json::from_str(
            r#"{"id":1,"projectId":1,"name":"Home","content":"hello",
                "tags":[{"id":12,"name":"proceedings"}],
                "attachments":[{"id":1,"name":"IMG0088.png","size":8857,"createdUser":{"id":1,"name":"admin","roleType":1},"created":"2014-01-06T11:10:45Z"}],
                "sharedFiles":[{"id":454403,"type":"file","dir":"/user/","name":"01.png","size":2735,"createdUser":{"id":1,"name":"admin","roleType":1},"created":"2009-02-27T03:26:15Z","updatedUser":null,"updated":null}],
                "stars":[],
                "createdUser":{"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":"eguchi@nulab.example"},
                "created":"2012-07-23T06:09:48Z",
                "updatedUser":{"id":1,"userId":"admin","name":"admin","roleType":1,"lang":"ja","mailAddress":"eguchi@nulab.example"},
                "updated":"2012-07-23T06:09:48Z"}"#,
        )
        .unwrap();
        assert_eq!(page.tags[0].name, "proceedings");
        assert_eq!(page.shared_files[0].file_type, "file");
        assert!(page.attachments[0].created_user.is_some());

        let back: WikiPage = serde_json::from_str(&serde_json::to_string(&page).unwrap()).unwrap();
        assert_eq!(back, page);
    }
}
