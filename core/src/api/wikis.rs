use serde::{Deserialize, Serialize};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::query::{EncodeQuery, QueryParams};
use crate::types::{Count, IdOrKey, Tag, WikiListItem, WikiPage};

/// Filters for `GET /wikis`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WikiListQuery {
    pub project_id_or_key: IdOrKey,
    pub keyword: String,
}

impl EncodeQuery for WikiListQuery {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push("projectIdOrKey", self.project_id_or_key.to_string())
            .push_str("keyword", &self.keyword);
    }
}

/// Project selector for `GET /wikis/count` and `GET /wikis/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WikiQuery {
    pub project_id_or_key: IdOrKey,
}

impl EncodeQuery for WikiQuery {
    fn encode_query(&self, params: &mut QueryParams) {
        params.push("projectIdOrKey", self.project_id_or_key.to_string());
    }
}

/// Form body for `POST /wikis`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWikiPage {
    pub project_id: i64,
    pub name: String,
    pub content: String,
    pub mail_notify: bool,
}

impl EncodeQuery for NewWikiPage {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_int("projectId", self.project_id)
            .push_str("name", &self.name)
            .push_str("content", &self.content)
            .push_bool("mailNotify", self.mail_notify);
    }
}

/// Form body for `PATCH /wikis/{id}`. `mail_notify` is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WikiPageUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub mail_notify: bool,
}

impl EncodeQuery for WikiPageUpdate {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_opt_str("name", self.name.as_deref())
            .push_opt_str("content", self.content.as_deref())
            .push_bool("mailNotify", self.mail_notify);
    }
}

impl BacklogClient {
    pub fn get_wiki_pages(&self, query: &WikiListQuery) -> Result<Vec<WikiListItem>> {
        self.get_json("/wikis", query)
    }

    pub fn count_wiki_pages(&self, query: &WikiQuery) -> Result<i64> {
        let count: Count = self.get_json("/wikis/count", query)?;
        Ok(count.count)
    }

    pub fn get_wiki_tags(&self, query: &WikiQuery) -> Result<Vec<Tag>> {
        self.get_json("/wikis/tags", query)
    }

    pub fn add_wiki_page(&self, page: &NewWikiPage) -> Result<WikiPage> {
        self.call_json(self.build_form_request(HttpMethod::Post, "/wikis", page))
    }

    pub fn get_wiki_page(&self, id: i64) -> Result<WikiPage> {
        self.get_json(&format!("/wikis/{id}"), &())
    }

    pub fn update_wiki_page(&self, id: i64, update: &WikiPageUpdate) -> Result<WikiPage> {
        self.call_json(self.build_form_request(HttpMethod::Patch, &format!("/wikis/{id}"), update))
    }

    /// Delete a page. Backlog echoes the deleted page back.
    pub fn delete_wiki_page(&self, id: i64) -> Result<WikiPage> {
        self.call_json(self.build_request(HttpMethod::Delete, &format!("/wikis/{id}"), &()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_accepts_id_or_key() {
        let query = WikiListQuery {
            project_id_or_key: "TEST".into(),
            keyword: String::new(),
        };
        assert_eq!(query.to_params().encode(), "projectIdOrKey=TEST&keyword=");

        let query = WikiQuery {
            project_id_or_key: IdOrKey::Id(12),
        };
        assert_eq!(query.to_params().encode(), "projectIdOrKey=12");
    }

    #[test]
    fn new_page_sends_mail_notify_literal() {
        let page = NewWikiPage {
            project_id: 1,
            name: "Minutes".to_string(),
            content: "# Agenda".to_string(),
            mail_notify: false,
        };
        assert_eq!(
            page.to_params().encode(),
            "projectId=1&name=Minutes&content=%23+Agenda&mailNotify=false"
        );
    }

    #[test]
    fn update_sends_only_set_text_fields() {
        let update = WikiPageUpdate {
            content: Some("new body".to_string()),
            ..Default::default()
        };
        assert_eq!(update.to_params().encode(), "content=new+body&mailNotify=false");
    }
}
