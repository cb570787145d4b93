use serde::{Deserialize, Serialize};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::query::{EncodeQuery, QueryParams};
use crate::types::{Count, IdOrKey, Issue};

/// Filters for `GET /issues` and `GET /issues/count`.
///
/// Id lists become repeated `key[]` parameters. Every scalar is sent even
/// when unset, so an empty `sort` goes out as `sort=`. Dates are
/// `yyyy-MM-dd` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueListQuery {
    pub project_ids: Vec<i64>,
    pub issue_type_ids: Vec<i64>,
    pub category_ids: Vec<i64>,
    pub version_ids: Vec<i64>,
    pub milestone_ids: Vec<i64>,
    pub status_ids: Vec<i64>,
    pub priority_ids: Vec<i64>,
    pub assignee_ids: Vec<i64>,
    pub created_user_ids: Vec<i64>,
    pub resolution_ids: Vec<i64>,
    /// 0 all, 1 exclude child issues, 2 child issues only, 3 neither parent
    /// nor child, 4 parent issues only.
    pub parent_child: i64,
    pub attachment: bool,
    pub shared_file: bool,
    /// `issueType`, `category`, `version`, `milestone`, `summary`, `status`,
    /// `priority`, `created`, `updated`, `dueDate`, `customField_{id}`, ...
    pub sort: String,
    pub order: String,
    pub offset: i64,
    pub count: i64,
    pub created_since: String,
    pub created_until: String,
    pub updated_since: String,
    pub updated_until: String,
    pub start_date_since: String,
    pub start_date_until: String,
    pub due_date_since: String,
    pub due_date_until: String,
    pub ids: Vec<i64>,
    pub parent_issue_ids: Vec<i64>,
    pub keyword: String,
}

impl EncodeQuery for IssueListQuery {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_ints("projectId", &self.project_ids)
            .push_ints("issueTypeId", &self.issue_type_ids)
            .push_ints("categoryId", &self.category_ids)
            .push_ints("versionId", &self.version_ids)
            .push_ints("milestoneId", &self.milestone_ids)
            .push_ints("statusId", &self.status_ids)
            .push_ints("priorityId", &self.priority_ids)
            .push_ints("assigneeId", &self.assignee_ids)
            .push_ints("createdUserId", &self.created_user_ids)
            .push_ints("resolutionId", &self.resolution_ids)
            .push_int("parentChild", self.parent_child)
            .push_bool("attachment", self.attachment)
            .push_bool("sharedFile", self.shared_file)
            .push_str("sort", &self.sort)
            .push_str("order", &self.order)
            .push_int("offset", self.offset)
            .push_int("count", self.count)
            .push_str("createdSince", &self.created_since)
            .push_str("createdUntil", &self.created_until)
            .push_str("updatedSince", &self.updated_since)
            .push_str("updatedUntil", &self.updated_until)
            .push_str("startDateSince", &self.start_date_since)
            .push_str("startDateUntil", &self.start_date_until)
            .push_str("dueDateSince", &self.due_date_since)
            .push_str("dueDateUntil", &self.due_date_until)
            .push_ints("id", &self.ids)
            .push_ints("parentIssueId", &self.parent_issue_ids)
            .push_str("keyword", &self.keyword);
    }
}

impl BacklogClient {
    pub fn get_issues(&self, query: &IssueListQuery) -> Result<Vec<Issue>> {
        self.get_json("/issues", query)
    }

    pub fn count_issues(&self, query: &IssueListQuery) -> Result<i64> {
        let count: Count = self.get_json("/issues/count", query)?;
        Ok(count.count)
    }

    pub fn get_issue(&self, issue: impl Into<IdOrKey>) -> Result<Issue> {
        self.get_json(&format!("/issues/{}", issue.into()), &())
    }
}
