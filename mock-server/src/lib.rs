//! In-memory stand-in for the Backlog `/api/v2` REST API.
//!
//! Serves a seeded space (one project, two issues, two notifications, one
//! wiki page) and supports the write endpoints the client uses. Every request
//! must carry the configured `apiKey`; errors use Backlog's envelope
//! `{"errors":[{"message":..,"code":..,"moreInfo":""}]}`.

use std::{collections::BTreeMap, io::Cursor, sync::Arc};

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_API_KEY: &str = "test-key";
pub const TIMESTAMP: &str = "2024-01-15T09:30:00Z";

const ERR_NO_RESOURCE: u32 = 6;
const ERR_INVALID_REQUEST: u32 = 7;
const ERR_AUTHENTICATION: u32 = 11;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub role_type: i64,
    pub lang: Option<String>,
    pub mail_address: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub project_key: String,
    pub name: String,
    pub chart_enabled: bool,
    pub subtasking_enabled: bool,
    pub project_leader_can_edit_project_leader: bool,
    pub text_formatting_rule: String,
    pub archived: bool,
    pub display_order: i64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Named {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub color: String,
    pub display_order: i64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub project_id: i64,
    pub issue_key: String,
    pub key_id: i64,
    pub issue_type: Named,
    pub summary: String,
    pub description: String,
    pub priority: serde_json::Value,
    pub status: Named,
    pub assignee: Option<User>,
    pub created_user: User,
    pub created: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub already_read: bool,
    pub reason: i64,
    pub resource_already_read: bool,
    pub project: Project,
    pub issue: Option<Issue>,
    pub sender: User,
    pub created: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub created_user: User,
    pub created: String,
    pub updated_user: User,
    pub updated: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserForm {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub mail_address: String,
    pub role_type: i64,
}

/// Passwords are not stored, so a `password` field is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchForm {
    pub name: Option<String>,
    pub mail_address: Option<String>,
    pub role_type: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWikiForm {
    pub project_id: i64,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub mail_notify: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPatchForm {
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub mail_notify: bool,
}

/// Mutable state behind the router.
pub struct Store {
    pub project: Project,
    pub users: BTreeMap<i64, User>,
    pub issues: Vec<Issue>,
    pub notifications: Vec<Notification>,
    pub wikis: BTreeMap<i64, WikiPage>,
    next_user_id: i64,
    next_wiki_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    db: Db,
    icon: Arc<Vec<u8>>,
}

fn admin() -> User {
    User {
        id: 1,
        user_id: "admin".to_string(),
        name: "Admin".to_string(),
        role_type: 1,
        lang: Some("ja".to_string()),
        mail_address: "admin@example.com".to_string(),
    }
}

fn issue(id: i64, project: &Project, summary: &str, status: Named) -> Issue {
    Issue {
        id,
        project_id: project.id,
        issue_key: format!("{}-{id}", project.project_key),
        key_id: id,
        issue_type: Named {
            id: 1,
            project_id: project.id,
            name: "Bug".to_string(),
            color: "#990000".to_string(),
            display_order: 0,
        },
        summary: summary.to_string(),
        description: String::new(),
        priority: json!({"id": 3, "name": "Normal"}),
        status,
        assignee: Some(admin()),
        created_user: admin(),
        created: TIMESTAMP.to_string(),
    }
}

impl Store {
    pub fn seeded() -> Self {
        let project = Project {
            id: 1,
            project_key: "TEST".to_string(),
            name: "Test Project".to_string(),
            chart_enabled: false,
            subtasking_enabled: false,
            project_leader_can_edit_project_leader: false,
            text_formatting_rule: "markdown".to_string(),
            archived: false,
            display_order: 0,
        };
        let open = Named {
            id: 1,
            project_id: 1,
            name: "Open".to_string(),
            color: "#ed8077".to_string(),
            display_order: 1000,
        };
        let closed = Named {
            id: 4,
            project_id: 1,
            name: "Closed".to_string(),
            color: "#b0be3c".to_string(),
            display_order: 4000,
        };
        let issues = vec![
            issue(1, &project, "Login button does nothing", open),
            issue(2, &project, "Update release notes", closed),
        ];
        let notifications = issues
            .iter()
            .map(|issue| Notification {
                id: issue.id + 100,
                already_read: false,
                reason: 1,
                resource_already_read: false,
                project: project.clone(),
                issue: Some(issue.clone()),
                sender: admin(),
                created: TIMESTAMP.to_string(),
            })
            .collect();
        let home = WikiPage {
            id: 1,
            project_id: 1,
            name: "Home".to_string(),
            content: "Welcome to the test project.".to_string(),
            tags: vec![Tag {
                id: 1,
                name: "guide".to_string(),
            }],
            created_user: admin(),
            created: TIMESTAMP.to_string(),
            updated_user: admin(),
            updated: TIMESTAMP.to_string(),
        };

        Self {
            project,
            users: BTreeMap::from([(1, admin())]),
            issues,
            notifications,
            wikis: BTreeMap::from([(1, home)]),
            next_user_id: 2,
            next_wiki_id: 2,
        }
    }

    fn project_matches(&self, id_or_key: &str) -> bool {
        id_or_key == self.project.project_key || id_or_key == self.project.id.to_string()
    }
}

/// Router with the default API key and a freshly seeded store.
pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        db: Arc::new(RwLock::new(Store::seeded())),
        icon: Arc::new(render_icon().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not render user icon");
            Vec::new()
        })),
    };

    let api = Router::new()
        .route("/space", get(get_space))
        .route("/space/activities", get(get_activities))
        .route("/space/notification", get(get_space_notification))
        .route("/space/diskUsage", get(get_disk_usage))
        .route("/projects", get(list_projects))
        .route("/projects/{id_or_key}", get(get_project))
        .route("/issues", get(list_issues))
        .route("/issues/count", get(count_issues))
        .route("/issues/{id_or_key}", get(get_issue))
        .route("/notifications", get(list_notifications))
        .route("/notifications/count", get(count_notifications))
        .route("/notifications/markAsRead", post(reset_notifications))
        .route("/notifications/{id}/markAsRead", post(read_notification))
        .route("/users", get(list_users).post(add_user))
        .route("/users/myself", get(get_myself))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/icon", get(get_user_icon))
        .route("/wikis", get(list_wikis).post(add_wiki))
        .route("/wikis/count", get(count_wikis))
        .route("/wikis/tags", get(list_wiki_tags))
        .route(
            "/wikis/{id}",
            get(get_wiki).patch(update_wiki).delete(delete_wiki),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .nest("/api/v2", api)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

fn render_icon() -> image::ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let icon = image::RgbaImage::from_pixel(16, 16, image::Rgba([0x42, 0x8b, 0xca, 0xff]));
    icon.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

fn backlog_error(status: StatusCode, message: &str, code: u32) -> Response {
    let body = json!({"errors": [{"message": message, "code": code, "moreInfo": ""}]});
    (status, Json(body)).into_response()
}

fn not_found(what: &str) -> Response {
    backlog_error(StatusCode::NOT_FOUND, &format!("No {what}."), ERR_NO_RESOURCE)
}

/// Parse a raw query string, keeping repeated `key[]` entries.
fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn int_list(pairs: &[(String, String)], key: &str) -> Vec<i64> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .filter_map(|(_, v)| v.parse().ok())
        .collect()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "handled request");
    response
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let pairs = query_pairs(request.uri().query());
    if param(&pairs, "apiKey") != Some(&*state.api_key) {
        return backlog_error(
            StatusCode::UNAUTHORIZED,
            "Authentication failure.",
            ERR_AUTHENTICATION,
        );
    }
    next.run(request).await
}

// --- space ---

async fn get_space() -> Json<serde_json::Value> {
    Json(json!({
        "spaceKey": "mock",
        "name": "Mock Space",
        "ownerId": 1,
        "lang": "ja",
        "timezone": "Asia/Tokyo",
        "reportSendTime": "08:00:00",
        "textFormattingRule": "markdown",
        "created": TIMESTAMP,
        "updated": TIMESTAMP,
    }))
}

async fn get_activities(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<Vec<serde_json::Value>> {
    let pairs = query_pairs(raw.as_deref());
    let types = int_list(&pairs, "activityTypeId[]");
    let count: usize = param(&pairs, "count")
        .and_then(|c| c.parse().ok())
        .unwrap_or(0);

    let store = state.db.read().await;
    let mut activities: Vec<serde_json::Value> = store
        .issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            json!({
                "id": 1000 + i as i64,
                "project": store.project,
                "type": if i == 0 { 1 } else { 2 },
                "content": {
                    "id": issue.id,
                    "key_id": issue.key_id,
                    "summary": issue.summary,
                    "description": issue.description,
                },
                "notifications": [],
                "createdUser": admin(),
                "created": TIMESTAMP,
            })
        })
        .filter(|a| types.is_empty() || types.contains(&a["type"].as_i64().unwrap_or(0)))
        .collect();
    if count > 0 {
        activities.truncate(count);
    }
    Json(activities)
}

async fn get_space_notification() -> Json<serde_json::Value> {
    Json(json!({"content": "Scheduled maintenance on Sunday.", "updated": TIMESTAMP}))
}

async fn get_disk_usage() -> Json<serde_json::Value> {
    Json(json!({
        "capacity": 1073741824,
        "issue": 2048,
        "wiki": 512,
        "file": 0,
        "subversion": 0,
        "git": 0,
        "gitLFS": 0,
        "details": [{
            "projectId": 1,
            "issue": 2048,
            "wiki": 512,
            "file": 0,
            "subversion": 0,
            "git": 0,
            "gitLFS": 0,
        }],
    }))
}

// --- projects ---

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(vec![state.db.read().await.project.clone()])
}

async fn get_project(State(state): State<AppState>, Path(id_or_key): Path<String>) -> Response {
    let store = state.db.read().await;
    if store.project_matches(&id_or_key) {
        Json(store.project.clone()).into_response()
    } else {
        not_found("project")
    }
}

// --- issues ---

fn filter_issues(store: &Store, pairs: &[(String, String)]) -> Vec<Issue> {
    let project_ids = int_list(pairs, "projectId[]");
    let status_ids = int_list(pairs, "statusId[]");
    let ids = int_list(pairs, "id[]");
    let keyword = param(pairs, "keyword").unwrap_or("").to_lowercase();

    store
        .issues
        .iter()
        .filter(|i| project_ids.is_empty() || project_ids.contains(&i.project_id))
        .filter(|i| status_ids.is_empty() || status_ids.contains(&i.status.id))
        .filter(|i| ids.is_empty() || ids.contains(&i.id))
        .filter(|i| keyword.is_empty() || i.summary.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}

async fn list_issues(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<Vec<Issue>> {
    let pairs = query_pairs(raw.as_deref());
    let offset: usize = param(&pairs, "offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let count: usize = param(&pairs, "count").and_then(|v| v.parse().ok()).unwrap_or(0);

    let store = state.db.read().await;
    let issues = filter_issues(&store, &pairs).into_iter().skip(offset);
    let issues: Vec<Issue> = if count > 0 {
        issues.take(count).collect()
    } else {
        issues.collect()
    };
    Json(issues)
}

async fn count_issues(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<serde_json::Value> {
    let pairs = query_pairs(raw.as_deref());
    let store = state.db.read().await;
    Json(json!({"count": filter_issues(&store, &pairs).len()}))
}

async fn get_issue(State(state): State<AppState>, Path(id_or_key): Path<String>) -> Response {
    let store = state.db.read().await;
    store
        .issues
        .iter()
        .find(|i| i.issue_key == id_or_key || i.id.to_string() == id_or_key)
        .map(|i| Json(i.clone()).into_response())
        .unwrap_or_else(|| not_found("issue"))
}

// --- notifications ---

async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.db.read().await.notifications.clone())
}

async fn count_notifications(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<serde_json::Value> {
    let pairs = query_pairs(raw.as_deref());
    let already_read = param(&pairs, "alreadyRead") == Some("true");
    let resource_already_read = param(&pairs, "resourceAlreadyRead") == Some("true");

    let store = state.db.read().await;
    let count = store
        .notifications
        .iter()
        .filter(|n| n.already_read == already_read)
        .filter(|n| n.resource_already_read == resource_already_read)
        .count();
    Json(json!({"count": count}))
}

async fn reset_notifications(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut store = state.db.write().await;
    for notification in &mut store.notifications {
        notification.already_read = true;
    }
    Json(json!({"count": 0}))
}

async fn read_notification(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    match store.notifications.iter_mut().find(|n| n.id == id) {
        Some(notification) => {
            notification.already_read = true;
            notification.resource_already_read = true;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("notification"),
    }
}

// --- users ---

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.db.read().await.users.values().cloned().collect())
}

async fn get_myself(State(state): State<AppState>) -> Response {
    get_user(State(state), Path(1)).await
}

async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.db.read().await;
    store
        .users
        .get(&id)
        .map(|u| Json(u.clone()).into_response())
        .unwrap_or_else(|| not_found("user"))
}

async fn add_user(State(state): State<AppState>, Form(input): Form<NewUserForm>) -> Response {
    if input.user_id.is_empty() || input.password.is_empty() {
        return backlog_error(
            StatusCode::BAD_REQUEST,
            "Please input userId and password.",
            ERR_INVALID_REQUEST,
        );
    }
    let mut store = state.db.write().await;
    let id = store.next_user_id;
    store.next_user_id += 1;
    let user = User {
        id,
        user_id: input.user_id,
        name: input.name,
        role_type: input.role_type,
        lang: None,
        mail_address: input.mail_address,
    };
    store.users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(input): Form<UserPatchForm>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(user) = store.users.get_mut(&id) else {
        return not_found("user");
    };
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(mail_address) = input.mail_address {
        user.mail_address = mail_address;
    }
    if let Some(role_type) = input.role_type {
        user.role_type = role_type;
    }
    Json(user.clone()).into_response()
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    store
        .users
        .remove(&id)
        .map(|u| Json(u).into_response())
        .unwrap_or_else(|| not_found("user"))
}

async fn get_user_icon(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    if !state.db.read().await.users.contains_key(&id) {
        return not_found("user");
    }
    ([(header::CONTENT_TYPE, "image/png")], state.icon.as_ref().clone()).into_response()
}

// --- wikis ---

fn list_item(page: &WikiPage) -> serde_json::Value {
    json!({
        "id": page.id,
        "projectId": page.project_id,
        "name": page.name,
        "tags": page.tags,
        "createdUser": page.created_user,
        "created": page.created,
        "updatedUser": page.updated_user,
        "updated": page.updated,
    })
}

fn pages_in_project<'a>(store: &'a Store, pairs: &[(String, String)]) -> Vec<&'a WikiPage> {
    let in_project = param(pairs, "projectIdOrKey").is_some_and(|p| store.project_matches(p));
    if !in_project {
        return Vec::new();
    }
    let keyword = param(pairs, "keyword").unwrap_or("").to_lowercase();
    store
        .wikis
        .values()
        .filter(|w| {
            keyword.is_empty()
                || w.name.to_lowercase().contains(&keyword)
                || w.content.to_lowercase().contains(&keyword)
        })
        .collect()
}

async fn list_wikis(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<Vec<serde_json::Value>> {
    let pairs = query_pairs(raw.as_deref());
    let store = state.db.read().await;
    Json(pages_in_project(&store, &pairs).into_iter().map(list_item).collect())
}

async fn count_wikis(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<serde_json::Value> {
    let pairs = query_pairs(raw.as_deref());
    let store = state.db.read().await;
    Json(json!({"count": pages_in_project(&store, &pairs).len()}))
}

async fn list_wiki_tags(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<Vec<Tag>> {
    let pairs = query_pairs(raw.as_deref());
    let store = state.db.read().await;
    let tags: BTreeMap<i64, Tag> = pages_in_project(&store, &pairs)
        .into_iter()
        .flat_map(|w| w.tags.iter().cloned())
        .map(|t| (t.id, t))
        .collect();
    Json(tags.into_values().collect())
}

async fn add_wiki(State(state): State<AppState>, Form(input): Form<NewWikiForm>) -> Response {
    let mut store = state.db.write().await;
    if input.project_id != store.project.id {
        return not_found("project");
    }
    if input.name.is_empty() {
        return backlog_error(StatusCode::BAD_REQUEST, "Please input name.", ERR_INVALID_REQUEST);
    }
    let id = store.next_wiki_id;
    store.next_wiki_id += 1;
    let page = WikiPage {
        id,
        project_id: input.project_id,
        name: input.name,
        content: input.content,
        tags: Vec::new(),
        created_user: admin(),
        created: TIMESTAMP.to_string(),
        updated_user: admin(),
        updated: TIMESTAMP.to_string(),
    };
    store.wikis.insert(id, page.clone());
    tracing::debug!(id, mail_notify = input.mail_notify, "created wiki page");
    (StatusCode::CREATED, Json(page)).into_response()
}

async fn get_wiki(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.db.read().await;
    store
        .wikis
        .get(&id)
        .map(|w| Json(w.clone()).into_response())
        .unwrap_or_else(|| not_found("wiki"))
}

async fn update_wiki(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(input): Form<WikiPatchForm>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(page) = store.wikis.get_mut(&id) else {
        return not_found("wiki");
    };
    if let Some(name) = input.name {
        page.name = name;
    }
    if let Some(content) = input.content {
        page.content = content;
    }
    tracing::debug!(id, mail_notify = input.mail_notify, "updated wiki page");
    Json(page.clone()).into_response()
}

async fn delete_wiki(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    store
        .wikis
        .remove(&id)
        .map(|w| Json(w).into_response())
        .unwrap_or_else(|| not_found("wiki"))
}
