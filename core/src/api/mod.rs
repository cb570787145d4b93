//! Endpoint methods on `BacklogClient`, one module per resource family.
//!
//! Every method follows the same contract: build a request with `apiKey` and
//! the encoded options, send it through the transport, decode the body. Query
//! options and write payloads are defined next to the endpoints that use them.

mod issues;
mod notifications;
mod projects;
mod space;
mod users;
mod wikis;

pub use issues::IssueListQuery;
pub use notifications::NotificationCountQuery;
pub use space::RecentUpdatesQuery;
pub use users::{NewUser, UserUpdate};
pub use wikis::{NewWikiPage, WikiListQuery, WikiPageUpdate, WikiQuery};
