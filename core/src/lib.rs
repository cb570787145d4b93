//! Synchronous client for the Backlog REST API (`/api/v2`).
//!
//! # Overview
//! `BacklogClient` turns each REST operation into one method call: it encodes
//! query parameters, builds an `HttpRequest`, hands it to an injected
//! `Transport`, and decodes the `HttpResponse` into a typed entity.
//!
//! # Design
//! - Requests and responses are plain data (`http` module). The client never
//!   opens sockets itself; the `Transport` supplied by the caller does, so
//!   connection pooling, TLS, and timeouts live with the caller.
//! - `UreqTransport` is the stock transport, built on a `ureq::Agent`.
//! - Status codes are not inspected before decoding. A body that does not
//!   match the expected shape surfaces verbatim as `ApiError::Response`, which
//!   is how Backlog's JSON error envelopes reach the caller.
//! - Entity types live in `types` and mirror Backlog's JSON schema.
//!
//! ```no_run
//! use std::sync::Arc;
//! use backlog_core::{BacklogClient, Config, UreqTransport};
//!
//! let config = Config::new("myspace", "API_KEY").with_domain(".backlog.com");
//! let client = BacklogClient::new(config, Arc::new(UreqTransport::new()))?;
//! for project in client.get_projects()? {
//!     println!("{} {}", project.project_key, project.name);
//! }
//! # Ok::<(), backlog_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use api::{
    IssueListQuery, NewUser, NewWikiPage, NotificationCountQuery, RecentUpdatesQuery, UserUpdate,
    WikiListQuery, WikiPageUpdate, WikiQuery,
};
pub use client::BacklogClient;
pub use config::{Config, Domain};
pub use error::{ApiError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{EncodeQuery, QueryParams};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Attachment, Count, DiskUsage, IdOrKey, Issue, Notification, Project, RecentUpdate,
    SharedFile, Space, SpaceNotification, Tag, User, WikiListItem, WikiPage,
};
