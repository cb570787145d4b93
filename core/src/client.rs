//! `BacklogClient`: request construction and dispatch.
//!
//! # Design
//! The client holds the validated configuration, the precomputed base URL and
//! a shared `Transport`. It carries no mutable state between calls, so a
//! single instance can be cloned or shared across threads. Endpoint methods
//! live in the `api` module; they all funnel through `build_request` /
//! `build_form_request` and `call_json`.

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Config, Domain};
use crate::decode;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, CONTENT_TYPE, FORM_URLENCODED};
use crate::query::{EncodeQuery, QueryParams};
use crate::transport::Transport;

const API_PREFIX: &str = "/api/v2";

/// Synchronous client for one Backlog space.
#[derive(Clone)]
pub struct BacklogClient {
    transport: Arc<dyn Transport>,
    config: Config,
    base_url: String,
}

impl BacklogClient {
    /// Validate `config` and bind it to `transport`.
    ///
    /// Fails when the space id or API key is empty. An unrecognized domain is
    /// replaced by `.backlog.jp`. No network I/O happens here.
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = config.base_url();
        Self::with_base_url(config, transport, &base_url)
    }

    /// Like `new`, but targets `base_url` instead of `https://{space}{domain}`.
    pub fn with_base_url(
        mut config: Config,
        transport: Arc<dyn Transport>,
        base_url: &str,
    ) -> Result<Self> {
        config.validate()?;
        config.domain = config.resolved_domain().suffix().to_string();
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "created backlog client");
        Ok(Self {
            transport,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configuration with its domain already resolved.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn domain(&self) -> Domain {
        self.config.resolved_domain()
    }

    /// Build a request for `path` (relative to `/api/v2`) carrying `apiKey`
    /// followed by the encoded `query`.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &impl EncodeQuery,
    ) -> HttpRequest {
        let mut params = QueryParams::new();
        params.push("apiKey", self.config.api_key.as_str());
        params.extend(query.to_params());
        HttpRequest {
            method,
            url: format!("{}{API_PREFIX}{path}?{}", self.base_url, params.encode()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a write request whose body is `form`, form-urlencoded.
    pub fn build_form_request(
        &self,
        method: HttpMethod,
        path: &str,
        form: &impl EncodeQuery,
    ) -> HttpRequest {
        let mut request = self.build_request(method, path, &());
        request
            .headers
            .push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
        request.body = Some(form.to_params().encode());
        request
    }

    /// Send `request` through the transport and return the full response.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = request.method.as_str(), path = request.path(), "sending request");
        let response = self.transport.execute(request)?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(response)
    }

    pub(crate) fn call_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.execute(&request)?;
        decode::json(&response)
    }

    pub(crate) fn call_image(&self, request: HttpRequest) -> Result<DynamicImage> {
        let response = self.execute(&request)?;
        decode::icon(&response)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl EncodeQuery,
    ) -> Result<T> {
        self.call_json(self.build_request(HttpMethod::Get, path, query))
    }
}

impl fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacklogClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
