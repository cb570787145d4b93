//! Error types for the Backlog API client.
//!
//! # Design
//! Only four things can go wrong: the client was configured without
//! credentials, the transport failed, the body did not decode into the
//! expected shape, or an icon was not an image. HTTP status codes are not a
//! separate failure mode; a non-2xx response with a JSON error envelope fails
//! to decode and lands in `Response` with the raw body as its message.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors returned by `BacklogClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credential was empty when building the client.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The transport could not complete the round-trip.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body could not be decoded into the expected type. Displays as the
    /// raw body text so server-side error payloads reach the caller intact.
    #[error("{body}")]
    Response { status: u16, body: String },

    /// The icon body is not a recognized image format.
    #[error("image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub(crate) fn configuration(msg: &str) -> Self {
        ApiError::Configuration(msg.to_string())
    }
}

/// Failure reported by a `Transport` implementation, passed through untouched.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// The underlying error, for downcasting to the transport's own type.
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}
