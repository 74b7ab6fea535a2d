//! error types
//!
//! one error channel for config, encoding, transport, status, decoding, and
//! graphql-reported failures. none of them are retried by the client.

use crate::graphql::GraphQlError;
use reqwest::StatusCode;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("graphql encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("graphql create request error: {0}")]
    Request(#[from] url::ParseError),

    #[error("graphql request error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("graphql copy error: {0}")]
    Read(#[source] reqwest::Error),

    #[error("graphql op error: status code: {0}")]
    Status(StatusCode),

    #[error("graphql decoding error: {source} response: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// raw response body
        body: String,
    },

    /// the server answered 200 with a non-empty `errors` array.
    /// only the first message is part of the display text.
    #[error("graphql op error: request:[{request}] error:[{message}]")]
    GraphQl {
        /// request body as sent
        request: String,
        /// message of the first graphql error
        message: String,
        /// full graphql error list
        errors: Vec<GraphQlError>,
    },
}

impl Error {
    /// http status if the server answered with a non-200 status
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status(status) => Some(*status),
            Error::Transport(err) | Error::Read(err) => err.status(),
            _ => None,
        }
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }

    /// true if the transport gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(err) | Error::Read(err) if err.is_timeout())
    }
}
