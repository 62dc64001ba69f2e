//! Error types for the Goodreads API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the service reports a missing
//! user or book either as a 404 or as an envelope without the expected
//! element, and callers want both to look the same. All other non-2xx
//! responses land in `HttpStatus` with the raw status code and body.
//!
//! Timestamp parsing has its own `TimestampError`: it only ever feeds the
//! presentation helpers, which swallow it into an empty string.

use thiserror::Error;

/// Errors returned by `GoodreadsClient`, the transports and `Goodreads`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured API root is not a valid absolute URL.
    #[error("invalid API root: {0}")]
    InvalidApiRoot(#[from] url::ParseError),

    /// The request never produced a response (connection failure, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The requested user or book does not exist.
    #[error("resource not found")]
    NotFound,

    /// The response body was not the XML document we expected.
    #[error("XML decoding failed: {0}")]
    Decode(String),

    /// `Book::author` was called on a book without any author.
    #[error("book {book_id} has no authors")]
    NoAuthors { book_id: String },

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::de::DeError> for ApiError {
    fn from(e: quick_xml::de::DeError) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// A timestamp matched neither of the accepted layouts.
#[derive(Debug, Error)]
#[error("unrecognised timestamp {input:?}")]
pub struct TimestampError {
    pub input: String,
}
