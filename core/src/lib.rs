//! Synchronous client for the Goodreads XML API.
//!
//! # Overview
//! `GoodreadsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! executes the GET in between; `Goodreads` pairs the two and adds the one
//! composite operation, fetching a user together with their recent reading
//! activity.
//!
//! # Design
//! - `GoodreadsClient` is stateless; it holds only the API root and key.
//!   Configuration is passed in explicitly, never stored globally.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit and every mapping can be tested from canned XML.
//! - Failures are typed (`ApiError`). Timestamp problems only affect the
//!   presentation helpers, which render them as empty strings.

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;
mod xml;

pub use client::{GoodreadsClient, ReviewListQuery, DEFAULT_API_ROOT};
pub use config::ClientConfig;
pub use error::{ApiError, TimestampError};
pub use http::{HttpRequest, HttpResponse};
pub use service::{EnrichmentFailure, Goodreads, UserFetch};
pub use transport::{Transport, UreqTransport};
pub use types::{Author, Book, Review, Shelf, User, UserStatus};
