//! Composite operations: one or more round-trips through a `Transport`.
//!
//! # Design
//! Calls are strictly sequential. `get_user` is the only operation that fans
//! out: every kept status triggers a `book/show` call, and a shortfall of
//! statuses triggers one `review/list` call. A failed book lookup does not
//! fail the profile; it is reported back in `UserFetch::enrichment_failures`.

use crate::client::{GoodreadsClient, ReviewListQuery};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Book, Review, User};

/// A status whose book could not be fetched; the status keeps its partial
/// (id-only) book.
#[derive(Debug)]
pub struct EnrichmentFailure {
    pub book_id: String,
    pub error: ApiError,
}

/// Result of `Goodreads::get_user`.
#[derive(Debug)]
pub struct UserFetch {
    pub user: User,
    pub enrichment_failures: Vec<EnrichmentFailure>,
}

impl UserFetch {
    pub fn is_complete(&self) -> bool {
        self.enrichment_failures.is_empty()
    }
}

/// A `GoodreadsClient` paired with the transport that executes its requests.
pub struct Goodreads<T> {
    client: GoodreadsClient,
    transport: T,
}

impl Goodreads<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let client = GoodreadsClient::new(&config.api_root, &config.key)?;
        Ok(Self::new(client, UreqTransport::new(config.timeout)))
    }
}

impl<T: Transport> Goodreads<T> {
    pub fn new(client: GoodreadsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &GoodreadsClient {
        &self.client
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_book(&self, id: &str) -> Result<Book, ApiError> {
        let request = self.client.build_get_book(id)?;
        self.client.parse_book(self.transport.execute(request)?)
    }

    /// The `limit` most recently read books of `user_id`, newest first.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_last_read(&self, user_id: &str, limit: usize) -> Result<Vec<Review>, ApiError> {
        let request = self
            .client
            .build_list_reviews(user_id, &ReviewListQuery::last_read(limit))?;
        let mut reviews = self.client.parse_reviews(self.transport.execute(request)?)?;
        reviews.truncate(limit);
        Ok(reviews)
    }

    /// Fetch a profile with up to `limit` items of recent activity.
    ///
    /// The first `limit` statuses (in the order the service lists them) are
    /// kept and their books fetched in full. If that leaves room, the
    /// difference is filled from the read shelf into `User::last_read`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_user(&self, id: &str, limit: usize) -> Result<UserFetch, ApiError> {
        let request = self.client.build_get_user(id)?;
        let mut user = self.client.parse_user(self.transport.execute(request)?)?;

        user.statuses.truncate(limit);

        let mut enrichment_failures = Vec::new();
        for status in &mut user.statuses {
            match self.get_book(&status.book.id) {
                Ok(book) => status.book = book,
                Err(error) => {
                    tracing::warn!(book_id = %status.book.id, %error, "keeping partial book");
                    enrichment_failures.push(EnrichmentFailure {
                        book_id: status.book.id.clone(),
                        error,
                    });
                }
            }
        }

        let remaining = limit - user.statuses.len();
        if remaining > 0 {
            user.last_read = self.get_last_read(id, remaining)?;
        }

        tracing::debug!(
            statuses = user.statuses.len(),
            last_read = user.last_read.len(),
            failures = enrichment_failures.len(),
            "user assembled"
        );
        Ok(UserFetch {
            user,
            enrichment_failures,
        })
    }

    /// `get_user` for the profile and activity limit named in `config`.
    pub fn get_configured_user(&self, config: &ClientConfig) -> Result<UserFetch, ApiError> {
        self.get_user(&config.user_id, config.limit)
    }
}
