//! Stateless request builder and response parser for the Goodreads API.
//!
//! # Design
//! `GoodreadsClient` holds only the API root and key and carries no mutable
//! state between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever sits in between performs the GET, which keeps this
//! module deterministic and free of I/O.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Book, Review, User, READ_SHELF};
use crate::xml;

pub const DEFAULT_API_ROOT: &str = "https://www.goodreads.com/";

/// Optional parameters of the `review/list` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewListQuery {
    pub shelf: String,
    pub sort: String,
    pub order: String,
    pub per_page: usize,
}

impl ReviewListQuery {
    /// The `limit` most recently finished books, newest first.
    pub fn last_read(limit: usize) -> Self {
        Self {
            shelf: READ_SHELF.to_string(),
            sort: "date_read".to_string(),
            order: "d".to_string(),
            per_page: limit,
        }
    }

    pub fn shelf(mut self, shelf: impl Into<String>) -> Self {
        self.shelf = shelf.into();
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }
}

/// Synchronous, stateless client for the Goodreads API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Clone)]
pub struct GoodreadsClient {
    api_root: Url,
    key: String,
}

impl std::fmt::Debug for GoodreadsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoodreadsClient")
            .field("api_root", &self.api_root.as_str())
            .finish_non_exhaustive()
    }
}

impl GoodreadsClient {
    pub fn new(api_root: &str, key: &str) -> Result<Self, ApiError> {
        let api_root = Url::parse(&format!("{}/", api_root.trim_end_matches('/')))?;
        Ok(Self {
            api_root,
            key: key.to_string(),
        })
    }

    pub fn api_root(&self) -> &str {
        self.api_root.as_str()
    }

    pub fn build_get_user(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.get(&format!("user/show/{id}.xml"), &[])
    }

    pub fn build_get_book(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.get(&format!("book/show/{id}.xml"), &[])
    }

    pub fn build_list_reviews(
        &self,
        user_id: &str,
        query: &ReviewListQuery,
    ) -> Result<HttpRequest, ApiError> {
        let per_page = query.per_page.to_string();
        self.get(
            &format!("review/list/{user_id}.xml"),
            &[
                ("v", "2"),
                ("shelf", &query.shelf),
                ("sort", &query.sort),
                ("order", &query.order),
                ("per_page", &per_page),
            ],
        )
    }

    pub fn parse_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        xml::decode(&response.body)?.user.ok_or(ApiError::NotFound)
    }

    pub fn parse_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        xml::decode(&response.body)?.book.ok_or(ApiError::NotFound)
    }

    pub fn parse_reviews(&self, response: HttpResponse) -> Result<Vec<Review>, ApiError> {
        check_status(&response)?;
        Ok(xml::decode(&response.body)?
            .reviews
            .map(|list| list.review)
            .unwrap_or_default())
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        let mut url = self.api_root.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.key);
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        tracing::debug!(path, "built request");
        Ok(HttpRequest {
            url: url.into(),
            headers: vec![("accept".to_string(), "application/xml".to_string())],
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpStatus {
            status,
            body: response.body.clone(),
        }),
    }
}
