//! Domain records decoded from the service's XML.
//!
//! # Design
//! Field names follow the service's element names, with `rename` where the
//! Rust name reads better. Wrapped lists (`authors>author` and so on) are
//! unwrapped while decoding, so callers only ever see plain `Vec`s. Every
//! struct defaults missing elements; unknown elements are ignored.
//!
//! Timestamps are kept as the raw strings and parsed on demand through
//! `crate::dates`.

use serde::Deserialize;

use crate::dates;
use crate::error::ApiError;
use crate::xml;

pub const READING_SHELF: &str = "currently-reading";
pub const READ_SHELF: &str = "read";
pub const TO_READ_SHELF: &str = "to-read";

/// Upper bound of a review rating.
pub const MAX_STARS: usize = 5;

static EMPTY_SHELF: Shelf = Shelf {
    id: String::new(),
    book_count: None,
    name: String::new(),
};

/// A user profile as returned by `user/show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub about: String,
    pub link: String,
    pub image_url: String,
    pub small_image_url: String,
    pub location: String,
    pub last_active: String,
    #[serde(rename = "reviews_count", deserialize_with = "xml::int_or_zero")]
    pub review_count: u32,
    #[serde(rename = "user_statuses", deserialize_with = "xml::user_statuses")]
    pub statuses: Vec<UserStatus>,
    #[serde(rename = "user_shelves", deserialize_with = "xml::user_shelves")]
    pub shelves: Vec<Shelf>,
    /// Recently finished books, filled in by `Goodreads::get_user` when the
    /// user has fewer in-progress statuses than requested.
    #[serde(skip_deserializing)]
    pub last_read: Vec<Review>,
}

impl User {
    /// First shelf called `name`, or an empty shelf.
    pub fn shelf(&self, name: &str) -> &Shelf {
        self.shelves
            .iter()
            .find(|shelf| shelf.name == name)
            .unwrap_or(&EMPTY_SHELF)
    }

    pub fn reading_shelf(&self) -> &Shelf {
        self.shelf(READING_SHELF)
    }

    pub fn read_shelf(&self) -> &Shelf {
        self.shelf(READ_SHELF)
    }

    pub fn to_read_shelf(&self) -> &Shelf {
        self.shelf(TO_READ_SHELF)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Shelf {
    pub id: String,
    /// `None` when the service sends a blank or non-numeric count.
    #[serde(deserialize_with = "xml::int_or_none")]
    pub book_count: Option<u32>,
    pub name: String,
}

impl Shelf {
    /// True for the placeholder returned when a lookup misses.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Progress through a book the user is currently reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserStatus {
    #[serde(deserialize_with = "xml::int_or_zero")]
    pub page: u32,
    #[serde(deserialize_with = "xml::int_or_zero")]
    pub percent: u32,
    #[serde(rename = "updated_at")]
    pub updated: String,
    /// Only `id` is reliable until the status has been enriched.
    pub book: Book,
}

impl UserStatus {
    pub fn updated_relative(&self) -> String {
        dates::relative(&self.updated)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub link: String,
    pub image_url: String,
    #[serde(deserialize_with = "xml::int_or_none")]
    pub num_pages: Option<u32>,
    pub format: String,
    #[serde(deserialize_with = "xml::authors")]
    pub authors: Vec<Author>,
    pub isbn: String,
}

impl Book {
    /// The primary (first listed) author.
    pub fn author(&self) -> Result<&Author, ApiError> {
        self.authors.first().ok_or_else(|| ApiError::NoAuthors {
            book_id: self.id.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Review {
    pub book: Book,
    /// As sent by the service; use `stars` for a value in `0..=MAX_STARS`.
    #[serde(deserialize_with = "xml::int_or_zero")]
    pub rating: i32,
    pub read_at: String,
    pub link: String,
}

impl Review {
    /// `rating` clamped into `0..=MAX_STARS`.
    pub fn stars(&self) -> usize {
        self.rating.clamp(0, MAX_STARS as i32) as usize
    }

    pub fn full_stars(&self) -> Vec<bool> {
        vec![true; self.stars()]
    }

    pub fn empty_stars(&self) -> Vec<bool> {
        vec![false; MAX_STARS - self.stars()]
    }

    pub fn read_at_short(&self) -> String {
        dates::format_short(&self.read_at)
    }

    pub fn read_at_relative(&self) -> String {
        dates::relative(&self.read_at)
    }
}
