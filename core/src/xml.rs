//! Decode targets and field adapters for the service's XML documents.
//!
//! Every endpoint answers with a `<GoodreadsResponse>` envelope; only the
//! element relevant to the endpoint is populated. The envelope is dropped as
//! soon as its payload has been moved out.

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use crate::types::{Author, Book, Review, Shelf, User, UserStatus};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GoodreadsResponse {
    pub user: Option<User>,
    pub book: Option<Book>,
    pub reviews: Option<ReviewList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ReviewList {
    pub review: Vec<Review>,
}

pub(crate) fn decode(body: &str) -> Result<GoodreadsResponse, quick_xml::de::DeError> {
    quick_xml::de::from_str(body)
}

// Wrapped lists: `<user_statuses><user_status/>...</user_statuses>` and friends.

pub(crate) fn user_statuses<'de, D>(d: D) -> Result<Vec<UserStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct List {
        #[serde(default)]
        user_status: Vec<UserStatus>,
    }
    Ok(List::deserialize(d)?.user_status)
}

pub(crate) fn user_shelves<'de, D>(d: D) -> Result<Vec<Shelf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct List {
        #[serde(default)]
        user_shelf: Vec<Shelf>,
    }
    Ok(List::deserialize(d)?.user_shelf)
}

pub(crate) fn authors<'de, D>(d: D) -> Result<Vec<Author>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct List {
        #[serde(default)]
        author: Vec<Author>,
    }
    Ok(List::deserialize(d)?.author)
}

/// Integer element where blank means zero. Anything else non-numeric is a
/// decode error.
pub(crate) fn int_or_zero<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = String::deserialize(d)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(|e| de::Error::custom(format!("{raw:?}: {e}")))
}

/// Integer element the service is known to leave blank or fill with junk.
pub(crate) fn int_or_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = String::deserialize(d)?;
    Ok(raw.trim().parse().ok())
}
