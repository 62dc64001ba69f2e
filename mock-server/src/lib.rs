use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// API key accepted by the router returned from `app()`.
pub const TEST_KEY: &str = "test-key";

#[derive(Clone, Debug)]
pub struct Author {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub num_pages: Option<u32>,
    pub format: String,
    pub isbn: String,
    pub authors: Vec<Author>,
}

#[derive(Clone, Debug)]
pub struct Status {
    pub book_id: String,
    pub page: u32,
    pub percent: u32,
    pub updated_at: String,
}

#[derive(Clone, Debug)]
pub struct Review {
    pub book_id: String,
    pub rating: i32,
    pub read_at: String,
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub about: String,
    pub location: String,
    pub last_active: String,
    pub statuses: Vec<Status>,
    pub shelves: Vec<(String, u32)>,
    /// Read shelf, newest first.
    pub read: Vec<Review>,
}

#[derive(Clone, Debug, Default)]
pub struct Library {
    pub users: HashMap<String, User>,
    pub books: HashMap<String, Book>,
}

impl Library {
    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn add_book(&mut self, book: Book) {
        self.books.insert(book.id.clone(), book);
    }

    /// Deterministic data set used by `app()`.
    ///
    /// - user `1`: two books in progress, three on the read shelf
    /// - user `2`: four books in progress, nothing read
    /// - user `3`: one status pointing at a book that does not exist
    pub fn sample() -> Self {
        let mut library = Library::default();

        let books = [
            ("10", "Small Gods", Some(400), "Paperback", "0552152978", &[("1", "Terry Pratchett")][..]),
            ("11", "Good Omens", Some(412), "Paperback", "0060853980", &[("1", "Terry Pratchett"), ("2", "Neil Gaiman")][..]),
            ("12", "Piranesi", Some(272), "Hardcover", "1635575630", &[("3", "Susanna Clarke")][..]),
            ("13", "The Dispossessed", None, "ebook", "", &[("4", "Ursula K. Le Guin")][..]),
            ("20", "Dune", Some(688), "Paperback", "0441172717", &[("5", "Frank Herbert")][..]),
            ("21", "Solaris", Some(204), "Paperback", "0156027607", &[("6", "Stanisław Lem")][..]),
            ("22", "Kindred", Some(264), "Paperback", "0807083690", &[("7", "Octavia E. Butler")][..]),
        ];
        for (id, title, num_pages, format, isbn, authors) in books {
            library.add_book(Book {
                id: id.to_string(),
                title: title.to_string(),
                num_pages,
                format: format.to_string(),
                isbn: isbn.to_string(),
                authors: authors
                    .iter()
                    .map(|(id, name)| Author {
                        id: id.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
            });
        }

        let status = |book_id: &str, page, percent, updated_at: &str| Status {
            book_id: book_id.to_string(),
            page,
            percent,
            updated_at: updated_at.to_string(),
        };
        let review = |book_id: &str, rating, read_at: &str| Review {
            book_id: book_id.to_string(),
            rating,
            read_at: read_at.to_string(),
        };
        let shelves = |reading, read, to_read| {
            vec![
                ("read".to_string(), read),
                ("currently-reading".to_string(), reading),
                ("to-read".to_string(), to_read),
            ]
        };

        library.add_user(User {
            id: "1".to_string(),
            name: "Ada Reader".to_string(),
            about: "Reads on the train & at night.".to_string(),
            location: "London, UK".to_string(),
            last_active: "Sun Mar 10 04:00:00 -0800 2024".to_string(),
            statuses: vec![
                status("10", 120, 30, "Sat Mar 09 20:15:00 -0800 2024"),
                status("11", 41, 10, "Thu Mar 07 08:00:00 -0800 2024"),
            ],
            shelves: shelves(2, 3, 14),
            read: vec![
                review("20", 5, "Sun Feb 25 21:00:00 -0800 2024"),
                review("21", 4, "Fri Feb 02 18:30:00 -0800 2024"),
                review("22", 0, ""),
            ],
        });
        library.add_user(User {
            id: "2".to_string(),
            name: "Bo".to_string(),
            about: String::new(),
            location: String::new(),
            last_active: "2024-03-01T10:00:00Z".to_string(),
            statuses: vec![
                status("13", 50, 20, "2024-03-01T10:00:00Z"),
                status("12", 10, 4, "2024-02-28T10:00:00Z"),
                status("11", 200, 48, "2024-02-20T10:00:00Z"),
                status("10", 399, 99, "2024-02-01T10:00:00Z"),
            ],
            shelves: shelves(4, 0, 0),
            read: Vec::new(),
        });
        library.add_user(User {
            id: "3".to_string(),
            name: "Cy".to_string(),
            about: String::new(),
            location: String::new(),
            last_active: String::new(),
            statuses: vec![status("999", 1, 1, "")],
            shelves: Vec::new(),
            read: vec![review("20", 3, "Mon Jan 01 12:00:00 +0000 2024")],
        });

        library
    }
}

#[derive(Clone)]
struct AppState {
    library: Arc<Library>,
    key: Arc<str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub key: Option<String>,
    pub shelf: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<usize>,
}

pub fn app() -> Router {
    app_with(Library::sample(), TEST_KEY)
}

pub fn app_with(library: Library, key: &str) -> Router {
    let state = AppState {
        library: Arc::new(library),
        key: Arc::from(key),
    };
    Router::new()
        .route("/user/show/{file}", get(show_user))
        .route("/book/show/{file}", get(show_book))
        .route("/review/list/{file}", get(list_reviews))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type XmlResult = Result<Response, (StatusCode, &'static str)>;

const MOCK_HOST: &str = "https://mock.goodreads.local";

/// Check the key and strip the `.xml` suffix from the path segment.
fn authorize<'a>(
    state: &AppState,
    file: &'a str,
    key: Option<&str>,
) -> Result<&'a str, (StatusCode, &'static str)> {
    if key != Some(&*state.key) {
        return Err((StatusCode::UNAUTHORIZED, "Invalid API key."));
    }
    file.strip_suffix(".xml").ok_or((StatusCode::NOT_FOUND, "Not found"))
}

// ---------------------------------------------------------------------------
// Wire documents
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename = "GoodreadsResponse")]
struct GoodreadsResponse<'a> {
    #[serde(rename = "Request")]
    request: RequestInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    book: Option<BookDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviews: Option<ReviewsDoc<'a>>,
}

impl<'a> GoodreadsResponse<'a> {
    fn empty(method: &'static str) -> Self {
        Self {
            request: RequestInfo {
                authentication: true,
                method,
            },
            user: None,
            book: None,
            reviews: None,
        }
    }
}

#[derive(Serialize)]
struct RequestInfo {
    authentication: bool,
    method: &'static str,
}

#[derive(Serialize)]
struct UserDoc<'a> {
    id: &'a str,
    name: &'a str,
    link: String,
    image_url: String,
    small_image_url: String,
    about: &'a str,
    location: &'a str,
    last_active: &'a str,
    reviews_count: usize,
    user_shelves: ShelvesDoc<'a>,
    user_statuses: StatusesDoc<'a>,
}

#[derive(Serialize)]
struct ShelvesDoc<'a> {
    user_shelf: Vec<ShelfDoc<'a>>,
}

#[derive(Serialize)]
struct ShelfDoc<'a> {
    id: String,
    name: &'a str,
    book_count: u32,
}

#[derive(Serialize)]
struct StatusesDoc<'a> {
    user_status: Vec<StatusDoc<'a>>,
}

/// Statuses only carry the book id and title, like the real service.
#[derive(Serialize)]
struct StatusDoc<'a> {
    page: u32,
    percent: u32,
    updated_at: &'a str,
    book: BookRefDoc<'a>,
}

#[derive(Serialize)]
struct BookRefDoc<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct BookDoc<'a> {
    id: &'a str,
    title: &'a str,
    link: String,
    image_url: String,
    /// Blank when unknown.
    num_pages: String,
    format: &'a str,
    isbn: &'a str,
    authors: AuthorsDoc<'a>,
}

#[derive(Serialize)]
struct AuthorsDoc<'a> {
    author: Vec<AuthorDoc<'a>>,
}

#[derive(Serialize)]
struct AuthorDoc<'a> {
    id: &'a str,
    name: &'a str,
    link: String,
}

#[derive(Serialize)]
struct ReviewsDoc<'a> {
    #[serde(rename = "@start")]
    start: usize,
    #[serde(rename = "@end")]
    end: usize,
    #[serde(rename = "@total")]
    total: usize,
    review: Vec<ReviewDoc<'a>>,
}

#[derive(Serialize)]
struct ReviewDoc<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    book: Option<BookDoc<'a>>,
    rating: i32,
    read_at: &'a str,
    link: String,
}

impl<'a> BookDoc<'a> {
    fn new(book: &'a Book) -> Self {
        Self {
            id: &book.id,
            title: &book.title,
            link: format!("{MOCK_HOST}/book/show/{}", book.id),
            image_url: format!("{MOCK_HOST}/covers/{}.jpg", book.id),
            num_pages: book.num_pages.map(|n| n.to_string()).unwrap_or_default(),
            format: &book.format,
            isbn: &book.isbn,
            authors: AuthorsDoc {
                author: book
                    .authors
                    .iter()
                    .map(|a| AuthorDoc {
                        id: &a.id,
                        name: &a.name,
                        link: format!("{MOCK_HOST}/author/show/{}", a.id),
                    })
                    .collect(),
            },
        }
    }
}

impl<'a> UserDoc<'a> {
    fn new(user: &'a User, library: &'a Library) -> Self {
        Self {
            id: &user.id,
            name: &user.name,
            link: format!("{MOCK_HOST}/user/show/{}", user.id),
            image_url: format!("{MOCK_HOST}/users/{}.jpg", user.id),
            small_image_url: format!("{MOCK_HOST}/users/{}s.jpg", user.id),
            about: &user.about,
            location: &user.location,
            last_active: &user.last_active,
            reviews_count: user.read.len() + user.statuses.len(),
            user_shelves: ShelvesDoc {
                user_shelf: user
                    .shelves
                    .iter()
                    .enumerate()
                    .map(|(position, (name, count))| ShelfDoc {
                        id: format!("{}{position}", user.id),
                        name,
                        book_count: *count,
                    })
                    .collect(),
            },
            user_statuses: StatusesDoc {
                user_status: user
                    .statuses
                    .iter()
                    .map(|status| StatusDoc {
                        page: status.page,
                        percent: status.percent,
                        updated_at: &status.updated_at,
                        book: BookRefDoc {
                            id: &status.book_id,
                            title: library
                                .books
                                .get(&status.book_id)
                                .map(|b| b.title.as_str())
                                .unwrap_or_default(),
                        },
                    })
                    .collect(),
            },
        }
    }
}

/// Serialize a response document, XML declaration included.
fn to_xml(response: &GoodreadsResponse<'_>) -> Result<String, String> {
    let mut body = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let mut ser = quick_xml::se::Serializer::new(&mut body);
    ser.expand_empty_elements(true);
    response.serialize(ser).map_err(|e| e.to_string())?;
    Ok(body)
}

fn xml(response: GoodreadsResponse<'_>) -> XmlResult {
    let body = to_xml(&response).map_err(|e| {
        tracing::error!(error = %e, "cannot serialize response");
        (StatusCode::INTERNAL_SERVER_ERROR, "serialization failed")
    })?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn show_user(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<ListParams>,
) -> XmlResult {
    let id = authorize(&state, &file, params.key.as_deref())?;
    tracing::debug!(id, "user/show");
    let user = state.library.users.get(id).ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    xml(GoodreadsResponse {
        user: Some(UserDoc::new(user, &state.library)),
        ..GoodreadsResponse::empty("user_show")
    })
}

async fn show_book(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<ListParams>,
) -> XmlResult {
    let id = authorize(&state, &file, params.key.as_deref())?;
    tracing::debug!(id, "book/show");
    let book = state.library.books.get(id).ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    xml(GoodreadsResponse {
        book: Some(BookDoc::new(book)),
        ..GoodreadsResponse::empty("book_show")
    })
}

async fn list_reviews(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<ListParams>,
) -> XmlResult {
    let id = authorize(&state, &file, params.key.as_deref())?;
    tracing::debug!(id, shelf = ?params.shelf, per_page = ?params.per_page, "review/list");
    let user = state.library.users.get(id).ok_or((StatusCode::NOT_FOUND, "Not found"))?;

    let mut reviews: Vec<&Review> = match params.shelf.as_deref() {
        None | Some("read") => user.read.iter().collect(),
        Some(_) => Vec::new(),
    };
    if params.order.as_deref() == Some("a") {
        reviews.reverse();
    }
    let total = reviews.len();
    reviews.truncate(params.per_page.unwrap_or(20));

    let review = reviews
        .into_iter()
        .map(|review| ReviewDoc {
            book: state.library.books.get(&review.book_id).map(BookDoc::new),
            rating: review.rating,
            read_at: &review.read_at,
            link: format!("{MOCK_HOST}/review/show/{}-{}", user.id, review.book_id),
        })
        .collect::<Vec<_>>();
    xml(GoodreadsResponse {
        reviews: Some(ReviewsDoc {
            start: 1,
            end: review.len(),
            total,
            review,
        }),
        ..GoodreadsResponse::empty("review_list")
    })
}
