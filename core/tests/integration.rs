//! End-to-end run against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Goodreads` with the
//! real `UreqTransport`, so request building, transport and XML decoding are
//! exercised together over HTTP.

use std::net::SocketAddr;

use goodreads_core::{ApiError, ClientConfig, Goodreads, GoodreadsClient, UreqTransport};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn goodreads(addr: SocketAddr) -> Goodreads<UreqTransport> {
    let mut config = ClientConfig::new(mock_server::TEST_KEY, "1");
    config.api_root = format!("http://{addr}");
    Goodreads::from_config(&config).unwrap()
}

#[test]
fn user_with_room_for_last_read() {
    let addr = start_server();
    let gr = goodreads(addr);

    // Two statuses, limit four: both enriched, two reviews appended.
    let fetch = gr.get_user("1", 4).unwrap();
    assert!(fetch.is_complete());

    let user = &fetch.user;
    assert_eq!(user.name, "Ada Reader");
    assert_eq!(user.about, "Reads on the train & at night.");
    assert_eq!(user.review_count, 5);
    assert_eq!(user.reading_shelf().book_count, Some(2));
    assert_eq!(user.read_shelf().book_count, Some(3));
    assert_eq!(user.to_read_shelf().book_count, Some(14));

    assert_eq!(user.statuses.len(), 2);
    let good_omens = &user.statuses[1].book;
    assert_eq!(good_omens.title, "Good Omens");
    assert_eq!(good_omens.num_pages, Some(412));
    assert_eq!(good_omens.author().unwrap().name, "Terry Pratchett");
    assert_eq!(good_omens.authors.len(), 2);
    assert_eq!(user.statuses[0].page, 120);

    let read: Vec<&str> = user.last_read.iter().map(|r| r.book.title.as_str()).collect();
    assert_eq!(read, ["Dune", "Solaris"]);
    assert_eq!(user.last_read[0].read_at_short(), "25 Feb 2024");
    assert_eq!(user.last_read[1].full_stars().len(), 4);
    assert_eq!(user.last_read[1].book.author().unwrap().name, "Stanisław Lem");
}

#[test]
fn user_with_more_statuses_than_limit() {
    let addr = start_server();
    let gr = goodreads(addr);

    let fetch = gr.get_user("2", 3).unwrap();
    let titles: Vec<&str> = fetch
        .user
        .statuses
        .iter()
        .map(|s| s.book.title.as_str())
        .collect();
    assert_eq!(titles, ["The Dispossessed", "Piranesi", "Good Omens"]);
    assert!(fetch.user.last_read.is_empty());
    assert_eq!(fetch.user.statuses[0].book.num_pages, None);
    assert_eq!(fetch.user.read_shelf().book_count, Some(0));
}

#[test]
fn user_with_dangling_status() {
    let addr = start_server();
    let gr = goodreads(addr);

    let fetch = gr.get_user("3", 2).unwrap();
    assert!(!fetch.is_complete());
    assert_eq!(fetch.enrichment_failures[0].book_id, "999");
    assert!(matches!(fetch.enrichment_failures[0].error, ApiError::NotFound));
    assert_eq!(fetch.user.statuses[0].book.id, "999");
    assert!(fetch.user.statuses[0].book.author().is_err());
    assert_eq!(fetch.user.last_read.len(), 1);
    assert!(fetch.user.reading_shelf().is_empty());
}

#[test]
fn single_endpoints() {
    let addr = start_server();
    let gr = goodreads(addr);

    let book = gr.get_book("12").unwrap();
    assert_eq!(book.title, "Piranesi");
    assert_eq!(book.format, "Hardcover");
    assert_eq!(book.isbn, "1635575630");
    assert_eq!(book.link, "https://mock.goodreads.local/book/show/12");

    let reviews = gr.get_last_read("1", 10).unwrap();
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[2].read_at_short(), "");
    assert_eq!(reviews[2].empty_stars().len(), 5);

    assert!(matches!(gr.get_book("nope"), Err(ApiError::NotFound)));
    assert!(matches!(gr.get_user("404", 1), Err(ApiError::NotFound)));
}

#[test]
fn wrong_key_surfaces_status() {
    let addr = start_server();
    let client = GoodreadsClient::new(&format!("http://{addr}"), "wrong").unwrap();
    let gr = Goodreads::new(client, UreqTransport::default());

    let err = gr.get_book("10").unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { status: 401, ref body } if body == "Invalid API key."));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let gr = goodreads(addr);

    let err = gr.get_book("10").unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
