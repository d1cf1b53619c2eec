//! Integration tests for the Google Books client
//!
//! These tests drive the public API end to end, either against a local mockito
//! server through the reqwest transport or against the scripted mock transport.

use google_books_client::utils::{
    catalogue_handler, make_volume_item, make_volumes_body, MockHttp,
};
use google_books_client::{BooksClient, ClientConfig, ClientError, CursorState};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn mock_client(mock: &Arc<MockHttp>) -> BooksClient {
    BooksClient::with_transport(ClientConfig::new("integration-key"), mock.clone())
}

/// Test a full search against a local HTTP server
#[tokio::test]
async fn test_search_over_http() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "kind": "books#volume",
            "id": "B1hSG45JCX4C",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "industryIdentifiers": [
                    { "type": "ISBN_13", "identifier": "9780441013593" }
                ]
            },
            "searchInfo": { "textSnippet": "Set on the desert planet Arrakis" }
        }]
    });
    let mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "intitle:dune".into()),
            Matcher::UrlEncoded("printType".into(), "books".into()),
            Matcher::UrlEncoded("startIndex".into(), "0".into()),
            Matcher::UrlEncoded("maxResults".into(), "1".into()),
            Matcher::UrlEncoded("key".into(), "integration-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let config = ClientConfig::new("integration-key")
        .with_base_uri(format!("{}/books/v1/", server.url()));
    let mut client = BooksClient::new(config).unwrap();
    client.query_field("intitle", "dune").print_type("books");

    let volume = client.first().await.unwrap().expect("one volume");

    mock.assert_async().await;
    assert_eq!(volume.title(), Some("Dune"));
    assert_eq!(volume.authors(), vec!["Frank Herbert"]);
    assert_eq!(volume.isbn_13(), Some("9780441013593"));
    assert_eq!(volume.snippet(), Some("Set on the desert planet Arrakis"));
}

/// Test that an HTTP error status is recorded rather than returned
#[tokio::test]
async fn test_http_error_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":{"code":400,"message":"Missing query."}}"#)
        .expect(2)
        .create_async()
        .await;

    let config = ClientConfig::new("integration-key")
        .with_base_uri(format!("{}/books/v1/", server.url()));
    let mut client = BooksClient::new(config).unwrap();

    assert_eq!(client.count().await.unwrap(), 0);
    assert!(client.error_occurred());
    assert!(!client.has_more());
    assert!(client
        .last_error()
        .unwrap()
        .to_string()
        .starts_with("Invalid response. Status: 400."));

    // The failed page was not cached, so asking again goes back to the server
    client.start().await.unwrap();
    mock.assert_async().await;
}

/// Test the pagination example: 95 results in pages of 10
#[tokio::test]
async fn test_ninety_five_results() {
    let mock = Arc::new(MockHttp::with_handler(catalogue_handler(95)));
    let mut client = mock_client(&mock);
    client.query("anything").take(10);

    assert_eq!(client.page_count().await.unwrap(), 10);

    let mut next = client.start().await.unwrap();
    while client.absolute_index() < 94 {
        assert!(next.is_some());
        next = client.advance().await.unwrap();
    }
    assert_eq!(next.unwrap().title(), Some("Volume 94"));
    assert!(client.has_more());

    assert!(client.advance().await.unwrap().is_none());
    assert_eq!(client.absolute_index(), 95);
    assert!(!client.has_more());
}

/// Test take() bounds page sizes and page counts
#[tokio::test]
async fn test_take_controls_page_size() {
    for n in [1_i64, 7, 40] {
        let mock = Arc::new(MockHttp::with_handler(catalogue_handler(95)));
        let mut client = mock_client(&mock);
        client.take(n);

        let first_page = client.fetch_page(1).await.unwrap();
        assert!(first_page.len() <= n as usize);
        assert_eq!(
            client.page_count().await.unwrap(),
            95_u64.div_ceil(n as u64)
        );
    }
}

/// Test take() outside 1..=40 unsets maxResults and keeps the previous page size
#[tokio::test]
async fn test_take_out_of_range() {
    let mock = Arc::new(MockHttp::with_handler(catalogue_handler(5)));
    let mut client = mock_client(&mock);
    client.take(15).take(100);

    client.start().await.unwrap();

    assert_eq!(client.page_size(), 15);
    assert_eq!(mock.requests()[0].param("maxResults"), None);
}

/// Test skip() sets the page immediately, even for negative offsets
#[test]
fn test_skip_sets_page() {
    let mock = Arc::new(MockHttp::new());
    let mut client = mock_client(&mock);

    for (offset, page) in [(0_i64, 0_i64), (19, 1), (20, 2), (-1, -1), (-25, -3)] {
        client.skip(offset);
        assert_eq!(client.current_page(), page, "offset {}", offset);
    }
}

/// Test iteration after skip() starts at the skipped record and crosses pages
#[tokio::test]
async fn test_skip_then_iterate() {
    let mock = Arc::new(MockHttp::with_handler(catalogue_handler(95)));
    let mut client = mock_client(&mock);
    client.take(10).skip(35);

    let first = client.current().await.unwrap();
    assert_eq!(first.unwrap().title(), Some("Volume 35"));

    let mut last = None;
    for _ in 0..12 {
        last = client.advance().await.unwrap();
    }
    assert_eq!(last.unwrap().title(), Some("Volume 47"));

    let offsets: Vec<_> = mock
        .requests()
        .iter()
        .map(|r| r.param("startIndex").unwrap_or_default().to_string())
        .collect();
    assert_eq!(offsets, vec!["35", "45"]);

    // Rewinding goes back to the skipped record, from the cache
    let rewound = client.start().await.unwrap();
    assert_eq!(rewound.unwrap().title(), Some("Volume 35"));
    assert_eq!(mock.request_count(), 2);
}

/// Test limit() always bounds the page size
#[test]
fn test_limit_and_page_size() {
    let mock = Arc::new(MockHttp::new());
    let mut client = mock_client(&mock);

    client.limit(120);
    assert_eq!(client.page_size(), 40);
    assert_eq!(client.result_limit(), Some(120));

    client.limit(12);
    assert_eq!(client.page_size(), 12);
}

/// Test that a page is only requested once
#[tokio::test]
async fn test_page_cache() {
    let mock = Arc::new(MockHttp::with_handler(catalogue_handler(30)));
    let mut client = mock_client(&mock);

    client.fetch_page(2).await.unwrap();
    client.fetch_page(2).await.unwrap();
    assert_eq!(mock.request_count(), 1);

    // Parameter changes do not invalidate cached pages
    client.query("something else");
    client.fetch_page(2).await.unwrap();
    assert_eq!(mock.request_count(), 1);

    client.clear_cache();
    client.fetch_page(2).await.unwrap();
    assert_eq!(mock.request_count(), 2);
}

/// Test qualifier concatenation on the wire
#[tokio::test]
async fn test_multiple_qualifiers() {
    let mock = Arc::new(MockHttp::new());
    mock.push_json(&make_volumes_body(0, vec![]));
    let mut client = mock_client(&mock);
    client
        .query_field("intitle", "dune")
        .query_field("inauthor", "herbert");

    client.start().await.unwrap();

    assert_eq!(
        mock.requests()[0].param("q"),
        Some("intitle:duneinauthor:herbert")
    );
}

/// Test first() on an empty result set
#[tokio::test]
async fn test_first_without_results() {
    let mock = Arc::new(MockHttp::new());
    mock.push_json(&make_volumes_body(0, vec![]));
    let mut client = mock_client(&mock);

    assert!(client.first().await.unwrap().is_none());
    assert_eq!(client.page_size(), 1);
    assert_eq!(client.state(), CursorState::Exhausted);
}

/// Test a missing base URI is reported before any request is made
#[tokio::test]
async fn test_missing_base_uri() {
    let mock = Arc::new(MockHttp::new());
    let config = ClientConfig::new("integration-key").with_base_uri("");
    let mut client = BooksClient::with_transport(config, mock.clone());

    let err = client.count().await.unwrap_err();
    assert!(matches!(err, ClientError::MissingConfig("uri")));
    assert_eq!(err.to_string(), "Missing required API config: uri");
    assert_eq!(mock.request_count(), 0);
}

/// Test bookshelf volumes use the nested path
#[tokio::test]
async fn test_bookshelf_volumes() {
    let mock = Arc::new(MockHttp::new());
    mock.push_json(&make_volumes_body(
        2,
        vec![make_volume_item("a", "A"), make_volume_item("b", "B")],
    ));
    let mut client = mock_client(&mock);
    client.bookshelf_books("113924751183405498214", 0);

    let volumes = client.collect_all().await.unwrap();

    assert_eq!(volumes.len(), 2);
    assert_eq!(volumes[1].get("OTHER"), Some(&json!("ID:b")));
    assert_eq!(
        mock.requests()[0].url.path(),
        "/books/v1/users/113924751183405498214/bookshelves/0/volumes"
    );
}
