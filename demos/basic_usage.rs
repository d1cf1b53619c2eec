//! Basic usage example for the Google Books client.
//!
//! Reads `GOOGLE_BOOKS_API_KEY` from the environment and lists the first
//! results of a title/author search. Set `RUST_LOG=google_books_client=debug`
//! to see page fetches and cache hits.

use futures_util::StreamExt;
use google_books_client::BooksClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut client = BooksClient::from_env()?;
    client
        .query_field("intitle", "dune")
        .print_type("books")
        .order("relevance")
        .limit(15);

    let total = client.count().await?;
    let pages = client.page_count().await?;
    println!("Total matches: {}", total);
    println!("Pages of {}: {}\n", client.page_size(), pages);

    {
        let stream = client.stream();
        futures_util::pin_mut!(stream);
        let mut index = 0;
        while let Some(volume) = stream.next().await {
            let volume = volume?;
            index += 1;
            println!("{}. {}", index, volume.title().unwrap_or("(untitled)"));
            if !volume.authors().is_empty() {
                println!("   Authors: {}", volume.authors().join(", "));
            }
            if let Some(isbn) = volume.isbn_13() {
                println!("   ISBN-13: {}", isbn);
            }
        }
    }

    if let Some(error) = client.last_error() {
        eprintln!("Stopped early: {}", error);
    }

    Ok(())
}
