//! # Google Books Client
//!
//! A client for the Google Books v1 API built around a fluent query builder and
//! a lazy, paginated cursor over the results.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`client`]: The [`BooksClient`] query builder, page fetcher and cursor
//! - [`models`]: Query parameters and normalized [`Volume`] records
//! - [`utils`]: HTTP transport trait, reqwest implementation and a scripted mock
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust,no_run
//! use google_books_client::{BooksClient, ClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = BooksClient::new(ClientConfig::new("api-key"))?;
//! client.query_field("isbn", "9780441013593");
//!
//! if let Some(volume) = client.first().await? {
//!     println!("{:?} by {:?}", volume.title(), volume.authors());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use client::{BooksClient, ClientError, CursorState, RemoteError};
pub use config::ClientConfig;
pub use models::Volume;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
