//! The paginated query client.
//!
//! [`BooksClient`] combines three things: the query parameters built up through
//! its fluent setters, a per-page cache of fetched volumes, and a cursor that
//! walks the combined result set. Pages are fetched lazily, the first time the
//! cursor needs them, and stay cached for the lifetime of the client.
//!
//! # Iteration
//!
//! ```rust,no_run
//! use google_books_client::{BooksClient, ClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = BooksClient::new(ClientConfig::new("api-key"))?;
//! client.query_field("intitle", "dune").take(20);
//!
//! let mut next = client.start().await?;
//! while client.has_more() {
//!     let Some(volume) = next else { break };
//!     println!("{}: {:?}", client.absolute_index(), volume.title());
//!     next = client.advance().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Missing configuration and malformed JSON are returned as [`ClientError`].
//! A non-200 response or a failed connection is not: it is stored as a
//! [`RemoteError`], [`BooksClient::error_occurred`] turns true and iteration
//! stops. The failed page is not cached, so fetching it again retries the
//! request.
//!
//! A client is not meant to be shared: every cursor operation takes `&mut self`.

mod builder;
mod cursor;
mod fetcher;
mod stream;

pub use cursor::{Cursor, CursorState};

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::models::{QueryParameters, Volume};
use crate::utils::{HttpClient, HttpGet, TransportError};

/// Errors returned to the caller
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required setting (`key` or `uri`) is not set
    #[error("Missing required API config: {0}")]
    MissingConfig(&'static str),

    /// The base URI or resource path does not form a valid URL
    #[error("Invalid base URI: {0}")]
    InvalidUri(String),

    /// Response body is not a valid volumes envelope
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration sources could not be read
    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    /// The HTTP client could not be built
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(format!("JSON: {}", err))
    }
}

/// Failure of the most recent fetch, kept on the client instead of returned
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The API answered with a status other than 200
    #[error("Invalid response. Status: {status}. Body: {body}")]
    Status { status: u16, body: String },

    /// No response was received
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Fluent query builder and lazy paginated cursor over the Books API
#[derive(Debug)]
pub struct BooksClient {
    config: ClientConfig,
    transport: Arc<dyn HttpGet>,
    resource_path: String,
    params: QueryParameters,
    cursor: Cursor,
    pages: HashMap<i64, Vec<Volume>>,
    requests_made: u64,
    last_error: Option<RemoteError>,
}

impl BooksClient {
    /// Create a client that talks to the API over HTTP
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpClient::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client configured from `GOOGLE_BOOKS_API_*` environment variables
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client that fetches pages through the given transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpGet>) -> Self {
        let resource_path = config.resource_path.clone();
        Self {
            config,
            transport,
            resource_path,
            params: QueryParameters::default(),
            cursor: Cursor::default(),
            pages: HashMap::new(),
            requests_made: 0,
            last_error: None,
        }
    }

    // ========== CURSOR ==========

    /// Rewind to the first record, fetching its page if it is not cached.
    ///
    /// The first record is the one at the `startIndex` set by
    /// [`BooksClient::skip`], or record 0 when nothing was skipped.
    pub async fn start(&mut self) -> Result<Option<Volume>, ClientError> {
        self.cursor.reset();
        self.fetch_page(self.cursor.page).await?;
        Ok(self.record_at_cursor())
    }

    /// Record under the cursor.
    ///
    /// The first call on a fresh client fetches the current page.
    pub async fn current(&mut self) -> Result<Option<Volume>, ClientError> {
        if self.requests_made == 0 {
            self.fetch_page(self.cursor.page).await?;
        }
        Ok(self.record_at_cursor())
    }

    /// Move to the next record, fetching the next page when crossing a page boundary.
    pub async fn advance(&mut self) -> Result<Option<Volume>, ClientError> {
        if self.cursor.step() {
            self.fetch_page(self.cursor.page).await?;
            return Ok(self.record_at_cursor());
        }
        self.current().await
    }

    /// Whether the cursor still points at a result worth reading.
    ///
    /// False after a failed fetch. Optimistically true before the first fetch.
    pub fn has_more(&self) -> bool {
        if self.last_error.is_some() {
            return false;
        }
        if self.requests_made == 0 {
            return true;
        }
        self.cursor.within_limit() && self.cursor.within_results(self.params.start_index)
    }

    /// Index of the cursor across all pages, counted from the first record.
    ///
    /// Without a skip this is `(page - 1) * page_size + record`.
    pub fn absolute_index(&self) -> i64 {
        self.cursor.absolute_index()
    }

    /// Total results reported by the API, starting the cursor if nothing was fetched yet
    pub async fn count(&mut self) -> Result<u64, ClientError> {
        if self.requests_made == 0 {
            self.start().await?;
        }
        Ok(self.cursor.total_results)
    }

    /// Total pages at the current page size, starting the cursor if nothing was fetched yet
    pub async fn page_count(&mut self) -> Result<u64, ClientError> {
        if self.requests_made == 0 {
            self.start().await?;
        }
        Ok(self.cursor.total_pages)
    }

    /// Best match for the current query.
    ///
    /// Sets a result limit of 1 (and with it a page size of 1) and restarts the cursor.
    pub async fn first(&mut self) -> Result<Option<Volume>, ClientError> {
        self.limit(1);
        self.start().await
    }

    /// Where the cursor stands, derived from the error flag, request count and bounds
    pub fn state(&self) -> CursorState {
        if self.last_error.is_some() {
            CursorState::Errored
        } else if self.requests_made == 0 {
            CursorState::Unstarted
        } else if self.has_more() {
            CursorState::Positioned
        } else {
            CursorState::Exhausted
        }
    }

    fn record_at_cursor(&self) -> Option<Volume> {
        self.pages
            .get(&self.cursor.page)
            .and_then(|page| page.get(self.cursor.record))
            .cloned()
    }

    // ========== STATE ==========

    /// Whether the most recent fetch failed
    pub fn error_occurred(&self) -> bool {
        self.last_error.is_some()
    }

    /// Failure of the most recent fetch, if it failed
    pub fn last_error(&self) -> Option<&RemoteError> {
        self.last_error.as_ref()
    }

    /// Number of pages fetched from the network so far
    pub fn requests_made(&self) -> u64 {
        self.requests_made
    }

    /// Whether `page` is in the page cache
    pub fn is_cached(&self, page: i64) -> bool {
        self.pages.contains_key(&page)
    }

    /// Drop every cached page. Changing parameters never does this on its own.
    pub fn clear_cache(&mut self) {
        self.pages.clear();
    }

    /// Cursor position and the totals from the last fetched page
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Page the cursor is on
    pub fn current_page(&self) -> i64 {
        self.cursor.page
    }

    /// Records per page, as last set by `take` or `limit`
    pub fn page_size(&self) -> usize {
        self.cursor.page_size
    }

    /// Overall cap on iterated records, if `limit` was called
    pub fn result_limit(&self) -> Option<u64> {
        self.cursor.limit
    }

    /// Query parameters sent with the next uncached page request
    pub fn parameters(&self) -> &QueryParameters {
        &self.params
    }

    /// Path of the selected endpoint, relative to the base URI
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Connection settings the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
