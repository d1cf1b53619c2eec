//! Page fetching: one request per uncached page.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{BooksClient, ClientError, RemoteError};
use crate::models::Volume;

/// Envelope shared by the volumes and bookshelves listings
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(rename = "totalItems", default)]
    total_items: u64,
    #[serde(default)]
    items: Option<Vec<Value>>,
}

impl BooksClient {
    /// Volumes of `page`, from the cache or from the API.
    ///
    /// A cache hit makes no request and leaves the totals untouched. On a miss
    /// the current parameters are sent with `startIndex` moved to the page's
    /// first record. A non-200 response or a transport failure is recorded in
    /// [`BooksClient::last_error`] and yields an empty, uncached page.
    pub async fn fetch_page(&mut self, page: i64) -> Result<Vec<Volume>, ClientError> {
        let api_key = self
            .config
            .api_key()
            .ok_or(ClientError::MissingConfig("key"))?
            .to_string();
        let url = self.request_url()?;

        if let Some(cached) = self.pages.get(&page) {
            debug!("Cache HIT for page {}", page);
            self.last_error = None;
            return Ok(cached.clone());
        }
        debug!("Cache MISS for page {}", page);

        let mut query = self.params.to_query_pairs(self.page_start_index(page));
        query.push(("key".to_string(), api_key));

        debug!(url = %url, page, "Requesting page");
        let response = match self.transport.get(&url, &query).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for page {} failed: {}", page, e);
                self.last_error = Some(RemoteError::Transport(e.to_string()));
                return Ok(Vec::new());
            }
        };

        if response.status != http::StatusCode::OK {
            let error = RemoteError::Status {
                status: response.status.as_u16(),
                body: response.body_text(),
            };
            warn!("Page {}: {}", page, error);
            self.last_error = Some(error);
            return Ok(Vec::new());
        }

        let envelope: ListEnvelope = serde_json::from_slice(&response.body)?;
        self.cursor.set_totals(envelope.total_items);

        let volumes: Vec<Volume> = envelope
            .items
            .unwrap_or_default()
            .iter()
            .map(Volume::from_item)
            .collect();

        debug!(
            "Fetched page {} with {} volumes ({} total)",
            page,
            volumes.len(),
            envelope.total_items
        );

        self.pages.insert(page, volumes.clone());
        self.requests_made += 1;
        self.last_error = None;

        Ok(volumes)
    }

    /// `{base_uri}/{resource_path}`, resolved the way a browser resolves a relative link
    fn request_url(&self) -> Result<Url, ClientError> {
        let base = self
            .config
            .base_uri()
            .ok_or(ClientError::MissingConfig("uri"))?;

        Url::parse(base)
            .and_then(|base| base.join(&self.resource_path))
            .map_err(|e| ClientError::InvalidUri(format!("{}: {}", base, e)))
    }

    /// Offset of the first record of `page`. The origin page starts at the
    /// configured `startIndex`.
    fn page_start_index(&self, page: i64) -> u64 {
        let pages_after = self.cursor.pages_after_origin(page);
        self.params.start_index + pages_after * self.cursor.page_size as u64
    }
}
