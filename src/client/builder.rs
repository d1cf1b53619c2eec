//! Fluent setters for endpoint and query parameters.
//!
//! Invalid input never fails: an unknown enum value or an out-of-range number
//! leaves the parameter as it was (or, for `take`, unset). None of these
//! setters touch the page cache.

use std::str::FromStr;

use super::BooksClient;
use crate::models::{
    Download, Endpoint, Filter, OrderBy, PrintType, Projection, Qualifier, MAX_PAGE_SIZE,
};

impl BooksClient {
    // ========== ENDPOINTS ==========

    /// Search all volumes
    pub fn books(&mut self) -> &mut Self {
        self.endpoint(Endpoint::Volumes)
    }

    /// List the public bookshelves of a user
    pub fn bookshelves(&mut self, user_id: impl Into<String>) -> &mut Self {
        self.endpoint(Endpoint::Bookshelves {
            user_id: user_id.into(),
        })
    }

    /// List the volumes on one of a user's public bookshelves
    pub fn bookshelf_books(&mut self, user_id: impl Into<String>, shelf_id: u64) -> &mut Self {
        self.endpoint(Endpoint::BookshelfVolumes {
            user_id: user_id.into(),
            shelf_id,
        })
    }

    pub fn endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
        self.resource_path = endpoint.path();
        self
    }

    // ========== QUERY ==========

    /// Add an unqualified full-text term
    pub fn query(&mut self, term: impl Into<String>) -> &mut Self {
        self.query_qualified(Qualifier::FullText, term)
    }

    /// Add a term restricted to a field (`intitle`, `inauthor`, `isbn`, ...).
    ///
    /// An unknown qualifier is ignored.
    pub fn query_field(&mut self, qualifier: &str, term: impl Into<String>) -> &mut Self {
        if let Some(qualifier) = parse_or_ignore::<Qualifier>(qualifier) {
            self.query_qualified(qualifier, term);
        }
        self
    }

    pub fn query_qualified(&mut self, qualifier: Qualifier, term: impl Into<String>) -> &mut Self {
        self.params.set_term(qualifier, term);
        self
    }

    // ========== FILTERS ==========

    /// Only `epub` is accepted
    pub fn download(&mut self, value: &str) -> &mut Self {
        if let Some(download) = parse_or_ignore::<Download>(value) {
            self.download_kind(download);
        }
        self
    }

    pub fn download_kind(&mut self, download: Download) -> &mut Self {
        self.params.download = Some(download);
        self
    }

    /// One of `partial`, `full`, `free-ebooks`, `paid-ebooks`, `ebooks`
    pub fn filter(&mut self, value: &str) -> &mut Self {
        if let Some(filter) = parse_or_ignore::<Filter>(value) {
            self.filter_kind(filter);
        }
        self
    }

    pub fn filter_kind(&mut self, filter: Filter) -> &mut Self {
        self.params.filter = Some(filter);
        self
    }

    /// One of `newest`, `relevance`
    pub fn order(&mut self, value: &str) -> &mut Self {
        if let Some(order) = parse_or_ignore::<OrderBy>(value) {
            self.order_kind(order);
        }
        self
    }

    pub fn order_kind(&mut self, order: OrderBy) -> &mut Self {
        self.params.order_by = Some(order);
        self
    }

    /// One of `full`, `lite`
    pub fn projection(&mut self, value: &str) -> &mut Self {
        if let Some(projection) = parse_or_ignore::<Projection>(value) {
            self.projection_kind(projection);
        }
        self
    }

    pub fn projection_kind(&mut self, projection: Projection) -> &mut Self {
        self.params.projection = Some(projection);
        self
    }

    /// One of `all`, `books`, `magazines`
    pub fn print_type(&mut self, value: &str) -> &mut Self {
        if let Some(print_type) = parse_or_ignore::<PrintType>(value) {
            self.print_type_kind(print_type);
        }
        self
    }

    pub fn print_type_kind(&mut self, print_type: PrintType) -> &mut Self {
        self.params.print_type = Some(print_type);
        self
    }

    /// Two-letter ISO-639-1 language code; not validated
    pub fn language(&mut self, value: impl Into<String>) -> &mut Self {
        self.params.lang_restrict = Some(value.into());
        self
    }

    // ========== PAGING ==========

    /// Start the result set at `offset`.
    ///
    /// The current page is always recomputed as `floor(offset / page_size)`;
    /// the offset itself is only stored when it is not negative.
    pub fn skip(&mut self, offset: i64) -> &mut Self {
        self.cursor.skip_to(offset);
        if offset >= 0 {
            self.params.start_index = offset as u64;
        }
        self
    }

    /// Page size between 1 and 40.
    ///
    /// Anything else unsets `maxResults`, leaving the API default in effect,
    /// while the page size used for cursor arithmetic stays at its last valid value.
    pub fn take(&mut self, count: i64) -> &mut Self {
        if (1..=MAX_PAGE_SIZE as i64).contains(&count) {
            self.params.max_results = Some(count as usize);
            self.cursor.page_size = count as usize;
        } else {
            self.params.max_results = None;
        }
        self
    }

    /// Stop iterating after `limit` records. Also caps the page size at `limit` (and 40).
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.cursor.limit = Some(limit);
        self.take(limit.min(MAX_PAGE_SIZE as u64) as i64)
    }
}

fn parse_or_ignore<T>(value: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("Ignoring parameter: {}", e);
            None
        }
    }
}
