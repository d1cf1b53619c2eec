//! Cursor position and result totals.

use crate::models::DEFAULT_PAGE_SIZE;

/// Where a client stands in its result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No page has been fetched yet
    Unstarted,
    /// The cursor points inside the result set
    Positioned,
    /// The cursor moved past the last result or the result limit
    Exhausted,
    /// The most recent fetch failed
    Errored,
}

/// Position within a paginated result set.
///
/// Iteration starts on the origin page: page 1, or the page `skip` moved to.
/// `skip` may put the origin at 0 or below, since it divides the raw offset
/// by the page size. The origin page always starts at the configured
/// `startIndex`; each later page starts `page_size` records further on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) page: i64,
    pub(crate) origin: i64,
    pub(crate) record: usize,
    pub(crate) page_size: usize,
    pub(crate) limit: Option<u64>,
    pub(crate) total_results: u64,
    pub(crate) total_pages: u64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            page: 1,
            origin: 1,
            record: 0,
            page_size: DEFAULT_PAGE_SIZE,
            limit: None,
            total_results: 0,
            total_pages: 0,
        }
    }
}

impl Cursor {
    /// Back to the first record of the origin page
    pub(crate) fn reset(&mut self) {
        self.page = self.origin;
        self.record = 0;
    }

    /// Move one record forward. Returns true when this crossed into a new page.
    pub(crate) fn step(&mut self) -> bool {
        self.record += 1;
        if self.record >= self.page_size {
            self.page += 1;
            self.record = 0;
            return true;
        }
        false
    }

    /// Move to the page holding the record at `offset`, using floor division,
    /// and make it the origin.
    pub(crate) fn skip_to(&mut self, offset: i64) {
        self.page = offset.div_euclid(self.page_size as i64);
        self.origin = self.page;
        self.record = 0;
    }

    /// Pages between the origin and `page`; pages before the origin count as 0
    pub(crate) fn pages_after_origin(&self, page: i64) -> u64 {
        (page - self.origin).max(0) as u64
    }

    pub(crate) fn set_totals(&mut self, total_results: u64) {
        self.total_results = total_results;
        self.total_pages = total_results.div_ceil(self.page_size as u64);
    }

    /// Record index counted from the first record of the origin page
    pub fn absolute_index(&self) -> i64 {
        (self.page - self.origin) * self.page_size as i64 + self.record as i64
    }

    /// Whether the position is still below the result limit, if one is set
    pub(crate) fn within_limit(&self) -> bool {
        match self.limit {
            Some(limit) => i128::from(self.absolute_index()) < i128::from(limit),
            None => true,
        }
    }

    /// Whether the position still points at an existing result, given the
    /// `startIndex` the origin page was requested with
    pub(crate) fn within_results(&self, start_index: u64) -> bool {
        i128::from(start_index) + i128::from(self.absolute_index())
            < i128::from(self.total_results)
    }

    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn record(&self) -> usize {
        self.record
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }
}
