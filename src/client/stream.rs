//! Async stream adapter over the cursor.

use async_stream::try_stream;
use futures_util::stream::Stream;
use futures_util::TryStreamExt;

use super::{BooksClient, ClientError};
use crate::models::Volume;

impl BooksClient {
    /// Stream every remaining volume, restarting the cursor first.
    ///
    /// The stream ends when [`BooksClient::has_more`] turns false (end of
    /// results, result limit, or a remote error) or a page comes back shorter
    /// than expected. Missing configuration and parse errors are yielded as
    /// `Err` and end the stream.
    pub fn stream(&mut self) -> impl Stream<Item = Result<Volume, ClientError>> + '_ {
        let client = self;
        try_stream! {
            let mut next = client.start().await?;
            while client.has_more() {
                match next {
                    Some(volume) => {
                        yield volume;
                    }
                    None => break,
                }
                next = client.advance().await?;
            }
        }
    }

    /// Collect all remaining volumes into a Vec
    ///
    /// Note: combine with [`BooksClient::limit`] for large result sets.
    pub async fn collect_all(&mut self) -> Result<Vec<Volume>, ClientError> {
        self.stream().try_collect().await
    }
}
