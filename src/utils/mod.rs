//! Utility modules supporting the client.
//!
//! - [`HttpGet`]: the GET-with-query capability the client fetches pages through
//! - [`HttpClient`]: reqwest implementation of [`HttpGet`]
//! - [`MockHttp`]: scripted transport that records requests, for tests
//!
//! # Scripted responses
//!
//! ```rust
//! use google_books_client::utils::{make_volume_item, make_volumes_body, MockHttp};
//!
//! let mock = MockHttp::new();
//! mock.push_json(&make_volumes_body(1, vec![make_volume_item("abc", "Dune")]));
//! mock.push_response(503, "backend unavailable");
//! ```

pub mod mock;
mod transport;

pub use mock::{catalogue_handler, make_volume_item, make_volumes_body, MockHttp, RecordedRequest};
pub use transport::{HttpClient, HttpGet, HttpResponse, TransportError};
