//! Core data models for volume queries and results.

mod query;
mod volume;

pub use query::{
    Download, Endpoint, Filter, OrderBy, PrintType, Projection, Qualifier, QueryParameters,
    UnknownValue, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use volume::{Volume, VOLUME_KIND};
