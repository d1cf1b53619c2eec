//! Query parameters accepted by the volumes endpoints.
//!
//! Every scalar parameter the API restricts to a fixed set of values has its own
//! enum. Parsing a string into one of them fails for unknown values, which the
//! builder turns into a silent no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest page size the API accepts for `maxResults`
pub const MAX_PAGE_SIZE: usize = 40;

/// Page size the API uses when `maxResults` is not sent
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Returned when a string is not part of a parameter's allow-list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {parameter} value")]
pub struct UnknownValue {
    pub parameter: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(parameter: &'static str, value: &str) -> Self {
        Self {
            parameter,
            value: value.to_string(),
        }
    }
}

/// Declares a parameter enum with its wire names, `FromStr` and `Display`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $param:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Value as sent on the query string
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Every accepted value
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownValue::new($param, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Field restriction applied to a search term
    Qualifier, "qualifier" {
        /// Unqualified full-text search
        FullText => "",
        Title => "intitle",
        Author => "inauthor",
        Publisher => "inpublisher",
        Subject => "subject",
        Isbn => "isbn",
        Lccn => "lccn",
        Oclc => "oclc",
    }
}

wire_enum! {
    /// Restrict to volumes with a downloadable format
    Download, "download" {
        Epub => "epub",
    }
}

wire_enum! {
    /// Viewability and availability filter
    Filter, "filter" {
        Partial => "partial",
        Full => "full",
        FreeEbooks => "free-ebooks",
        PaidEbooks => "paid-ebooks",
        Ebooks => "ebooks",
    }
}

wire_enum! {
    /// Result ordering
    OrderBy, "orderBy" {
        Newest => "newest",
        Relevance => "relevance",
    }
}

wire_enum! {
    /// Kind of publication to return
    PrintType, "printType" {
        All => "all",
        Books => "books",
        Magazines => "magazines",
    }
}

wire_enum! {
    /// Amount of volume metadata returned per item
    Projection, "projection" {
        Full => "full",
        Lite => "lite",
    }
}

/// Accumulated parameters for a volumes request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Search terms by qualifier, in insertion order
    pub q: Vec<(Qualifier, String)>,
    pub download: Option<Download>,
    pub filter: Option<Filter>,
    pub order_by: Option<OrderBy>,
    pub print_type: Option<PrintType>,
    pub projection: Option<Projection>,
    pub lang_restrict: Option<String>,
    /// Absolute record offset the result set starts from
    pub start_index: u64,
    /// `None` lets the API apply its own default
    pub max_results: Option<usize>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            q: Vec::new(),
            download: None,
            filter: None,
            order_by: None,
            print_type: None,
            projection: None,
            lang_restrict: None,
            start_index: 0,
            max_results: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl QueryParameters {
    /// Set the term for a qualifier, keeping its original position if already present
    pub fn set_term(&mut self, qualifier: Qualifier, term: impl Into<String>) {
        let term = term.into();
        match self.q.iter_mut().find(|(q, _)| *q == qualifier) {
            Some(entry) => entry.1 = term,
            None => self.q.push((qualifier, term)),
        }
    }

    /// Build the `q` value.
    ///
    /// Qualified terms are written as `qualifier:term`, unqualified ones as the
    /// bare term. Groups are joined without any delimiter, so
    /// `intitle=dune, inauthor=herbert` gives `intitle:duneinauthor:herbert`.
    /// Terms are percent-decoded first.
    pub fn build_q(&self) -> Option<String> {
        if self.q.is_empty() {
            return None;
        }

        let mut out = String::new();
        for (qualifier, term) in &self.q {
            if *qualifier != Qualifier::FullText {
                out.push_str(qualifier.as_str());
                out.push(':');
            }
            match urlencoding::decode(term) {
                Ok(decoded) => out.push_str(&decoded),
                Err(_) => out.push_str(term),
            }
        }
        Some(out)
    }

    /// Flatten into query-string pairs for a request starting at `start_index`.
    ///
    /// Empty scalar values are left out. `q` is kept once any term was set,
    /// even if the resulting string is empty.
    pub fn to_query_pairs(&self, start_index: u64) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(q) = self.build_q() {
            pairs.push(("q".to_string(), q));
        }

        let scalars: [(&str, Option<String>); 8] = [
            ("download", self.download.map(|d| d.to_string())),
            ("filter", self.filter.map(|f| f.to_string())),
            ("startIndex", Some(start_index.to_string())),
            ("maxResults", self.max_results.map(|m| m.to_string())),
            ("printType", self.print_type.map(|p| p.to_string())),
            ("projection", self.projection.map(|p| p.to_string())),
            ("orderBy", self.order_by.map(|o| o.to_string())),
            ("langRestrict", self.lang_restrict.clone()),
        ];

        for (key, value) in scalars {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value));
            }
        }

        pairs
    }
}

/// Resource the client lists volumes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    /// Full-text volume search
    Volumes,
    /// Public bookshelves of a user. User IDs are long decimal strings.
    Bookshelves { user_id: String },
    /// Volumes on one public bookshelf of a user
    BookshelfVolumes { user_id: String, shelf_id: u64 },
}

impl Endpoint {
    /// Path relative to the API base URI
    pub fn path(&self) -> String {
        match self {
            Endpoint::Volumes => "volumes".to_string(),
            Endpoint::Bookshelves { user_id } => {
                format!("users/{}/bookshelves", urlencoding::encode(user_id))
            }
            Endpoint::BookshelfVolumes { user_id, shelf_id } => format!(
                "users/{}/bookshelves/{}/volumes",
                urlencoding::encode(user_id),
                shelf_id
            ),
        }
    }
}
