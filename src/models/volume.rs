//! Normalized volume records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Item kind the API uses for book and magazine volumes
pub const VOLUME_KIND: &str = "books#volume";

/// A single volume as returned by a search or bookshelf listing.
///
/// The record is the item's `volumeInfo` object with two changes: the
/// `industryIdentifiers` list is flattened into top-level keys named after the
/// identifier type (`ISBN_10`, `ISBN_13`, `ISSN`, `OTHER`, ...), and the search
/// snippet, when present, is stored under `searchInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume {
    fields: Map<String, Value>,
}

impl Volume {
    /// Normalize one entry of an API `items` array.
    ///
    /// Items of any other kind than [`VOLUME_KIND`] become an empty record.
    pub fn from_item(item: &Value) -> Self {
        if item.get("kind").and_then(Value::as_str) != Some(VOLUME_KIND) {
            return Self::default();
        }

        let mut fields = item
            .get("volumeInfo")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let snippet = item
            .get("searchInfo")
            .and_then(|s| s.get("textSnippet"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        if let Some(snippet) = snippet {
            fields.insert("searchInfo".to_string(), Value::from(snippet));
        }

        let identifiers = fields
            .get("industryIdentifiers")
            .and_then(Value::as_array)
            .filter(|ids| !ids.is_empty())
            .cloned();
        if let Some(identifiers) = identifiers {
            for entry in &identifiers {
                let kind = entry.get("type").and_then(Value::as_str);
                let identifier = entry.get("identifier");
                if let (Some(kind), Some(identifier)) = (kind, identifier) {
                    fields.insert(kind.to_string(), identifier.clone());
                }
            }
            fields.remove("industryIdentifiers");
        }

        Self { fields }
    }

    /// Raw field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the record has no fields (non-volume items normalize to this)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields of the record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn str_list(&self, key: &str) -> Vec<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.str_field("subtitle")
    }

    pub fn authors(&self) -> Vec<&str> {
        self.str_list("authors")
    }

    pub fn publisher(&self) -> Option<&str> {
        self.str_field("publisher")
    }

    /// Publication date as the API reports it (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`)
    pub fn published_date(&self) -> Option<&str> {
        self.str_field("publishedDate")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn page_count(&self) -> Option<u64> {
        self.fields.get("pageCount").and_then(Value::as_u64)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.str_list("categories")
    }

    pub fn language(&self) -> Option<&str> {
        self.str_field("language")
    }

    pub fn isbn_10(&self) -> Option<&str> {
        self.str_field("ISBN_10")
    }

    pub fn isbn_13(&self) -> Option<&str> {
        self.str_field("ISBN_13")
    }

    /// Text snippet around the matched search terms
    pub fn snippet(&self) -> Option<&str> {
        self.str_field("searchInfo")
    }
}

impl From<Map<String, Value>> for Volume {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
