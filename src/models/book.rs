//! Book models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

/// Full book record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// 16-character URL-safe identifier
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total number of pages
    pub page_count: i32,
    /// Pages read so far
    pub read_page: i32,
    /// Always `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload
    pub fn new(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let mut book = Self {
            id,
            name: String::new(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: 0,
            read_page: 0,
            finished: false,
            reading: false,
            inserted_at: now,
            updated_at: now,
        };
        book.apply(payload, now);
        book
    }

    /// Overwrite every mutable field. `id` and `inserted_at` are kept.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count.unwrap_or_default();
        self.read_page = payload.read_page.unwrap_or_default();
        self.finished = self.page_count == self.read_page;
        self.reading = payload.reading.unwrap_or_default();
        self.updated_at = now;
    }
}

/// Projection returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Required, must not be empty
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Absent or `null` means 0
    pub page_count: Option<i32>,
    /// Absent or `null` means 0
    pub read_page: Option<i32>,
    /// Absent or `null` means `false`
    pub reading: Option<bool>,
}

impl BookPayload {
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    pub fn read_page_exceeds_page_count(&self) -> bool {
        self.read_page.unwrap_or_default() > self.page_count.unwrap_or_default()
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// `1` for books being read, anything else for the rest
    pub reading: Option<String>,
    /// `1` for finished books, anything else for unfinished ones
    pub finished: Option<String>,
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
}

impl BookQuery {
    /// Build a query from raw key/value pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                "name" => &mut query.name,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Resolve the query to the single filter that gets applied.
    ///
    /// Only one criterion is honoured: `reading` wins over `finished`,
    /// which wins over `name`.
    pub fn filter(&self) -> Option<BookFilter> {
        if let Some(reading) = &self.reading {
            Some(BookFilter::Reading(is_truthy(reading)))
        } else if let Some(finished) = &self.finished {
            Some(BookFilter::Finished(is_truthy(finished)))
        } else {
            self.name
                .as_ref()
                .map(|name| BookFilter::Name(name.to_uppercase()))
        }
    }
}

/// A single list predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Reading(bool),
    Finished(bool),
    /// Needle already upper-cased
    Name(String),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::Name(needle) => book.name.to_uppercase().contains(needle.as_str()),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1"
}

fn serialize_timestamp<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
