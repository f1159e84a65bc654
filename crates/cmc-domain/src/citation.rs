//! Citation record shared between the document store and the renderer
//!
//! Two record shapes circulate in the editor: camelCase records kept with a
//! stored document, and snake_case records returned by the backend API (where
//! `authors` is a list). Both deserialize into [`Citation`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Numeric citation identifier, used both as the marker key and the sort key
pub type CitationId = u64;

/// A citation attached to a document
///
/// Empty strings are treated as absent by every consumer; use [`present`] or
/// the accessor methods rather than matching on the raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Unique within one citation collection
    #[serde(deserialize_with = "deserialize_id")]
    pub id: CitationId,

    /// Quoted passage or summary the citation supports
    #[serde(default)]
    pub text: String,

    /// Source document name (e.g., "ICH Q6A")
    #[serde(default)]
    pub source: String,

    /// Single page in the source; ranges go in `pages`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Uploaded file the citation was extracted from
    #[serde(default, alias = "source_file_id", skip_serializing_if = "Option::is_none")]
    pub source_file_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Display author string; list-shaped input is joined with ", "
    #[serde(
        default,
        deserialize_with = "deserialize_authors",
        skip_serializing_if = "Option::is_none"
    )]
    pub authors: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Formatted page range, e.g. "5-10"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_tags",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Citation {
    /// Create a citation with the base fields
    pub fn new(id: CitationId, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Builder: set page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Builder: set source file
    pub fn with_source_file(mut self, file_id: impl Into<String>) -> Self {
        self.source_file_id = Some(file_id.into());
        self
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set authors
    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    /// Builder: set year
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Builder: set URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder: set DOI
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Builder: set journal
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Builder: set volume and optional issue
    pub fn with_volume(mut self, volume: impl Into<String>, issue: Option<&str>) -> Self {
        self.volume = Some(volume.into());
        self.issue = issue.map(str::to_string);
        self
    }

    /// Builder: set page range
    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// Builder: set ISBN
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Builder: set publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Source name, or `None` when empty
    pub fn source_name(&self) -> Option<&str> {
        Some(self.source.as_str()).filter(|s| !s.is_empty())
    }

    /// Page number, or `None` when absent or zero
    pub fn page_number(&self) -> Option<u32> {
        self.page.filter(|&p| p > 0)
    }

    /// The `[id]` marker that refers to this citation
    pub fn marker(&self) -> String {
        format!("[{}]", self.id)
    }
}

/// View an optional field, treating the empty string as absent
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Parse a run of ASCII decimal digits into a citation id
///
/// Returns `None` for an empty run, any non-digit character (including a sign),
/// or a value that does not fit in a [`CitationId`].
pub fn parse_citation_id(digits: &str) -> Option<CitationId> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<CitationId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => parse_citation_id(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid citation id: {s:?}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuthors {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_authors<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawAuthors>::deserialize(deserializer)?.map(|raw| match raw {
            RawAuthors::Joined(s) => s,
            RawAuthors::List(list) => list.join(", "),
        }),
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Number(i64),
    Text(String),
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawYear>::deserialize(deserializer)?.map(|raw| match raw {
            RawYear::Number(n) => n.to_string(),
            RawYear::Text(s) => s,
        }),
    )
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
