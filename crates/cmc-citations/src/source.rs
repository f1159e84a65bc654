//! Citation sources
//!
//! The engine does not own storage. Anything that holds a citation collection
//! (a stored document, the last generated document, an in-memory list)
//! implements [`CitationSource`] and hands its collection to the resolver and
//! the references list.
//!
//! # Example
//!
//! ```
//! use cmc_citations::{CitationSource, InMemorySource};
//! use cmc_domain::Citation;
//!
//! let source = InMemorySource::new("draft", vec![Citation::new(2, "t", "B"), Citation::new(1, "t", "A")]);
//! let references = source.reference_list();
//! assert_eq!(references.entries()[0].label, "[1]");
//! ```

use std::fs;
use std::path::Path;

use cmc_domain::{Citation, GeneratedDocument, StoredDocument};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::markers::{resolve, Segment};
use crate::references::ReferenceList;

/// Something that supplies a document's citation collection
pub trait CitationSource {
    /// Name for display and log messages
    fn name(&self) -> &str;

    /// The citation collection, in stored order
    fn citations(&self) -> &[Citation];

    /// Resolve markers in `text` against this source's citations
    fn resolve<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        resolve(text, self.citations())
    }

    /// The references list for this source
    fn reference_list(&self) -> ReferenceList {
        ReferenceList::from_citations(self.citations())
    }
}

impl CitationSource for StoredDocument {
    fn name(&self) -> &str {
        &self.title
    }

    fn citations(&self) -> &[Citation] {
        &self.citations
    }
}

impl CitationSource for GeneratedDocument {
    fn name(&self) -> &str {
        &self.title
    }

    fn citations(&self) -> &[Citation] {
        &self.citations
    }
}

/// A named citation collection held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    citations: Vec<Citation>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            name: name.into(),
            citations,
        }
    }

    /// Add a citation to the collection
    pub fn push(&mut self, citation: Citation) {
        self.citations.push(citation);
    }
}

impl CitationSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn citations(&self) -> &[Citation] {
        &self.citations
    }
}

/// Parse stored documents from JSON (an array, or a single document)
///
/// Citations without a readable numeric id are dropped with a warning; the
/// rest of the document still loads.
pub fn load_documents(json: &str) -> Result<Vec<StoredDocument>> {
    let documents = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .map(parse_document)
            .collect::<Result<Vec<_>>>()?,
        single => vec![parse_document(single)?],
    };
    debug!(count = documents.len(), "parsed stored documents");
    Ok(documents)
}

fn parse_document<T: DeserializeOwned>(mut document: Value) -> Result<T> {
    drop_unreadable_citations(&mut document);
    Ok(serde_json::from_value(document)?)
}

/// Remove citation records that do not deserialize, e.g. absent or `"cit-2"` ids
fn drop_unreadable_citations(document: &mut Value) {
    let title = document
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let Some(Value::Array(citations)) = document.get_mut("citations") else {
        return;
    };

    citations.retain(|citation| match Citation::deserialize(citation) {
        Ok(_) => true,
        Err(err) => {
            let id = citation
                .get("id")
                .map_or_else(|| "none".to_string(), Value::to_string);
            warn!(document = %title, id = %id, "Skipping unreadable citation: {err}");
            false
        }
    });
}

/// Read and parse stored documents from a JSON file
pub fn load_documents_from_path(path: &Path) -> Result<Vec<StoredDocument>> {
    let json = fs::read_to_string(path)?;
    load_documents(&json)
}

/// Parse the saved generated document from JSON
pub fn load_generated_document(json: &str) -> Result<GeneratedDocument> {
    parse_document(serde_json::from_str(json)?)
}
