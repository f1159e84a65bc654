//! Global references list
//!
//! Builds the references section shown at the end of a document: every
//! citation in ascending id order, its formatted line, and the identifiers
//! that link back to the source.

use std::fmt;

use cmc_domain::{present, Citation, CitationId};
use serde::Serialize;

use crate::formatter::{format_citation, sort_for_display};

/// Shown in place of the list when a document has no citations
pub const NO_REFERENCES_MESSAGE: &str = "No references available.";

/// Heading for the references section
pub const REFERENCES_HEADING: &str = "References";

/// Resolver base for DOI links
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// A linkable identifier or provenance note under a reference line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceMetadata {
    Doi { doi: String, link: String },
    /// Only emitted when the citation has no DOI
    Url { url: String },
    Isbn { isbn: String },
    SourceFile { file_id: String },
}

impl fmt::Display for ReferenceMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doi { doi, link } => write!(f, "DOI: {doi} <{link}>"),
            Self::Url { url } => write!(f, "URL: {url}"),
            Self::Isbn { isbn } => write!(f, "ISBN: {isbn}"),
            Self::SourceFile { file_id } => write!(f, "Source: {file_id}"),
        }
    }
}

/// One entry of the references list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub id: CitationId,
    /// Marker label, e.g. `[3]`
    pub label: String,
    /// Formatted bibliographic line
    pub formatted: String,
    pub metadata: Vec<ReferenceMetadata>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl ReferenceEntry {
    pub fn from_citation(citation: &Citation) -> Self {
        Self {
            id: citation.id,
            label: citation.marker(),
            formatted: format_citation(citation),
            metadata: collect_metadata(citation),
            tags: citation.tags.clone(),
            notes: present(&citation.notes).map(str::to_string),
        }
    }
}

fn collect_metadata(citation: &Citation) -> Vec<ReferenceMetadata> {
    let mut metadata = Vec::new();

    match present(&citation.doi) {
        Some(doi) => metadata.push(ReferenceMetadata::Doi {
            doi: doi.to_string(),
            link: format!("{DOI_RESOLVER}{doi}"),
        }),
        None => {
            if let Some(url) = present(&citation.url) {
                metadata.push(ReferenceMetadata::Url {
                    url: url.to_string(),
                });
            }
        }
    }

    if let Some(isbn) = present(&citation.isbn) {
        metadata.push(ReferenceMetadata::Isbn {
            isbn: isbn.to_string(),
        });
    }

    if let Some(file_id) = present(&citation.source_file_id) {
        metadata.push(ReferenceMetadata::SourceFile {
            file_id: file_id.to_string(),
        });
    }

    metadata
}

/// The ordered references section of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceList {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceList {
    /// Build the list from a citation collection in display order
    pub fn from_citations(citations: &[Citation]) -> Self {
        let entries = sort_for_display(citations)
            .iter()
            .map(ReferenceEntry::from_citation)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as plain text for terminals and exports
    pub fn render_text(&self) -> String {
        if self.entries.is_empty() {
            return NO_REFERENCES_MESSAGE.to_string();
        }

        let mut lines = vec![REFERENCES_HEADING.to_string()];
        for entry in &self.entries {
            lines.push(format!("{} {}", entry.label, entry.formatted));
            if !entry.metadata.is_empty() {
                let metadata: Vec<String> = entry.metadata.iter().map(|m| m.to_string()).collect();
                lines.push(format!("    {}", metadata.join(" | ")));
            }
            if !entry.tags.is_empty() {
                lines.push(format!("    Tags: {}", entry.tags.join(", ")));
            }
            if let Some(notes) = &entry.notes {
                lines.push(format!("    Note: {notes}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doi_suppresses_url() {
        let citation = Citation::new(1, "t", "S")
            .with_doi("10.1000/xyz")
            .with_url("https://example.com/paper");
        let entry = ReferenceEntry::from_citation(&citation);
        assert_eq!(
            entry.metadata,
            vec![ReferenceMetadata::Doi {
                doi: "10.1000/xyz".to_string(),
                link: "https://doi.org/10.1000/xyz".to_string(),
            }]
        );
    }

    #[test]
    fn test_url_without_doi() {
        let citation = Citation::new(1, "t", "S").with_url("https://ich.org/q6a.pdf");
        let entry = ReferenceEntry::from_citation(&citation);
        assert_eq!(entry.metadata[0].to_string(), "URL: https://ich.org/q6a.pdf");
    }

    #[test]
    fn test_metadata_order() {
        let citation = Citation::new(1, "t", "S")
            .with_source_file("file-3")
            .with_isbn("978-0-12-345678-9")
            .with_doi("10.1/a");
        let kinds: Vec<String> = ReferenceEntry::from_citation(&citation)
            .metadata
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "DOI: 10.1/a <https://doi.org/10.1/a>",
                "ISBN: 978-0-12-345678-9",
                "Source: file-3",
            ]
        );
    }

    #[test]
    fn test_list_is_sorted_by_id() {
        let citations = vec![
            Citation::new(3, "c", "C"),
            Citation::new(1, "a", "A"),
            Citation::new(2, "b", "B"),
        ];
        let list = ReferenceList::from_citations(&citations);
        let labels: Vec<_> = list.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["[1]", "[2]", "[3]"]);
    }

    #[test]
    fn test_empty_list_message() {
        let list = ReferenceList::from_citations(&[]);
        assert!(list.is_empty());
        assert_eq!(list.render_text(), NO_REFERENCES_MESSAGE);
    }

    #[test]
    fn test_empty_notes_are_dropped() {
        let entry = ReferenceEntry::from_citation(&Citation::new(1, "t", "S").with_notes(""));
        assert_eq!(entry.notes, None);
    }
}
