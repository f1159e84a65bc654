//! Document shapes kept by the editor's client-side store
//!
//! These mirror what the store persists under its document keys. They are
//! input shapes for the citation engine; nothing here reads or writes storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Citation;

/// Kind of content a section holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Text,
    Table,
}

/// One section of a regulatory document (e.g., "3.2.S.4 Control of Drug Substance")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub id: String,
    pub title: String,
    /// Free text with inline `[n]` citation markers
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
}

impl DocumentSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            kind: SectionKind::Text,
        }
    }
}

/// Review status of a stored document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Review,
    Approved,
}

/// A saved document with its sections and citation collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub title: String,
    /// Regulatory document number (e.g., "CMC-2024-001")
    #[serde(default)]
    pub doc_id: String,
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl StoredDocument {
    /// Create an empty draft stamped with the current time
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            doc_id: String::new(),
            sections: Vec::new(),
            citations: Vec::new(),
            created_at: now,
            updated_at: now,
            status: DocumentStatus::Draft,
        }
    }

    /// Builder: add a section
    pub fn with_section(mut self, section: DocumentSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Builder: add a citation
    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citations.push(citation);
        self
    }

    /// Look up a section by id
    pub fn section(&self, id: &str) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// The most recent template-generated document, kept so it survives restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    pub template_id: String,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stored_document() {
        let json = r#"{
            "id": "doc-1",
            "title": "Drug Substance Specification",
            "docId": "CMC-2024-001",
            "sections": [
                {"id": "section-1", "title": "3.2.S.4 Control of Drug Substance",
                 "content": "Specifications follow ICH Q6A [1].", "type": "text"}
            ],
            "citations": [
                {"id": 1, "text": "ICH Q6A guideline for specifications", "source": "ICH Q6A", "page": 15}
            ],
            "createdAt": "2024-01-08T10:00:00Z",
            "updatedAt": "2024-01-13T10:00:00Z",
            "status": "approved"
        }"#;

        let doc: StoredDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.doc_id, "CMC-2024-001");
        assert_eq!(doc.status, DocumentStatus::Approved);
        assert_eq!(doc.sections[0].kind, SectionKind::Text);
        assert_eq!(doc.citations[0].source, "ICH Q6A");
        assert!(doc.section("section-1").is_some());
        assert!(doc.section("missing").is_none());
    }

    #[test]
    fn test_deserialize_generated_document() {
        let json = r#"{
            "id": "gen-1",
            "title": "Module 3",
            "sections": [{"id": "s", "title": "Table", "content": "| a |", "type": "table"}],
            "citations": [],
            "templateId": "tpl-7",
            "generatedAt": "2024-03-01T09:30:00Z",
            "savedAt": "2024-03-01T09:31:00Z"
        }"#;

        let doc: GeneratedDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.template_id, "tpl-7");
        assert_eq!(doc.sections[0].kind, SectionKind::Table);
    }

    #[test]
    fn test_builder() {
        let doc = StoredDocument::new("doc-2", "Manufacture")
            .with_section(DocumentSection::new("s1", "3.2.S.2", "See [1]."))
            .with_citation(Citation::new(1, "Process description", "Batch record"));
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.citations[0].id, 1);
    }
}
