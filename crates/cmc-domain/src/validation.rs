//! Validation for citations
//!
//! Advisory checks that mirror the backend's constraints on citation records.
//! The resolver and formatter never call these; they tolerate anything.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{present, Citation, CitationId};

/// Severity of a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

/// A validation error, warning, or hint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub citation_id: CitationId,
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    fn new(
        citation_id: CitationId,
        field: &str,
        message: impl Into<String>,
        severity: ValidationSeverity,
    ) -> Self {
        Self {
            citation_id,
            field: field.to_string(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }
}

/// Validate a citation and return errors/warnings
pub fn validate_citation(citation: &Citation) -> Vec<ValidationIssue> {
    let id = citation.id;
    let mut issues = Vec::new();

    // Required fields
    if citation.text.trim().is_empty() {
        issues.push(ValidationIssue::new(
            id,
            "text",
            "Citation text is required",
            ValidationSeverity::Error,
        ));
    }

    if citation.source.trim().is_empty() {
        issues.push(ValidationIssue::new(
            id,
            "source",
            "Citation source is required",
            ValidationSeverity::Error,
        ));
    }

    if citation.page == Some(0) {
        issues.push(ValidationIssue::new(
            id,
            "page",
            "Page numbers start at 1",
            ValidationSeverity::Error,
        ));
    }

    if let Some(doi) = present(&citation.doi) {
        if !doi.starts_with("10.") {
            issues.push(ValidationIssue::new(
                id,
                "doi",
                "DOI should start with '10.'",
                ValidationSeverity::Warning,
            ));
        }
    }

    if present(&citation.issue).is_some() && present(&citation.volume).is_none() {
        issues.push(ValidationIssue::new(
            id,
            "issue",
            "Issue is not shown without a volume",
            ValidationSeverity::Warning,
        ));
    }

    // Hints for a fuller reference entry
    if present(&citation.title).is_none() {
        issues.push(ValidationIssue::new(
            id,
            "title",
            "Title is recommended",
            ValidationSeverity::Info,
        ));
    }

    if present(&citation.authors).is_none() {
        issues.push(ValidationIssue::new(
            id,
            "authors",
            "Authors are recommended",
            ValidationSeverity::Info,
        ));
    }

    issues
}

/// Validate every citation in a collection, including id uniqueness
pub fn validate_collection(citations: &[Citation]) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for citation in citations {
        if !seen.insert(citation.id) {
            issues.push(ValidationIssue::new(
                citation.id,
                "id",
                format!("Duplicate citation id {}", citation.id),
                ValidationSeverity::Error,
            ));
        }
        issues.extend(validate_citation(citation));
    }

    issues
}

/// Check if a citation is valid (no errors)
pub fn is_valid(citation: &Citation) -> bool {
    !validate_citation(citation).iter().any(ValidationIssue::is_error)
}
