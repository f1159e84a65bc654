//! Hover preview for resolved inline markers
//!
//! The renderer decides when to show a preview (hover, focus, keyboard); this
//! module only decides what it contains.

use cmc_domain::{present, Citation};
use serde::Serialize;

/// Details shown when the reader inspects an inline marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationPreview {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub source: Option<String>,
    pub year: Option<String>,
    pub url: Option<String>,
}

impl CitationPreview {
    pub fn from_citation(citation: &Citation) -> Self {
        Self {
            title: present(&citation.title).map(str::to_string),
            authors: present(&citation.authors).map(str::to_string),
            source: citation.source_name().map(str::to_string),
            year: present(&citation.year).map(str::to_string),
            url: present(&citation.url).map(str::to_string),
        }
    }

    /// Detail lines under the title, in display order
    pub fn detail_lines(&self) -> Vec<String> {
        let labelled = [
            ("Authors", &self.authors),
            ("Source", &self.source),
            ("Year", &self.year),
            ("View Source", &self.url),
        ];
        labelled
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
            .collect()
    }

    /// Title followed by the detail lines
    pub fn lines(&self) -> Vec<String> {
        self.title
            .iter()
            .cloned()
            .chain(self.detail_lines())
            .collect()
    }
}
