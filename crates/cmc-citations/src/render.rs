//! Document rendering under the reader's citation settings
//!
//! A [`RenderedDocument`] is a stored document with every section laid out and
//! resolved. Settings decide whether the references section is attached and
//! whether hover previews are listed in the text output.

use cmc_domain::StoredDocument;
use serde::Serialize;
use tracing::warn;

use crate::content::{layout_with_index, Paragraph};
use crate::markers::{unresolved_markers, CitationIndex};
use crate::preview::CitationPreview;
use crate::references::ReferenceList;
use crate::settings::CitationSettings;
use crate::source::CitationSource;

/// Indent of a hover preview line under the line it belongs to
const PREVIEW_INDENT: &str = "    ";

#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub paragraphs: Vec<Paragraph<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub sections: Vec<RenderedSection<'a>>,
    /// Present only when the global references section is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<ReferenceList>,
    #[serde(skip)]
    hover_previews: bool,
}

/// Lay out every section of `document` and attach what `settings` asks for
///
/// Markers with no matching citation are logged once per section.
pub fn render_document<'a>(
    document: &'a StoredDocument,
    settings: &CitationSettings,
) -> RenderedDocument<'a> {
    let index = CitationIndex::new(&document.citations);

    let sections = document
        .sections
        .iter()
        .map(|section| {
            let dangling = unresolved_markers(&section.content, &index);
            if !dangling.is_empty() {
                warn!(
                    "Section '{}' of '{}' has unresolved markers: {}",
                    section.title,
                    document.title,
                    dangling.join(" ")
                );
            }
            RenderedSection {
                id: &section.id,
                title: &section.title,
                paragraphs: layout_with_index(&section.content, &index),
            }
        })
        .collect();

    RenderedDocument {
        id: &document.id,
        title: &document.title,
        sections,
        references: settings
            .global_references_section
            .then(|| document.reference_list()),
        hover_previews: settings.hoverable_inline_citations,
    }
}

impl RenderedDocument<'_> {
    /// Plain-text rendition: headings, lines, optional previews and references
    ///
    /// Each citation gets at most one preview line per text line.
    pub fn to_text(&self) -> String {
        let mut out = vec![format!("# {}", self.title)];

        for section in &self.sections {
            out.push(String::new());
            out.push(format!("## {}", section.title));

            for paragraph in &section.paragraphs {
                out.push(String::new());
                for line in &paragraph.lines {
                    out.push(line.plain_text());
                    if !self.hover_previews {
                        continue;
                    }

                    let mut shown = Vec::new();
                    for citation in line.citations() {
                        if shown.contains(&citation.id) {
                            continue;
                        }
                        shown.push(citation.id);
                        let preview = CitationPreview::from_citation(citation);
                        out.push(format!(
                            "{PREVIEW_INDENT}{} {}",
                            citation.marker(),
                            preview.lines().join("; ")
                        ));
                    }
                }
            }
        }

        if let Some(references) = &self.references {
            out.push(String::new());
            out.push(references.render_text());
        }

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmc_domain::{Citation, DocumentSection};

    fn document() -> StoredDocument {
        StoredDocument::new("doc-1", "Specification")
            .with_section(DocumentSection::new(
                "s-1",
                "3.2.S.4",
                "Limits follow [1] and [1].\n\nSee [9].",
            ))
            .with_citation(Citation::new(1, "t", "ICH Q6A").with_title("Specifications"))
    }

    fn settings(hoverable: bool, references: bool) -> CitationSettings {
        CitationSettings {
            hoverable_inline_citations: hoverable,
            global_references_section: references,
            ..CitationSettings::default()
        }
    }

    #[test]
    fn test_render_with_defaults() {
        let document = document();
        let rendered = render_document(&document, &CitationSettings::default());

        assert_eq!(rendered.sections.len(), 1);
        assert_eq!(rendered.sections[0].paragraphs.len(), 2);
        assert_eq!(
            rendered.to_text(),
            "# Specification\n\n## 3.2.S.4\n\nLimits follow [1] and [1].\n    [1] Specifications; Source: ICH Q6A\n\nSee [9].\n\nReferences\n[1] \"Specifications\". ICH Q6A."
        );
    }

    #[test]
    fn test_bare_text_without_previews_or_references() {
        let document = document();
        let rendered = render_document(&document, &settings(false, false));

        assert!(rendered.references.is_none());
        assert_eq!(
            rendered.to_text(),
            "# Specification\n\n## 3.2.S.4\n\nLimits follow [1] and [1].\n\nSee [9]."
        );
    }

    #[test]
    fn test_references_omitted_from_json() {
        let document = document();
        let rendered = render_document(&document, &settings(true, false));
        let json = serde_json::to_value(&rendered).unwrap();

        assert!(json.get("references").is_none());
        assert!(json.get("hover_previews").is_none());
        assert_eq!(json["sections"][0]["title"], "3.2.S.4");
    }
}
