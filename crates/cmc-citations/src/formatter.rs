//! Reference formatting
//!
//! Converts a [`Citation`] into the single bibliographic line shown in the
//! references list, e.g.
//!
//! ```text
//! Smith J. (2023). "On Stability". *J. Pharm*. 10(2). pp. 5-10.
//! ```
//!
//! The line is built from a fixed, ordered list of field projections. Each
//! projection yields at most one part; absent or empty fields are skipped, the
//! parts are joined with `". "` and the line always ends with `"."`. There is
//! one canonical format regardless of the selected citation style.

use cmc_domain::{present, Citation};

/// A single field projection; `None` means the part is omitted
type Projection = fn(&Citation) -> Option<String>;

/// Projections in output order
const PROJECTIONS: [Projection; 7] = [
    authors_part,
    year_part,
    title_part,
    venue_part,
    volume_part,
    pages_part,
    publisher_part,
];

const PART_SEPARATOR: &str = ". ";

/// Format a citation as a single reference line
pub fn format_citation(citation: &Citation) -> String {
    let parts: Vec<String> = PROJECTIONS
        .iter()
        .filter_map(|project| project(citation))
        .collect();

    let mut result = parts.join(PART_SEPARATOR);
    result.push('.');
    result
}

/// Format a collection in display order
pub fn format_citations(citations: &[Citation]) -> Vec<String> {
    sort_for_display(citations)
        .iter()
        .map(format_citation)
        .collect()
}

/// Order citations by ascending id for display
///
/// Returns a new vector; the input is untouched. The sort is stable, so
/// citations sharing an id keep their relative order.
pub fn sort_for_display(citations: &[Citation]) -> Vec<Citation> {
    let mut sorted = citations.to_vec();
    sorted.sort_by_key(|c| c.id);
    sorted
}

fn authors_part(citation: &Citation) -> Option<String> {
    present(&citation.authors).map(str::to_string)
}

fn year_part(citation: &Citation) -> Option<String> {
    present(&citation.year).map(|year| format!("({year})"))
}

fn title_part(citation: &Citation) -> Option<String> {
    present(&citation.title).map(|title| format!("\"{title}\""))
}

/// Journal in emphasis markers, falling back to the bare source name
fn venue_part(citation: &Citation) -> Option<String> {
    match present(&citation.journal) {
        Some(journal) => Some(format!("*{journal}*")),
        None => citation.source_name().map(str::to_string),
    }
}

/// `volume` or `volume(issue)`; an issue alone is never shown
fn volume_part(citation: &Citation) -> Option<String> {
    let volume = present(&citation.volume)?;
    Some(match present(&citation.issue) {
        Some(issue) => format!("{volume}({issue})"),
        None => volume.to_string(),
    })
}

/// Page range, falling back to the single page
fn pages_part(citation: &Citation) -> Option<String> {
    match present(&citation.pages) {
        Some(pages) => Some(format!("pp. {pages}")),
        None => citation.page_number().map(|page| format!("p. {page}")),
    }
}

fn publisher_part(citation: &Citation) -> Option<String> {
    present(&citation.publisher).map(str::to_string)
}
