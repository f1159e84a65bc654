//! CMC Citations - citation-aware rendering for regulatory documents
//!
//! This crate is the citation engine behind the CMC regulatory writer:
//!
//! - **Markers**: Resolve inline `[n]` markers against a document's citation
//!   collection into plain-text and citation segments
//! - **Formatter**: Format a citation as a single bibliographic line and order
//!   collections for display
//! - **References**: Build the global references section (formatted lines plus
//!   DOI/URL/ISBN links, tags, and notes)
//! - **Preview**: Details shown for an inline marker on hover
//! - **Content**: Paragraph/line layout of section content
//! - **Render**: Whole-document rendering under the reader's settings
//! - **Settings**: Citation display preferences loaded from TOML
//! - **Source**: The `CitationSource` seam to whatever stores documents
//!
//! Everything except settings and document loading is pure and infallible:
//! malformed or dangling markers degrade to plain text and a citation with no
//! fields formats as `"."`.

pub mod content;
pub mod error;
pub mod formatter;
pub mod markers;
pub mod preview;
pub mod references;
pub mod render;
pub mod settings;
pub mod source;

pub use content::*;
pub use error::*;
pub use formatter::*;
pub use markers::*;
pub use preview::*;
pub use references::*;
pub use render::*;
pub use settings::*;
pub use source::*;
