//! Domain types for the CMC regulatory writer
//!
//! This crate provides the value types shared by the citation engine and its
//! collaborators:
//! - Citation: a bibliographic record behind an inline `[n]` marker
//! - StoredDocument / GeneratedDocument: document shapes kept by the editor's store
//! - Validation: advisory checks mirroring the backend's citation constraints

pub mod citation;
pub mod document;
pub mod validation;

pub use citation::*;
pub use document::*;
pub use validation::*;
