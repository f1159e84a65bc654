//! Test fixture loading utilities

use std::path::PathBuf;

use cmc_citations::load_documents_from_path;
use cmc_domain::StoredDocument;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load the stored documents fixture
pub fn load_document_fixture() -> Vec<StoredDocument> {
    load_documents_from_path(&fixture_path("documents.json"))
        .unwrap_or_else(|e| panic!("Failed to load documents fixture: {}", e))
}
