//! cmc-citations command-line tool
//!
//! Renders stored CMC documents with inline citations resolved, prints their
//! references lists, and checks citation collections.
//!
//! Input is the stored document list as JSON (an array of documents, or one
//! document). Set `RUST_LOG=debug` for diagnostics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use cmc_citations::{
    load_documents_from_path, render_document, unresolved_markers, CitationIndex,
    CitationSettings, CitationSource, RenderedDocument,
};
use cmc_domain::{validate_collection, ValidationSeverity};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmc-citations", version, about = "Render and check citations in CMC documents")]
struct Cli {
    /// Settings file (defaults to <config dir>/cmc-citations/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render document sections with citation markers resolved
    Render {
        /// Stored documents JSON
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the references list of each document
    References {
        /// Stored documents JSON
        path: PathBuf,
    },
    /// Validate citation collections and report dangling markers
    Check {
        /// Stored documents JSON
        path: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = CitationSettings::load_or_default(cli.settings.as_deref());
    debug!(?settings, "citation settings");

    match cli.command {
        Command::Render { path, format } => render(&path, format, &settings),
        Command::References { path } => references(&path),
        Command::Check { path } => check(&path),
    }
}

fn render(
    path: &Path,
    format: OutputFormat,
    settings: &CitationSettings,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let documents = load_documents_from_path(path)?;

    let rendered: Vec<RenderedDocument<'_>> = documents
        .iter()
        .map(|document| render_document(document, settings))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rendered)?),
        OutputFormat::Text => {
            for document in &rendered {
                println!("{}", document.to_text());
                println!();
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn references(path: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    for document in load_documents_from_path(path)? {
        println!("# {}", document.name());
        println!("{}", document.reference_list().render_text());
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn check(path: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut errors = 0usize;

    for document in load_documents_from_path(path)? {
        for issue in validate_collection(&document.citations) {
            if issue.is_error() {
                errors += 1;
            }
            let severity = match issue.severity {
                ValidationSeverity::Error => "error",
                ValidationSeverity::Warning => "warning",
                ValidationSeverity::Info => "info",
            };
            println!(
                "{}: [{}] {}: {} ({})",
                document.title, issue.citation_id, issue.field, issue.message, severity
            );
        }

        let index = CitationIndex::new(&document.citations);
        for section in &document.sections {
            for marker in unresolved_markers(&section.content, &index) {
                println!(
                    "{}: section '{}' cites {} with no matching citation (warning)",
                    document.title, section.title, marker
                );
            }
        }
    }

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
