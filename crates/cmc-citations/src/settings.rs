//! Citation display settings
//!
//! Settings are read from a TOML file; any missing key takes its default:
//!
//! ```toml
//! hoverable_inline_citations = true
//! global_references_section = true
//! citation_style = "APA"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

const SETTINGS_DIR: &str = "cmc-citations";
const SETTINGS_FILE: &str = "settings.toml";

/// Citation style selected in the settings panel
///
/// Recorded for the display layer; reference lines always use the single
/// canonical format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationStyle {
    #[default]
    #[serde(rename = "APA")]
    Apa,
    Chicago,
    #[serde(rename = "IEEE")]
    Ieee,
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Apa => "APA",
            Self::Chicago => "Chicago",
            Self::Ieee => "IEEE",
        };
        f.write_str(name)
    }
}

/// How citations are presented in a rendered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationSettings {
    /// Show a preview when the reader inspects an inline marker
    pub hoverable_inline_citations: bool,
    /// Append the references list after the document body
    pub global_references_section: bool,
    pub citation_style: CitationStyle,
}

impl Default for CitationSettings {
    fn default() -> Self {
        Self {
            hoverable_inline_citations: true,
            global_references_section: true,
            citation_style: CitationStyle::Apa,
        }
    }
}

impl CitationSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize settings to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Load settings from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Write settings to a TOML file, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Load from `path`, or the default location when `None`
    ///
    /// Falls back to defaults when no file exists or the file is invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_settings_path) else {
            debug!("no settings location available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded citation settings");
                settings
            }
            Err(e) => {
                warn!("Failed to load settings from {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// `<config dir>/cmc-citations/settings.toml`, if the platform has a config dir
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}
