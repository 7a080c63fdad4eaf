// File: src/config.rs
// Purpose: Localizer configuration, standalone or from the [i18n] table of rhtmx.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::route::Verb;

/// Localizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// Segment prefixes that mark dynamic segments (default: `:` and `*`)
    #[serde(default = "default_dynamic_prefixes")]
    pub dynamic_prefixes: Vec<String>,

    /// Whether duplicate routes across locales are collapsed (default: true)
    #[serde(default = "default_true")]
    pub dedupe: bool,

    /// Metadata field for template-style verbs
    #[serde(default = "default_assigns_field")]
    pub assigns_field: String,

    /// Metadata field for `live` routes
    #[serde(default = "default_live_field")]
    pub live_field: String,

    /// Key of the locale inside the metadata record
    #[serde(default = "default_locale_key")]
    pub locale_key: String,
}

/// The subset of rhtmx.toml we care about
#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    i18n: Option<LocalizerConfig>,
}

// Default values
fn default_dynamic_prefixes() -> Vec<String> {
    vec![":".to_string(), "*".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_assigns_field() -> String {
    "assigns".to_string()
}

fn default_live_field() -> String {
    "private".to_string()
}

fn default_locale_key() -> String {
    "locale".to_string()
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            dynamic_prefixes: default_dynamic_prefixes(),
            dedupe: true,
            assigns_field: default_assigns_field(),
            live_field: default_live_field(),
            locale_key: default_locale_key(),
        }
    }
}

impl LocalizerConfig {
    /// Metadata field name for a verb: `live` routes use their own field
    pub fn metadata_field(&self, verb: &Verb) -> &str {
        if verb.is_live() {
            &self.live_field
        } else {
            &self.assigns_field
        }
    }

    /// Parse a standalone localizer config
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).context("Failed to parse localizer config")
    }

    /// Parse the `[i18n]` table of a project file, defaults when absent
    pub fn from_section(content: &str) -> Result<Self> {
        let project: ProjectFile =
            toml::from_str(content).context("Failed to parse [i18n] section")?;
        Ok(project.i18n.unwrap_or_default())
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load the `[i18n]` section from ./rhtmx.toml
    pub fn load_default() -> Result<Self> {
        let path = Path::new("rhtmx.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_section(&content)
    }
}
