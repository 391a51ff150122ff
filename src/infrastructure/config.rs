//! Settings management

use crate::domain::group::{ScanMode, SortOrder};
use crate::domain::synthesis::{LinkPlacement, SynthesisOptions};
use crate::error::{Result, TagPageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_frontmatter_key() -> String {
    "tag-page-query".to_string()
}

fn default_tag_page_dir() -> String {
    "tag-pages".to_string()
}

/// Vault-level settings, persisted at `.tagpage/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Extraction strategy: lines, bullets, or both
    pub mode: ScanMode,
    /// Final per-group ordering
    pub sort: SortOrder,
    /// Provenance link position on match lines
    pub link_placement: LinkPlacement,
    /// Title template ({{tag}}, {{name}}, {{br}}); default title when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_template: Option<String>,
    /// Front-matter key recording a page's query tag
    #[serde(default = "default_frontmatter_key")]
    pub frontmatter_key: String,
    /// Directory (vault-relative) where generated pages land
    #[serde(default = "default_tag_page_dir")]
    pub tag_page_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: ScanMode::Both,
            sort: SortOrder::Source,
            link_placement: LinkPlacement::End,
            title_template: None,
            frontmatter_key: default_frontmatter_key(),
            tag_page_dir: default_tag_page_dir(),
        }
    }
}

impl Settings {
    /// Load settings from `.tagpage/config.toml` in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".tagpage").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagPageError::NotVaultDirectory(path.to_path_buf())
            } else {
                TagPageError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save settings to `.tagpage/config.toml` in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let tagpage_dir = path.join(".tagpage");
        let config_path = tagpage_dir.join("config.toml");

        if !tagpage_dir.exists() {
            fs::create_dir(&tagpage_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// The slice of settings the synthesizer consumes
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            title_template: self.title_template.clone(),
            link_placement: self.link_placement,
            frontmatter_key: self.frontmatter_key.clone(),
        }
    }
}
