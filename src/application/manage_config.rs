//! Settings inspection and modification use case

use crate::error::{Result, TagPageError};
use crate::infrastructure::vault::Vault;
use crate::infrastructure::{FileSystemVault, Settings};

pub struct ConfigService {
    vault: FileSystemVault,
}

impl ConfigService {
    pub fn new(vault: FileSystemVault) -> Self {
        ConfigService { vault }
    }

    pub fn list(&self) -> Result<Settings> {
        self.vault.load_settings()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let settings = self.vault.load_settings()?;
        match key {
            "mode" => Ok(settings.mode.to_string()),
            "sort" => Ok(settings.sort.to_string()),
            "link-placement" => Ok(settings.link_placement.to_string()),
            "title-template" => Ok(settings.title_template.unwrap_or_default()),
            "frontmatter-key" => Ok(settings.frontmatter_key),
            "tag-page-dir" => Ok(settings.tag_page_dir),
            _ => Err(TagPageError::Config(format!("Unknown config key: {}", key))),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut settings = self.vault.load_settings()?;
        match key {
            "mode" => settings.mode = value.parse().map_err(TagPageError::Config)?,
            "sort" => settings.sort = value.parse().map_err(TagPageError::Config)?,
            "link-placement" => {
                settings.link_placement = value.parse().map_err(TagPageError::Config)?
            }
            "title-template" => {
                settings.title_template = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "frontmatter-key" => settings.frontmatter_key = value.to_string(),
            "tag-page-dir" => settings.tag_page_dir = value.to_string(),
            _ => {
                return Err(TagPageError::Config(format!("Unknown config key: {}", key)));
            }
        }
        settings.save_to_dir(self.vault.root())
    }
}
