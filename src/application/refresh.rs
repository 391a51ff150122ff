//! Regenerate every existing tag page in the vault
//!
//! A generated page records its query under the configured front-matter
//! key; refresh finds each such note and reruns generation in place.

use crate::application::generate::{GenerateOptions, GenerateService};
use crate::error::Result;
use crate::infrastructure::vault::Vault;
use crate::infrastructure::FileSystemVault;
use std::path::PathBuf;

pub struct RefreshService {
    vault: FileSystemVault,
}

impl RefreshService {
    pub fn new(vault: FileSystemVault) -> Self {
        RefreshService { vault }
    }

    /// Regenerate all tag pages. Returns the refreshed paths in vault
    /// order.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let settings = self.vault.load_settings()?;
        let generator = GenerateService::new(self.vault.clone());
        let mut refreshed = Vec::new();

        for note in self.vault.list_notes()? {
            let Some(query) = self
                .vault
                .tag_page_query(&note, &settings.frontmatter_key)?
            else {
                continue;
            };

            let path = generator.execute(GenerateOptions {
                tag: query,
                output: Some(note.identity.clone()),
                mode: None,
                sort: None,
            })?;
            refreshed.push(path);
        }

        Ok(refreshed)
    }
}
