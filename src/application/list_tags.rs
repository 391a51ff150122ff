//! Enumerate every tag in the vault, inline and structured

use crate::domain::frontmatter;
use crate::domain::inventory;
use crate::domain::tag::Tag;
use crate::error::Result;
use crate::infrastructure::vault::Vault;
use crate::infrastructure::FileSystemVault;

pub struct ListTagsService {
    vault: FileSystemVault,
}

impl ListTagsService {
    pub fn new(vault: FileSystemVault) -> Self {
        ListTagsService { vault }
    }

    /// All distinct tags across the vault, alphabetical.
    pub fn execute(&self) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = Vec::new();

        for note in self.vault.list_notes()? {
            let text = self.vault.read_note(&note)?;
            let inline = inventory::collect_inline_tags(&text);
            let structured = frontmatter::structured_tags(&text);
            for tag in inline.into_iter().chain(structured) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        tags.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(tags)
    }
}
