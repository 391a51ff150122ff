//! Vault initialization use case

use crate::error::{Result, TagPageError};
use crate::infrastructure::Settings;
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Create `.tagpage/config.toml` with default settings.
    pub fn execute(path: &Path) -> Result<()> {
        if path.join(".tagpage").exists() {
            return Err(TagPageError::Config(format!(
                "Already a tagpage vault: {}",
                path.display()
            )));
        }

        fs::create_dir_all(path)?;
        Settings::default().save_to_dir(path)?;

        Ok(())
    }
}
