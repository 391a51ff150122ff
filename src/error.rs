//! Error types for tagpage

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tagpage application
#[derive(Debug, Error)]
pub enum TagPageError {
    #[error("Not a tagpage vault: {0}")]
    NotVaultDirectory(PathBuf),

    #[error("No matches for tag: {0}")]
    TagNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TagPageError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagPageError::NotVaultDirectory(_) => 2,
            TagPageError::TagNotFound(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagPageError::NotVaultDirectory(path) => {
                format!(
                    "Not a tagpage vault: {}\n\n\
                    Suggestions:\n\
                    • Run 'tagpage init' in this directory to set up a vault\n\
                    • Navigate to an existing vault\n\
                    • Set TAGPAGE_ROOT environment variable to your vault path",
                    path.display()
                )
            }
            TagPageError::TagNotFound(tag) => {
                format!(
                    "No occurrences found for tag: '{}'\n\n\
                    Suggestions:\n\
                    • Check the tag spelling (matching is case-insensitive)\n\
                    • Use 'tagpage tags' to see every tag in the vault\n\
                    • For nested tags, try a wildcard (e.g., '#project/*')",
                    tag
                )
            }
            TagPageError::Config(msg) => {
                if msg.contains("Invalid mode") {
                    format!(
                        "{}\n\n\
                        Valid modes: lines, bullets, both\n\
                        Example: tagpage config mode bullets",
                        msg
                    )
                } else if msg.contains("Invalid sort") {
                    format!(
                        "{}\n\n\
                        Valid sort orders: source, oldest, newest\n\
                        Example: tagpage config sort newest",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagPageError
pub type Result<T> = std::result::Result<T, TagPageError>;
