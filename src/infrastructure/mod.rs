//! Infrastructure layer - filesystem vault and settings persistence

pub mod config;
pub mod vault;

pub use config::Settings;
pub use vault::{FileSystemVault, NoteRef, Vault};
