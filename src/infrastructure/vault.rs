//! File system vault

use crate::domain::frontmatter;
use crate::domain::synthesis::EmbedResolver;
use crate::domain::tag::Tag;
use crate::error::{Result, TagPageError};
use crate::infrastructure::Settings;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A note in the vault, identified by its vault-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRef {
    /// Vault-relative path
    pub identity: PathBuf,
    /// File stem, used for display and link rendering
    pub display_name: String,
}

impl NoteRef {
    pub fn new(identity: PathBuf) -> Self {
        let display_name = identity
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        NoteRef {
            identity,
            display_name,
        }
    }

    /// Provenance wikilink back to this note
    pub fn link(&self) -> String {
        format!("[[{}]]", self.display_name)
    }
}

/// Abstract vault of markdown notes
pub trait Vault {
    /// Root directory of the vault
    fn root(&self) -> &Path;

    /// Load settings from `.tagpage/config.toml`
    fn load_settings(&self) -> Result<Settings>;

    /// Every markdown note, in a deterministic order
    fn list_notes(&self) -> Result<Vec<NoteRef>>;

    /// Full note content
    fn read_note(&self, note: &NoteRef) -> Result<String>;

    /// Note modification time, when the filesystem provides one
    fn note_timestamp(&self, note: &NoteRef) -> Option<DateTime<Utc>>;

    /// Tags from the note's structured front matter, not inline text
    fn structured_tags(&self, note: &NoteRef) -> Result<Vec<Tag>>;

    /// The query recorded under `key` when the note is a generated tag page
    fn tag_page_query(&self, note: &NoteRef, key: &str) -> Result<Option<String>>;

    /// Write a note at a vault-relative path, creating parent directories
    fn write_note(&self, relative: &str, content: &str) -> Result<()>;
}

/// File system implementation of [`Vault`]
#[derive(Debug, Clone)]
pub struct FileSystemVault {
    pub root: PathBuf,
}

impl FileSystemVault {
    pub fn new(root: PathBuf) -> Self {
        FileSystemVault { root }
    }

    /// Discover the vault root: `TAGPAGE_ROOT` first, then walking up from
    /// the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGPAGE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_tagpage_dir(&path) {
                return Ok(FileSystemVault::new(path));
            } else {
                return Err(TagPageError::Config(format!(
                    "TAGPAGE_ROOT is set to '{}' but no .tagpage directory found. \
                    Run 'tagpage init' in that directory or unset TAGPAGE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the vault root by walking up from a starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_tagpage_dir(&current) {
                return Ok(FileSystemVault::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(TagPageError::NotVaultDirectory(start.to_path_buf()));
                }
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_tagpage_dir(&self.root)
    }

    fn has_tagpage_dir(path: &Path) -> bool {
        path.join(".tagpage").is_dir()
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
            && entry.depth() > 0
    }
}

impl Vault for FileSystemVault {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_settings(&self) -> Result<Settings> {
        Settings::load_from_dir(&self.root)
    }

    fn list_notes(&self) -> Result<Vec<NoteRef>> {
        let mut notes = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                TagPageError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walkdir error")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walked entries live under root")
                .to_path_buf();
            notes.push(NoteRef::new(relative));
        }

        Ok(notes)
    }

    fn read_note(&self, note: &NoteRef) -> Result<String> {
        let content = fs::read_to_string(self.root.join(&note.identity))?;
        // Line-feed normalized content for the scanners.
        Ok(content.replace("\r\n", "\n"))
    }

    fn note_timestamp(&self, note: &NoteRef) -> Option<DateTime<Utc>> {
        let metadata = fs::metadata(self.root.join(&note.identity)).ok()?;
        let modified = metadata.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }

    fn structured_tags(&self, note: &NoteRef) -> Result<Vec<Tag>> {
        let text = self.read_note(note)?;
        Ok(frontmatter::structured_tags(&text))
    }

    fn tag_page_query(&self, note: &NoteRef, key: &str) -> Result<Option<String>> {
        let text = self.read_note(note)?;
        Ok(frontmatter::key_value(&text, key))
    }

    fn write_note(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

impl EmbedResolver for FileSystemVault {
    /// A target resolves when it exists relative to the source note's
    /// directory, or failing that relative to the vault root. The returned
    /// path is vault-relative and normalized.
    fn resolve(&self, from: &Path, target: &str) -> Option<PathBuf> {
        let source_dir = from.parent().unwrap_or_else(|| Path::new(""));
        let candidates = [
            normalize(&source_dir.join(target)),
            normalize(Path::new(target)),
        ];
        candidates
            .into_iter()
            .find(|candidate| self.root.join(candidate).is_file())
    }
}

/// Lexical normalization: `.` dropped, `..` pops. Never consults the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<std::ffi::OsString> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => parts.push(s.to_os_string()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts.iter().collect()
}
