//! Tag page generation use case
//!
//! Orchestrates the full workflow: list the corpus, exclude this tag's own
//! generated page(s), scan, synthesize against any previous page text, and
//! write the result.

use crate::domain::frontmatter;
use crate::domain::group::{scan_corpus, NoteSnapshot, ScanMode, SortOrder};
use crate::domain::synthesis::synthesize_document;
use crate::domain::tag::TagPattern;
use crate::error::{Result, TagPageError};
use crate::infrastructure::vault::{NoteRef, Vault};
use crate::infrastructure::FileSystemVault;
use std::path::PathBuf;

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Tag of interest, exact (`#work`) or wildcard (`#project/*`)
    pub tag: String,

    /// Output file path (None = `<tag_page_dir>/<tag>.md`)
    pub output: Option<PathBuf>,

    /// Scan mode override for this run
    pub mode: Option<ScanMode>,

    /// Sort override for this run
    pub sort: Option<SortOrder>,
}

/// Service for building and refreshing tag pages
pub struct GenerateService {
    vault: FileSystemVault,
}

impl GenerateService {
    pub fn new(vault: FileSystemVault) -> Self {
        GenerateService { vault }
    }

    /// Execute one generation.
    ///
    /// Returns the path of the written tag page.
    ///
    /// # Errors
    ///
    /// Returns an error if the output path escapes the vault, the vault is
    /// unreadable, or a brand-new page would have no content at all.
    pub fn execute(&self, options: GenerateOptions) -> Result<PathBuf> {
        let pattern = TagPattern::parse(&options.tag);
        let settings = self.vault.load_settings()?;
        let mode = options.mode.unwrap_or(settings.mode);
        let sort = options.sort.unwrap_or(settings.sort);

        let output_path = match options.output {
            Some(path) if path.is_absolute() => path,
            Some(path) => self.vault.root().join(path),
            None => self
                .vault
                .root()
                .join(&settings.tag_page_dir)
                .join(format!("{}.md", page_filename(&pattern))),
        };

        let relative = output_path
            .strip_prefix(self.vault.root())
            .map_err(|_| {
                TagPageError::Config("Output path must be within the vault".to_string())
            })?
            .to_path_buf();

        // Prior page text, for marker-region splicing.
        let output_ref = NoteRef::new(relative.clone());
        let previous = if output_path.exists() {
            Some(self.vault.read_note(&output_ref)?)
        } else {
            None
        };

        let notes = self.vault.list_notes()?;
        let mut snapshots: Vec<NoteSnapshot> = Vec::new();
        let mut frontmatter_files: Vec<String> = Vec::new();

        for note in &notes {
            if note.identity == relative {
                continue;
            }
            // A page generated for this same tag must not feed itself.
            if let Some(query) = self.vault.tag_page_query(note, &settings.frontmatter_key)? {
                if is_same_query(&query, &pattern) {
                    continue;
                }
            }

            let text = self.vault.read_note(note)?;
            if frontmatter::structured_tags(&text)
                .iter()
                .any(|tag| pattern.matches_structured(tag))
            {
                frontmatter_files.push(note.link());
            }

            snapshots.push(NoteSnapshot {
                link: note.link(),
                path: note.identity.clone(),
                text,
                timestamp: self.vault.note_timestamp(note),
            });
        }

        let group = scan_corpus(&snapshots, &pattern, mode, sort);

        if group.is_empty() && frontmatter_files.is_empty() && previous.is_none() {
            return Err(TagPageError::TagNotFound(options.tag));
        }

        let text = synthesize_document(
            &group,
            &pattern,
            &settings.synthesis_options(),
            &frontmatter_files,
            previous.as_deref(),
            &self.vault,
        );

        let relative_str = relative
            .to_str()
            .ok_or_else(|| TagPageError::Config("Invalid output path".to_string()))?;
        self.vault.write_note(relative_str, &text)?;

        Ok(output_path)
    }
}

/// Recorded front-matter query against the running query: same cleaned tag
/// and same wildcard-ness mean the same page.
fn is_same_query(recorded: &str, pattern: &TagPattern) -> bool {
    let recorded = TagPattern::parse(recorded);
    recorded.tag() == pattern.tag() && recorded.is_wildcard() == pattern.is_wildcard()
}

/// Default page filename for a query. Nested path separators become
/// hyphens; wildcard queries get an `-all` suffix so `#p` and `#p/*` pages
/// do not collide.
fn page_filename(pattern: &TagPattern) -> String {
    let base: String = pattern
        .tag()
        .name()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            '/' => '-',
            _ => '_',
        })
        .collect();
    let base = base.trim_matches('_').to_string();
    if pattern.is_wildcard() {
        format!("{}-all", base)
    } else {
        base
    }
}
