//! Grouping scanner output by matched tag variant
//!
//! Scanner hits from every note in the corpus are merged into a single
//! [`TagGroup`], keyed by the literal variant that matched. Corpus iteration
//! order fixes the order within each group; an optional timestamp sort is a
//! stable final pass.

use crate::domain::scan::{scan_bullets, scan_units};
use crate::domain::tag::{Tag, TagPattern};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which extraction strategies to run per note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Sentence/line units only
    Lines,
    /// Bullet subtrees only
    Bullets,
    /// Both, with bullet lines excluded from unit scanning
    Both,
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(ScanMode::Lines),
            "bullets" => Ok(ScanMode::Bullets),
            "both" => Ok(ScanMode::Both),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScanMode::Lines => "lines",
            ScanMode::Bullets => "bullets",
            ScanMode::Both => "both",
        };
        write!(f, "{}", s)
    }
}

/// Final ordering applied to each group's match list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Corpus iteration order, untouched
    Source,
    /// Ascending by capture timestamp; undated entries last
    Oldest,
    /// Descending by capture timestamp; undated entries last
    Newest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(SortOrder::Source),
            "oldest" => Ok(SortOrder::Oldest),
            "newest" => Ok(SortOrder::Newest),
            _ => Err(format!("Invalid sort: {}", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortOrder::Source => "source",
            SortOrder::Oldest => "oldest",
            SortOrder::Newest => "newest",
        };
        write!(f, "{}", s)
    }
}

/// One extracted match with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchUnit {
    /// Prose unit or serialized bullet subtree
    pub text: String,
    /// Rendered provenance link back to the source note
    pub source_link: String,
    /// Vault-relative path of the source note, for embed re-resolution
    pub source_path: PathBuf,
    /// Capture timestamp (source note modification time), when available
    pub timestamp: Option<DateTime<Utc>>,
}

/// An ordered snapshot of one note, ready for scanning
#[derive(Debug, Clone)]
pub struct NoteSnapshot {
    pub link: String,
    pub path: PathBuf,
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Insertion-ordered mapping from matched variant to its match list.
///
/// Keys are unique; repeated exact unit text from the same source file is
/// dropped, identical text from different files is kept.
#[derive(Debug, Clone, Default)]
pub struct TagGroup {
    entries: Vec<(Tag, Vec<MatchUnit>)>,
}

impl TagGroup {
    pub fn new() -> Self {
        TagGroup::default()
    }

    /// Append a match to its variant's list, creating the variant entry on
    /// first sight.
    pub fn insert(&mut self, variant: Tag, unit: MatchUnit) {
        let list = match self.entries.iter_mut().find(|(tag, _)| *tag == variant) {
            Some((_, list)) => list,
            None => {
                self.entries.push((variant, Vec::new()));
                &mut self.entries.last_mut().expect("just pushed").1
            }
        };
        let duplicate = list
            .iter()
            .any(|u| u.text == unit.text && u.source_path == unit.source_path);
        if !duplicate {
            list.push(unit);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variant groups
    pub fn variant_count(&self) -> usize {
        self.entries.len()
    }

    /// Total matches across all variants
    pub fn match_count(&self) -> usize {
        self.entries.iter().map(|(_, list)| list.len()).sum()
    }

    /// Matches for one variant
    pub fn get(&self, variant: &Tag) -> Option<&[MatchUnit]> {
        self.entries
            .iter()
            .find(|(tag, _)| tag == variant)
            .map(|(_, list)| list.as_slice())
    }

    /// Variant keys in section order: most general first, alphabetical ties
    pub fn variants_sorted(&self) -> Vec<&Tag> {
        let mut variants: Vec<&Tag> = self.entries.iter().map(|(tag, _)| tag).collect();
        variants.sort();
        variants
    }

    /// Stable timestamp sort over each group's list. Entries without a
    /// timestamp sort last in either direction.
    pub fn apply_sort(&mut self, order: SortOrder) {
        if order == SortOrder::Source {
            return;
        }
        for (_, list) in &mut self.entries {
            list.sort_by(|a, b| match (a.timestamp, b.timestamp) {
                (Some(ta), Some(tb)) => match order {
                    SortOrder::Newest => tb.cmp(&ta),
                    _ => ta.cmp(&tb),
                },
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
    }
}

/// Scan an ordered corpus snapshot into one [`TagGroup`].
///
/// Each note is scanned independently; merge order is the order of `notes`,
/// so output is reproducible for a given corpus iteration order. The caller
/// excludes notes that are themselves generated tag pages for this tag
/// before building the snapshot.
pub fn scan_corpus(
    notes: &[NoteSnapshot],
    pattern: &TagPattern,
    mode: ScanMode,
    sort: SortOrder,
) -> TagGroup {
    let mut group = TagGroup::new();

    for note in notes {
        let mut hits = Vec::new();
        match mode {
            ScanMode::Lines => hits.extend(scan_units(&note.text, pattern, false)),
            ScanMode::Bullets => hits.extend(scan_bullets(&note.text, pattern)),
            ScanMode::Both => {
                hits.extend(scan_units(&note.text, pattern, true));
                hits.extend(scan_bullets(&note.text, pattern));
            }
        }

        for hit in hits {
            group.insert(
                hit.variant,
                MatchUnit {
                    text: hit.text,
                    source_link: note.link.clone(),
                    source_path: note.path.clone(),
                    timestamp: note.timestamp,
                },
            );
        }
    }

    group.apply_sort(sort);
    group
}
