//! Domain layer - tag matching, scanning, grouping, and page synthesis

pub mod frontmatter;
pub mod group;
pub mod inventory;
pub mod region;
pub mod scan;
pub mod synthesis;
pub mod tag;

pub use group::{scan_corpus, MatchUnit, NoteSnapshot, ScanMode, SortOrder, TagGroup};
pub use region::{split_region, PreviousDocument};
pub use synthesis::{synthesize_document, LinkPlacement, SynthesisOptions};
pub use tag::{Tag, TagPattern};
