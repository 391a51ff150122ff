//! Generated-region detection in previously written tag pages
//!
//! A tag page owns only the text between its marker pair; everything the
//! user wrote around it must survive regeneration. The splitter is a
//! two-state scan over the document and produces a tagged union so callers
//! cannot forget the unmarked case.

use crate::domain::frontmatter;

/// Opens the generator-owned region
pub const REGION_START: &str = "<!-- tagpage:start -->";
/// Closes the generator-owned region
pub const REGION_END: &str = "<!-- tagpage:end -->";
/// Older pages carried a single marker; everything after it is
/// generator-owned.
pub const LEGACY_MARKER: &str = "<!-- tagpage -->";

/// Result of locating the generated region in prior document text.
///
/// `before`/`after` exclude any leading front-matter block; the caller
/// re-attaches front matter itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousDocument {
    /// No recognizable region; the whole previous body is disposable
    Unmarked,
    /// Region found; surrounding text preserved verbatim
    Marked { before: String, after: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    SeekingOpen,
    InsideRegion,
}

/// Locate the generated region in `text`.
///
/// An open marker without a close marker is treated as unparseable and
/// degrades to [`PreviousDocument::Unmarked`], so regeneration replaces the
/// document wholesale rather than failing.
pub fn split_region(text: &str) -> PreviousDocument {
    let body_start = frontmatter::extract(text).map(|(_, offset)| offset).unwrap_or(0);
    let body = &text[body_start..];

    let mut state = SplitState::SeekingOpen;
    let mut before_end = 0;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        let content = line.trim();
        match state {
            SplitState::SeekingOpen => {
                if content == REGION_START {
                    before_end = offset;
                    state = SplitState::InsideRegion;
                } else if content == LEGACY_MARKER {
                    return PreviousDocument::Marked {
                        before: body[..offset].to_string(),
                        after: String::new(),
                    };
                }
            }
            SplitState::InsideRegion => {
                if content == REGION_END {
                    return PreviousDocument::Marked {
                        before: body[..before_end].to_string(),
                        after: body[offset + line.len()..].to_string(),
                    };
                }
            }
        }
        offset += line.len();
    }

    PreviousDocument::Unmarked
}
