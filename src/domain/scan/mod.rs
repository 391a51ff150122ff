//! Indentation-aware scanners over raw note text
//!
//! Two extraction strategies share the same tag matching rules: the unit
//! scanner pulls the smallest sentence/line unit around a match, the bullet
//! scanner pulls whole bullet subtrees.

pub mod bullets;
pub mod units;

pub use bullets::scan_bullets;
pub use units::scan_units;

use crate::domain::tag::Tag;

/// One extracted occurrence: the literal variant that matched and the
/// captured text (a prose unit or a serialized bullet subtree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHit {
    pub variant: Tag,
    pub text: String,
}

/// A line is a bullet when its content starts with the `- ` marker.
pub(crate) fn is_bullet_line(line: &str) -> bool {
    line.trim_start().starts_with("- ")
}

/// Indentation measured as the raw count of leading whitespace characters.
/// Tabs and spaces each count as one; mixed documents are compared by
/// character count, not visual width.
pub(crate) fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
