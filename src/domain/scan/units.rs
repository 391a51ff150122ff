//! Smallest-unit extraction around tag matches
//!
//! A unit is the smallest self-contained span of text containing a match,
//! delimited by `.`, `!`, `?`, a line break, or the string boundary.

use super::{is_bullet_line, ScanHit};
use crate::domain::tag::TagPattern;
use std::collections::HashSet;

/// Scan `text` for the smallest sentence/line units containing a tag match.
///
/// Two matches inside the same unit report that unit once, keyed under the
/// first match's variant. With `exclude_bullets` set, units that are
/// themselves bullet lines are skipped so they are not double-counted when
/// bullet-subtree extraction runs alongside.
///
/// # Examples
///
/// ```
/// use tagpage::domain::scan::scan_units;
/// use tagpage::domain::tag::TagPattern;
///
/// let pattern = TagPattern::parse("#errand");
/// let hits = scan_units("Buy milk #errand today. Unrelated.", &pattern, false);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].text, "Buy milk #errand today.");
/// ```
pub fn scan_units(text: &str, pattern: &TagPattern, exclude_bullets: bool) -> Vec<ScanHit> {
    let mut hits = Vec::new();
    let mut seen_units: HashSet<usize> = HashSet::new();

    for m in pattern.find_all(text) {
        let (start, end) = unit_bounds(text, m.start);
        if !seen_units.insert(start) {
            continue;
        }
        let unit = text[start..end].trim();
        if unit.is_empty() {
            continue;
        }
        if exclude_bullets && is_bullet_line(unit) {
            continue;
        }
        hits.push(ScanHit {
            variant: m.variant,
            text: unit.to_string(),
        });
    }

    hits
}

/// Delimiters that close a unit. All single-byte, so the returned offsets
/// are always char boundaries.
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}

/// Expand a match position to its enclosing unit. Sentence punctuation is
/// kept as part of the unit; line breaks are not.
fn unit_bounds(text: &str, match_start: usize) -> (usize, usize) {
    let start = text[..match_start]
        .rfind(is_terminator)
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = match text[match_start..].find(is_terminator) {
        Some(i) => {
            let at = match_start + i;
            if text.as_bytes()[at] == b'\n' {
                at
            } else {
                at + 1
            }
        }
        None => text.len(),
    };
    (start, end)
}
