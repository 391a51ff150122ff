//! Bullet-subtree extraction
//!
//! Finds whole bullet subtrees (a bullet line plus every deeper-indented
//! line beneath it) whose root line contains a tag match, as a single-pass
//! state machine over the document's non-empty lines.

use super::{indent_of, is_bullet_line, ScanHit};
use crate::domain::tag::{Tag, TagPattern};

/// Scanner state after processing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No subtree open
    Scanning,
    /// The line just processed opened a subtree root
    CapturingRoot,
    /// Appending descendant lines to open subtrees
    CapturingSubtree,
}

/// An open subtree capture for one matched variant.
#[derive(Debug)]
struct Capture {
    variant: Tag,
    root_indent: usize,
    lines: Vec<String>,
}

/// The single indentation rule: a line extends a subtree exactly when it is
/// indented deeper than the subtree's root.
fn extends_subtree(root_indent: usize, line_indent: usize) -> bool {
    line_indent > root_indent
}

/// Scan `text` for bullet subtrees rooted at a tag match.
///
/// A matched bullet line opens one capture per matched variant. Deeper
/// lines, bullet or plain, are appended verbatim to every open capture above
/// them; a deeper bullet that itself matches additionally opens its own
/// capture keyed under its own variant. A line at or below a capture's root
/// indentation closes it, as does the end of the document. Emitted subtree
/// text has the root's indentation stripped from every line, so descendant
/// indentation is preserved relative to the root.
///
/// # Examples
///
/// ```
/// use tagpage::domain::scan::scan_bullets;
/// use tagpage::domain::tag::TagPattern;
///
/// let pattern = TagPattern::parse("#errand");
/// let hits = scan_bullets("- Buy milk #errand\n  - also eggs\n", &pattern);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].text, "- Buy milk #errand\n  - also eggs");
/// ```
pub fn scan_bullets(text: &str, pattern: &TagPattern) -> Vec<ScanHit> {
    let mut scanner = BulletScanner::new(pattern);
    for line in text.lines() {
        scanner.step(line);
    }
    scanner.finish()
}

struct BulletScanner<'a> {
    pattern: &'a TagPattern,
    state: ScanState,
    active: Vec<Capture>,
    emitted: Vec<ScanHit>,
}

impl<'a> BulletScanner<'a> {
    fn new(pattern: &'a TagPattern) -> Self {
        BulletScanner {
            pattern,
            state: ScanState::Scanning,
            active: Vec::new(),
            emitted: Vec::new(),
        }
    }

    /// Process one document line. Blank lines do not participate in the
    /// state machine.
    fn step(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        // Nothing open and no root candidate: stay in Scanning.
        if self.state == ScanState::Scanning && !is_bullet_line(line) {
            return;
        }
        let indent = indent_of(line);

        // Any capture this line does not extend is finished.
        self.close_not_extended_by(indent);

        // The line is a descendant of every capture still open.
        for capture in &mut self.active {
            capture.lines.push(line.to_string());
        }

        // A matched bullet line roots a new subtree per matched variant.
        let mut opened = false;
        if is_bullet_line(line) {
            for m in self.pattern.find_all(line) {
                if self
                    .active
                    .iter()
                    .any(|c| c.root_indent == indent && c.variant == m.variant)
                {
                    continue;
                }
                self.active.push(Capture {
                    variant: m.variant,
                    root_indent: indent,
                    lines: vec![line.to_string()],
                });
                opened = true;
            }
        }

        self.state = transition(opened, !self.active.is_empty());
    }

    /// End of document closes every open capture.
    fn finish(mut self) -> Vec<ScanHit> {
        let remaining = std::mem::take(&mut self.active);
        for capture in remaining {
            self.emitted.push(emit(capture));
        }
        self.emitted
    }

    fn close_not_extended_by(&mut self, indent: usize) {
        let mut still_open = Vec::new();
        for capture in self.active.drain(..) {
            if extends_subtree(capture.root_indent, indent) {
                still_open.push(capture);
            } else {
                self.emitted.push(emit(capture));
            }
        }
        self.active = still_open;
    }
}

fn transition(opened_root: bool, any_open: bool) -> ScanState {
    if opened_root {
        ScanState::CapturingRoot
    } else if any_open {
        ScanState::CapturingSubtree
    } else {
        ScanState::Scanning
    }
}

/// Serialize a finished capture: root indentation stripped from every line,
/// relative indentation intact.
fn emit(capture: Capture) -> ScanHit {
    let text = capture
        .lines
        .iter()
        .map(|line| strip_indent(line, capture.root_indent))
        .collect::<Vec<_>>()
        .join("\n");
    ScanHit {
        variant: capture.variant,
        text,
    }
}

/// Drop up to `count` leading whitespace characters from a line.
fn strip_indent(line: &str, count: usize) -> &str {
    let mut stripped = 0;
    for (idx, c) in line.char_indices() {
        if stripped == count || !c.is_whitespace() {
            return &line[idx..];
        }
        stripped += 1;
    }
    ""
}
