//! Tag value type and wildcard tag patterns
//!
//! A [`Tag`] is the validated form of a marker-prefixed token (`#work`,
//! `#project/alpha`). A [`TagPattern`] is a parsed query: either an exact tag
//! or a wildcard (`#project/*`) covering the tag and all of its nested
//! sub-tags.
//!
//! # Examples
//!
//! ```
//! use tagpage::domain::tag::TagPattern;
//!
//! let pattern = TagPattern::parse("#project/*");
//! assert!(pattern.is_wildcard());
//! assert_eq!(pattern.tag().as_str(), "#project");
//! ```

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Suffix marking a wildcard query ("this tag and everything nested under it")
const WILDCARD_SUFFIX: &str = "/*";

/// A validated tag: always `#`-prefixed, lower-cased, never carrying the
/// wildcard suffix. Construction goes through [`Tag::new`] so the invariant
/// holds everywhere a `Tag` appears as a grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Normalize a raw tag string into a `Tag`.
    ///
    /// Strips a trailing wildcard suffix, ensures the leading `#` marker and
    /// lower-cases the rest. An empty input yields the bare marker `#`,
    /// which matches nothing when used in a pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagpage::domain::tag::Tag;
    ///
    /// assert_eq!(Tag::new("Work").as_str(), "#work");
    /// assert_eq!(Tag::new("#Project/Alpha").as_str(), "#project/alpha");
    /// assert_eq!(Tag::new("#project/*").as_str(), "#project");
    /// ```
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let without_wildcard = trimmed.strip_suffix(WILDCARD_SUFFIX).unwrap_or(trimmed);
        let without_marker = without_wildcard.strip_prefix('#').unwrap_or(without_wildcard);
        Tag(format!("#{}", without_marker.to_lowercase()))
    }

    /// The full display form, including the `#` marker
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag name without its marker character
    pub fn name(&self) -> &str {
        &self.0[1..]
    }

    /// Nesting depth: number of path segments in the name
    fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// True when `self` equals `root` or is nested underneath it
    /// (`#a/b` is under `#a`, `#ab` is not).
    pub fn is_under(&self, root: &Tag) -> bool {
        self == root
            || self
                .0
                .strip_prefix(root.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Section ordering: most general variant (fewest nested segments) first,
// alphabetical for ties.
impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.depth()
            .cmp(&other.depth())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single tag occurrence found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    /// Byte offset of the match start within the scanned text
    pub start: usize,
    /// The literal tag substring that matched, normalized to a `Tag`
    pub variant: Tag,
}

/// A parsed tag query: the raw input, the cleaned tag, and whether the raw
/// form carried the wildcard suffix.
#[derive(Debug, Clone)]
pub struct TagPattern {
    raw: String,
    tag: Tag,
    is_wildcard: bool,
    matcher: Option<Regex>,
}

impl TagPattern {
    /// Parse a raw tag string, with or without a leading `#`.
    ///
    /// The wildcard suffix is recognized only as the literal two characters
    /// `/*` at the end of the input; no other wildcard position is
    /// supported. Never fails: a degenerate input (empty, or the suffix
    /// alone) produces a pattern that matches nothing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let is_wildcard = trimmed.ends_with(WILDCARD_SUFFIX);
        let tag = Tag::new(trimmed);
        let matcher = Self::build_matcher(&tag, is_wildcard);
        TagPattern {
            raw: trimmed.to_string(),
            tag,
            is_wildcard,
            matcher,
        }
    }

    /// The cleaned tag (wildcard suffix removed)
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The raw query string as given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// Find every tag occurrence in `text`, in order.
    ///
    /// Matching is case-insensitive and word-bounded: the tag must be
    /// followed by a character that cannot continue a tag (whitespace,
    /// punctuation) or the end of the text, so `#work` matches in
    /// `Call #work.` but never inside `#workshop`. For wildcard patterns
    /// the matched variant includes any nested path continuation
    /// (`#a/b/c` under `#a/*`).
    pub fn find_all(&self, text: &str) -> Vec<TagMatch> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        matcher
            .captures_iter(text)
            .map(|cap| {
                let m = cap.get(1).expect("variant group always present");
                TagMatch {
                    start: m.start(),
                    variant: Tag::new(m.as_str()),
                }
            })
            .collect()
    }

    /// First tag occurrence in `text`, if any
    pub fn first_match(&self, text: &str) -> Option<TagMatch> {
        self.find_all(text).into_iter().next()
    }

    /// True when a structured (front matter) tag satisfies this pattern:
    /// exact equality, or for wildcards the root or any nested descendant.
    pub fn matches_structured(&self, tag: &Tag) -> bool {
        if self.is_wildcard {
            tag.is_under(&self.tag)
        } else {
            tag == &self.tag
        }
    }

    fn build_matcher(tag: &Tag, is_wildcard: bool) -> Option<Regex> {
        if tag.name().is_empty() {
            return None;
        }
        let escaped = regex::escape(tag.as_str());
        // The regex crate has no lookahead, so the word boundary is a
        // consumed trailing group: any non-tag-continuation character
        // (so `#work.` matches but `#workshop` and `#work/sub` do not)
        // or end of text.
        let pattern = if is_wildcard {
            format!(r"(?i)({}(?:/[\w/-]+)?)(?:[^\w/-]|$)", escaped)
        } else {
            format!(r"(?i)({})(?:[^\w/-]|$)", escaped)
        };
        Some(Regex::new(&pattern).expect("escaped tag pattern is valid"))
    }
}
