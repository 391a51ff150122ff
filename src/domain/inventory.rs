//! Inline tag inventory across note text
//!
//! Walks the markdown event stream and collects every hashtag occurring in
//! prose, used by the `tags` listing command. Scanning for a specific tag
//! goes through [`crate::domain::scan`] instead; this is enumeration only.

use crate::domain::frontmatter;
use crate::domain::tag::Tag;
use pulldown_cmark::{Event, Parser as MdParser};
use regex::Regex;
use std::sync::OnceLock;

/// Hashtag shape: marker plus word characters, hyphens, and nested path
/// segments.
fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_/-]+)").unwrap())
}

/// Collect every inline tag in `text`, normalized and deduplicated in order
/// of first appearance. A leading front-matter block is skipped; structured
/// tags come from [`frontmatter::structured_tags`].
pub fn collect_inline_tags(text: &str) -> Vec<Tag> {
    let body_start = frontmatter::extract(text).map(|(_, offset)| offset).unwrap_or(0);
    let mut tags: Vec<Tag> = Vec::new();

    for event in MdParser::new(&text[body_start..]) {
        if let Event::Text(chunk) = event {
            for cap in tag_regex().captures_iter(&chunk) {
                let tag = Tag::new(&cap[0]);
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_tags_in_order() {
        let tags = collect_inline_tags("first #work then #home\n\n- and #work again\n");
        let names: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["#work", "#home"]);
    }

    #[test]
    fn test_collects_nested_tags() {
        let tags = collect_inline_tags("on #project/alpha now\n");
        assert_eq!(tags[0].as_str(), "#project/alpha");
    }

    #[test]
    fn test_case_normalized() {
        let tags = collect_inline_tags("#Work and #WORK\n");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].as_str(), "#work");
    }

    #[test]
    fn test_headings_are_not_tags() {
        let tags = collect_inline_tags("# Heading\n\nbody with #real\n");
        let names: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["#real"]);
    }

    #[test]
    fn test_front_matter_skipped() {
        let tags = collect_inline_tags("---\ntags: [meta]\n---\nbody #inline\n");
        let names: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["#inline"]);
    }

    #[test]
    fn test_code_spans_not_collected() {
        let tags = collect_inline_tags("use `#not-a-tag` but #real\n");
        let names: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["#real"]);
    }
}
