//! Output formatting utilities

use crate::domain::tag::Tag;
use std::path::Path;

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("{}\n", tag));
    }

    output
}

/// Format refreshed page paths for display.
pub fn format_refreshed_list(paths: &[impl AsRef<Path>]) -> String {
    if paths.is_empty() {
        return "No tag pages found".to_string();
    }

    let mut output = String::new();
    for path in paths {
        output.push_str(&format!("Refreshed: {}\n", path.as_ref().display()));
    }

    output
}
