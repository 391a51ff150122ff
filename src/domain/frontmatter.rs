//! YAML front matter extraction and structured tag parsing

use crate::domain::tag::Tag;
use serde_yaml::Value;

/// Split a leading front-matter block from note text.
///
/// Returns the raw block (both `---` fences included, with the trailing
/// newline of the closing fence) and the byte offset where the body starts.
/// Returns `None` when the text does not open with a fence or the fence is
/// never closed.
pub fn extract(text: &str) -> Option<(&str, usize)> {
    let rest = text.strip_prefix("---\n")?;
    let mut offset = 4;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let end = offset + line.len();
            return Some((&text[..end], end));
        }
        offset += line.len();
    }
    None
}

/// The YAML content between the fences, if a block is present.
fn inner(text: &str) -> Option<&str> {
    let (block, _) = extract(text)?;
    let body = block.strip_prefix("---\n")?;
    let close = body.rfind("---")?;
    Some(&body[..close])
}

/// Tags from the structured `tags:` key. Accepts a YAML sequence or a
/// comma/space separated scalar. Parse failures mean no tags, never an
/// error.
pub fn structured_tags(text: &str) -> Vec<Tag> {
    let Some(yaml) = inner(text) else {
        return Vec::new();
    };
    let Ok(value) = serde_yaml::from_str::<Value>(yaml) else {
        return Vec::new();
    };
    let Some(tags) = value.get("tags") else {
        return Vec::new();
    };
    match tags {
        Value::Sequence(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(Tag::new)
            .collect(),
        Value::String(s) => s
            .split([',', ' '])
            .filter(|part| !part.trim().is_empty())
            .map(Tag::new)
            .collect(),
        _ => Vec::new(),
    }
}

/// Value of a configured front-matter key, used to recognize generated tag
/// pages and drive refresh.
pub fn key_value(text: &str, key: &str) -> Option<String> {
    let yaml = inner(text)?;
    let value = serde_yaml::from_str::<Value>(yaml).ok()?;
    value.get(key)?.as_str().map(|s| s.to_string())
}
