//! Tag page synthesis
//!
//! Renders a [`TagGroup`] into final markdown: resolved title, per-variant
//! sections, match lines with provenance links, the front-matter file
//! listing, and splicing into a previously generated document so
//! user-authored text outside the marker pair survives regeneration.

use crate::domain::frontmatter;
use crate::domain::group::{MatchUnit, TagGroup};
use crate::domain::region::{split_region, PreviousDocument, REGION_END, REGION_START};
use crate::domain::scan;
use crate::domain::tag::TagPattern;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Default page title when no template is configured
const DEFAULT_TITLE_TEMPLATE: &str = "# Tag page for {{tag}}";

/// Where the provenance link lands on a match line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPlacement {
    /// Appended at the end of the root line
    End,
    /// Spliced immediately after the bullet marker
    AfterBullet,
}

impl FromStr for LinkPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "end" => Ok(LinkPlacement::End),
            "after-bullet" => Ok(LinkPlacement::AfterBullet),
            _ => Err(format!("Invalid link placement: {}", s)),
        }
    }
}

impl std::fmt::Display for LinkPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LinkPlacement::End => "end",
            LinkPlacement::AfterBullet => "after-bullet",
        };
        write!(f, "{}", s)
    }
}

/// Resolves a relative embed target from a source note to a vault-relative
/// path. Implemented by the vault; synthesis falls back to a normalized
/// path join when resolution fails.
pub trait EmbedResolver {
    fn resolve(&self, from: &Path, target: &str) -> Option<PathBuf>;
}

/// Resolver that never resolves; every relative target takes the path-join
/// fallback.
pub struct NoResolver;

impl EmbedResolver for NoResolver {
    fn resolve(&self, _from: &Path, _target: &str) -> Option<PathBuf> {
        None
    }
}

/// Knobs the synthesizer honors, sourced from settings
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Title template with `{{tag}}`, `{{name}}`, `{{br}}` placeholders
    pub title_template: Option<String>,
    pub link_placement: LinkPlacement,
    /// Front-matter key recording the query tag on generated pages
    pub frontmatter_key: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            title_template: None,
            link_placement: LinkPlacement::End,
            frontmatter_key: "tag-page-query".to_string(),
        }
    }
}

/// Render the complete document text for a tag page.
///
/// When `previous` holds a document with a recognizable marker region, only
/// the generated body between the markers is replaced; the surrounding text
/// and front matter are kept byte for byte. Anything else (no previous
/// document, no markers, corrupt markers) produces a fresh document with a
/// front-matter block recording the query under the configured key.
pub fn synthesize_document(
    group: &TagGroup,
    pattern: &TagPattern,
    options: &SynthesisOptions,
    frontmatter_files: &[String],
    previous: Option<&str>,
    resolver: &dyn EmbedResolver,
) -> String {
    let body = render_body(group, pattern, options, frontmatter_files, resolver);
    let region = format!("{}\n{}{}\n", REGION_START, body, REGION_END);

    let split = previous.map(split_region).unwrap_or(PreviousDocument::Unmarked);
    match split {
        PreviousDocument::Marked { before, after } => {
            let fm = previous
                .and_then(frontmatter::extract)
                .map(|(block, _)| block.to_string())
                .unwrap_or_else(|| query_frontmatter(pattern, options));
            format!("{}{}{}{}", fm, before, region, after)
        }
        PreviousDocument::Unmarked => {
            format!("{}\n{}", query_frontmatter(pattern, options), region)
        }
    }
}

/// The generated body: title, variant sections, file listing. Always ends
/// with a newline.
fn render_body(
    group: &TagGroup,
    pattern: &TagPattern,
    options: &SynthesisOptions,
    frontmatter_files: &[String],
    resolver: &dyn EmbedResolver,
) -> String {
    let mut body = String::new();
    body.push_str(&resolve_title(options.title_template.as_deref(), pattern));
    body.push('\n');

    if group.is_empty() && frontmatter_files.is_empty() {
        body.push_str("\n*No matching content found.*\n");
        return body;
    }

    let subsections = group.variant_count() > 1;
    for variant in group.variants_sorted() {
        body.push('\n');
        if subsections {
            body.push_str(&format!("## {}\n\n", variant));
        }
        let matches = group.get(variant).expect("sorted variants exist");
        for unit in matches {
            body.push_str(&format_match_line(unit, options.link_placement, resolver));
            body.push('\n');
        }
    }

    if !frontmatter_files.is_empty() {
        body.push_str(&format!(
            "\n## Files with {} in frontmatter\n\n",
            pattern.tag()
        ));
        for link in frontmatter_files {
            body.push_str(&format!("- {}\n", link));
        }
    }

    body
}

/// Apply the title template.
///
/// Supported placeholders: `{{tag}}` (display form with marker), `{{name}}`
/// (without marker), `{{br}}` (line feed). Double spaces left by empty
/// substitutions are collapsed.
pub fn resolve_title(template: Option<&str>, pattern: &TagPattern) -> String {
    let template = template.unwrap_or(DEFAULT_TITLE_TEMPLATE);
    let mut title = template
        .replace("{{tag}}", pattern.tag().as_str())
        .replace("{{name}}", pattern.tag().name())
        .replace("{{br}}", "\n");
    while title.contains("  ") {
        title = title.replace("  ", " ");
    }
    title
}

/// Front-matter block for a fresh tag page, recording the query so the page
/// can be found and refreshed later.
fn query_frontmatter(pattern: &TagPattern, options: &SynthesisOptions) -> String {
    let raw = pattern.raw();
    let display = if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{}", raw)
    };
    format!("---\n{}: \"{}\"\n---\n", options.frontmatter_key, display)
}

/// Format one match as output line(s). Bullet subtrees keep their shape and
/// get the link on the root line only; prose is wrapped in a fresh bullet.
fn format_match_line(
    unit: &MatchUnit,
    placement: LinkPlacement,
    resolver: &dyn EmbedResolver,
) -> String {
    let text = rewrite_embeds(&unit.text, &unit.source_path, resolver);
    let link = &unit.source_link;

    if scan::is_bullet_line(&text) {
        let (root, rest) = match text.split_once('\n') {
            Some((root, rest)) => (root, Some(rest)),
            None => (text.as_str(), None),
        };
        let root = splice_link(root, link, placement);
        match rest {
            Some(rest) => format!("{}\n{}", root, rest),
            None => root,
        }
    } else {
        match placement {
            LinkPlacement::End => format!("- {} {}", text, link),
            LinkPlacement::AfterBullet => format!("- {} {}", link, text),
        }
    }
}

/// Insert the provenance link into an existing bullet root line.
fn splice_link(root: &str, link: &str, placement: LinkPlacement) -> String {
    match placement {
        LinkPlacement::End => format!("{} {}", root, link),
        LinkPlacement::AfterBullet => match root.split_once("- ") {
            Some((indent, content)) => format!("{}- {} {}", indent, link, content),
            None => format!("{} {}", root, link),
        },
    }
}

fn image_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap())
}

fn wiki_embed_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!\[\[([^\]|]+)(\|[^\]]*)?\]\]").unwrap())
}

/// Re-resolve relative image and internal-embed targets against the
/// originating note so they still render after relocation into the tag
/// page. Unresolvable targets fall back to a normalized join with the
/// source note's directory; references are never dropped.
fn rewrite_embeds(text: &str, source_path: &Path, resolver: &dyn EmbedResolver) -> String {
    let rewritten = image_regex().replace_all(text, |caps: &Captures| {
        let alt = &caps[1];
        let target = &caps[2];
        format!("![{}]({})", alt, rewrite_target(target, source_path, resolver))
    });
    wiki_embed_regex()
        .replace_all(&rewritten, |caps: &Captures| {
            let target = &caps[1];
            let label = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            format!(
                "![[{}{}]]",
                rewrite_target(target, source_path, resolver),
                label
            )
        })
        .into_owned()
}

fn rewrite_target(target: &str, source_path: &Path, resolver: &dyn EmbedResolver) -> String {
    if target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with('/')
    {
        return target.to_string();
    }
    if let Some(resolved) = resolver.resolve(source_path, target) {
        return path_to_slashes(&resolved);
    }
    let source_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
    normalized_join(source_dir, target)
}

/// Join and normalize without touching the filesystem: `.` dropped, `..`
/// pops, forward slashes in the result.
fn normalized_join(dir: &Path, target: &str) -> String {
    let mut parts: Vec<String> = dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other.to_string()),
        }
    }
    parts.join("/")
}

fn path_to_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::{scan_corpus, NoteSnapshot, ScanMode, SortOrder};
    use crate::domain::tag::Tag;

    fn unit(text: &str, file: &str) -> MatchUnit {
        MatchUnit {
            text: text.to_string(),
            source_link: format!("[[{}]]", file),
            source_path: PathBuf::from(format!("notes/{}.md", file)),
            timestamp: None,
        }
    }

    fn options() -> SynthesisOptions {
        SynthesisOptions::default()
    }

    #[test]
    fn test_resolve_title_default() {
        let pattern = TagPattern::parse("#work");
        assert_eq!(resolve_title(None, &pattern), "# Tag page for #work");
    }

    #[test]
    fn test_resolve_title_placeholders() {
        let pattern = TagPattern::parse("#work");
        assert_eq!(
            resolve_title(Some("# {{name}} notes{{br}}collected"), &pattern),
            "# work notes\ncollected"
        );
    }

    #[test]
    fn test_resolve_title_collapses_double_spaces() {
        let pattern = TagPattern::parse("#work");
        assert_eq!(
            resolve_title(Some("# Notes {{br}} for {{tag}}"), &pattern),
            "# Notes \n for #work"
        );
        assert_eq!(
            resolve_title(Some("A  B   C"), &pattern),
            "A B C"
        );
    }

    #[test]
    fn test_single_group_no_subheadings() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#work"), unit("prose match #work", "a"));

        let pattern = TagPattern::parse("#work");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);

        assert!(doc.contains("# Tag page for #work"));
        assert!(doc.contains("- prose match #work [[a]]"));
        assert!(!doc.contains("## #work"));
    }

    #[test]
    fn test_multiple_variants_ordered_subsections() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#project/beta"), unit("b #project/beta", "b"));
        group.insert(Tag::new("#project/alpha"), unit("a #project/alpha", "a"));

        let pattern = TagPattern::parse("#project/*");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);

        let alpha = doc.find("## #project/alpha").unwrap();
        let beta = doc.find("## #project/beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_bullet_subtree_link_on_root_only() {
        let mut group = TagGroup::new();
        group.insert(
            Tag::new("#errand"),
            unit("- Buy milk #errand\n  - also eggs", "todo"),
        );

        let pattern = TagPattern::parse("#errand");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);

        assert!(doc.contains("- Buy milk #errand [[todo]]\n  - also eggs"));
    }

    #[test]
    fn test_link_after_bullet_marker() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#t"), unit("- task #t", "n"));
        group.insert(Tag::new("#t"), unit("prose #t", "n"));

        let pattern = TagPattern::parse("#t");
        let opts = SynthesisOptions {
            link_placement: LinkPlacement::AfterBullet,
            ..options()
        };
        let doc = synthesize_document(&group, &pattern, &opts, &[], None, &NoResolver);

        assert!(doc.contains("- [[n]] task #t"));
        assert!(doc.contains("- [[n]] prose #t"));
    }

    #[test]
    fn test_frontmatter_file_listing() {
        let group = TagGroup::new();
        let pattern = TagPattern::parse("#work");
        let files = vec!["[[project-notes]]".to_string(), "[[standup]]".to_string()];
        let doc = synthesize_document(&group, &pattern, &options(), &files, None, &NoResolver);

        assert!(doc.contains("## Files with #work in frontmatter"));
        assert!(doc.contains("- [[project-notes]]\n- [[standup]]"));
    }

    #[test]
    fn test_empty_group_placeholder() {
        let group = TagGroup::new();
        let pattern = TagPattern::parse("#none");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);
        assert!(doc.contains("*No matching content found.*"));
    }

    #[test]
    fn test_fresh_document_records_query() {
        let group = TagGroup::new();
        let pattern = TagPattern::parse("#project/*");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);

        assert!(doc.starts_with("---\ntag-page-query: \"#project/*\"\n---\n"));
        assert!(doc.contains(REGION_START));
        assert!(doc.contains(REGION_END));
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let notes = vec![NoteSnapshot {
            link: "[[todo]]".to_string(),
            path: PathBuf::from("todo.md"),
            text: "- Buy milk #errand\n  - also eggs\n".to_string(),
            timestamp: None,
        }];
        let pattern = TagPattern::parse("#errand");
        let group = scan_corpus(&notes, &pattern, ScanMode::Bullets, SortOrder::Source);

        let first = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);
        let second =
            synthesize_document(&group, &pattern, &options(), &[], Some(&first), &NoResolver);
        assert_eq!(first, second);
    }

    #[test]
    fn test_user_text_outside_markers_preserved() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#t"), unit("match #t", "n"));
        let pattern = TagPattern::parse("#t");

        let first = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);
        let edited = first
            .replace("---\n\n<!--", "---\nuser intro\n<!--")
            .replace("end -->\n", "end -->\nuser outro\n");

        let regenerated =
            synthesize_document(&group, &pattern, &options(), &[], Some(&edited), &NoResolver);
        assert!(regenerated.contains("user intro\n<!-- tagpage:start -->"));
        assert!(regenerated.ends_with("end -->\nuser outro\n"));

        // And the edit survives another round unchanged.
        let again = synthesize_document(
            &group,
            &pattern,
            &options(),
            &[],
            Some(&regenerated),
            &NoResolver,
        );
        assert_eq!(regenerated, again);
    }

    #[test]
    fn test_blank_line_after_region_survives_regeneration() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#t"), unit("match #t", "n"));
        let pattern = TagPattern::parse("#t");

        let first = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);
        let edited = first.replace("end -->\n", "end -->\n\nuser outro\n");

        let regenerated =
            synthesize_document(&group, &pattern, &options(), &[], Some(&edited), &NoResolver);
        assert!(regenerated.ends_with("<!-- tagpage:end -->\n\nuser outro\n"));
        assert_eq!(regenerated, edited);
    }

    #[test]
    fn test_corrupt_markers_replace_wholesale() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#t"), unit("match #t", "n"));
        let pattern = TagPattern::parse("#t");

        let corrupt = "intro\n<!-- tagpage:start -->\nnever closed\n";
        let doc =
            synthesize_document(&group, &pattern, &options(), &[], Some(corrupt), &NoResolver);
        assert!(doc.starts_with("---\n"));
        assert!(!doc.contains("never closed"));
    }

    #[test]
    fn test_legacy_marker_upgraded_to_pair() {
        let mut group = TagGroup::new();
        group.insert(Tag::new("#t"), unit("match #t", "n"));
        let pattern = TagPattern::parse("#t");

        let legacy = "kept intro\n<!-- tagpage -->\nold generated\n";
        let doc =
            synthesize_document(&group, &pattern, &options(), &[], Some(legacy), &NoResolver);
        assert!(doc.contains("kept intro\n<!-- tagpage:start -->"));
        assert!(doc.contains(REGION_END));
        assert!(!doc.contains("old generated"));
    }

    #[test]
    fn test_embed_rewritten_against_source_note() {
        let mut group = TagGroup::new();
        group.insert(
            Tag::new("#t"),
            MatchUnit {
                text: "see ![diagram](img/d.png) #t".to_string(),
                source_link: "[[deep note]]".to_string(),
                source_path: PathBuf::from("area/deep note.md"),
                timestamp: None,
            },
        );
        let pattern = TagPattern::parse("#t");
        let doc = synthesize_document(&group, &pattern, &options(), &[], None, &NoResolver);
        assert!(doc.contains("![diagram](area/img/d.png)"));
    }

    #[test]
    fn test_embed_resolver_preferred_over_fallback() {
        struct Fixed;
        impl EmbedResolver for Fixed {
            fn resolve(&self, _from: &Path, _target: &str) -> Option<PathBuf> {
                Some(PathBuf::from("assets/real.png"))
            }
        }

        let rewritten = rewrite_embeds(
            "![x](any.png)",
            Path::new("notes/n.md"),
            &Fixed,
        );
        assert_eq!(rewritten, "![x](assets/real.png)");
    }

    #[test]
    fn test_absolute_and_remote_targets_untouched() {
        let text = "![a](https://example.com/x.png) ![b](/abs/x.png)";
        let rewritten = rewrite_embeds(text, Path::new("notes/n.md"), &NoResolver);
        assert_eq!(rewritten, text);
    }

    #[test]
    fn test_wiki_embed_rewritten_with_label_kept() {
        let rewritten = rewrite_embeds(
            "![[img/pic.png|caption]]",
            Path::new("area/n.md"),
            &NoResolver,
        );
        assert_eq!(rewritten, "![[area/img/pic.png|caption]]");
    }

    #[test]
    fn test_normalized_join_handles_parent_segments() {
        assert_eq!(
            normalized_join(Path::new("a/b"), "../img/x.png"),
            "a/img/x.png"
        );
        assert_eq!(normalized_join(Path::new(""), "./x.png"), "x.png");
    }
}
