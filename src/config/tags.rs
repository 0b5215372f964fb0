// ABOUTME: Tag list resolution from explicit values, a sidecar file, or the default.
// ABOUTME: The resolved list is never empty.

use nonempty::NonEmpty;
use std::path::Path;

use crate::error::Result;
use crate::types::Tag;

/// Sidecar file read when no tags are given explicitly.
pub const TAGS_FILENAME: &str = ".tags";

/// The single `latest` tag.
pub fn default_tags() -> NonEmpty<Tag> {
    NonEmpty::new(Tag::latest())
}

/// Split a comma- or newline-separated list, dropping blanks.
pub fn split_tag_list(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate raw values into tags. Returns `None` when nothing remains after
/// dropping blanks.
pub fn parse_tags<I, S>(values: I) -> Result<Option<NonEmpty<Tag>>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags = values
        .into_iter()
        .filter(|v| !v.as_ref().trim().is_empty())
        .map(|v| Tag::new(v.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(NonEmpty::from_vec(tags))
}

/// Explicit values win, then the sidecar file, then `latest`.
pub fn resolve_tags(explicit: &[String], sidecar: &Path) -> Result<NonEmpty<Tag>> {
    if let Some(tags) = parse_tags(explicit)? {
        return Ok(tags);
    }

    if sidecar.is_file() {
        let content = std::fs::read_to_string(sidecar)?;
        if let Some(tags) = parse_tags(split_tag_list(&content))? {
            tracing::debug!("loaded {} tag(s) from {}", tags.len(), sidecar.display());
            return Ok(tags);
        }
    }

    Ok(default_tags())
}
