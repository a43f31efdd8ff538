//! Tag-string utilities.
//!
//! Facts carry their tags as a single canonicalized, space-separated
//! string; the functions here parse, normalize and extend it.

/// Split a tag string on whitespace and commas, dropping empties.
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Deduplicate (case-insensitively, keeping the first spelling) and sort.
pub fn canonify_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tag in tags {
        if !seen.iter().any(|kept| kept.eq_ignore_ascii_case(&tag)) {
            seen.push(tag);
        }
    }
    seen.sort_by(|a, b| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()));
    seen
}

/// Join a tag list back into the stored representation.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(" ")
}

/// Add `tag` to a tag string unless already present, returning the
/// canonicalized result.
pub fn add_tag(tags: &str, tag: &str) -> String {
    let mut list = parse_tags(tags);
    list.push(tag.to_owned());
    join_tags(&canonify_tags(list))
}

/// Case-insensitive membership test against a tag string.
pub fn has_tag(tags: &str, tag: &str) -> bool {
    parse_tags(tags)
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(tag))
}
