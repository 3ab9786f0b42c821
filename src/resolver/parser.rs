//! Line parser for the `key=value` language format.

use crate::resource::{
    NAME_DIRECTIVE,
    strip_bom,
};

/// Lines starting with this character are comments.
pub const COMMENT_PREFIX: char = '#';

/// Separator between a lookup key and its value.
pub const SEPARATOR: char = '=';

/// Parses one line into a `(key, value)` entry.
///
/// Returns `None` for blank lines, comments, the `name=` header, lines without
/// a separator and lines whose key is empty. Key and value are trimmed; the
/// value may contain further `=` characters.
///
/// # Examples
/// ```
/// use runtime_localization::resolver::parse_line;
///
/// assert_eq!(parse_line(" title = A = B "), Some(("title", "A = B")));
/// assert_eq!(parse_line("=novalue"), None);
/// assert_eq!(parse_line("# comment"), None);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) || line.starts_with(NAME_DIRECTIVE) {
        return None;
    }

    let (key, value) = line.split_once(SEPARATOR)?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

/// Iterates over every translation entry in `content`, in file order.
///
/// Duplicate keys are yielded as they appear; collecting into a map keeps the
/// last one.
pub fn parse_entries(content: &str) -> impl Iterator<Item = (&str, &str)> {
    strip_bom(content).lines().filter_map(parse_line)
}
