// Bundle path helpers

/// Separator used by every bundle path, whatever the host platform.
pub const SEPARATOR: char = '/';

/// Return `path` with exactly one trailing separator.
///
/// `"/bundle"` and `"/bundle///"` both become `"/bundle/"`; `":/"` is
/// already normalized.
pub fn with_trailing_separator(path: &str) -> String {
    let mut normalized = path.trim_end_matches(SEPARATOR).to_string();
    normalized.push(SEPARATOR);
    normalized
}

/// Strip trailing separators, keeping a bare root (`"/"`, `":/"`) intact.
pub fn trim_trailing_separator(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() || trimmed.ends_with(':') {
        // "/" or ":/" - the separator is the whole directory name
        &path[..trimmed.len() + usize::from(path.len() > trimmed.len())]
    } else {
        trimmed
    }
}

/// Join a name onto a directory path with a single separator.
pub fn join(dir: &str, name: &str) -> String {
    let mut joined = with_trailing_separator(dir);
    joined.push_str(name.trim_start_matches(SEPARATOR));
    joined
}

/// Final component of a path (`"/a/b.pyc"` -> `"b.pyc"`).
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Every ancestor directory of `path`, each with a trailing separator,
/// outermost first (`"/a/b/c.pyc"` -> `["/", "/a/", "/a/b/"]`).
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(|(_, c)| *c == SEPARATOR)
        .map(move |(idx, _)| &path[..=idx])
}

/// Whether any component is `..`, which a read-only tree never resolves.
pub fn escapes(path: &str) -> bool {
    path.split(SEPARATOR).any(|component| component == "..")
}
