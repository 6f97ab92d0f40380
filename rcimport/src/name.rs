// Fully qualified module names

/// A validated, dot-separated module name such as `pkg.sub`.
///
/// Borrowed from the caller's string; importers never need to own it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleName<'a> {
    full: &'a str,
}

impl<'a> ModuleName<'a> {
    /// Parse a name. Returns `None` for `""` and for names with an empty
    /// segment (`".a"`, `"a..b"`, `"pkg."`).
    pub fn parse(name: &'a str) -> Option<Self> {
        if name.is_empty() || name.split('.').any(str::is_empty) {
            return None;
        }

        Some(Self { full: name })
    }

    /// The module's own simple name (`"pkg.sub"` -> `"sub"`).
    pub fn last_segment(&self) -> &'a str {
        match self.full.rfind('.') {
            Some(idx) => &self.full[idx + 1..],
            None => self.full,
        }
    }

    /// Whether the name has a parent package.
    pub fn is_dotted(&self) -> bool {
        self.full.contains('.')
    }
}

impl std::fmt::Display for ModuleName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(ModuleName::parse("").is_none());
        assert!(ModuleName::parse(".a").is_none());
        assert!(ModuleName::parse("a..b").is_none());
        assert!(ModuleName::parse("pkg.").is_none());
        assert!(ModuleName::parse("pkg.sub").is_some());
    }

    #[test]
    fn test_segments() {
        let name = ModuleName::parse("a.b.c").expect("valid");
        assert_eq!(name.last_segment(), "c");
        assert!(name.is_dotted());

        let name = ModuleName::parse("app").expect("valid");
        assert_eq!(name.last_segment(), "app");
        assert!(!name.is_dotted());
        assert_eq!(name.to_string(), "app");
    }
}
