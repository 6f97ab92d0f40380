// Bundle resolver
// Maps a fully qualified name to what the bundle holds for it

use crate::name::ModuleName;
use crate::options::ImporterOptions;
use rcimport_vfs::ResourceTree;
use serde::Serialize;
use std::fmt;

/// What a name denotes in a bundle directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Module,
    Package,
    Namespace,
    NotFound,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Module => "module",
            Classification::Package => "package",
            Classification::Namespace => "namespace",
            Classification::NotFound => "not found",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one name.
///
/// `pathname` is the base path derived from the name (a package's search
/// path entry), `filename` the code file that gets loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Module { pathname: String, filename: String },
    Package { pathname: String, filename: String },
    Namespace { pathname: String },
    NotFound,
}

impl Resolution {
    pub fn classification(&self) -> Classification {
        match self {
            Resolution::Module { .. } => Classification::Module,
            Resolution::Package { .. } => Classification::Package,
            Resolution::Namespace { .. } => Classification::Namespace,
            Resolution::NotFound => Classification::NotFound,
        }
    }

    pub fn pathname(&self) -> Option<&str> {
        match self {
            Resolution::Module { pathname, .. }
            | Resolution::Package { pathname, .. }
            | Resolution::Namespace { pathname } => Some(pathname),
            Resolution::NotFound => None,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            Resolution::Module { filename, .. } | Resolution::Package { filename, .. } => {
                Some(filename)
            }
            Resolution::Namespace { .. } | Resolution::NotFound => None,
        }
    }

    /// Whether there is code to execute.
    pub fn is_loadable(&self) -> bool {
        matches!(self, Resolution::Module { .. } | Resolution::Package { .. })
    }
}

/// Classify `fqmn` under `root`.
///
/// Only the name's last segment is used: `pkg.sub` is looked up as
/// `<root>sub`, never `<root>pkg/sub`. `root` must already end with a
/// separator.
///
/// Priority chain (first match wins):
/// 1. `<base>.<ext>` - module
/// 2. `<base>/<marker>.<ext>` - package
/// 3. `<base>/` - namespace
pub fn classify(
    tree: &dyn ResourceTree,
    root: &str,
    fqmn: &str,
    options: &ImporterOptions,
) -> Resolution {
    let Some(name) = ModuleName::parse(fqmn) else {
        return Resolution::NotFound;
    };

    let pathname = format!("{}{}", root, name.last_segment());

    let filename = options.module_file(&pathname);
    if tree.is_file(&filename) {
        return Resolution::Module { pathname, filename };
    }

    let filename = options.package_file(&pathname);
    if tree.is_file(&filename) {
        return Resolution::Package { pathname, filename };
    }

    if tree.is_dir(&pathname) {
        return Resolution::Namespace { pathname };
    }

    Resolution::NotFound
}
