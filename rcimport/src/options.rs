// Importer options

use serde::{Deserialize, Serialize};

/// Knobs an embedder can set per importer.
///
/// Serializable so it can live inside the embedder's own configuration;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterOptions {
    /// Extension of precompiled code files, without the leading dot
    pub extension: String,

    /// Stem of the file that marks a directory as a package
    pub package_marker: String,

    /// Ask the host's generic finder about dotted names the bundle lacks
    pub fallback: bool,
}

fn default_extension() -> String {
    "pyc".to_string()
}

fn default_package_marker() -> String {
    "__init__".to_string()
}

impl Default for ImporterOptions {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            package_marker: default_package_marker(),
            fallback: true,
        }
    }
}

impl ImporterOptions {
    /// Use a different code file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// `<base>.<ext>`
    pub fn module_file(&self, base: &str) -> String {
        format!("{}.{}", base, self.extension)
    }

    /// `<base>/<marker>.<ext>`
    pub fn package_file(&self, base: &str) -> String {
        format!("{}/{}.{}", base, self.package_marker, self.extension)
    }
}
