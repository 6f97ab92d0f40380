// In-memory resource tree
//
// Holds a bundle that was compiled into the host binary, typically as a
// table of `include_bytes!` statics.

use crate::error::VfsError;
use crate::path::{self, SEPARATOR};
use crate::tree::{DirEntry, ResourceTree};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::Arc;

/// An immutable-once-shared tree of in-memory files.
///
/// Directories exist implicitly for every ancestor of a file and can also
/// be added explicitly, which is how an empty namespace directory is
/// represented.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    /// File path -> contents
    files: BTreeMap<String, Arc<[u8]>>,

    /// Directory paths, each stored with a trailing separator
    dirs: BTreeSet<String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a static table of `(path, contents)` pairs.
    ///
    /// # Example
    /// ```
    /// # use rcimport_vfs::{MemoryTree, ResourceTree};
    /// static APP: &[u8] = b"\x00code";
    /// let tree = MemoryTree::from_static(&[(":/app.pyc", APP)]).expect("valid table");
    /// assert!(tree.is_file(":/app.pyc"));
    /// assert!(tree.is_dir(":/"));
    /// ```
    pub fn from_static(entries: &[(&str, &'static [u8])]) -> Result<Self, VfsError> {
        let mut tree = Self::new();
        for (path, data) in entries {
            tree.insert_file(path, *data)?;
        }
        Ok(tree)
    }

    /// Add a file, creating every ancestor directory.
    pub fn insert_file(
        &mut self,
        path: &str,
        data: impl Into<Arc<[u8]>>,
    ) -> Result<&mut Self, VfsError> {
        if path.is_empty() || path.ends_with(SEPARATOR) || path::escapes(path) {
            return Err(VfsError::InvalidPath(path.to_string()));
        }
        let shadows_file = path::ancestors(path)
            .any(|dir| self.files.contains_key(path::trim_trailing_separator(dir)));
        if shadows_file || self.dirs.contains(&path::with_trailing_separator(path)) {
            return Err(VfsError::InvalidPath(path.to_string()));
        }

        for dir in path::ancestors(path) {
            self.dirs.insert(dir.to_string());
        }
        self.files.insert(path.to_string(), data.into());

        Ok(self)
    }

    /// Add a directory (and its ancestors) even if it holds no files.
    pub fn insert_dir(&mut self, path: &str) -> Result<&mut Self, VfsError> {
        if path.is_empty() || path::escapes(path) {
            return Err(VfsError::InvalidPath(path.to_string()));
        }

        let dir = path::with_trailing_separator(path);
        let under_file = path::ancestors(&dir)
            .any(|ancestor| self.files.contains_key(path::trim_trailing_separator(ancestor)));
        if under_file {
            return Err(VfsError::InvalidPath(path.to_string()));
        }

        for ancestor in path::ancestors(&dir) {
            self.dirs.insert(ancestor.to_string());
        }

        Ok(self)
    }
}

impl ResourceTree for MemoryTree {
    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(&path::with_trailing_separator(path))
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        log::trace!("memory tree read {}", path);

        match self.files.get(path) {
            Some(data) => Ok(data.to_vec()),
            None if self.is_dir(path) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found in bundle", path),
            )),
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let dir = path::with_trailing_separator(path);
        if !self.dirs.contains(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory in bundle", path),
            ));
        }

        let mut entries = Vec::new();

        // Subdirectories: "<dir><name>/" with no further separator
        for sub in self.dirs.range(dir.clone()..) {
            let Some(rest) = sub.strip_prefix(dir.as_str()) else {
                break;
            };
            let name = rest.trim_end_matches(SEPARATOR);
            if !name.is_empty() && !name.contains(SEPARATOR) {
                entries.push(DirEntry::dir(name));
            }
        }

        // Files: "<dir><name>" with no further separator
        for file in self.files.range(dir.clone()..).map(|(k, _)| k) {
            let Some(name) = file.strip_prefix(dir.as_str()) else {
                break;
            };
            if !name.contains(SEPARATOR) {
                entries.push(DirEntry::file(name));
            }
        }

        entries.sort();
        Ok(entries)
    }
}
