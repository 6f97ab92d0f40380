// Directory-backed resource tree
//
// Serves a bundle straight from a directory on disk, e.g. the staging
// directory a bundle is built from. Bundle paths under the mount prefix map
// onto paths under the base directory.

use crate::error::VfsError;
use crate::path::{self, SEPARATOR};
use crate::tree::{DirEntry, ResourceTree};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A resource tree backed by an OS directory.
#[derive(Debug, Clone)]
pub struct DirTree {
    /// Directory on disk that holds the bundle contents
    base: PathBuf,

    /// Bundle path prefix the base directory is mounted at (trailing separator)
    mount: String,
}

impl DirTree {
    /// Mount `base` at the bundle root `/`.
    pub fn new(base: impl AsRef<Path>) -> Result<Self, VfsError> {
        Self::mounted(base, "/")
    }

    /// Mount `base` at an arbitrary prefix such as `:/`.
    pub fn mounted(base: impl AsRef<Path>, mount: &str) -> Result<Self, VfsError> {
        let base = base.as_ref();
        let metadata = fs::metadata(base).map_err(|source| VfsError::Io {
            path: base.to_path_buf(),
            source,
        })?;

        if !metadata.is_dir() {
            return Err(VfsError::NotADirectory(base.to_path_buf()));
        }

        if mount.is_empty() || path::escapes(mount) {
            return Err(VfsError::InvalidPath(mount.to_string()));
        }

        Ok(Self {
            base: base.to_path_buf(),
            mount: path::with_trailing_separator(mount),
        })
    }

    /// The bundle prefix, always ending with a separator.
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Map a bundle path to the file it names on disk.
    ///
    /// Returns `None` for paths outside the mount or paths containing `..`.
    pub fn host_path(&self, path: &str) -> Option<PathBuf> {
        let relative = match path.strip_prefix(self.mount.as_str()) {
            Some(rest) => rest,
            None if path::with_trailing_separator(path) == self.mount => "",
            None => return None,
        };

        if path::escapes(relative) {
            return None;
        }

        let mut host = self.base.clone();
        for component in relative
            .split(SEPARATOR)
            .filter(|c| !c.is_empty() && *c != ".")
        {
            host.push(component);
        }

        Some(host)
    }
}

impl ResourceTree for DirTree {
    fn is_file(&self, path: &str) -> bool {
        if path.ends_with(SEPARATOR) {
            return false;
        }

        self.host_path(path).is_some_and(|host| host.is_file())
    }

    fn is_dir(&self, path: &str) -> bool {
        self.host_path(path).is_some_and(|host| host.is_dir())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let host = self.host_path(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is outside the bundle mounted at {}", path, self.mount),
            )
        })?;

        log::trace!("dir tree read {} -> {}", path, host.display());

        // fs::read closes the file before returning
        fs::read(&host)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let host = self.host_path(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is outside the bundle mounted at {}", path, self.mount),
            )
        })?;

        let mut entries = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let entry_path = entry.path();

            if entry_path.is_dir() {
                entries.push(DirEntry::dir(name));
            } else if entry_path.is_file() {
                entries.push(DirEntry::file(name));
            }
        }

        entries.sort();
        Ok(entries)
    }
}
