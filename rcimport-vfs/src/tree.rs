// Resource tree contract

use crate::path;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    Dir,
    File,
}

/// Immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }
}

/// A read-only, directory-like tree of resources.
///
/// Implementations must be immutable once shared: importers probe the same
/// paths repeatedly and never cache the answers.
pub trait ResourceTree: fmt::Debug + Send + Sync {
    /// Whether `path` names a regular file.
    fn is_file(&self, path: &str) -> bool;

    /// Whether `path` names a directory. A trailing separator is accepted.
    fn is_dir(&self, path: &str) -> bool;

    /// Read the whole file at `path`.
    ///
    /// Any handle used for the read is released before this returns.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// List the immediate children of the directory at `path`, sorted by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;
}

impl<T: ResourceTree + ?Sized> ResourceTree for Arc<T> {
    fn is_file(&self, path: &str) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        (**self).is_dir(path)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

impl<T: ResourceTree + ?Sized> ResourceTree for &T {
    fn is_file(&self, path: &str) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        (**self).is_dir(path)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

/// An entry found while walking a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full bundle path (directories without a trailing separator).
    pub path: String,
    pub kind: EntryKind,
    /// Number of directories between the walk root and this entry.
    pub depth: usize,
}

/// Walk everything below `dir` depth-first in sorted order.
///
/// The walk root itself is not included.
pub fn walk(tree: &dyn ResourceTree, dir: &str) -> io::Result<Vec<WalkEntry>> {
    let mut entries = Vec::new();
    walk_into(tree, dir, 0, &mut entries)?;
    Ok(entries)
}

fn walk_into(
    tree: &dyn ResourceTree,
    dir: &str,
    depth: usize,
    out: &mut Vec<WalkEntry>,
) -> io::Result<()> {
    for entry in tree.read_dir(dir)? {
        let child = path::join(dir, &entry.name);
        out.push(WalkEntry {
            path: child.clone(),
            kind: entry.kind,
            depth,
        });

        if entry.kind == EntryKind::Dir {
            walk_into(tree, &child, depth + 1, out)?;
        }
    }

    Ok(())
}
