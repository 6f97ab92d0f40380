// rcimport-vfs - read-only resource trees
//
// A resource tree is the directory-like structure a bundle importer reads
// from instead of the OS filesystem. Paths are `/`-separated strings such as
// `:/stdlib/os.pyc`; they never go through `std::path`, so a bundle behaves
// the same on every platform.

pub mod dir;
pub mod error;
pub mod memory;
pub mod path;
pub mod tree;

pub use dir::DirTree;
pub use error::VfsError;
pub use memory::MemoryTree;
pub use path::SEPARATOR;
pub use tree::{walk, DirEntry, EntryKind, ResourceTree, WalkEntry};
