//! rcimport - load precompiled modules from an embedded resource bundle
//!
//! An [`Importer`] is the path hook a runtime installs for one bundle
//! directory (`:/`, `:/stdlib`, ...). For each fully qualified name it
//! classifies what the bundle holds and, for modules and packages, reads,
//! unmarshals and executes the precompiled code through the runtime's own
//! machinery, reached via [`HostRuntime`].
//!
//! ```text
//! Importer::locate("pkg.sub")
//!   ├── resolver::classify  -> Module | Package | Namespace | NotFound
//!   └── NotFound + dotted   -> loader::fallback (host delegate, guarded by ImportContext)
//!
//! Importer::load("pkg")
//!   └── loader::load_resolved
//!         read -> unmarshal -> add_module -> __loader__ -> __path__ -> exec
//! ```

pub mod context;
pub mod error;
pub mod host;
pub mod importer;
pub mod loader;
pub mod name;
pub mod options;
pub mod protocol;
pub mod resolver;

pub use context::ImportContext;
pub use error::ImportError;
pub use host::{HostRuntime, LegacyHost};
pub use importer::Importer;
pub use name::ModuleName;
pub use options::ImporterOptions;
pub use protocol::{ImportHook, LegacyHook, Located};
pub use resolver::{classify, Classification, Resolution};

pub use rcimport_vfs as vfs;
