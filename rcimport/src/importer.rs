// Bundle importer - one per bundle directory on the module search path

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::host::HostRuntime;
use crate::loader;
use crate::name::ModuleName;
use crate::options::ImporterOptions;
use crate::protocol::Located;
use crate::resolver::{self, Resolution};
use rcimport_vfs::{path as bundle_path, ResourceTree};
use std::fmt;
use std::sync::Arc;

/// Import hook for one directory of a resource bundle.
///
/// Cheap to clone: the tree and options are shared, so a clone is what ends
/// up in each loaded module's `__loader__`.
#[derive(Clone)]
pub struct Importer {
    /// Bundle directory, always ending with a separator
    root: Arc<str>,

    tree: Arc<dyn ResourceTree>,

    options: Arc<ImporterOptions>,
}

impl Importer {
    /// Create an importer for `path` with default options.
    ///
    /// # Errors
    /// Returns `ImportError::InvalidRoot` if `path` is not a directory of
    /// `tree`.
    pub fn new(tree: Arc<dyn ResourceTree>, path: &str) -> Result<Self, ImportError> {
        Self::with_options(tree, path, ImporterOptions::default())
    }

    pub fn with_options(
        tree: Arc<dyn ResourceTree>,
        path: &str,
        options: ImporterOptions,
    ) -> Result<Self, ImportError> {
        if path.is_empty() || !tree.is_dir(path) {
            return Err(ImportError::InvalidRoot {
                path: path.to_string(),
            });
        }

        let root = bundle_path::with_trailing_separator(path);
        log::debug!("importer created for {}", root);

        Ok(Self {
            root: Arc::from(root),
            tree,
            options: Arc::new(options),
        })
    }

    /// The bundle directory, with a trailing separator.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn options(&self) -> &ImporterOptions {
        &self.options
    }

    pub fn tree(&self) -> &dyn ResourceTree {
        self.tree.as_ref()
    }

    /// Classify `fqmn` without loading anything.
    pub fn classify(&self, fqmn: &str) -> Resolution {
        resolver::classify(self.tree.as_ref(), &self.root, fqmn, &self.options)
    }

    /// Find out whether this importer handles `fqmn`.
    ///
    /// Modules and packages are handled here; a namespace directory is
    /// reported as a portion for the runtime to combine; a dotted name the
    /// bundle lacks is handed to the host's generic finder, once.
    pub fn locate<H: HostRuntime>(
        &self,
        host: &mut H,
        ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<Located<H::Loader>, H::Error> {
        let resolution = self.classify(fqmn);
        log::debug!(
            "{} in {}: {}",
            fqmn,
            self.root,
            resolution.classification()
        );

        match resolution {
            Resolution::Module { .. } | Resolution::Package { .. } => Ok(Located::Handled),
            Resolution::Namespace { pathname } => Ok(Located::Namespace {
                portions: vec![pathname],
            }),
            Resolution::NotFound => {
                let dotted = ModuleName::parse(fqmn).is_some_and(|name| name.is_dotted());
                if !dotted || !self.options.fallback {
                    return Ok(Located::NotHandled);
                }

                match loader::fallback(host, ctx, fqmn)? {
                    Some(found) => Ok(Located::Delegated(found)),
                    None => Ok(Located::NotHandled),
                }
            }
        }
    }

    /// Load and execute the module or package `fqmn`.
    ///
    /// # Errors
    /// `ImportError::NotFound` (converted to the host error) if the bundle
    /// holds no code for `fqmn`; `ImportError::Io` if the code file cannot
    /// be read; anything the host raises while unmarshalling or executing,
    /// unchanged.
    pub fn load<H: HostRuntime>(&self, host: &mut H, fqmn: &str) -> Result<H::Module, H::Error> {
        let resolution = self.classify(fqmn);
        loader::load_resolved(self, host, fqmn, &resolution)
    }
}

impl fmt::Debug for Importer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Importer")
            .field("root", &self.root)
            .field("options", &self.options)
            .finish()
    }
}
