// Import hook protocols
//
// Runtimes have exposed two generations of path-hook interface. The
// finder/loader generation asks `find_loader` and can express namespace
// portions and foreign loaders; the legacy generation asks `find_module` for
// a yes/no and then calls `load_module`. Both adapt the same Importer.

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::host::{HostRuntime, LegacyHost};
use crate::importer::Importer;
use crate::loader;
use crate::name::ModuleName;
use crate::resolver::Resolution;

/// Answer to "do you handle this name?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located<L> {
    /// The importer itself loads it; no extra search path.
    Handled,

    /// A namespace directory; the runtime combines portions from every
    /// path entry into one namespace package.
    Namespace { portions: Vec<String> },

    /// Found by the host's generic finder instead (e.g. a statically linked
    /// sub-module).
    Delegated(L),

    /// Not here; the runtime moves on to the next path entry.
    NotHandled,
}

/// A path hook as seen by the runtime's import system.
pub trait ImportHook<H: HostRuntime> {
    fn find(
        &self,
        host: &mut H,
        ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<Located<H::Loader>, H::Error>;

    fn load(
        &self,
        host: &mut H,
        ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<H::Module, H::Error>;
}

impl<H: HostRuntime> ImportHook<H> for Importer {
    fn find(
        &self,
        host: &mut H,
        ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<Located<H::Loader>, H::Error> {
        self.locate(host, ctx, fqmn)
    }

    fn load(
        &self,
        host: &mut H,
        _ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<H::Module, H::Error> {
        Importer::load(self, host, fqmn)
    }
}

/// The find_module/load_module generation of the hook.
///
/// Namespace directories are invisible to this protocol, and dotted names
/// missing from the bundle are claimed only when they are builtins, which
/// `load` then initializes through the host.
#[derive(Debug, Clone)]
pub struct LegacyHook {
    importer: Importer,
}

impl LegacyHook {
    pub fn new(importer: Importer) -> Self {
        Self { importer }
    }

    pub fn importer(&self) -> &Importer {
        &self.importer
    }
}

impl<H: LegacyHost> ImportHook<H> for LegacyHook {
    fn find(
        &self,
        host: &mut H,
        _ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<Located<H::Loader>, H::Error> {
        if self.importer.classify(fqmn).is_loadable() {
            return Ok(Located::Handled);
        }

        let dotted = ModuleName::parse(fqmn).is_some_and(|name| name.is_dotted());
        if dotted && host.is_builtin(fqmn) {
            log::debug!("claiming builtin sub-module {}", fqmn);
            return Ok(Located::Handled);
        }

        Ok(Located::NotHandled)
    }

    fn load(
        &self,
        host: &mut H,
        _ctx: &mut ImportContext<H>,
        fqmn: &str,
    ) -> Result<H::Module, H::Error> {
        let resolution = self.importer.classify(fqmn);

        if resolution == Resolution::NotFound {
            return match host.init_builtin(fqmn)? {
                Some(module) => Ok(module),
                None => Err(ImportError::not_found(fqmn).into()),
            };
        }

        loader::load_resolved(&self.importer, host, fqmn, &resolution)
    }
}
