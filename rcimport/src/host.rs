// Host runtime contract
//
// Everything the importer needs from the runtime that embeds it. The
// importer never touches runtime objects directly; code, modules and
// loaders stay opaque associated types.

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::importer::Importer;

/// The runtime an [`Importer`] is installed into.
///
/// Calls arrive with the runtime's import lock held, so implementations do
/// not need their own locking.
pub trait HostRuntime: Sized {
    /// Deserialized, executable code object.
    type Code;

    /// A module object registered in the runtime's module table.
    type Module;

    /// A loader returned by the runtime's generic finder.
    type Loader;

    /// Handle to the runtime's generic "find a loader for this name" entry
    /// point. Resolved once per [`ImportContext`] and reused.
    type Delegate: Clone;

    /// The runtime's exception type.
    type Error: From<ImportError>;

    /// Deserialize a precompiled code blob with the runtime's own reader.
    fn unmarshal_code(&mut self, data: &[u8]) -> Result<Self::Code, Self::Error>;

    /// Register a module under `fqmn`, or fetch the one already registered.
    fn add_module(&mut self, fqmn: &str) -> Result<Self::Module, Self::Error>;

    /// Set the module's `__loader__` to `importer`.
    fn set_loader(&mut self, module: &Self::Module, importer: &Importer)
        -> Result<(), Self::Error>;

    /// Set the module's `__path__`.
    fn set_search_path(
        &mut self,
        module: &Self::Module,
        search_path: Vec<String>,
    ) -> Result<(), Self::Error>;

    /// Execute `code` in the namespace of the module registered under
    /// `fqmn`, labelling it `filename` in tracebacks, and return the module.
    fn exec_code_module(
        &mut self,
        fqmn: &str,
        code: Self::Code,
        filename: &str,
    ) -> Result<Self::Module, Self::Error>;

    /// Look up the generic finder entry point.
    fn resolve_delegate(&mut self) -> Result<Self::Delegate, Self::Error>;

    /// Ask the generic finder for a loader for `fqmn`.
    ///
    /// The finder walks the runtime's path hooks, which may include this
    /// importer again; `ctx` must be handed back to any importer it calls.
    fn call_delegate(
        &mut self,
        delegate: &Self::Delegate,
        ctx: &mut ImportContext<Self>,
        fqmn: &str,
    ) -> Result<Option<Self::Loader>, Self::Error>;
}

/// Extra operations needed by the older find_module/load_module protocol,
/// which finds statically linked sub-modules through the builtin table
/// instead of a generic finder.
pub trait LegacyHost: HostRuntime {
    /// Whether `fqmn` is in the runtime's table of builtin modules.
    fn is_builtin(&self, fqmn: &str) -> bool;

    /// Initialize a builtin module. `Ok(None)` if there is no such builtin.
    fn init_builtin(&mut self, fqmn: &str) -> Result<Option<Self::Module>, Self::Error>;
}
