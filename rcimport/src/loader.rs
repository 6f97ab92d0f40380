// Module loader
// Turns a resolved bundle entry into an executed module, and falls back to
// the host's generic finder for sub-modules the bundle does not hold

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::host::HostRuntime;
use crate::importer::Importer;
use crate::resolver::Resolution;
use rcimport_vfs::ResourceTree;

/// Load and execute the code a resolution points at.
///
/// The module stays registered if execution fails; a failed import may
/// leave a partial entry behind, as with any import.
pub fn load_resolved<H: HostRuntime>(
    importer: &Importer,
    host: &mut H,
    fqmn: &str,
    resolution: &Resolution,
) -> Result<H::Module, H::Error> {
    let (filename, search_path) = match resolution {
        Resolution::Module { filename, .. } => (filename, None),
        Resolution::Package { pathname, filename } => (filename, Some(pathname)),
        Resolution::Namespace { .. } | Resolution::NotFound => {
            return Err(ImportError::not_found(fqmn).into());
        }
    };

    let data = read_code(importer.tree(), fqmn, filename)?;
    let code = host.unmarshal_code(&data)?;

    let module = host.add_module(fqmn)?;
    host.set_loader(&module, importer)?;

    // Packages see their own __path__ while their top-level code runs
    if let Some(pathname) = search_path {
        host.set_search_path(&module, vec![pathname.clone()])?;
    }

    log::debug!("executing {} from {}", fqmn, filename);

    host.exec_code_module(fqmn, code, filename)
}

/// Read a code file, naming the module on failure.
fn read_code(tree: &dyn ResourceTree, fqmn: &str, filename: &str) -> Result<Vec<u8>, ImportError> {
    tree.read(filename).map_err(|source| ImportError::Io {
        module: fqmn.to_string(),
        path: filename.to_string(),
        source,
    })
}

/// Ask the host's generic finder about a name the bundle lacks.
///
/// Returns `Ok(None)` without asking if a delegation is already running
/// through `ctx`: the finder walks the path hooks, reaches this importer
/// again, and must not be re-entered.
pub fn fallback<H: HostRuntime>(
    host: &mut H,
    ctx: &mut ImportContext<H>,
    fqmn: &str,
) -> Result<Option<H::Loader>, H::Error> {
    if ctx.delegating {
        log::debug!("not delegating {}: delegation already in progress", fqmn);
        return Ok(None);
    }

    let delegate = ctx.delegate(host)?;

    log::debug!("delegating {} to the host finder", fqmn);

    ctx.delegating = true;
    ctx.delegations += 1;
    let found = host.call_delegate(&delegate, ctx, fqmn);
    ctx.delegating = false;

    found
}
