use thiserror::Error;

/// Failures raised by the importer itself.
///
/// Failures raised by the host (bad code blobs, exceptions while executing
/// a module, a failing delegate lookup) are the host's own error type and
/// pass through untouched; `HostRuntime::Error` only has to be constructible
/// from this one.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("rcimporter: not a valid bundle directory: {path}")]
    InvalidRoot { path: String },

    #[error("rcimporter: can't find module {module}")]
    NotFound { module: String },

    #[error("rcimporter: error opening file for module {module}: {path}")]
    Io {
        module: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    pub fn not_found(module: impl Into<String>) -> Self {
        ImportError::NotFound {
            module: module.into(),
        }
    }
}
