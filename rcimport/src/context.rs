// Per-interpreter import state

use crate::host::HostRuntime;
use std::fmt;

/// State shared by every importer of one interpreter.
///
/// Holds the recursion guard for fallback delegation and the memoized
/// delegate handle. The embedder owns one per interpreter and passes it to
/// every lookup; the host's import lock already serializes those calls.
pub struct ImportContext<H: HostRuntime> {
    /// Set while a fallback delegation is in progress
    pub(crate) delegating: bool,

    /// The host's generic finder, resolved on first use
    pub(crate) delegate: Option<H::Delegate>,

    /// Number of delegations started through this context
    pub(crate) delegations: usize,
}

impl<H: HostRuntime> ImportContext<H> {
    pub fn new() -> Self {
        Self {
            delegating: false,
            delegate: None,
            delegations: 0,
        }
    }

    /// Whether a fallback delegation is currently running.
    pub fn is_delegating(&self) -> bool {
        self.delegating
    }

    /// Whether the delegate handle has been resolved yet.
    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// How many delegations this context has started.
    pub fn delegations(&self) -> usize {
        self.delegations
    }

    /// Return the memoized delegate, resolving it through the host first
    /// if needed.
    pub(crate) fn delegate(&mut self, host: &mut H) -> Result<H::Delegate, H::Error> {
        if let Some(delegate) = &self.delegate {
            return Ok(delegate.clone());
        }

        let delegate = host.resolve_delegate()?;
        self.delegate = Some(delegate.clone());
        Ok(delegate)
    }
}

impl<H: HostRuntime> Default for ImportContext<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostRuntime> fmt::Debug for ImportContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportContext")
            .field("delegating", &self.delegating)
            .field("has_delegate", &self.delegate.is_some())
            .field("delegations", &self.delegations)
            .finish()
    }
}
