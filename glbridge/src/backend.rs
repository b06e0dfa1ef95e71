//! Context backends.
//!
//! A backend owns the lifecycle of a single OpenGL context:
//!
//! ```text
//! Uninitialized   (construction failed, terminal except for drop)
//! NoContext  ──create_context──▶  HasContext  ──make_current / make_null_current──▶  HasContext
//!    ▲                                │
//!    └────── failed create_context ───┘ (a failed creation never leaves a context behind)
//! ```
//!
//! Dropping a backend unbinds the context from the calling thread and destroys it.
//!
//! # On context and threads
//!
//! A native context may be current on at most one thread at a time. Backends don’t lock anything
//! to enforce it: binding a context current elsewhere is rejected by the native call itself,
//! which is reported as [`ContextError::BindFailed`]. Call [`ContextBackend::make_null_current`]
//! on the thread holding the context before binding it somewhere else.

use crate::error::ContextError;
use crate::proc_address::ProcAddress;
use crate::request::{ContextRequest, GlVersion};
use crate::window::NativeWindowRef;

/// Observable state of a backend.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BackendState {
  /// Construction failed; the backend owns nothing.
  Uninitialized,
  /// Constructed, no context created (yet, or after a failed creation).
  NoContext,
  /// A context exists.
  HasContext,
}

/// A platform implementation of OpenGL context management.
///
/// Construction is platform-specific (each implementor has its own `new`); it performs the
/// capability check and leaves the backend uninitialized on failure. Every operation on an
/// uninitialized backend fails with [`ContextError::Uninitialized`] and never reaches the
/// native API.
pub trait ContextBackend {
  /// Whether construction succeeded.
  fn is_initialized(&self) -> bool;

  /// Current state of the backend.
  fn state(&self) -> BackendState;

  /// Create a core profile context of exactly the requested version against `window`, and make
  /// it current on the calling thread.
  ///
  /// On failure, no context is left behind and the call can be retried, for instance with a
  /// lower version. Creating a context on a backend that already has one destroys the old one
  /// first.
  fn create_context(
    &mut self,
    request: ContextRequest,
    window: NativeWindowRef<'_>,
  ) -> Result<(), ContextError>;

  /// Bind the context to the calling thread.
  ///
  /// On failure, render operations issued on this thread are invalid until a successful call.
  fn make_current(&mut self) -> Result<(), ContextError>;

  /// Unbind any context from the calling thread.
  ///
  /// Idempotent: calling it with nothing bound is fine.
  fn make_null_current(&mut self) -> Result<(), ContextError>;

  /// Present the back buffer.
  ///
  /// This might block on vertical synchronization. Nothing happens if there is no context.
  fn swap_buffers(&mut self);

  /// Version negotiated for the current context, if any.
  fn version(&self) -> Option<GlVersion>;

  /// Resolve the address of an OpenGL entry point.
  ///
  /// A context must be current for the result to be meaningful. Null is returned for entry
  /// points the driver doesn’t have.
  fn get_proc_address(&self, name: &str) -> ProcAddress;
}
