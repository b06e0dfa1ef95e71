//! [glbridge], but with a context backend type picked at compile-time.
//!
//! This crate re-exports [glbridge] along with a `Backend` type alias selecting the context
//! backend for the platform you target, and a `get_proc_address` function resolving OpenGL
//! entry points with that platform’s fallback chain.
//!
//! > Important note: if you are writing a library on top of [glbridge], please stick to the
//! > [glbridge] crate and its [`ContextBackend`] trait, so that your users can pick their backend.
//!
//! # How to setup
//!
//! For a starter experience, you have nothing specific to do: simply add `glbridge-front` as a
//! direct dependency and you should be good to go:
//!
//! ```ignore
//! [dependencies]
//! glbridge-front = "…"
//! ```
//!
//! This will select a _default_ backend for the target you currently compile for. If you would
//! rather not compile a backend you will not use, disable default features and pick them:
//!
//! ```ignore
//! [dependencies]
//! glbridge-front = { version = "…", default-features = false, features = ["egl"] }
//! ```
//!
//! ## List of features
//!
//! - _Default_: `["autoselect"]`, which is `["wgl", "egl"]`.
//! - `"wgl"`: WGL backend, on Windows.
//! - `"egl"`: EGL backend, on Unix (macOS excluded).
//!
//! [glbridge]: https://crates.io/crates/glbridge

pub use glbridge::*;

// select the backend type

#[cfg(all(windows, feature = "wgl"))]
pub use glbridge_wgl::WglBackend;

/// Context backend of the current target.
#[cfg(all(windows, feature = "wgl"))]
pub type Backend = glbridge_wgl::Backend;

#[cfg(all(unix, not(target_os = "macos"), feature = "egl"))]
pub use glbridge_egl::EglBackend;

/// Context backend of the current target.
#[cfg(all(unix, not(target_os = "macos"), feature = "egl"))]
pub type Backend = glbridge_egl::Backend;

/// Name of the backend of the current target, as it appears in diagnostics.
#[cfg(all(windows, feature = "wgl"))]
pub const PLATFORM: &str = glbridge_wgl::PLATFORM;

/// Name of the backend of the current target, as it appears in diagnostics.
#[cfg(all(unix, not(target_os = "macos"), feature = "egl"))]
pub const PLATFORM: &str = glbridge_egl::PLATFORM;

/// Resolve an OpenGL entry point for `api`, without a backend at hand.
///
/// A context must be current on the calling thread for the address to be usable. WGL only knows
/// about desktop OpenGL: asking it for OpenGL ES entry points gives null.
#[cfg(all(windows, feature = "wgl"))]
pub fn get_proc_address(api: Api, name: &str) -> ProcAddress {
  if api.is_embedded() {
    return std::ptr::null();
  }

  glbridge_wgl::get_proc_address(name)
}

/// Resolve an OpenGL or OpenGL ES entry point for `api`, without a backend at hand.
///
/// A context must be current on the calling thread for the address to be usable.
#[cfg(all(unix, not(target_os = "macos"), feature = "egl"))]
pub fn get_proc_address(api: Api, name: &str) -> ProcAddress {
  glbridge_egl::get_proc_address(api, name)
}
