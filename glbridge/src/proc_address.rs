//! Procedure address resolution.
//!
//! Resolving an OpenGL entry point is a small ordered fallback chain:
//!
//! 1. Ask the windowing system’s extension lookup (`wglGetProcAddress`, `eglGetProcAddress`).
//! 2. Classify the answer: some drivers answer with values that look like addresses but aren’t
//!    callable, typically for core functions they don’t expose through the extension path. Any
//!    value in [`NOT_FOUND_SENTINELS`] means “not found”.
//! 3. On “not found”, look the symbol up in the platform’s core GL library, loaded once per
//!    process (see [`ProcessLibrary`]).
//!
//! Whatever the last step yields is returned, null included. Deciding whether a missing entry
//! point is fatal is the job of the function table loader, not of the resolver.
//!
//! [`ProcessLibrary`]: crate::library::ProcessLibrary

use std::ffi::{c_void, CStr, CString};

/// Raw address of a driver entry point.
///
/// It aliases driver-resident code and is only valid while the context it was resolved with is
/// alive.
pub type ProcAddress = *const c_void;

/// Values an extension lookup returns to mean “not found”: null, `1`, `2`, `3` and all bits set.
pub const NOT_FOUND_SENTINELS: [usize; 5] = [0, 1, 2, 3, usize::MAX];

/// Whether an address returned by an extension lookup means “not found”.
#[inline]
pub fn is_sentinel(address: ProcAddress) -> bool {
  NOT_FOUND_SENTINELS.contains(&(address as usize))
}

/// Resolve `name` through `primary`, falling back to `fallback` when `primary` answers with a
/// sentinel.
///
/// Names that cannot be turned into C strings (interior NUL) resolve to null without calling
/// either lookup.
pub fn resolve_with<P, F>(name: &str, primary: P, fallback: F) -> ProcAddress
where
  P: FnOnce(&CStr) -> ProcAddress,
  F: FnOnce(&CStr) -> ProcAddress,
{
  let name = match CString::new(name) {
    Ok(name) => name,
    Err(_) => return std::ptr::null(),
  };

  let address = primary(&name);

  if is_sentinel(address) {
    fallback(&name)
  } else {
    address
  }
}
