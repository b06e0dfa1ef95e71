//! Runtime loading of native libraries.
//!
//! Backends never link against the GL stack at build time. The core GL library used by the
//! procedure resolver fallback and, on Unix, the EGL runtime itself are opened at runtime.

use std::ffi::{c_void, CStr, CString};
use std::fmt;
use std::sync::OnceLock;

use crate::proc_address::ProcAddress;

#[cfg(unix)]
mod sys {
  use std::ffi::{c_char, c_int, c_void};

  // dlopen / dlsym come with the C runtime std already links
  extern "C" {
    fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void;
    fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
  }

  const RTLD_LAZY: c_int = 0x1;

  pub unsafe fn open(name: *const c_char) -> *mut c_void {
    dlopen(name, RTLD_LAZY)
  }

  pub unsafe fn symbol(handle: *mut c_void, name: *const c_char) -> *const c_void {
    dlsym(handle, name) as *const c_void
  }
}

#[cfg(windows)]
mod sys {
  use std::ffi::{c_char, c_void};
  use winapi::shared::minwindef::HMODULE;
  use winapi::um::libloaderapi::{GetProcAddress, LoadLibraryA};

  pub unsafe fn open(name: *const c_char) -> *mut c_void {
    LoadLibraryA(name) as *mut c_void
  }

  pub unsafe fn symbol(handle: *mut c_void, name: *const c_char) -> *const c_void {
    GetProcAddress(handle as HMODULE, name) as *const c_void
  }
}

/// A native dynamic library, opened at runtime.
///
/// Libraries are never closed: resolved entry points stay valid until the process exits.
pub struct DynamicLibrary {
  name: String,
  handle: *mut c_void,
}

// Native library handles are process-wide and may be used from any thread.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl fmt::Debug for DynamicLibrary {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("DynamicLibrary")
      .field("name", &self.name)
      .finish()
  }
}

impl DynamicLibrary {
  /// Open a library by name (`"opengl32.dll"`, `"libEGL.so.1"`…), using the platform search path.
  ///
  /// Returns `None` if the library cannot be found or loaded.
  pub fn open(name: &str) -> Option<Self> {
    let c_name = CString::new(name).ok()?;
    let handle = unsafe { sys::open(c_name.as_ptr()) };

    if handle.is_null() {
      None
    } else {
      Some(DynamicLibrary {
        name: name.to_owned(),
        handle,
      })
    }
  }

  /// Open the first library of `names` that loads.
  pub fn open_any(names: &[&str]) -> Option<Self> {
    names.iter().find_map(|name| DynamicLibrary::open(name))
  }

  /// Name the library was opened with.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Address of a symbol, or null if the library doesn’t export it.
  pub fn symbol(&self, name: &CStr) -> ProcAddress {
    unsafe { sys::symbol(self.handle, name.as_ptr()) }
  }
}

/// A library loaded at most once per process, on first use, and valid until the process exits.
///
/// The first load is guarded by a [`OnceLock`]: concurrent first uses block until one of them has
/// opened the library, and a library that failed to load is not tried again.
///
/// ```ignore
/// static OPENGL32: ProcessLibrary = ProcessLibrary::new(&["opengl32.dll"]);
///
/// let clear = OPENGL32.symbol(c"glClear");
/// ```
pub struct ProcessLibrary {
  candidates: &'static [&'static str],
  library: OnceLock<Option<DynamicLibrary>>,
}

impl fmt::Debug for ProcessLibrary {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("ProcessLibrary")
      .field("candidates", &self.candidates)
      .field("library", &self.library.get())
      .finish()
  }
}

impl ProcessLibrary {
  /// Declare a library; the first of `candidates` that loads will be used.
  pub const fn new(candidates: &'static [&'static str]) -> Self {
    ProcessLibrary {
      candidates,
      library: OnceLock::new(),
    }
  }

  /// Load the library if it’s not already, and get it.
  pub fn get(&self) -> Option<&DynamicLibrary> {
    self
      .library
      .get_or_init(|| DynamicLibrary::open_any(self.candidates))
      .as_ref()
  }

  /// Whether a load was already attempted.
  #[inline]
  pub fn is_initialized(&self) -> bool {
    self.library.get().is_some()
  }

  /// Address of a symbol in the library, or null if the library or the symbol is missing.
  pub fn symbol(&self, name: &CStr) -> ProcAddress {
    self
      .get()
      .map_or(std::ptr::null(), |library| library.symbol(name))
  }
}
