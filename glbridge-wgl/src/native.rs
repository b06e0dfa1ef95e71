//! The native WGL surface the backend drives.
//!
//! [`Wgl`] lists the handful of native calls context management needs. [`Win32Wgl`] implements
//! it on Windows; anything else implementing it (a driver double in tests, an instrumented
//! wrapper…) can be plugged into a [`WglBackend`].
//!
//! [`Win32Wgl`]: crate::Win32Wgl
//! [`WglBackend`]: crate::WglBackend

use glbridge::{ContextRequest, PixelFormat, ProcAddress};
use std::ffi::{c_void, CStr};
use std::fmt;
use std::ptr::NonNull;

/// Name of the entry point creating versioned / profiled contexts.
pub const CREATE_CONTEXT_ATTRIBS: &str = "wglCreateContextAttribsARB";

/// `WGL_CONTEXT_MAJOR_VERSION_ARB`.
pub const WGL_CONTEXT_MAJOR_VERSION_ARB: i32 = 0x2091;
/// `WGL_CONTEXT_MINOR_VERSION_ARB`.
pub const WGL_CONTEXT_MINOR_VERSION_ARB: i32 = 0x2092;
/// `WGL_CONTEXT_FLAGS_ARB`.
pub const WGL_CONTEXT_FLAGS_ARB: i32 = 0x2094;
/// `WGL_CONTEXT_PROFILE_MASK_ARB`.
pub const WGL_CONTEXT_PROFILE_MASK_ARB: i32 = 0x9126;
/// `WGL_CONTEXT_DEBUG_BIT_ARB`.
pub const WGL_CONTEXT_DEBUG_BIT_ARB: i32 = 0x0001;
/// `WGL_CONTEXT_CORE_PROFILE_BIT_ARB`.
pub const WGL_CONTEXT_CORE_PROFILE_BIT_ARB: i32 = 0x0001;

/// Zero-terminated attribute list for `wglCreateContextAttribsARB`: exactly the requested
/// version, core profile, plus the debug flag if asked for.
pub fn context_attribs(request: &ContextRequest) -> [i32; 9] {
  let version = request.version();
  let flags = if request.is_debug() {
    WGL_CONTEXT_DEBUG_BIT_ARB
  } else {
    0
  };

  [
    WGL_CONTEXT_MAJOR_VERSION_ARB,
    version.major as i32,
    WGL_CONTEXT_MINOR_VERSION_ARB,
    version.minor as i32,
    WGL_CONTEXT_PROFILE_MASK_ARB,
    WGL_CONTEXT_CORE_PROFILE_BIT_ARB,
    WGL_CONTEXT_FLAGS_ARB,
    flags,
    0,
  ]
}

/// A non-null native window handle (`HWND`).
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Hwnd(NonNull<c_void>);

impl Hwnd {
  /// Wrap a raw `HWND`; `None` if it’s null.
  #[inline]
  pub fn new(hwnd: *mut c_void) -> Option<Self> {
    NonNull::new(hwnd).map(Hwnd)
  }

  /// Raw `HWND`.
  #[inline]
  pub fn as_ptr(self) -> *mut c_void {
    self.0.as_ptr()
  }
}

// A window handle is only an identifier; WGL arbitrates which thread uses it.
unsafe impl Send for Hwnd {}

impl fmt::Debug for Hwnd {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "Hwnd({:p})", self.0)
  }
}

/// Native WGL calls.
///
/// Every method maps to one (or a couple of) Win32 / WGL calls and reports failure as `None` or
/// `false`; turning failures into [`ContextError`]s and reporting them is the backend’s job.
///
/// [`ContextError`]: glbridge::ContextError
pub trait Wgl {
  /// Device context (`HDC`).
  type Device: Copy + fmt::Debug + PartialEq;

  /// Rendering context (`HGLRC`).
  type Context: Copy + fmt::Debug + PartialEq;

  /// Resolved `wglCreateContextAttribsARB`.
  type CreateContextAttribs: Copy;

  /// `GetDC`.
  fn device(&mut self, window: Hwnd) -> Option<Self::Device>;

  /// `ReleaseDC`.
  fn release_device(&mut self, window: Hwnd, device: Self::Device);

  /// `ChoosePixelFormat`: index of the closest match to `format`.
  fn choose_pixel_format(&mut self, device: Self::Device, format: &PixelFormat) -> Option<i32>;

  /// `DescribePixelFormat`.
  fn describe_pixel_format(&mut self, device: Self::Device, index: i32) -> Option<PixelFormat>;

  /// `GetPixelFormat`: the format already set on the device, if any.
  fn pixel_format(&mut self, device: Self::Device) -> Option<i32>;

  /// `SetPixelFormat`.
  fn set_pixel_format(&mut self, device: Self::Device, index: i32, format: &PixelFormat) -> bool;

  /// `wglCreateContext`: a legacy, unversioned context.
  fn create_legacy_context(&mut self, device: Self::Device) -> Option<Self::Context>;

  /// `wglMakeCurrent`; `None` unbinds the calling thread.
  fn make_current(&mut self, binding: Option<(Self::Device, Self::Context)>) -> bool;

  /// `wglDeleteContext`.
  fn delete_context(&mut self, context: Self::Context) -> bool;

  /// Resolve `wglCreateContextAttribsARB`. A context must be current.
  fn create_context_attribs(&mut self) -> Option<Self::CreateContextAttribs>;

  /// Call `wglCreateContextAttribsARB` with a zero-terminated attribute list.
  fn create_context_with_attribs(
    &mut self,
    entry: Self::CreateContextAttribs,
    device: Self::Device,
    attribs: &[i32],
  ) -> Option<Self::Context>;

  /// `SwapBuffers`.
  fn swap_buffers(&mut self, device: Self::Device) -> bool;

  /// `wglGetProcAddress`, raw: sentinels are not filtered.
  fn extension_proc_address(&self, name: &CStr) -> ProcAddress;

  /// Symbol lookup in the core GL library (`opengl32.dll`).
  fn core_proc_address(&self, name: &CStr) -> ProcAddress;
}
