//! The native EGL surface the backend drives.

use glbridge::{Api, ContextRequest, PixelFormat, ProcAddress};
use std::ffi::{c_void, CStr};
use std::fmt;

/// `EGL_NONE`, also the attribute list terminator.
pub const EGL_NONE: i32 = 0x3038;
/// `EGL_ALPHA_SIZE`.
pub const EGL_ALPHA_SIZE: i32 = 0x3021;
/// `EGL_BLUE_SIZE`.
pub const EGL_BLUE_SIZE: i32 = 0x3022;
/// `EGL_GREEN_SIZE`.
pub const EGL_GREEN_SIZE: i32 = 0x3023;
/// `EGL_RED_SIZE`.
pub const EGL_RED_SIZE: i32 = 0x3024;
/// `EGL_DEPTH_SIZE`.
pub const EGL_DEPTH_SIZE: i32 = 0x3025;
/// `EGL_STENCIL_SIZE`.
pub const EGL_STENCIL_SIZE: i32 = 0x3026;
/// `EGL_CONFIG_CAVEAT`.
pub const EGL_CONFIG_CAVEAT: i32 = 0x3027;
/// `EGL_SURFACE_TYPE`.
pub const EGL_SURFACE_TYPE: i32 = 0x3033;
/// `EGL_RENDERABLE_TYPE`.
pub const EGL_RENDERABLE_TYPE: i32 = 0x3040;
/// `EGL_WINDOW_BIT`.
pub const EGL_WINDOW_BIT: i32 = 0x0004;
/// `EGL_OPENGL_ES2_BIT`.
pub const EGL_OPENGL_ES2_BIT: i32 = 0x0004;
/// `EGL_OPENGL_BIT`.
pub const EGL_OPENGL_BIT: i32 = 0x0008;
/// `EGL_OPENGL_ES3_BIT`.
pub const EGL_OPENGL_ES3_BIT: i32 = 0x0040;
/// `EGL_CONTEXT_MAJOR_VERSION`.
pub const EGL_CONTEXT_MAJOR_VERSION: i32 = 0x3098;
/// `EGL_CONTEXT_MINOR_VERSION`.
pub const EGL_CONTEXT_MINOR_VERSION: i32 = 0x30FB;
/// `EGL_CONTEXT_OPENGL_PROFILE_MASK`.
pub const EGL_CONTEXT_OPENGL_PROFILE_MASK: i32 = 0x30FD;
/// `EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT`.
pub const EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT: i32 = 0x0001;
/// `EGL_CONTEXT_OPENGL_DEBUG`.
pub const EGL_CONTEXT_OPENGL_DEBUG: i32 = 0x31B0;
/// `EGL_TRUE`.
pub const EGL_TRUE: i32 = 1;

/// `EGL_OPENGL_API`.
pub const EGL_OPENGL_API: u32 = 0x30A2;
/// `EGL_OPENGL_ES_API`.
pub const EGL_OPENGL_ES_API: u32 = 0x30A0;

/// Config attribute list: a window-renderable, non-caveated config of at least `minimum`, for
/// the requested API flavor and version.
pub fn config_attribs(api: Api, request: &ContextRequest, minimum: &PixelFormat) -> Vec<i32> {
  let renderable = match api {
    Api::OpenGl => EGL_OPENGL_BIT,
    Api::OpenGlEs if request.version().major >= 3 => EGL_OPENGL_ES3_BIT,
    Api::OpenGlEs => EGL_OPENGL_ES2_BIT,
  };
  let channel = minimum.channel_bits() as i32;

  let mut attribs = vec![
    EGL_SURFACE_TYPE,
    EGL_WINDOW_BIT,
    EGL_RENDERABLE_TYPE,
    renderable,
    EGL_RED_SIZE,
    channel,
    EGL_GREEN_SIZE,
    channel,
    EGL_BLUE_SIZE,
    channel,
    EGL_ALPHA_SIZE,
    minimum.alpha_bits as i32,
    EGL_DEPTH_SIZE,
    minimum.depth_bits as i32,
    EGL_STENCIL_SIZE,
    minimum.stencil_bits as i32,
  ];

  // slow (software) configs carry a caveat
  if minimum.accelerated {
    attribs.extend_from_slice(&[EGL_CONFIG_CAVEAT, EGL_NONE]);
  }

  attribs.push(EGL_NONE);
  attribs
}

/// Context attribute list: exactly the requested version, core profile for desktop OpenGL, plus
/// the debug flag if asked for.
pub fn context_attribs(api: Api, request: &ContextRequest) -> Vec<i32> {
  let version = request.version();
  let mut attribs = vec![
    EGL_CONTEXT_MAJOR_VERSION,
    version.major as i32,
    EGL_CONTEXT_MINOR_VERSION,
    version.minor as i32,
  ];

  if api == Api::OpenGl {
    attribs.extend_from_slice(&[
      EGL_CONTEXT_OPENGL_PROFILE_MASK,
      EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT,
    ]);
  }

  if request.is_debug() {
    attribs.extend_from_slice(&[EGL_CONTEXT_OPENGL_DEBUG, EGL_TRUE]);
  }

  attribs.push(EGL_NONE);
  attribs
}

/// A native window, as EGL sees it (`EGLNativeWindowType`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NativeWindow(pub usize);

/// A native display connection (`EGLNativeDisplayType`); null is the default display.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct NativeDisplay(pub *mut c_void);

impl fmt::Debug for NativeDisplay {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "NativeDisplay({:p})", self.0)
  }
}

/// Native EGL calls.
///
/// Every method maps to one EGL call and reports failure as `None` or `false`.
pub trait Egl {
  /// `EGLDisplay`.
  type Display: Copy + fmt::Debug + PartialEq;

  /// `EGLConfig`.
  type Config: Copy + fmt::Debug;

  /// `EGLSurface`.
  type Surface: Copy + fmt::Debug + PartialEq;

  /// `EGLContext`.
  type Context: Copy + fmt::Debug + PartialEq;

  /// `eglGetDisplay`.
  fn display(&mut self, native: NativeDisplay) -> Option<Self::Display>;

  /// `eglInitialize`: the EGL version on success.
  ///
  /// Initializing an already initialized display does nothing. Displays are never terminated, as
  /// `eglTerminate` is not reference counted and other backends may share the display.
  fn initialize(&mut self, display: Self::Display) -> Option<(i32, i32)>;

  /// `eglBindAPI`, for the calling thread only.
  fn bind_api(&mut self, api: Api) -> bool;

  /// `eglChooseConfig`, keeping the best match.
  fn choose_config(&mut self, display: Self::Display, attribs: &[i32]) -> Option<Self::Config>;

  /// `eglCreateWindowSurface`.
  fn create_window_surface(
    &mut self,
    display: Self::Display,
    config: Self::Config,
    window: NativeWindow,
  ) -> Option<Self::Surface>;

  /// `eglDestroySurface`.
  fn destroy_surface(&mut self, display: Self::Display, surface: Self::Surface) -> bool;

  /// `eglCreateContext`, sharing nothing.
  fn create_context(
    &mut self,
    display: Self::Display,
    config: Self::Config,
    attribs: &[i32],
  ) -> Option<Self::Context>;

  /// `eglDestroyContext`.
  fn destroy_context(&mut self, display: Self::Display, context: Self::Context) -> bool;

  /// `eglMakeCurrent`, with the same surface to draw and read; `None` releases the context of
  /// the calling thread’s bound API.
  fn make_current(
    &mut self,
    display: Self::Display,
    binding: Option<(Self::Surface, Self::Context)>,
  ) -> bool;

  /// `eglSwapBuffers`.
  fn swap_buffers(&mut self, display: Self::Display, surface: Self::Surface) -> bool;

  /// `eglGetProcAddress`, raw: sentinels are not filtered.
  fn extension_proc_address(&self, name: &CStr) -> ProcAddress;

  /// Symbol lookup in the core library of `api` (`libGL`, `libGLESv2`).
  fn core_proc_address(&self, api: Api, name: &CStr) -> ProcAddress;
}
